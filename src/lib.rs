//! # MPI-IO snapshot tools
//!
//! A parallel particle simulation that checkpoints through MPI-IO writes one
//! family of flat binary arrays per snapshot, sharing a path prefix:
//!
//! | Suffix  | Records                                   |
//! |---------|-------------------------------------------|
//! | `.head` | field mask, bonded interaction arities    |
//! | `.pref` | `i32` × ranks: first particle of each rank |
//! | `.id`   | `i32` × particles                         |
//! | `.type` | `i32` × particles (optional)              |
//! | `.pos`  | `f64` × 3 × particles (optional)          |
//! | `.vel`  | `f64` × 3 × particles (optional)          |
//! | `.boff` | `i32` × (particles + ranks): rank-local bond offsets |
//! | `.bond` | `i32` bond stream: type id then partner ids |
//!
//! Only `.pref` and `.boff` depend on how many ranks wrote the snapshot. This
//! crate recomputes that pair for a different rank count
//! ([`partition::repartition`]) and decodes a snapshot into nested blockfile
//! text ([`decode::BlockDecoder`], [`decode::write_blockfile`]).
//!
//! ```no_run
//! use mpiio_snapshot::{PassThrough, SnapshotPaths, repartition_snapshot};
//!
//! let outcome = repartition_snapshot(
//!     &SnapshotPaths::new("run/snap-0042"),
//!     256,
//!     &SnapshotPaths::new("run/snap-0042-256"),
//!     PassThrough::Link,
//! )?;
//! println!("{outcome:?}");
//! # Ok::<(), mpiio_snapshot::SnapshotError>(())
//! ```

pub mod cli;

pub mod decode;
pub use decode::{BlockDecoder, BondRecord, DecodedParticle, write_blockfile};

pub mod error;
pub use error::{Result, SnapshotError};

pub mod partition;
pub use partition::{PartitionMetadata, RepartitionOutcome, repartition, repartition_snapshot};

pub mod snapshot;
pub use snapshot::{
    FileKind, ParticlePayload, Snapshot, SnapshotDescriptor, SnapshotHeader, SnapshotPaths,
};

pub mod utils;
pub use utils::PassThrough;
