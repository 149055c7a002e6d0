pub mod constants;

mod descriptor;
pub use descriptor::SnapshotDescriptor;

mod family;
pub use family::{FileKind, SnapshotPaths};

mod header;
pub use header::SnapshotHeader;

mod loaded;
pub use loaded::Snapshot;

mod payload;
pub use payload::{ParticleFields, ParticlePayload};

pub mod raw_array;

mod summary;
pub use summary::SnapshotSummary;

pub mod traits;
