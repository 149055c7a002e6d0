use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading, validating, repartitioning or decoding a
/// snapshot.
///
/// Every variant is a deterministic data or storage failure. Nothing is
/// retried, and an operation that fails leaves no partial output behind.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A prefix array or per-rank count array violates its invariants.
    #[error("invalid partition at rank {rank}: {detail}")]
    InvalidPartition { rank: usize, detail: String },

    /// A bond-offset segment is not a non-decreasing run starting at zero,
    /// or the table length disagrees with the partition.
    #[error("malformed bond-offset table in rank {rank} at entry {index}: {detail}")]
    MalformedOffsetTable {
        rank: usize,
        index: usize,
        detail: String,
    },

    /// A bond record reads past the boundary implied by the offset table.
    #[error(
        "corrupt bond stream for particle {particle_id} (rank {rank}) at bond word {offset}: {detail}"
    )]
    CorruptBondStream {
        rank: usize,
        particle_id: i32,
        offset: usize,
        detail: String,
    },

    /// An array file holds a different number of elements than expected.
    #[error("array shape mismatch in '{}': expected {expected} elements, found {found}", path.display())]
    ShapeMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("malformed header '{}': {detail}", path.display())]
    MalformedHeader { path: PathBuf, detail: String },

    /// A required source file of the snapshot family is absent.
    #[error("required file '{}' does not exist", path.display())]
    Missing { path: PathBuf },

    /// A destination file would be overwritten.
    #[error("refusing to overwrite existing file '{}'", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("I/O error during {operation} on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl SnapshotError {
    /// Wraps an I/O error with the path and the operation that produced it.
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
        SnapshotError::Io {
            path: path.into(),
            operation,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
