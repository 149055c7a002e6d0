use crate::utils::append_suffix;
use std::fmt;
use std::path::{Path, PathBuf};

/// One member of a snapshot file family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Head,
    Pref,
    Id,
    Type,
    Pos,
    Vel,
    Boff,
    Bond,
}

impl FileKind {
    pub const ALL: [FileKind; 8] = [
        FileKind::Head,
        FileKind::Pref,
        FileKind::Id,
        FileKind::Type,
        FileKind::Pos,
        FileKind::Vel,
        FileKind::Boff,
        FileKind::Bond,
    ];

    /// Files a repartition cannot proceed without.
    pub const REQUIRED_FOR_REPARTITION: [FileKind; 5] = [
        FileKind::Head,
        FileKind::Pref,
        FileKind::Id,
        FileKind::Boff,
        FileKind::Bond,
    ];

    pub const fn suffix(self) -> &'static str {
        match self {
            FileKind::Head => "head",
            FileKind::Pref => "pref",
            FileKind::Id => "id",
            FileKind::Type => "type",
            FileKind::Pos => "pos",
            FileKind::Vel => "vel",
            FileKind::Boff => "boff",
            FileKind::Bond => "bond",
        }
    }

    /// `.pref` and `.boff` depend on the rank count; everything else does not.
    pub const fn is_partition_metadata(self) -> bool {
        matches!(self, FileKind::Pref | FileKind::Boff)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.suffix())
    }
}

/// Resolves the members of the file family sharing one path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    prefix: PathBuf,
}

impl SnapshotPaths {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    pub fn path(&self, kind: FileKind) -> PathBuf {
        append_suffix(&self.prefix, kind.suffix())
    }

    /// Whether the member exists and is readable as a regular file.
    pub fn is_present(&self, kind: FileKind) -> bool {
        self.path(kind).is_file()
    }
}
