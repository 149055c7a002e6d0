use crate::error::{Result, SnapshotError};
use crate::partition::PartitionMetadata;
use crate::snapshot::constants::I32_WIDTH;
use crate::snapshot::raw_array::{ensure_len, read_i32_array, record_count};
use crate::snapshot::{FileKind, SnapshotPaths};
use tracing::debug;

/// Sizes and raw partition metadata of one snapshot.
///
/// The rank count, particle count and bond word count are derived from file
/// lengths, exactly as the writer left them. Nothing is validated here beyond
/// array shapes; the partition invariants are checked by [`PartitionMetadata`]
/// and by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDescriptor {
    n_total_particles: usize,
    n_total_bond_words: usize,
    pref: Vec<i32>,
    boff: Option<Vec<i32>>,
}

impl SnapshotDescriptor {
    /// Builds a descriptor from in-memory arrays.
    ///
    /// `boff`, when given, must hold `n_total_particles + pref.len()` entries.
    pub fn from_parts(
        pref: Vec<i32>,
        boff: Option<Vec<i32>>,
        n_total_particles: usize,
        n_total_bond_words: usize,
    ) -> Result<Self> {
        if let Some(boff) = &boff {
            let expected = n_total_particles + pref.len();
            if boff.len() != expected {
                return Err(SnapshotError::MalformedOffsetTable {
                    rank: pref.len().saturating_sub(1),
                    index: boff.len(),
                    detail: format!("expected {expected} entries (particles + ranks)"),
                });
            }
        }

        Ok(Self {
            n_total_particles,
            n_total_bond_words,
            pref,
            boff,
        })
    }

    /// Reads `.pref` and `.boff` and sizes `.id` and `.bond`.
    ///
    /// Bond offsets are loaded only if `.boff` exists; a missing `.bond`
    /// means an empty bond stream.
    pub fn open(paths: &SnapshotPaths) -> Result<Self> {
        let pref = read_i32_array(&paths.path(FileKind::Pref))?;
        let n_total_particles = record_count(&paths.path(FileKind::Id), I32_WIDTH)?;

        let boff = if paths.is_present(FileKind::Boff) {
            let path = paths.path(FileKind::Boff);
            let boff = read_i32_array(&path)?;
            Some(ensure_len(&path, boff, n_total_particles + pref.len())?)
        } else {
            None
        };

        let n_total_bond_words = if boff.is_some() && paths.is_present(FileKind::Bond) {
            record_count(&paths.path(FileKind::Bond), I32_WIDTH)?
        } else {
            0
        };

        debug!(
            prefix = %paths.prefix().display(),
            ranks = pref.len(),
            particles = n_total_particles,
            bond_words = n_total_bond_words,
            "opened snapshot descriptor"
        );

        Ok(Self {
            n_total_particles,
            n_total_bond_words,
            pref,
            boff,
        })
    }

    pub fn rank_count(&self) -> usize {
        self.pref.len()
    }

    pub fn n_total_particles(&self) -> usize {
        self.n_total_particles
    }

    pub fn n_total_bond_words(&self) -> usize {
        self.n_total_bond_words
    }

    pub fn prefix(&self) -> &[i32] {
        &self.pref
    }

    pub fn bond_offsets(&self) -> Option<&[i32]> {
        self.boff.as_deref()
    }

    pub fn has_bonds(&self) -> bool {
        self.boff.is_some()
    }

    /// Validates the prefix and bond-offset arrays into a [`PartitionMetadata`].
    ///
    /// A snapshot without `.boff` is treated as one without bonds.
    pub fn partition(&self) -> Result<PartitionMetadata> {
        match &self.boff {
            Some(boff) => {
                PartitionMetadata::new(self.pref.clone(), boff.clone(), self.n_total_particles)
            }
            None => PartitionMetadata::without_bonds(self.pref.clone(), self.n_total_particles),
        }
    }
}
