use crate::error::{Result, SnapshotError};
use crate::snapshot::{FileKind, SnapshotDescriptor, SnapshotHeader, SnapshotPaths};
use crate::utils::verify_file_existence;
use std::path::PathBuf;

/// What `info` reports about a snapshot family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub prefix: PathBuf,
    pub rank_count: usize,
    pub n_total_particles: usize,
    pub n_total_bond_words: usize,
    pub bonded_interaction_types: usize,
    pub min_particles_per_rank: usize,
    pub max_particles_per_rank: usize,
    pub present: Vec<FileKind>,
    pub total_bytes: u64,
}

impl SnapshotSummary {
    /// Reads the header and partition metadata and validates the partition.
    /// Payload arrays are only sized, never loaded.
    pub fn collect(paths: &SnapshotPaths) -> Result<Self> {
        for kind in [FileKind::Head, FileKind::Pref, FileKind::Id] {
            verify_file_existence(&paths.path(kind))?;
        }

        let header = SnapshotHeader::read(&paths.path(FileKind::Head))?;
        let descriptor = SnapshotDescriptor::open(paths)?;
        let partition = descriptor.partition()?;

        let counts = partition.particle_counts();
        let min_particles_per_rank = counts.iter().copied().min().unwrap_or(0);
        let max_particles_per_rank = counts.iter().copied().max().unwrap_or(0);

        let present: Vec<FileKind> = FileKind::ALL
            .into_iter()
            .filter(|&kind| paths.is_present(kind))
            .collect();

        let mut total_bytes = 0;
        for &kind in &present {
            let path = paths.path(kind);
            total_bytes += std::fs::metadata(&path)
                .map_err(|err| SnapshotError::io(&path, "stat", err))?
                .len();
        }

        Ok(Self {
            prefix: paths.prefix().to_path_buf(),
            rank_count: descriptor.rank_count(),
            n_total_particles: descriptor.n_total_particles(),
            n_total_bond_words: descriptor.n_total_bond_words(),
            bonded_interaction_types: header.bonded_interaction_count(),
            min_particles_per_rank,
            max_particles_per_rank,
            present,
            total_bytes,
        })
    }
}
