use crate::error::{Result, SnapshotError};
use crate::partition::{PartitionMetadata, write_partition};
use crate::snapshot::{FileKind, SnapshotDescriptor, SnapshotPaths};
use crate::utils::{PassThrough, link_or_copy, verify_file_absence, verify_file_existence};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Particle counts of an even split of `n_total_particles` over `rank_count`
/// ranks.
///
/// Rank boundaries are `round(r · P / R)` for `r = 0..=R`, computed exactly in
/// integers (halves round up). Fails when any rank would be empty, which
/// happens exactly when `rank_count > n_total_particles`.
pub fn even_split_counts(n_total_particles: usize, rank_count: usize) -> Result<Vec<usize>> {
    if rank_count == 0 {
        return Err(SnapshotError::InvalidPartition {
            rank: 0,
            detail: "cannot split particles over zero ranks".to_string(),
        });
    }

    let total = n_total_particles as u128;
    let ranks = rank_count as u128;
    let boundary = |r: u128| ((2 * r * total + ranks) / (2 * ranks)) as usize;

    let mut counts = Vec::with_capacity(rank_count);
    for rank in 0..rank_count {
        let count = boundary(rank as u128 + 1) - boundary(rank as u128);
        if count == 0 {
            return Err(SnapshotError::InvalidPartition {
                rank,
                detail: format!(
                    "an even split of {n_total_particles} particles over {rank_count} ranks leaves this rank empty"
                ),
            });
        }
        counts.push(count);
    }

    Ok(counts)
}

/// Recomputes `.pref` and `.boff` for `new_rank_count` ranks.
///
/// The old arrays are validated as a side effect; the old rank count is
/// `old_pref.len()`.
pub fn repartition(
    old_pref: &[i32],
    old_boff: &[i32],
    n_total_particles: usize,
    new_rank_count: usize,
) -> Result<PartitionMetadata> {
    PartitionMetadata::new(old_pref.to_vec(), old_boff.to_vec(), n_total_particles)?
        .repartition(new_rank_count)
}

/// What [`repartition_snapshot`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepartitionOutcome {
    /// The snapshot already targets the requested rank count; nothing written.
    AlreadyPartitioned { rank_count: usize },
    Written {
        old_rank_count: usize,
        new_rank_count: usize,
        /// Unchanged members carried into the new family.
        passed_through: Vec<FileKind>,
    },
}

/// Writes a new snapshot family at `new_paths` holding the same particles as
/// `old_paths`, partitioned for `new_rank_count` ranks.
///
/// All existence checks and all computation happen before anything is
/// written. The new `.pref`/`.boff` pair is published atomically; every other
/// existing member is hard-linked or copied per `mode`.
pub fn repartition_snapshot(
    old_paths: &SnapshotPaths,
    new_rank_count: usize,
    new_paths: &SnapshotPaths,
    mode: PassThrough,
) -> Result<RepartitionOutcome> {
    for kind in FileKind::REQUIRED_FOR_REPARTITION {
        verify_file_existence(&old_paths.path(kind))?;
    }
    for kind in FileKind::ALL {
        verify_file_absence(&new_paths.path(kind))?;
    }

    let descriptor = SnapshotDescriptor::open(old_paths)?;
    if descriptor.rank_count() == new_rank_count {
        warn!(
            ranks = new_rank_count,
            "snapshot is already partitioned for the requested rank count"
        );
        return Ok(RepartitionOutcome::AlreadyPartitioned {
            rank_count: new_rank_count,
        });
    }

    let repartitioned = descriptor.partition()?.repartition(new_rank_count)?;
    write_partition(new_paths, &repartitioned)?;

    let mut created = CreatedFiles::default();
    created.track(new_paths.path(FileKind::Pref));
    created.track(new_paths.path(FileKind::Boff));

    let mut passed_through = Vec::new();
    for kind in FileKind::ALL {
        if kind.is_partition_metadata() || !old_paths.is_present(kind) {
            continue;
        }
        let target = new_paths.path(kind);
        link_or_copy(&old_paths.path(kind), &target, mode)?;
        created.track(target);
        passed_through.push(kind);
    }
    created.keep();

    info!(
        from = %old_paths.prefix().display(),
        to = %new_paths.prefix().display(),
        old_ranks = descriptor.rank_count(),
        new_ranks = new_rank_count,
        "wrote repartitioned snapshot"
    );

    Ok(RepartitionOutcome::Written {
        old_rank_count: descriptor.rank_count(),
        new_rank_count,
        passed_through,
    })
}

/// Files written into a new family, removed on drop unless kept.
#[derive(Debug, Default)]
struct CreatedFiles {
    paths: Vec<PathBuf>,
}

impl CreatedFiles {
    fn track(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    fn keep(mut self) {
        self.paths.clear();
    }
}

impl Drop for CreatedFiles {
    fn drop(&mut self) {
        for path in self.paths.drain(..) {
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "removed partial output"),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "could not remove partial output")
                }
            }
        }
    }
}
