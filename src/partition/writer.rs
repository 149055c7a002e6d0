use crate::error::{Result, SnapshotError};
use crate::partition::PartitionMetadata;
use crate::snapshot::raw_array::write_i32_array;
use crate::snapshot::{FileKind, SnapshotPaths};
use crate::utils::{append_suffix, verify_file_absence};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A fully written temporary file, removed on drop.
struct StagedFile {
    path: PathBuf,
    target: PathBuf,
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %err, "could not remove staged file");
        }
    }
}

/// Writes `.pref` and `.boff` of `partition` into the family at `paths`.
///
/// Both arrays are written and synced to temporary siblings first, then
/// published without clobbering. Either both targets end up in place or
/// neither does.
pub fn write_partition(paths: &SnapshotPaths, partition: &PartitionMetadata) -> Result<()> {
    let arrays = [
        (FileKind::Pref, partition.prefix()),
        (FileKind::Boff, partition.bond_offsets()),
    ];

    for (kind, _) in &arrays {
        verify_file_absence(&paths.path(*kind))?;
    }

    let mut staged = Vec::with_capacity(arrays.len());
    for (kind, values) in &arrays {
        let target = paths.path(*kind);
        let path = append_suffix(&target, &format!("partial-{}", std::process::id()));
        verify_file_absence(&path)?;

        let file = StagedFile { path, target };
        write_i32_array(&file.path, values)?;
        staged.push(file);
    }

    let mut published: Vec<&Path> = Vec::with_capacity(staged.len());
    for file in &staged {
        if let Err(err) = publish(&file.path, &file.target) {
            for target in published {
                if let Err(cleanup) = fs::remove_file(target) {
                    debug!(path = %target.display(), error = %cleanup, "could not roll back");
                }
            }
            return Err(err);
        }
        published.push(&file.target);
    }

    info!(
        prefix = %paths.prefix().display(),
        ranks = partition.rank_count(),
        "published partition metadata"
    );
    Ok(())
}

/// Moves a staged file to `target`, refusing to replace an existing file.
fn publish(staged: &Path, target: &Path) -> Result<()> {
    match fs::hard_link(staged, target) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(SnapshotError::AlreadyExists {
                path: target.to_path_buf(),
            })
        }
        Err(err) => {
            debug!(target = %target.display(), error = %err, "hard link failed, copying");
            verify_file_absence(target)?;
            fs::copy(staged, target)
                .map(|_| ())
                .map_err(|err| SnapshotError::io(target, "publish", err))
        }
    }
}
