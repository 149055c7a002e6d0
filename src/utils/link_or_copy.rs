use crate::error::{Result, SnapshotError};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// How an unchanged file is carried over into a new snapshot family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThrough {
    /// Hard link, falling back to a copy when linking is not possible.
    Link,
    /// Always copy the bytes.
    Copy,
}

/// Makes `dst` hold the same bytes as `src` without touching `src`.
///
/// Never overwrites an existing `dst`.
pub fn link_or_copy(src: &Path, dst: &Path, mode: PassThrough) -> Result<()> {
    if mode == PassThrough::Link {
        match fs::hard_link(src, dst) {
            Ok(()) => {
                debug!(src = %src.display(), dst = %dst.display(), "linked");
                return Ok(());
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(SnapshotError::AlreadyExists {
                    path: dst.to_path_buf(),
                });
            }
            Err(err) => {
                warn!(
                    src = %src.display(),
                    dst = %dst.display(),
                    error = %err,
                    "hard link failed, copying instead"
                );
            }
        }
    }

    if dst.symlink_metadata().is_ok() {
        return Err(SnapshotError::AlreadyExists {
            path: dst.to_path_buf(),
        });
    }
    fs::copy(src, dst).map_err(|err| SnapshotError::io(dst, "copy", err))?;
    debug!(src = %src.display(), dst = %dst.display(), "copied");

    Ok(())
}
