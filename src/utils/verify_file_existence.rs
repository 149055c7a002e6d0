use crate::error::{Result, SnapshotError};
use std::path::Path;

/// Checks that a source file exists and is a regular file.
///
/// # Returns:
/// - `Ok(())` if the file exists and is a regular file.
/// - `Err(SnapshotError::Missing)` if nothing exists at `path`.
/// - `Err(SnapshotError::Io)` if something exists but is not a regular file.
pub fn verify_file_existence(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SnapshotError::Missing {
            path: path.to_path_buf(),
        });
    }

    if !path.is_file() {
        return Err(SnapshotError::io(
            path,
            "verify",
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    Ok(())
}

/// Checks that nothing exists yet at a destination path.
///
/// Dangling symbolic links count as existing.
pub fn verify_file_absence(path: &Path) -> Result<()> {
    if path.symlink_metadata().is_ok() {
        return Err(SnapshotError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
