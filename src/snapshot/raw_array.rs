use crate::error::{Result, SnapshotError};
use crate::snapshot::constants::{F64_WIDTH, I32_WIDTH};
use crate::utils::align_or_copy;
use memmap2::Mmap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Number of whole `width`-byte records in the file at `path`.
pub fn record_count(path: &Path, width: usize) -> Result<usize> {
    let len = std::fs::metadata(path)
        .map_err(|err| SnapshotError::io(path, "stat", err))?
        .len() as usize;

    if len % width != 0 {
        return Err(SnapshotError::io(
            path,
            "stat",
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("length {len} is not a multiple of the {width}-byte record width"),
            ),
        ));
    }

    Ok(len / width)
}

fn read_records<T: Copy, const N: usize>(
    path: &Path,
    from_ne_bytes: fn([u8; N]) -> T,
) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|err| SnapshotError::io(path, "open", err))?;
    let len = file
        .metadata()
        .map_err(|err| SnapshotError::io(path, "stat", err))?
        .len();

    if len == 0 {
        debug!(path = %path.display(), records = 0, "loaded empty array");
        return Ok(Vec::new());
    }

    // SAFETY: the mapping is read-only and dropped before returning; snapshot
    // files are not modified while a tool runs over them.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|err| SnapshotError::io(path, "mmap", err))?;

    let records = align_or_copy::<T, N>(&mmap, from_ne_bytes).ok_or_else(|| {
        SnapshotError::io(
            path,
            "read",
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("length {len} is not a multiple of the {N}-byte record width"),
            ),
        )
    })?;

    debug!(path = %path.display(), records = records.len(), "loaded array");
    Ok(records.into_owned())
}

pub fn read_i32_array(path: &Path) -> Result<Vec<i32>> {
    read_records::<i32, I32_WIDTH>(path, i32::from_ne_bytes)
}

pub fn read_f64_array(path: &Path) -> Result<Vec<f64>> {
    read_records::<f64, F64_WIDTH>(path, f64::from_ne_bytes)
}

/// Fails with [`SnapshotError::ShapeMismatch`] unless `values` holds exactly
/// `expected` records.
pub fn ensure_len<T>(path: &Path, values: Vec<T>, expected: usize) -> Result<Vec<T>> {
    if values.len() != expected {
        return Err(SnapshotError::ShapeMismatch {
            path: path.to_path_buf(),
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

/// Writes `values` in native byte order to a file that must not exist yet,
/// and syncs it to disk before returning.
pub fn write_i32_array(path: &Path, values: &[i32]) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| SnapshotError::io(path, "create", err))?;

    let mut writer = BufWriter::new(file);
    for value in values {
        writer
            .write_all(&value.to_ne_bytes())
            .map_err(|err| SnapshotError::io(path, "write", err))?;
    }

    let file = writer
        .into_inner()
        .map_err(|err| SnapshotError::io(path, "flush", err.into_error()))?;
    file.sync_all()
        .map_err(|err| SnapshotError::io(path, "sync", err))?;

    debug!(path = %path.display(), records = values.len(), "wrote array");
    Ok(())
}
