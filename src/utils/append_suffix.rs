use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Appends `.suffix` to the full file name of `prefix`.
///
/// Unlike [`Path::with_extension`], nothing in the existing name is replaced,
/// so snapshot prefixes that already contain dots keep them.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use mpiio_snapshot::utils::append_suffix;
///
/// assert_eq!(append_suffix(Path::new("snap"), "pref"), PathBuf::from("snap.pref"));
/// assert_eq!(
///     append_suffix(Path::new("out/run.0042"), "boff"),
///     PathBuf::from("out/run.0042.boff")
/// );
/// ```
pub fn append_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
