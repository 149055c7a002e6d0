use std::{borrow::Cow, mem};

/// Reinterprets a byte buffer as a slice of fixed-width records, copying only
/// when the buffer cannot be borrowed in place.
///
/// Snapshot arrays are written in the writer's native byte order with no
/// framing, so a memory-mapped file can usually be viewed as `&[i32]` or
/// `&[f64]` directly. When the mapping is not aligned for `T` the records are
/// decoded one by one with `from_ne_bytes` into an owned vector.
///
/// # Type Parameters
/// - `T`: Record type (`i32`, `u32`, `f64`, ...)
/// - `N`: Byte width of one record, must equal `size_of::<T>()`
///
/// # Returns
/// - `Some(Cow::Borrowed)` when the buffer is aligned for `T`
/// - `Some(Cow::Owned)` when records had to be decoded
/// - `None` when `bytes.len()` is not a multiple of `N`
///
/// # Panics
/// - If `mem::size_of::<T>() != N`
///
/// # Example
/// ```rust
/// use mpiio_snapshot::utils::align_or_copy;
///
/// let raw = 7i32.to_ne_bytes();
/// let values = align_or_copy::<i32, 4>(&raw, i32::from_ne_bytes).unwrap();
/// assert_eq!(values[0], 7);
///
/// assert!(align_or_copy::<i32, 4>(&raw[..3], i32::from_ne_bytes).is_none());
/// ```
pub fn align_or_copy<T, const N: usize>(
    bytes: &[u8],
    from_ne_bytes: fn([u8; N]) -> T,
) -> Option<Cow<'_, [T]>>
where
    T: Copy,
{
    assert_eq!(mem::size_of::<T>(), N, "Mismatched size for record type");

    if bytes.len() % N != 0 {
        return None;
    }

    // SAFETY: the aligned middle is only used when both the prefix and the
    // suffix are empty, i.e. the start is aligned for `T` and the length is a
    // whole number of records. `T` is a plain numeric record for all callers.
    let (prefix, aligned, suffix) = unsafe { bytes.align_to::<T>() };
    if prefix.is_empty() && suffix.is_empty() {
        return Some(Cow::Borrowed(aligned));
    }

    Some(Cow::Owned(
        bytes
            .chunks_exact(N)
            .map(|chunk| {
                let mut record = [0u8; N];
                record.copy_from_slice(chunk);
                from_ne_bytes(record)
            })
            .collect(),
    ))
}
