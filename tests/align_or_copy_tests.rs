#[cfg(test)]
mod tests {
    use mpiio_snapshot::utils::align_or_copy;
    use std::borrow::Cow;

    #[test]
    fn test_aligned_i32_zero_copy() {
        let values: Vec<i32> = vec![0, 2, -7];
        let raw: &[u8] = bytemuck::cast_slice(&values);
        let result = align_or_copy::<i32, 4>(raw, i32::from_ne_bytes).unwrap();
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result.as_ref(), &values[..]);
    }

    #[test]
    fn test_aligned_f64_zero_copy() {
        let values: Vec<f64> = vec![0.5, -1.25, 3.0];
        let raw: &[u8] = bytemuck::cast_slice(&values);
        let result = align_or_copy::<f64, 8>(raw, f64::from_ne_bytes).unwrap();
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result.as_ref(), &values[..]);
    }

    #[test]
    fn test_fallback_copy_i32_misaligned() {
        let values: Vec<i32> = vec![0, 0x12345678];
        let raw: &[u8] = bytemuck::cast_slice(&values);
        // Skipping one byte of a 4-aligned buffer leaves a misaligned view.
        let shifted = &raw[1..5];
        let result = align_or_copy::<i32, 4>(shifted, i32::from_ne_bytes).unwrap();
        assert!(matches!(result, Cow::Owned(_)));

        let expected = i32::from_ne_bytes([raw[1], raw[2], raw[3], raw[4]]);
        assert_eq!(result[0], expected);
    }

    #[test]
    fn test_trailing_bytes_are_rejected() {
        let mut raw = 1.0f64.to_ne_bytes().to_vec();
        raw.push(0xFF); // 9 bytes: not a multiple of 8
        assert!(align_or_copy::<f64, 8>(&raw, f64::from_ne_bytes).is_none());
    }

    #[test]
    fn test_empty_buffer_is_empty_array() {
        let result = align_or_copy::<i32, 4>(&[], i32::from_ne_bytes).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_mismatched_width_panics() {
        let raw = [0u8; 8];
        let result = std::panic::catch_unwind(|| align_or_copy::<i32, 8>(&raw, |_| 0));
        assert!(result.is_err(), "Should panic when N differs from the record size");
    }
}
