/// Byte width of the `i32` records in `.pref`, `.id`, `.type`, `.boff` and `.bond`.
pub const I32_WIDTH: usize = 4;

/// Byte width of the `f64` records in `.pos` and `.vel`.
pub const F64_WIDTH: usize = 8;

/// Components per particle in `.pos` and `.vel`.
pub const VECTOR_COMPONENTS: usize = 3;

/// Fixed part of `.head`: the `u32` field mask and the `i32` type count.
pub const HEADER_FIXED_LEN: usize = 2 * I32_WIDTH;
