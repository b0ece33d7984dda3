//! Power-of-two snapping shared by the resolvers.

/// Largest power of two strictly below `x`; 1 for `x <= 2`.
pub fn pow2_below(x: usize) -> usize {
    if x <= 2 {
        return 1;
    }
    1 << (usize::BITS - 1 - (x - 1).leading_zeros())
}

/// `x` itself when it is a power of two (or 0), otherwise the power of two below it.
pub fn floor_pow2(x: usize) -> usize {
    if x == 0 || x.is_power_of_two() { x } else { pow2_below(x) }
}

/// Snap `value` to a power of two unless it equals `exempt`, a shape the code
/// generator handles as a whole.
pub fn snap_pow2_unless(value: usize, exempt: usize) -> usize {
    if value == exempt { value } else { floor_pow2(value) }
}
