//! Integer division helpers for the clock and timing arithmetic
//!
//! The controller has no floating point available, so every D-PHY
//! interval is computed with explicit integer rounding rules. These
//! helpers name the rules once so call sites read like the timing
//! tables they implement.

/// Ceiling division: smallest integer >= a / b
///
/// `b` must be non-zero.
pub fn ceil_div(a: u32, b: u32) -> u32 {
    (a + b - 1) / b
}

/// Round-to-nearest division, halves rounding up
///
/// `b` must be non-zero.
pub fn round_div(a: u32, b: u32) -> u32 {
    (a + b / 2) / b
}

/// Ceiling division over signed operands with a positive divisor
///
/// Used where a timing margin term can drive the numerator negative
/// before the final clamp to zero.
pub(crate) fn ceil_div_i32(a: i32, b: i32) -> i32 {
    debug_assert!(b > 0);
    (a + b - 1).div_euclid(b)
}

/// Round `value` up to the next multiple of `step`
///
/// Returns `value` unchanged when it is already a multiple.
pub fn round_up_to_multiple(value: u32, step: u32) -> u32 {
    if value % step != 0 {
        (value / step + 1) * step
    } else {
        value
    }
}
