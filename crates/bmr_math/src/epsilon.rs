//! Tolerant floating point comparisons.
//!
//! Face corners, depths and texture coordinates all come out of chains of
//! affine maps, so exact comparisons flicker on values that should be equal.

/// Tolerance shared by every comparison in this module.
pub const EPSILON: f64 = 0.000001;

/// `a == b` within [`EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() < EPSILON
}

/// `a > b` by more than [`EPSILON`].
#[inline]
pub fn approx_gt(a: f64, b: f64) -> bool {
    a - b > EPSILON
}

/// `a >= b`, counting near-equal values as equal.
#[inline]
pub fn approx_ge(a: f64, b: f64) -> bool {
    approx_gt(a, b) || approx_eq(a, b)
}

/// `a < b` by more than [`EPSILON`].
#[inline]
pub fn approx_lt(a: f64, b: f64) -> bool {
    b - a > EPSILON
}

/// `a <= b`, counting near-equal values as equal.
#[inline]
pub fn approx_le(a: f64, b: f64) -> bool {
    approx_lt(a, b) || approx_eq(a, b)
}
