//! Currency-granularity float helpers.
//!
//! Amounts and percentages are plain `f64`. Every comparison against zero or
//! 100 goes through [`TOLERANCE`], which matches cent granularity.

/// Fixed epsilon for "close enough to zero / to 100".
pub const TOLERANCE: f64 = 0.01;

/// `|a - b| < TOLERANCE`.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Round to two decimal places (cents).
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
