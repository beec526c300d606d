//! Floating point helpers shared by the geometry and serialization stages

use num_traits::Float;

/// Tolerance used when comparing lengths along a family axis
pub const LENGTH_EPSILON: f64 = 1e-6;

/// Distance between two values on a circle of the given period
///
/// Both inputs may lie anywhere on the real line; the result is in `[0, period / 2]`.
pub fn circular_distance<T: Float>(a: T, b: T, period: T) -> T {
    let diff = (a - b).abs() % period;
    diff.min(period - diff)
}

/// Wrap a value into `[0, period)`
pub fn wrap<T: Float>(value: T, period: T) -> T {
    let wrapped = value % period;
    let wrapped = if wrapped < T::zero() {
        wrapped + period
    } else {
        wrapped
    };
    // `-tiny % p + p` can round up to exactly `p`
    if wrapped >= period {
        T::zero()
    } else {
        wrapped
    }
}

/// Round to a fixed number of decimals, mapping negative zero to positive zero
///
/// Values that would print as `-0.000…` at the requested precision come back as `0.0`.
pub fn round_to_precision<T: Float>(value: T, decimals: usize) -> T {
    let Some(factor) = T::from(10.0_f64.powi(decimals as i32)) else {
        return value;
    };
    let rounded = (value * factor).round() / factor;
    if rounded == T::zero() {
        T::zero()
    } else {
        rounded
    }
}

/// Format a value as fixed-point decimal text without scientific notation
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let rounded = round_to_precision(value, decimals);
    format!("{rounded:.decimals$}")
}

/// Approximate equality with an absolute tolerance
pub fn approx_eq<T: Float>(a: T, b: T, tolerance: T) -> bool {
    (a - b).abs() <= tolerance
}
