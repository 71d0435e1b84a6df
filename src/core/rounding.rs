//! Rounding helpers shared by the rate buffer and the price projections.
//!
//! Both round half away from zero, matching `f64::round`.

/// Rounds `value` to the nearest multiple of `unit`.
pub fn round_to_nearest(value: f64, unit: f64) -> f64 {
    (value / unit).round() * unit
}

/// Rounds `value` to `decimals` decimal places.
pub fn round_to_decimal(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
