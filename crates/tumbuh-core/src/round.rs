//! Rounding rules used by the calculators.

/// Round to one decimal place (dose totals, BMI).
pub fn to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to the nearest whole unit (fluid volumes in ml).
pub fn to_whole(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
