// File: crates/chart-core/src/math.rs
// Summary: Stateless numeric helpers for axis bounds, nice tick values and label density.

/// Significant leading digits kept by the `nice_*` helpers.
pub const NICE_DIGITS: u32 = 2;

/// Min/max pair where `None` means "no value seen yet".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MinMax {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl MinMax {
    pub const EMPTY: Self = Self { min: None, max: None };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    pub fn merge(self, other: MinMax) -> Self {
        Self {
            min: null_safe_min(self.min, other.min),
            max: null_safe_max(self.max, other.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() || self.max.is_none()
    }
}

/// Smaller of two optional numbers; `None` never wins against a number.
#[inline]
pub fn null_safe_min(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Larger of two optional numbers; `None` never wins against a number.
#[inline]
pub fn null_safe_max(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Min/max over `values[begin..=end]`. Gaps are skipped, `end` is clamped to the
/// last index, and an empty range yields [`MinMax::EMPTY`].
pub fn min_max_over_slice(values: &[Option<f64>], begin: usize, end: usize) -> MinMax {
    if values.is_empty() { return MinMax::EMPTY; }
    let end = end.min(values.len() - 1);
    if begin > end { return MinMax::EMPTY; }
    values[begin..=end]
        .iter()
        .fold(MinMax::EMPTY, |acc, v| MinMax {
            min: null_safe_min(acc.min, *v),
            max: null_safe_max(acc.max, *v),
        })
}

/// [`min_max_over_slice`] folded across several series.
pub fn min_max_over_slices(series: &[&[Option<f64>]], begin: usize, end: usize) -> MinMax {
    series
        .iter()
        .fold(MinMax::EMPTY, |acc, values| acc.merge(min_max_over_slice(values, begin, end)))
}

// Digit count of the integer part, including the sign.
fn decimal_len(value: f64) -> i32 {
    format!("{}", value as i64).len() as i32
}

/// Round to `digits` significant leading digits; values strictly inside
/// ±10^digits are returned untouched.
pub fn nice_round(value: f64, digits: u32) -> f64 {
    let limit = 10f64.powi(digits as i32);
    if value > -limit && value < limit { return value; }
    let power = 10f64.powi(decimal_len(value.round()) - digits as i32);
    (value / power).round() * power
}

/// Floor variant of [`nice_round`]; values inside the closed ±10^digits band are untouched.
pub fn nice_floor(value: f64, digits: u32) -> f64 {
    let limit = 10f64.powi(digits as i32);
    if value >= -limit && value <= limit { return value; }
    let power = 10f64.powi(decimal_len(value.floor()) - digits as i32);
    (value / power).floor() * power
}

/// Ceil variant of [`nice_round`]; values inside the closed ±10^digits band are untouched.
pub fn nice_ceil(value: f64, digits: u32) -> f64 {
    let limit = 10f64.powi(digits as i32);
    if value >= -limit && value <= limit { return value; }
    let power = 10f64.powi(decimal_len(value.ceil()) - digits as i32);
    (value / power).ceil() * power
}

/// Drop binary noise from `value`, keeping `NICE_DIGITS` more decimals than
/// `step` needs. A zero step leaves the value as is.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if step == 0.0 || !step.is_finite() { return value; }
    let decimals = ((-step.abs().log10()).ceil() as i32 + NICE_DIGITS as i32).clamp(0, 15);
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Plain decimal rendering: integers without a fraction, everything else via `Display`.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Compact label for round numbers: `3240000` → `"3.24 m"`, `120000` → `"120 k"`.
///
/// This is an approximation for gridline titles, not a general formatter: only
/// values ending in a run of zeros are shortened, everything else is printed as is.
pub fn format_large_number(value: f64) -> String {
    let plain = plain_number(value);
    if plain.len() > 6 && plain.ends_with("0000") {
        return format!("{} m", plain_number(value / 1_000_000.0));
    }
    if plain.len() > 4 && plain.ends_with("000") {
        return format!("{} k", plain_number(value / 1_000.0));
    }
    plain
}

/// Smallest power-of-two stride `m` with `item_count / m <= max_visible`.
pub fn modulus_for_density(item_count: f64, max_visible: f64) -> usize {
    let max_visible = max_visible.max(1.0);
    let mut modulus = 1usize;
    while item_count / modulus as f64 > max_visible && modulus < (1 << 30) {
        modulus *= 2;
    }
    modulus
}

/// Linear interpolation that lands exactly on `to` once `t` reaches 1.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    if t >= 1.0 { to } else { from + (to - from) * t }
}
