// File: crates/chart-core/src/scale.rs
// Summary: Vertical (value) scope and horizontal window transforms from data to canvas pixels.

use crate::math::lerp;

/// Vertical mapping for one series or gridline layer. Interpolated while animating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphScope {
    pub min_value: f64,
    pub max_value: f64,
    /// Canvas pixels per value unit.
    pub scale_y: f64,
}

impl GraphScope {
    /// Scope that fits `[min, max]` into `plot_height` pixels. Absent bounds fall
    /// back to 0 and a zero or non-finite range is treated as 1.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>, plot_height: f64) -> Self {
        let min_value = min.or(max).unwrap_or(0.0);
        let max_value = max.unwrap_or(min_value);
        let range = max_value - min_value;
        let range = if range == 0.0 || !range.is_finite() { 1.0 } else { range };
        Self { min_value, max_value, scale_y: plot_height / range }
    }

    pub fn lerp(&self, to: &GraphScope, t: f64) -> Self {
        Self {
            min_value: lerp(self.min_value, to.min_value, t),
            max_value: lerp(self.max_value, to.max_value, t),
            scale_y: lerp(self.scale_y, to.scale_y, t),
        }
    }

    /// Y offset from the baseline (negative is up).
    #[inline]
    pub fn y(&self, value: f64) -> f64 {
        -(value - self.min_value) * self.scale_y
    }
}

/// Horizontal mapping for the visible window. Recomputed instantly, never animated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalWindow {
    pub scale_x: f64,
    pub shift_x: f64,
    /// First sample index to draw.
    pub begin: usize,
    /// Last sample index to draw (inclusive).
    pub end: usize,
}

impl HorizontalWindow {
    pub fn for_ratios(min_x_ratio: f64, max_x_ratio: f64, max_index: usize, canvas_width: f64) -> Self {
        let width_ratio = max_x_ratio - min_x_ratio;
        let width_ratio = if width_ratio > 0.0 { width_ratio } else { 1.0 };
        let span = max_index.max(1) as f64;
        let m = max_index as f64;
        let end = ((m * max_x_ratio).ceil().max(0.0) as usize).min(max_index);
        let begin = ((m * min_x_ratio).floor().max(0.0) as usize).min(end);
        Self {
            scale_x: canvas_width / width_ratio / span,
            shift_x: canvas_width / width_ratio * min_x_ratio,
            begin,
            end,
        }
    }

    /// The whole X range.
    pub fn full(max_index: usize, canvas_width: f64) -> Self {
        Self::for_ratios(0.0, 1.0, max_index, canvas_width)
    }

    #[inline]
    pub fn x(&self, index: usize) -> f64 {
        index as f64 * self.scale_x - self.shift_x
    }
}
