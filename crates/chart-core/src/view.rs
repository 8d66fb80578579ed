// File: crates/chart-core/src/view.rs
// Summary: Navigation scope: visible window ratios plus full and sliced vertical bounds.

use crate::dataset::ChartData;
use crate::math::{min_max_over_slices, null_safe_max, null_safe_min, MinMax};
use crate::visibility::VisibilityMap;

/// Visible horizontal window (as ratios of the full X range) and the vertical
/// bounds that go with it. `0 <= min_x_ratio < max_x_ratio <= 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationScope {
    pub min_x_ratio: f64,
    pub max_x_ratio: f64,
    /// Bounds of the visible series over the whole X range.
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// Bounds of the visible series inside the window.
    pub min_value_slice: Option<f64>,
    pub max_value_slice: Option<f64>,
}

impl NavigationScope {
    pub fn full(data: &ChartData) -> Self {
        Self {
            min_x_ratio: 0.0,
            max_x_ratio: 1.0,
            min_value: data.min_value,
            max_value: data.max_value,
            min_value_slice: data.min_value,
            max_value_slice: data.max_value,
        }
    }

    /// Scope for a window, with both bound pairs computed for `visibility`.
    pub fn for_window(data: &ChartData, visibility: &VisibilityMap, min_x_ratio: f64, max_x_ratio: f64) -> Self {
        let full = visible_bounds(data, visibility);
        let slice = slice_bounds(data, visibility, min_x_ratio, max_x_ratio);
        Self {
            min_x_ratio,
            max_x_ratio,
            min_value: full.min,
            max_value: full.max,
            min_value_slice: slice.min,
            max_value_slice: slice.max,
        }
    }

    pub fn width_ratio(&self) -> f64 { self.max_x_ratio - self.min_x_ratio }

    /// First and last sample index touched by the window (floor/ceil).
    pub fn visible_index_range(&self, max_index: usize) -> (usize, usize) {
        let m = max_index as f64;
        let begin = (m * self.min_x_ratio).floor().max(0.0) as usize;
        let end = ((m * self.max_x_ratio).ceil().max(0.0) as usize).min(max_index);
        (begin.min(end), end)
    }

    /// Sample index under `ratio` of the window width. May fall outside `0..=max_index`.
    pub fn index_at_ratio(&self, ratio: f64, max_index: usize) -> i64 {
        ((self.width_ratio() * ratio + self.min_x_ratio) * max_index as f64).round() as i64
    }

    /// Position of `index` inside the window, as a ratio of the window width.
    pub fn ratio_of_index(&self, index: usize, max_index: usize) -> f64 {
        let index_ratio = if max_index == 0 { 0.0 } else { index as f64 / max_index as f64 };
        let width = self.width_ratio();
        if width <= 0.0 { return 0.0; }
        (index_ratio - self.min_x_ratio) / width
    }
}

/// Union of the cached whole-series bounds of every visible series.
pub fn visible_bounds(data: &ChartData, visibility: &VisibilityMap) -> MinMax {
    data.lines
        .iter()
        .filter(|l| visibility.is_visible(&l.key))
        .fold(MinMax::EMPTY, |acc, l| MinMax {
            min: null_safe_min(acc.min, l.min_value),
            max: null_safe_max(acc.max, l.max_value),
        })
}

/// Bounds of the visible series restricted to the window, using rounded indexes.
pub fn slice_bounds(data: &ChartData, visibility: &VisibilityMap, min_x_ratio: f64, max_x_ratio: f64) -> MinMax {
    let values: Vec<&[Option<f64>]> = data
        .lines
        .iter()
        .filter(|l| visibility.is_visible(&l.key))
        .map(|l| l.values.as_slice())
        .collect();
    let m = data.max_index as f64;
    let begin = (min_x_ratio * m).round().max(0.0) as usize;
    let end = (max_x_ratio * m).round().max(0.0) as usize;
    min_max_over_slices(&values, begin, end)
}
