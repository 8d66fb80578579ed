// File: crates/chart-core/src/series.rs
// Summary: Immutable line series (key, display name, color, samples with gaps).

use skia_safe as skia;

use crate::math::{min_max_over_slice, MinMax};

/// One line of the chart. `values` is aligned by index to the shared X axis;
/// `None` marks a gap that breaks the rendered path.
#[derive(Clone, Debug)]
pub struct Series {
    pub key: String,
    pub name: String,
    pub color: skia::Color,
    pub values: Vec<Option<f64>>,
    /// Minimum over the whole series, `None` when every sample is a gap.
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl Series {
    pub fn new(key: impl Into<String>, name: impl Into<String>, color: skia::Color, values: Vec<Option<f64>>) -> Self {
        let MinMax { min, max } = min_max_over_slice(&values, 0, values.len().saturating_sub(1));
        Self { key: key.into(), name: name.into(), color, values, min_value: min, max_value: max }
    }

    /// Series without gaps.
    pub fn from_values(key: impl Into<String>, name: impl Into<String>, color: skia::Color, values: &[f64]) -> Self {
        Self::new(key, name, color, values.iter().copied().map(Some).collect())
    }

    #[inline]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}
