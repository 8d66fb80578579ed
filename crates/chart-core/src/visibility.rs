// File: crates/chart-core/src/visibility.rs
// Summary: Per-series shown/hidden flags keyed by series key.

use std::collections::BTreeMap;

use crate::dataset::ChartData;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityMap(BTreeMap<String, bool>);

impl VisibilityMap {
    pub fn all_visible(data: &ChartData) -> Self {
        Self(data.lines.iter().map(|l| (l.key.clone(), true)).collect())
    }

    /// Unknown keys are hidden.
    pub fn is_visible(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    /// True when no series is visible.
    pub fn is_empty(&self) -> bool {
        !self.0.values().any(|v| *v)
    }

    pub fn with(mut self, key: impl Into<String>, visible: bool) -> Self {
        self.0.insert(key.into(), visible);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, visible: bool) {
        self.0.insert(key.into(), visible);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, bool)> for VisibilityMap {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
