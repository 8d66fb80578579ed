// File: crates/chart-core/src/legend.rs
// Summary: Legend model: per-series visibility flags with a single change observer.

use crate::dataset::ChartData;
use crate::visibility::VisibilityMap;

type VisibilityListener = Box<dyn FnMut(&VisibilityMap)>;

pub struct Legend {
    visibility: VisibilityMap,
    on_change: Option<VisibilityListener>,
}

impl Legend {
    /// Every series starts visible.
    pub fn new(data: &ChartData) -> Self {
        Self { visibility: VisibilityMap::all_visible(data), on_change: None }
    }

    pub fn visibility_map(&self) -> VisibilityMap {
        self.visibility.clone()
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visibility.is_visible(key)
    }

    /// Flip one series. Returns the new flag, `None` for unknown keys.
    pub fn toggle(&mut self, key: &str) -> Option<bool> {
        let known = self.visibility.iter().any(|(k, _)| k == key);
        if !known {
            return None;
        }
        let visible = !self.visibility.is_visible(key);
        self.apply(key, visible);
        Some(visible)
    }

    /// Returns false when the key is unknown or the flag already had that value.
    pub fn set_visible(&mut self, key: &str, visible: bool) -> bool {
        match self.visibility.iter().find(|(k, _)| *k == key) {
            Some((_, current)) if current != visible => {
                self.apply(key, visible);
                true
            }
            _ => false,
        }
    }

    fn apply(&mut self, key: &str, visible: bool) {
        self.visibility.set(key, visible);
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.visibility);
        }
    }

    pub fn set_on_visibility_change(&mut self, listener: impl FnMut(&VisibilityMap) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    pub fn clear_on_visibility_change(&mut self) {
        self.on_change = None;
    }
}
