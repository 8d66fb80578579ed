// File: crates/chart-core/src/axis.rs
// Summary: X (date) and Y (value) axis label generators with cached, hashable label sets.

use std::rc::Rc;

use crate::dataset::ChartData;
use crate::date::mon_date;
use crate::math::{format_large_number, modulus_for_density, nice_floor, nice_round, plain_number, round_to_step, NICE_DIGITS};
use crate::view::NavigationScope;

/// Gridline or tick: `position` is a value (Y) or a sample index (X).
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    pub position: f64,
    pub title: String,
}

/// Ordered labels tagged with a hash of their positions. Cheap to clone.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabelSet {
    pub labels: Rc<[AxisLabel]>,
    pub hash: Rc<str>,
}

fn join_positions<'a>(positions: impl Iterator<Item = &'a AxisLabel>) -> Rc<str> {
    let parts: Vec<String> = positions.map(|l| plain_number(l.position)).collect();
    Rc::from(parts.join("/"))
}

/// Cached value tagged with the key it was computed for.
#[derive(Clone, Debug, Default)]
pub enum LabelCache<K, V> {
    #[default]
    Stale,
    Fresh { key: K, value: V },
}

impl<K: PartialEq, V> LabelCache<K, V> {
    /// Cached value, if it was computed for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        match self {
            LabelCache::Fresh { key: k, value } if k == key => Some(value),
            _ => None,
        }
    }

    pub fn store(&mut self, key: K, value: V) {
        *self = LabelCache::Fresh { key, value };
    }

    pub fn invalidate(&mut self) { *self = LabelCache::Stale; }

    pub fn is_fresh(&self) -> bool { matches!(self, LabelCache::Fresh { .. }) }
}

pub trait AxisGenerator {
    /// Point the generator at a new window. Cached output survives only if the
    /// range relevant to this axis did not change.
    fn set_visible_range(&mut self, scope: &NavigationScope);

    /// Labels for the current range, `None` when there is nothing to label.
    fn label_set(&mut self) -> Option<AxisLabelSet>;

    fn labels(&mut self) -> Option<Rc<[AxisLabel]>> {
        self.label_set().map(|s| s.labels)
    }

    fn content_hash(&mut self) -> Option<Rc<str>> {
        self.label_set().map(|s| s.hash)
    }
}

type ValueRange = (Option<f64>, Option<f64>);

/// Horizontal gridlines at "nice" values of the sliced range.
#[derive(Clone, Debug)]
pub struct AxisYGenerator {
    count: usize,
    range: ValueRange,
    cache: LabelCache<ValueRange, Option<AxisLabelSet>>,
}

impl AxisYGenerator {
    pub fn new(count: usize) -> Self {
        Self { count: count.max(2), range: (None, None), cache: LabelCache::Stale }
    }

    pub fn count(&self) -> usize { self.count }

    fn compute(&self) -> Option<AxisLabelSet> {
        let (min, max) = match self.range {
            (Some(min), Some(max)) => (min, max),
            _ => return None,
        };
        let top = nice_round(max, NICE_DIGITS);
        let low = nice_floor(min, NICE_DIGITS);
        let mut step = (top - low) / (self.count - 1) as f64;
        let fractional = step.abs() < 1.0;
        if !fractional {
            step = step.round();
        }
        let labels: Vec<AxisLabel> = (0..self.count)
            .map(|i| {
                let mut position = nice_floor(low + i as f64 * step, NICE_DIGITS);
                if fractional {
                    position = round_to_step(position, step);
                }
                AxisLabel { position, title: format_large_number(position) }
            })
            .collect();
        let hash = join_positions(labels.iter());
        tracing::debug!(%hash, "y axis labels");
        Some(AxisLabelSet { labels: labels.into(), hash })
    }
}

impl AxisGenerator for AxisYGenerator {
    fn set_visible_range(&mut self, scope: &NavigationScope) {
        let range = (scope.min_value_slice, scope.max_value_slice);
        if range != self.range {
            self.range = range;
            self.cache.invalidate();
        }
    }

    fn label_set(&mut self) -> Option<AxisLabelSet> {
        if let Some(cached) = self.cache.get(&self.range) {
            return cached.clone();
        }
        let value = self.compute();
        self.cache.store(self.range, value.clone());
        value
    }
}

/// One date title per sample index; which ones are shown is decided by the
/// density [`modulus`](AxisXGenerator::modulus) of the visible window.
#[derive(Clone, Debug)]
pub struct AxisXGenerator {
    labels: Rc<[AxisLabel]>,
    max_index: usize,
    max_visible: f64,
    modulus: usize,
    cache: LabelCache<usize, AxisLabelSet>,
}

impl AxisXGenerator {
    /// `width` is the CSS width of the graph, `text_width` the room one title needs.
    pub fn new(data: &ChartData, width: f64, text_width: f64) -> Self {
        let labels: Rc<[AxisLabel]> = data
            .x
            .iter()
            .enumerate()
            .map(|(i, t)| AxisLabel { position: i as f64, title: mon_date(*t) })
            .collect();
        let max_visible = if text_width > 0.0 { width / text_width } else { 1.0 };
        let max_index = data.max_index;
        Self {
            labels,
            max_index,
            max_visible,
            modulus: modulus_for_density(max_index as f64, max_visible),
            cache: LabelCache::Stale,
        }
    }

    /// Show every `modulus`-th title.
    pub fn modulus(&self) -> usize { self.modulus }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|l| l.title.as_str())
    }
}

impl AxisGenerator for AxisXGenerator {
    fn set_visible_range(&mut self, scope: &NavigationScope) {
        let visible = self.max_index as f64 * scope.width_ratio();
        let modulus = modulus_for_density(visible, self.max_visible);
        if modulus != self.modulus {
            tracing::debug!(from = self.modulus, to = modulus, "x axis density changed");
            self.modulus = modulus;
        }
    }

    fn label_set(&mut self) -> Option<AxisLabelSet> {
        if self.labels.is_empty() {
            return None;
        }
        if let Some(cached) = self.cache.get(&self.modulus) {
            return Some(cached.clone());
        }
        let modulus = self.modulus;
        let hash = join_positions(self.labels.iter().step_by(modulus));
        let set = AxisLabelSet { labels: self.labels.clone(), hash };
        self.cache.store(modulus, set.clone());
        Some(set)
    }
}
