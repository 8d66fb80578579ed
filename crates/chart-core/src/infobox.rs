// File: crates/chart-core/src/infobox.rs
// Summary: Info box model for the selected sample: values per series, date title and left/right placement.

use std::rc::Rc;

use skia_safe as skia;

use crate::dataset::ChartData;
use crate::date::day_mon_date;
use crate::view::NavigationScope;
use crate::visibility::VisibilityMap;

/// Horizontal anchoring of the box, as a percentage offset from that edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoPlacement {
    Left(i32),
    Right(i32),
}

impl InfoPlacement {
    /// Selections in the left half anchor the box to the left, others to the right,
    /// so the box always opens toward the wider side.
    pub fn for_ratio(ratio: f64) -> Self {
        let pct = (ratio * 100.0).round() as i32;
        if ratio < 0.5 {
            InfoPlacement::Left(pct + 1)
        } else {
            InfoPlacement::Right(101 - pct)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfoEntry {
    pub key: String,
    pub name: String,
    pub color: skia::Color,
    pub value: Option<f64>,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct InfoBox {
    data: Rc<ChartData>,
    visibility: VisibilityMap,
    scope: NavigationScope,
    index: Option<usize>,
    placement: InfoPlacement,
    shown: bool,
}

impl InfoBox {
    pub fn new(data: Rc<ChartData>, visibility: VisibilityMap, scope: NavigationScope) -> Self {
        Self { data, visibility, scope, index: None, placement: InfoPlacement::Left(1), shown: false }
    }

    /// Show values at `index`. Out-of-range indexes are ignored.
    pub fn show(&mut self, index: usize) -> bool {
        if index > self.data.max_index || self.data.length == 0 {
            return false;
        }
        self.index = Some(index);
        self.shown = true;
        true
    }

    pub fn hide(&mut self) {
        self.shown = false;
        self.index = None;
    }

    pub fn move_to(&mut self, ratio: f64) {
        self.placement = InfoPlacement::for_ratio(ratio);
    }

    /// Keep the box next to the selected sample when the window moves.
    pub fn set_navigation_scope(&mut self, scope: &NavigationScope) {
        self.scope = *scope;
        if let Some(index) = self.index {
            let ratio = self.scope.ratio_of_index(index, self.data.max_index);
            self.move_to(ratio);
        }
    }

    pub fn set_visibility_map(&mut self, visibility: VisibilityMap) {
        self.visibility = visibility;
    }

    pub fn is_shown(&self) -> bool { self.shown }
    pub fn index(&self) -> Option<usize> { self.index }
    pub fn placement(&self) -> InfoPlacement { self.placement }

    /// `"Wed, Oct 10"` for the selected sample.
    pub fn date_title(&self) -> Option<String> {
        let index = self.index?;
        self.data.x.get(index).map(|t| day_mon_date(*t))
    }

    pub fn entries(&self) -> Vec<InfoEntry> {
        let Some(index) = self.index else { return Vec::new() };
        self.data
            .lines
            .iter()
            .map(|l| InfoEntry {
                key: l.key.clone(),
                name: l.name.clone(),
                color: l.color,
                value: l.value_at(index),
                visible: self.visibility.is_visible(&l.key),
            })
            .collect()
    }
}
