// File: crates/chart-core/src/pipeline.rs
// Summary: Draw pipeline strategies plugged into a Graph (plain line, navigation minimap).

use std::collections::BTreeMap;

use skia_safe as skia;

use crate::dataset::ChartData;
use crate::geometry::CanvasGeometry;
use crate::scale::{GraphScope, HorizontalWindow};
use crate::theme::GraphStyle;
use crate::view::NavigationScope;
use crate::visibility::VisibilityMap;

/// Interpolated visual state of one series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineState {
    pub scope: GraphScope,
    pub opacity: f64,
}

/// Everything a pipeline may read while drawing one frame. The canvas is
/// already translated so that y = 0 is the baseline.
pub struct Frame<'a> {
    pub canvas: &'a skia::Canvas,
    pub data: &'a ChartData,
    pub visibility: &'a VisibilityMap,
    pub scope: &'a NavigationScope,
    pub geometry: &'a CanvasGeometry,
    pub window: HorizontalWindow,
    pub style: &'a GraphStyle,
    pub lines: &'a BTreeMap<String, LineState>,
    /// Series stroke width in device pixels.
    pub line_width: f64,
}

/// Strategy deciding how a [`crate::Graph`] scales its lines and what it draws
/// around them. Every hook has a default matching a plain line chart.
pub trait DrawPipeline {
    /// Vertical scope the lines animate toward.
    fn target_scope(&self, scope: &NavigationScope, geometry: &CanvasGeometry) -> GraphScope {
        GraphScope::from_bounds(scope.min_value_slice, scope.max_value_slice, geometry.plot_height())
    }

    /// Horizontal mapping for the current frame.
    fn window(&self, scope: &NavigationScope, max_index: usize, geometry: &CanvasGeometry) -> HorizontalWindow {
        HorizontalWindow::for_ratios(scope.min_x_ratio, scope.max_x_ratio, max_index, geometry.canvas_width as f64)
    }

    /// Scope of one line at eased progress `t`. `non_empty` is false when every
    /// series is hidden, in which case the scale stays where it was.
    fn blend_line(&self, prev: &LineState, target: &GraphScope, _visible: bool, non_empty: bool, t: f64) -> GraphScope {
        if non_empty { prev.scope.lerp(target, t) } else { prev.scope }
    }

    /// Called once from `Graph::new`.
    fn attach(&mut self, _scope: &NavigationScope, _target: &GraphScope) {}

    /// Called when the navigation scope actually changed, before `prev` is snapshotted.
    fn scope_changed(&mut self, _scope: &NavigationScope, _target: &GraphScope) {}

    fn transition_started(&mut self) {}

    fn transition_step(&mut self, _target: &GraphScope, _non_empty: bool, _t: f64) {}

    /// Runs when a transition completes or is cancelled by a newer one.
    fn transition_finished(&mut self) {}

    fn draw_under(&self, _frame: &Frame) {}

    fn draw_over(&self, _frame: &Frame) {}
}

/// Lines only, scaled to the visible slice.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainLine;

impl DrawPipeline for PlainLine {}

/// Minimap: whole X range and unsliced bounds. Hidden lines keep their scale
/// while fading out, a line coming back from fully hidden jumps straight to
/// the target scale.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigationLine;

impl DrawPipeline for NavigationLine {
    fn target_scope(&self, scope: &NavigationScope, geometry: &CanvasGeometry) -> GraphScope {
        GraphScope::from_bounds(scope.min_value, scope.max_value, geometry.plot_height())
    }

    fn window(&self, _scope: &NavigationScope, max_index: usize, geometry: &CanvasGeometry) -> HorizontalWindow {
        HorizontalWindow::full(max_index, geometry.canvas_width as f64)
    }

    fn blend_line(&self, prev: &LineState, target: &GraphScope, visible: bool, _non_empty: bool, t: f64) -> GraphScope {
        match (visible, prev.opacity > 0.0) {
            (true, true) => prev.scope.lerp(target, t),
            (true, false) => *target,
            (false, _) => prev.scope,
        }
    }
}
