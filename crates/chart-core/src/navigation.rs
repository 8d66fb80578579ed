// File: crates/chart-core/src/navigation.rs
// Summary: Navigation (scrub) controller: drag handles over a minimap that drive the visible window.

use std::rc::Rc;

use tracing::debug;

use crate::dataset::ChartData;
use crate::error::ChartError;
use crate::geometry::clamp;
use crate::graph::{Graph, GraphOptions};
use crate::input::Pointer;
use crate::pipeline::NavigationLine;
use crate::theme::GraphStyle;
use crate::types::{HANDLE_WIDTH, NAVIGATION_MIN_WINDOW_RATIO};
use crate::view::{slice_bounds, visible_bounds, NavigationScope};
use crate::visibility::VisibilityMap;

#[derive(Clone)]
pub struct NavigationOptions {
    /// Minimap surface options; `graph.width` is also the track width.
    pub graph: GraphOptions,
    /// Keep the real slice minimum instead of pinning it to 0.
    pub trim_zero: bool,
    pub min_window_ratio: f64,
    pub handle_width: f64,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            graph: GraphOptions::default(),
            trim_zero: false,
            min_window_ratio: NAVIGATION_MIN_WINDOW_RATIO,
            handle_width: HANDLE_WIDTH,
        }
    }
}

/// Window over the track, as pixel offsets from each edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackState {
    pub left: f64,
    pub right: f64,
    pub width: f64,
    pub min_width: f64,
}

impl TrackState {
    pub fn min_x_ratio(&self) -> f64 { self.left / self.width }
    pub fn max_x_ratio(&self) -> f64 { (self.width - self.right) / self.width }
    /// Width of the visible window in pixels.
    pub fn window_width(&self) -> f64 { self.width - self.left - self.right }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragHandle {
    Left,
    Right,
    /// Moves the whole window, keeping its width.
    Body,
}

#[derive(Clone, Copy, Debug)]
struct DragState {
    handle: DragHandle,
    start: TrackState,
    start_x: f64,
}

type ScopeListener = Box<dyn FnMut(&NavigationScope)>;

pub struct Navigation {
    data: Rc<ChartData>,
    visibility: VisibilityMap,
    scope: NavigationScope,
    track: TrackState,
    drag: Option<DragState>,
    trim_zero: bool,
    handle_width: f64,
    on_scope_change: Option<ScopeListener>,
    graph: Graph<NavigationLine>,
}

impl Navigation {
    pub fn new(data: Rc<ChartData>, visibility: VisibilityMap, options: NavigationOptions) -> Self {
        let width = options.graph.width.max(1.0);
        let track = TrackState {
            left: 0.0,
            right: 0.0,
            width,
            min_width: (width * clamp(options.min_window_ratio, 0.0, 1.0)).round(),
        };
        let scope = NavigationScope::for_window(&data, &visibility, 0.0, 1.0);
        let exposed = expose(scope, options.trim_zero);
        let graph = Graph::new(data.clone(), visibility.clone(), exposed, options.graph, NavigationLine);
        Self {
            data,
            visibility,
            scope,
            track,
            drag: None,
            trim_zero: options.trim_zero,
            handle_width: options.handle_width,
            on_scope_change: None,
            graph,
        }
    }

    /// Scope handed to listeners and views.
    pub fn navigation_scope(&self) -> NavigationScope {
        expose(self.scope, self.trim_zero)
    }

    pub fn track(&self) -> &TrackState { &self.track }

    pub fn set_on_scope_change(&mut self, listener: impl FnMut(&NavigationScope) + 'static) {
        self.on_scope_change = Some(Box::new(listener));
    }

    pub fn clear_on_scope_change(&mut self) {
        self.on_scope_change = None;
    }

    /// Which part of the window sits under `x` (CSS pixels over the track).
    pub fn hit_test(&self, x: f64) -> Option<DragHandle> {
        let left = self.track.left;
        let right = self.track.width - self.track.right;
        if x < left || x > right {
            return None;
        }
        if x <= left + self.handle_width {
            Some(DragHandle::Left)
        } else if x >= right - self.handle_width {
            Some(DragHandle::Right)
        } else {
            Some(DragHandle::Body)
        }
    }

    /// Start dragging `handle`. Multi-touch is ignored.
    pub fn pointer_down(&mut self, handle: DragHandle, pointer: Pointer) -> bool {
        let Some(x) = pointer.single_x() else { return false };
        self.drag = Some(DragState { handle, start: self.track, start_x: x });
        true
    }

    /// Returns true when the move changed the window.
    pub fn pointer_move(&mut self, pointer: Pointer) -> bool {
        let Some(drag) = self.drag else { return false };
        let Some(x) = pointer.single_x() else { return false };
        let shift = (x - drag.start_x).round();
        let s = drag.start;
        let mut track = self.track;
        match drag.handle {
            DragHandle::Left => {
                track.left = (s.left + shift).max(0.0).min(s.width - s.right - s.min_width);
            }
            DragHandle::Right => {
                track.right = (s.right - shift).max(0.0).min(s.width - s.left - s.min_width);
            }
            DragHandle::Body => {
                let window = s.window_width();
                track.left = (s.left + shift).max(0.0).min(s.width - window);
                track.right = s.width - track.left - window;
            }
        }
        if track == self.track {
            return false;
        }
        self.track = track;
        self.update_horizontal()
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool { self.drag.is_some() }

    /// Programmatic drag: move the window to the given ratios, honoring the
    /// minimum width and track bounds.
    pub fn set_window(&mut self, min_x_ratio: f64, max_x_ratio: f64) -> bool {
        let width = self.track.width;
        let left = (clamp(min_x_ratio, 0.0, 1.0) * width).round();
        let right = ((1.0 - clamp(max_x_ratio, 0.0, 1.0)) * width).round();
        let mut track = self.track;
        track.left = left.min(width - track.min_width).max(0.0);
        track.right = right.min(width - track.left - track.min_width).max(0.0);
        if track == self.track {
            return false;
        }
        self.track = track;
        self.update_horizontal()
    }

    fn update_horizontal(&mut self) -> bool {
        let min_x_ratio = self.track.min_x_ratio();
        let max_x_ratio = self.track.max_x_ratio();
        if min_x_ratio == self.scope.min_x_ratio && max_x_ratio == self.scope.max_x_ratio {
            return false;
        }
        self.scope.min_x_ratio = min_x_ratio;
        self.scope.max_x_ratio = max_x_ratio;
        self.update_slice();
        debug!(min_x_ratio, max_x_ratio, "navigation window moved");
        self.notify();
        true
    }

    fn update_slice(&mut self) {
        let slice = slice_bounds(&self.data, &self.visibility, self.scope.min_x_ratio, self.scope.max_x_ratio);
        self.scope.min_value_slice = slice.min;
        self.scope.max_value_slice = slice.max;
    }

    fn notify(&mut self) {
        let scope = self.navigation_scope();
        if let Some(listener) = self.on_scope_change.as_mut() {
            listener(&scope);
        }
    }

    /// Recompute both bound pairs for the new visibility and update the minimap.
    pub fn set_visibility_map(&mut self, visibility: VisibilityMap) {
        self.visibility = visibility;
        let before = self.scope;
        let full = visible_bounds(&self.data, &self.visibility);
        self.scope.min_value = full.min;
        self.scope.max_value = full.max;
        self.update_slice();
        if self.scope != before {
            self.notify();
        }
        self.graph.set_navigation_scope(self.navigation_scope());
        self.graph.set_visibility_map(self.visibility.clone());
    }

    pub fn visibility(&self) -> &VisibilityMap { &self.visibility }

    pub fn set_styles(&mut self, style: GraphStyle) {
        self.graph.set_styles(style);
    }

    pub fn surface_element(&mut self) -> Result<&mut skia_safe::Surface, ChartError> {
        self.graph.surface_element()
    }

    pub fn tick(&mut self) -> bool { self.graph.tick() }

    pub fn graph(&self) -> &Graph<NavigationLine> { &self.graph }
    pub fn graph_mut(&mut self) -> &mut Graph<NavigationLine> { &mut self.graph }
}

fn expose(scope: NavigationScope, trim_zero: bool) -> NavigationScope {
    if trim_zero {
        scope
    } else {
        NavigationScope { min_value_slice: Some(0.0), ..scope }
    }
}
