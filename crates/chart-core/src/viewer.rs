// File: crates/chart-core/src/viewer.rs
// Summary: Interactive viewer: crosshair graph plus info box, driven by pointer input.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::crosshair::{CrosshairLine, CrosshairOptions};
use crate::dataset::ChartData;
use crate::error::ChartError;
use crate::graph::{Graph, GraphOptions, GraphState};
use crate::infobox::InfoBox;
use crate::input::Pointer;
use crate::theme::{GraphStyle, Theme};
use crate::types::VIEWER_LINE_WIDTH;
use crate::view::NavigationScope;
use crate::visibility::VisibilityMap;

#[derive(Clone)]
pub struct ViewerOptions {
    pub graph: GraphOptions,
    /// `crosshair.width` is overridden with `graph.width`.
    pub crosshair: CrosshairOptions,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            graph: GraphOptions { line_width: VIEWER_LINE_WIDTH, ..GraphOptions::default() },
            crosshair: CrosshairOptions::default(),
        }
    }
}

pub struct Viewer {
    graph: Graph<CrosshairLine>,
    info: InfoBox,
    mouse_down: bool,
}

impl Viewer {
    pub fn new(data: Rc<ChartData>, visibility: VisibilityMap, scope: NavigationScope, options: ViewerOptions) -> Self {
        let crosshair = CrosshairOptions { width: options.graph.width, ..options.crosshair };
        let pipeline = CrosshairLine::new(&data, crosshair);
        let info = InfoBox::new(data.clone(), visibility.clone(), scope);
        let graph = Graph::new(data, visibility, scope, options.graph, pipeline);
        Self { graph, info, mouse_down: false }
    }

    pub fn surface_element(&mut self) -> Result<&mut skia_safe::Surface, ChartError> {
        self.graph.surface_element()
    }

    pub fn set_navigation_scope(&mut self, scope: NavigationScope) {
        self.info.set_navigation_scope(&scope);
        self.graph.set_navigation_scope(scope);
    }

    pub fn set_visibility_map(&mut self, visibility: VisibilityMap) {
        self.info.set_visibility_map(visibility.clone());
        self.graph.set_visibility_map(visibility);
    }

    /// Select the sample under `ratio` of the graph width and open the info box.
    /// Returns the selected index; indexes outside the data are ignored.
    pub fn select_at_ratio(&mut self, ratio: f64) -> Option<usize> {
        if self.graph.state() == GraphState::Destroyed {
            warn!("select on a destroyed viewer");
            return None;
        }
        let data = self.graph.data().clone();
        let index = self.graph.navigation_scope().index_at_ratio(ratio, data.max_index);
        if index < 0 || index as usize > data.max_index || data.length == 0 {
            return None;
        }
        let index = index as usize;
        if self.graph.pipeline().selected_index() == Some(index) {
            return Some(index);
        }
        self.graph.pipeline_mut().select(Some(index));
        self.graph.redraw();
        self.info.show(index);
        self.info.move_to(ratio);
        debug!(index, "selected sample");
        Some(index)
    }

    /// Close the info box and remove the crosshair.
    pub fn deselect(&mut self) {
        if self.graph.pipeline().selected_index().is_none() && !self.info.is_shown() {
            return;
        }
        self.graph.pipeline_mut().select(None);
        self.info.hide();
        self.graph.redraw();
    }

    fn ratio(&self, x: f64) -> f64 {
        x / self.graph.geometry().width.max(1.0)
    }

    /// Mouse selects on press, touch on any single-finger contact.
    pub fn pointer_down(&mut self, pointer: Pointer) -> Option<usize> {
        let x = pointer.single_x()?;
        if !pointer.is_touch() {
            self.mouse_down = true;
        }
        self.select_at_ratio(self.ratio(x))
    }

    /// Mouse selects only while held; touch selects on every single-finger move.
    pub fn pointer_move(&mut self, pointer: Pointer) -> Option<usize> {
        if !pointer.is_touch() && !self.mouse_down {
            return None;
        }
        let x = pointer.single_x()?;
        self.select_at_ratio(self.ratio(x))
    }

    pub fn pointer_up(&mut self) {
        self.mouse_down = false;
    }

    pub fn switch_night_theme(&mut self, enable: bool) {
        let theme = if enable { Theme::night() } else { Theme::day() };
        self.set_styles(theme.graph);
    }

    pub fn set_styles(&mut self, style: GraphStyle) {
        self.graph.set_styles(style);
    }

    pub fn tick(&mut self) -> bool { self.graph.tick() }

    pub fn selected_index(&self) -> Option<usize> { self.graph.pipeline().selected_index() }
    pub fn info_box(&self) -> &InfoBox { &self.info }
    pub fn graph(&self) -> &Graph<CrosshairLine> { &self.graph }
    pub fn graph_mut(&mut self) -> &mut Graph<CrosshairLine> { &mut self.graph }
}
