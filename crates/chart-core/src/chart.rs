// File: crates/chart-core/src/chart.rs
// Summary: Chart composition: legend, navigation minimap and viewer wired together.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::dataset::ChartData;
use crate::error::ChartError;
use crate::legend::Legend;
use crate::navigation::{Navigation, NavigationOptions};
use crate::theme::Theme;
use crate::viewer::{Viewer, ViewerOptions};

#[derive(Clone, Default)]
pub struct ChartOptions {
    pub viewer: ViewerOptions,
    pub navigation: NavigationOptions,
    /// Start in the night theme.
    pub night: bool,
}

pub struct Chart {
    data: Rc<ChartData>,
    legend: Legend,
    navigation: Navigation,
    viewer: Rc<RefCell<Viewer>>,
    night: bool,
}

impl Chart {
    pub fn new(data: Rc<ChartData>, options: ChartOptions) -> Self {
        let mut options = options;
        if options.night {
            let style = Theme::night().graph;
            options.viewer.graph.style = style;
            options.navigation.graph.style = style;
        }

        let legend = Legend::new(&data);
        let visibility = legend.visibility_map();
        let mut navigation = Navigation::new(data.clone(), visibility.clone(), options.navigation);
        let viewer = Rc::new(RefCell::new(Viewer::new(
            data.clone(),
            visibility,
            navigation.navigation_scope(),
            options.viewer,
        )));

        // The navigation only holds a weak handle, so dropping the chart drops the viewer.
        let weak = Rc::downgrade(&viewer);
        navigation.set_on_scope_change(move |scope| {
            if let Some(viewer) = weak.upgrade() {
                viewer.borrow_mut().set_navigation_scope(*scope);
            }
        });

        Self { data, legend, navigation, viewer, night: options.night }
    }

    /// Create both surfaces and draw their first frames.
    pub fn mount(&mut self) -> Result<(), ChartError> {
        self.navigation.surface_element()?;
        self.viewer.borrow_mut().surface_element()?;
        Ok(())
    }

    /// Flip a series in the legend and propagate the new map. Returns the new flag.
    pub fn toggle_series(&mut self, key: &str) -> Option<bool> {
        let visible = self.legend.toggle(key)?;
        debug!(key, visible, "series toggled");
        self.propagate_visibility();
        Some(visible)
    }

    pub fn set_series_visible(&mut self, key: &str, visible: bool) -> bool {
        let changed = self.legend.set_visible(key, visible);
        if changed {
            self.propagate_visibility();
        }
        changed
    }

    fn propagate_visibility(&mut self) {
        let map = self.legend.visibility_map();
        // Navigation first: its scope callback updates the viewer's bounds.
        self.navigation.set_visibility_map(map.clone());
        self.viewer.borrow_mut().set_visibility_map(map);
    }

    pub fn switch_night_theme(&mut self, enable: bool) {
        self.night = enable;
        let theme = if enable { Theme::night() } else { Theme::day() };
        self.navigation.set_styles(theme.graph);
        self.viewer.borrow_mut().set_styles(theme.graph);
    }

    pub fn is_night(&self) -> bool { self.night }

    /// Advance both surfaces one frame. True while anything is still animating.
    pub fn tick(&mut self) -> bool {
        let navigation = self.navigation.tick();
        let viewer = self.viewer.borrow_mut().tick();
        navigation || viewer
    }

    pub fn data(&self) -> &Rc<ChartData> { &self.data }
    pub fn legend(&self) -> &Legend { &self.legend }
    pub fn navigation(&self) -> &Navigation { &self.navigation }
    pub fn navigation_mut(&mut self) -> &mut Navigation { &mut self.navigation }

    pub fn with_viewer<R>(&self, f: impl FnOnce(&mut Viewer) -> R) -> R {
        f(&mut self.viewer.borrow_mut())
    }

    pub fn viewer_handle(&self) -> Rc<RefCell<Viewer>> { self.viewer.clone() }
}
