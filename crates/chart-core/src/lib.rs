// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the public API for time-series line charts.

pub mod types;
pub mod error;
pub mod math;
pub mod date;
pub mod series;
pub mod dataset;
pub mod visibility;
pub mod view;
pub mod scale;
pub mod geometry;
pub mod axis;
pub mod animation;
pub mod theme;
pub mod text;
pub mod pipeline;
pub mod graph;
pub mod crosshair;
pub mod input;
pub mod navigation;
pub mod infobox;
pub mod viewer;
pub mod legend;
pub mod chart;

pub use error::{ChartError, DataError};
pub use math::MinMax;
pub use series::Series;
pub use dataset::{charts_from_json_str, prepare_chart_data, ChartData, RawChartData};
pub use visibility::VisibilityMap;
pub use view::NavigationScope;
pub use scale::{GraphScope, HorizontalWindow};
pub use geometry::CanvasGeometry;
pub use axis::{AxisGenerator, AxisLabel, AxisLabelSet, AxisXGenerator, AxisYGenerator, LabelCache};
pub use animation::{Animation, Clock, Easing, ManualClock, Progress, SystemClock};
pub use theme::{GraphStyle, Theme};
pub use text::TextShaper;
pub use pipeline::{DrawPipeline, Frame, LineState, NavigationLine, PlainLine};
pub use graph::{line_segments, Graph, GraphOptions, GraphState};
pub use crosshair::{CrosshairLine, CrosshairOptions};
pub use input::Pointer;
pub use navigation::{DragHandle, Navigation, NavigationOptions, TrackState};
pub use infobox::{InfoBox, InfoEntry, InfoPlacement};
pub use viewer::{Viewer, ViewerOptions};
pub use legend::Legend;
pub use chart::{Chart, ChartOptions};
