// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, ratios, durations).

use std::time::Duration;

/// Default surface width in CSS pixels.
pub const WIDTH: f64 = 100.0;
/// Default surface height in CSS pixels.
pub const HEIGHT: f64 = 50.0;

/// Share of the canvas height kept free above and below the lines (split evenly).
pub const VERTICAL_PADDING_RATIO: f64 = 0.2;
/// Default stroke width of a series, in CSS pixels.
pub const LINE_WIDTH: f64 = 1.5;
/// Length of every scale/opacity transition.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(200);

/// Lower bound of the render quality ratio.
pub const MIN_RENDER_QUALITY: f64 = 0.1;

/// Navigation window never shrinks below this fraction of the track.
pub const NAVIGATION_MIN_WINDOW_RATIO: f64 = 0.15;
/// Width of the grab handles at both edges of the navigation window, in CSS pixels.
pub const HANDLE_WIDTH: f64 = 12.0;

/// Viewer line width, in CSS pixels.
pub const VIEWER_LINE_WIDTH: f64 = 2.5;
/// Number of horizontal gridlines in the viewer.
pub const AXIS_Y_COUNT: usize = 6;
/// Horizontal room reserved for one date label, in CSS pixels.
pub const AXIS_X_TEXT_WIDTH: f64 = 80.0;
/// Gap between a gridline and its value label, in CSS pixels.
pub const AXIS_Y_TEXT_OFFSET: f64 = 8.0;
/// Distance from the baseline down to the date labels, in CSS pixels.
pub const AXIS_X_TEXT_TOP: f64 = 18.0;
/// Axis label font size, in CSS pixels.
pub const LABEL_FONT_SIZE: f64 = 16.0;
