// File: crates/chart-core/src/geometry.rs
// Summary: Canvas sizing in device pixels (pixel ratio, quality scaling, vertical padding).

use crate::types::MIN_RENDER_QUALITY;

/// Pixel ratio actually used for the backing store: `(dpr - 1) * quality + 1`.
pub fn effective_pixel_ratio(device_pixel_ratio: f64, render_quality_ratio: f64) -> f64 {
    let dpr = if device_pixel_ratio.is_finite() { device_pixel_ratio.max(1.0) } else { 1.0 };
    let quality = clamp(render_quality_ratio, MIN_RENDER_QUALITY, 1.0);
    (dpr - 1.0) * quality + 1.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasGeometry {
    /// CSS size handed in by the host.
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub vertical_padding_ratio: f64,
    /// Device pixels kept free below the baseline (and above the top line).
    pub vertical_padding: f64,
}

impl CanvasGeometry {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, render_quality_ratio: f64, vertical_padding_ratio: f64) -> Self {
        let pixel_ratio = effective_pixel_ratio(device_pixel_ratio, render_quality_ratio);
        let canvas_width = ((width * pixel_ratio).round() as i32).max(1);
        let canvas_height = ((height * pixel_ratio).round() as i32).max(1);
        let vertical_padding_ratio = clamp(vertical_padding_ratio, 0.0, 0.9);
        Self {
            width,
            height,
            pixel_ratio,
            canvas_width,
            canvas_height,
            vertical_padding_ratio,
            vertical_padding: canvas_height as f64 * vertical_padding_ratio / 2.0,
        }
    }

    /// CSS pixels to device pixels.
    #[inline]
    pub fn canvas_value(&self, v: f64) -> f64 { v * self.pixel_ratio }

    /// Device-pixel height available to the lines.
    pub fn plot_height(&self) -> f64 {
        self.canvas_height as f64 * (1.0 - self.vertical_padding_ratio)
    }

    /// Y of the translated origin used while drawing.
    pub fn baseline(&self) -> f64 {
        self.canvas_height as f64 - self.vertical_padding
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
