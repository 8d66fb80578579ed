// File: crates/chart-core/src/theme.rs
// Summary: Day/Night theming for graph colors, plus color parsing and blending.

use skia_safe as skia;

use crate::math::lerp;

/// Colors a graph surface draws with. Swapped through `set_styles`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphStyle {
    /// Horizontal gridlines and the crosshair guide.
    pub line_fill_color: skia::Color,
    /// Value labels.
    pub axis_y_color: skia::Color,
    /// Date labels.
    pub axis_x_color: skia::Color,
    /// Clear color, also used to fill the selection markers.
    pub background_color: skia::Color,
}

impl GraphStyle {
    pub fn lerp(&self, to: &GraphStyle, t: f64) -> Self {
        Self {
            line_fill_color: lerp_color(self.line_fill_color, to.line_fill_color, t),
            axis_y_color: lerp_color(self.axis_y_color, to.axis_y_color, t),
            axis_x_color: lerp_color(self.axis_x_color, to.axis_x_color, t),
            background_color: lerp_color(self.background_color, to.background_color, t),
        }
    }
}

impl Default for GraphStyle {
    fn default() -> Self { Theme::day().graph }
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub graph: GraphStyle,
    /// Navigation shade outside the window.
    pub navigation_shade: skia::Color,
    /// Navigation window frame.
    pub navigation_frame: skia::Color,
}

impl Theme {
    pub fn day() -> Self {
        Self {
            graph: GraphStyle {
                line_fill_color: skia::Color::from_argb(255, 0xdf, 0xe6, 0xeb),
                axis_y_color: skia::Color::from_argb(255, 0x96, 0xa2, 0xaa),
                axis_x_color: skia::Color::from_argb(255, 0x96, 0xa2, 0xaa),
                background_color: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            },
            navigation_shade: skia::Color::from_argb(150, 0xf5, 0xf9, 0xfb),
            navigation_frame: skia::Color::from_argb(200, 0xc0, 0xd1, 0xe1),
        }
    }

    pub fn night() -> Self {
        Self {
            graph: GraphStyle {
                line_fill_color: skia::Color::from_argb(255, 0x3b, 0x4a, 0x5a),
                axis_y_color: skia::Color::from_argb(255, 0x54, 0x67, 0x78),
                axis_x_color: skia::Color::from_argb(255, 0x54, 0x67, 0x78),
                background_color: skia::Color::from_argb(255, 0x24, 0x2f, 0x3e),
            },
            navigation_shade: skia::Color::from_argb(150, 0x1f, 0x2a, 0x38),
            navigation_frame: skia::Color::from_argb(200, 0x56, 0x62, 0x6d),
        }
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(s: &str) -> Option<skia::Color> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(skia::Color::from_argb(255, nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

/// Per-channel blend; `t >= 1` yields `to` exactly.
pub fn lerp_color(from: skia::Color, to: skia::Color, t: f64) -> skia::Color {
    let ch = |a: u8, b: u8| lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8;
    skia::Color::from_argb(
        ch(from.a(), to.a()),
        ch(from.r(), to.r()),
        ch(from.g(), to.g()),
        ch(from.b(), to.b()),
    )
}
