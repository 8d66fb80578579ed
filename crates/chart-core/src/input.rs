// File: crates/chart-core/src/input.rs
// Summary: Normalized pointer input handed in by the host (mouse or touch).

/// Pointer sample with `x` in CSS pixels relative to the receiving component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pointer {
    Mouse { x: f64 },
    /// `touches` is the number of active touch points.
    Touch { x: f64, touches: usize },
}

impl Pointer {
    pub fn mouse(x: f64) -> Self { Pointer::Mouse { x } }

    pub fn touch(x: f64) -> Self { Pointer::Touch { x, touches: 1 } }

    /// X of a single-pointer gesture; `None` for multi-touch.
    pub fn single_x(&self) -> Option<f64> {
        match *self {
            Pointer::Mouse { x } => Some(x),
            Pointer::Touch { x, touches: 1 } => Some(x),
            Pointer::Touch { .. } => None,
        }
    }

    pub fn is_touch(&self) -> bool { matches!(self, Pointer::Touch { .. }) }
}
