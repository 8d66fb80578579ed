// File: crates/chart-core/src/graph.rs
// Summary: Render surface: owns the Skia raster surface, per-series interpolated state and the draw loop.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use skia_safe as skia;
use tracing::{debug, trace, warn};

use crate::animation::{Animation, Clock, Easing, SystemClock};
use crate::dataset::ChartData;
use crate::error::ChartError;
use crate::geometry::CanvasGeometry;
use crate::math::lerp;
use crate::pipeline::{DrawPipeline, Frame, LineState};
use crate::scale::{GraphScope, HorizontalWindow};
use crate::theme::GraphStyle;
use crate::types::{ANIMATION_DURATION, HEIGHT, LINE_WIDTH, VERTICAL_PADDING_RATIO, WIDTH};
use crate::view::NavigationScope;
use crate::visibility::VisibilityMap;

#[derive(Clone)]
pub struct GraphOptions {
    /// CSS width and height.
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
    /// Share of the device pixel ratio actually spent, clamped to `[0.1, 1]`.
    pub render_quality_ratio: f64,
    pub vertical_padding_ratio: f64,
    pub animation_duration: Duration,
    pub easing: Easing,
    /// Series stroke width in CSS pixels.
    pub line_width: f64,
    pub style: GraphStyle,
    pub clock: Rc<dyn Clock>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            device_pixel_ratio: 1.0,
            render_quality_ratio: 1.0,
            vertical_padding_ratio: VERTICAL_PADDING_RATIO,
            animation_duration: ANIMATION_DURATION,
            easing: Easing::OutSine,
            line_width: LINE_WIDTH,
            style: GraphStyle::default(),
            clock: Rc::new(SystemClock),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphState {
    /// Constructed, no surface yet.
    Uninitialized,
    Ready,
    Animating,
    Destroyed,
}

struct Transition {
    prev_lines: BTreeMap<String, LineState>,
    target: GraphScope,
    non_empty: bool,
    prev_style: GraphStyle,
}

pub struct Graph<P: DrawPipeline> {
    data: Rc<ChartData>,
    visibility: VisibilityMap,
    scope: NavigationScope,
    options: GraphOptions,
    geometry: CanvasGeometry,
    style: GraphStyle,
    target_style: GraphStyle,
    lines: BTreeMap<String, LineState>,
    transition: Option<Transition>,
    animation: Animation,
    surface: Option<skia::Surface>,
    destroyed: bool,
    pipeline: P,
}

impl<P: DrawPipeline> Graph<P> {
    pub fn new(data: Rc<ChartData>, visibility: VisibilityMap, scope: NavigationScope, options: GraphOptions, mut pipeline: P) -> Self {
        let geometry = CanvasGeometry::new(
            options.width,
            options.height,
            options.device_pixel_ratio,
            options.render_quality_ratio,
            options.vertical_padding_ratio,
        );
        let target = pipeline.target_scope(&scope, &geometry);
        let lines = data
            .lines
            .iter()
            .map(|l| {
                let opacity = if visibility.is_visible(&l.key) { 1.0 } else { 0.0 };
                (l.key.clone(), LineState { scope: target, opacity })
            })
            .collect();
        pipeline.attach(&scope, &target);
        Self {
            animation: Animation::new(options.animation_duration, options.easing),
            style: options.style,
            target_style: options.style,
            data,
            visibility,
            scope,
            geometry,
            options,
            lines,
            transition: None,
            surface: None,
            destroyed: false,
            pipeline,
        }
    }

    /// Create the raster surface and draw the first frame. Later calls return the same surface.
    pub fn surface_element(&mut self) -> Result<&mut skia::Surface, ChartError> {
        if self.destroyed {
            return Err(ChartError::Destroyed);
        }
        if self.surface.is_none() {
            let (width, height) = (self.geometry.canvas_width, self.geometry.canvas_height);
            let surface = skia::surfaces::raster_n32_premul((width, height))
                .ok_or(ChartError::SurfaceUnavailable { width, height })?;
            debug!(width, height, pixel_ratio = self.geometry.pixel_ratio, "graph surface created");
            self.surface = Some(surface);
            self.draw();
        }
        self.surface.as_mut().ok_or(ChartError::Destroyed)
    }

    pub fn set_visibility_map(&mut self, visibility: VisibilityMap) {
        if self.destroyed {
            warn!("set_visibility_map on a destroyed graph");
            return;
        }
        self.visibility = visibility;
        self.start_transition(false);
    }

    pub fn set_navigation_scope(&mut self, scope: NavigationScope) {
        if self.destroyed {
            warn!("set_navigation_scope on a destroyed graph");
            return;
        }
        let changed = scope != self.scope;
        self.scope = scope;
        self.start_transition(changed);
    }

    pub fn set_styles(&mut self, style: GraphStyle) {
        if self.destroyed {
            warn!("set_styles on a destroyed graph");
            return;
        }
        self.target_style = style;
        self.start_transition(false);
    }

    fn start_transition(&mut self, scope_changed: bool) {
        // The running transition ends where it is; its completion bookkeeping
        // must happen before the new baseline is taken.
        if self.animation.is_running() {
            self.animation.stop();
            self.pipeline.transition_finished();
        }
        self.transition = None;

        let target = self.pipeline.target_scope(&self.scope, &self.geometry);
        if scope_changed {
            self.pipeline.scope_changed(&self.scope, &target);
        }
        self.pipeline.transition_started();
        let non_empty = !self.visibility.is_empty();
        self.transition = Some(Transition {
            prev_lines: self.lines.clone(),
            target,
            non_empty,
            prev_style: self.style,
        });
        self.animation.start(self.options.clock.now());
        debug!(
            min = target.min_value,
            max = target.max_value,
            scale_y = target.scale_y,
            non_empty,
            "transition started"
        );
    }

    /// Advance the running transition to the clock's current time and redraw.
    /// Returns false when there was nothing to animate.
    pub fn tick(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        let now = self.options.clock.now();
        let Some(progress) = self.animation.progress(now) else { return false };
        self.apply_progress(progress.tween);
        trace!(linear = progress.linear, tween = progress.tween, "graph frame");
        if progress.done {
            self.transition = None;
            self.pipeline.transition_finished();
            debug!("transition finished");
        }
        self.draw();
        true
    }

    fn apply_progress(&mut self, t: f64) {
        let Some(transition) = &self.transition else { return };
        for (key, state) in self.lines.iter_mut() {
            let prev = transition.prev_lines.get(key).copied().unwrap_or(*state);
            let visible = self.visibility.is_visible(key);
            state.scope = self.pipeline.blend_line(&prev, &transition.target, visible, transition.non_empty, t);
            let target_opacity = if visible { 1.0 } else { 0.0 };
            state.opacity = lerp(prev.opacity, target_opacity, t).clamp(0.0, 1.0);
        }
        self.style = transition.prev_style.lerp(&self.target_style, t);
        self.pipeline.transition_step(&transition.target, transition.non_empty, t);
    }

    /// Draw the current interpolated state without advancing time.
    pub fn redraw(&mut self) {
        self.draw();
    }

    fn draw(&mut self) {
        let Some(surface) = self.surface.as_mut() else { return };
        let canvas = surface.canvas();
        canvas.clear(self.style.background_color);

        let window = self.pipeline.window(&self.scope, self.data.max_index, &self.geometry);
        let line_width = self.geometry.canvas_value(self.options.line_width);

        canvas.save();
        canvas.translate((0.0, self.geometry.baseline() as f32));
        let frame = Frame {
            canvas,
            data: &self.data,
            visibility: &self.visibility,
            scope: &self.scope,
            geometry: &self.geometry,
            window,
            style: &self.style,
            lines: &self.lines,
            line_width,
        };
        self.pipeline.draw_under(&frame);
        for line in &self.data.lines {
            let Some(state) = self.lines.get(&line.key) else { continue };
            if state.opacity <= 0.0 {
                continue;
            }
            draw_line(canvas, &line.values, line.color, state, &window, line_width);
        }
        self.pipeline.draw_over(&frame);
        canvas.restore();
    }

    /// Pixels of the current frame as unpremultiplied RGBA8, row-major.
    pub fn read_rgba8(&mut self) -> Result<Vec<u8>, ChartError> {
        let surface = self.surface_element()?;
        let (width, height) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((width, height), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = width as usize * 4;
        let mut pixels = vec![0u8; row_bytes * height as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(ChartError::ReadPixels);
        }
        Ok(pixels)
    }

    pub fn encode_png(&mut self) -> Result<Vec<u8>, ChartError> {
        let surface = self.surface_element()?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(ChartError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Stop animating and release the surface. Setters become no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.animation.stop();
        self.transition = None;
        self.surface = None;
        self.lines.clear();
        self.destroyed = true;
        debug!("graph destroyed");
    }

    pub fn state(&self) -> GraphState {
        if self.destroyed {
            GraphState::Destroyed
        } else if self.surface.is_none() {
            GraphState::Uninitialized
        } else if self.animation.is_running() {
            GraphState::Animating
        } else {
            GraphState::Ready
        }
    }

    pub fn is_animating(&self) -> bool { self.animation.is_running() }
    pub fn line_state(&self, key: &str) -> Option<&LineState> { self.lines.get(key) }
    pub fn navigation_scope(&self) -> &NavigationScope { &self.scope }
    pub fn visibility(&self) -> &VisibilityMap { &self.visibility }
    pub fn style(&self) -> &GraphStyle { &self.style }
    pub fn geometry(&self) -> &CanvasGeometry { &self.geometry }
    pub fn data(&self) -> &Rc<ChartData> { &self.data }
    pub fn pipeline(&self) -> &P { &self.pipeline }
    pub fn pipeline_mut(&mut self) -> &mut P { &mut self.pipeline }

    /// Current horizontal mapping, in device pixels.
    pub fn window(&self) -> HorizontalWindow {
        self.pipeline.window(&self.scope, self.data.max_index, &self.geometry)
    }
}

/// Canvas points of `values` inside `window`, split at gaps. Coordinates are
/// relative to the baseline.
pub fn line_segments(values: &[Option<f64>], window: &HorizontalWindow, scope: &GraphScope) -> Vec<Vec<(f32, f32)>> {
    let mut segments = Vec::new();
    if values.is_empty() {
        return segments;
    }
    let end = window.end.min(values.len() - 1);
    let mut current: Vec<(f32, f32)> = Vec::new();
    for index in window.begin..=end {
        match values[index] {
            Some(v) => current.push((window.x(index) as f32, scope.y(v) as f32)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn draw_line(canvas: &skia::Canvas, values: &[Option<f64>], color: skia::Color, state: &LineState, window: &HorizontalWindow, width: f64) {
    let mut path = skia::Path::new();
    for segment in line_segments(values, window, &state.scope) {
        let mut points = segment.into_iter();
        let Some(first) = points.next() else { continue };
        path.move_to(first);
        for p in points {
            path.line_to(p);
        }
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(width as f32);
    stroke.set_stroke_join(skia::paint::Join::Bevel);
    stroke.set_stroke_cap(skia::paint::Cap::Butt);
    stroke.set_color(color);
    stroke.set_alpha_f(state.opacity as f32 * color.a() as f32 / 255.0);

    canvas.draw_path(&path, &stroke);
}
