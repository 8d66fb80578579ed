// File: crates/chart-core/src/crosshair.rs
// Summary: Viewer draw pipeline: cross-faded Y gridlines, density-thinned date labels and the selection crosshair.

use std::collections::BTreeMap;
use std::rc::Rc;

use skia_safe as skia;

use crate::axis::{AxisGenerator, AxisLabel, AxisXGenerator, AxisYGenerator};
use crate::dataset::ChartData;
use crate::math::lerp;
use crate::pipeline::{DrawPipeline, Frame};
use crate::scale::GraphScope;
use crate::text::TextShaper;
use crate::types::{AXIS_X_TEXT_TOP, AXIS_X_TEXT_WIDTH, AXIS_Y_COUNT, AXIS_Y_TEXT_OFFSET, LABEL_FONT_SIZE};
use crate::view::NavigationScope;

#[derive(Clone, Debug)]
pub struct CrosshairOptions {
    /// CSS width of the graph, used to pick the date label density.
    pub width: f64,
    pub axis_y_count: usize,
    pub axis_x_text_width: f64,
    /// Render label text. Gridlines and the crosshair are drawn either way.
    pub draw_labels: bool,
    /// Label font size in CSS pixels.
    pub font_size: f64,
}

impl Default for CrosshairOptions {
    fn default() -> Self {
        Self {
            width: crate::types::WIDTH,
            axis_y_count: AXIS_Y_COUNT,
            axis_x_text_width: AXIS_X_TEXT_WIDTH,
            draw_labels: true,
            font_size: LABEL_FONT_SIZE,
        }
    }
}

/// One generation of Y gridlines, keyed by its content hash.
#[derive(Clone, Debug)]
pub struct AxisYLayer {
    pub labels: Rc<[AxisLabel]>,
    pub scope: GraphScope,
    pub opacity: f64,
}

pub struct CrosshairLine {
    axis_y: AxisYGenerator,
    axis_x: AxisXGenerator,
    y_layers: BTreeMap<Rc<str>, AxisYLayer>,
    y_current: Option<Rc<str>>,
    y_prev: BTreeMap<Rc<str>, AxisYLayer>,
    x_opacity: BTreeMap<usize, f64>,
    x_prev: BTreeMap<usize, f64>,
    selected: Option<usize>,
    text: Option<TextShaper>,
    font_size: f64,
}

impl CrosshairLine {
    pub fn new(data: &ChartData, options: CrosshairOptions) -> Self {
        Self {
            axis_y: AxisYGenerator::new(options.axis_y_count),
            axis_x: AxisXGenerator::new(data, options.width, options.axis_x_text_width),
            y_layers: BTreeMap::new(),
            y_current: None,
            y_prev: BTreeMap::new(),
            x_opacity: BTreeMap::new(),
            x_prev: BTreeMap::new(),
            selected: None,
            text: options.draw_labels.then(TextShaper::new),
            font_size: options.font_size,
        }
    }

    pub fn selected_index(&self) -> Option<usize> { self.selected }

    pub fn select(&mut self, index: Option<usize>) { self.selected = index; }

    /// Hash of the gridline set being faded in (or shown).
    pub fn current_y_hash(&self) -> Option<&str> { self.y_current.as_deref() }

    pub fn y_layers(&self) -> impl Iterator<Item = (&str, &AxisYLayer)> {
        self.y_layers.iter().map(|(h, l)| (h.as_ref(), l))
    }

    pub fn x_modulus(&self) -> usize { self.axis_x.modulus() }

    /// Opacity per date density modulus.
    pub fn x_opacities(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.x_opacity.iter().map(|(m, o)| (*m, *o))
    }

    fn draw_y_lines(&self, frame: &Frame) {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(frame.geometry.canvas_value(1.0) as f32);
        let width = frame.geometry.canvas_width as f32;
        for layer in self.y_layers.values() {
            if layer.opacity <= 0.0 {
                continue;
            }
            paint.set_color(frame.style.line_fill_color);
            paint.set_alpha_f(layer.opacity as f32);
            let mut path = skia::Path::new();
            for label in layer.labels.iter() {
                let y = layer.scope.y(label.position) as f32;
                path.move_to((0.0, y));
                path.line_to((width, y));
            }
            frame.canvas.draw_path(&path, &paint);
        }
    }

    fn draw_y_text(&self, text: &TextShaper, frame: &Frame) {
        let size = frame.geometry.canvas_value(self.font_size) as f32;
        let offset = frame.geometry.canvas_value(AXIS_Y_TEXT_OFFSET);
        for layer in self.y_layers.values() {
            for label in layer.labels.iter() {
                let y = layer.scope.y(label.position) - offset;
                text.draw(frame.canvas, &label.title, 0.0, y as f32, size, frame.style.axis_y_color, layer.opacity as f32);
            }
        }
    }

    fn draw_x_titles(&self, text: &TextShaper, frame: &Frame) {
        let mut mods: Vec<(usize, f64)> = self.x_opacities().collect();
        mods.sort_by(|a, b| b.0.cmp(&a.0));
        let size = frame.geometry.canvas_value(self.font_size) as f32;
        let y = frame.geometry.canvas_value(AXIS_X_TEXT_TOP) as f32;
        let begin = frame.window.begin.saturating_sub(self.axis_x.modulus());
        for index in begin..=frame.window.end {
            let Some(title) = self.axis_x.title(index) else { break };
            // The coarsest density containing this index decides its opacity.
            let Some(&(_, opacity)) = mods.iter().find(|(m, _)| index % m == 0) else { continue };
            let x = frame.window.x(index) as f32;
            text.draw(frame.canvas, title, x, y, size, frame.style.axis_x_color, opacity as f32);
        }
    }

    fn draw_selection(&self, frame: &Frame) {
        let Some(index) = self.selected else { return };
        if index > frame.data.max_index {
            return;
        }
        let x = frame.window.x(index) as f32;

        let mut guide = skia::Paint::default();
        guide.set_anti_alias(true);
        guide.set_style(skia::paint::Style::Stroke);
        guide.set_stroke_width(frame.geometry.canvas_value(1.0) as f32);
        guide.set_color(frame.style.line_fill_color);
        let top = -(frame.geometry.canvas_height as f32) + frame.geometry.vertical_padding as f32;
        frame.canvas.draw_line((x, 0.0), (x, top), &guide);

        let radius = (frame.line_width * 2.0) as f32;
        for line in &frame.data.lines {
            let Some(state) = frame.lines.get(&line.key) else { continue };
            let Some(value) = line.value_at(index) else { continue };
            if state.opacity <= 0.0 {
                continue;
            }
            let y = state.scope.y(value) as f32;

            let mut fill = skia::Paint::default();
            fill.set_anti_alias(true);
            fill.set_color(frame.style.background_color);
            fill.set_alpha_f(state.opacity as f32);
            frame.canvas.draw_circle((x, y), radius, &fill);

            let mut stroke = skia::Paint::default();
            stroke.set_anti_alias(true);
            stroke.set_style(skia::paint::Style::Stroke);
            stroke.set_stroke_width(frame.line_width as f32);
            stroke.set_color(line.color);
            stroke.set_alpha_f(state.opacity as f32);
            frame.canvas.draw_circle((x, y), radius, &stroke);
        }
    }
}

impl DrawPipeline for CrosshairLine {
    fn attach(&mut self, scope: &NavigationScope, target: &GraphScope) {
        self.axis_y.set_visible_range(scope);
        self.axis_x.set_visible_range(scope);
        if let Some(set) = self.axis_y.label_set() {
            self.y_layers.insert(set.hash.clone(), AxisYLayer { labels: set.labels, scope: *target, opacity: 1.0 });
            self.y_current = Some(set.hash);
        }
        self.x_opacity.insert(self.axis_x.modulus(), 1.0);
    }

    fn scope_changed(&mut self, scope: &NavigationScope, target: &GraphScope) {
        let prev_hash = self.y_current.clone();
        let prev_mod = self.axis_x.modulus();
        self.axis_y.set_visible_range(scope);
        self.axis_x.set_visible_range(scope);

        match self.axis_y.label_set() {
            Some(set) if !self.y_layers.contains_key(&set.hash) => {
                // Only the outgoing layer survives next to the incoming one.
                self.y_layers.retain(|h, _| Some(h) == prev_hash.as_ref());
                let start = prev_hash
                    .as_ref()
                    .and_then(|h| self.y_layers.get(h))
                    .map(|l| l.scope)
                    .unwrap_or(*target);
                self.y_layers.insert(set.hash.clone(), AxisYLayer { labels: set.labels, scope: start, opacity: 0.0 });
                self.y_current = Some(set.hash);
            }
            Some(set) => self.y_current = Some(set.hash),
            // Nothing visible: the last set stays current until a new one fades in.
            None => {}
        }

        let current_mod = self.axis_x.modulus();
        if current_mod != prev_mod {
            let start = if current_mod >= prev_mod { 1.0 } else { 0.0 };
            self.x_opacity.entry(current_mod).or_insert(start);
        }
    }

    fn transition_started(&mut self) {
        self.y_prev = self.y_layers.clone();
        self.x_prev = self.x_opacity.clone();
    }

    fn transition_step(&mut self, target: &GraphScope, non_empty: bool, t: f64) {
        if non_empty {
            for (hash, layer) in self.y_layers.iter_mut() {
                let Some(prev) = self.y_prev.get(hash) else { continue };
                layer.scope = prev.scope.lerp(target, t);
                let to = if self.y_current.as_ref() == Some(hash) { 1.0 } else { 0.0 };
                layer.opacity = lerp(prev.opacity, to, t).clamp(0.0, 1.0);
            }
        }

        let current_mod = self.axis_x.modulus();
        for (modulus, opacity) in self.x_opacity.iter_mut() {
            let prev = self.x_prev.get(modulus).copied().unwrap_or(*opacity);
            let to = if *modulus >= current_mod { 1.0 } else { 0.0 };
            *opacity = lerp(prev, to, t).clamp(0.0, 1.0);
        }
    }

    fn transition_finished(&mut self) {
        let current = self.y_current.clone();
        self.y_layers.retain(|h, l| Some(h) == current.as_ref() || l.opacity > 0.0);
        let current_mod = self.axis_x.modulus();
        self.x_opacity.retain(|m, o| *m == current_mod || *o > 0.0);
    }

    fn draw_under(&self, frame: &Frame) {
        self.draw_y_lines(frame);
    }

    fn draw_over(&self, frame: &Frame) {
        if let Some(text) = &self.text {
            self.draw_y_text(text, frame);
            self.draw_x_titles(text, frame);
        }
        self.draw_selection(frame);
    }
}
