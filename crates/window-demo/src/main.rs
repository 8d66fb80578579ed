// File: crates/window-demo/src/main.rs
// Summary: Interactive window demo; viewer over a navigation minimap, blitted to a winit window via softbuffer (CPU).

use std::num::NonZeroU32;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use scopechart_core::{
    charts_from_json_str, Chart, ChartData, ChartOptions, GraphOptions, NavigationOptions, Pointer, Series, Theme,
    ViewerOptions,
};
use skia_safe as skia;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

// Layout in logical pixels.
const MARGIN: f64 = 16.0;
const VIEWER_WIDTH: f64 = 860.0;
const VIEWER_HEIGHT: f64 = 420.0;
const NAV_HEIGHT: f64 = 64.0;
const GAP: f64 = 24.0;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Region {
    Viewer,
    Navigation,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data = match std::env::args().nth(1) {
        Some(path) => load_first_chart(Path::new(&path))?,
        None => synthetic_data()?,
    };
    let keys: Vec<String> = data.lines.iter().map(|l| l.key.clone()).collect();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Scopechart - Window Demo")
        .with_inner_size(winit::dpi::LogicalSize::new(VIEWER_WIDTH + MARGIN * 2.0, VIEWER_HEIGHT + NAV_HEIGHT + GAP + MARGIN * 2.0))
        .with_resizable(false)
        .build(&event_loop)
        .context("build window")?;
    let scale = window.scale_factor();
    info!(scale, series = keys.len(), "window ready");

    let graph = GraphOptions { width: VIEWER_WIDTH, device_pixel_ratio: scale, ..GraphOptions::default() };
    let mut viewer = ViewerOptions::default();
    viewer.graph = GraphOptions { height: VIEWER_HEIGHT, line_width: viewer.graph.line_width, ..graph.clone() };
    let options = ChartOptions {
        viewer,
        navigation: NavigationOptions { graph: GraphOptions { height: NAV_HEIGHT, ..graph }, ..NavigationOptions::default() },
        night: false,
    };
    let mut chart = Chart::new(Rc::new(data), options);
    chart.mount()?;

    let context = unsafe { softbuffer::Context::new(&window) }.context("softbuffer context")?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }.context("softbuffer surface")?;

    let mut cursor: Option<(f64, f64)> = None;
    let mut pressed: Option<Region> = None;

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, window_id: _ } => match event {
                WindowEvent::CloseRequested => {
                    *cf = ControlFlow::Exit;
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let logical = position.to_logical::<f64>(scale);
                    cursor = Some((logical.x, logical.y));
                    let x = logical.x - MARGIN;
                    match pressed {
                        Some(Region::Navigation) => {
                            chart.navigation_mut().pointer_move(Pointer::mouse(x));
                        }
                        _ => {
                            chart.with_viewer(|v| v.pointer_move(Pointer::mouse(x)));
                        }
                    }
                    window.request_redraw();
                }
                WindowEvent::CursorLeft { .. } => {
                    cursor = None;
                }
                WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                    match state {
                        ElementState::Pressed => {
                            let Some((x, y)) = cursor else { return };
                            let x = x - MARGIN;
                            pressed = region_at(y);
                            match pressed {
                                Some(Region::Viewer) => {
                                    chart.with_viewer(|v| v.pointer_down(Pointer::mouse(x)));
                                }
                                Some(Region::Navigation) => {
                                    let nav = chart.navigation_mut();
                                    match nav.hit_test(x) {
                                        Some(handle) => {
                                            nav.pointer_down(handle, Pointer::mouse(x));
                                        }
                                        None => pressed = None,
                                    }
                                }
                                None => {}
                            }
                        }
                        ElementState::Released => {
                            pressed = None;
                            chart.navigation_mut().pointer_up();
                            chart.with_viewer(|v| v.pointer_up());
                        }
                    }
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => {
                    match key {
                        VirtualKeyCode::N => {
                            let night = !chart.is_night();
                            chart.switch_night_theme(night);
                        }
                        VirtualKeyCode::Escape => {
                            chart.with_viewer(|v| v.deselect());
                        }
                        other => {
                            if let Some(key) = digit(other).and_then(|d| keys.get(d)) {
                                let visible = chart.toggle_series(key);
                                debug!(key = %key, ?visible, "legend toggle");
                            }
                        }
                    }
                    window.request_redraw();
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                if chart.tick() {
                    *cf = ControlFlow::Poll;
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(e) = present(&mut chart, &mut surface, &window) {
                    error!("present error: {e:#}");
                }
            }
            _ => {}
        }
    });
}

fn region_at(y: f64) -> Option<Region> {
    let viewer_top = MARGIN;
    let nav_top = MARGIN + VIEWER_HEIGHT + GAP;
    if (viewer_top..viewer_top + VIEWER_HEIGHT).contains(&y) {
        Some(Region::Viewer)
    } else if (nav_top..nav_top + NAV_HEIGHT).contains(&y) {
        Some(Region::Navigation)
    } else {
        None
    }
}

fn digit(key: VirtualKeyCode) -> Option<usize> {
    use VirtualKeyCode::*;
    [Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9].iter().position(|k| *k == key)
}

/// Softbuffer takes 0RGB words.
fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

fn blend(dst: u32, color: skia::Color) -> u32 {
    let a = color.a() as u32;
    let mix = |d: u32, s: u8| ((d * (255 - a) + s as u32 * a) / 255) as u8;
    pack(mix((dst >> 16) & 0xff, color.r()), mix((dst >> 8) & 0xff, color.g()), mix(dst & 0xff, color.b()))
}

fn present(chart: &mut Chart, surface: &mut softbuffer::Surface, window: &winit::window::Window) -> Result<()> {
    let size = window.inner_size();
    let (w, h) = (size.width.max(1), size.height.max(1));
    let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else { return Ok(()) };
    surface.resize(nw, nh).map_err(|e| anyhow::anyhow!("resize: {e}"))?;

    let theme = if chart.is_night() { Theme::night() } else { Theme::day() };
    let scale = window.scale_factor();
    let px = |v: f64| (v * scale).round() as usize;

    let viewer = chart.with_viewer(|v| -> Result<_> {
        let g = v.graph().geometry();
        let size = (g.canvas_width as usize, g.canvas_height as usize);
        Ok((v.graph_mut().read_rgba8()?, size))
    })?;
    let nav_geometry = *chart.navigation().graph().geometry();
    let nav = chart.navigation_mut().graph_mut().read_rgba8()?;
    let background = chart.with_viewer(|v| v.graph().style().background_color);

    let mut frame = surface.buffer_mut().map_err(|e| anyhow::anyhow!("buffer: {e}"))?;
    frame.fill(pack(background.r(), background.g(), background.b()));

    let stride = w as usize;
    let mut blit = |rgba: &[u8], (cw, ch): (usize, usize), left: usize, top: usize| {
        for (row, line) in rgba.chunks_exact(cw * 4).take(ch).enumerate() {
            let y = top + row;
            if y >= h as usize {
                break;
            }
            for (col, p) in line.chunks_exact(4).enumerate() {
                let x = left + col;
                if x >= stride {
                    break;
                }
                frame[y * stride + x] = pack(p[0], p[1], p[2]);
            }
        }
    };
    let (rgba, viewer_size) = viewer;
    blit(&rgba, viewer_size, px(MARGIN), px(MARGIN));
    let nav_top = px(MARGIN + VIEWER_HEIGHT + GAP);
    blit(&nav, (nav_geometry.canvas_width as usize, nav_geometry.canvas_height as usize), px(MARGIN), nav_top);

    // Track overlay: shade outside the window, frame around it.
    let track = *chart.navigation().track();
    let (left, right) = (px(MARGIN + track.left), px(MARGIN + track.width - track.right));
    let (x0, x1) = (px(MARGIN), px(MARGIN + track.width).min(stride));
    let y1 = (nav_top + nav_geometry.canvas_height as usize).min(h as usize);
    let border = px(1.0).max(1);
    let handle = px(4.0).max(1);
    for y in nav_top..y1 {
        for x in x0..x1 {
            let i = y * stride + x;
            if x < left || x >= right {
                frame[i] = blend(frame[i], theme.navigation_shade);
            } else if x < left + handle || x + handle >= right || y < nav_top + border || y + border >= y1 {
                frame[i] = blend(frame[i], theme.navigation_frame);
            }
        }
    }

    frame.present().map_err(|e| anyhow::anyhow!("present: {e}"))?;
    Ok(())
}

fn load_first_chart(path: &Path) -> Result<ChartData> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    charts_from_json_str(&json)?
        .into_iter()
        .find_map(|c| c.ok())
        .with_context(|| format!("no renderable chart in {}", path.display()))
}

fn synthetic_data() -> Result<ChartData> {
    let start = 1_542_412_800_000_i64;
    let n = 365;
    let x = (0..n).map(|i| start + i as i64 * 86_400_000).collect();
    let colors = [(0x3c, 0xc2, 0x3f), (0xf3, 0x4c, 0x44), (0x39, 0x7e, 0xd7)];
    let lines = colors
        .iter()
        .enumerate()
        .map(|(k, &(r, g, b))| {
            let phase = k as f64 * 1.7;
            let values: Vec<f64> = (0..n)
                .map(|i| {
                    let t = i as f64;
                    ((t * 0.09 + phase).sin() * 800.0 + (t * 0.013).cos() * 1_500.0 + 2_600.0 + t * k as f64 * 3.0).round()
                })
                .collect();
            Series::from_values(format!("y{k}"), format!("Series {}", k + 1), skia::Color::from_rgb(r, g, b), &values)
        })
        .collect();
    Ok(ChartData::new(x, lines)?)
}
