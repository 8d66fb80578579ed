// File: crates/demo/src/main.rs
// Summary: Headless demo; scripts a scrub, a legend toggle and the night theme, writing PNG frames.

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use scopechart_core::animation::ManualClock;
use scopechart_core::{
    charts_from_json_str, Chart, ChartData, ChartOptions, DragHandle, GraphOptions, NavigationOptions, Pointer,
    Series, ViewerOptions,
};
use skia_safe as skia;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional: path to a JSON array of charts, and which chart to render
    let mut args = std::env::args().skip(1);
    let data = match args.next() {
        Some(path) => {
            let which = args.next().map(|s| s.parse::<usize>()).transpose().context("chart index")?.unwrap_or(0);
            load_chart(Path::new(&path), which)?
        }
        None => synthetic_data()?,
    };
    info!(samples = data.length, series = data.lines.len(), "dataset ready");

    let clock = Rc::new(ManualClock::new());
    let graph = GraphOptions { width: 480.0, height: 280.0, device_pixel_ratio: 2.0, clock: clock.clone(), ..GraphOptions::default() };
    let mut viewer = ViewerOptions::default();
    viewer.graph = GraphOptions { line_width: viewer.graph.line_width, ..graph.clone() };
    let options = ChartOptions {
        viewer,
        navigation: NavigationOptions { graph: GraphOptions { height: 48.0, ..graph }, ..NavigationOptions::default() },
        night: false,
    };

    let first_key = data.lines.first().map(|l| l.key.clone());
    let mut chart = Chart::new(Rc::new(data), options);
    chart.mount()?;
    let out = out_dir()?;
    write_frames(&mut chart, &out, "00_initial")?;

    // Drag the left handle towards the middle, one frame per step.
    let track = *chart.navigation().track();
    chart.navigation_mut().pointer_down(DragHandle::Left, Pointer::mouse(0.0));
    for step in 1..=12 {
        chart.navigation_mut().pointer_move(Pointer::mouse(track.width * 0.05 * step as f64));
        clock.advance(FRAME);
        chart.tick();
        if step == 6 {
            write_frames(&mut chart, &out, "01_scrub_mid")?;
        }
    }
    chart.navigation_mut().pointer_up();
    settle(&mut chart, &clock);
    write_frames(&mut chart, &out, "02_scrubbed")?;

    // Then pan the whole window back a little.
    let left = chart.navigation().track().left;
    let body = left + track.min_width / 2.0 + 20.0;
    chart.navigation_mut().pointer_down(DragHandle::Body, Pointer::mouse(body));
    chart.navigation_mut().pointer_move(Pointer::mouse(body - track.width * 0.1));
    chart.navigation_mut().pointer_up();
    settle(&mut chart, &clock);

    chart.with_viewer(|v| v.select_at_ratio(0.6));
    write_frames(&mut chart, &out, "03_selected")?;

    if let Some(key) = first_key {
        chart.toggle_series(&key);
        clock.advance(Duration::from_millis(100));
        chart.tick();
        write_frames(&mut chart, &out, "04_toggle_mid")?;
        settle(&mut chart, &clock);
        write_frames(&mut chart, &out, "05_toggled")?;
    }

    chart.switch_night_theme(true);
    settle(&mut chart, &clock);
    write_frames(&mut chart, &out, "06_night")?;

    info!(dir = %out.display(), "done");
    Ok(())
}

/// Advance the clock until both surfaces stop animating.
fn settle(chart: &mut Chart, clock: &ManualClock) {
    for _ in 0..64 {
        clock.advance(FRAME);
        if !chart.tick() {
            return;
        }
    }
    warn!("animation did not settle");
}

fn write_frames(chart: &mut Chart, out: &Path, name: &str) -> Result<()> {
    let viewer = chart.with_viewer(|v| v.graph_mut().encode_png())?;
    let nav = chart.navigation_mut().graph_mut().encode_png()?;
    let viewer_path = out.join(format!("scope_{name}_viewer.png"));
    let nav_path = out.join(format!("scope_{name}_nav.png"));
    std::fs::write(&viewer_path, viewer).with_context(|| format!("writing {}", viewer_path.display()))?;
    std::fs::write(&nav_path, nav).with_context(|| format!("writing {}", nav_path.display()))?;
    info!(viewer = %viewer_path.display(), "wrote frame");
    Ok(())
}

fn out_dir() -> Result<PathBuf> {
    let out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;
    Ok(out)
}

fn load_chart(path: &Path, which: usize) -> Result<ChartData> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let charts = charts_from_json_str(&json).with_context(|| format!("parsing {}", path.display()))?;
    info!(count = charts.len(), "charts in file");
    for (i, chart) in charts.iter().enumerate() {
        if let Err(e) = chart {
            warn!(index = i, error = %e, "skipping chart");
        }
    }
    charts
        .into_iter()
        .nth(which)
        .with_context(|| format!("no chart at index {which}"))?
        .with_context(|| format!("chart {which} is not renderable"))
}

/// Four months of daily samples for two series with a gap in the second.
fn synthetic_data() -> Result<ChartData> {
    let start = Utc
        .with_ymd_and_hms(2018, 11, 17, 0, 0, 0)
        .single()
        .context("start date")?
        .timestamp_millis();
    let n = 120;
    let x: Vec<i64> = (0..n).map(|i| start + i as i64 * 86_400_000).collect();
    let joined: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            (t * 0.21).sin() * 40.0 + (t * 0.05).cos() * 25.0 + 90.0 + t * 0.6
        })
        .map(f64::round)
        .collect();
    let left: Vec<Option<f64>> = (0..n)
        .map(|i| {
            if (40..46).contains(&i) {
                return None;
            }
            let t = i as f64;
            Some(((t * 0.17).cos() * 30.0 + 60.0 - t * 0.2).round())
        })
        .collect();
    let chart = ChartData::new(
        x,
        vec![
            Series::from_values("y0", "Joined", skia::Color::from_rgb(0x3c, 0xc2, 0x3f), &joined),
            Series::new("y1", "Left", skia::Color::from_rgb(0xf3, 0x4c, 0x44), left),
        ],
    )?;
    Ok(chart)
}
