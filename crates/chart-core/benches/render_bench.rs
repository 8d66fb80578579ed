use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use scopechart_core::animation::ManualClock;
use scopechart_core::{ChartData, GraphOptions, NavigationScope, Series, Viewer, ViewerOptions, VisibilityMap};
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use skia_safe as skia;

fn build_data(n: usize) -> Result<Rc<ChartData>> {
    let x = (0..n as i64).map(|i| 1_542_412_800_000 + i * 86_400_000).collect();
    let wave: Vec<f64> = (0..n).map(|i| (i as f64 * 0.01).sin() * 10.0 + 12.0 + i as f64 * 0.0001).collect();
    let ramp: Vec<f64> = (0..n).map(|i| i as f64 * 0.002).collect();
    Ok(Rc::new(ChartData::new(
        x,
        vec![
            Series::from_values("wave", "Wave", skia::Color::from_rgb(0x3c, 0xc2, 0x3f), &wave),
            Series::from_values("ramp", "Ramp", skia::Color::from_rgb(0xf3, 0x4c, 0x44), &ramp),
        ],
    )?))
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewer_frames");
    for &n in &[10_000usize, 50_000usize] {
        group.bench_function(format!("zoom_{n}"), |b| {
            let data = build_data(n).expect("bench data");
            let clock = Rc::new(ManualClock::new());
            let mut options = ViewerOptions::default();
            options.graph = GraphOptions { width: 800.0, height: 500.0, clock: clock.clone(), ..options.graph };
            options.crosshair.draw_labels = false;
            let visibility = VisibilityMap::all_visible(&data);
            let full = NavigationScope::for_window(&data, &visibility, 0.0, 1.0);
            let half = NavigationScope::for_window(&data, &visibility, 0.25, 0.75);
            let mut viewer = Viewer::new(data.clone(), visibility, full, options);
            let mut flip = false;
            b.iter(|| -> Result<()> {
                flip = !flip;
                viewer.set_navigation_scope(if flip { half } else { full });
                // one frame mid-way, one at the end
                for _ in 0..2 {
                    clock.advance(Duration::from_millis(120));
                    black_box(viewer.tick());
                }
                black_box(viewer.graph_mut().read_rgba8()?);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frames);
criterion_main!(benches);
