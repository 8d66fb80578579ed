// File: crates/chart-core/tests/viewer.rs
// Purpose: Viewer selection, info box placement, pointer protocol and axis cross-fades.

use std::rc::Rc;
use std::time::Duration;

use scopechart_core::animation::ManualClock;
use scopechart_core::{
    ChartData, CrosshairOptions, GraphOptions, GraphScope, InfoPlacement, NavigationScope, Pointer, Series, Viewer,
    ViewerOptions, VisibilityMap,
};
use skia_safe as skia;

const DAY: i64 = 86_400_000;
const START: i64 = 1_552_176_000_000; // Sun, Mar 10 2019 UTC

fn data() -> Rc<ChartData> {
    let x = (0..=10).map(|i| START + i * DAY).collect();
    let up: Vec<f64> = (0..=10).map(|i| i as f64 * 10.0).collect();
    let flat = (0..=10).map(|i| if i == 3 { None } else { Some(7.0) }).collect();
    Rc::new(
        ChartData::new(
            x,
            vec![
                Series::from_values("up", "Up", skia::Color::from_rgb(200, 40, 40), &up),
                Series::new("flat", "Flat", skia::Color::from_rgb(40, 40, 200), flat),
            ],
        )
        .unwrap(),
    )
}

fn viewer() -> (Viewer, Rc<ManualClock>) {
    let data = data();
    let clock = Rc::new(ManualClock::new());
    let options = ViewerOptions {
        graph: GraphOptions { width: 100.0, height: 50.0, clock: clock.clone(), ..ViewerOptions::default().graph },
        crosshair: CrosshairOptions { draw_labels: false, ..CrosshairOptions::default() },
    };
    let visibility = VisibilityMap::all_visible(&data);
    let scope = NavigationScope::for_window(&data, &visibility, 0.0, 1.0);
    (Viewer::new(data, visibility, scope, options), clock)
}

fn settle(viewer: &mut Viewer, clock: &ManualClock) {
    clock.advance(Duration::from_millis(250));
    viewer.tick();
}

#[test]
fn selects_the_nearest_sample() {
    let (mut v, _) = viewer();
    assert_eq!(v.select_at_ratio(0.34), Some(3));
    assert_eq!(v.selected_index(), Some(3));
    assert_eq!(v.info_box().index(), Some(3));
    assert!(v.info_box().is_shown());

    let data = v.graph().data().clone();
    let zoomed = NavigationScope::for_window(&data, v.graph().visibility(), 0.5, 1.0);
    v.set_navigation_scope(zoomed);
    assert_eq!(v.select_at_ratio(0.5), Some(8));
}

#[test]
fn out_of_range_selection_is_ignored() {
    let (mut v, _) = viewer();
    v.select_at_ratio(0.5);
    assert_eq!(v.select_at_ratio(1.2), None);
    assert_eq!(v.select_at_ratio(-0.2), None);
    assert_eq!(v.selected_index(), Some(5));
}

#[test]
fn reselecting_the_same_index_keeps_placement() {
    let (mut v, _) = viewer();
    v.select_at_ratio(0.2);
    assert_eq!(v.info_box().placement(), InfoPlacement::Left(21));
    // 0.22 still rounds to index 2
    assert_eq!(v.select_at_ratio(0.22), Some(2));
    assert_eq!(v.info_box().placement(), InfoPlacement::Left(21));

    v.select_at_ratio(0.7);
    assert_eq!(v.info_box().placement(), InfoPlacement::Right(31));
}

#[test]
fn deselect_hides_everything() {
    let (mut v, _) = viewer();
    v.select_at_ratio(0.5);
    v.deselect();
    assert_eq!(v.selected_index(), None);
    assert!(!v.info_box().is_shown());
    assert_eq!(v.info_box().date_title(), None);
    assert!(v.info_box().entries().is_empty());
}

#[test]
fn info_box_lists_every_series() {
    let (mut v, _) = viewer();
    v.select_at_ratio(0.3);
    let info = v.info_box();
    assert_eq!(info.date_title().as_deref(), Some("Wed, Mar 13"));

    let entries = info.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!((entries[0].key.as_str(), entries[0].value), ("up", Some(30.0)));
    assert_eq!((entries[1].key.as_str(), entries[1].value), ("flat", None));
    assert!(entries.iter().all(|e| e.visible));

    let data = v.graph().data().clone();
    v.set_visibility_map(VisibilityMap::all_visible(&data).with("flat", false));
    let entries = v.info_box().entries();
    assert!(entries[0].visible);
    assert!(!entries[1].visible);
}

#[test]
fn info_box_follows_the_window() {
    let (mut v, _) = viewer();
    v.select_at_ratio(0.2);
    let data = v.graph().data().clone();
    v.set_navigation_scope(NavigationScope::for_window(&data, v.graph().visibility(), 0.0, 0.5));
    // index 2 now sits at 40% of the window
    assert_eq!(v.info_box().placement(), InfoPlacement::Left(41));
    assert_eq!(v.selected_index(), Some(2));
}

#[test]
fn mouse_selects_only_while_pressed() {
    let (mut v, _) = viewer();
    assert_eq!(v.pointer_move(Pointer::mouse(40.0)), None);
    assert_eq!(v.selected_index(), None);

    assert_eq!(v.pointer_down(Pointer::mouse(34.0)), Some(3));
    assert_eq!(v.pointer_move(Pointer::mouse(71.0)), Some(7));
    v.pointer_up();
    assert_eq!(v.pointer_move(Pointer::mouse(10.0)), None);
    assert_eq!(v.selected_index(), Some(7));
}

#[test]
fn touch_selects_on_single_finger_moves() {
    let (mut v, _) = viewer();
    assert_eq!(v.pointer_move(Pointer::touch(20.0)), Some(2));
    assert_eq!(v.pointer_move(Pointer::Touch { x: 90.0, touches: 2 }), None);
    assert_eq!(v.pointer_down(Pointer::Touch { x: 90.0, touches: 3 }), None);
    assert_eq!(v.selected_index(), Some(2));
}

#[test]
fn destroyed_viewer_ignores_selection() {
    let (mut v, _) = viewer();
    v.graph_mut().destroy();
    assert_eq!(v.select_at_ratio(0.5), None);
    assert!(!v.tick());
}

#[test]
fn gridlines_cross_fade_on_zoom() {
    let (mut v, clock) = viewer();
    assert_eq!(v.graph().pipeline().current_y_hash(), Some("0/20/40/60/80/100"));
    assert_eq!(v.graph().pipeline().y_layers().count(), 1);

    let data = v.graph().data().clone();
    v.set_navigation_scope(NavigationScope::for_window(&data, v.graph().visibility(), 0.0, 0.5));
    assert_eq!(v.graph().pipeline().current_y_hash(), Some("0/10/20/30/40/50"));

    clock.advance(Duration::from_millis(100));
    assert!(v.tick());
    let layers: Vec<_> = v.graph().pipeline().y_layers().map(|(h, l)| (h.to_string(), l.opacity)).collect();
    assert_eq!(layers.len(), 2);
    for (_, opacity) in &layers {
        assert!(*opacity > 0.0 && *opacity < 1.0);
    }

    settle(&mut v, &clock);
    let pipeline = v.graph().pipeline();
    let layers: Vec<_> = pipeline.y_layers().collect();
    assert_eq!(layers.len(), 1);
    let (hash, layer) = layers[0];
    assert_eq!(hash, "0/10/20/30/40/50");
    assert_eq!(layer.opacity, 1.0);
    let plot = v.graph().geometry().plot_height();
    assert_eq!(layer.scope, GraphScope::from_bounds(Some(0.0), Some(50.0), plot));
}

#[test]
fn returning_to_known_gridlines_reuses_the_layer() {
    let (mut v, clock) = viewer();
    let data = v.graph().data().clone();
    let vis = v.graph().visibility().clone();

    v.set_navigation_scope(NavigationScope::for_window(&data, &vis, 0.0, 0.5));
    clock.advance(Duration::from_millis(60));
    v.tick();
    // reverse mid-way: the outgoing set is still a live layer
    v.set_navigation_scope(NavigationScope::for_window(&data, &vis, 0.0, 1.0));
    assert_eq!(v.graph().pipeline().current_y_hash(), Some("0/20/40/60/80/100"));

    settle(&mut v, &clock);
    let hashes: Vec<_> = v.graph().pipeline().y_layers().map(|(h, _)| h.to_string()).collect();
    assert_eq!(hashes, vec!["0/20/40/60/80/100".to_string()]);
}

#[test]
fn date_density_fades_in_and_out() {
    let (mut v, clock) = viewer();
    assert_eq!(v.graph().pipeline().x_modulus(), 8);
    let data = v.graph().data().clone();
    let vis = v.graph().visibility().clone();

    // zoom in: every 4th date joins, starting hidden
    v.set_navigation_scope(NavigationScope::for_window(&data, &vis, 0.0, 0.5));
    assert_eq!(v.graph().pipeline().x_modulus(), 4);
    clock.advance(Duration::from_millis(100));
    v.tick();
    let mods: Vec<_> = v.graph().pipeline().x_opacities().collect();
    assert_eq!(mods.len(), 2);
    assert_eq!(mods[1], (8, 1.0));
    assert!(mods[0].0 == 4 && mods[0].1 > 0.0 && mods[0].1 < 1.0);

    settle(&mut v, &clock);
    let mods: Vec<_> = v.graph().pipeline().x_opacities().collect();
    assert_eq!(mods, vec![(4, 1.0), (8, 1.0)]);

    // zoom out: the finer density fades away and is dropped
    v.set_navigation_scope(NavigationScope::for_window(&data, &vis, 0.0, 1.0));
    settle(&mut v, &clock);
    let mods: Vec<_> = v.graph().pipeline().x_opacities().collect();
    assert_eq!(mods, vec![(8, 1.0)]);
}

#[test]
fn hidden_series_gridlines_stay_put() {
    let (mut v, clock) = viewer();
    let data = v.graph().data().clone();
    let none = VisibilityMap::all_visible(&data).with("up", false).with("flat", false);

    v.set_visibility_map(none.clone());
    v.set_navigation_scope(NavigationScope::for_window(&data, &none, 0.0, 1.0));
    settle(&mut v, &clock);
    // no visible series: the last set stays current and keeps its scale
    assert_eq!(v.graph().pipeline().current_y_hash(), Some("0/20/40/60/80/100"));
    let plot = v.graph().geometry().plot_height();
    for (_, layer) in v.graph().pipeline().y_layers() {
        assert_eq!(layer.scope, GraphScope::from_bounds(Some(0.0), Some(100.0), plot));
    }
}

#[test]
fn gridlines_fade_back_after_everything_was_hidden() {
    let (mut v, clock) = viewer();
    let data = v.graph().data().clone();
    let none = VisibilityMap::all_visible(&data).with("up", false).with("flat", false);
    v.set_visibility_map(none.clone());
    v.set_navigation_scope(NavigationScope::for_window(&data, &none, 0.0, 1.0));
    settle(&mut v, &clock);

    // a series with a different range comes back
    let flat = none.with("flat", true);
    v.set_visibility_map(flat.clone());
    v.set_navigation_scope(NavigationScope::for_window(&data, &flat, 0.0, 1.0));
    assert_eq!(v.graph().pipeline().current_y_hash(), Some("7/7/7/7/7/7"));
    let shown: Vec<_> = v.graph().pipeline().y_layers().filter(|(_, l)| l.opacity > 0.0).map(|(h, _)| h.to_string()).collect();
    assert_eq!(shown, vec!["0/20/40/60/80/100".to_string()]);

    clock.advance(Duration::from_millis(100));
    v.tick();
    let layers: Vec<_> = v.graph().pipeline().y_layers().map(|(_, l)| l.opacity).collect();
    assert_eq!(layers.len(), 2);
    assert!(layers.iter().all(|o| *o > 0.0 && *o < 1.0));

    settle(&mut v, &clock);
    let hashes: Vec<_> = v.graph().pipeline().y_layers().map(|(h, _)| h.to_string()).collect();
    assert_eq!(hashes, vec!["7/7/7/7/7/7".to_string()]);
}

#[test]
fn labelled_frame_renders() {
    let data = data();
    let clock = Rc::new(ManualClock::new());
    let options = ViewerOptions {
        graph: GraphOptions { width: 100.0, height: 50.0, clock: clock.clone(), ..ViewerOptions::default().graph },
        crosshair: CrosshairOptions { width: 100.0, ..CrosshairOptions::default() },
    };
    let visibility = VisibilityMap::all_visible(&data);
    let scope = NavigationScope::for_window(&data, &visibility, 0.0, 1.0);
    let mut v = Viewer::new(data.clone(), visibility.clone(), scope, options);
    v.surface_element().unwrap();
    v.set_navigation_scope(NavigationScope::for_window(&data, &visibility, 0.0, 0.5));
    clock.advance(Duration::from_millis(100));
    assert!(v.tick());
    v.select_at_ratio(0.5);
    let rgba = v.graph_mut().read_rgba8().unwrap();
    assert_eq!(rgba.len(), 100 * 50 * 4);
}
