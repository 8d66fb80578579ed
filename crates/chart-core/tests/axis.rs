// File: crates/chart-core/tests/axis.rs
// Purpose: Y gridline generation, X date labels, content hashes and cache reuse.

use std::rc::Rc;

use scopechart_core::axis::{AxisGenerator, AxisXGenerator, AxisYGenerator, LabelCache};
use scopechart_core::{ChartData, NavigationScope, Series};
use skia_safe as skia;

fn scope(min_slice: Option<f64>, max_slice: Option<f64>, min_x: f64, max_x: f64) -> NavigationScope {
    NavigationScope {
        min_x_ratio: min_x,
        max_x_ratio: max_x,
        min_value: min_slice,
        max_value: max_slice,
        min_value_slice: min_slice,
        max_value_slice: max_slice,
    }
}

fn daily(n: usize) -> ChartData {
    let day = 86_400_000i64;
    let x: Vec<i64> = (0..n as i64).map(|i| 1552176000000 + i * day).collect();
    let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
    ChartData::new(x, vec![Series::from_values("a", "A", skia::Color::from_argb(255, 1, 2, 3), &values)]).unwrap()
}

#[test]
fn y_labels_split_the_slice_evenly() {
    let mut gen = AxisYGenerator::new(6);
    gen.set_visible_range(&scope(Some(0.0), Some(95.0), 0.0, 1.0));
    let set = gen.label_set().unwrap();
    let positions: Vec<f64> = set.labels.iter().map(|l| l.position).collect();
    assert_eq!(positions, vec![0.0, 19.0, 38.0, 57.0, 76.0, 95.0]);
    assert_eq!(&*set.hash, "0/19/38/57/76/95");
    assert_eq!(set.labels[1].title, "19");
}

#[test]
fn y_labels_use_nice_values_and_short_titles() {
    let mut gen = AxisYGenerator::new(6);
    gen.set_visible_range(&scope(Some(0.0), Some(3_240_000.0), 0.0, 1.0));
    let labels = gen.labels().unwrap();
    let titles: Vec<&str> = labels.iter().map(|l| l.title.as_str()).collect();
    // each step is floored to two leading digits
    assert_eq!(labels[2].position, 1_200_000.0);
    assert_eq!(titles, vec!["0", "640 k", "1.2 m", "1.9 m", "2.5 m", "3.2 m"]);
}

#[test]
fn y_labels_absent_without_bounds() {
    let mut gen = AxisYGenerator::new(6);
    gen.set_visible_range(&scope(None, None, 0.0, 1.0));
    assert!(gen.label_set().is_none());
    assert!(gen.content_hash().is_none());
    gen.set_visible_range(&scope(Some(0.0), None, 0.0, 1.0));
    assert!(gen.labels().is_none());
}

#[test]
fn y_cache_survives_horizontal_moves() {
    let mut gen = AxisYGenerator::new(6);
    gen.set_visible_range(&scope(Some(0.0), Some(50.0), 0.0, 1.0));
    let first = gen.labels().unwrap();

    // same vertical slice, different window
    gen.set_visible_range(&scope(Some(0.0), Some(50.0), 0.2, 0.6));
    let second = gen.labels().unwrap();
    assert!(Rc::ptr_eq(&first, &second));

    gen.set_visible_range(&scope(Some(0.0), Some(80.0), 0.2, 0.6));
    let third = gen.label_set().unwrap();
    assert!(!Rc::ptr_eq(&first, &third.labels));
    assert_eq!(&*third.hash, "0/16/32/48/64/80");
}

#[test]
fn fractional_steps_are_kept() {
    let mut gen = AxisYGenerator::new(6);
    gen.set_visible_range(&scope(Some(0.0), Some(2.5), 0.0, 1.0));
    let labels = gen.labels().unwrap();
    assert_eq!(labels.last().unwrap().position, 2.5);
    assert_eq!(labels[1].position, 0.5);
}

#[test]
fn fractional_positions_are_clean() {
    let mut gen = AxisYGenerator::new(6);
    gen.set_visible_range(&scope(Some(0.0), Some(1.0), 0.0, 1.0));
    let titles: Vec<_> = gen.labels().unwrap().iter().map(|l| l.title.clone()).collect();
    assert_eq!(titles, ["0", "0.2", "0.4", "0.6", "0.8", "1"]);
    assert_eq!(gen.content_hash().as_deref(), Some("0/0.2/0.4/0.6/0.8/1"));

    gen.set_visible_range(&scope(Some(0.1), Some(0.4), 0.0, 1.0));
    let titles: Vec<_> = gen.labels().unwrap().iter().map(|l| l.title.clone()).collect();
    assert_eq!(titles, ["0.1", "0.16", "0.22", "0.28", "0.34", "0.4"]);
}

#[test]
fn x_labels_one_per_sample() {
    let data = daily(10);
    let mut gen = AxisXGenerator::new(&data, 160.0, 80.0);
    let labels = gen.labels().unwrap();
    assert_eq!(labels.len(), 10);
    assert_eq!(labels[0].title, "Mar 10");
    assert_eq!(labels[3].title, "Mar 13");
    assert_eq!(labels[3].position, 3.0);
    assert_eq!(gen.title(9), Some("Mar 19"));
}

#[test]
fn x_density_follows_zoom() {
    let data = daily(10);
    // two titles fit; 9 index steps over the full range need stride 8
    let mut gen = AxisXGenerator::new(&data, 160.0, 80.0);
    gen.set_visible_range(&scope(Some(0.0), Some(9.0), 0.0, 1.0));
    assert_eq!(gen.modulus(), 8);
    assert_eq!(gen.content_hash().as_deref(), Some("0/8"));

    gen.set_visible_range(&scope(Some(0.0), Some(9.0), 0.0, 0.5));
    assert_eq!(gen.modulus(), 4);
    assert_eq!(gen.content_hash().as_deref(), Some("0/4/8"));

    // label titles do not depend on the window
    assert_eq!(gen.labels().unwrap().len(), 10);
}

#[test]
fn label_cache_checks_its_key() {
    let mut cache: LabelCache<u32, &str> = LabelCache::Stale;
    assert!(cache.get(&1).is_none());
    cache.store(1, "one");
    assert_eq!(cache.get(&1), Some(&"one"));
    assert!(cache.get(&2).is_none());
    assert!(cache.is_fresh());
    cache.invalidate();
    assert!(!cache.is_fresh());
}
