// File: crates/chart-core/tests/dataset.rs
// Purpose: Raw JSON conversion, dataset bounds, visibility-driven bounds and date titles.

use scopechart_core::date::{day_mon_date, mon_date};
use scopechart_core::view::{slice_bounds, visible_bounds};
use scopechart_core::{charts_from_json_str, ChartData, DataError, MinMax, NavigationScope, Series, VisibilityMap};
use skia_safe as skia;

const RAW: &str = r##"{
    "columns": [
        ["x", 1542412800000, 1542499200000, 1542585600000, 1542672000000],
        ["y0", 37, 20, null, 4],
        ["y1", 22, 12, 30, 40],
        ["y2", 1, 2, 3, 4]
    ],
    "types": {"x": "x", "y0": "line", "y1": "line", "y2": "bar"},
    "names": {"y0": "Joined"},
    "colors": {"y0": "#3DC23F", "y1": "not a color"}
}"##;

fn two_series() -> ChartData {
    let color = skia::Color::from_argb(255, 0, 0, 0);
    ChartData::new(
        vec![0, 1, 2],
        vec![
            Series::from_values("a", "A", color, &[10.0, 20.0, 30.0]),
            Series::from_values("b", "B", color, &[5.0, 15.0, 95.0]),
        ],
    )
    .unwrap()
}

#[test]
fn converts_raw_columns() {
    let data = ChartData::from_json_str(RAW).unwrap();
    assert_eq!(data.length, 4);
    assert_eq!(data.max_index, 3);
    assert_eq!(data.x[0], 1542412800000);
    // unknown column types are skipped
    assert_eq!(data.lines.len(), 2);

    let y0 = data.line("y0").unwrap();
    assert_eq!(y0.name, "Joined");
    assert_eq!(y0.color, skia::Color::from_argb(255, 0x3d, 0xc2, 0x3f));
    assert_eq!(y0.values, vec![Some(37.0), Some(20.0), None, Some(4.0)]);
    assert_eq!((y0.min_value, y0.max_value), (Some(4.0), Some(37.0)));

    let y1 = data.line("y1").unwrap();
    assert_eq!(y1.name, "unnamed");
    assert_eq!(y1.color.a(), 255);
    assert_eq!((data.min_value, data.max_value), (Some(4.0), Some(40.0)));
}

#[test]
fn palette_colors_are_deterministic() {
    let a = ChartData::from_json_str(RAW).unwrap();
    let b = ChartData::from_json_str(RAW).unwrap();
    assert_eq!(a.line("y1").unwrap().color, b.line("y1").unwrap().color);
}

#[test]
fn rejects_malformed_input() {
    let no_types = r#"{"columns": [["x", 1, 2], ["y0", 1, 2]]}"#;
    assert!(matches!(ChartData::from_json_str(no_types), Err(DataError::MissingTypes)));

    let no_columns = r#"{"columns": [], "types": {"x": "x"}}"#;
    assert!(matches!(ChartData::from_json_str(no_columns), Err(DataError::NoColumns)));

    let no_x = r#"{"columns": [["y0", 1, 2]], "types": {"y0": "line"}}"#;
    assert!(matches!(ChartData::from_json_str(no_x), Err(DataError::MissingXColumn)));

    let no_lines = r#"{"columns": [["x", 1, 2]], "types": {"x": "x"}}"#;
    assert!(matches!(ChartData::from_json_str(no_lines), Err(DataError::NoLines)));

    let short = r#"{"columns": [["x", 1, 2, 3], ["y0", 1, 2]], "types": {"x": "x", "y0": "line"}}"#;
    match ChartData::from_json_str(short) {
        Err(DataError::LengthMismatch { key, expected, actual }) => {
            assert_eq!((key.as_str(), expected, actual), ("y0", 3, 2));
        }
        other => panic!("unexpected {other:?}"),
    }

    let bad_value = r#"{"columns": [["x", 1, 2], ["y0", 1, "two"]], "types": {"x": "x", "y0": "line"}}"#;
    assert!(matches!(ChartData::from_json_str(bad_value), Err(DataError::InvalidValue { index: 1, .. })));

    assert!(matches!(ChartData::from_json_str("{"), Err(DataError::Json(_))));
}

#[test]
fn one_bad_chart_does_not_hide_the_others() {
    let json = format!(r#"[{RAW}, {{"columns": []}}, {RAW}]"#);
    let charts = charts_from_json_str(&json).unwrap();
    assert_eq!(charts.len(), 3);
    assert!(charts[0].is_ok());
    assert!(charts[1].is_err());
    assert!(charts[2].is_ok());
}

#[test]
fn misaligned_series_are_rejected() {
    let color = skia::Color::from_argb(255, 0, 0, 0);
    let err = ChartData::new(vec![0, 1, 2], vec![Series::from_values("a", "A", color, &[1.0, 2.0])]).unwrap_err();
    assert!(matches!(err, DataError::LengthMismatch { expected: 3, actual: 2, .. }));
}

#[test]
fn hiding_a_series_shrinks_the_bounds() {
    let data = two_series();
    assert_eq!((data.min_value, data.max_value), (Some(5.0), Some(95.0)));

    let all = VisibilityMap::all_visible(&data);
    assert_eq!(visible_bounds(&data, &all), MinMax::new(5.0, 95.0));

    let without_b = all.clone().with("b", false);
    assert_eq!(visible_bounds(&data, &without_b), MinMax::new(10.0, 30.0));

    let none = without_b.with("a", false);
    assert!(none.is_empty());
    assert!(visible_bounds(&data, &none).is_empty());
}

#[test]
fn slice_bounds_follow_the_window() {
    let data = two_series();
    let all = VisibilityMap::all_visible(&data);
    // ratios 0..0.5 cover indexes 0..=1
    assert_eq!(slice_bounds(&data, &all, 0.0, 0.5), MinMax::new(5.0, 20.0));
    let scope = NavigationScope::for_window(&data, &all, 0.5, 1.0);
    assert_eq!((scope.min_value_slice, scope.max_value_slice), (Some(15.0), Some(95.0)));
    assert_eq!((scope.min_value, scope.max_value), (Some(5.0), Some(95.0)));
}

#[test]
fn visibility_map_defaults() {
    let data = two_series();
    let map = VisibilityMap::all_visible(&data);
    assert!(map.is_visible("a"));
    assert!(!map.is_visible("missing"));
    assert!(!map.is_empty());
    assert_eq!(map.iter().count(), 2);
}

#[test]
fn formats_dates_in_utc() {
    assert_eq!(mon_date(466214400000), "Oct 10");
    assert_eq!(day_mon_date(466214400000), "Wed, Oct 10");
    assert_eq!(mon_date(410054400000), "Dec 30");
    assert_eq!(day_mon_date(410054400000), "Thu, Dec 30");
    assert_eq!(mon_date(1552176000000), "Mar 10");
    assert_eq!(day_mon_date(1552176000000), "Sun, Mar 10");
    assert_eq!(mon_date(1553385600000), "Mar 24");
    assert_eq!(day_mon_date(1553385600000), "Sun, Mar 24");
}
