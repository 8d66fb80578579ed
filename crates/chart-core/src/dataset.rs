// File: crates/chart-core/src/dataset.rs
// Summary: Shared chart dataset plus conversion from the raw `{columns, types, names, colors}` JSON.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use skia_safe as skia;

use crate::error::DataError;
use crate::math::{null_safe_max, null_safe_min};
use crate::series::Series;
use crate::theme::parse_hex_color;

/// Name given to lines the raw data does not name.
pub const UNNAMED: &str = "unnamed";

/// Colors handed out, in column order, to lines without a usable color.
const PALETTE: [(u8, u8, u8); 8] = [
    (0x3c, 0xc2, 0x3f),
    (0xf3, 0x4c, 0x44),
    (0x39, 0x7e, 0xd7),
    (0xf0, 0xa0, 0x2c),
    (0x8e, 0x5c, 0xd0),
    (0x2a, 0xb5, 0xb0),
    (0xd9, 0x4f, 0x9c),
    (0x7f, 0x8c, 0x96),
];

fn palette_color(i: usize) -> skia::Color {
    let (r, g, b) = PALETTE[i % PALETTE.len()];
    skia::Color::from_argb(255, r, g, b)
}

/// Dataset shared by every component. Never mutated after construction.
#[derive(Clone, Debug)]
pub struct ChartData {
    /// Timestamps in milliseconds since the Unix epoch.
    pub x: Vec<i64>,
    pub lines: Vec<Series>,
    pub length: usize,
    /// `length - 1`, saturating at 0.
    pub max_index: usize,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl ChartData {
    pub fn new(x: Vec<i64>, lines: Vec<Series>) -> Result<Self, DataError> {
        let length = x.len();
        for line in &lines {
            if line.len() != length {
                return Err(DataError::LengthMismatch { key: line.key.clone(), expected: length, actual: line.len() });
            }
        }
        let (min_value, max_value) = lines.iter().fold((None, None), |(lo, hi), l| {
            (null_safe_min(lo, l.min_value), null_safe_max(hi, l.max_value))
        });
        Ok(Self { x, lines, length, max_index: length.saturating_sub(1), min_value, max_value })
    }

    pub fn line(&self, key: &str) -> Option<&Series> {
        self.lines.iter().find(|l| l.key == key)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let raw: RawChartData = serde_json::from_str(json)?;
        prepare_chart_data(&raw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    X,
    Line,
    #[serde(other)]
    Other,
}

/// Raw dataset as produced by the upstream feed. Every column starts with its key.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawChartData {
    #[serde(default)]
    pub columns: Vec<Vec<Value>>,
    #[serde(default)]
    pub types: Option<HashMap<String, ColumnType>>,
    #[serde(default)]
    pub names: HashMap<String, String>,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

pub fn prepare_chart_data(raw: &RawChartData) -> Result<ChartData, DataError> {
    let types = match &raw.types {
        Some(t) if !t.is_empty() => t,
        _ => return Err(DataError::MissingTypes),
    };
    if raw.columns.is_empty() {
        return Err(DataError::NoColumns);
    }

    let mut x: Option<Vec<i64>> = None;
    let mut lines = Vec::new();
    for (index, column) in raw.columns.iter().enumerate() {
        let key = match column.first() {
            Some(Value::String(k)) => k.as_str(),
            _ => return Err(DataError::ColumnKey { index }),
        };
        let samples = &column[1..];
        match types.get(key) {
            Some(ColumnType::X) => {
                // first x column wins
                if x.is_none() {
                    let stamps = samples
                        .iter()
                        .enumerate()
                        .map(|(i, v)| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
                            .ok_or_else(|| DataError::InvalidValue { key: key.to_string(), index: i }))
                        .collect::<Result<Vec<_>, _>>()?;
                    x = Some(stamps);
                }
            }
            Some(ColumnType::Line) => {
                let values = samples
                    .iter()
                    .enumerate()
                    .map(|(i, v)| match v {
                        Value::Null => Ok(None),
                        v => v.as_f64().map(Some)
                            .ok_or_else(|| DataError::InvalidValue { key: key.to_string(), index: i }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let name = raw.names.get(key).cloned().unwrap_or_else(|| UNNAMED.to_string());
                let color = raw
                    .colors
                    .get(key)
                    .and_then(|c| parse_hex_color(c))
                    .unwrap_or_else(|| palette_color(lines.len()));
                lines.push(Series::new(key, name, color, values));
            }
            Some(ColumnType::Other) | None => {}
        }
    }

    let x = x.ok_or(DataError::MissingXColumn)?;
    if lines.is_empty() {
        return Err(DataError::NoLines);
    }
    let data = ChartData::new(x, lines)?;
    tracing::debug!(lines = data.lines.len(), length = data.length, "prepared chart data");
    Ok(data)
}

/// Parse an array of raw datasets. Each entry is converted on its own so one
/// malformed chart does not hide the others.
pub fn charts_from_json_str(json: &str) -> Result<Vec<Result<ChartData, DataError>>, DataError> {
    let raws: Vec<RawChartData> = serde_json::from_str(json)?;
    Ok(raws.iter().map(prepare_chart_data).collect())
}
