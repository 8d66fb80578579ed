// File: crates/chart-core/src/error.rs
// Summary: Error types for dataset preparation and surface management.

use thiserror::Error;

/// Why a raw dataset could not be turned into [`crate::ChartData`].
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset has no column types")]
    MissingTypes,
    #[error("dataset has no columns")]
    NoColumns,
    #[error("dataset has no x column")]
    MissingXColumn,
    #[error("dataset has no line columns")]
    NoLines,
    #[error("column {index} does not start with a string key")]
    ColumnKey { index: usize },
    #[error("column '{key}' has a non-numeric sample at index {index}")]
    InvalidValue { key: String, index: usize },
    #[error("column '{key}' has {actual} samples, expected {expected}")]
    LengthMismatch { key: String, expected: usize, actual: usize },
    #[error("malformed dataset json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to create a {width}x{height} raster surface")]
    SurfaceUnavailable { width: i32, height: i32 },
    #[error("surface has been destroyed")]
    Destroyed,
    #[error("PNG encoding failed")]
    Encode,
    #[error("reading surface pixels failed")]
    ReadPixels,
    #[error(transparent)]
    Data(#[from] DataError),
}
