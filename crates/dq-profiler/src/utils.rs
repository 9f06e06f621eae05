//! Shared utilities for the profiling pipeline.
//!
//! This module contains the dtype classification used for dispatch and the
//! helpers that pull plain Rust values out of polars columns.

use crate::types::ColumnKind;
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Underlying cell type of a column as loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    /// Integer or floating point numbers
    Numeric,
    /// String/text type
    String,
    /// Boolean type
    Boolean,
    /// Date or datetime types
    Timestamp,
    /// Column with no typed values at all
    Null,
    /// Anything else polars can hold (lists, structs, binary, time of day)
    Other,
}

impl From<CellType> for ColumnKind {
    fn from(cell_type: CellType) -> Self {
        match cell_type {
            CellType::Numeric => ColumnKind::Numeric,
            CellType::String => ColumnKind::String,
            CellType::Timestamp => ColumnKind::Timestamp,
            CellType::Boolean | CellType::Null | CellType::Other => ColumnKind::Other,
        }
    }
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType holds calendar dates or timestamps.
#[inline]
pub fn is_timestamp_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Datetime(_, _) | DataType::Date)
}

/// Check if a DataType holds text.
#[inline]
pub fn is_string_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

/// Get the cell type of a DataType.
pub fn cell_type(dtype: &DataType) -> CellType {
    if is_numeric_dtype(dtype) {
        CellType::Numeric
    } else if is_string_dtype(dtype) {
        CellType::String
    } else if is_timestamp_dtype(dtype) {
        CellType::Timestamp
    } else if matches!(dtype, DataType::Boolean) {
        CellType::Boolean
    } else if matches!(dtype, DataType::Null) {
        CellType::Null
    } else {
        CellType::Other
    }
}

/// Resolve the analyzer tag for a Series.
pub fn column_kind(series: &Series) -> ColumnKind {
    cell_type(series.dtype()).into()
}

// =============================================================================
// Value Extraction Utilities
// =============================================================================

/// Fraction of null cells, 0 for an empty column.
pub fn null_fraction(series: &Series) -> f64 {
    if series.is_empty() {
        0.0
    } else {
        series.null_count() as f64 / series.len() as f64
    }
}

/// Stringify the first `limit` non-null values, in row order.
pub fn leading_non_null_strings(series: &Series, limit: usize) -> PolarsResult<Vec<String>> {
    let as_string = series.cast(&DataType::String)?;
    Ok(as_string
        .str()?
        .into_iter()
        .flatten()
        .take(limit)
        .map(str::to_owned)
        .collect())
}

/// Stringify every non-null value, in row order.
pub fn non_null_strings(series: &Series) -> PolarsResult<Vec<String>> {
    leading_non_null_strings(series, usize::MAX)
}

/// Non-null numeric values as `f64`, NaN and infinite values skipped.
pub fn finite_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect())
}

/// Non-null timestamps of a `Datetime` or `Date` column, in row order.
pub fn timestamp_values(series: &Series) -> PolarsResult<Vec<NaiveDateTime>> {
    let millis = series
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        .cast(&DataType::Int64)?;
    Ok(millis
        .i64()?
        .into_iter()
        .flatten()
        .filter_map(|ms| DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc()))
        .collect())
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
