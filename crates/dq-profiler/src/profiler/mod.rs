//! Column profiling.
//!
//! Every column gets the common counts (type label, nulls, distinct values).
//! On top of that, one analyzer runs depending on the column's kind:
//! - numeric columns get range and moment statistics
//! - text columns get length and shape statistics plus top values
//! - timestamp columns get their range and calendar distributions
//!
//! Columns with no usable values only carry the common counts.

mod statistics;
mod strings;
mod temporal;

use crate::error::{ProfilingError, Result};
use crate::types::{ColumnExtension, ColumnKind, ColumnProfile};
use crate::utils::{column_kind, finite_values, non_null_strings, percentage, timestamp_values};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

pub(crate) use statistics::numeric_stats;
pub(crate) use strings::string_stats;
pub(crate) use temporal::temporal_stats;

/// Per-column profiler.
#[derive(Debug, Clone, Copy)]
pub struct ColumnProfiler {
    top_values_limit: usize,
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ColumnProfiler {
    /// Create a profiler reporting up to `top_values_limit` frequent values
    /// for text columns.
    pub fn new(top_values_limit: usize) -> Self {
        Self { top_values_limit }
    }

    /// Profile every column of the table, keyed by column name.
    pub fn profile_all(&self, df: &DataFrame) -> Result<BTreeMap<String, ColumnProfile>> {
        let mut profiles = BTreeMap::new();
        for col_name in df.get_column_names() {
            let profile = self.profile_column(df, col_name)?;
            profiles.insert(col_name.to_string(), profile);
        }
        Ok(profiles)
    }

    /// Profile a single column.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilingError::ColumnNotFound`] if the table has no column
    /// named `col_name`.
    pub fn profile_column(&self, df: &DataFrame, col_name: &str) -> Result<ColumnProfile> {
        let col = df
            .column(col_name)
            .map_err(|_| ProfilingError::ColumnNotFound(col_name.to_string()))?;
        let series = col.as_materialized_series();

        let kind = column_kind(series);
        let null_count = series.null_count();
        let unique_values = series.drop_nulls().n_unique()?;

        debug!("Profiling '{}' as {:?} ({})", col_name, kind, series.dtype());

        let extension = match kind {
            ColumnKind::Numeric => {
                numeric_stats(&finite_values(series)?).map(ColumnExtension::Numeric)
            }
            ColumnKind::String => string_stats(&non_null_strings(series)?, self.top_values_limit)
                .map(ColumnExtension::String),
            ColumnKind::Timestamp => {
                temporal_stats(&timestamp_values(series)?).map(ColumnExtension::Temporal)
            }
            ColumnKind::Other => None,
        };

        Ok(ColumnProfile {
            data_type: series.dtype().to_string(),
            kind,
            null_count,
            null_percentage: percentage(null_count, series.len()),
            unique_values,
            extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_profile_numeric_column() {
        let df = df![
            "amount" => [Some(10.0), Some(-5.0), Some(0.0), None, Some(0.0)],
        ]
        .unwrap();

        let profile = ColumnProfiler::default().profile_column(&df, "amount").unwrap();

        assert_eq!(profile.kind, ColumnKind::Numeric);
        assert_eq!(profile.null_count, 1);
        assert_eq!(profile.null_percentage, 20.0);
        assert_eq!(profile.unique_values, 3);

        let stats = profile.numeric().unwrap();
        assert_eq!(stats.min, -5.0);
        assert_eq!(stats.max, 10.0);
        assert_eq!(stats.mean, 1.25);
        assert_eq!(stats.median, 0.0);
        assert_eq!(stats.zeroes_count, 2);
        assert_eq!(stats.negative_count, 1);
    }

    #[test]
    fn test_profile_large_magnitudes_serialize_as_numbers() {
        let df = df![
            "x" => [1e200f64, -1e200],
        ]
        .unwrap();

        let profile = ColumnProfiler::default().profile_column(&df, "x").unwrap();
        let stats = profile.numeric().unwrap();
        assert!(stats.std.is_finite());
        assert_eq!(stats.mean, 0.0);

        // serde_json writes non-finite floats as null
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json["std"].is_f64());
        assert!(json["mean"].is_f64());
    }

    #[test]
    fn test_profile_integer_column_label() {
        let df = df![
            "count" => [1i64, 2, 3],
        ]
        .unwrap();

        let profile = ColumnProfiler::default().profile_column(&df, "count").unwrap();

        assert_eq!(profile.data_type, "i64");
        assert_eq!(profile.numeric().unwrap().mean, 2.0);
    }

    #[test]
    fn test_profile_string_column() {
        let df = df![
            "tags" => ["abc", "ABC123", "  lead", "trail  ", "a!b"],
        ]
        .unwrap();

        let profile = ColumnProfiler::default().profile_column(&df, "tags").unwrap();

        assert_eq!(profile.kind, ColumnKind::String);
        assert_eq!(profile.data_type, "str");
        let stats = profile.string().unwrap();
        assert_eq!(stats.alphabetic_strings, 1);
        assert_eq!(stats.with_special_characters, 1);
        assert_eq!(stats.top_values.len(), 5);
    }

    #[test]
    fn test_profile_respects_top_values_limit() {
        let df = df![
            "letters" => ["a", "b", "c", "a"],
        ]
        .unwrap();

        let profile = ColumnProfiler::new(1).profile_column(&df, "letters").unwrap();

        let top = &profile.string().unwrap().top_values;
        assert_eq!(top.len(), 1);
        assert_eq!(top.get("a"), Some(2));
    }

    #[test]
    fn test_profile_timestamp_column() {
        let mut df = df![
            "created_at" => [1_673_740_800_000i64, 1_677_628_800_000],
        ]
        .unwrap();
        let cast = df
            .column("created_at")
            .unwrap()
            .as_materialized_series()
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap();
        df.replace("created_at", cast).unwrap();

        let profile = ColumnProfiler::default().profile_column(&df, "created_at").unwrap();

        assert_eq!(profile.kind, ColumnKind::Timestamp);
        let stats = profile.temporal().unwrap();
        assert_eq!(stats.min_date, "2023-01-15 00:00:00");
        assert_eq!(stats.max_date, "2023-03-01 00:00:00");
        assert_eq!(stats.date_range_days, 45);
    }

    #[test]
    fn test_profile_boolean_column_has_common_stats_only() {
        let df = df![
            "flag" => [Some(true), Some(false), None],
        ]
        .unwrap();

        let profile = ColumnProfiler::default().profile_column(&df, "flag").unwrap();

        assert_eq!(profile.kind, ColumnKind::Other);
        assert_eq!(profile.unique_values, 2);
        assert!(profile.extension.is_none());
    }

    #[test]
    fn test_profile_all_null_column_has_no_extension() {
        let df = df![
            "empty" => [None::<f64>, None, None],
        ]
        .unwrap();

        let profile = ColumnProfiler::default().profile_column(&df, "empty").unwrap();

        assert_eq!(profile.null_count, 3);
        assert_eq!(profile.null_percentage, 100.0);
        assert_eq!(profile.unique_values, 0);
        assert!(profile.extension.is_none());
    }

    #[test]
    fn test_profile_zero_row_column() {
        let df = df![
            "a" => Vec::<i64>::new(),
        ]
        .unwrap();

        let profile = ColumnProfiler::default().profile_column(&df, "a").unwrap();

        assert_eq!(profile.null_percentage, 0.0);
        assert!(profile.extension.is_none());
    }

    #[test]
    fn test_profile_unknown_column() {
        let df = df![
            "a" => [1i64],
        ]
        .unwrap();

        let err = ColumnProfiler::default().profile_column(&df, "b").unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_profile_all_keys_every_column() {
        let df = df![
            "b" => [1i64, 2],
            "a" => ["x", "y"],
        ]
        .unwrap();

        let profiles = ColumnProfiler::default().profile_all(&df).unwrap();

        let keys: Vec<&String> = profiles.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
