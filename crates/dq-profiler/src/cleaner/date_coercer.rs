//! Conversion of detected date columns to datetime.

use super::converters::string_to_datetime;
use crate::error::ProfilingError;
use crate::types::DateConfidence;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Applies date-detection verdicts to a table.
pub struct DateCoercer;

impl DateCoercer {
    /// Convert every column flagged `should_convert` to datetime.
    ///
    /// The input table is left untouched; the converted columns live in the
    /// returned copy. A column that cannot be converted as a whole keeps its
    /// original values and is left out of the converted list.
    pub fn coerce(
        &self,
        df: &DataFrame,
        detections: &BTreeMap<String, DateConfidence>,
    ) -> (DataFrame, Vec<String>) {
        let mut coerced = df.clone();
        let mut converted = Vec::new();

        // Walk the table's own column order so the converted list is stable.
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        for name in names {
            let Some(verdict) = detections.get(&name) else {
                continue;
            };
            if !verdict.should_convert {
                continue;
            }

            match self.coerce_single_column(&mut coerced, &name) {
                Ok(()) => {
                    debug!("Converted '{}' to datetime", name);
                    converted.push(name);
                }
                Err(e) => {
                    let err = ProfilingError::CoercionFailed {
                        column: name,
                        reason: format!("{:#}", e),
                    };
                    warn!("{}; keeping original values", err);
                }
            }
        }

        (coerced, converted)
    }

    fn coerce_single_column(&self, df: &mut DataFrame, name: &str) -> Result<()> {
        let col = df
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?;
        let series = col.as_materialized_series();

        let original_non_null = series.len() - series.null_count();
        let converted = string_to_datetime(series)?;
        let converted_non_null = converted.len() - converted.null_count();

        debug!(
            "  '{}': parsed {}/{} values as dates",
            name, converted_non_null, original_non_null
        );

        df.replace(name, converted)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_timestamp_dtype;

    fn verdict(should_convert: bool) -> DateConfidence {
        DateConfidence {
            confidence: if should_convert { 1.0 } else { 0.3 },
            should_convert,
        }
    }

    #[test]
    fn test_coerce_converts_flagged_columns() {
        let df = df![
            "created_at" => ["2023-01-15", "2023-02-20", "bad", "2023-03-01"],
            "label" => ["a", "b", "c", "d"],
        ]
        .unwrap();
        let detections = BTreeMap::from([
            ("created_at".to_string(), verdict(true)),
            ("label".to_string(), verdict(false)),
        ]);

        let (coerced, converted) = DateCoercer.coerce(&df, &detections);

        assert_eq!(converted, vec!["created_at".to_string()]);
        let created = coerced.column("created_at").unwrap();
        assert!(is_timestamp_dtype(created.dtype()));
        assert_eq!(created.null_count(), 1);
        assert_eq!(coerced.column("label").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_coerce_leaves_input_untouched() {
        let df = df![
            "date" => ["2023-01-15", "2023-02-20"],
        ]
        .unwrap();
        let detections = BTreeMap::from([("date".to_string(), verdict(true))]);

        let (coerced, _) = DateCoercer.coerce(&df, &detections);

        assert_eq!(df.column("date").unwrap().dtype(), &DataType::String);
        assert!(is_timestamp_dtype(coerced.column("date").unwrap().dtype()));
    }

    #[test]
    fn test_coerce_failure_keeps_original_column() {
        // A verdict pointing at a numeric column cannot be applied.
        let df = df![
            "year" => [2020i64, 2021],
        ]
        .unwrap();
        let detections = BTreeMap::from([("year".to_string(), verdict(true))]);

        let (coerced, converted) = DateCoercer.coerce(&df, &detections);

        assert!(converted.is_empty());
        assert_eq!(coerced.column("year").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_coerce_ignores_unknown_columns() {
        let df = df![
            "a" => ["x"],
        ]
        .unwrap();
        let detections = BTreeMap::from([("missing".to_string(), verdict(true))]);

        let (coerced, converted) = DateCoercer.coerce(&df, &detections);

        assert!(converted.is_empty());
        assert_eq!(coerced.width(), 1);
    }

    #[test]
    fn test_coerce_preserves_column_order() {
        let df = df![
            "updated" => ["2023-01-01"],
            "name" => ["n"],
            "created" => ["2023-01-02"],
        ]
        .unwrap();
        let detections = BTreeMap::from([
            ("updated".to_string(), verdict(true)),
            ("created".to_string(), verdict(true)),
        ]);

        let (coerced, converted) = DateCoercer.coerce(&df, &detections);

        assert_eq!(converted, vec!["updated".to_string(), "created".to_string()]);
        let names: Vec<String> = coerced
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["updated", "name", "created"]);
    }
}
