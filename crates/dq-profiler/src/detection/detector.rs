//! Heuristic scoring of string columns that may hold dates.

use super::parsing::parse_sample;
use super::patterns::shape_match_ratio;
use crate::config::DateDetectionConfig;
use crate::types::DateConfidence;
use crate::utils::{CellType, cell_type, leading_non_null_strings, null_fraction, round_to};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Unrounded contribution of each signal for one column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct DateScore {
    pub name: f64,
    pub pattern: f64,
    pub conversion: f64,
}

impl DateScore {
    pub fn total(&self) -> f64 {
        self.name + self.pattern + self.conversion
    }
}

/// Scores string columns with a confidence that they hold dates.
#[derive(Debug, Clone, Default)]
pub struct DateColumnDetector {
    config: DateDetectionConfig,
}

impl DateColumnDetector {
    pub fn new(config: DateDetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DateDetectionConfig {
        &self.config
    }

    /// Score every eligible column of the table.
    ///
    /// Columns that are not text, or that are mostly null, are left out of
    /// the result. A column whose sample cannot be read is penalized rather
    /// than failing the whole detection.
    pub fn detect(&self, df: &DataFrame) -> BTreeMap<String, DateConfidence> {
        let mut detections = BTreeMap::new();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            if !self.is_eligible(series) {
                continue;
            }

            let score = self.score_column(series);
            let total = score.total();
            let verdict = DateConfidence {
                confidence: round_to(total, 2),
                should_convert: total >= self.config.threshold,
            };

            debug!(
                "Date score for '{}': name={:.2} pattern={:.2} conversion={:.2} total={:.2} convert={}",
                series.name(),
                score.name,
                score.pattern,
                score.conversion,
                total,
                verdict.should_convert
            );

            detections.insert(series.name().to_string(), verdict);
        }

        detections
    }

    fn is_eligible(&self, series: &Series) -> bool {
        matches!(cell_type(series.dtype()), CellType::String | CellType::Null)
            && null_fraction(series) <= self.config.max_null_fraction
    }

    pub(crate) fn score_column(&self, series: &Series) -> DateScore {
        let name = self.name_signal(series.name());

        let pattern = match leading_non_null_strings(series, self.config.pattern_sample_size) {
            Ok(sample) => shape_match_ratio(&sample) * self.config.pattern_weight,
            Err(e) => {
                warn!("Could not sample '{}' for date shapes: {}", series.name(), e);
                0.0
            }
        };

        let conversion = self.conversion_signal(
            series.name(),
            leading_non_null_strings(series, self.config.conversion_sample_size),
        );

        DateScore {
            name,
            pattern,
            conversion,
        }
    }

    pub(crate) fn name_signal(&self, column_name: &str) -> f64 {
        let lower = column_name.to_lowercase();
        let hits = self
            .config
            .keywords
            .iter()
            .filter(|keyword| lower.contains(keyword.to_lowercase().as_str()))
            .count();
        hits as f64 * self.config.name_weight
    }

    /// Trial-parse signal for a sample. A sample that could not be read
    /// costs `failure_penalty` instead.
    pub(crate) fn conversion_signal(
        &self,
        column_name: &str,
        sample: PolarsResult<Vec<String>>,
    ) -> f64 {
        let sample = match sample {
            Ok(sample) => sample,
            Err(e) => {
                warn!(
                    "Date parsing setup failed for '{}', applying penalty: {}",
                    column_name, e
                );
                return -self.config.failure_penalty;
            }
        };
        if sample.is_empty() {
            return 0.0;
        }

        let parsed = parse_sample(
            &sample,
            self.config.format_probe_size,
            &self.config.explicit_formats,
        );
        let success = parsed.iter().filter(|v| v.is_some()).count();
        success as f64 / sample.len() as f64 * self.config.conversion_weight
    }
}
