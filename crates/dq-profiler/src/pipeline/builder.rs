//! Main profiling pipeline module.
//!
//! This module provides the core `ProfilingPipeline` struct and builder for
//! orchestrating a profiling run.

use crate::cleaner::DateCoercer;
use crate::config::ProfilerConfig;
use crate::detection::DateColumnDetector;
use crate::error::Result;
use crate::loader::{load_csv_from_bytes, load_csv_from_path};
use crate::profiler::ColumnProfiler;
use crate::quality::DatasetQualityAnalyzer;
use crate::types::{DateDetection, FileInfo, ProfileResult};
use polars::prelude::*;
use std::borrow::Cow;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// The main profiling pipeline.
///
/// Use [`ProfilingPipeline::builder()`] to create a pipeline with custom
/// configuration. A pipeline holds no per-run state, so one instance can
/// profile any number of tables, from any thread.
///
/// # Example
///
/// ```rust,ignore
/// use dq_profiler::{ProfilerConfig, ProfilingPipeline};
///
/// let result = ProfilingPipeline::builder()
///     .config(ProfilerConfig::builder().date_threshold(0.8).build()?)
///     .build()?
///     .profile_csv_path("data/orders.csv")?;
///
/// println!("{}", serde_json::to_string_pretty(&result)?);
/// ```
#[derive(Debug, Clone)]
pub struct ProfilingPipeline {
    config: ProfilerConfig,
    detector: DateColumnDetector,
    profiler: ColumnProfiler,
}

// Hosts may profile independent tables on different threads.
static_assertions::assert_impl_all!(ProfilingPipeline: Send, Sync);

impl Default for ProfilingPipeline {
    fn default() -> Self {
        Self::from_config(ProfilerConfig::default())
    }
}

impl ProfilingPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> ProfilingPipelineBuilder {
        ProfilingPipelineBuilder::default()
    }

    fn from_config(config: ProfilerConfig) -> Self {
        Self {
            detector: DateColumnDetector::new(config.date_detection.clone()),
            profiler: ColumnProfiler::new(config.top_values_limit),
            config,
        }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profile a table.
    ///
    /// The table is never modified. Detected date columns are converted on a
    /// copy, and both column profiles and quality metrics describe that copy.
    pub fn profile(&self, df: &DataFrame, filename: &str) -> Result<ProfileResult> {
        let start_time = Instant::now();
        info!(
            "Profiling '{}' ({} rows x {} columns)...",
            filename,
            df.height(),
            df.width()
        );

        info!("Step 1: Detecting date columns...");
        let detected_columns = self.detector.detect(df);
        debug!("  {} columns scored", detected_columns.len());

        let (coerced, converted_columns) = if self.config.convert_dates {
            info!("Step 2: Converting detected date columns...");
            let (coerced, converted) = DateCoercer.coerce(df, &detected_columns);
            (Cow::Owned(coerced), converted)
        } else {
            info!("Step 2: Skipping date conversion (disabled)");
            (Cow::Borrowed(df), Vec::new())
        };
        if !converted_columns.is_empty() {
            info!("  Converted: {}", converted_columns.join(", "));
        }

        info!("Step 3: Profiling columns...");
        let column_analysis = self.profiler.profile_all(&coerced)?;

        info!("Step 4: Summarizing data quality...");
        let data_quality = DatasetQualityAnalyzer::summarize(&coerced)?;

        let file_info = FileInfo {
            filename: filename.to_string(),
            rows: df.height(),
            columns: df.width(),
            column_names: df
                .get_column_names()
                .into_iter()
                .map(|name| name.to_string())
                .collect(),
        };

        info!(
            "Profiling completed in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(ProfileResult {
            file_info,
            column_analysis,
            data_quality,
            date_detection: DateDetection {
                detected_columns,
                converted_columns,
            },
        })
    }

    /// Load a CSV file and profile it. The reported filename is the file name
    /// component of `path`.
    pub fn profile_csv_path(&self, path: impl AsRef<Path>) -> Result<ProfileResult> {
        let path = path.as_ref();
        let df = load_csv_from_path(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.profile(&df, &filename)
    }

    /// Parse in-memory CSV content (e.g. an upload) and profile it.
    pub fn profile_csv_bytes(&self, bytes: &[u8], filename: &str) -> Result<ProfileResult> {
        let df = load_csv_from_bytes(bytes)?;
        self.profile(&df, filename)
    }
}

/// Builder for creating a [`ProfilingPipeline`].
#[derive(Debug, Default)]
pub struct ProfilingPipelineBuilder {
    config: Option<ProfilerConfig>,
}

static_assertions::assert_impl_all!(ProfilingPipelineBuilder: Send);

impl ProfilingPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: ProfilerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn build(self) -> Result<ProfilingPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        Ok(ProfilingPipeline::from_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateDetectionConfig;
    use crate::types::ColumnKind;
    use pretty_assertions::assert_eq;

    fn orders() -> DataFrame {
        df![
            "order_id" => [1i64, 2, 3],
            "created_at" => ["2023-01-15", "2023-02-20", "2023-03-01"],
            "status" => ["new", "shipped", "new"],
        ]
        .unwrap()
    }

    #[test]
    fn test_profile_converts_and_profiles_dates() {
        let pipeline = ProfilingPipeline::default();
        let result = pipeline.profile(&orders(), "orders.csv").unwrap();

        assert_eq!(result.file_info.filename, "orders.csv");
        assert_eq!(result.file_info.rows, 3);
        assert_eq!(
            result.file_info.column_names,
            vec!["order_id", "created_at", "status"]
        );

        assert_eq!(result.date_detection.converted_columns, vec!["created_at"]);
        let created = &result.column_analysis["created_at"];
        assert_eq!(created.kind, ColumnKind::Timestamp);
        assert_eq!(created.temporal().unwrap().date_range_days, 45);

        // Non-date text stays text
        assert!(result.date_detection.detected_columns.contains_key("status"));
        assert_eq!(result.column_analysis["status"].kind, ColumnKind::String);
    }

    #[test]
    fn test_profile_does_not_mutate_input() {
        let df = orders();
        ProfilingPipeline::default().profile(&df, "orders.csv").unwrap();
        assert_eq!(df.column("created_at").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_profile_with_conversion_disabled() {
        let pipeline = ProfilingPipeline::builder()
            .config(ProfilerConfig::builder().convert_dates(false).build().unwrap())
            .build()
            .unwrap();

        let result = pipeline.profile(&orders(), "orders.csv").unwrap();

        assert!(result.date_detection.detected_columns["created_at"].should_convert);
        assert!(result.date_detection.converted_columns.is_empty());
        assert_eq!(result.column_analysis["created_at"].kind, ColumnKind::String);
    }

    #[test]
    fn test_profile_is_idempotent() {
        let pipeline = ProfilingPipeline::default();
        let first = pipeline.profile(&orders(), "orders.csv").unwrap();
        let second = pipeline.profile(&orders(), "orders.csv").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = ProfilerConfig {
            date_detection: DateDetectionConfig {
                threshold: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let err = ProfilingPipeline::builder().config(config).build().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_profile_csv_bytes() {
        let csv = b"id,amount\n1,10\n2,-5\n3,0\n4,0\n";
        let result = ProfilingPipeline::default()
            .profile_csv_bytes(csv, "upload.csv")
            .unwrap();

        assert_eq!(result.file_info.filename, "upload.csv");
        let amount = result.column_analysis["amount"].numeric().unwrap();
        assert_eq!(amount.zeroes_count, 2);
        assert_eq!(amount.negative_count, 1);
    }

    #[test]
    fn test_profile_csv_path_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "name\nann\nbob\n").unwrap();

        let result = ProfilingPipeline::default().profile_csv_path(&path).unwrap();

        assert_eq!(result.file_info.filename, "people.csv");
        assert_eq!(result.file_info.rows, 2);
    }
}
