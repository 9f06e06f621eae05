//! Data Quality Profiler Library
//!
//! Statistical profiling of tabular datasets built with Rust and Polars.
//!
//! # Overview
//!
//! A profiling run takes a table (usually loaded from CSV) and produces a
//! [`ProfileResult`]:
//!
//! - **Date Detection**: Text columns are scored for how likely they hold dates,
//!   using the column name, the shape of leading values and trial parsing
//! - **Date Conversion**: Confident detections are converted to datetime on a copy
//!   of the table before anything else is measured
//! - **Column Profiling**: Null and distinct counts for every column, plus numeric,
//!   string-shape or temporal statistics depending on the column type
//! - **Data Quality**: Missing-cell rate and exact duplicate rows for the whole table
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dq_profiler::{ProfilerConfig, ProfilingPipeline};
//!
//! // Defaults
//! let result = ProfilingPipeline::default().profile_csv_path("data/orders.csv")?;
//!
//! // Custom configuration
//! let config = ProfilerConfig::builder()
//!     .date_threshold(0.8)
//!     .top_values_limit(10)
//!     .build()?;
//!
//! let result = ProfilingPipeline::builder()
//!     .config(config)
//!     .build()?
//!     .profile(&df, "orders.csv")?;
//!
//! for (name, column) in &result.column_analysis {
//!     println!("{}: {} nulls", name, column.null_count);
//! }
//! ```
//!
//! # Using the pieces directly
//!
//! Every stage is usable on its own:
//!
//! ```rust,ignore
//! use dq_profiler::{ColumnProfiler, DateCoercer, DateColumnDetector, DatasetQualityAnalyzer};
//!
//! let detections = DateColumnDetector::default().detect(&df);
//! let (converted_df, converted) = DateCoercer.coerce(&df, &detections);
//! let amount = ColumnProfiler::new(5).profile_column(&converted_df, "amount")?;
//! let quality = DatasetQualityAnalyzer::summarize(&converted_df)?;
//! ```

pub mod cleaner;
pub mod config;
pub mod detection;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::DateCoercer;
pub use config::{
    ConfigValidationError, DateDetectionConfig, ProfilerConfig, ProfilerConfigBuilder,
};
pub use detection::{DateColumnDetector, parse_datetime, parse_with_format};
pub use error::{ProfilingError, Result as ProfilingResult, ResultExt};
pub use loader::{load_csv_from_bytes, load_csv_from_path};
pub use pipeline::{ProfilingPipeline, ProfilingPipelineBuilder};
pub use profiler::ColumnProfiler;
pub use quality::DatasetQualityAnalyzer;
pub use reporting::ReportGenerator;
pub use types::{
    ColumnExtension, ColumnKind, ColumnProfile, DatasetQuality, DateConfidence, DateDetection,
    FileInfo, NumericStats, ProfileResult, StringStats, TemporalStats, TopValues,
};
pub use utils::{CellType, cell_type, column_kind};
