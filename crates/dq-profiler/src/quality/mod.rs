//! Dataset-wide quality metrics.
//!
//! These are computed once, after date coercion, over the whole table:
//! total missing cells, their share of all cells and exact duplicate rows.

mod analyzer;

pub use analyzer::DatasetQualityAnalyzer;
