//! Date-column detection.
//!
//! Text columns are scored from three independent signals:
//! - the column name containing date keywords
//! - leading values having a date-like shape
//! - leading values actually parsing as dates
//!
//! The signals add up to a confidence that decides whether the column is
//! converted to datetime before profiling.

mod detector;
mod parsing;
mod patterns;

pub use detector::DateColumnDetector;
pub use parsing::{infer_explicit_format, parse_datetime, parse_sample, parse_with_format};
