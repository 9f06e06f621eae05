//! Textual date shapes used by the pattern signal.

use once_cell::sync::Lazy;
use regex::Regex;

const MONTH_NAMES: &str = r"(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?";

// Date shape regexes - compiled once at startup
static DATE_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}").expect("Invalid regex: numeric triplet"),
        Regex::new(&format!(r"(?i)^\d{{1,2}}\s+{MONTH_NAMES}\s+\d{{2,4}}"))
            .expect("Invalid regex: day month year"),
        Regex::new(&format!(r"(?i)^\d{{4}}\s+{MONTH_NAMES}\s+\d{{1,2}}"))
            .expect("Invalid regex: year month day"),
    ]
});

/// Check whether a value starts with one of the known date shapes.
pub(crate) fn matches_date_shape(value: &str) -> bool {
    let trimmed = value.trim();
    DATE_SHAPES.iter().any(|shape| shape.is_match(trimmed))
}

/// Fraction of values that look like dates, 0 for an empty sample.
pub(crate) fn shape_match_ratio(values: &[String]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let matches = values.iter().filter(|v| matches_date_shape(v)).count();
    matches as f64 / values.len() as f64
}
