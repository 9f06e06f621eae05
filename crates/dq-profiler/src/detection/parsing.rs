//! Fallible date parsing.
//!
//! Every function here returns `Option`: a value that does not parse is
//! `None`, and the caller decides to store it as null.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Datetime layouts tried by [`parse_datetime`], most specific first.
const DATETIME_FORMATS: [&str; 12] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Date layouts tried by [`parse_datetime`]. Month-first wins over
/// day-first for ambiguous slash dates.
const DATE_FORMATS: [&str; 15] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%Y %B %d",
    "%d-%b-%Y",
    "%a, %d %b %Y",
];

/// Parse a value with a single explicit format.
///
/// Date-only formats yield midnight of that day.
pub fn parse_with_format(value: &str, format: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(trimmed, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Best-effort parsing of a value in any common layout.
///
/// Offsets are normalized to UTC. Bare numbers are not treated as dates.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Pick the first explicit format under which every probe value parses.
pub fn infer_explicit_format<'a, S: AsRef<str>>(
    probe: &[S],
    formats: &'a [String],
) -> Option<&'a str> {
    if probe.is_empty() {
        return None;
    }
    formats
        .iter()
        .find(|fmt| {
            probe
                .iter()
                .all(|value| parse_with_format(value.as_ref(), fmt).is_some())
        })
        .map(String::as_str)
}

/// Parse a sample the way the detector does: probe the leading values for an
/// explicit format, then parse everything with it, or generically when no
/// explicit format fits.
pub fn parse_sample<S: AsRef<str>>(
    values: &[S],
    probe_size: usize,
    formats: &[String],
) -> Vec<Option<NaiveDateTime>> {
    let probe = &values[..probe_size.min(values.len())];
    match infer_explicit_format(probe, formats) {
        Some(fmt) => values
            .iter()
            .map(|v| parse_with_format(v.as_ref(), fmt))
            .collect(),
        None => values.iter().map(|v| parse_datetime(v.as_ref())).collect(),
    }
}
