//! String-shape statistics for text columns.

use crate::types::{StringStats, TopValues};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static NUMERIC_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("Invalid regex: numeric only"));
static ALPHABETIC_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("Invalid regex: alphabetic only"));
static ALPHANUMERIC_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("Invalid regex: alphanumeric only"));
static SPECIAL_CHARACTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s]").expect("Invalid regex: special character"));
static LEADING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+").expect("Invalid regex: leading whitespace"));
static TRAILING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+$").expect("Invalid regex: trailing whitespace"));

/// Summarize stringified non-null values. Returns `None` for an empty slice.
pub(crate) fn string_stats(values: &[String], top_limit: usize) -> Option<StringStats> {
    if values.is_empty() {
        return None;
    }

    let lengths: Vec<usize> = values.iter().map(|v| v.chars().count()).collect();
    let count_matching = |re: &Regex| values.iter().filter(|v| re.is_match(v)).count();

    Some(StringStats {
        min_length: lengths.iter().copied().min().unwrap_or(0),
        max_length: lengths.iter().copied().max().unwrap_or(0),
        mean_length: lengths.iter().sum::<usize>() as f64 / lengths.len() as f64,
        empty_strings: lengths.iter().filter(|len| **len == 0).count(),
        numeric_strings: count_matching(&NUMERIC_ONLY),
        alphabetic_strings: count_matching(&ALPHABETIC_ONLY),
        alphanumeric_strings: count_matching(&ALPHANUMERIC_ONLY),
        with_special_characters: count_matching(&SPECIAL_CHARACTER),
        leading_whitespace: count_matching(&LEADING_WHITESPACE),
        trailing_whitespace: count_matching(&TRAILING_WHITESPACE),
        top_values: top_values(values, top_limit),
    })
}

/// Most frequent values, ties broken by first occurrence.
pub(crate) fn top_values(values: &[String], limit: usize) -> TopValues {
    // value -> (count, first index)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in values.iter().enumerate() {
        counts.entry(value.as_str()).or_insert((0, idx)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    TopValues(
        ranked
            .into_iter()
            .take(limit)
            .map(|(value, count, _)| (value.to_string(), count))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tags_example() {
        let values = strings(&["abc", "ABC123", "  lead", "trail  ", "a!b"]);
        let stats = string_stats(&values, 5).unwrap();

        assert_eq!(stats.numeric_strings, 0);
        assert_eq!(stats.alphabetic_strings, 1);
        assert_eq!(stats.alphanumeric_strings, 2);
        assert_eq!(stats.with_special_characters, 1);
        assert_eq!(stats.leading_whitespace, 1);
        assert_eq!(stats.trailing_whitespace, 1);
        assert_eq!(stats.empty_strings, 0);
    }

    #[test]
    fn test_lengths() {
        let values = strings(&["a", "abcd", ""]);
        let stats = string_stats(&values, 5).unwrap();

        assert_eq!(stats.min_length, 0);
        assert_eq!(stats.max_length, 4);
        assert!((stats.mean_length - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.empty_strings, 1);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let values = strings(&["café"]);
        let stats = string_stats(&values, 5).unwrap();
        assert_eq!(stats.max_length, 4);
        // Non-ASCII letters are outside [A-Za-z0-9]
        assert_eq!(stats.with_special_characters, 1);
        assert_eq!(stats.alphabetic_strings, 0);
    }

    #[test]
    fn test_numeric_strings() {
        let values = strings(&["123", "007", "12.5", "-4"]);
        let stats = string_stats(&values, 5).unwrap();
        assert_eq!(stats.numeric_strings, 2);
        assert_eq!(stats.alphanumeric_strings, 2);
        assert_eq!(stats.with_special_characters, 2);
    }

    #[test]
    fn test_trailing_whitespace_is_end_anchored() {
        let values = strings(&[" both ", "  start", "end\t"]);
        let stats = string_stats(&values, 5).unwrap();
        assert_eq!(stats.leading_whitespace, 2);
        assert_eq!(stats.trailing_whitespace, 2);
    }

    #[test]
    fn test_whitespace_only_is_not_special() {
        let values = strings(&["   "]);
        let stats = string_stats(&values, 5).unwrap();
        assert_eq!(stats.with_special_characters, 0);
        assert_eq!(stats.leading_whitespace, 1);
        assert_eq!(stats.trailing_whitespace, 1);
    }

    #[test]
    fn test_empty_values() {
        assert!(string_stats(&[], 5).is_none());
    }

    // ==================== top_values tests ====================

    #[test]
    fn test_top_values_ranked_by_count() {
        let values = strings(&["b", "a", "a", "c", "a", "b"]);
        let top = top_values(&values, 5);
        assert_eq!(
            top.0,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_top_values_ties_keep_first_seen_order() {
        let values = strings(&["z", "y", "x", "y", "z", "x"]);
        let top = top_values(&values, 2);
        assert_eq!(top.0, vec![("z".to_string(), 2), ("y".to_string(), 2)]);
    }

    #[test]
    fn test_top_values_limit() {
        let values = strings(&["1", "2", "3", "4", "5", "6", "7"]);
        let top = top_values(&values, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top.0[4].0, "5");
    }
}
