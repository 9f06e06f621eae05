//! Range and calendar distributions for timestamp columns.

use crate::types::TemporalStats;
use chrono::{Datelike, NaiveDateTime};
use std::collections::BTreeMap;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Summarize non-null timestamps. Returns `None` for an empty slice.
pub(crate) fn temporal_stats(values: &[NaiveDateTime]) -> Option<TemporalStats> {
    let min = values.iter().min()?;
    let max = values.iter().max()?;

    let mut year_distribution = BTreeMap::new();
    let mut day_of_week_distribution = BTreeMap::new();
    for value in values {
        *year_distribution.entry(value.year()).or_insert(0) += 1;
        *day_of_week_distribution
            .entry(value.weekday().num_days_from_monday())
            .or_insert(0) += 1;
    }

    Some(TemporalStats {
        min_date: min.format(DISPLAY_FORMAT).to_string(),
        max_date: max.format(DISPLAY_FORMAT).to_string(),
        // Whole days only; a partial day rounds toward zero.
        date_range_days: (*max - *min).num_days(),
        year_distribution,
        day_of_week_distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_created_at_example() {
        let values = [at(2023, 1, 15, 0), at(2023, 2, 20, 0), at(2023, 3, 1, 0)];
        let stats = temporal_stats(&values).unwrap();

        assert_eq!(stats.min_date, "2023-01-15 00:00:00");
        assert_eq!(stats.max_date, "2023-03-01 00:00:00");
        assert_eq!(stats.date_range_days, 45);
        assert_eq!(stats.year_distribution, BTreeMap::from([(2023, 3)]));
    }

    #[test]
    fn test_day_of_week_starts_monday_at_zero() {
        // 2024-01-01 was a Monday, 2024-01-07 a Sunday
        let values = [at(2024, 1, 1, 0), at(2024, 1, 7, 0), at(2024, 1, 8, 0)];
        let stats = temporal_stats(&values).unwrap();

        assert_eq!(
            stats.day_of_week_distribution,
            BTreeMap::from([(0, 2), (6, 1)])
        );
    }

    #[test]
    fn test_partial_days_are_floored() {
        let values = [at(2023, 1, 1, 12), at(2023, 1, 3, 6)];
        let stats = temporal_stats(&values).unwrap();
        assert_eq!(stats.date_range_days, 1);
    }

    #[test]
    fn test_years_spanned() {
        let values = [at(2021, 6, 1, 0), at(2022, 6, 1, 0), at(2022, 7, 1, 0)];
        let stats = temporal_stats(&values).unwrap();
        assert_eq!(
            stats.year_distribution,
            BTreeMap::from([(2021, 1), (2022, 2)])
        );
    }

    #[test]
    fn test_single_value() {
        let stats = temporal_stats(&[at(2023, 5, 5, 8)]).unwrap();
        assert_eq!(stats.min_date, stats.max_date);
        assert_eq!(stats.date_range_days, 0);
    }

    #[test]
    fn test_empty_values() {
        assert!(temporal_stats(&[]).is_none());
    }
}
