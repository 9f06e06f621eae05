use crate::error::Result;
use crate::types::DatasetQuality;
use crate::utils::percentage;
use polars::prelude::*;
use tracing::debug;

pub struct DatasetQualityAnalyzer;

impl DatasetQualityAnalyzer {
    pub fn summarize(df: &DataFrame) -> Result<DatasetQuality> {
        let total_missing_values: usize = df.get_columns().iter().map(|c| c.null_count()).sum();
        let total_cells = df.height() * df.width();

        let duplicate_rows = Self::count_duplicate_rows(df)?;

        debug!(
            "Quality: {} missing of {} cells, {} duplicate rows",
            total_missing_values, total_cells, duplicate_rows
        );

        Ok(DatasetQuality {
            total_missing_values,
            missing_percentage: percentage(total_missing_values, total_cells),
            duplicate_rows,
        })
    }

    /// Rows that repeat an earlier row across every column. Nulls compare
    /// equal to each other.
    fn count_duplicate_rows(df: &DataFrame) -> Result<usize> {
        if df.height() == 0 || df.width() == 0 {
            return Ok(0);
        }

        let distinct = df
            .unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
            .height();
        Ok(df.height() - distinct)
    }
}
