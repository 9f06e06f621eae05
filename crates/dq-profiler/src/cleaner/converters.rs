//! Type conversion functions for date coercion.

use crate::detection::parse_datetime;
use anyhow::{Result, bail};
use polars::prelude::*;

/// Convert a text series to `Datetime(Milliseconds)`.
///
/// Every value goes through generic date parsing; values that do not parse
/// become null. Nulls stay null.
pub(crate) fn string_to_datetime(series: &Series) -> Result<Series> {
    let str_series = match series.dtype() {
        DataType::String => series.clone(),
        DataType::Categorical(_, _) | DataType::Null => series.cast(&DataType::String)?,
        other => bail!("cannot parse dates from a {} column", other),
    };

    let mut timestamps: Vec<Option<i64>> = Vec::with_capacity(str_series.len());
    for opt_val in str_series.str()?.into_iter() {
        let millis = opt_val
            .and_then(parse_datetime)
            .map(|dt| dt.and_utc().timestamp_millis());
        timestamps.push(millis);
    }

    let timestamp_series = Series::new(series.name().clone(), timestamps);
    Ok(timestamp_series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
}
