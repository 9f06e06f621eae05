use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Dispatch tag for column analyzers, resolved once per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    String,
    Timestamp,
    Other,
}

/// Date-likelihood verdict for a single string column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateConfidence {
    /// Accumulated score, rounded to two decimals.
    pub confidence: f64,
    /// Whether the unrounded score reached the threshold.
    pub should_convert: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator), 0 for a single value.
    pub std: f64,
    pub zeroes_count: usize,
    pub negative_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringStats {
    pub min_length: usize,
    pub max_length: usize,
    pub mean_length: f64,
    pub empty_strings: usize,
    pub numeric_strings: usize,
    pub alphabetic_strings: usize,
    pub alphanumeric_strings: usize,
    pub with_special_characters: usize,
    pub leading_whitespace: usize,
    pub trailing_whitespace: usize,
    pub top_values: TopValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalStats {
    pub min_date: String,
    pub max_date: String,
    pub date_range_days: i64,
    pub year_distribution: BTreeMap<i32, usize>,
    /// Keyed by weekday index, Monday = 0 through Sunday = 6.
    pub day_of_week_distribution: BTreeMap<u32, usize>,
}

/// Type-specific part of a [`ColumnProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnExtension {
    Numeric(NumericStats),
    String(StringStats),
    Temporal(TemporalStats),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub data_type: String,
    pub kind: ColumnKind,
    pub null_count: usize,
    pub null_percentage: f64,
    pub unique_values: usize,
    #[serde(flatten)]
    pub extension: Option<ColumnExtension>,
}

impl ColumnProfile {
    pub fn numeric(&self) -> Option<&NumericStats> {
        match &self.extension {
            Some(ColumnExtension::Numeric(stats)) => Some(stats),
            _ => None,
        }
    }

    pub fn string(&self) -> Option<&StringStats> {
        match &self.extension {
            Some(ColumnExtension::String(stats)) => Some(stats),
            _ => None,
        }
    }

    pub fn temporal(&self) -> Option<&TemporalStats> {
        match &self.extension {
            Some(ColumnExtension::Temporal(stats)) => Some(stats),
            _ => None,
        }
    }
}

/// Most frequent values in rank order.
///
/// Serialized as a JSON object whose keys appear in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopValues(pub Vec<(String, usize)>);

impl TopValues {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == value)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, usize)> {
        self.0.iter()
    }
}

impl Serialize for TopValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (value, count) in &self.0 {
            map.serialize_entry(value, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TopValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TopValuesVisitor;

        impl<'de> Visitor<'de> for TopValuesVisitor {
            type Value = TopValues;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of value to count")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((value, count)) = access.next_entry::<String, usize>()? {
                    entries.push((value, count));
                }
                Ok(TopValues(entries))
            }
        }

        deserializer.deserialize_map(TopValuesVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetQuality {
    pub total_missing_values: usize,
    pub missing_percentage: f64,
    pub duplicate_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateDetection {
    pub detected_columns: BTreeMap<String, DateConfidence>,
    pub converted_columns: Vec<String>,
}

/// Everything a profiling run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResult {
    pub file_info: FileInfo,
    pub column_analysis: BTreeMap<String, ColumnProfile>,
    pub data_quality: DatasetQuality,
    pub date_detection: DateDetection,
}
