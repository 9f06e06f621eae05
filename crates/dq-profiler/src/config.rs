//! Configuration types for the profiling pipeline.
//!
//! The date detector is driven entirely by [`DateDetectionConfig`]: the
//! keyword list, signal weights, threshold and sample sizes are data, not
//! code, and their defaults are the reference behavior.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Keywords that hint a column holds dates when found in its lowercased name.
pub const DEFAULT_DATE_KEYWORDS: [&str; 8] = [
    "created", "modified", "updated", "date", "day", "month", "year", "time",
];

/// Explicit formats probed, in order, before falling back to generic parsing.
pub const DEFAULT_EXPLICIT_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Settings for the heuristic date-column detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateDetectionConfig {
    /// Minimum confidence for a column to be converted.
    /// Default: 0.7
    pub threshold: f64,

    /// Name keywords; each one found in the column name adds `name_weight`.
    pub keywords: Vec<String>,

    /// Increment per matched name keyword.
    /// Default: 0.3
    pub name_weight: f64,

    /// Weight applied to the fraction of sampled values matching a date shape.
    /// Default: 0.5
    pub pattern_weight: f64,

    /// Weight applied to the fraction of sampled values that parse as dates.
    /// Default: 0.4
    pub conversion_weight: f64,

    /// Subtracted when the conversion sample cannot be prepared at all.
    /// Default: 0.2
    pub failure_penalty: f64,

    /// Columns with a larger null fraction are not considered (0.0 - 1.0).
    /// Default: 0.5
    pub max_null_fraction: f64,

    /// Number of leading non-null values tested against the date shapes.
    /// Default: 10
    pub pattern_sample_size: usize,

    /// Number of leading non-null values used for the conversion signal.
    /// Default: 50
    pub conversion_sample_size: usize,

    /// Number of values used to pick an explicit format.
    /// Default: 5
    pub format_probe_size: usize,

    /// Explicit `chrono` formats probed in order.
    pub explicit_formats: Vec<String>,
}

impl Default for DateDetectionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            keywords: DEFAULT_DATE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            name_weight: 0.3,
            pattern_weight: 0.5,
            conversion_weight: 0.4,
            failure_penalty: 0.2,
            max_null_fraction: 0.5,
            pattern_sample_size: 10,
            conversion_sample_size: 50,
            format_probe_size: 5,
            explicit_formats: DEFAULT_EXPLICIT_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

impl DateDetectionConfig {
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigValidationError::InvalidThreshold(self.threshold));
        }

        for (field, value) in [
            ("name_weight", self.name_weight),
            ("pattern_weight", self.pattern_weight),
            ("conversion_weight", self.conversion_weight),
            ("failure_penalty", self.failure_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigValidationError::InvalidWeight {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.max_null_fraction) {
            return Err(ConfigValidationError::InvalidNullFraction(
                self.max_null_fraction,
            ));
        }

        for (field, value) in [
            ("pattern_sample_size", self.pattern_sample_size),
            ("conversion_sample_size", self.conversion_sample_size),
            ("format_probe_size", self.format_probe_size),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::InvalidSampleSize {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.format_probe_size > self.conversion_sample_size {
            return Err(ConfigValidationError::ProbeLargerThanSample {
                probe: self.format_probe_size,
                sample: self.conversion_sample_size,
            });
        }

        if self.explicit_formats.is_empty() {
            return Err(ConfigValidationError::NoExplicitFormats);
        }

        Ok(())
    }
}

/// Configuration for a profiling run.
///
/// Use [`ProfilerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use dq_profiler::config::ProfilerConfig;
///
/// let config = ProfilerConfig::builder()
///     .date_threshold(0.8)
///     .top_values_limit(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Date detector settings.
    pub date_detection: DateDetectionConfig,

    /// Whether columns flagged by the detector are converted before profiling.
    /// When false, detections are still reported but nothing is converted.
    /// Default: true
    pub convert_dates: bool,

    /// Number of most frequent values reported for string columns.
    /// Default: 5
    pub top_values_limit: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            date_detection: DateDetectionConfig::default(),
            convert_dates: true,
            top_values_limit: 5,
        }
    }
}

impl ProfilerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ProfilerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.date_detection.validate()?;

        if self.top_values_limit == 0 {
            return Err(ConfigValidationError::InvalidTopValuesLimit(
                self.top_values_limit,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid date threshold: {0} (must be a finite, non-negative number)")]
    InvalidThreshold(f64),

    #[error("Invalid weight for '{field}': {value} (must be a finite, non-negative number)")]
    InvalidWeight { field: String, value: f64 },

    #[error("Invalid max null fraction: {0} (must be between 0.0 and 1.0)")]
    InvalidNullFraction(f64),

    #[error("Invalid sample size for '{field}': {value} (must be at least 1)")]
    InvalidSampleSize { field: String, value: usize },

    #[error("Format probe size {probe} exceeds conversion sample size {sample}")]
    ProbeLargerThanSample { probe: usize, sample: usize },

    #[error("At least one explicit date format is required")]
    NoExplicitFormats,

    #[error("Invalid top values limit: {0} (must be at least 1)")]
    InvalidTopValuesLimit(usize),
}

/// Builder for [`ProfilerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfilerConfigBuilder {
    date_detection: Option<DateDetectionConfig>,
    date_threshold: Option<f64>,
    keywords: Option<Vec<String>>,
    max_null_fraction: Option<f64>,
    explicit_formats: Option<Vec<String>>,
    convert_dates: Option<bool>,
    top_values_limit: Option<usize>,
}

impl ProfilerConfigBuilder {
    /// Replace the whole date detector configuration.
    ///
    /// Individual setters such as [`date_threshold`](Self::date_threshold)
    /// still apply on top of it.
    pub fn date_detection(mut self, config: DateDetectionConfig) -> Self {
        self.date_detection = Some(config);
        self
    }

    /// Set the confidence a column needs before it is converted to datetime.
    pub fn date_threshold(mut self, threshold: f64) -> Self {
        self.date_threshold = Some(threshold);
        self
    }

    /// Set the column-name keywords used by the name signal.
    pub fn date_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Set the null fraction above which a column is not considered for
    /// date detection.
    ///
    /// # Arguments
    /// * `fraction` - Value between 0.0 and 1.0 (e.g., 0.5 = 50%)
    pub fn max_null_fraction(mut self, fraction: f64) -> Self {
        self.max_null_fraction = Some(fraction);
        self
    }

    /// Set the explicit formats probed before generic parsing.
    pub fn explicit_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_formats = Some(formats.into_iter().map(Into::into).collect());
        self
    }

    /// Enable or disable conversion of detected date columns.
    pub fn convert_dates(mut self, convert: bool) -> Self {
        self.convert_dates = Some(convert);
        self
    }

    /// Set how many most frequent values string columns report.
    pub fn top_values_limit(mut self, limit: usize) -> Self {
        self.top_values_limit = Some(limit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfilerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfilerConfig, ConfigValidationError> {
        let mut date_detection = self.date_detection.unwrap_or_default();
        if let Some(threshold) = self.date_threshold {
            date_detection.threshold = threshold;
        }
        if let Some(keywords) = self.keywords {
            date_detection.keywords = keywords;
        }
        if let Some(fraction) = self.max_null_fraction {
            date_detection.max_null_fraction = fraction;
        }
        if let Some(formats) = self.explicit_formats {
            date_detection.explicit_formats = formats;
        }

        let config = ProfilerConfig {
            date_detection,
            convert_dates: self.convert_dates.unwrap_or(true),
            top_values_limit: self.top_values_limit.unwrap_or(5),
        };

        config.validate()?;
        Ok(config)
    }
}
