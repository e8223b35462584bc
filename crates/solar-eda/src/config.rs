//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! Every field has a default, so `EdaConfig::default()` reproduces the
//! standard run over `data/solar_data.csv`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default input file used when no path is given.
pub const DEFAULT_INPUT_PATH: &str = "data/solar_data.csv";

/// Default categorical column for the cross-country comparison.
pub const DEFAULT_CATEGORY_COLUMN: &str = "Country";

/// Default numeric column for the cross-country comparison.
pub const DEFAULT_METRIC_COLUMN: &str = "SolarOutput";

/// Textual markers treated as missing cells when reading CSV files.
pub const DEFAULT_NULL_MARKERS: [&str; 13] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A", "#NA",
    "<NA>",
];

/// Strategy for choosing the number of histogram bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BinStrategy {
    /// Finer of the Sturges and Freedman-Diaconis estimates
    #[default]
    Auto,
    /// A fixed number of equal-width bins
    Fixed(usize),
}

/// Configuration for the analysis pipeline.
///
/// Use [`EdaConfig::builder()`] to create a new configuration with the
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use solar_eda::config::{BinStrategy, EdaConfig};
///
/// let config = EdaConfig::builder()
///     .input_path("data/solar_2023.csv")
///     .metric_column("GHI")
///     .histogram_bins(BinStrategy::Fixed(20))
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdaConfig {
    /// Path to the CSV file to analyze.
    /// Default: "data/solar_data.csv"
    pub input_path: PathBuf,

    /// Column holding the category used for grouping.
    /// Default: "Country"
    pub category_column: String,

    /// Numeric column averaged per category.
    /// Default: "SolarOutput"
    pub metric_column: String,

    /// Field separator byte.
    /// Default: b','
    pub separator: u8,

    /// Number of rows used for schema inference. `None` scans the whole file.
    /// Default: Some(100)
    pub infer_schema_length: Option<usize>,

    /// Cell values read as missing.
    pub null_markers: Vec<String>,

    /// Histogram binning strategy.
    /// Default: Auto
    pub histogram_bins: BinStrategy,

    /// Number of evaluation points for the density curve.
    /// Default: 200
    pub kde_grid_points: usize,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            category_column: DEFAULT_CATEGORY_COLUMN.to_string(),
            metric_column: DEFAULT_METRIC_COLUMN.to_string(),
            separator: b',',
            infer_schema_length: Some(100),
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|s| s.to_string()).collect(),
            histogram_bins: BinStrategy::default(),
            kde_grid_points: 200,
        }
    }
}

impl EdaConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EdaConfigBuilder {
        EdaConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.category_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("category_column"));
        }

        if self.metric_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("metric_column"));
        }

        if let BinStrategy::Fixed(0) = self.histogram_bins {
            return Err(ConfigValidationError::InvalidBinCount(0));
        }

        if self.kde_grid_points < 2 {
            return Err(ConfigValidationError::InvalidGridPoints(self.kde_grid_points));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(&'static str),

    #[error("Invalid histogram bin count: {0} (must be at least 1)")]
    InvalidBinCount(usize),

    #[error("Invalid density grid size: {0} (must be at least 2)")]
    InvalidGridPoints(usize),
}

/// Builder for [`EdaConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct EdaConfigBuilder {
    base: Option<EdaConfig>,
    input_path: Option<PathBuf>,
    category_column: Option<String>,
    metric_column: Option<String>,
    separator: Option<u8>,
    infer_schema_length: Option<Option<usize>>,
    null_markers: Option<Vec<String>>,
    histogram_bins: Option<BinStrategy>,
    kde_grid_points: Option<usize>,
}

impl EdaConfigBuilder {
    /// Start from an existing configuration (e.g. one read from a JSON file)
    /// instead of the defaults. Setters called afterwards still win.
    pub fn from_config(mut self, config: EdaConfig) -> Self {
        self.base = Some(config);
        self
    }

    /// Set the CSV file to analyze.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the categorical column used for grouping.
    pub fn category_column(mut self, column: impl Into<String>) -> Self {
        self.category_column = Some(column.into());
        self
    }

    /// Set the numeric column averaged per category.
    pub fn metric_column(mut self, column: impl Into<String>) -> Self {
        self.metric_column = Some(column.into());
        self
    }

    /// Set the field separator.
    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Set how many rows are scanned for schema inference.
    pub fn infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Replace the list of missing-value markers.
    pub fn null_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the histogram binning strategy.
    pub fn histogram_bins(mut self, bins: BinStrategy) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the number of density evaluation points.
    pub fn kde_grid_points(mut self, points: usize) -> Self {
        self.kde_grid_points = Some(points);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `EdaConfig` or an error if validation fails.
    pub fn build(self) -> Result<EdaConfig, ConfigValidationError> {
        let base = self.base.unwrap_or_default();
        let config = EdaConfig {
            input_path: self.input_path.unwrap_or(base.input_path),
            category_column: self.category_column.unwrap_or(base.category_column),
            metric_column: self.metric_column.unwrap_or(base.metric_column),
            separator: self.separator.unwrap_or(base.separator),
            infer_schema_length: self.infer_schema_length.unwrap_or(base.infer_schema_length),
            null_markers: self.null_markers.unwrap_or(base.null_markers),
            histogram_bins: self.histogram_bins.unwrap_or(base.histogram_bins),
            kde_grid_points: self.kde_grid_points.unwrap_or(base.kde_grid_points),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EdaConfig::default();
        assert_eq!(config.input_path, PathBuf::from("data/solar_data.csv"));
        assert_eq!(config.category_column, "Country");
        assert_eq!(config.metric_column, "SolarOutput");
        assert_eq!(config.histogram_bins, BinStrategy::Auto);
        assert_eq!(config.kde_grid_points, 200);
        assert!(config.null_markers.iter().any(|m| m == "NA"));
    }

    #[test]
    fn test_builder_custom_values() {
        let config = EdaConfig::builder()
            .input_path("other.csv")
            .category_column("Region")
            .metric_column("GHI")
            .separator(b';')
            .histogram_bins(BinStrategy::Fixed(12))
            .kde_grid_points(50)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("other.csv"));
        assert_eq!(config.category_column, "Region");
        assert_eq!(config.metric_column, "GHI");
        assert_eq!(config.separator, b';');
        assert_eq!(config.histogram_bins, BinStrategy::Fixed(12));
        assert_eq!(config.kde_grid_points, 50);
    }

    #[test]
    fn test_builder_overrides_base_config() {
        let base = EdaConfig {
            metric_column: "DNI".to_string(),
            kde_grid_points: 64,
            ..EdaConfig::default()
        };
        let config = EdaConfig::builder()
            .from_config(base)
            .kde_grid_points(32)
            .build()
            .unwrap();

        assert_eq!(config.metric_column, "DNI");
        assert_eq!(config.kde_grid_points, 32);
    }

    #[test]
    fn test_validation_zero_bins() {
        let result = EdaConfig::builder()
            .histogram_bins(BinStrategy::Fixed(0))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidBinCount(0)
        ));
    }

    #[test]
    fn test_validation_grid_points() {
        let result = EdaConfig::builder().kde_grid_points(1).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidGridPoints(1)
        ));
    }

    #[test]
    fn test_validation_empty_column_name() {
        let result = EdaConfig::builder().category_column("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyColumnName("category_column")
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{
            "input_path": "data/kenya.csv",
            "metric_column": "GHI",
            "histogram_bins": { "Fixed": 15 }
        }"#;

        let config: EdaConfig = serde_json::from_str(json).expect("partial config should parse");

        assert_eq!(config.input_path, PathBuf::from("data/kenya.csv"));
        assert_eq!(config.metric_column, "GHI");
        assert_eq!(config.category_column, "Country");
        assert_eq!(config.histogram_bins, BinStrategy::Fixed(15));
        assert_eq!(config.kde_grid_points, 200);
    }
}
