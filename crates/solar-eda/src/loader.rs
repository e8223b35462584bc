//! CSV loading with a fail-soft contract.
//!
//! [`load_table`] never returns an error. A file that cannot be read or
//! parsed, or that parses to an empty frame, becomes [`LoadOutcome::NoData`]
//! and the caller decides what to do with it.

use crate::config::EdaConfig;
use crate::table::Table;
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Why a load produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NoDataReason {
    /// The file was missing, unreadable, or not valid CSV.
    Unreadable { path: PathBuf, cause: String },
    /// The file parsed but has no rows or no columns.
    Empty { path: PathBuf },
}

impl std::fmt::Display for NoDataReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable { path, cause } => {
                write!(f, "could not load {}: {}", path.display(), cause)
            }
            Self::Empty { path } => write!(f, "{} contains no data", path.display()),
        }
    }
}

/// Result of a load attempt.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(Table),
    NoData(NoDataReason),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The loaded table, or an empty table for any `NoData` outcome.
    pub fn into_table(self) -> Table {
        match self {
            Self::Loaded(table) => table,
            Self::NoData(_) => Table::empty(),
        }
    }
}

/// Read a CSV file according to `config`.
pub fn load_table(path: &Path, config: &EdaConfig) -> LoadOutcome {
    debug!("Reading CSV from {}", path.display());

    match read_csv(path, config) {
        Ok(df) if df.height() == 0 || df.width() == 0 => {
            warn!(
                "No data in {} ({} rows, {} columns)",
                path.display(),
                df.height(),
                df.width()
            );
            LoadOutcome::NoData(NoDataReason::Empty {
                path: path.to_path_buf(),
            })
        }
        Ok(df) => {
            info!("Data loaded successfully.");
            debug!("Loaded shape: {:?}", df.shape());
            LoadOutcome::Loaded(Table::new(df))
        }
        Err(e) => {
            error!("Error loading data: {}", e);
            LoadOutcome::NoData(NoDataReason::Unreadable {
                path: path.to_path_buf(),
                cause: e.to_string(),
            })
        }
    }
}

fn read_csv(path: &Path, config: &EdaConfig) -> PolarsResult<DataFrame> {
    let null_values = NullValues::AllColumns(
        config
            .null_markers
            .iter()
            .map(|s| s.as_str().into())
            .collect(),
    );

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(config.infer_schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(config.separator)
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}
