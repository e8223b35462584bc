//! Missing-value repair for loaded tables.
//!
//! The only strategy is forward fill: each missing cell takes the nearest
//! non-missing value above it in the same column. Cells before the first
//! value of a column have nothing to copy and stay missing. NaN in float
//! columns counts as missing.

use crate::error::{Result, ResultExt};
use crate::table::Table;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Per-column outcome of a fill pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFill {
    pub column: String,
    /// Cells that received a value
    pub filled: usize,
    /// Cells still missing afterwards (the leading run)
    pub still_missing: usize,
}

/// Data cleaner for missing-value repair.
pub struct DataCleaner;

impl DataCleaner {
    /// Forward-fill every column of `table` into a new table.
    ///
    /// The input is left untouched; the returned table shares buffers only
    /// for columns that had nothing to fill.
    pub fn forward_fill(table: &Table) -> Result<Table> {
        let normalized = nan_to_null(table.frame())?;
        let mut columns = Vec::with_capacity(table.width());

        for column in normalized.get_columns() {
            if column.null_count() == 0 {
                columns.push(column.clone());
                continue;
            }

            let series = column.as_materialized_series();
            let filled = series
                .fill_null(FillNullStrategy::Forward(None))
                .context(format!("Forward filling '{}'", series.name()))?;
            debug!(
                "Filled '{}': {} -> {} missing",
                series.name(),
                series.null_count(),
                filled.null_count()
            );
            columns.push(filled.into_column());
        }

        let frame = if columns.is_empty() {
            DataFrame::empty()
        } else {
            DataFrame::new(columns)?
        };

        info!("Missing values handled using forward fill.");
        Ok(table.with_frame(frame))
    }

    /// Compare missing counts between a table and its filled copy.
    ///
    /// Columns without any missing cells in `before` are omitted. NaN cells
    /// count as missing.
    pub fn fill_summary(before: &Table, after: &Table) -> Vec<ColumnFill> {
        before
            .frame()
            .get_columns()
            .iter()
            .filter_map(|col| {
                let missing = missing_count(col);
                if missing == 0 {
                    return None;
                }
                let still_missing = after
                    .frame()
                    .column(col.name().as_str())
                    .map(missing_count)
                    .unwrap_or(missing);
                Some(ColumnFill {
                    column: col.name().to_string(),
                    filled: missing.saturating_sub(still_missing),
                    still_missing,
                })
            })
            .collect()
    }
}

/// Number of NaN cells in a float column, zero for other dtypes.
fn nan_count(column: &Column) -> usize {
    if !column.dtype().is_float() {
        return 0;
    }
    column
        .as_materialized_series()
        .is_nan()
        .map(|mask| mask.sum().unwrap_or(0) as usize)
        .unwrap_or(0)
}

fn missing_count(column: &Column) -> usize {
    column.null_count() + nan_count(column)
}

/// Turn NaN cells of float columns into nulls so they fill like any other
/// missing cell.
pub(crate) fn nan_to_null(frame: &DataFrame) -> Result<DataFrame> {
    let exprs: Vec<Expr> = frame
        .get_columns()
        .iter()
        .filter(|c| nan_count(c) > 0)
        .map(|c| col(c.name().clone()).fill_nan(lit(NULL)))
        .collect();
    if exprs.is_empty() {
        return Ok(frame.clone());
    }

    debug!("Treating NaN as missing in {} columns", exprs.len());
    frame
        .clone()
        .lazy()
        .with_columns(exprs)
        .collect()
        .context("Replacing NaN with nulls")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values_f64(table: &Table, name: &str) -> Vec<Option<f64>> {
        table
            .frame()
            .column(name)
            .unwrap()
            .as_materialized_series()
            .cast(&DataType::Float64)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_forward_fill_basic() {
        let df = df!(
            "Country" => ["A", "B", "A", "B"],
            "SolarOutput" => [Some(10i64), Some(20), None, Some(30)],
        )
        .unwrap();
        let table = Table::new(df);

        let cleaned = DataCleaner::forward_fill(&table).unwrap();

        assert_eq!(
            values_f64(&cleaned, "SolarOutput"),
            vec![Some(10.0), Some(20.0), Some(20.0), Some(30.0)]
        );
    }

    #[test]
    fn test_leading_missing_run_is_kept() {
        let df = df!(
            "GHI" => [None, None, Some(3.5f64), None, Some(5.5)],
        )
        .unwrap();
        let table = Table::new(df);

        let cleaned = DataCleaner::forward_fill(&table).unwrap();

        assert_eq!(
            values_f64(&cleaned, "GHI"),
            vec![None, None, Some(3.5), Some(3.5), Some(5.5)]
        );
    }

    #[test]
    fn test_text_columns_are_filled() {
        let df = df!(
            "Country" => [Some("Benin"), None, Some("Togo"), None],
        )
        .unwrap();
        let table = Table::new(df);

        let cleaned = DataCleaner::forward_fill(&table).unwrap();
        let values: Vec<Option<&str>> = cleaned
            .frame()
            .column("Country")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(
            values,
            vec![Some("Benin"), Some("Benin"), Some("Togo"), Some("Togo")]
        );
    }

    #[test]
    fn test_input_is_not_modified() {
        let df = df!(
            "SolarOutput" => [Some(1.0f64), None, Some(3.0)],
        )
        .unwrap();
        let table = Table::new(df);
        let snapshot = table.frame().clone();

        let _ = DataCleaner::forward_fill(&table).unwrap();

        assert!(table.frame().equals_missing(&snapshot));
        assert_eq!(table.frame().column("SolarOutput").unwrap().null_count(), 1);
    }

    #[test]
    fn test_fill_is_idempotent() {
        let df = df!(
            "a" => [None, Some(1i64), None, Some(4), None],
            "b" => [Some("x"), None, None, Some("y"), None],
        )
        .unwrap();
        let table = Table::new(df);

        let once = DataCleaner::forward_fill(&table).unwrap();
        let twice = DataCleaner::forward_fill(&once).unwrap();

        assert!(once.frame().equals_missing(twice.frame()));
    }

    #[test]
    fn test_nan_is_filled_like_null() {
        let df = df!(
            "GHI" => [Some(f64::NAN), Some(1.0), Some(f64::NAN), None, Some(4.0)],
        )
        .unwrap();
        let table = Table::new(df);

        let cleaned = DataCleaner::forward_fill(&table).unwrap();

        assert_eq!(
            values_f64(&cleaned, "GHI"),
            vec![None, Some(1.0), Some(1.0), Some(1.0), Some(4.0)]
        );
        assert_eq!(
            DataCleaner::fill_summary(&table, &cleaned),
            vec![ColumnFill {
                column: "GHI".to_string(),
                filled: 2,
                still_missing: 1,
            }]
        );
    }

    #[test]
    fn test_nan_to_null_leaves_other_columns() {
        let df = df!(
            "GHI" => [1.0f64, f64::NAN],
            "DNI" => [2.0f64, 3.0],
            "Country" => ["A", "B"],
        )
        .unwrap();

        let normalized = nan_to_null(&df).unwrap();

        assert_eq!(normalized.column("GHI").unwrap().null_count(), 1);
        assert!(
            normalized
                .column("DNI")
                .unwrap()
                .as_materialized_series()
                .equals_missing(df.column("DNI").unwrap().as_materialized_series())
        );
        assert_eq!(normalized.get_column_names(), df.get_column_names());
    }

    #[test]
    fn test_empty_table_is_noop() {
        let cleaned = DataCleaner::forward_fill(&Table::empty()).unwrap();
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_schema_is_preserved() {
        let df = df!(
            "Country" => [Some("A"), None],
            "SolarOutput" => [Some(1i64), None],
        )
        .unwrap();
        let table = Table::new(df);

        let cleaned = DataCleaner::forward_fill(&table).unwrap();
        assert_eq!(cleaned.schema(), table.schema());
    }

    #[test]
    fn test_fill_summary() {
        let df = df!(
            "GHI" => [None, Some(2.0f64), None, None],
            "Country" => ["A", "A", "B", "B"],
        )
        .unwrap();
        let table = Table::new(df);
        let cleaned = DataCleaner::forward_fill(&table).unwrap();

        let summary = DataCleaner::fill_summary(&table, &cleaned);

        assert_eq!(
            summary,
            vec![ColumnFill {
                column: "GHI".to_string(),
                filled: 2,
                still_missing: 1,
            }]
        );
    }
}
