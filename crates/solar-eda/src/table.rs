//! In-memory table with an explicit column schema.

use crate::error::{EdaError, Result, ResultExt};
use crate::utils::{ColumnKind, column_kind};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Name and kind of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub kind: ColumnKind,
    /// Backend dtype as text, e.g. "Int64"
    pub dtype: String,
}

/// Ordered column schema of a [`Table`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Derive the schema from a frame's dtypes.
    pub fn from_frame(df: &DataFrame) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnSchema {
                name: col.name().to_string(),
                kind: column_kind(col.dtype()),
                dtype: format!("{:?}", col.dtype()),
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of numeric columns in table order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A loaded dataset: a polars frame plus the schema fixed at load time.
///
/// Cloning is cheap; column buffers are shared until replaced.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
    schema: TableSchema,
}

impl Table {
    /// Wrap a frame, classifying its columns.
    pub fn new(frame: DataFrame) -> Self {
        let schema = TableSchema::from_frame(&frame);
        Self { frame, schema }
    }

    /// A table with zero rows and zero columns.
    pub fn empty() -> Self {
        Self::new(DataFrame::empty())
    }

    /// Replace the frame while keeping this table's schema.
    pub(crate) fn with_frame(&self, frame: DataFrame) -> Self {
        Self {
            frame,
            schema: self.schema.clone(),
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    /// True when the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.schema.contains(name)
    }

    /// Non-missing values of a numeric column as `f64`, in row order.
    ///
    /// NaN cells count as missing.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        let column = self
            .schema
            .get(name)
            .ok_or_else(|| EdaError::ColumnNotFound(name.to_string()))?;
        if column.kind != ColumnKind::Numeric {
            return Err(EdaError::NonNumericColumn {
                column: name.to_string(),
                dtype: column.dtype.clone(),
            });
        }

        let series = self
            .frame
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::Float64)
            .context(format!("Casting '{}' to Float64", name))?;
        let values = series
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let df = df!(
            "Country" => ["A", "B", "A"],
            "SolarOutput" => [Some(10i64), None, Some(30)],
            "Sunny" => [true, false, true],
        )
        .unwrap();
        Table::new(df)
    }

    #[test]
    fn test_schema_classification() {
        let table = sample_table();
        let schema = table.schema();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.get("Country").unwrap().kind, ColumnKind::Text);
        assert_eq!(schema.get("SolarOutput").unwrap().kind, ColumnKind::Numeric);
        assert_eq!(schema.get("Sunny").unwrap().kind, ColumnKind::Boolean);
    }

    #[test]
    fn test_numeric_columns_in_order() {
        let df = df!(
            "b" => [1.0f64, 2.0],
            "label" => ["x", "y"],
            "a" => [3i32, 4],
        )
        .unwrap();
        let table = Table::new(df);
        let numeric: Vec<&str> = table.schema().numeric_columns().collect();
        assert_eq!(numeric, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::empty();
        assert!(table.is_empty());
        assert_eq!(table.shape(), (0, 0));
        assert!(table.schema().is_empty());
    }

    #[test]
    fn test_numeric_values_skip_missing() {
        let table = sample_table();
        assert_eq!(table.numeric_values("SolarOutput").unwrap(), vec![10.0, 30.0]);
    }

    #[test]
    fn test_numeric_values_rejects_text() {
        let table = sample_table();
        let err = table.numeric_values("Country").unwrap_err();
        assert!(matches!(err, EdaError::NonNumericColumn { .. }));
    }

    #[test]
    fn test_numeric_values_unknown_column() {
        let table = sample_table();
        let err = table.numeric_values("Irradiance").unwrap_err();
        assert!(matches!(err, EdaError::ColumnNotFound(_)));
    }
}
