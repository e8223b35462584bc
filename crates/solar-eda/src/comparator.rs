//! Cross-category comparison of a numeric metric.

use crate::display::DisplaySink;
use crate::error::{EdaError, Result, ResultExt};
use crate::table::Table;
use crate::types::{Bar, BarChart, GroupMean, GroupedAggregate};
use crate::utils::ColumnKind;
use polars::prelude::*;
use tracing::{debug, info};

/// Axis label used for the category axis of the comparison chart.
pub const CATEGORY_AXIS_LABEL: &str = "Country";

/// Output name of the aggregated mean, kept apart from the key column so the
/// category and the metric may be the same column.
const MEAN_COLUMN: &str = "__group_mean";

/// Mean of `metric` per distinct value of `category`, ranked descending.
///
/// Rows with a missing category are dropped. Missing metric cells are
/// ignored, NaN included; a group with no metric values gets no mean and
/// ranks last.
/// Equal means keep ascending category order.
pub fn grouped_means(table: &Table, category: &str, metric: &str) -> Result<GroupedAggregate> {
    let schema = table.schema();
    if !schema.contains(category) {
        return Err(EdaError::ColumnNotFound(category.to_string()));
    }
    let metric_schema = schema
        .get(metric)
        .ok_or_else(|| EdaError::ColumnNotFound(metric.to_string()))?;
    if metric_schema.kind != ColumnKind::Numeric {
        return Err(EdaError::NonNumericColumn {
            column: metric.to_string(),
            dtype: metric_schema.dtype.clone(),
        });
    }

    let grouped = table
        .frame()
        .clone()
        .lazy()
        .filter(col(category).is_not_null())
        .group_by([col(category)])
        .agg([col(metric)
            .cast(DataType::Float64)
            .fill_nan(lit(NULL))
            .mean()
            .alias(MEAN_COLUMN)])
        .sort([category], SortMultipleOptions::default())
        .sort(
            [MEAN_COLUMN],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .collect()
        .context(format!("Grouping '{}' by '{}'", metric, category))?;

    let labels = grouped
        .column(category)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let means = grouped.column(MEAN_COLUMN)?.as_materialized_series();

    let groups = labels
        .str()?
        .into_iter()
        .zip(means.f64()?)
        .map(|(label, mean)| GroupMean {
            category: label.unwrap_or_default().to_string(),
            mean: mean.filter(|m| !m.is_nan()),
        })
        .collect::<Vec<_>>();

    debug!("Computed {} group means", groups.len());

    Ok(GroupedAggregate {
        category_column: category.to_string(),
        metric_column: metric.to_string(),
        groups,
    })
}

/// Bar chart of the ranked means. Groups without a mean have no bar.
pub fn bar_chart(aggregate: &GroupedAggregate) -> BarChart {
    BarChart {
        title: format!("Average {} by Country", aggregate.metric_column),
        x_label: CATEGORY_AXIS_LABEL.to_string(),
        y_label: aggregate.metric_column.clone(),
        bars: aggregate
            .ranked_values()
            .into_iter()
            .map(|(label, value)| Bar {
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

/// Rank categories by mean metric, show the ranking and render the chart.
pub fn cross_country_summary(
    table: &Table,
    category: &str,
    metric: &str,
    sink: &dyn DisplaySink,
) -> Result<GroupedAggregate> {
    let aggregate = grouped_means(table, category, metric)?;
    info!(
        "Compared {} '{}' groups on '{}'",
        aggregate.groups.len(),
        category,
        metric
    );

    sink.show_ranking(&aggregate)?;
    sink.render_bar_chart(&bar_chart(&aggregate))?;

    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayEvent, RecordingSink};

    fn means(aggregate: &GroupedAggregate) -> Vec<(String, Option<f64>)> {
        aggregate
            .groups
            .iter()
            .map(|g| (g.category.clone(), g.mean))
            .collect()
    }

    #[test]
    fn test_grouped_means_ranked_descending() {
        let df = df!(
            "Country" => ["A", "B", "A", "B", "C"],
            "SolarOutput" => [10i64, 20, 10, 30, 5],
        )
        .unwrap();
        let aggregate = grouped_means(&Table::new(df), "Country", "SolarOutput").unwrap();

        assert_eq!(
            means(&aggregate),
            vec![
                ("B".to_string(), Some(25.0)),
                ("A".to_string(), Some(10.0)),
                ("C".to_string(), Some(5.0)),
            ]
        );
    }

    #[test]
    fn test_ties_keep_category_order() {
        let df = df!(
            "Country" => ["Togo", "Benin", "Niger", "Benin"],
            "SolarOutput" => [4.0f64, 2.0, 4.0, 6.0],
        )
        .unwrap();
        let aggregate = grouped_means(&Table::new(df), "Country", "SolarOutput").unwrap();
        let order: Vec<&str> = aggregate.groups.iter().map(|g| g.category.as_str()).collect();

        assert_eq!(order, vec!["Benin", "Niger", "Togo"]);
    }

    #[test]
    fn test_missing_values_handling() {
        let df = df!(
            "Country" => [Some("A"), None, Some("B"), Some("C")],
            "SolarOutput" => [Some(3.0f64), Some(100.0), Some(1.0), None],
        )
        .unwrap();
        let aggregate = grouped_means(&Table::new(df), "Country", "SolarOutput").unwrap();

        assert_eq!(
            means(&aggregate),
            vec![
                ("A".to_string(), Some(3.0)),
                ("B".to_string(), Some(1.0)),
                ("C".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_nan_metric_ranks_last() {
        let df = df!(
            "Country" => ["A", "B", "C", "A"],
            "SolarOutput" => [1.0f64, f64::NAN, 5.0, f64::NAN],
        )
        .unwrap();
        let aggregate = grouped_means(&Table::new(df), "Country", "SolarOutput").unwrap();

        assert_eq!(
            means(&aggregate),
            vec![
                ("C".to_string(), Some(5.0)),
                ("A".to_string(), Some(1.0)),
                ("B".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_category_and_metric_same_column() {
        let df = df!(
            "Zone" => [2i64, 1, 2, 3],
            "GHI" => [1.0f64, 5.0, 3.0, 4.0],
        )
        .unwrap();
        let aggregate = grouped_means(&Table::new(df), "Zone", "Zone").unwrap();

        assert_eq!(
            means(&aggregate),
            vec![
                ("3".to_string(), Some(3.0)),
                ("2".to_string(), Some(2.0)),
                ("1".to_string(), Some(1.0)),
            ]
        );
    }

    #[test]
    fn test_numeric_category_labels() {
        let df = df!(
            "Zone" => [2i64, 1, 2],
            "GHI" => [1.0f64, 5.0, 3.0],
        )
        .unwrap();
        let aggregate = grouped_means(&Table::new(df), "Zone", "GHI").unwrap();
        assert_eq!(
            means(&aggregate),
            vec![("1".to_string(), Some(5.0)), ("2".to_string(), Some(2.0))]
        );
    }

    #[test]
    fn test_non_numeric_metric_fails() {
        let df = df!(
            "Country" => ["A", "B"],
            "Status" => ["ok", "fault"],
        )
        .unwrap();
        let err = grouped_means(&Table::new(df), "Country", "Status").unwrap_err();
        assert!(matches!(err, EdaError::NonNumericColumn { .. }));
    }

    #[test]
    fn test_unknown_column_fails() {
        let df = df!("SolarOutput" => [1.0f64]).unwrap();
        let err = grouped_means(&Table::new(df), "Country", "SolarOutput").unwrap_err();
        assert!(matches!(err, EdaError::ColumnNotFound(ref c) if c == "Country"));
    }

    #[test]
    fn test_bar_chart_labels() {
        let aggregate = GroupedAggregate {
            category_column: "Country".to_string(),
            metric_column: "SolarOutput".to_string(),
            groups: vec![
                GroupMean { category: "B".to_string(), mean: Some(25.0) },
                GroupMean { category: "A".to_string(), mean: Some(10.0) },
                GroupMean { category: "C".to_string(), mean: None },
            ],
        };
        let chart = bar_chart(&aggregate);

        assert_eq!(chart.title, "Average SolarOutput by Country");
        assert_eq!(chart.x_label, "Country");
        assert_eq!(chart.y_label, "SolarOutput");
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "A"]);
    }

    #[test]
    fn test_cross_country_summary_emits_ranking_and_chart() {
        let df = df!(
            "Country" => ["A", "B"],
            "SolarOutput" => [1.0f64, 2.0],
        )
        .unwrap();
        let sink = RecordingSink::new();

        cross_country_summary(&Table::new(df), "Country", "SolarOutput", &sink).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], DisplayEvent::Ranking(_)));
        assert!(matches!(events[1], DisplayEvent::BarChart(_)));
    }
}
