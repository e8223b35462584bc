//! Descriptive statistics over plain value slices.

use crate::types::SummaryRecord;

/// Summarize the values of one column. `values` need not be sorted.
pub(crate) fn describe(column: &str, values: &[f64]) -> SummaryRecord {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    SummaryRecord {
        column: column.to_string(),
        count: sorted.len(),
        mean: mean(&sorted),
        std: sample_std(&sorted),
        min: sorted.first().copied(),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with Bessel's correction (n - 1).
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() as f64 - 1.0);
    Some(variance.sqrt())
}

/// Quantile of sorted values with linear interpolation between the two
/// nearest ranks.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_basic() {
        let record = describe("val", &[5.0, 1.0, 3.0, 2.0, 4.0]);
        assert_eq!(record.count, 5);
        assert_eq!(record.mean, Some(3.0));
        assert_eq!(record.min, Some(1.0));
        assert_eq!(record.q25, Some(2.0));
        assert_eq!(record.median, Some(3.0));
        assert_eq!(record.q75, Some(4.0));
        assert_eq!(record.max, Some(5.0));
        // Variance = 10 / 4 = 2.5
        assert!((record.std.unwrap() - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        // pos = 0.25 * 3 = 0.75
        assert_eq!(quantile(&sorted, 0.25), Some(17.5));
        assert_eq!(quantile(&sorted, 0.5), Some(25.0));
        assert_eq!(quantile(&sorted, 0.75), Some(32.5));
        assert_eq!(quantile(&sorted, 1.0), Some(40.0));
    }

    #[test]
    fn test_single_value() {
        let record = describe("val", &[7.0]);
        assert_eq!(record.count, 1);
        assert_eq!(record.mean, Some(7.0));
        assert_eq!(record.std, None);
        assert_eq!(record.q25, Some(7.0));
        assert_eq!(record.max, Some(7.0));
    }

    #[test]
    fn test_no_values() {
        let record = describe("val", &[]);
        assert_eq!(record.count, 0);
        assert_eq!(record.mean, None);
        assert_eq!(record.min, None);
        assert_eq!(record.median, None);
    }

    #[test]
    fn test_identical_values_have_zero_std() {
        assert_eq!(sample_std(&[5.0, 5.0, 5.0, 5.0]), Some(0.0));
    }

    #[test]
    fn test_order_statistics_are_monotonic() {
        let values = [3.2, -1.0, 8.5, 0.0, 0.0, 12.25, 4.75, 6.0, -3.5];
        let record = describe("val", &values);
        assert_eq!(record.count, values.len());

        let ordered = [
            record.min.unwrap(),
            record.q25.unwrap(),
            record.median.unwrap(),
            record.q75.unwrap(),
            record.max.unwrap(),
        ];
        assert!(ordered.windows(2).all(|w| w[0] <= w[1]));
    }
}
