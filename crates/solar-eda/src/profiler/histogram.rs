//! Histogram binning and Gaussian kernel density estimation.

use super::statistics::{quantile, sample_std};
use crate::config::BinStrategy;
use crate::types::{DensityPoint, HistogramBin, HistogramPlot};

/// Build the histogram plot for one column.
pub(crate) fn build_histogram(
    column: &str,
    values: &[f64],
    strategy: BinStrategy,
    grid_points: usize,
) -> HistogramPlot {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let bin_count = match strategy {
        BinStrategy::Auto => auto_bin_count(&sorted),
        BinStrategy::Fixed(n) => n.max(1),
    };

    HistogramPlot {
        column: column.to_string(),
        title: format!("Distribution of {}", column),
        bins: bin_values(&sorted, bin_count),
        density: gaussian_kde(&sorted, grid_points),
    }
}

/// Upper bound on the Freedman-Diaconis bin count.
pub(crate) const MAX_AUTO_BINS: usize = 1000;

/// Bin count from the finer of the Sturges and Freedman-Diaconis widths.
///
/// Freedman-Diaconis is ignored when the interquartile range is zero or when
/// it would need more than [`MAX_AUTO_BINS`] bins, as happens when a few
/// outliers stretch the range far beyond the IQR.
pub(crate) fn auto_bin_count(sorted: &[f64]) -> usize {
    let n = sorted.len();
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return 1;
    };
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return 1;
    }

    let sturges_bins = ((n as f64).log2() + 1.0).ceil().max(1.0) as usize;
    let iqr = match (quantile(sorted, 0.75), quantile(sorted, 0.25)) {
        (Some(q3), Some(q1)) => q3 - q1,
        _ => 0.0,
    };
    let fd_width = 2.0 * iqr / (n as f64).cbrt();
    if !fd_width.is_finite() || fd_width <= 0.0 {
        return sturges_bins;
    }

    let fd_bins = (range / fd_width).ceil();
    if fd_bins.is_finite() && fd_bins <= MAX_AUTO_BINS as f64 {
        (fd_bins as usize).max(sturges_bins)
    } else {
        sturges_bins
    }
}

/// Count sorted values into `bin_count` equal-width bins spanning the data.
///
/// A constant column gets a single bin of width 1 centred on the value.
pub(crate) fn bin_values(sorted: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };

    if !(max - min).is_finite() {
        return Vec::new();
    }

    let (lower, upper, bin_count) = if max > min {
        (min, max, bin_count.max(1))
    } else {
        (min - 0.5, max + 0.5, 1)
    };
    let width = (upper - lower) / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: lower + width * i as f64,
            upper: if i + 1 == bin_count {
                upper
            } else {
                lower + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &v in sorted {
        let idx = (((v - lower) / width).floor() as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    bins
}

/// Gaussian KDE with Scott's bandwidth, evaluated on an even grid over the
/// data range.
///
/// Returns no points when the values have fewer than two elements or zero
/// spread.
pub(crate) fn gaussian_kde(sorted: &[f64], grid_points: usize) -> Vec<DensityPoint> {
    let n = sorted.len();
    let Some(std) = sample_std(sorted) else {
        return Vec::new();
    };
    if !std.is_finite() || std <= 0.0 || grid_points < 2 {
        return Vec::new();
    }

    let bandwidth = std * (n as f64).powf(-1.0 / 5.0);
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let min = sorted[0];
    let max = sorted[n - 1];
    let step = (max - min) / (grid_points - 1) as f64;

    (0..grid_points)
        .map(|i| {
            let x = min + step * i as f64;
            let density = sorted
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            DensityPoint { x, density }
        })
        .collect()
}
