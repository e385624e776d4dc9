//! Per-region series extraction and the derivative transform

use chrono::NaiveDate;

use crate::data::ObservationRecord;
use crate::dates::{truncate_to_date, DATE_FORMAT};
use crate::validate::PlotRequest;

/// How many of the most recent daily samples to keep
///
/// `max_last` is the number of days between the epoch and today; index `i`
/// of a complete regional series is day `i` after the epoch, so dropping the
/// first `max_last - last` samples keeps the days in `[today - last, today)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub last: usize,
    pub max_last: usize,
}

impl QueryWindow {
    /// Window covering the whole epoch-to-today span
    pub fn full(max_last: usize) -> Self {
        Self {
            last: max_last,
            max_last,
        }
    }

    /// Number of leading samples to drop
    pub fn skip(&self) -> usize {
        self.max_last.saturating_sub(self.last)
    }
}

/// A named sequence ready to be charted
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Largest value in the series, if any
    pub fn max(&self) -> Option<f64> {
        self.points.iter().copied().reduce(f64::max)
    }

    /// Smallest value in the series, if any
    pub fn min(&self) -> Option<f64> {
        self.points.iter().copied().reduce(f64::min)
    }
}

/// Extracts the cumulative case counts for `region` observed before `cutoff`
///
/// Records keep their dataset order. Records whose timestamp carries no date
/// separator cannot be placed in time and are skipped.
pub fn extract(
    dataset: &[ObservationRecord],
    region: &str,
    cutoff: NaiveDate,
    window: QueryWindow,
) -> Vec<u64> {
    let cutoff = cutoff.format(DATE_FORMAT).to_string();

    dataset
        .iter()
        .filter(|record| record.region == region)
        .filter(|record| {
            truncate_to_date(&record.timestamp)
                .map(|date| date < cutoff.as_str())
                .unwrap_or(false)
        })
        .map(|record| record.total_cases)
        .skip(window.skip())
        .collect()
}

/// Day-over-day rate of change of a cumulative series
///
/// `[c0, c1, ..., cn]` becomes `[c1 - c0, ..., cn - c(n-1)]`; inputs shorter
/// than two samples give an empty result.
pub fn differentiate(series: &[u64]) -> Vec<f64> {
    let values: Vec<f64> = series.iter().map(|&v| v as f64).collect();
    let positions: Vec<f64> = (0..series.len()).map(|i| i as f64).collect();
    differentiate_over(&values, &positions)
}

/// Finite differences of `values` divided by the differences of `positions`
///
/// A zero step yields 0 instead of an infinite or NaN slope.
pub fn differentiate_over(values: &[f64], positions: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .zip(positions.windows(2))
        .map(|(v, x)| {
            let dx = x[1] - x[0];
            if dx == 0.0 {
                0.0
            } else {
                (v[1] - v[0]) / dx
            }
        })
        .collect()
}

/// Builds one chartable series per requested region
pub fn build_series(dataset: &[ObservationRecord], request: &PlotRequest) -> Vec<Series> {
    request
        .regions
        .iter()
        .map(|region| {
            let cumulative = extract(dataset, region, request.cutoff, request.window);
            if request.derivative {
                Series::new(format!("d({})/dx", region), differentiate(&cumulative))
            } else {
                Series::new(*region, cumulative.iter().map(|&v| v as f64).collect())
            }
        })
        .collect()
}
