// petrors-logs/src/stats.rs

use ndarray::Array1;
use ndarray_stats::interpolate::Linear;
use ndarray_stats::{Quantile1dExt, QuantileExt};
use noisy_float::types::{n64, N64};

/// Keeps the finite values of a curve.
pub fn valid_values<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect()
}

/// Linearly interpolated quantile, `q` in [0, 1].
///
/// Values must be finite. Returns `None` for an empty slice or a `q` outside
/// the unit interval.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut observations: Array1<N64> = values.iter().map(|&v| n64(v)).collect();
    observations
        .quantile_mut(n64(q), &Linear)
        .ok()
        .map(|value| value.raw())
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Median and quartiles of a curve's valid values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quartiles {
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
}

impl Quartiles {
    pub fn of(values: &[f64]) -> Option<Self> {
        Some(Self {
            p25: quantile(values, 0.25)?,
            median: quantile(values, 0.5)?,
            p75: quantile(values, 0.75)?,
        })
    }
}

/// Mean, extremes and population of a derived property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertySummary {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub valid: usize,
}

impl PropertySummary {
    pub fn of(values: &[f64]) -> Self {
        let values = Array1::from(values.to_vec());
        Self {
            mean: values.mean(),
            min: values.min().ok().copied(),
            max: values.max().ok().copied(),
            valid: values.len(),
        }
    }
}
