//! Forecast-bias and dispersion signals used to accept or reject candidates.

use crate::error::{ForecastError, Result};
use crate::utils::stats::{mean, population_std_dev};
use serde::Serialize;

/// Aggregate tracking-signal outcome over a validation window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackingSignal {
    /// 1-indexed step of the first breach, 0 when the signal never breaches.
    pub first_breach: usize,
    /// Fraction of steps whose signal stays within the tolerance.
    pub coverage: f64,
}

/// Running tracking signal `ts_t = cum_error / (cum_abs_dev / t)`.
///
/// Errors are `actual - predicted`. A step with zero cumulative absolute
/// deviation has signal 0.
pub fn tracking_signal_series(actual: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let mut cum_error = 0.0;
    let mut cum_abs = 0.0;
    Ok(actual
        .iter()
        .zip(predicted)
        .enumerate()
        .map(|(i, (a, p))| {
            let err = a - p;
            cum_error += err;
            cum_abs += err.abs();
            let mad = cum_abs / (i + 1) as f64;
            if mad == 0.0 {
                0.0
            } else {
                cum_error / mad
            }
        })
        .collect())
}

/// First 1-indexed step where `|ts_t| > tolerance`, or 0 when none does.
pub fn tracking_signal_breach(actual: &[f64], predicted: &[f64], tolerance: f64) -> Result<usize> {
    let signal = tracking_signal_series(actual, predicted)?;
    Ok(first_breach(&signal, tolerance))
}

/// First breach together with the share of steps within tolerance.
pub fn tracking_signal(actual: &[f64], predicted: &[f64], tolerance: f64) -> Result<TrackingSignal> {
    let signal = tracking_signal_series(actual, predicted)?;
    let within = signal.iter().filter(|ts| ts.abs() <= tolerance).count();
    Ok(TrackingSignal {
        first_breach: first_breach(&signal, tolerance),
        coverage: within as f64 / signal.len() as f64,
    })
}

fn first_breach(signal: &[f64], tolerance: f64) -> usize {
    signal
        .iter()
        .position(|ts| ts.abs() > tolerance)
        .map_or(0, |i| i + 1)
}

/// Coefficient of variation in percent: population std-dev over mean.
///
/// NaN for an empty slice; non-finite when the mean is zero.
pub fn variation_coefficient(values: &[f64]) -> f64 {
    population_std_dev(values) / mean(values) * 100.0
}

/// Absolute difference between the variation coefficients of a series and of
/// its predictions, or the series' own coefficient when the prediction's is NaN.
pub fn variation_coefficient_delta(series: &[f64], predicted: &[f64]) -> f64 {
    let base = variation_coefficient(series);
    let other = variation_coefficient(predicted);
    if other.is_nan() {
        base
    } else {
        (base - other).abs()
    }
}
