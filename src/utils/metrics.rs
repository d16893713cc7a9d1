//! Accuracy metrics and information criteria for candidate scoring.

use crate::error::{ForecastError, Result};
use crate::utils::stats::mean;

/// Check that `actual` and `predicted` are non-empty and aligned.
fn check_aligned(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    Ok(())
}

/// Root mean squared error.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_aligned(actual, predicted)?;
    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;
    Ok(mse.sqrt())
}

/// Relative error per observation.
///
/// A zero actual value has no defined relative error; it is replaced by
/// `predicted / mean(actual)`. When `mean(actual)` is itself zero the
/// substituted term is non-finite.
pub fn percentage_errors(actual: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
    check_aligned(actual, predicted)?;
    let actual_mean = mean(actual);
    Ok(actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| {
            if a != 0.0 {
                (a - p) / a
            } else {
                p / actual_mean
            }
        })
        .collect())
}

/// Mean absolute percentage error, in percent.
///
/// See [`percentage_errors`] for the zero-actual substitution.
pub fn mape(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    let errors = percentage_errors(actual, predicted)?;
    Ok(100.0 * errors.iter().map(|e| e.abs()).sum::<f64>() / errors.len() as f64)
}

/// Akaike and Bayesian information criteria for a Gaussian likelihood.
///
/// Returns `(aic, bic)`.
pub fn information_criteria(log_likelihood: f64, n_params: usize, n_obs: usize) -> (f64, f64) {
    let k = n_params as f64;
    let aic = -2.0 * log_likelihood + 2.0 * k;
    let bic = -2.0 * log_likelihood + k * (n_obs as f64).ln();
    (aic, bic)
}

/// Gaussian log-likelihood implied by a residual variance over `n_obs`
/// observations.
pub fn gaussian_log_likelihood(variance: f64, n_obs: usize) -> f64 {
    let n = n_obs as f64;
    -0.5 * n * (1.0 + (2.0 * std::f64::consts::PI * variance).ln())
}
