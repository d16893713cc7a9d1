//! Candidate scoring: fit, validate on a holdout window, accept or reject.

use crate::error::{ForecastError, Result};
use crate::models::sarima::{ModelConfig, PredictionMode, Sarima};
use crate::utils::metrics::{mape, rmse};
use crate::utils::signal::{tracking_signal, variation_coefficient_delta, TrackingSignal};
use serde::Serialize;
use std::fmt;

/// Why a candidate did not make it into the accepted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Series too short for the candidate or for the validation window.
    InsufficientData,
    /// Estimation returned an error.
    FitFailed,
    /// The coefficient search hit its iteration limit.
    NotConverged,
    /// AIC and BIC are both non-positive.
    DegenerateFit,
    /// RMSE or MAPE is not finite.
    NonFiniteMetric,
    MapeNotAboveThreshold,
    NoTrackingBreach,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rejection::InsufficientData => "insufficient data",
            Rejection::FitFailed => "fit failed",
            Rejection::NotConverged => "optimizer did not converge",
            Rejection::DegenerateFit => "AIC and BIC are both non-positive",
            Rejection::NonFiniteMetric => "non-finite validation metric",
            Rejection::MapeNotAboveThreshold => "MAPE not above threshold",
            Rejection::NoTrackingBreach => "tracking signal never breached",
        };
        f.write_str(text)
    }
}

/// Acceptance rules applied to every candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRules {
    /// Fraction of the series held out for validation.
    pub test_fraction: f64,
    /// MAPE must be strictly above this value.
    pub mape_threshold: f64,
    /// Tracking-signal tolerance.
    pub tracking_tolerance: f64,
    /// Round validation predictions to whole counts and clamp them at zero.
    pub round_predictions: bool,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            mape_threshold: 0.0,
            tracking_tolerance: 4.0,
            round_predictions: true,
        }
    }
}

/// Holdout metrics of one fitted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidationMetrics {
    /// Mean of one-step and dynamic RMSE.
    pub rmse: f64,
    /// Mean of one-step and dynamic MAPE.
    pub mape: f64,
    pub one_step_rmse: f64,
    pub one_step_mape: f64,
    pub dynamic_rmse: f64,
    pub dynamic_mape: f64,
    /// Tracking signal of the dynamic predictions.
    pub tracking: TrackingSignal,
    /// Variation-coefficient delta between series and dynamic predictions.
    pub variation_delta: f64,
}

/// An accepted candidate with its fit and validation scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub model: ModelConfig,
    pub label: String,
    pub aic: f64,
    pub bic: f64,
    pub rmse: f64,
    pub mape: f64,
    /// 1-indexed first breach step within the validation window.
    pub tracking_signal_period: usize,
    /// Fraction of validation steps within the tracking tolerance.
    pub tracking_signal_coverage: f64,
    pub variation_delta: f64,
}

/// First index of the validation window: `ceil(n · (1 - test_fraction))`.
pub fn validation_start(n: usize, test_fraction: f64) -> usize {
    (n as f64 * (1.0 - test_fraction)).ceil() as usize
}

fn prepare(predictions: Vec<f64>, round: bool) -> Vec<f64> {
    if !round {
        return predictions;
    }
    predictions.into_iter().map(|p| p.round().max(0.0)).collect()
}

/// Compare one-step and dynamic predictions of a fitted model against
/// `values[start..]`.
pub fn validation_metrics(
    model: &Sarima,
    values: &[f64],
    start: usize,
    round_predictions: bool,
    tracking_tolerance: f64,
) -> Result<ValidationMetrics> {
    if start >= values.len() {
        return Err(ForecastError::InvalidParameter(format!(
            "validation start {start} is outside a series of length {}",
            values.len()
        )));
    }
    let actual = &values[start..];
    let one_step = prepare(
        model.predict_in_sample(start, PredictionMode::OneStep)?,
        round_predictions,
    );
    let dynamic = prepare(
        model.predict_in_sample(start, PredictionMode::Dynamic)?,
        round_predictions,
    );

    let one_step_rmse = rmse(actual, &one_step)?;
    let one_step_mape = mape(actual, &one_step)?;
    let dynamic_rmse = rmse(actual, &dynamic)?;
    let dynamic_mape = mape(actual, &dynamic)?;

    Ok(ValidationMetrics {
        rmse: (one_step_rmse + dynamic_rmse) / 2.0,
        mape: (one_step_mape + dynamic_mape) / 2.0,
        one_step_rmse,
        one_step_mape,
        dynamic_rmse,
        dynamic_mape,
        tracking: tracking_signal(actual, &dynamic, tracking_tolerance)?,
        variation_delta: variation_coefficient_delta(values, &dynamic),
    })
}

/// Fit `config` on the full series and score it on the holdout window.
///
/// Never fails: every numerical problem becomes a [`Rejection`]. The holdout
/// rules (finite metrics, MAPE threshold, tracking breach) are checked before
/// the information criteria, so the reported reason for a perfect fit is the
/// MAPE rule.
pub fn score_candidate(
    values: &[f64],
    config: &ModelConfig,
    rules: &ScoringRules,
) -> std::result::Result<ScoreRecord, Rejection> {
    let n = values.len();
    let start = validation_start(n, rules.test_fraction);
    if start >= n || start < config.diff_lag() || n < config.min_observations() {
        return Err(Rejection::InsufficientData);
    }

    let mut model = Sarima::new(*config);
    model.fit_values(values).map_err(|e| match e {
        ForecastError::InsufficientData { .. } => Rejection::InsufficientData,
        _ => Rejection::FitFailed,
    })?;
    if !model.converged() {
        return Err(Rejection::NotConverged);
    }

    let metrics = validation_metrics(
        &model,
        values,
        start,
        rules.round_predictions,
        rules.tracking_tolerance,
    )
    .map_err(|_| Rejection::FitFailed)?;

    if !metrics.rmse.is_finite() || !metrics.mape.is_finite() {
        return Err(Rejection::NonFiniteMetric);
    }
    if metrics.mape <= rules.mape_threshold {
        return Err(Rejection::MapeNotAboveThreshold);
    }
    if metrics.tracking.first_breach == 0 {
        return Err(Rejection::NoTrackingBreach);
    }

    // A zero-residual fit floors sigma2 and drives both criteria negative;
    // the holdout rules above have already judged such fits.
    let (aic, bic) = match (model.aic(), model.bic()) {
        (Some(aic), Some(bic)) => (aic, bic),
        _ => return Err(Rejection::FitFailed),
    };
    if !(aic > 0.0 || bic > 0.0) {
        return Err(Rejection::DegenerateFit);
    }

    Ok(ScoreRecord {
        model: *config,
        label: config.to_string(),
        aic,
        bic,
        rmse: metrics.rmse,
        mape: metrics.mape,
        tracking_signal_period: metrics.tracking.first_breach,
        tracking_signal_coverage: metrics.tracking.coverage,
        variation_delta: metrics.variation_delta,
    })
}
