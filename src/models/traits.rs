//! Forecaster trait defining the common interface of fitted models.

use crate::core::{Forecast, TimeSeries};
use crate::error::Result;

/// Common interface for forecasting models.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the series values.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Point forecast for `horizon` steps past the end of the series.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Point forecast with two-sided bounds at coverage `level`.
    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let _ = level;
        self.predict(horizon)
    }

    /// One-step in-sample predictions, aligned with the series.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// In-sample residuals, aligned with the series.
    fn residuals(&self) -> Option<&[f64]>;

    fn name(&self) -> &str;

    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}
