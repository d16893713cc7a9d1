//! Best-model selection and the published forecast.

use crate::core::{ForecastResult, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::sarima::Sarima;
use crate::models::Forecaster;
use crate::selection::scorer::ScoreRecord;
use serde::Serialize;

/// Forecast horizon and interval settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastSettings {
    pub horizon: usize,
    /// Coverage of the two-sided interval, in (0, 1).
    pub confidence_level: f64,
    /// Round point forecasts to whole counts.
    pub round_forecast: bool,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            horizon: 13,
            confidence_level: 0.95,
            round_forecast: true,
        }
    }
}

/// The minimum-MAPE candidate refitted on the complete series.
#[derive(Debug, Clone)]
pub struct SelectedModel {
    pub record: ScoreRecord,
    pub model: Sarima,
}

/// Sort records by MAPE ascending. Ties keep their generation order.
pub fn rank_by_mape(mut records: Vec<ScoreRecord>) -> Vec<ScoreRecord> {
    records.sort_by(|a, b| a.mape.total_cmp(&b.mape));
    records
}

/// Refit the first record of a ranked list on `series`.
///
/// Returns `None` when `ranked` is empty.
pub fn select_best(ranked: &[ScoreRecord], series: &TimeSeries) -> Result<Option<SelectedModel>> {
    let Some(best) = ranked.first() else {
        return Ok(None);
    };
    let mut model = Sarima::new(best.model);
    model.fit(series)?;
    Ok(Some(SelectedModel {
        record: best.clone(),
        model,
    }))
}

/// Forecast past the end of `series` with the selected model.
///
/// Steps are tagged with the periods and dates following the last
/// observation; point values and bounds are clamped at zero.
pub fn forecast_selected(
    selected: &SelectedModel,
    series: &TimeSeries,
    settings: &ForecastSettings,
) -> Result<ForecastResult> {
    let (last_date, last_period) = series.last_observation().ok_or(ForecastError::EmptyData)?;
    let mut forecast = selected
        .model
        .predict_with_intervals(settings.horizon, settings.confidence_level)?;
    if settings.round_forecast {
        forecast = forecast.round_point();
    }
    ForecastResult::from_forecast(
        forecast,
        last_date,
        last_period,
        series.periods_per_year(),
        series.spacing(),
        settings.confidence_level,
    )
}
