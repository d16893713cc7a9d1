//! Forecast containers: raw model output and the period-tagged result.

use crate::core::period::EpiPeriod;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Point predictions with optional prediction interval bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            point: values,
            lower: None,
            upper: None,
        }
    }

    /// Create a forecast with prediction intervals.
    pub fn from_values_with_intervals(
        values: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Result<Self> {
        if lower.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: values.len(),
                got: lower.len(),
            });
        }
        if upper.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: values.len(),
                got: upper.len(),
            });
        }
        Ok(Self {
            point: values,
            lower: Some(lower),
            upper: Some(upper),
        })
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Point predictions.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    /// Round point predictions to whole counts.
    pub fn round_point(mut self) -> Self {
        for v in &mut self.point {
            *v = v.round();
        }
        self
    }

    /// Replace negative or NaN predictions and bounds by zero.
    pub fn clamp_non_negative(mut self) -> Self {
        let clamp = |values: &mut Vec<f64>| {
            for v in values.iter_mut() {
                if !(*v >= 0.0) {
                    *v = 0.0;
                }
            }
        };
        clamp(&mut self.point);
        if let Some(lower) = self.lower.as_mut() {
            clamp(lower);
        }
        if let Some(upper) = self.upper.as_mut() {
            clamp(upper);
        }
        self
    }
}

/// One future period of a published forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastStep {
    /// Start date of the forecast period.
    pub date: NaiveDate,
    /// Epidemiological year/period of the step.
    #[serde(flatten)]
    pub period: EpiPeriod,
    pub forecast: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Period-tagged forecast with confidence bounds, all non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Coverage level of the interval bounds.
    pub level: f64,
    pub steps: Vec<ForecastStep>,
}

impl ForecastResult {
    /// Tag a forecast with the periods following `last_period`.
    ///
    /// Requires a forecast with intervals. Point values and bounds are clamped
    /// at zero.
    pub fn from_forecast(
        forecast: Forecast,
        last_date: NaiveDate,
        last_period: EpiPeriod,
        periods_per_year: u32,
        spacing: chrono::Duration,
        level: f64,
    ) -> Result<Self> {
        let forecast = forecast.clamp_non_negative();
        let (lower, upper) = match (forecast.lower(), forecast.upper()) {
            (Some(l), Some(u)) => (l, u),
            _ => {
                return Err(ForecastError::InvalidParameter(
                    "forecast has no interval bounds".to_string(),
                ))
            }
        };

        let steps = last_period
            .successors(periods_per_year, forecast.horizon())
            .enumerate()
            .map(|(i, period)| ForecastStep {
                date: last_date + spacing * (i as i32 + 1),
                period,
                forecast: forecast.point()[i],
                lower: lower[i],
                upper: upper[i],
            })
            .collect();

        Ok(Self { level, steps })
    }

    pub fn horizon(&self) -> usize {
        self.steps.len()
    }

    pub fn point(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.forecast).collect()
    }
}
