//! Per-entity incidence series indexed by epidemiological period.

use crate::core::period::EpiPeriod;
use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Spacing assumed between period start dates when none is configured and
/// the series is too short to infer one (four weeks).
pub const DEFAULT_SPACING_DAYS: i64 = 28;

/// Policy for handling missing-value markers (NaN/Inf).
///
/// Observations are never dropped: the grid search relies on positional
/// alignment with a fixed seasonal frequency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Replace missing markers with a specific value.
    Fill(f64),
    /// Carry the previous valid value forward (leading gaps become zero).
    ForwardFill,
    /// Return an error if any marker is found.
    #[default]
    Error,
}

/// An ordered incidence series for one entity.
///
/// Invariants checked at construction:
/// - dates are strictly increasing
/// - each period tag is the successor of the previous one
/// - period numbers fall in `1..=periods_per_year`
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    periods: Vec<EpiPeriod>,
    values: Vec<f64>,
    periods_per_year: u32,
    spacing: Duration,
}

/// Builder for constructing TimeSeries.
#[derive(Debug, Clone)]
pub struct TimeSeriesBuilder {
    dates: Vec<NaiveDate>,
    periods: Vec<EpiPeriod>,
    values: Vec<f64>,
    periods_per_year: u32,
    spacing: Option<Duration>,
}

impl Default for TimeSeriesBuilder {
    fn default() -> Self {
        Self {
            dates: Vec::new(),
            periods: Vec::new(),
            values: Vec::new(),
            periods_per_year: 13,
            spacing: None,
        }
    }
}

impl TimeSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.dates = dates;
        self
    }

    pub fn periods(mut self, periods: Vec<EpiPeriod>) -> Self {
        self.periods = periods;
        self
    }

    pub fn values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }

    pub fn periods_per_year(mut self, periods_per_year: u32) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    /// Distance between consecutive period start dates, used to date forecasts.
    pub fn spacing(mut self, spacing: Duration) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn build(self) -> Result<TimeSeries> {
        let mut series =
            TimeSeries::new(self.dates, self.periods, self.values, self.periods_per_year)?;
        if let Some(spacing) = self.spacing {
            if spacing <= Duration::zero() {
                return Err(ForecastError::InvalidParameter(
                    "spacing must be positive".to_string(),
                ));
            }
            series.spacing = spacing;
        }
        Ok(series)
    }
}

impl TimeSeries {
    /// Create a series from parallel date, period and value vectors.
    pub fn new(
        dates: Vec<NaiveDate>,
        periods: Vec<EpiPeriod>,
        values: Vec<f64>,
        periods_per_year: u32,
    ) -> Result<Self> {
        if periods_per_year == 0 {
            return Err(ForecastError::InvalidParameter(
                "periods_per_year must be positive".to_string(),
            ));
        }
        if periods.len() != dates.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: dates.len(),
                got: periods.len(),
            });
        }
        if values.len() != dates.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }

        for i in 1..dates.len() {
            if dates[i] <= dates[i - 1] {
                return Err(ForecastError::PeriodError(
                    "dates must be strictly increasing".to_string(),
                ));
            }
        }

        for (i, p) in periods.iter().enumerate() {
            if p.period == 0 || p.period > periods_per_year {
                return Err(ForecastError::PeriodError(format!(
                    "period {p} outside 1..={periods_per_year}"
                )));
            }
            if i > 0 && *p != periods[i - 1].next(periods_per_year) {
                return Err(ForecastError::PeriodError(format!(
                    "period {p} does not follow {}; gaps must be explicit markers",
                    periods[i - 1]
                )));
            }
        }

        let spacing = infer_spacing(&dates);

        Ok(Self {
            dates,
            periods,
            values,
            periods_per_year,
            spacing,
        })
    }

    /// Create a series of consecutive periods starting at `start`, with dates
    /// spaced `spacing` apart.
    pub fn from_start(
        start_date: NaiveDate,
        start_period: EpiPeriod,
        values: Vec<f64>,
        periods_per_year: u32,
        spacing: Duration,
    ) -> Result<Self> {
        let n = values.len();
        let dates: Vec<NaiveDate> = (0..n)
            .map(|i| start_date + spacing * i as i32)
            .collect();
        let periods: Vec<EpiPeriod> = std::iter::once(start_period)
            .chain(start_period.successors(periods_per_year, n.saturating_sub(1)))
            .take(n)
            .collect();

        TimeSeriesBuilder::new()
            .dates(dates)
            .periods(periods)
            .values(values)
            .periods_per_year(periods_per_year)
            .spacing(spacing)
            .build()
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn periods(&self) -> &[EpiPeriod] {
        &self.periods
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }

    /// Date and period tag of the last observation.
    pub fn last_observation(&self) -> Option<(NaiveDate, EpiPeriod)> {
        Some((*self.dates.last()?, *self.periods.last()?))
    }

    /// Extract a positional slice `[start, end)` of the series.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(ForecastError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(ForecastError::InsufficientData {
                needed: end,
                got: self.len(),
            });
        }

        Ok(TimeSeries {
            dates: self.dates[start..end].to_vec(),
            periods: self.periods[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
            periods_per_year: self.periods_per_year,
            spacing: self.spacing,
        })
    }

    /// Keep only the observations dated strictly before `cutoff`.
    pub fn truncated_before(&self, cutoff: NaiveDate) -> Result<TimeSeries> {
        let end = self.dates.partition_point(|d| *d < cutoff);
        self.slice(0, end)
    }

    /// Check if the series holds missing-value markers (NaN or Inf).
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// Return a copy with missing-value markers handled by `policy`.
    pub fn sanitized(&self, policy: MissingValuePolicy) -> Result<TimeSeries> {
        let values = match policy {
            MissingValuePolicy::Error => {
                if self.has_missing_values() {
                    return Err(ForecastError::MissingValues);
                }
                return Ok(self.clone());
            }
            MissingValuePolicy::Fill(fill_value) => self
                .values
                .iter()
                .map(|&v| if v.is_finite() { v } else { fill_value })
                .collect(),
            MissingValuePolicy::ForwardFill => {
                let mut last_valid = 0.0;
                self.values
                    .iter()
                    .map(|&v| {
                        if v.is_finite() {
                            last_valid = v;
                        }
                        last_valid
                    })
                    .collect()
            }
        };

        Ok(TimeSeries {
            values,
            ..self.clone()
        })
    }
}

/// Modal spacing between consecutive dates, or the default four weeks.
fn infer_spacing(dates: &[NaiveDate]) -> Duration {
    let mut diffs: Vec<i64> = dates
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .collect();
    if diffs.is_empty() {
        return Duration::days(DEFAULT_SPACING_DAYS);
    }
    diffs.sort_unstable();

    let mut best = diffs[0];
    let mut best_count = 0;
    let mut i = 0;
    while i < diffs.len() {
        let run = diffs[i..].iter().take_while(|&&d| d == diffs[i]).count();
        if run > best_count {
            best = diffs[i];
            best_count = run;
        }
        i += run;
    }
    Duration::days(best)
}
