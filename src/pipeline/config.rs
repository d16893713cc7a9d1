//! Pipeline configuration: defaults, JSON loading and range validation.

use crate::core::MissingValuePolicy;
use crate::error::{ForecastError, Result};
use crate::models::sarima::Trend;
use crate::selection::{ExecutionMode, ForecastSettings, GridSearchConfig, ScoringRules};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A named training window. `cutoff` keeps observations dated strictly
/// before it; without one the whole series is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisVariant {
    pub name: String,
    #[serde(default)]
    pub cutoff: Option<NaiveDate>,
}

impl AnalysisVariant {
    /// The whole series, named "full".
    pub fn full() -> Self {
        Self {
            name: "full".to_string(),
            cutoff: None,
        }
    }

    /// Observations before `cutoff`, named "partial".
    pub fn partial(cutoff: NaiveDate) -> Self {
        Self {
            name: "partial".to_string(),
            cutoff: Some(cutoff),
        }
    }
}

/// The single axis on which work runs concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallelAxis {
    /// Entities in parallel, candidates sequential inside each.
    #[default]
    Entities,
    /// Entities one after another, candidates in parallel.
    Candidates,
    /// Everything on the calling thread.
    None,
}

/// Settings consumed by the entity driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fraction of each series held out for validation.
    pub test_fraction: f64,
    pub mape_threshold: f64,
    pub tracking_tolerance: f64,
    pub horizon: usize,
    pub confidence_level: f64,
    pub seasonal_period: usize,
    pub periods_per_year: u32,
    /// Exclusive bound on every SARIMA order.
    pub order_bound: usize,
    pub trend: Trend,
    /// Round validation predictions and point forecasts to whole counts.
    pub round_predictions: bool,
    pub missing_values: MissingValuePolicy,
    pub variants: Vec<AnalysisVariant>,
    /// Explicit worker count; derived from available parallelism when unset.
    pub workers: Option<usize>,
    /// Cores left free when deriving the worker count.
    pub reserved_cores: usize,
    pub parallel_axis: ParallelAxis,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            mape_threshold: 0.0,
            tracking_tolerance: 4.0,
            horizon: 13,
            confidence_level: 0.95,
            seasonal_period: 13,
            periods_per_year: 13,
            order_bound: 3,
            trend: Trend::Constant,
            round_predictions: true,
            missing_values: MissingValuePolicy::Error,
            variants: vec![AnalysisVariant::full()],
            workers: None,
            reserved_cores: 1,
            parallel_axis: ParallelAxis::Entities,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Check every setting against its allowed range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(ForecastError::InvalidConfig(msg)) };

        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return invalid(format!("test_fraction must be in (0, 1), got {}", self.test_fraction));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return invalid(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            ));
        }
        if !(self.mape_threshold.is_finite() && self.mape_threshold >= 0.0) {
            return invalid(format!(
                "mape_threshold must be finite and non-negative, got {}",
                self.mape_threshold
            ));
        }
        if !(self.tracking_tolerance > 0.0) {
            return invalid(format!(
                "tracking_tolerance must be positive, got {}",
                self.tracking_tolerance
            ));
        }
        if self.horizon == 0 {
            return invalid("horizon must be at least 1".to_string());
        }
        if self.seasonal_period < 2 {
            return invalid(format!(
                "seasonal_period must be at least 2, got {}",
                self.seasonal_period
            ));
        }
        if self.periods_per_year == 0 {
            return invalid("periods_per_year must be at least 1".to_string());
        }
        if !(1..=3).contains(&self.order_bound) {
            return invalid(format!("order_bound must be in 1..=3, got {}", self.order_bound));
        }
        if self.workers == Some(0) {
            return invalid("workers must be at least 1".to_string());
        }
        if let MissingValuePolicy::Fill(v) = self.missing_values {
            if !v.is_finite() {
                return invalid("missing-value fill must be finite".to_string());
            }
        }

        if self.variants.is_empty() {
            return invalid("at least one analysis variant is required".to_string());
        }
        let mut seen = HashSet::new();
        for variant in &self.variants {
            if variant.name.trim().is_empty() {
                return invalid("variant names must not be empty".to_string());
            }
            if !seen.insert(variant.name.as_str()) {
                return invalid(format!("duplicate variant name {:?}", variant.name));
            }
        }
        Ok(())
    }

    /// Number of worker threads: the explicit bound, or available
    /// parallelism minus the reserve, never below one.
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.max(1),
            None => {
                let available = std::thread::available_parallelism().map_or(1, |n| n.get());
                available.saturating_sub(self.reserved_cores).max(1)
            }
        }
    }

    pub fn scoring_rules(&self) -> ScoringRules {
        ScoringRules {
            test_fraction: self.test_fraction,
            mape_threshold: self.mape_threshold,
            tracking_tolerance: self.tracking_tolerance,
            round_predictions: self.round_predictions,
        }
    }

    /// Grid-search settings for one series, evaluated in `mode`.
    pub fn grid_search_config(&self, mode: ExecutionMode) -> GridSearchConfig {
        GridSearchConfig {
            seasonal_period: self.seasonal_period,
            order_bound: self.order_bound,
            trend: self.trend,
            rules: self.scoring_rules(),
            mode,
        }
    }

    pub fn forecast_settings(&self) -> ForecastSettings {
        ForecastSettings {
            horizon: self.horizon,
            confidence_level: self.confidence_level,
            round_forecast: self.round_predictions,
        }
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    pub fn with_mape_threshold(mut self, threshold: f64) -> Self {
        self.mape_threshold = threshold;
        self
    }

    pub fn with_tracking_tolerance(mut self, tolerance: f64) -> Self {
        self.tracking_tolerance = tolerance;
        self
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = period;
        self
    }

    pub fn with_order_bound(mut self, bound: usize) -> Self {
        self.order_bound = bound;
        self
    }

    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = trend;
        self
    }

    pub fn with_round_predictions(mut self, round: bool) -> Self {
        self.round_predictions = round;
        self
    }

    pub fn with_missing_values(mut self, policy: MissingValuePolicy) -> Self {
        self.missing_values = policy;
        self
    }

    pub fn with_variants(mut self, variants: Vec<AnalysisVariant>) -> Self {
        self.variants = variants;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_parallel_axis(mut self, axis: ParallelAxis) -> Self {
        self.parallel_axis = axis;
        self
    }
}
