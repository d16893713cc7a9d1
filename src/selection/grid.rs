//! Grid search over the SARIMA candidate set.

use crate::models::sarima::Trend;
use crate::selection::candidates::generate_candidates;
use crate::selection::scorer::{score_candidate, Rejection, ScoreRecord, ScoringRules};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info};

/// How candidates of one series are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    /// Evaluate on the current rayon pool.
    Parallel,
}

/// Settings of a grid search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSearchConfig {
    pub seasonal_period: usize,
    /// Exclusive bound on every order.
    pub order_bound: usize,
    pub trend: Trend,
    pub rules: ScoringRules,
    pub mode: ExecutionMode,
}

impl Default for GridSearchConfig {
    fn default() -> Self {
        Self {
            seasonal_period: 13,
            order_bound: 3,
            trend: Trend::Constant,
            rules: ScoringRules::default(),
            mode: ExecutionMode::Sequential,
        }
    }
}

impl GridSearchConfig {
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

    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Outcome of a grid search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSearchReport {
    /// Accepted candidates in generation order.
    pub accepted: Vec<ScoreRecord>,
    pub candidates_tried: usize,
    /// Rejected candidates by reason.
    pub rejections: BTreeMap<Rejection, usize>,
}

impl GridSearchReport {
    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }
}

/// Score every candidate against `values`.
///
/// Results are gathered after all evaluations finish and keep generation
/// order in both modes.
pub fn grid_search(values: &[f64], config: &GridSearchConfig) -> GridSearchReport {
    let started = Instant::now();
    let candidates = generate_candidates(config.seasonal_period, config.order_bound, config.trend);

    let outcomes: Vec<_> = match config.mode {
        ExecutionMode::Sequential => candidates
            .iter()
            .map(|candidate| score_candidate(values, candidate, &config.rules))
            .collect(),
        ExecutionMode::Parallel => candidates
            .par_iter()
            .map(|candidate| score_candidate(values, candidate, &config.rules))
            .collect(),
    };

    let mut accepted = Vec::new();
    let mut rejections = BTreeMap::new();
    for (candidate, outcome) in candidates.iter().zip(outcomes) {
        match outcome {
            Ok(record) => accepted.push(record),
            Err(reason) => {
                debug!(model = %candidate, %reason, "candidate rejected");
                *rejections.entry(reason).or_insert(0) += 1;
            }
        }
    }

    info!(
        candidates = candidates.len(),
        accepted = accepted.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "grid search finished"
    );

    GridSearchReport {
        accepted,
        candidates_tried: candidates.len(),
        rejections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 20.0 + 0.8 * i as f64 + 6.0 * ((i % 13) as f64 * 0.48).sin())
            .collect()
    }

    #[test]
    fn every_candidate_is_accounted_for() {
        let config = GridSearchConfig::default().with_order_bound(2);
        let report = grid_search(&trending(60), &config);
        assert_eq!(report.candidates_tried, 64);
        assert_eq!(report.accepted.len() + report.rejected(), 64);
    }

    #[test]
    fn two_point_series_rejects_everything() {
        let report = grid_search(&[3.0, 4.0], &GridSearchConfig::default());
        assert_eq!(report.candidates_tried, 729);
        assert!(report.accepted.is_empty());
        assert_eq!(report.rejections.get(&Rejection::InsufficientData), Some(&729));
    }

    #[test]
    fn parallel_matches_sequential() {
        let values = trending(60);
        let base = GridSearchConfig::default().with_order_bound(2);
        let sequential = grid_search(&values, &base);
        let parallel = grid_search(&values, &base.with_mode(ExecutionMode::Parallel));
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn accepted_records_keep_generation_order() {
        let config = GridSearchConfig::default().with_order_bound(2);
        let report = grid_search(&trending(60), &config);
        let candidates = generate_candidates(13, 2, Trend::Constant);
        let positions: Vec<usize> = report
            .accepted
            .iter()
            .filter_map(|r| candidates.iter().position(|c| *c == r.model))
            .collect();
        assert_eq!(positions.len(), report.accepted.len());
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
