//! Entity-level driver: one parameterized pipeline for every analysis
//! variant, with a bounded worker pool and per-entity failure isolation.

use crate::core::{ForecastResult, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::pipeline::config::{AnalysisVariant, ParallelAxis, PipelineConfig};
use crate::selection::{
    forecast_selected, grid_search, rank_by_mape, select_best, ExecutionMode, ScoreRecord,
};
use rayon::prelude::*;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::{info, warn};

/// Ranked candidates logged per entity.
const LOGGED_TOP_MODELS: usize = 10;

/// Input series of one geographic entity.
#[derive(Debug, Clone)]
pub struct EntitySeries {
    pub entity: String,
    pub series: TimeSeries,
}

impl EntitySeries {
    pub fn new(entity: impl Into<String>, series: TimeSeries) -> Self {
        Self {
            entity: entity.into(),
            series,
        }
    }
}

/// What the pipeline produced for one entity and variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntityOutcome {
    Selected {
        best: ScoreRecord,
        /// All accepted candidates by ascending MAPE.
        ranked: Vec<ScoreRecord>,
        forecast: ForecastResult,
    },
    NoAcceptedCandidates {
        candidates_tried: usize,
    },
    Failed {
        reason: String,
    },
}

/// Result record for one entity and variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityReport {
    pub entity: String,
    pub variant: String,
    /// Observations used for the search after truncation.
    pub training_len: usize,
    pub outcome: EntityOutcome,
}

impl EntityReport {
    pub fn is_selected(&self) -> bool {
        matches!(self.outcome, EntityOutcome::Selected { .. })
    }

    pub fn best(&self) -> Option<&ScoreRecord> {
        match &self.outcome {
            EntityOutcome::Selected { best, .. } => Some(best),
            _ => None,
        }
    }

    pub fn forecast(&self) -> Option<&ForecastResult> {
        match &self.outcome {
            EntityOutcome::Selected { forecast, .. } => Some(forecast),
            _ => None,
        }
    }
}

/// Runs grid search, selection and forecasting for many entities.
pub struct Pipeline {
    config: PipelineConfig,
    pool: rayon::ThreadPool,
}

impl Pipeline {
    /// Validate `config` and build the worker pool.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let workers = config.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("epi-forecast-{i}"))
            .build()
            .map_err(|e| ForecastError::ComputationError(format!("worker pool: {e}")))?;
        info!(workers, axis = ?config.parallel_axis, "pipeline ready");
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every entity under every configured variant.
    ///
    /// Reports come back in input order, variants in configuration order
    /// within each entity.
    pub fn run(&self, entities: &[EntitySeries]) -> Vec<EntityReport> {
        let started = Instant::now();
        let reports: Vec<Vec<EntityReport>> = match self.config.parallel_axis {
            ParallelAxis::Entities => self.pool.install(|| {
                entities
                    .par_iter()
                    .map(|e| self.run_entity(e, ExecutionMode::Sequential))
                    .collect()
            }),
            ParallelAxis::Candidates => self.pool.install(|| {
                entities
                    .iter()
                    .map(|e| self.run_entity(e, ExecutionMode::Parallel))
                    .collect()
            }),
            ParallelAxis::None => entities
                .iter()
                .map(|e| self.run_entity(e, ExecutionMode::Sequential))
                .collect(),
        };

        let reports: Vec<EntityReport> = reports.into_iter().flatten().collect();
        let selected = reports.iter().filter(|r| r.is_selected()).count();
        info!(
            entities = entities.len(),
            reports = reports.len(),
            selected,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pipeline run finished"
        );
        reports
    }

    fn run_entity(&self, entity: &EntitySeries, mode: ExecutionMode) -> Vec<EntityReport> {
        self.config
            .variants
            .iter()
            .map(|variant| self.run_variant(entity, variant, mode))
            .collect()
    }

    /// Process one entity under one variant. Errors and panics become a
    /// `Failed` outcome.
    pub fn run_variant(
        &self,
        entity: &EntitySeries,
        variant: &AnalysisVariant,
        mode: ExecutionMode,
    ) -> EntityReport {
        let mut training_len = 0;
        let result = catch_unwind(AssertUnwindSafe(|| {
            self.analyze(entity, variant, mode, &mut training_len)
        }));

        let outcome = match result {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                warn!(entity = %entity.entity, variant = %variant.name, error = %err, "entity failed");
                EntityOutcome::Failed {
                    reason: err.to_string(),
                }
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                warn!(entity = %entity.entity, variant = %variant.name, %reason, "entity panicked");
                EntityOutcome::Failed {
                    reason: format!("panic: {reason}"),
                }
            }
        };

        EntityReport {
            entity: entity.entity.clone(),
            variant: variant.name.clone(),
            training_len,
            outcome,
        }
    }

    fn analyze(
        &self,
        entity: &EntitySeries,
        variant: &AnalysisVariant,
        mode: ExecutionMode,
        training_len: &mut usize,
    ) -> Result<EntityOutcome> {
        let config = &self.config;
        if entity.series.periods_per_year() != config.periods_per_year {
            return Err(ForecastError::PeriodError(format!(
                "series has {} periods per year, configuration expects {}",
                entity.series.periods_per_year(),
                config.periods_per_year
            )));
        }

        let series = match variant.cutoff {
            Some(cutoff) => entity.series.truncated_before(cutoff)?,
            None => entity.series.clone(),
        };
        let series = series.sanitized(config.missing_values)?;
        *training_len = series.len();
        if series.is_empty() {
            return Err(ForecastError::EmptyData);
        }

        info!(
            entity = %entity.entity,
            variant = %variant.name,
            observations = series.len(),
            "searching models"
        );

        let report = grid_search(series.values(), &config.grid_search_config(mode));
        let candidates_tried = report.candidates_tried;
        let ranked = rank_by_mape(report.accepted);

        for (rank, record) in ranked.iter().take(LOGGED_TOP_MODELS).enumerate() {
            info!(
                entity = %entity.entity,
                variant = %variant.name,
                rank = rank + 1,
                model = %record.label,
                mape = record.mape,
                rmse = record.rmse,
                aic = record.aic,
                "ranked model"
            );
        }

        let Some(selected) = select_best(&ranked, &series)? else {
            info!(entity = %entity.entity, variant = %variant.name, candidates_tried, "no candidate accepted");
            return Ok(EntityOutcome::NoAcceptedCandidates { candidates_tried });
        };

        let forecast = forecast_selected(&selected, &series, &config.forecast_settings())?;
        Ok(EntityOutcome::Selected {
            best: selected.record,
            ranked,
            forecast,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
