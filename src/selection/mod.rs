//! Model selection: candidate generation, scoring, grid search and choice of
//! the best model.

mod best;
mod candidates;
mod grid;
mod scorer;

pub use best::{forecast_selected, rank_by_mape, select_best, ForecastSettings, SelectedModel};
pub use candidates::generate_candidates;
pub use grid::{grid_search, ExecutionMode, GridSearchConfig, GridSearchReport};
pub use scorer::{
    score_candidate, validation_metrics, validation_start, Rejection, ScoreRecord, ScoringRules,
    ValidationMetrics,
};
