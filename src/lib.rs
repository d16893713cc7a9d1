//! # epi-forecast
//!
//! Seasonal ARIMA model selection and forecasting for epidemiological
//! surveillance series.
//!
//! For each entity series the engine scores every SARIMA(p,d,q)(P,D,Q)\[m\]
//! candidate of a fixed grid on a holdout window, keeps the candidates that
//! pass the MAPE and tracking-signal rules, refits the minimum-MAPE one and
//! publishes a non-negative forecast with confidence bounds tagged by
//! epidemiological period.

#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod selection;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{EpiPeriod, Forecast, ForecastResult, MissingValuePolicy, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{Forecaster, ModelConfig, Sarima, Trend};
    pub use crate::pipeline::{
        AnalysisVariant, EntityOutcome, EntityReport, EntitySeries, ParallelAxis, Pipeline,
        PipelineConfig,
    };
    pub use crate::selection::{grid_search, GridSearchConfig, Rejection, ScoreRecord};
}
