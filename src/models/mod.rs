//! Forecasting models.

mod traits;

pub mod sarima;

pub use sarima::{ModelConfig, PredictionMode, Sarima, Trend};
pub use traits::Forecaster;
