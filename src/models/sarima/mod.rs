//! Seasonal ARIMA models SARIMA(p,d,q)(P,D,Q)\[m\] with a deterministic trend.
//!
//! This module provides:
//! - candidate specifications ([`ModelConfig`], [`Trend`])
//! - lag-polynomial helpers for differencing and seasonal expansion
//! - the CSS-estimated [`Sarima`] model

mod diff;
mod model;
mod spec;

pub use diff::{apply_difference, differencing_polynomial, poly_mul, seasonal_product};
pub use model::{Coefficients, PredictionMode, Sarima};
pub use spec::{ModelConfig, Order, SeasonalOrder, Trend};
