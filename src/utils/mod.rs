//! Metrics, signals and numerical helpers shared by the scorer and models.

pub mod metrics;
pub mod optimization;
pub mod signal;
pub mod stats;

pub use metrics::{information_criteria, mape, rmse};
pub use optimization::{nelder_mead, SimplexConfig, SimplexResult};
pub use signal::{
    tracking_signal, tracking_signal_breach, variation_coefficient, variation_coefficient_delta,
    TrackingSignal,
};
pub use stats::z_for_level;
