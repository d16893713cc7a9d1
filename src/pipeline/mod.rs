//! Entity-level orchestration and its configuration.

mod config;
mod driver;

pub use config::{AnalysisVariant, ParallelAxis, PipelineConfig};
pub use driver::{EntityOutcome, EntityReport, EntitySeries, Pipeline};
