//! Core data structures: period tags, incidence series and forecasts.

mod forecast;
mod period;
mod time_series;

pub use forecast::{Forecast, ForecastResult, ForecastStep};
pub use period::EpiPeriod;
pub use time_series::{MissingValuePolicy, TimeSeries, TimeSeriesBuilder, DEFAULT_SPACING_DAYS};
