//! Order and trend specification of a seasonal ARIMA candidate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic trend term on the differenced scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Trend {
    /// No trend term.
    #[serde(rename = "n", alias = "none")]
    None,
    /// Intercept only.
    #[default]
    #[serde(rename = "c", alias = "constant")]
    Constant,
    /// Time slope only.
    #[serde(rename = "t", alias = "linear")]
    Linear,
    /// Intercept and time slope.
    #[serde(rename = "ct", alias = "constant_linear")]
    ConstantLinear,
}

impl Trend {
    pub fn has_constant(self) -> bool {
        matches!(self, Trend::Constant | Trend::ConstantLinear)
    }

    pub fn has_slope(self) -> bool {
        matches!(self, Trend::Linear | Trend::ConstantLinear)
    }

    /// Number of estimated trend coefficients.
    pub fn num_params(self) -> usize {
        usize::from(self.has_constant()) + usize::from(self.has_slope())
    }

    /// Short code used in model labels.
    pub fn code(self) -> &'static str {
        match self {
            Trend::None => "n",
            Trend::Constant => "c",
            Trend::Linear => "t",
            Trend::ConstantLinear => "ct",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Nonseasonal orders (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl Order {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

/// Seasonal orders (P, D, Q) with period m.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonalOrder {
    /// Seasonal AR order (P)
    pub p: usize,
    /// Seasonal differencing order (D)
    pub d: usize,
    /// Seasonal MA order (Q)
    pub q: usize,
    /// Seasonal period (m)
    pub period: usize,
}

impl SeasonalOrder {
    pub fn new(p: usize, d: usize, q: usize, period: usize) -> Self {
        Self { p, d, q, period }
    }

    /// No seasonal component.
    pub fn none() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// One SARIMA(p,d,q)(P,D,Q)\[m\] candidate with its trend term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelConfig {
    pub order: Order,
    pub seasonal_order: SeasonalOrder,
    pub trend: Trend,
}

impl ModelConfig {
    pub fn new(order: Order, seasonal_order: SeasonalOrder, trend: Trend) -> Self {
        Self {
            order,
            seasonal_order,
            trend,
        }
    }

    /// Shorthand for building a candidate from raw orders.
    pub fn sarima(
        (p, d, q): (usize, usize, usize),
        (sp, sd, sq, m): (usize, usize, usize, usize),
        trend: Trend,
    ) -> Self {
        Self::new(Order::new(p, d, q), SeasonalOrder::new(sp, sd, sq, m), trend)
    }

    /// Seasonal period, with 0 meaning the seasonal part is inactive.
    fn season(&self) -> usize {
        self.seasonal_order.period
    }

    /// Number of coefficients searched by the optimizer.
    pub fn num_coefficients(&self) -> usize {
        let s = &self.seasonal_order;
        self.trend.num_params() + self.order.p + self.order.q + s.p + s.q
    }

    /// Parameters counted by the information criteria (coefficients plus the
    /// innovation variance).
    pub fn num_params(&self) -> usize {
        self.num_coefficients() + 1
    }

    /// Observations consumed by differencing: d + D·m.
    pub fn diff_lag(&self) -> usize {
        self.order.d + self.seasonal_order.d * self.season()
    }

    /// Highest lag of the expanded autoregressive polynomial: p + P·m.
    pub fn ar_lag(&self) -> usize {
        self.order.p + self.seasonal_order.p * self.season()
    }

    /// Highest lag of the expanded moving-average polynomial: q + Q·m.
    pub fn ma_lag(&self) -> usize {
        self.order.q + self.seasonal_order.q * self.season()
    }

    /// First index whose residual enters the conditional sum of squares.
    pub fn conditioning_lag(&self) -> usize {
        self.diff_lag() + self.ar_lag()
    }

    /// Shortest series this candidate can be fitted on.
    pub fn min_observations(&self) -> usize {
        self.conditioning_lag() + self.num_params() + 2
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        let s = &self.seasonal_order;
        if (s.p > 0 || s.d > 0 || s.q > 0) && s.period < 2 {
            return Err(crate::error::ForecastError::InvalidParameter(format!(
                "seasonal period must be at least 2 for {self}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.order;
        let s = &self.seasonal_order;
        write!(
            f,
            "SARIMA({},{},{})({},{},{})[{}] trend={}",
            o.p, o.d, o.q, s.p, s.d, s.q, s.period, self.trend
        )
    }
}
