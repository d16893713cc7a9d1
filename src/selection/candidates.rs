//! Exhaustive SARIMA candidate enumeration.

use crate::models::sarima::{ModelConfig, Order, SeasonalOrder, Trend};

/// Every SARIMA(p,d,q)(P,D,Q)\[m\] with all six orders in `0..order_bound`.
///
/// Nonseasonal orders form the outer loops (p, then d, then q) and seasonal
/// orders the inner loops (P, then D, then Q). Every candidate carries the
/// same `trend`. The result has `order_bound^6` entries.
///
/// # Example
/// ```
/// use epi_forecast::selection::generate_candidates;
/// use epi_forecast::models::Trend;
///
/// let candidates = generate_candidates(13, 3, Trend::Constant);
/// assert_eq!(candidates.len(), 729);
/// assert_eq!(candidates[0].to_string(), "SARIMA(0,0,0)(0,0,0)[13] trend=c");
/// ```
pub fn generate_candidates(seasonal_period: usize, order_bound: usize, trend: Trend) -> Vec<ModelConfig> {
    let nonseasonal = orders(order_bound);
    let seasonal = orders(order_bound);

    let mut candidates = Vec::with_capacity(nonseasonal.len() * seasonal.len());
    for &(p, d, q) in &nonseasonal {
        for &(sp, sd, sq) in &seasonal {
            candidates.push(ModelConfig::new(
                Order::new(p, d, q),
                SeasonalOrder::new(sp, sd, sq, seasonal_period),
                trend,
            ));
        }
    }
    candidates
}

fn orders(bound: usize) -> Vec<(usize, usize, usize)> {
    let mut out = Vec::with_capacity(bound.pow(3));
    for a in 0..bound {
        for b in 0..bound {
            for c in 0..bound {
                out.push((a, b, c));
            }
        }
    }
    out
}
