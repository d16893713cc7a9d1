//! Lag-polynomial algebra: differencing operators and multiplicative
//! seasonal expansion.
//!
//! Polynomials are dense coefficient vectors in the backshift operator B,
//! index k holding the coefficient of B^k.

/// Multiply two polynomials in B.
pub fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Coefficients of (1 - B)^d (1 - B^m)^D.
///
/// The result has length d + D·m + 1 and a leading coefficient of 1.
pub fn differencing_polynomial(d: usize, seasonal_d: usize, period: usize) -> Vec<f64> {
    let mut poly = vec![1.0];
    for _ in 0..d {
        poly = poly_mul(&poly, &[1.0, -1.0]);
    }
    if period > 0 {
        let mut seasonal = vec![0.0; period + 1];
        seasonal[0] = 1.0;
        seasonal[period] = -1.0;
        for _ in 0..seasonal_d {
            poly = poly_mul(&poly, &seasonal);
        }
    }
    poly
}

/// Expand `(1 + s·Σ a_i B^i)(1 + s·Σ A_j B^{j·m})` where `s` is `sign`.
///
/// With `sign = -1` this is the autoregressive form φ(B)Φ(B^m); with
/// `sign = 1` the moving-average form θ(B)Θ(B^m).
pub fn seasonal_product(nonseasonal: &[f64], seasonal: &[f64], period: usize, sign: f64) -> Vec<f64> {
    let mut short = Vec::with_capacity(nonseasonal.len() + 1);
    short.push(1.0);
    short.extend(nonseasonal.iter().map(|c| sign * c));

    if seasonal.is_empty() || period == 0 {
        return short;
    }

    let mut long = vec![0.0; seasonal.len() * period + 1];
    long[0] = 1.0;
    for (j, c) in seasonal.iter().enumerate() {
        long[(j + 1) * period] = sign * c;
    }
    poly_mul(&short, &long)
}

/// Non-zero lag terms `(k, c_k)` for k ≥ 1, scaled by `scale`.
///
/// Used to turn an expanded polynomial into the recursion weights
/// of a filter.
pub fn lag_terms(poly: &[f64], scale: f64) -> Vec<(usize, f64)> {
    poly.iter()
        .enumerate()
        .skip(1)
        .filter(|(_, c)| **c != 0.0)
        .map(|(k, c)| (k, scale * c))
        .collect()
}

/// Apply a differencing polynomial: `w_t = Σ_k δ_k y_{t-k}` for every t with
/// a full window.
pub fn apply_difference(series: &[f64], delta: &[f64]) -> Vec<f64> {
    let lag = delta.len().saturating_sub(1);
    if delta.is_empty() || series.len() <= lag {
        return Vec::new();
    }
    (lag..series.len())
        .map(|t| delta.iter().enumerate().map(|(k, c)| c * series[t - k]).sum())
        .collect()
}
