//! Seasonal ARIMA estimated by conditional sum of squares (CSS).
//!
//! One filter recursion drives everything the model produces: the CSS
//! objective, one-step in-sample predictions, dynamic in-sample predictions
//! and the out-of-sample forecast. It walks a path of the series where
//! observed steps carry actual values and unobserved (or dynamic) steps carry
//! the model's own predictions, with zero innovations.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::sarima::diff::{
    apply_difference, differencing_polynomial, lag_terms, poly_mul, seasonal_product,
};
use crate::models::sarima::spec::ModelConfig;
use crate::models::Forecaster;
use crate::utils::metrics::{gaussian_log_likelihood, information_criteria};
use crate::utils::optimization::{nelder_mead, SimplexConfig};
use crate::utils::stats::{mean, z_for_level};

/// How in-sample predictions treat observations inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionMode {
    /// Each step conditions on all actual values before it.
    OneStep,
    /// From the window start on, each step conditions on earlier predictions.
    Dynamic,
}

/// Estimated coefficients of a fitted model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coefficients {
    pub constant: f64,
    pub slope: f64,
    /// Nonseasonal AR coefficients φ₁..φₚ.
    pub ar: Vec<f64>,
    /// Seasonal AR coefficients Φ₁..Φ_P.
    pub seasonal_ar: Vec<f64>,
    /// Nonseasonal MA coefficients θ₁..θ_q.
    pub ma: Vec<f64>,
    /// Seasonal MA coefficients Θ₁..Θ_Q.
    pub seasonal_ma: Vec<f64>,
}

impl Coefficients {
    /// Unpack an optimizer vector laid out as
    /// `[constant?, slope?, ar, seasonal_ar, ma, seasonal_ma]`.
    fn from_vector(config: &ModelConfig, params: &[f64]) -> Self {
        let mut rest = params;
        let mut take = |n: usize| -> Vec<f64> {
            let (head, tail) = rest.split_at(n.min(rest.len()));
            rest = tail;
            head.to_vec()
        };

        let constant = if config.trend.has_constant() {
            take(1).first().copied().unwrap_or(0.0)
        } else {
            0.0
        };
        let slope = if config.trend.has_slope() {
            take(1).first().copied().unwrap_or(0.0)
        } else {
            0.0
        };

        Self {
            constant,
            slope,
            ar: take(config.order.p),
            seasonal_ar: take(config.seasonal_order.p),
            ma: take(config.order.q),
            seasonal_ma: take(config.seasonal_order.q),
        }
    }
}

/// Recursion weights of a fitted model.
#[derive(Debug, Clone)]
struct Filter {
    delta: Vec<f64>,
    ar: Vec<(usize, f64)>,
    ma: Vec<(usize, f64)>,
    constant: f64,
    slope: f64,
    conditioning: usize,
}

#[derive(Debug)]
struct FilterOutput {
    predictions: Vec<f64>,
    residuals: Vec<f64>,
    css: f64,
}

impl Filter {
    fn new(config: &ModelConfig, coefficients: &Coefficients) -> Self {
        let m = config.seasonal_order.period;
        let ar_poly = seasonal_product(&coefficients.ar, &coefficients.seasonal_ar, m, -1.0);
        let ma_poly = seasonal_product(&coefficients.ma, &coefficients.seasonal_ma, m, 1.0);
        Self {
            delta: differencing_polynomial(config.order.d, config.seasonal_order.d, m),
            ar: lag_terms(&ar_poly, -1.0),
            ma: lag_terms(&ma_poly, 1.0),
            constant: coefficients.constant,
            slope: coefficients.slope,
            conditioning: config.conditioning_lag(),
        }
    }

    fn diff_lag(&self) -> usize {
        self.delta.len() - 1
    }

    fn mean_at(&self, t: usize) -> f64 {
        self.constant + self.slope * t as f64
    }

    /// Run the recursion for `total` steps.
    ///
    /// Actual values are used for `t < min(y.len(), dynamic_from)`; every
    /// later step feeds on its own prediction with a zero innovation.
    /// Deviations before the differencing lag and residuals before the
    /// conditioning lag are zero.
    fn run(&self, y: &[f64], dynamic_from: usize, total: usize) -> FilterOutput {
        let diff_lag = self.diff_lag();
        let observed_until = dynamic_from.max(diff_lag).min(y.len());

        let mut path = Vec::with_capacity(total);
        let mut deviations = vec![0.0; total];
        let mut residuals = vec![0.0; total];
        let mut predictions = vec![f64::NAN; total];
        let mut css = 0.0;

        for t in 0..total {
            if t < diff_lag {
                path.push(y.get(t).copied().unwrap_or(f64::NAN));
                continue;
            }

            let mu = self.mean_at(t);
            let mut w_hat = mu;
            for &(k, c) in &self.ar {
                if k <= t {
                    w_hat += c * deviations[t - k];
                }
            }
            for &(k, c) in &self.ma {
                if k <= t {
                    w_hat += c * residuals[t - k];
                }
            }

            let carry: f64 = self
                .delta
                .iter()
                .enumerate()
                .skip(1)
                .map(|(k, c)| c * path[t - k])
                .sum();
            let y_hat = w_hat - carry;
            predictions[t] = y_hat;

            let observed = t < observed_until;
            let value = if observed { y[t] } else { y_hat };
            path.push(value);

            let w = value + carry;
            deviations[t] = w - mu;
            if observed && t >= self.conditioning {
                let e = w - w_hat;
                residuals[t] = e;
                css += e * e;
            }
        }

        FilterOutput {
            predictions,
            residuals,
            css,
        }
    }

    /// ψ-weights of Θ(B)θ(B) / (Φ(B^m)φ(B)δ(B)), the first `horizon` of them.
    fn psi_weights(&self, horizon: usize) -> Vec<f64> {
        if horizon == 0 {
            return Vec::new();
        }

        let ar_len = self.ar.iter().map(|(k, _)| *k).max().unwrap_or(0) + 1;
        let mut ar_dense = vec![0.0; ar_len];
        ar_dense[0] = 1.0;
        for &(k, c) in &self.ar {
            ar_dense[k] = -c;
        }
        let phi = poly_mul(&ar_dense, &self.delta);

        let mut theta = vec![0.0; horizon];
        for &(k, c) in &self.ma {
            if k < horizon {
                theta[k] = c;
            }
        }

        let mut psi = vec![0.0; horizon];
        psi[0] = 1.0;
        for j in 1..horizon {
            let mut value = theta[j];
            for k in 1..=j.min(phi.len() - 1) {
                value -= phi[k] * psi[j - k];
            }
            psi[j] = value;
        }
        psi
    }
}

/// State produced by a successful fit.
#[derive(Debug, Clone)]
struct FittedState {
    values: Vec<f64>,
    coefficients: Coefficients,
    filter: Filter,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
    sigma2: f64,
    log_likelihood: f64,
    aic: f64,
    bic: f64,
    n_effective: usize,
    converged: bool,
}

/// Seasonal ARIMA forecasting model.
///
/// Coefficients are searched without stationarity or invertibility bounds.
///
/// # Example
/// ```
/// use epi_forecast::models::sarima::{ModelConfig, Sarima, Trend};
///
/// let values: Vec<f64> = (0..40).map(|i| 50.0 + (i % 4) as f64).collect();
/// let config = ModelConfig::sarima((0, 0, 0), (0, 1, 0, 4), Trend::None);
///
/// let mut model = Sarima::new(config);
/// model.fit_values(&values).unwrap();
/// let forecast = model.forecast(4).unwrap();
/// assert_eq!(forecast.point(), &[50.0, 51.0, 52.0, 53.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Sarima {
    config: ModelConfig,
    optimizer: SimplexConfig,
    state: Option<FittedState>,
}

impl Sarima {
    /// Create an unfitted model for `config`.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            optimizer: SimplexConfig::default(),
            state: None,
        }
    }

    /// Replace the simplex search settings.
    pub fn with_optimizer(mut self, optimizer: SimplexConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn coefficients(&self) -> Option<&Coefficients> {
        self.state.as_ref().map(|s| &s.coefficients)
    }

    /// Innovation variance estimate, CSS / n_eff.
    pub fn sigma2(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.sigma2)
    }

    pub fn log_likelihood(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.log_likelihood)
    }

    pub fn aic(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.aic)
    }

    pub fn bic(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.bic)
    }

    /// Number of residuals in the conditional sum of squares.
    pub fn n_effective(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.n_effective)
    }

    /// Whether the coefficient search met its tolerance. False before fitting.
    pub fn converged(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.converged)
    }

    /// Fit the model to raw values.
    pub fn fit_values(&mut self, values: &[f64]) -> Result<()> {
        self.config.validate()?;
        if values.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::MissingValues);
        }
        let needed = self.config.min_observations();
        if values.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: values.len(),
            });
        }

        let config = self.config;
        let n = values.len();
        let initial = initial_parameters(&config, values);

        let result = nelder_mead(
            |params| {
                let coefficients = Coefficients::from_vector(&config, params);
                Filter::new(&config, &coefficients).run(values, n, n).css
            },
            &initial,
            &self.optimizer,
        );

        let coefficients = Coefficients::from_vector(&config, &result.point);
        let filter = Filter::new(&config, &coefficients);
        let output = filter.run(values, n, n);
        if !output.css.is_finite() {
            return Err(ForecastError::ComputationError(format!(
                "{config}: conditional sum of squares is not finite"
            )));
        }

        let n_effective = n - config.conditioning_lag();
        let sigma2 = (output.css / n_effective as f64).max(f64::MIN_POSITIVE);
        let log_likelihood = gaussian_log_likelihood(sigma2, n_effective);
        let (aic, bic) = information_criteria(log_likelihood, config.num_params(), n_effective);

        self.state = Some(FittedState {
            values: values.to_vec(),
            coefficients,
            filter,
            fitted: output.predictions,
            residuals: output.residuals,
            sigma2,
            log_likelihood,
            aic,
            bic,
            n_effective,
            converged: result.converged,
        });
        Ok(())
    }

    /// In-sample predictions for indices `start..n`.
    ///
    /// `start` must not precede the differencing lag and must fall inside the
    /// series.
    pub fn predict_in_sample(&self, start: usize, mode: PredictionMode) -> Result<Vec<f64>> {
        let state = self.state.as_ref().ok_or(ForecastError::FitRequired)?;
        let n = state.values.len();
        if start >= n {
            return Err(ForecastError::InvalidParameter(format!(
                "prediction start {start} is outside a series of length {n}"
            )));
        }
        let diff_lag = self.config.diff_lag();
        if start < diff_lag {
            return Err(ForecastError::InvalidParameter(format!(
                "prediction start {start} precedes the differencing lag {diff_lag}"
            )));
        }

        match mode {
            PredictionMode::OneStep => Ok(state.fitted[start..].to_vec()),
            PredictionMode::Dynamic => {
                let output = state.filter.run(&state.values, start, n);
                Ok(output.predictions[start..].to_vec())
            }
        }
    }

    /// Out-of-sample point forecast for `horizon` steps.
    pub fn forecast(&self, horizon: usize) -> Result<Forecast> {
        let state = self.state.as_ref().ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Ok(Forecast::new());
        }
        let n = state.values.len();
        let output = state.filter.run(&state.values, n, n + horizon);
        Ok(Forecast::from_values(output.predictions[n..].to_vec()))
    }

    /// Forecast with two-sided intervals at coverage `level`.
    ///
    /// The h-step variance is `sigma2 · Σ_{j<h} ψ_j²`.
    pub fn forecast_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let state = self.state.as_ref().ok_or(ForecastError::FitRequired)?;
        let z = z_for_level(level)?;
        let forecast = self.forecast(horizon)?;
        if horizon == 0 {
            return Ok(forecast);
        }

        let psi = state.filter.psi_weights(horizon);
        let mut cumulative = 0.0;
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (point, weight) in forecast.point().iter().zip(&psi) {
            cumulative += weight * weight;
            let se = (state.sigma2 * cumulative).sqrt();
            lower.push(point - z * se);
            upper.push(point + z * se);
        }

        Forecast::from_values_with_intervals(forecast.point().to_vec(), lower, upper)
    }
}

/// Starting point for the coefficient search.
fn initial_parameters(config: &ModelConfig, values: &[f64]) -> Vec<f64> {
    let mut initial = Vec::with_capacity(config.num_coefficients());

    if config.trend.has_constant() {
        let delta = differencing_polynomial(
            config.order.d,
            config.seasonal_order.d,
            config.seasonal_order.period,
        );
        let level = mean(&apply_difference(values, &delta));
        initial.push(if level.is_finite() { level } else { 0.0 });
    }
    if config.trend.has_slope() {
        initial.push(0.0);
    }
    initial.extend((0..config.order.p).map(|i| 0.1 / (i + 1) as f64));
    initial.extend(std::iter::repeat(0.1).take(config.seasonal_order.p));
    initial.extend((0..config.order.q).map(|i| 0.1 / (i + 1) as f64));
    initial.extend(std::iter::repeat(0.1).take(config.seasonal_order.q));
    initial
}

impl Forecaster for Sarima {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        self.fit_values(series.values())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        self.forecast(horizon)
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        self.forecast_with_intervals(horizon, level)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.fitted.as_slice())
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.residuals.as_slice())
    }

    fn name(&self) -> &str {
        "SARIMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sarima::spec::Trend;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn config(
        order: (usize, usize, usize),
        seasonal: (usize, usize, usize, usize),
        trend: Trend,
    ) -> ModelConfig {
        ModelConfig::sarima(order, seasonal, trend)
    }

    #[test]
    fn sarima_requires_fit() {
        let model = Sarima::new(config((1, 0, 0), (0, 0, 0, 13), Trend::Constant));
        assert!(matches!(model.forecast(3), Err(ForecastError::FitRequired)));
        assert!(matches!(
            model.predict_in_sample(0, PredictionMode::OneStep),
            Err(ForecastError::FitRequired)
        ));
        assert!(!model.converged());
        assert!(model.aic().is_none());
    }

    #[test]
    fn sarima_insufficient_data() {
        let mut model = Sarima::new(config((1, 1, 1), (1, 1, 1, 13), Trend::Constant));
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        assert!(matches!(
            model.fit_values(&values),
            Err(ForecastError::InsufficientData { got: 20, .. })
        ));

        let mut model = Sarima::new(config((0, 0, 0), (0, 0, 0, 13), Trend::Constant));
        assert!(matches!(
            model.fit_values(&[3.0, 4.0]),
            Err(ForecastError::InsufficientData { needed: 4, got: 2 })
        ));
    }

    #[test]
    fn sarima_rejects_missing_values() {
        let mut model = Sarima::new(config((0, 0, 0), (0, 0, 0, 13), Trend::Constant));
        let mut values = vec![1.0; 20];
        values[7] = f64::NAN;
        assert!(matches!(
            model.fit_values(&values),
            Err(ForecastError::MissingValues)
        ));
    }

    #[test]
    fn level_model_estimates_the_mean() {
        // (i * 7) % 5 cycles through 0, 2, 4, 1, 3: mean 100
        let values: Vec<f64> = (0..50).map(|i| 98.0 + ((i * 7) % 5) as f64).collect();
        let mut model = Sarima::new(config((0, 0, 0), (0, 0, 0, 13), Trend::Constant));
        model.fit_values(&values).unwrap();

        assert!(model.converged());
        assert_relative_eq!(model.coefficients().unwrap().constant, 100.0, epsilon = 1e-2);
        assert_relative_eq!(model.sigma2().unwrap(), 2.0, epsilon = 1e-3);

        let forecast = model.forecast(5).unwrap();
        for v in forecast.point() {
            assert_relative_eq!(*v, 100.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn ar1_coefficient_is_recovered() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut values = vec![0.0];
        for i in 1..300 {
            let noise: f64 = rng.gen_range(-1.0..1.0);
            values.push(0.6 * values[i - 1] + noise);
        }

        let mut model = Sarima::new(config((1, 0, 0), (0, 0, 0, 13), Trend::None));
        model.fit_values(&values).unwrap();

        let phi = model.coefficients().unwrap().ar[0];
        assert!((phi - 0.6).abs() < 0.15, "phi = {phi}");
    }

    #[test]
    fn random_walk_forecast_and_interval_growth() {
        let values: Vec<f64> = (0..30).map(|i| 10.0 + ((i * 3) % 7) as f64).collect();
        let mut model = Sarima::new(config((0, 1, 0), (0, 0, 0, 13), Trend::None));
        model.fit_values(&values).unwrap();

        let forecast = model.forecast_with_intervals(4, 0.95).unwrap();
        let last = *values.last().unwrap();
        for v in forecast.point() {
            assert_relative_eq!(*v, last, epsilon = 1e-12);
        }

        // ψ_j = 1 for a random walk, so widths grow with sqrt(h)
        let lower = forecast.lower().unwrap();
        let upper = forecast.upper().unwrap();
        let w1 = upper[0] - lower[0];
        let w4 = upper[3] - lower[3];
        assert!(w1 > 0.0);
        assert_relative_eq!(w4 / w1, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn seasonal_difference_repeats_last_season() {
        let pattern = [5.0, 9.0, 14.0, 7.0];
        let values: Vec<f64> = (0..24).map(|i| pattern[i % 4]).collect();
        let mut model = Sarima::new(config((0, 0, 0), (0, 1, 0, 4), Trend::None));
        model.fit_values(&values).unwrap();

        let forecast = model.forecast(6).unwrap();
        assert_eq!(forecast.point(), &[5.0, 9.0, 14.0, 7.0, 5.0, 9.0]);
        assert_eq!(model.sigma2().unwrap(), f64::MIN_POSITIVE);
    }

    #[test]
    fn drift_continues_linear_growth() {
        let values: Vec<f64> = (0..40).map(|i| 5.0 + 2.0 * i as f64).collect();
        let mut model = Sarima::new(config((0, 1, 0), (0, 0, 0, 13), Trend::Constant));
        model.fit_values(&values).unwrap();

        assert_relative_eq!(model.coefficients().unwrap().constant, 2.0, epsilon = 1e-3);
        let forecast = model.forecast(3).unwrap();
        let last = *values.last().unwrap();
        for (h, v) in forecast.point().iter().enumerate() {
            assert_relative_eq!(*v, last + 2.0 * (h + 1) as f64, epsilon = 1e-2);
        }
    }

    #[test]
    fn one_step_and_dynamic_predictions() {
        let values: Vec<f64> = (0..20).map(|i| ((i * 5) % 11) as f64).collect();
        let mut model = Sarima::new(config((0, 1, 0), (0, 0, 0, 13), Trend::None));
        model.fit_values(&values).unwrap();

        let one_step = model.predict_in_sample(15, PredictionMode::OneStep).unwrap();
        let dynamic = model.predict_in_sample(15, PredictionMode::Dynamic).unwrap();
        assert_eq!(one_step.len(), 5);
        assert_eq!(dynamic.len(), 5);

        for (k, v) in one_step.iter().enumerate() {
            assert_eq!(*v, values[15 + k - 1]);
        }
        for v in &dynamic {
            assert_eq!(*v, values[14]);
        }
    }

    #[test]
    fn dynamic_from_first_index_ignores_later_observations() {
        let values: Vec<f64> = (0..30).map(|i| 50.0 + ((i * 3) % 7) as f64).collect();
        let mut model = Sarima::new(config((1, 0, 0), (0, 0, 0, 13), Trend::Constant));
        model.fit_values(&values).unwrap();

        let mut altered = model.clone();
        let mut other = values.clone();
        other[25] = 500.0;
        altered.state.as_mut().unwrap().values = other;

        let a = model.predict_in_sample(20, PredictionMode::Dynamic).unwrap();
        let b = altered.predict_in_sample(20, PredictionMode::Dynamic).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn in_sample_start_is_checked() {
        let values: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let mut model = Sarima::new(config((0, 1, 0), (0, 1, 0, 4), Trend::None));
        model.fit_values(&values).unwrap();

        assert!(model.predict_in_sample(4, PredictionMode::OneStep).is_err());
        assert!(model.predict_in_sample(30, PredictionMode::Dynamic).is_err());
        assert!(model.predict_in_sample(5, PredictionMode::Dynamic).is_ok());
    }

    #[test]
    fn information_criteria_are_consistent() {
        let values: Vec<f64> = (0..60)
            .map(|i| 20.0 + 5.0 * (i as f64 * 0.5).sin() + ((i * 7) % 3) as f64)
            .collect();
        let mut model = Sarima::new(config((1, 0, 1), (0, 0, 0, 13), Trend::Constant));
        model.fit_values(&values).unwrap();

        let aic = model.aic().unwrap();
        let bic = model.bic().unwrap();
        let n_eff = model.n_effective().unwrap();
        assert_eq!(n_eff, 59);
        let k = model.config().num_params() as f64;
        assert_relative_eq!(bic - aic, k * ((n_eff as f64).ln() - 2.0), epsilon = 1e-8);

        let ll = model.log_likelihood().unwrap();
        assert_relative_eq!(
            ll,
            gaussian_log_likelihood(model.sigma2().unwrap(), n_eff),
            epsilon = 1e-10
        );
        assert_relative_eq!(aic, -2.0 * ll + 2.0 * k, epsilon = 1e-8);
        assert!(model.fitted_values().is_some());
        assert_eq!(model.residuals().unwrap().len(), 60);
    }

    #[test]
    fn intervals_reject_bad_level() {
        let values: Vec<f64> = (0..30).map(|i| (i % 5) as f64).collect();
        let mut model = Sarima::new(config((0, 0, 0), (0, 0, 0, 13), Trend::Constant));
        model.fit_values(&values).unwrap();
        assert!(model.forecast_with_intervals(3, 1.5).is_err());
        assert_eq!(model.forecast_with_intervals(0, 0.9).unwrap().horizon(), 0);
    }

    #[test]
    fn forecaster_trait_object() {
        let values: Vec<f64> = (0..30).map(|i| 3.0 + (i % 2) as f64).collect();
        let ts = TimeSeries::from_start(
            chrono::NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            crate::core::EpiPeriod::new(2019, 1),
            values,
            13,
            chrono::Duration::weeks(4),
        )
        .unwrap();

        let mut model: Box<dyn Forecaster> =
            Box::new(Sarima::new(config((0, 0, 0), (0, 0, 0, 13), Trend::Constant)));
        assert!(!model.is_fitted());
        model.fit(&ts).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.name(), "SARIMA");
        assert_eq!(model.predict_with_intervals(2, 0.8).unwrap().horizon(), 2);
    }
}
