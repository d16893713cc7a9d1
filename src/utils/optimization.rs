//! Unconstrained Nelder-Mead simplex search used for CSS estimation.

/// Outcome of a simplex search.
#[derive(Debug, Clone)]
pub struct SimplexResult {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at `point`.
    pub value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of objective evaluations.
    pub evaluations: usize,
    /// Whether the tolerance test was met before the iteration limit.
    pub converged: bool,
}

/// Settings for [`nelder_mead`].
#[derive(Debug, Clone)]
pub struct SimplexConfig {
    /// Minimum iteration budget.
    pub max_iter: usize,
    /// Extra budget per coordinate; the limit is
    /// `max(max_iter, iterations_per_dim * dim)`.
    pub iterations_per_dim: usize,
    /// Relative tolerance on the spread of objective values.
    pub f_tolerance: f64,
    /// Absolute tolerance on the simplex size.
    pub x_tolerance: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrink coefficient.
    pub sigma: f64,
    /// Initial simplex offset per coordinate.
    pub initial_step: f64,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            iterations_per_dim: 200,
            f_tolerance: 1e-8,
            x_tolerance: 1e-6,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.1,
        }
    }
}

impl SimplexConfig {
    /// Fixed iteration limit regardless of dimension.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self.iterations_per_dim = 0;
        self
    }

    pub fn with_iterations_per_dim(mut self, iterations: usize) -> Self {
        self.iterations_per_dim = iterations;
        self
    }

    /// Iteration limit for a search over `dim` coordinates.
    pub fn iteration_limit(&self, dim: usize) -> usize {
        self.max_iter.max(self.iterations_per_dim.saturating_mul(dim))
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.f_tolerance = tolerance;
        self.x_tolerance = tolerance;
        self
    }
}

/// Minimize `objective` starting from `initial` without bounds.
///
/// Non-finite objective values are treated as `+inf`, so the simplex moves
/// away from regions where the objective is undefined. An empty starting
/// point is evaluated once and reported as converged.
///
/// # Example
/// ```
/// use epi_forecast::utils::optimization::{nelder_mead, SimplexConfig};
///
/// let result = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] + 1.0).powi(2),
///     &[0.0, 0.0],
///     &SimplexConfig::default(),
/// );
///
/// assert!(result.converged);
/// assert!((result.point[0] - 2.0).abs() < 1e-3);
/// assert!((result.point[1] + 1.0).abs() < 1e-3);
/// ```
pub fn nelder_mead<F>(objective: F, initial: &[f64], config: &SimplexConfig) -> SimplexResult
where
    F: Fn(&[f64]) -> f64,
{
    let mut evaluations = 0;
    let mut eval = |x: &[f64]| {
        evaluations += 1;
        let v = objective(x);
        if v.is_finite() {
            v
        } else {
            f64::INFINITY
        }
    };

    let n = initial.len();
    if n == 0 {
        let value = eval(initial);
        return SimplexResult {
            point: Vec::new(),
            value,
            iterations: 0,
            evaluations,
            converged: true,
        };
    }

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(initial.to_vec());
    for i in 0..n {
        let mut vertex = initial.to_vec();
        vertex[i] += if initial[i].abs() > 1e-8 {
            config.initial_step * initial[i].abs().max(1.0)
        } else {
            config.initial_step
        };
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| eval(v)).collect();

    let limit = config.iteration_limit(n);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < limit {
        order_simplex(&mut simplex, &mut values);

        if has_converged(&simplex, &values, config) {
            converged = true;
            break;
        }
        iterations += 1;

        let best = values[0];
        let second_worst = values[n - 1];
        let worst = values[n];
        let centroid = centroid_without_last(&simplex);

        let reflected = along(&centroid, &simplex[n], -config.alpha);
        let f_reflected = eval(&reflected);

        if f_reflected < best {
            let expanded = along(&centroid, &simplex[n], -config.alpha * config.gamma);
            let f_expanded = eval(&expanded);
            if f_expanded < f_reflected {
                replace_worst(&mut simplex, &mut values, expanded, f_expanded);
            } else {
                replace_worst(&mut simplex, &mut values, reflected, f_reflected);
            }
            continue;
        }

        if f_reflected < second_worst {
            replace_worst(&mut simplex, &mut values, reflected, f_reflected);
            continue;
        }

        let (contracted, f_contracted) = if f_reflected < worst {
            let outside = along(&centroid, &simplex[n], -config.alpha * config.rho);
            let f = eval(&outside);
            (outside, f)
        } else {
            let inside = along(&centroid, &simplex[n], config.rho);
            let f = eval(&inside);
            (inside, f)
        };

        if f_contracted < worst.min(f_reflected) {
            replace_worst(&mut simplex, &mut values, contracted, f_contracted);
            continue;
        }

        // Shrink towards the best vertex
        let anchor = simplex[0].clone();
        for (vertex, value) in simplex.iter_mut().zip(values.iter_mut()).skip(1) {
            for (x, a) in vertex.iter_mut().zip(&anchor) {
                *x = a + config.sigma * (*x - a);
            }
            *value = eval(vertex);
        }
    }

    order_simplex(&mut simplex, &mut values);
    if !converged {
        converged = has_converged(&simplex, &values, config);
    }

    SimplexResult {
        point: simplex.swap_remove(0),
        value: values[0],
        iterations,
        evaluations,
        converged,
    }
}

/// Sort vertices by objective value, best first.
fn order_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    *simplex = indices.iter().map(|&i| simplex[i].clone()).collect();
    *values = indices.iter().map(|&i| values[i]).collect();
}

fn has_converged(simplex: &[Vec<f64>], values: &[f64], config: &SimplexConfig) -> bool {
    let best = values[0];
    let worst = values[values.len() - 1];
    if !best.is_finite() || !worst.is_finite() {
        return false;
    }

    let f_spread = (worst - best).abs();
    let f_scale = best.abs() + worst.abs() + f64::MIN_POSITIVE;
    let f_ok = f_spread <= config.f_tolerance * f_scale || f_spread <= f64::EPSILON;

    let x_size = simplex[1..]
        .iter()
        .flat_map(|v| v.iter().zip(&simplex[0]).map(|(x, b)| (x - b).abs()))
        .fold(0.0, f64::max);
    let x_scale = simplex[0].iter().fold(1.0, |m: f64, x| m.max(x.abs()));
    let x_ok = x_size <= config.x_tolerance * x_scale;

    (f_ok && x_ok) || f_spread == 0.0
}

fn centroid_without_last(simplex: &[Vec<f64>]) -> Vec<f64> {
    let n = simplex.len() - 1;
    let mut c = vec![0.0; simplex[0].len()];
    for vertex in &simplex[..n] {
        for (ci, x) in c.iter_mut().zip(vertex) {
            *ci += x;
        }
    }
    for ci in &mut c {
        *ci /= n as f64;
    }
    c
}

/// Point `centroid + t * (vertex - centroid)`.
fn along(centroid: &[f64], vertex: &[f64], t: f64) -> Vec<f64> {
    centroid
        .iter()
        .zip(vertex)
        .map(|(c, v)| c + t * (v - c))
        .collect()
}

fn replace_worst(simplex: &mut [Vec<f64>], values: &mut [f64], point: Vec<f64>, value: f64) {
    let last = simplex.len() - 1;
    simplex[last] = point;
    values[last] = value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn minimizes_quadratic() {
        let result = nelder_mead(
            |x| (x[0] - 3.0).powi(2) + 2.0 * (x[1] + 0.5).powi(2) + 1.0,
            &[0.0, 0.0],
            &SimplexConfig::default(),
        );
        assert!(result.converged);
        assert_relative_eq!(result.point[0], 3.0, epsilon = 1e-3);
        assert_relative_eq!(result.point[1], -0.5, epsilon = 1e-3);
        assert_relative_eq!(result.value, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn minimizes_rosenbrock() {
        let rosenbrock = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2);
        let config = SimplexConfig::default().with_max_iter(5000);
        let result = nelder_mead(rosenbrock, &[-1.2, 1.0], &config);
        assert_relative_eq!(result.point[0], 1.0, epsilon = 1e-2);
        assert_relative_eq!(result.point[1], 1.0, epsilon = 1e-2);
    }

    #[test]
    fn search_is_unbounded() {
        // Minimum far outside any stationarity-style box
        let result = nelder_mead(|x| (x[0] - 25.0).powi(2), &[0.0], &SimplexConfig::default());
        assert!(result.converged);
        assert_relative_eq!(result.point[0], 25.0, epsilon = 1e-3);
    }

    #[test]
    fn non_finite_regions_are_avoided() {
        let result = nelder_mead(
            |x| if x[0] < 0.0 { f64::NAN } else { (x[0] - 1.0).powi(2) },
            &[0.5],
            &SimplexConfig::default(),
        );
        assert!(result.value.is_finite());
        assert_relative_eq!(result.point[0], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn iteration_limit_reports_not_converged() {
        let rosenbrock = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2);
        let config = SimplexConfig::default().with_max_iter(3);
        let result = nelder_mead(rosenbrock, &[-1.2, 1.0], &config);
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn iteration_budget_grows_with_dimension() {
        let config = SimplexConfig::default();
        assert_eq!(config.iteration_limit(2), 1000);
        assert_eq!(config.iteration_limit(9), 1800);
        assert_eq!(config.clone().with_max_iter(50).iteration_limit(9), 50);
    }

    #[test]
    fn high_dimensional_search_uses_the_scaled_budget() {
        // Ill-conditioned 8-d bowl: slow progress along the flat axes
        let bowl = |x: &[f64]| {
            x.iter()
                .enumerate()
                .map(|(i, v)| 10f64.powi(i as i32 % 4) * (v - 1.0).powi(2))
                .sum::<f64>()
        };
        let start = [0.0; 8];
        let fixed_config = SimplexConfig::default().with_max_iter(10);
        let scaled_config = fixed_config.clone().with_iterations_per_dim(200);
        let fixed = nelder_mead(bowl, &start, &fixed_config);
        let scaled = nelder_mead(bowl, &start, &scaled_config);
        assert_eq!(fixed.iterations, 10);
        assert!(!fixed.converged);
        assert!(scaled.iterations > 10);
        assert!(scaled.value < fixed.value);
    }

    #[test]
    fn empty_point_is_trivially_converged() {
        let result = nelder_mead(|_| 4.0, &[], &SimplexConfig::default());
        assert!(result.converged);
        assert!(result.point.is_empty());
        assert_eq!(result.value, 4.0);
        assert_eq!(result.evaluations, 1);
    }
}
