//! Property-based tests for metrics, candidate generation, scoring and
//! forecast publication.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated incidence series.

use chrono::{Duration, NaiveDate};
use epi_forecast::core::{EpiPeriod, ForecastResult, TimeSeries};
use epi_forecast::models::sarima::{ModelConfig, Sarima, Trend};
use epi_forecast::selection::{
    generate_candidates, rank_by_mape, score_candidate, ScoreRecord, ScoringRules,
};
use epi_forecast::utils::{mape, rmse, tracking_signal, tracking_signal_breach};
use proptest::prelude::*;

/// Create a series of four-week periods from a vector of values.
fn make_ts(values: &[f64]) -> TimeSeries {
    TimeSeries::from_start(
        NaiveDate::from_ymd_opt(2016, 1, 4).unwrap(),
        EpiPeriod::new(2016, 1),
        values.to_vec(),
        13,
        Duration::weeks(4),
    )
    .unwrap()
}

/// Strategy for count-like series with non-zero values.
fn count_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(1.0..500.0_f64, len)
            .prop_map(|v| v.into_iter().map(f64::round).collect())
    })
}

/// Strategy for aligned actual/predicted pairs.
fn paired_strategy(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(0.5..1000.0_f64, len),
            prop::collection::vec(-100.0..1000.0_f64, len),
        )
    })
}

fn record(index: usize, mape: f64) -> ScoreRecord {
    let model = ModelConfig::sarima((index % 3, 0, 0), (0, 0, 0, 13), Trend::Constant);
    ScoreRecord {
        model,
        label: format!("candidate-{index}"),
        aic: 1.0,
        bic: 1.0,
        rmse: 1.0,
        mape,
        tracking_signal_period: 1,
        tracking_signal_coverage: 0.0,
        variation_delta: 0.0,
    }
}

// =============================================================================
// Property: metrics are non-negative and vanish on perfect predictions
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn rmse_and_mape_are_non_negative((actual, predicted) in paired_strategy(60)) {
        prop_assert!(rmse(&actual, &predicted).unwrap() >= 0.0);
        prop_assert!(mape(&actual, &predicted).unwrap() >= 0.0);
    }

    #[test]
    fn rmse_of_identical_series_is_zero(values in count_values_strategy(1, 60)) {
        prop_assert_eq!(rmse(&values, &values).unwrap(), 0.0);
        prop_assert_eq!(mape(&values, &values).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_lengths_are_domain_errors(
        actual in prop::collection::vec(0.0..10.0_f64, 2..20),
        cut in 1usize..2
    ) {
        let predicted = &actual[..actual.len() - cut];
        let err = rmse(&actual, predicted).unwrap_err();
        prop_assert!(err.is_domain_error());
    }

    #[test]
    fn perfect_predictions_never_breach(
        values in count_values_strategy(1, 60),
        tolerance in 0.01..10.0_f64
    ) {
        prop_assert_eq!(tracking_signal_breach(&values, &values, tolerance).unwrap(), 0);
        let aggregate = tracking_signal(&values, &values, tolerance).unwrap();
        prop_assert_eq!(aggregate.first_breach, 0);
        prop_assert_eq!(aggregate.coverage, 1.0);
    }

    #[test]
    fn tracking_coverage_is_a_fraction((actual, predicted) in paired_strategy(60), tolerance in 0.5..6.0_f64) {
        let aggregate = tracking_signal(&actual, &predicted, tolerance).unwrap();
        prop_assert!((0.0..=1.0).contains(&aggregate.coverage));
        prop_assert!(aggregate.first_breach <= actual.len());
    }
}

// =============================================================================
// Property: candidate grid and ranking
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn candidate_count_is_bound_to_the_sixth(bound in 1usize..4, period in 2usize..53) {
        let candidates = generate_candidates(period, bound, Trend::Constant);
        prop_assert_eq!(candidates.len(), bound.pow(6));
        prop_assert!(candidates.iter().all(|c| c.seasonal_order.period == period));
    }

    #[test]
    fn ranking_is_sorted_and_stable(mapes in prop::collection::vec(0u8..5, 1..40)) {
        let records: Vec<ScoreRecord> = mapes
            .iter()
            .enumerate()
            .map(|(i, m)| record(i, *m as f64))
            .collect();
        let ranked = rank_by_mape(records);

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].mape <= pair[1].mape);
            if pair[0].mape == pair[1].mape {
                let a: usize = pair[0].label["candidate-".len()..].parse().unwrap();
                let b: usize = pair[1].label["candidate-".len()..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }
}

// =============================================================================
// Property: fitted models and published forecasts
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn published_forecast_is_never_negative(
        values in count_values_strategy(40, 90),
        candidate in 0usize..64,
        level in 0.5..0.99_f64,
        horizon in 1usize..20
    ) {
        let ts = make_ts(&values);
        let config = generate_candidates(13, 2, Trend::Constant)[candidate];
        let mut model = Sarima::new(config);
        prop_assume!(model.fit_values(ts.values()).is_ok());

        let forecast = model.forecast_with_intervals(horizon, level).unwrap();
        let (last_date, last_period) = ts.last_observation().unwrap();
        let result = ForecastResult::from_forecast(
            forecast.round_point(),
            last_date,
            last_period,
            13,
            ts.spacing(),
            level,
        )
        .unwrap();

        prop_assert_eq!(result.horizon(), horizon);
        for step in &result.steps {
            prop_assert!(step.forecast >= 0.0);
            prop_assert!(step.lower >= 0.0);
            prop_assert!(step.upper >= 0.0);
            prop_assert!(step.lower <= step.upper);
        }
    }

    #[test]
    fn scoring_is_deterministic(values in count_values_strategy(30, 70)) {
        let config = ModelConfig::sarima((1, 0, 0), (0, 0, 0, 13), Trend::Constant);
        let rules = ScoringRules::default();
        let first = score_candidate(&values, &config, &rules);
        let second = score_candidate(&values, &config, &rules);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.rmse, b.rmse);
                prop_assert_eq!(a.mape, b.mape);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "outcomes differ"),
        }
    }

    #[test]
    fn forecast_periods_follow_the_last_observation(values in count_values_strategy(10, 60)) {
        let ts = make_ts(&values);
        let mut model = Sarima::new(ModelConfig::sarima((0, 0, 0), (0, 0, 0, 13), Trend::Constant));
        model.fit_values(ts.values()).unwrap();
        let (last_date, last_period) = ts.last_observation().unwrap();

        let result = ForecastResult::from_forecast(
            model.forecast_with_intervals(14, 0.9).unwrap(),
            last_date,
            last_period,
            13,
            ts.spacing(),
            0.9,
        )
        .unwrap();

        let mut expected = last_period;
        for (k, step) in result.steps.iter().enumerate() {
            expected = expected.next(13);
            prop_assert_eq!(step.period, expected);
            prop_assert_eq!(step.date, last_date + Duration::weeks(4 * (k as i64 + 1)));
        }
    }
}
