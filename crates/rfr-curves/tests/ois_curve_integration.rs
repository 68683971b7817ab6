//! Integration test: SOFR OIS curve from par quotes.
//!
//! Evaluation date: January 15, 2025 (spot January 17, T+2)
//!
//! | Tenor | Par rate | Maturity   |
//! |-------|----------|------------|
//! | 1W    | 1.00%    | 2025-01-24 |
//! | 1M    | 1.50%    | 2025-02-18 |
//! | 3M    | 2.00%    | 2025-04-17 |
//! | 1Y    | 4.00%    | 2026-01-20 |
//! | 10Y   | 5.00%    | 2035-01-17 |

use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;
use proptest::prelude::*;

use rfr_core::Date;
use rfr_curves::prelude::*;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn eval() -> Date {
    d(2025, 1, 15)
}

fn scenario_quotes() -> QuoteSet {
    QuoteSet::from_pairs([("1W", 1.0), ("1M", 1.5), ("3M", 2.0), ("1Y", 4.0), ("10Y", 5.0)])
        .unwrap()
}

fn sofr_builder() -> CurveBuilder {
    let registry = ConventionsRegistry::with_defaults();
    CurveBuilder::for_index(eval(), "SOFR", &registry).unwrap()
}

fn scenario_curve() -> OisCurve {
    sofr_builder().quotes(scenario_quotes()).build().unwrap()
}

fn pillar(curve: &OisCurve, label: &str) -> Pillar {
    curve
        .pillars()
        .iter()
        .find(|p| p.quote.as_deref() == Some(label))
        .cloned()
        .unwrap()
}

#[test]
fn test_anchor_discount_factor_is_exactly_one() {
    let curve = scenario_curve();

    assert_eq!(curve.discount_factor(eval()).unwrap(), 1.0);
    assert_eq!(curve.pillars()[0].date, eval());
    assert_eq!(curve.pillars()[0].discount_factor, 1.0);
}

#[test]
fn test_pillar_dates() {
    let curve = scenario_curve();

    let dates: Vec<Date> = curve.pillars().iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![
            eval(),
            d(2025, 1, 24),
            d(2025, 2, 18),
            d(2025, 4, 17),
            d(2026, 1, 20),
            d(2035, 1, 17),
        ]
    );
    assert_eq!(curve.max_date(), d(2035, 1, 17));
}

#[test]
fn test_pillar_discount_factors_strictly_decrease() {
    let curve = scenario_curve();

    for pair in curve.pillars().windows(2) {
        assert!(
            pair[1].discount_factor < pair[0].discount_factor,
            "{:?} -> {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_scenario_levels() {
    let curve = scenario_curve();

    let df_3m = pillar(&curve, "3M").discount_factor;
    let df_1y = pillar(&curve, "1Y").discount_factor;
    let df_10y = pillar(&curve, "10Y").discount_factor;
    assert!(df_3m > df_1y && df_1y > df_10y);

    // Continuous Act/360 zero from the evaluation date sits about 10bp under the par rate
    let zero_1y = curve.zero_rate(pillar(&curve, "1Y").date).unwrap();
    assert!((zero_1y - 0.03904).abs() < 5e-4, "1Y zero rate {zero_1y}");
}

#[test]
fn test_every_quote_reprices() {
    let curve = scenario_curve();

    let report = curve.repricing_report().unwrap();

    assert_eq!(report.checks().len(), 5);
    assert!(report.is_valid(), "{report}");
    for check in report.checks() {
        assert!(check.error < 1e-10, "{check}");
        assert!(check.rate_error_bp().abs() < 1e-6, "{check}");
    }
}

#[test]
fn test_discount_factor_matches_zero_rate() {
    let curve = scenario_curve();

    for months in [1, 2, 6, 13, 30, 61, 119] {
        let date = eval().add_months(months).unwrap();
        let df = curve.discount_factor(date).unwrap();
        let zero = curve.zero_rate(date).unwrap();
        let t = curve.year_fraction(date);

        assert_relative_eq!(df, (-zero * t).exp(), epsilon = 1e-12);
    }
}

#[test]
fn test_flat_forward_beyond_last_pillar() {
    let curve = sofr_builder()
        .quotes(scenario_quotes())
        .extrapolation(Extrapolation::FlatForward)
        .build()
        .unwrap();

    let last = curve.instantaneous_forward(curve.max_date()).unwrap();
    for date in [d(2036, 6, 1), d(2045, 1, 17), d(2055, 1, 15)] {
        assert_relative_eq!(curve.instantaneous_forward(date).unwrap(), last, epsilon = 1e-12);
    }

    // ln D is linear past the last pillar
    let t_a = curve.year_fraction(d(2040, 1, 17));
    let t_b = curve.year_fraction(d(2045, 1, 17));
    let ratio = curve.discount_factor(d(2045, 1, 17)).unwrap()
        / curve.discount_factor(d(2040, 1, 17)).unwrap();
    assert_relative_eq!(ratio, (-last * (t_b - t_a)).exp(), epsilon = 1e-12);
}

#[test]
fn test_extrapolation_disabled_by_default() {
    let curve = scenario_curve();
    let twenty_years = d(2045, 1, 15);

    let err = curve.discount_factor(twenty_years).unwrap_err();
    assert_eq!(
        err,
        CurveError::ExtrapolationDisabled {
            date: twenty_years,
            max_date: d(2035, 1, 17),
        }
    );

    // Per-query opt in
    let df = curve
        .discount_factor_with(twenty_years, Extrapolation::FlatForward)
        .unwrap();
    assert!(df > 0.0 && df < curve.discount_factor(curve.max_date()).unwrap());
}

#[test]
fn test_forward_rate_rejects_bad_periods() {
    let curve = scenario_curve();

    let err = curve.forward_rate(d(2027, 1, 20), d(2026, 1, 20)).unwrap_err();
    assert_eq!(
        err,
        CurveError::InvalidPeriod {
            start: d(2027, 1, 20),
            end: d(2026, 1, 20),
        }
    );

    let err = curve.forward_rate(d(2020, 1, 1), d(2019, 1, 1)).unwrap_err();
    assert_eq!(
        err,
        CurveError::DateBeforeEvaluation {
            date: d(2020, 1, 1),
            evaluation_date: eval(),
        }
    );
}

#[test]
fn test_one_year_and_twelve_months_collide() {
    let quotes = QuoteSet::from_pairs([("1M", 1.5), ("1Y", 4.0), ("12M", 4.0)]).unwrap();

    let err = sofr_builder().quotes(quotes).build().unwrap_err();

    assert!(matches!(
        err,
        CurveError::DuplicatePillar { ref first, ref second, .. } if first == "1Y" && second == "12M"
    ));
}

#[test]
fn test_missing_convention() {
    let registry = ConventionsRegistry::with_defaults();

    let err = CurveBuilder::for_index(eval(), "FEDFUNDS", &registry).unwrap_err();

    assert_eq!(
        err,
        CurveError::MissingConvention {
            key: "FEDFUNDS".to_string()
        }
    );
}

#[test]
fn test_rebuild_leaves_original_untouched() {
    let curve = scenario_curve();
    let pillars_before = curve.pillars().to_vec();
    let probe = d(2027, 6, 15);
    let df_before = curve.discount_factor(probe).unwrap();

    let rebuilt = curve.rebuild_at(d(2026, 1, 15)).unwrap();

    assert_eq!(curve.pillars(), pillars_before.as_slice());
    assert_eq!(curve.discount_factor(probe).unwrap(), df_before);
    assert_eq!(curve.evaluation_date(), eval());

    assert_eq!(rebuilt.evaluation_date(), d(2026, 1, 15));
    assert_eq!(rebuilt.discount_factor(d(2026, 1, 15)).unwrap(), 1.0);
    assert!(rebuilt.max_date() > curve.max_date());
    assert!(rebuilt.repricing_report().unwrap().is_valid());
}

#[test]
fn test_curve_is_shared_across_threads() {
    let curve = Arc::new(scenario_curve());
    let dates: Vec<Date> = (1..=24).map(|m| eval().add_months(m * 5).unwrap()).collect();
    let expected: Vec<f64> = dates
        .iter()
        .map(|date| curve.discount_factor(*date).unwrap())
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let curve = Arc::clone(&curve);
            let dates = dates.clone();
            thread::spawn(move || {
                dates
                    .iter()
                    .map(|date| curve.discount_factor(*date).unwrap())
                    .collect::<Vec<f64>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_full_quote_set_term_structure() {
    let quotes = QuoteSet::from_pairs([
        ("1W", 1.0),
        ("1M", 1.5),
        ("3M", 2.0),
        ("6M", 3.0),
        ("1Y", 4.0),
        ("2Y", 4.5),
        ("3Y", 4.6),
        ("5Y", 4.7),
        ("10Y", 5.0),
    ])
    .unwrap();

    let result = sofr_builder()
        .quotes(quotes)
        .extrapolation(Extrapolation::FlatForward)
        .build_validated()
        .unwrap();

    assert!(result.is_valid(), "{result}");
    assert!(result.max_error() < 1e-10);

    // 30 years of monthly points
    let curve = result.into_curve();
    let mut previous_df = 1.0;
    for months in 1..360 {
        let date = eval().add_months(months).unwrap();
        let df = curve.discount_factor(date).unwrap();
        let zero = curve.zero_rate(date).unwrap();

        assert!(df < previous_df, "DF not decreasing at {date}");
        assert!(zero > 0.0 && zero < 0.08, "zero rate {zero} at {date}");
        previous_df = df;
    }
}

#[test]
fn test_other_markets() {
    let registry = ConventionsRegistry::with_defaults();
    let quotes = QuoteSet::parse_list("1M=4.7,6M=4.5,1Y=4.2,5Y=3.8,10Y=3.9").unwrap();

    for index in ["SONIA", "TONA", "ESTR"] {
        let curve = CurveBuilder::for_index(eval(), index, &registry)
            .unwrap()
            .quotes(quotes.clone())
            .build()
            .unwrap();

        assert!(curve.repricing_report().unwrap().is_valid(), "{index}");
        assert_eq!(curve.conventions().index, index);
    }
}

#[test]
fn test_conventions_from_file() {
    let path = std::env::temp_dir().join(format!("rfr-conventions-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"SOFR": {"market": "US", "settlement_days": 1}}"#,
    )
    .unwrap();

    let registry = ConventionsRegistry::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let curve = CurveBuilder::for_index(eval(), "SOFR", &registry)
        .unwrap()
        .quotes(scenario_quotes())
        .build()
        .unwrap();

    // T+1 spot: Jan 16; 1W maturity Jan 23
    assert_eq!(curve.pillars()[1].date, d(2025, 1, 23));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn positive_quotes_give_decreasing_repricing_curves(
        rates in proptest::collection::vec(3.0f64..5.0, 5),
    ) {
        let labels = ["1M", "3M", "1Y", "5Y", "10Y"];
        let quotes = QuoteSet::from_pairs(labels.iter().copied().zip(rates.iter().copied())).unwrap();

        let curve = sofr_builder().quotes(quotes).build().unwrap();

        for pair in curve.pillars().windows(2) {
            prop_assert!(pair[1].discount_factor < pair[0].discount_factor);
        }
        let report = curve.repricing_report().unwrap();
        prop_assert!(report.max_error() < 1e-10);
    }
}
