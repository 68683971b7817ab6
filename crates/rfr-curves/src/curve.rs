//! The bootstrapped OIS discount curve and its builder.

use std::sync::Arc;
use std::time::Instant;

use log::info;
use serde::Serialize;

use rfr_core::daycounts::DayCountConvention;
use rfr_core::Date;

use crate::bootstrap::Bootstrapper;
use crate::config::{CurveConfig, Extrapolation, MonotonicityPolicy};
use crate::conventions::{Conventions, ConventionsRegistry};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{CurveInstrument, OisSwap};
use crate::interpolation::LogCubicInterpolator;
use crate::quotes::{Quote, QuoteSet};
use crate::repricing::{BootstrapResult, RepricingReport};
use crate::traits::Curve;

/// A solved curve point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pillar {
    /// Pillar date.
    pub date: Date,
    /// Curve time in the conventions' day count.
    pub time: f64,
    /// Discount factor at `date`.
    pub discount_factor: f64,
    /// Label of the quote that fixed this pillar; `None` for the anchor.
    pub quote: Option<String>,
}

impl Pillar {
    /// Continuously compounded zero rate to the pillar (0 for the anchor).
    #[must_use]
    pub fn zero_rate(&self) -> f64 {
        if self.time > 0.0 {
            -self.discount_factor.ln() / self.time
        } else {
            0.0
        }
    }
}

/// OIS discount curve with log-cubic interpolation.
///
/// Immutable after construction. A new evaluation date or new quotes
/// produce a new curve through [`OisCurve::rebuild_at`] or
/// [`CurveBuilder`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use rfr_core::Date;
/// use rfr_curves::prelude::*;
///
/// let eval = Date::from_ymd(2025, 1, 15).unwrap();
/// let curve = CurveBuilder::new(eval, Arc::new(Conventions::sofr()))
///     .quotes(QuoteSet::parse_list("1W=1.0,1M=1.5,3M=2.0,1Y=4.0,10Y=5.0").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(curve.discount_factor(eval).unwrap(), 1.0);
///
/// let five_years = Date::from_ymd(2030, 1, 15).unwrap();
/// let df = curve.discount_factor(five_years).unwrap();
/// let zero = curve.zero_rate(five_years).unwrap();
/// assert!((df - (-zero * curve.year_fraction(five_years)).exp()).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct OisCurve {
    evaluation_date: Date,
    conventions: Arc<Conventions>,
    pillars: Vec<Pillar>,
    interpolator: LogCubicInterpolator,
    quotes: QuoteSet,
    config: CurveConfig,
    instruments: Vec<OisSwap>,
    sweeps: u32,
}

impl OisCurve {
    /// Evaluation date (the anchor pillar).
    #[must_use]
    pub fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }

    /// Conventions the curve was built with.
    #[must_use]
    pub fn conventions(&self) -> &Arc<Conventions> {
        &self.conventions
    }

    /// Pillars in date order, anchor first.
    #[must_use]
    pub fn pillars(&self) -> &[Pillar] {
        &self.pillars
    }

    /// Date of the last pillar.
    #[must_use]
    pub fn max_date(&self) -> Date {
        self.pillars
            .last()
            .map_or(self.evaluation_date, |pillar| pillar.date)
    }

    /// Quotes the curve was built from.
    #[must_use]
    pub fn quotes(&self) -> &QuoteSet {
        &self.quotes
    }

    /// Build configuration.
    #[must_use]
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Swaps fixed by the pillars, in pillar order.
    #[must_use]
    pub fn instruments(&self) -> &[OisSwap] {
        &self.instruments
    }

    /// Refinement sweeps needed during bootstrap.
    #[must_use]
    pub fn sweeps(&self) -> u32 {
        self.sweeps
    }

    /// Curve time of `date` in years.
    #[must_use]
    pub fn year_fraction(&self, date: Date) -> f64 {
        self.conventions
            .day_count
            .year_fraction(self.evaluation_date, date)
    }

    /// Discount factor at `date` under the curve's extrapolation policy.
    pub fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        self.discount_factor_with(date, self.config.extrapolation)
    }

    /// Discount factor at `date` with an explicit extrapolation policy.
    pub fn discount_factor_with(&self, date: Date, extrapolation: Extrapolation) -> CurveResult<f64> {
        self.check_date(date, extrapolation)?;
        if date == self.evaluation_date {
            return Ok(1.0);
        }
        self.interpolator.discount_factor(self.year_fraction(date))
    }

    /// Continuously compounded zero rate to `date`.
    ///
    /// At the evaluation date this is the instantaneous forward at t = 0.
    pub fn zero_rate(&self, date: Date) -> CurveResult<f64> {
        self.zero_rate_with(date, self.config.extrapolation)
    }

    /// Zero rate with an explicit extrapolation policy.
    pub fn zero_rate_with(&self, date: Date, extrapolation: Extrapolation) -> CurveResult<f64> {
        self.check_date(date, extrapolation)?;
        if date == self.evaluation_date {
            return self.interpolator.instantaneous_forward(0.0);
        }
        let t = self.year_fraction(date);
        let df = self.interpolator.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Instantaneous forward rate `-d ln D / dt` at `date`.
    pub fn instantaneous_forward(&self, date: Date) -> CurveResult<f64> {
        self.check_date(date, self.config.extrapolation)?;
        self.interpolator
            .instantaneous_forward(self.year_fraction(date))
    }

    /// Simply compounded forward rate between two dates.
    pub fn forward_rate(&self, start: Date, end: Date) -> CurveResult<f64> {
        Curve::forward_rate(self, start, end)
    }

    /// Builds the same quotes and conventions at another evaluation date.
    ///
    /// This curve is left untouched.
    pub fn rebuild_at(&self, evaluation_date: Date) -> CurveResult<OisCurve> {
        CurveBuilder::new(evaluation_date, Arc::clone(&self.conventions))
            .quotes(self.quotes.clone())
            .config(self.config)
            .build()
    }

    /// Reprices every input swap on this curve.
    pub fn repricing_report(&self) -> CurveResult<RepricingReport> {
        RepricingReport::for_instruments(&self.instruments, self, self.config.repricing_tolerance)
    }

    fn check_date(&self, date: Date, extrapolation: Extrapolation) -> CurveResult<()> {
        if date < self.evaluation_date {
            return Err(CurveError::DateBeforeEvaluation {
                date,
                evaluation_date: self.evaluation_date,
            });
        }
        let max_date = self.max_date();
        if date > max_date && !extrapolation.is_enabled() {
            return Err(CurveError::ExtrapolationDisabled { date, max_date });
        }
        Ok(())
    }
}

impl Curve for OisCurve {
    fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.conventions.day_count
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        OisCurve::discount_factor(self, date)
    }

    fn zero_rate(&self, date: Date) -> CurveResult<f64> {
        OisCurve::zero_rate(self, date)
    }
}

/// Builder for [`OisCurve`].
#[derive(Debug, Clone)]
#[must_use]
pub struct CurveBuilder {
    evaluation_date: Date,
    conventions: Arc<Conventions>,
    quotes: QuoteSet,
    config: CurveConfig,
}

impl CurveBuilder {
    /// Starts a curve at `evaluation_date` with the given conventions.
    pub fn new(evaluation_date: Date, conventions: Arc<Conventions>) -> Self {
        Self {
            evaluation_date,
            conventions,
            quotes: QuoteSet::new(),
            config: CurveConfig::default(),
        }
    }

    /// Starts a curve for an index registered in `registry`.
    ///
    /// # Errors
    ///
    /// Returns `MissingConvention` if the index is not registered.
    pub fn for_index(
        evaluation_date: Date,
        index: &str,
        registry: &ConventionsRegistry,
    ) -> CurveResult<Self> {
        Ok(Self::new(evaluation_date, registry.get(index)?))
    }

    /// Replaces the quote set.
    pub fn quotes(mut self, quotes: QuoteSet) -> Self {
        self.quotes = quotes;
        self
    }

    /// Adds one quote.
    pub fn quote(mut self, quote: Quote) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: CurveConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the default extrapolation policy.
    pub fn extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.config.extrapolation = extrapolation;
        self
    }

    /// Sets the monotonicity policy.
    pub fn monotonicity(mut self, policy: MonotonicityPolicy) -> Self {
        self.config.monotonicity = policy;
        self
    }

    /// Bootstraps the curve.
    ///
    /// # Errors
    ///
    /// Any bootstrap error; see [`Bootstrapper::bootstrap`].
    pub fn build(self) -> CurveResult<OisCurve> {
        let output = Bootstrapper::new(self.evaluation_date, Arc::clone(&self.conventions))
            .with_config(self.config)
            .bootstrap(&self.quotes)?;

        let interpolator = LogCubicInterpolator::new(&output.times, &output.discount_factors)?;

        let anchor = Pillar {
            date: self.evaluation_date,
            time: 0.0,
            discount_factor: 1.0,
            quote: None,
        };
        let pillars: Vec<Pillar> = std::iter::once(anchor)
            .chain(output.instruments.iter().enumerate().map(|(k, inst)| Pillar {
                date: inst.pillar_date(),
                time: output.times[k + 1],
                discount_factor: output.discount_factors[k + 1],
                quote: Some(inst.label().to_string()),
            }))
            .collect();

        info!(
            "Built {} curve at {}: {} pillars to {}, {} sweeps",
            self.conventions.index,
            self.evaluation_date,
            pillars.len() - 1,
            pillars.last().map_or(self.evaluation_date, |p| p.date),
            output.sweeps
        );

        Ok(OisCurve {
            evaluation_date: self.evaluation_date,
            conventions: self.conventions,
            pillars,
            interpolator,
            quotes: self.quotes,
            config: self.config,
            instruments: output.instruments,
            sweeps: output.sweeps,
        })
    }

    /// Bootstraps the curve and reprices every input swap on it.
    pub fn build_validated(self) -> CurveResult<BootstrapResult> {
        let start = Instant::now();
        let curve = self.build()?;
        let repricing_report = curve.repricing_report()?;

        Ok(BootstrapResult {
            curve,
            repricing_report,
            build_duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn eval() -> Date {
        d(2025, 1, 15)
    }

    fn build(list: &str) -> OisCurve {
        CurveBuilder::new(eval(), Arc::new(Conventions::sofr()))
            .quotes(QuoteSet::parse_list(list).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_anchor() {
        let curve = build("1M=1.5,1Y=4.0");

        assert_eq!(curve.discount_factor(eval()).unwrap(), 1.0);
        assert_eq!(curve.pillars()[0].quote, None);
        assert_eq!(curve.pillars().len(), 3);
        assert_eq!(curve.max_date(), d(2026, 1, 20));
    }

    #[test]
    fn test_query_errors() {
        let curve = build("1M=1.5,1Y=4.0");

        assert!(matches!(
            curve.discount_factor(d(2025, 1, 14)),
            Err(CurveError::DateBeforeEvaluation { .. })
        ));
        assert!(matches!(
            curve.zero_rate(d(2027, 1, 14)),
            Err(CurveError::ExtrapolationDisabled { .. })
        ));
        assert!(curve
            .discount_factor_with(d(2027, 1, 14), Extrapolation::FlatForward)
            .is_ok());
    }

    #[test]
    fn test_zero_rate_at_evaluation_is_short_forward() {
        let curve = build("1Y=4.0");

        let short = curve.zero_rate(eval()).unwrap();
        let fwd = curve.instantaneous_forward(eval()).unwrap();
        assert_relative_eq!(short, fwd, epsilon = 1e-15);

        // One pillar: flat forward, so every zero rate is the same
        let mid = curve.zero_rate(d(2025, 7, 15)).unwrap();
        assert_relative_eq!(short, mid, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_rate_between_pillars() {
        let curve = build("1M=1.5,1Y=4.0,5Y=4.5");

        let fwd = curve.forward_rate(d(2026, 1, 20), d(2027, 1, 20)).unwrap();
        assert!(fwd > 0.0 && fwd < 0.1);
    }

    #[test]
    fn test_pillar_zero_rate() {
        let curve = build("1Y=4.0");
        let pillar = &curve.pillars()[1];

        assert_relative_eq!(
            pillar.zero_rate(),
            curve.zero_rate(pillar.date).unwrap(),
            epsilon = 1e-14
        );
        assert_eq!(curve.pillars()[0].zero_rate(), 0.0);
    }

    #[test]
    fn test_for_index() {
        let registry = ConventionsRegistry::with_defaults();

        let builder = CurveBuilder::for_index(eval(), "sonia", &registry).unwrap();
        let curve = builder
            .quote(Quote::from_percent("1Y", 4.5).unwrap())
            .build()
            .unwrap();

        assert_eq!(curve.conventions().index, "SONIA");
        assert_eq!(curve.conventions().day_count, DayCountConvention::Act365Fixed);

        let err = CurveBuilder::for_index(eval(), "SARON", &registry).unwrap_err();
        assert!(matches!(err, CurveError::MissingConvention { .. }));
    }

    #[test]
    fn test_build_validated() {
        let result = CurveBuilder::new(eval(), Arc::new(Conventions::estr()))
            .quotes(QuoteSet::parse_list("1W=2.9,3M=2.8,1Y=2.5,5Y=2.3,10Y=2.5").unwrap())
            .build_validated()
            .unwrap();

        assert!(result.is_valid(), "{}", result.repricing_report);
        assert_eq!(result.repricing_report.checks().len(), 5);
    }
}
