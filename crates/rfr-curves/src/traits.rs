//! Core trait for discount curves.
//!
//! [`Curve`] is the seam between instruments and curves: an instrument
//! prices itself against any `&dyn Curve`, whether it is a finished
//! [`OisCurve`](crate::curve::OisCurve) or a trial curve inside the
//! bootstrapper.

use rfr_core::daycounts::DayCountConvention;
use rfr_core::Date;

use crate::error::{CurveError, CurveResult};

/// A dated discount curve.
///
/// Implementations provide the evaluation date, the day count that maps
/// dates to curve times and the discount factor at a date. Zero and forward
/// rates are derived.
pub trait Curve: Send + Sync {
    /// The date at which the discount factor is exactly 1.
    fn evaluation_date(&self) -> Date;

    /// Day count mapping dates to curve times.
    fn day_count(&self) -> DayCountConvention;

    /// Discount factor from the evaluation date to `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the date is before the evaluation date or past
    /// the curve's range when extrapolation is not available.
    fn discount_factor(&self, date: Date) -> CurveResult<f64>;

    /// Curve time of `date` in years.
    fn year_fraction(&self, date: Date) -> f64 {
        self.day_count().year_fraction(self.evaluation_date(), date)
    }

    /// Continuously compounded zero rate to `date`.
    ///
    /// At the evaluation date the ratio `-ln D / t` is undefined; the default
    /// implementation then uses the one-day rate.
    fn zero_rate(&self, date: Date) -> CurveResult<f64> {
        let eval = self.evaluation_date();
        if date < eval {
            return Err(CurveError::DateBeforeEvaluation {
                date,
                evaluation_date: eval,
            });
        }
        let target = if date == eval { eval.add_days(1) } else { date };
        let t = self.year_fraction(target);
        let df = self.discount_factor(target)?;
        Ok(-df.ln() / t)
    }

    /// Simply compounded forward rate between two dates.
    ///
    /// `F = (D(start) / D(end) - 1) / τ(start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DateBeforeEvaluation`] if `start` is before the
    /// evaluation date and [`CurveError::InvalidPeriod`] if `end <= start`.
    fn forward_rate(&self, start: Date, end: Date) -> CurveResult<f64> {
        let eval = self.evaluation_date();
        if start < eval {
            return Err(CurveError::DateBeforeEvaluation {
                date: start,
                evaluation_date: eval,
            });
        }
        if end <= start {
            return Err(CurveError::InvalidPeriod { start, end });
        }
        let df_start = self.discount_factor(start)?;
        let df_end = self.discount_factor(end)?;
        let tau = self.day_count().year_fraction(start, end);
        Ok((df_start / df_end - 1.0) / tau)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Flat continuously compounded curve for exercising default methods.
    struct FlatCurve {
        eval: Date,
        rate: f64,
    }

    impl Curve for FlatCurve {
        fn evaluation_date(&self) -> Date {
            self.eval
        }

        fn day_count(&self) -> DayCountConvention {
            DayCountConvention::Act365Fixed
        }

        fn discount_factor(&self, date: Date) -> CurveResult<f64> {
            Ok((-self.rate * self.year_fraction(date)).exp())
        }
    }

    fn flat() -> FlatCurve {
        FlatCurve {
            eval: Date::from_ymd(2025, 1, 15).unwrap(),
            rate: 0.03,
        }
    }

    #[test]
    fn test_zero_rate_of_flat_curve() {
        let curve = flat();
        let date = Date::from_ymd(2030, 1, 15).unwrap();

        assert_relative_eq!(curve.zero_rate(date).unwrap(), 0.03, epsilon = 1e-12);
        // One-day rate: ln/exp round trip over t = 1/365
        assert_relative_eq!(curve.zero_rate(curve.eval).unwrap(), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate_before_evaluation() {
        let curve = flat();
        let date = Date::from_ymd(2024, 12, 31).unwrap();

        assert!(matches!(
            curve.zero_rate(date),
            Err(CurveError::DateBeforeEvaluation { .. })
        ));
    }

    #[test]
    fn test_forward_rate() {
        let curve = flat();
        let start = Date::from_ymd(2026, 1, 15).unwrap();
        let end = Date::from_ymd(2027, 1, 15).unwrap();

        let tau = 365.0 / 365.0;
        let expected = ((0.03f64 * tau).exp() - 1.0) / tau;
        assert_relative_eq!(curve.forward_rate(start, end).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_rate_rejects_bad_periods() {
        let curve = flat();
        let start = Date::from_ymd(2026, 1, 15).unwrap();
        let end = Date::from_ymd(2027, 1, 15).unwrap();

        assert_eq!(
            curve.forward_rate(end, start),
            Err(CurveError::InvalidPeriod { start: end, end: start })
        );
        assert_eq!(
            curve.forward_rate(start, start),
            Err(CurveError::InvalidPeriod { start, end: start })
        );

        let early = Date::from_ymd(2020, 1, 1).unwrap();
        let earlier = Date::from_ymd(2019, 1, 1).unwrap();
        assert_eq!(
            curve.forward_rate(early, earlier),
            Err(CurveError::DateBeforeEvaluation {
                date: early,
                evaluation_date: curve.eval,
            })
        );
    }
}
