//! Overnight Index Swap (OIS) instrument.

use rfr_core::calendars::{BusinessDayConvention, Calendar};
use rfr_core::daycounts::DayCountConvention;
use rfr_core::{Date, Tenor};

use super::CurveInstrument;
use crate::conventions::Conventions;
use crate::error::{CurveError, CurveResult};
use crate::quotes::Quote;
use crate::traits::Curve;

/// One accrual period of the fixed leg, paid at `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPeriod {
    /// Accrual start.
    pub start: Date,
    /// Accrual end and payment date.
    pub end: Date,
    /// Year fraction in the conventions' day count.
    pub accrual: f64,
}

/// Overnight Index Swap resolved from a par quote.
///
/// Exchanges a fixed rate for the daily compounded overnight rate between
/// spot and maturity.
///
/// # Pricing
///
/// On a single curve the compounded floating leg telescopes:
/// ```text
/// Float Leg: DF(spot) - DF(maturity)
/// Fixed Leg: c × Σ τ_i × DF(end_i)
/// ```
///
/// At par the two legs are equal. For a single fixed period this solves to
/// `DF(maturity) = DF(spot) / (1 + c × τ)`.
///
/// # Schedule
///
/// - Spot: evaluation date rolled Following, plus the settlement lag in
///   business days.
/// - Maturity: spot advanced by the tenor (day tenors count business days),
///   Modified Following.
/// - Tenors up to one year pay one fixed period. Longer tenors pay annually,
///   rolled backward from maturity with a short front stub.
#[derive(Debug, Clone)]
pub struct OisSwap {
    label: String,
    tenor: Tenor,
    rate: f64,
    spot: Date,
    maturity: Date,
    periods: Vec<FixedPeriod>,
}

impl OisSwap {
    /// Resolves a quote into a dated swap.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` if the rate is not finite or not above -100%, or
    /// if the swap would mature on or before the evaluation date.
    pub fn resolve(quote: &Quote, evaluation_date: Date, conventions: &Conventions) -> CurveResult<Self> {
        if !quote.rate.is_finite() || quote.rate <= -1.0 {
            return Err(CurveError::invalid_rate(
                &quote.label,
                quote.rate,
                "par rate must be finite and greater than -100%",
            ));
        }

        let calendar = conventions.calendar();
        let spot = calendar.add_business_days(
            calendar.adjust(evaluation_date, BusinessDayConvention::Following),
            conventions.settlement_days as i32,
        );
        let maturity = calendar.advance(spot, quote.tenor, BusinessDayConvention::ModifiedFollowing)?;

        if maturity <= evaluation_date {
            return Err(CurveError::invalid_rate(
                &quote.label,
                quote.rate,
                format!("maturity {maturity} is not after the evaluation date {evaluation_date}"),
            ));
        }

        let periods = fixed_periods(spot, maturity, quote.tenor, calendar, conventions.day_count)?;

        Ok(Self {
            label: quote.label.clone(),
            tenor: quote.tenor,
            rate: quote.rate,
            spot,
            maturity,
            periods,
        })
    }

    /// Swap tenor.
    #[must_use]
    pub fn tenor(&self) -> Tenor {
        self.tenor
    }

    /// Effective (spot) date.
    #[must_use]
    pub fn spot(&self) -> Date {
        self.spot
    }

    /// Fixed leg periods in date order.
    #[must_use]
    pub fn periods(&self) -> &[FixedPeriod] {
        &self.periods
    }

    /// Sum of fixed leg accruals.
    #[must_use]
    pub fn total_accrual(&self) -> f64 {
        self.periods.iter().map(|p| p.accrual).sum()
    }

    /// Fixed leg annuity `Σ τ_i × DF(end_i)`.
    pub fn annuity(&self, curve: &dyn Curve) -> CurveResult<f64> {
        self.periods.iter().try_fold(0.0, |acc, period| {
            Ok(acc + period.accrual * curve.discount_factor(period.end)?)
        })
    }

    /// Rate that sets the NPV to zero on `curve`.
    pub fn par_rate(&self, curve: &dyn Curve) -> CurveResult<f64> {
        let float_leg = curve.discount_factor(self.spot)? - curve.discount_factor(self.maturity)?;
        Ok(float_leg / self.annuity(curve)?)
    }
}

impl CurveInstrument for OisSwap {
    fn label(&self) -> &str {
        &self.label
    }

    fn quoted_rate(&self) -> f64 {
        self.rate
    }

    fn maturity(&self) -> Date {
        self.maturity
    }

    fn npv(&self, curve: &dyn Curve) -> CurveResult<f64> {
        let float_leg = curve.discount_factor(self.spot)? - curve.discount_factor(self.maturity)?;
        let fixed_leg = self.rate * self.annuity(curve)?;
        Ok(float_leg - fixed_leg)
    }

    fn initial_guess(&self, curve: Option<&dyn Curve>) -> CurveResult<f64> {
        let df_spot = match curve {
            Some(curve) => curve.discount_factor(self.spot)?,
            None => 1.0,
        };
        Ok(df_spot / (1.0 + self.rate * self.total_accrual()))
    }
}

/// Fixed leg schedule.
fn fixed_periods(
    spot: Date,
    maturity: Date,
    tenor: Tenor,
    calendar: &dyn Calendar,
    day_count: DayCountConvention,
) -> CurveResult<Vec<FixedPeriod>> {
    let mut ends = vec![maturity];

    if !tenor.is_short() {
        let unadjusted_end = spot.add_tenor(tenor)?;
        let years = tenor.months().unwrap_or(0) / 12 + 1;
        for k in 1..=years {
            let roll = unadjusted_end.add_months(-12 * k as i32)?;
            if roll <= spot {
                break;
            }
            let payment = calendar.adjust(roll, BusinessDayConvention::ModifiedFollowing);
            if payment <= spot {
                break;
            }
            ends.push(payment);
        }
        ends.reverse();
    }

    let mut start = spot;
    let periods = ends
        .into_iter()
        .map(|end| {
            let period = FixedPeriod {
                start,
                end,
                accrual: day_count.year_fraction(start, end),
            };
            start = end;
            period
        })
        .collect();

    Ok(periods)
}
