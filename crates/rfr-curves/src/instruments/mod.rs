//! Curve instruments for bootstrapping.
//!
//! Each instrument implements [`CurveInstrument`], which is all the pricer
//! needs: a pillar date, a present value against any [`Curve`] and a
//! starting point for the root search.
//!
//! - [`OisSwap`]: fixed vs compounded overnight swap resolved from a par quote

mod ois;

pub use ois::{FixedPeriod, OisSwap};

use rfr_core::Date;

use crate::error::CurveResult;
use crate::traits::Curve;

/// Trait for instruments used in bootstrap.
///
/// `npv()` should be zero (within tolerance) once the curve is calibrated.
pub trait CurveInstrument: Send + Sync {
    /// Label of the quote the instrument was built from.
    fn label(&self) -> &str;

    /// Quoted par rate as a fraction.
    fn quoted_rate(&self) -> f64;

    /// Final payment date.
    fn maturity(&self) -> Date;

    /// Date at which the discount factor is solved.
    fn pillar_date(&self) -> Date {
        self.maturity()
    }

    /// Net present value per unit notional against `curve`.
    fn npv(&self, curve: &dyn Curve) -> CurveResult<f64>;

    /// Starting value for the pillar discount factor.
    ///
    /// `curve` holds the pillars solved so far, when there are any.
    fn initial_guess(&self, curve: Option<&dyn Curve>) -> CurveResult<f64>;
}
