//! Single-instrument discount factor solver.

use log::debug;

use rfr_core::daycounts::DayCountConvention;
use rfr_core::Date;
use rfr_math::solvers::{hybrid_numerical, Bracket, SolverConfig};
use rfr_math::MathError;

use crate::config::CurveConfig;
use crate::error::{CurveError, CurveResult};
use crate::instruments::CurveInstrument;
use crate::interpolation::LogCubicInterpolator;
use crate::traits::Curve;

/// Solves for the pillar discount factor that prices one instrument to par.
///
/// The trial curve is the log-cubic spline through the given knots with the
/// target knot set to the candidate value. Coupon and spot dates that fall
/// between knots are read from that spline, so the NPV is non-linear in the
/// unknown. The hybrid solver starts Newton from the instrument's guess and
/// falls back to Brent on a positive bracket.
#[derive(Debug, Clone, Copy)]
pub struct InstrumentPricer {
    evaluation_date: Date,
    day_count: DayCountConvention,
    solver: SolverConfig,
}

impl InstrumentPricer {
    /// Creates a pricer for curves anchored at `evaluation_date`.
    #[must_use]
    pub fn new(evaluation_date: Date, day_count: DayCountConvention, config: &CurveConfig) -> Self {
        Self {
            evaluation_date,
            day_count,
            solver: config.solver(),
        }
    }

    /// Solves the pillar following `solved`.
    ///
    /// `times` holds the knot times of `solved` (anchor first) followed by
    /// the time of the instrument's pillar.
    pub fn solve_next(
        &self,
        instrument: &dyn CurveInstrument,
        times: &[f64],
        solved: &[f64],
    ) -> CurveResult<f64> {
        let prefix = if solved.len() >= 2 {
            Some(self.trial_curve(&times[..solved.len()], solved)?)
        } else {
            None
        };
        let guess = instrument.initial_guess(prefix.as_ref().map(|c| c as &dyn Curve))?;

        let mut dfs = solved.to_vec();
        dfs.push(guess);
        self.solve_slot(instrument, times, &dfs, solved.len(), guess)
    }

    /// Solves knot `slot` with every other knot held at its value in `dfs`.
    pub fn solve_slot(
        &self,
        instrument: &dyn CurveInstrument,
        times: &[f64],
        dfs: &[f64],
        slot: usize,
        guess: f64,
    ) -> CurveResult<f64> {
        let guess = if guess.is_finite() && guess > 0.0 { guess } else { 1.0 };

        let npv = |df: f64| -> f64 {
            let mut trial = dfs.to_vec();
            trial[slot] = df;
            self.trial_curve(times, &trial)
                .and_then(|curve| instrument.npv(&curve))
                .unwrap_or(f64::NAN)
        };

        let bracket = Bracket::new(guess * 0.5, guess * 1.5).with_floor(0.0);
        let result = hybrid_numerical(&npv, guess, Some(bracket), &self.solver)
            .map_err(|e| self.non_convergence(instrument, &e, npv(guess)))?;

        if !result.root.is_finite() || result.root <= 0.0 {
            return Err(CurveError::non_convergence(
                instrument.label(),
                result.iterations,
                result.residual.abs(),
            ));
        }

        debug!(
            "Solved {} pillar {}: DF = {:.12} ({} iterations, residual {:.2e})",
            instrument.label(),
            instrument.pillar_date(),
            result.root,
            result.iterations,
            result.residual
        );

        Ok(result.root)
    }

    fn trial_curve(&self, times: &[f64], dfs: &[f64]) -> CurveResult<TrialCurve> {
        Ok(TrialCurve {
            evaluation_date: self.evaluation_date,
            day_count: self.day_count,
            interpolator: LogCubicInterpolator::new(times, dfs)?,
        })
    }

    fn non_convergence(
        &self,
        instrument: &dyn CurveInstrument,
        error: &MathError,
        residual_at_guess: f64,
    ) -> CurveError {
        let (iterations, residual) = match *error {
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => (iterations, residual),
            MathError::InvalidBracket { fa, fb, .. } => {
                (self.solver.max_iterations, fa.abs().min(fb.abs()))
            }
            _ => (self.solver.max_iterations, residual_at_guess.abs()),
        };
        debug!("Solver failed for {}: {error}", instrument.label());
        CurveError::non_convergence(instrument.label(), iterations, residual)
    }
}

/// Log-cubic curve over candidate knots, extrapolating flat-forward.
struct TrialCurve {
    evaluation_date: Date,
    day_count: DayCountConvention,
    interpolator: LogCubicInterpolator,
}

impl Curve for TrialCurve {
    fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        self.interpolator.discount_factor(self.year_fraction(date))
    }
}
