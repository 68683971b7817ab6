//! Log-cubic interpolation of discount factors.
//!
//! A natural cubic spline runs through `(t_i, ln D_i)` with the anchor
//! `(0, 0)` as the first knot. Past the last knot `ln D` continues linearly
//! with the end slope, so the instantaneous forward stays flat there.

use rfr_math::interpolation::{CubicSpline, Interpolator};

use crate::error::{CurveError, CurveResult};

/// Natural cubic spline on log discount factors.
#[derive(Debug, Clone)]
pub struct LogCubicInterpolator {
    spline: CubicSpline,
}

impl LogCubicInterpolator {
    /// Builds the interpolator from curve times and discount factors.
    ///
    /// The first knot is expected to be the anchor `(0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Config` if a discount factor is not positive or
    /// the times are not strictly increasing.
    pub fn new(times: &[f64], discount_factors: &[f64]) -> CurveResult<Self> {
        if let Some(df) = discount_factors.iter().find(|df| !df.is_finite() || **df <= 0.0) {
            return Err(CurveError::config(format!(
                "discount factor {df} is not positive"
            )));
        }
        let log_dfs = discount_factors.iter().map(|df| df.ln()).collect();
        let spline = CubicSpline::new(times.to_vec(), log_dfs)
            .map_err(|e| CurveError::config(format!("cannot build log-cubic spline: {e}")))?
            .with_extrapolation();
        Ok(Self { spline })
    }

    /// Discount factor at curve time `t`.
    pub fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        self.spline
            .interpolate(t)
            .map(f64::exp)
            .map_err(|e| CurveError::config(e.to_string()))
    }

    /// Instantaneous forward `-d ln D / dt` at curve time `t`.
    pub fn instantaneous_forward(&self, t: f64) -> CurveResult<f64> {
        self.spline
            .derivative(t)
            .map(|slope| -slope)
            .map_err(|e| CurveError::config(e.to_string()))
    }

    /// Curve time of the last knot.
    #[must_use]
    pub fn max_time(&self) -> f64 {
        self.spline.max_x()
    }

    /// Knot times, anchor included.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.spline.xs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reproduces_pillars() {
        let times = [0.0, 0.25, 1.0, 5.0];
        let dfs = [1.0, 0.995, 0.96, 0.8];
        let interp = LogCubicInterpolator::new(&times, &dfs).unwrap();

        for (t, df) in times.iter().zip(dfs.iter()) {
            assert_relative_eq!(interp.discount_factor(*t).unwrap(), *df, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_single_pillar_is_flat_forward() {
        // Two knots: ln D is a straight line, constant forward everywhere
        let df = (-0.04f64).exp();
        let interp = LogCubicInterpolator::new(&[0.0, 1.0], &[1.0, df]).unwrap();

        assert_relative_eq!(interp.instantaneous_forward(0.0).unwrap(), 0.04, epsilon = 1e-12);
        assert_relative_eq!(interp.instantaneous_forward(0.5).unwrap(), 0.04, epsilon = 1e-12);
        assert_relative_eq!(
            interp.discount_factor(2.0).unwrap(),
            (-0.08f64).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_flat_forward_past_last_knot() {
        let interp =
            LogCubicInterpolator::new(&[0.0, 1.0, 2.0, 5.0], &[1.0, 0.97, 0.93, 0.82]).unwrap();

        let last = interp.instantaneous_forward(5.0).unwrap();
        assert_relative_eq!(interp.instantaneous_forward(7.0).unwrap(), last, epsilon = 1e-14);
        assert_relative_eq!(interp.instantaneous_forward(30.0).unwrap(), last, epsilon = 1e-14);

        let ratio = interp.discount_factor(8.0).unwrap() / interp.discount_factor(6.0).unwrap();
        assert_relative_eq!(ratio, (-2.0 * last).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_discount_factor() {
        assert!(LogCubicInterpolator::new(&[0.0, 1.0], &[1.0, 0.0]).is_err());
        assert!(LogCubicInterpolator::new(&[0.0, 1.0], &[1.0, f64::NAN]).is_err());
        assert!(LogCubicInterpolator::new(&[0.0, 1.0, 1.0], &[1.0, 0.9, 0.8]).is_err());
    }
}
