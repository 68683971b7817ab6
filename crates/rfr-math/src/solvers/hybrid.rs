//! Hybrid root-finding algorithm.
//!
//! Combines Newton-Raphson with Brent's method for robust convergence.

use log::debug;

use super::newton::FINITE_DIFFERENCE_STEP;
use crate::error::{MathError, MathResult};
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Newton iterations allowed before falling back to Brent.
const NEWTON_FAST_FAIL_ITERATIONS: u32 = 20;

/// Consecutive residual blow-ups tolerated before Newton is abandoned.
const MAX_DIVERGENCE: u32 = 3;

/// A starting interval for bracket search.
///
/// The interval is widened geometrically until the function changes sign.
/// With a floor set, the lower end approaches the floor but never reaches
/// it, which keeps searches in domains such as positive discount factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Initial lower bound.
    pub lower: f64,
    /// Initial upper bound.
    pub upper: f64,
    /// Exclusive lower limit for the search, if any.
    pub floor: Option<f64>,
    /// Maximum number of widening steps.
    pub max_expansions: u32,
    /// Widening factor applied to the current width.
    pub growth: f64,
}

impl Bracket {
    /// Creates a bracket from two bounds (in either order).
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
            floor: None,
            max_expansions: 50,
            growth: 1.6,
        }
    }

    /// Symmetric bracket around a guess.
    #[must_use]
    pub fn around(guess: f64) -> Self {
        let half_width = 0.1 * guess.abs().max(0.1);
        Self::new(guess - half_width, guess + half_width)
    }

    /// Sets an exclusive lower limit.
    #[must_use]
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Sets the maximum number of widening steps.
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u32) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    fn step_down(&self, a: f64, step: f64) -> f64 {
        match self.floor {
            Some(floor) if a - step <= floor => floor + 0.5 * (a - floor),
            _ => a - step,
        }
    }
}

/// Widens a bracket until `f` changes sign across it.
///
/// At each step the end with the smaller residual is pushed outward.
///
/// # Errors
///
/// Returns `MathError::InvalidBracket` with the last interval tried if no
/// sign change is found within `max_expansions` steps.
pub fn expand_bracket<F>(f: &F, bracket: Bracket) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let mut a = bracket.lower;
    let mut b = bracket.upper;
    if let Some(floor) = bracket.floor {
        if a <= floor {
            a = floor + 0.5 * (b - floor);
        }
    }

    let mut fa = f(a);
    let mut fb = f(b);

    for _ in 0..bracket.max_expansions {
        if !fa.is_finite() {
            a = 0.5 * (a + b);
            fa = f(a);
            continue;
        }
        if !fb.is_finite() {
            b = 0.5 * (a + b);
            fb = f(b);
            continue;
        }
        if fa * fb <= 0.0 {
            return Ok((a, b));
        }

        let step = bracket.growth * (b - a);
        if fa.abs() < fb.abs() {
            a = bracket.step_down(a, step);
            fa = f(a);
        } else {
            b += step;
            fb = f(b);
        }
    }

    if fa.is_finite() && fb.is_finite() && fa * fb <= 0.0 {
        return Ok((a, b));
    }
    Err(MathError::InvalidBracket { a, b, fa, fb })
}

/// Hybrid root-finding algorithm.
///
/// Starts with Newton-Raphson for fast quadratic convergence and falls back
/// to Brent's method when Newton diverges, stalls, or lands below the
/// bracket floor. The Brent interval is obtained by [`expand_bracket`]
/// from `bracket`, or from a small interval around the guess.
///
/// # Example
///
/// ```rust
/// use rfr_math::solvers::{hybrid, Bracket, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, Some(Bracket::new(1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-12);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bracket: Option<Bracket>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let floor = bracket.and_then(|b| b.floor);

    let newton_error = match newton_with_monitoring(&f, &df, initial_guess, config) {
        Ok(result) if floor.map_or(true, |fl| result.root > fl) => return Ok(result),
        Ok(result) => MathError::invalid_input(format!(
            "Newton root {} is not above the floor",
            result.root
        )),
        Err(err) => err,
    };

    let bracket = bracket.unwrap_or_else(|| Bracket::around(initial_guess));
    let (a, b) = expand_bracket(&f, bracket)?;
    debug!("Newton failed ({newton_error}); falling back to Brent on [{a:.6e}, {b:.6e}]");

    brent(&f, a, b, config)
}

/// Hybrid solver without derivative (uses central differences).
pub fn hybrid_numerical<F>(
    f: F,
    initial_guess: f64,
    bracket: Option<Bracket>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let h = FINITE_DIFFERENCE_STEP;
    let df = |x: f64| (f(x + h) - f(x - h)) / (2.0 * h);

    hybrid(&f, df, initial_guess, bracket, config)
}

/// Newton-Raphson that fails fast on divergence.
fn newton_with_monitoring<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;
    let max_iter = config.max_iterations.min(NEWTON_FAST_FAIL_ITERATIONS);

    for iteration in 0..max_iter {
        let fx = f(x);
        let residual = fx.abs();

        if !fx.is_finite() {
            return Err(MathError::invalid_input("Newton produced non-finite residual"));
        }
        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return Err(MathError::invalid_input("Newton-Raphson diverging"));
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.abs() < 1e-15 || !dfx.is_finite() {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::invalid_input("Newton produced non-finite value"));
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(max_iter, f(x).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = hybrid(f, df, 1.5, Some(Bracket::new(1.0, 2.0)), &SolverConfig::default())
            .unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_fallback_to_brent() {
        // Zero derivative at the guess forces the fallback
        let f = |x: f64| x * x * x - 2.0 * x - 5.0;
        let df = |x: f64| 3.0 * x * x - 2.0;
        let guess = (2.0f64 / 3.0).sqrt();

        let result = hybrid(f, df, guess, Some(Bracket::new(1.0, 3.0)), &SolverConfig::default())
            .unwrap();

        assert!(f(result.root).abs() < 1e-12);
    }

    #[test]
    fn test_auto_bracket_finding() {
        let f = |x: f64| x * x - 2.0;

        let result = hybrid_numerical(f, 1.5, None, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_floor_rejects_newton_root() {
        // Roots at -0.5 and 0.8; Newton from -0.4 lands on the negative one
        let f = |x: f64| (x + 0.5) * (x - 0.8);
        let bracket = Bracket::new(0.5, 1.0).with_floor(0.0);

        let result = hybrid_numerical(f, -0.4, Some(bracket), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.8, epsilon = 1e-10);
    }

    #[test]
    fn test_expand_bracket_grows_upward() {
        let f = |x: f64| x - 10.0;

        let (a, b) = expand_bracket(&f, Bracket::new(0.0, 1.0)).unwrap();

        assert!(a <= 10.0 && b >= 10.0);
    }

    #[test]
    fn test_expand_bracket_respects_floor() {
        // Root very close to zero, search may not cross the floor
        let f = |x: f64| 1e-6 - x;

        let (a, b) = expand_bracket(&f, Bracket::new(0.5, 1.0).with_floor(0.0)).unwrap();

        assert!(a > 0.0);
        assert!(a <= 1e-6 && b >= 1e-6);
    }

    #[test]
    fn test_expand_bracket_fails_without_sign_change() {
        let f = |x: f64| x * x + 1.0;

        let result = expand_bracket(&f, Bracket::new(-1.0, 1.0).with_max_expansions(10));

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_no_root_anywhere() {
        let f = |x: f64| x * x + 1.0;
        let bracket = Bracket::around(0.3).with_max_expansions(8);

        let result = hybrid_numerical(f, 0.3, Some(bracket), &SolverConfig::default());

        assert!(result.is_err());
    }
}
