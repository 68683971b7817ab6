//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of equations:
//!
//! - [`newton_raphson`]: Fast quadratic convergence when derivative is available
//! - [`brent`]: Robust method combining bisection, secant, and inverse quadratic
//! - [`hybrid`]: Newton-Raphson with Brent fallback for robust convergence
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Initial guess |
//!
//! *When a sign change can be bracketed.
//!
//! # Example: discount factor from a par rate
//!
//! ```rust
//! use rfr_math::solvers::{hybrid_numerical, Bracket, SolverConfig};
//!
//! // Single-period swap: 1 - D - r * tau * D = 0
//! let (rate, tau) = (0.04, 1.0);
//! let npv = |d: f64| 1.0 - d - rate * tau * d;
//!
//! let bracket = Bracket::new(0.5, 1.0).with_floor(0.0);
//! let result = hybrid_numerical(npv, 0.95, Some(bracket), &SolverConfig::default()).unwrap();
//! assert!((result.root - 1.0 / 1.04).abs() < 1e-12);
//! ```

mod brent;
mod hybrid;
mod newton;

pub use brent::brent;
pub use hybrid::{expand_bracket, hybrid, hybrid_numerical, Bracket};
pub use newton::{newton_raphson, newton_raphson_numerical};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert!((config.tolerance - 1e-12).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 100);
    }

    /// Fixed-leg PV of an annual-pay swap on a flat continuously compounded curve.
    fn annual_swap_npv(rate: f64, zero: f64, years: u32) -> f64 {
        let df = |t: f64| (-zero * t).exp();
        let annuity: f64 = (1..=years).map(|t| df(f64::from(t))).sum();
        1.0 - df(f64::from(years)) - rate * annuity
    }

    #[test]
    fn test_all_solvers_agree_on_par_rate() {
        let zero = 0.045;
        let f = |r: f64| annual_swap_npv(r, zero, 10);
        let config = SolverConfig::default();

        let newton_result = newton_raphson_numerical(f, 0.04, &config).unwrap();
        let brent_result = brent(f, 0.0, 0.2, &config).unwrap();
        let hybrid_result = hybrid_numerical(f, 0.04, None, &config).unwrap();

        assert_relative_eq!(newton_result.root, brent_result.root, epsilon = 1e-10);
        assert_relative_eq!(newton_result.root, hybrid_result.root, epsilon = 1e-10);

        // Annual par rate on a continuous curve is e^z - 1
        assert_relative_eq!(newton_result.root, zero.exp_m1(), epsilon = 1e-10);
    }

    #[test]
    fn test_solver_convergence_speed() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        let config = SolverConfig::default();

        let newton_result = newton_raphson(f, df, 1.5, &config).unwrap();
        let brent_result = brent(f, 1.0, 2.0, &config).unwrap();

        assert!(newton_result.iterations <= brent_result.iterations);
    }
}
