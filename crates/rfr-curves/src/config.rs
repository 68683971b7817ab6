//! Bootstrap and query configuration.

use serde::{Deserialize, Serialize};

use rfr_math::solvers::SolverConfig;

/// What to do when a solved discount factor exceeds the previous pillar's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonotonicityPolicy {
    /// Reject the curve with `NonMonotonicCurve`.
    #[default]
    Strict,
    /// Accept the curve and log a warning.
    AllowNegativeForwards,
}

/// Behaviour for queries beyond the last pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Queries past the last pillar fail with `ExtrapolationDisabled`.
    #[default]
    Disabled,
    /// Log discount factors continue linearly with the slope at the last pillar.
    FlatForward,
}

impl Extrapolation {
    /// Returns true if queries beyond the last pillar are answered.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::FlatForward)
    }
}

impl std::fmt::Display for Extrapolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "Disabled"),
            Self::FlatForward => write!(f, "Flat Forward"),
        }
    }
}

/// Curve construction settings.
///
/// Every field has a default so partial JSON documents deserialize:
///
/// ```rust
/// use rfr_curves::config::{CurveConfig, Extrapolation};
///
/// let config: CurveConfig = serde_json::from_str(r#"{"extrapolation": "flat_forward"}"#).unwrap();
/// assert_eq!(config.extrapolation, Extrapolation::FlatForward);
/// assert_eq!(config.max_sweeps, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Root-finder tolerance on the instrument NPV.
    pub solver_tolerance: f64,
    /// Root-finder iteration budget per instrument.
    pub max_iterations: u32,
    /// Largest pillar change accepted as a converged sweep.
    pub sweep_tolerance: f64,
    /// Refinement sweep budget.
    pub max_sweeps: u32,
    /// Monotonicity policy for solved discount factors.
    pub monotonicity: MonotonicityPolicy,
    /// Default extrapolation policy for queries.
    pub extrapolation: Extrapolation,
    /// Largest |NPV| accepted when repricing input instruments.
    pub repricing_tolerance: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            solver_tolerance: 1e-12,
            max_iterations: 100,
            sweep_tolerance: 1e-12,
            max_sweeps: 50,
            monotonicity: MonotonicityPolicy::Strict,
            extrapolation: Extrapolation::Disabled,
            repricing_tolerance: 1e-10,
        }
    }
}

impl CurveConfig {
    /// Sets the root-finder tolerance.
    #[must_use]
    pub fn with_solver_tolerance(mut self, tolerance: f64) -> Self {
        self.solver_tolerance = tolerance;
        self
    }

    /// Sets the root-finder iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the sweep convergence tolerance.
    #[must_use]
    pub fn with_sweep_tolerance(mut self, tolerance: f64) -> Self {
        self.sweep_tolerance = tolerance;
        self
    }

    /// Sets the sweep budget.
    #[must_use]
    pub fn with_max_sweeps(mut self, max_sweeps: u32) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Sets the monotonicity policy.
    #[must_use]
    pub fn with_monotonicity(mut self, policy: MonotonicityPolicy) -> Self {
        self.monotonicity = policy;
        self
    }

    /// Sets the extrapolation policy.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Sets the repricing tolerance.
    #[must_use]
    pub fn with_repricing_tolerance(mut self, tolerance: f64) -> Self {
        self.repricing_tolerance = tolerance;
        self
    }

    /// Solver settings for the per-instrument root finder.
    #[must_use]
    pub fn solver(&self) -> SolverConfig {
        SolverConfig::new(self.solver_tolerance, self.max_iterations)
    }
}
