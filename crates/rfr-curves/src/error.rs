//! Error types for curve construction and queries.
//!
//! Bootstrapping errors abort construction and name the offending quote by
//! its original tenor label. Query errors are reported per call.

use rfr_core::{CoreError, Date};
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Tenor label does not parse as `<n><D|W|M|Y>`.
    #[error("Invalid tenor '{tenor}': {reason}")]
    InvalidTenor {
        /// The offending tenor label.
        tenor: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Par rate is unusable, or the instrument matures on or before the
    /// evaluation date.
    #[error("Invalid rate {rate} for quote {quote}: {reason}")]
    InvalidRate {
        /// Tenor label of the quote.
        quote: String,
        /// The par rate as a fraction.
        rate: f64,
        /// Why the quote was rejected.
        reason: String,
    },

    /// Two quotes resolve to the same pillar date.
    #[error("Quotes {first} and {second} both resolve to pillar date {date}")]
    DuplicatePillar {
        /// Tenor label of the earlier quote.
        first: String,
        /// Tenor label of the later quote.
        second: String,
        /// The shared pillar date.
        date: Date,
    },

    /// Root finding or refinement sweeps did not converge.
    #[error("Bootstrap did not converge for quote {quote} after {iterations} iterations (residual: {residual:.2e})")]
    NonConvergence {
        /// Tenor label of the quote being solved.
        quote: String,
        /// Iterations (or sweeps) attempted.
        iterations: u32,
        /// Final residual.
        residual: f64,
    },

    /// A discount factor increases with maturity under the strict policy.
    #[error("Discount factor increases at {date}: {previous:.10} -> {current:.10}")]
    NonMonotonicCurve {
        /// Pillar date where the increase occurs.
        date: Date,
        /// Discount factor at the previous pillar.
        previous: f64,
        /// Discount factor at this pillar.
        current: f64,
    },

    /// No conventions registered under the key.
    #[error("No conventions registered for '{key}'")]
    MissingConvention {
        /// The index or market key that was looked up.
        key: String,
    },

    /// Query beyond the last pillar with extrapolation disabled.
    #[error("Date {date} is beyond the last pillar {max_date} and extrapolation is disabled")]
    ExtrapolationDisabled {
        /// The requested date.
        date: Date,
        /// The last pillar date.
        max_date: Date,
    },

    /// Query before the evaluation date.
    #[error("Date {date} is before the evaluation date {evaluation_date}")]
    DateBeforeEvaluation {
        /// The requested date.
        date: Date,
        /// The curve's evaluation date.
        evaluation_date: Date,
    },

    /// Forward period whose end is not after its start.
    #[error("Forward period end {end} is not after its start {start}")]
    InvalidPeriod {
        /// Start of the period.
        start: Date,
        /// End of the period.
        end: Date,
    },

    /// No quotes were supplied.
    #[error("Quote set is empty")]
    EmptyQuoteSet,

    /// Conventions or curve configuration could not be loaded.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the failure.
        reason: String,
    },

    /// Date arithmetic failed.
    #[error(transparent)]
    Date(#[from] CoreError),
}

impl CurveError {
    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(tenor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            tenor: tenor.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(quote: impl Into<String>, rate: f64, reason: impl Into<String>) -> Self {
        Self::InvalidRate {
            quote: quote.into(),
            rate,
            reason: reason.into(),
        }
    }

    /// Creates a duplicate pillar error.
    #[must_use]
    pub fn duplicate_pillar(first: impl Into<String>, second: impl Into<String>, date: Date) -> Self {
        Self::DuplicatePillar {
            first: first.into(),
            second: second.into(),
            date,
        }
    }

    /// Creates a non-convergence error.
    #[must_use]
    pub fn non_convergence(quote: impl Into<String>, iterations: u32, residual: f64) -> Self {
        Self::NonConvergence {
            quote: quote.into(),
            iterations,
            residual,
        }
    }

    /// Creates a missing convention error.
    #[must_use]
    pub fn missing_convention(key: impl Into<String>) -> Self {
        Self::MissingConvention { key: key.into() }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
