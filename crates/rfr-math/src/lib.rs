//! # RFR Math
//!
//! Numerical primitives for discount curve bootstrapping.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, Brent, and a
//!   hybrid of the two with automatic bracket expansion)
//! - **Interpolation**: Natural cubic spline with analytic derivative and
//!   linear end extrapolation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{CubicSpline, Interpolator};
    pub use crate::solvers::{
        brent, expand_bracket, hybrid, hybrid_numerical, newton_raphson,
        newton_raphson_numerical, Bracket, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
