//! # RFR Curves
//!
//! Overnight index swap discount curves bootstrapped from par quotes.
//!
//! This crate provides:
//!
//! - **Quotes**: [`QuoteSet`] of tenor → par rate, entered in percent
//! - **Conventions**: calendar, day count and settlement lag per index, with
//!   a JSON-loadable [`ConventionsRegistry`]
//! - **Instruments**: [`OisSwap`](instruments::OisSwap) with an annual fixed
//!   leg and a telescoped compounded floating leg
//! - **Bootstrap**: pillar-by-pillar hybrid Newton/Brent solves, refined by
//!   sequential sweeps until every swap reprices
//! - **Interpolation**: natural cubic spline on log discount factors with
//!   flat-forward extrapolation
//! - **Repricing**: per-quote validation report
//!
//! ## Quick Start
//!
//! ```rust
//! use rfr_core::Date;
//! use rfr_curves::prelude::*;
//!
//! let registry = ConventionsRegistry::with_defaults();
//! let eval = Date::from_ymd(2025, 1, 15).unwrap();
//!
//! let curve = CurveBuilder::for_index(eval, "SOFR", &registry)
//!     .unwrap()
//!     .quotes(QuoteSet::from_pairs([("1W", 1.0), ("1M", 1.5), ("3M", 2.0), ("1Y", 4.0), ("10Y", 5.0)]).unwrap())
//!     .extrapolation(Extrapolation::FlatForward)
//!     .build()
//!     .unwrap();
//!
//! let df = curve.discount_factor(Date::from_ymd(2040, 1, 15).unwrap()).unwrap();
//! assert!(df > 0.0 && df < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod bootstrap;
pub mod config;
pub mod conventions;
pub mod curve;
pub mod error;
pub mod instruments;
pub mod interpolation;
pub mod quotes;
pub mod repricing;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapOutput, Bootstrapper, InstrumentPricer};
    pub use crate::config::{CurveConfig, Extrapolation, MonotonicityPolicy};
    pub use crate::conventions::{Conventions, ConventionsRegistry};
    pub use crate::curve::{CurveBuilder, OisCurve, Pillar};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{CurveInstrument, FixedPeriod, OisSwap};
    pub use crate::interpolation::LogCubicInterpolator;
    pub use crate::quotes::{Quote, QuoteSet};
    pub use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport};
    pub use crate::traits::Curve;
}

// Re-export commonly used types at crate root
pub use config::{CurveConfig, Extrapolation, MonotonicityPolicy};
pub use conventions::{Conventions, ConventionsRegistry};
pub use curve::{CurveBuilder, OisCurve, Pillar};
pub use error::{CurveError, CurveResult};
pub use quotes::{Quote, QuoteSet};
pub use traits::Curve;
