//! Repricing validation for bootstrapped curves.
//!
//! Every input swap is priced again on the finished curve. A curve that
//! cannot reprice its inputs within tolerance is wrong, whatever the
//! solver reported along the way.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use rfr_core::Date;
//! use rfr_curves::prelude::*;
//!
//! let eval = Date::from_ymd(2025, 1, 15).unwrap();
//! let quotes = QuoteSet::parse_list("1M=1.5,1Y=4.0,5Y=4.5").unwrap();
//!
//! let result = CurveBuilder::new(eval, Arc::new(Conventions::sofr()))
//!     .quotes(quotes)
//!     .build_validated()
//!     .unwrap();
//!
//! assert!(result.is_valid());
//! assert!(result.max_error() < 1e-10);
//! ```

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use rfr_core::Date;

use crate::curve::OisCurve;
use crate::error::CurveResult;
use crate::instruments::{CurveInstrument, OisSwap};
use crate::traits::Curve;

/// Result of repricing one input swap.
#[derive(Debug, Clone, Serialize)]
pub struct RepricingCheck {
    /// Quote label, e.g. "10Y".
    pub quote: String,

    /// Pillar (maturity) date of the swap.
    pub pillar_date: Date,

    /// Quoted par rate as a fraction.
    pub quoted_rate: f64,

    /// Par rate implied by the curve.
    pub model_rate: f64,

    /// NPV of the quoted swap on the curve, per unit notional.
    pub model_npv: f64,

    /// Absolute NPV error.
    pub error: f64,

    /// Tolerance on the NPV error.
    pub tolerance: f64,

    /// Whether the swap repriced within tolerance.
    pub passed: bool,
}

impl RepricingCheck {
    /// Reprices a swap on `curve`.
    pub fn from_instrument(
        instrument: &OisSwap,
        curve: &dyn Curve,
        tolerance: f64,
    ) -> CurveResult<Self> {
        let model_npv = instrument.npv(curve)?;
        let model_rate = instrument.par_rate(curve)?;
        let error = model_npv.abs();

        Ok(Self {
            quote: instrument.label().to_string(),
            pillar_date: instrument.pillar_date(),
            quoted_rate: instrument.quoted_rate(),
            model_rate,
            model_npv,
            error,
            tolerance,
            passed: error <= tolerance,
        })
    }

    /// Quoted minus implied par rate, in basis points.
    #[must_use]
    pub fn rate_error_bp(&self) -> f64 {
        (self.quoted_rate - self.model_rate) * 10_000.0
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {:>5} {} | NPV: {:.2e} | Error: {:.2e} (tol: {:.2e})",
            status, self.quote, self.pillar_date, self.model_npv, self.error, self.tolerance
        )
    }
}

/// Repricing results for every input swap of a curve.
#[derive(Debug, Clone, Serialize)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    max_error: f64,
    rms_error: f64,
    passed_count: usize,
}

impl RepricingReport {
    /// Summarises individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        let max_error = checks.iter().map(|c| c.error).fold(0.0_f64, f64::max);

        let rms_error = if checks.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = checks.iter().map(|c| c.error * c.error).sum();
            (sum_sq / checks.len() as f64).sqrt()
        };

        let passed_count = checks.iter().filter(|c| c.passed).count();

        Self {
            checks,
            max_error,
            rms_error,
            passed_count,
        }
    }

    /// Reprices every instrument on `curve`.
    pub fn for_instruments(
        instruments: &[OisSwap],
        curve: &dyn Curve,
        tolerance: f64,
    ) -> CurveResult<Self> {
        let checks = instruments
            .iter()
            .map(|inst| RepricingCheck::from_instrument(inst, curve, tolerance))
            .collect::<CurveResult<Vec<_>>>()?;
        Ok(Self::new(checks))
    }

    /// Returns true if every swap passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.passed_count == self.checks.len()
    }

    /// Individual checks in pillar order.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Largest absolute NPV error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Root mean square NPV error.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        self.rms_error
    }

    /// Number of swaps within tolerance.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.passed_count
    }

    /// Number of swaps outside tolerance.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.len() - self.passed_count
    }

    /// Checks that failed.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.is_valid() { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Instruments: {}/{} passed", self.passed_count, self.checks.len())?;
        writeln!(f, "Max Error: {:.2e}", self.max_error)?;
        writeln!(f, "RMS Error: {:.2e}", self.rms_error)?;

        if !self.checks.is_empty() {
            writeln!(f)?;
            writeln!(f, "Details:")?;
            for check in &self.checks {
                writeln!(f, "  {check}")?;
            }
        }

        Ok(())
    }
}

/// A curve together with its repricing report.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// The bootstrapped curve.
    pub curve: OisCurve,

    /// Repricing of every input swap on `curve`.
    pub repricing_report: RepricingReport,

    /// Time taken to build and validate the curve.
    pub build_duration: Duration,
}

impl BootstrapResult {
    /// Returns true if every input swap reprices.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.repricing_report.is_valid()
    }

    /// Largest repricing error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.repricing_report.max_error()
    }

    /// Checks that failed.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&RepricingCheck> {
        self.repricing_report.failed_checks()
    }

    /// Consumes the result and returns the curve.
    #[must_use]
    pub fn into_curve(self) -> OisCurve {
        self.curve
    }
}

impl fmt::Display for BootstrapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bootstrap Result")?;
        writeln!(f, "Build time: {:?}", self.build_duration)?;
        writeln!(f)?;
        write!(f, "{}", self.repricing_report)
    }
}
