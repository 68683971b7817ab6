//! Sequential bootstrap of OIS discount curves.
//!
//! The bootstrapper:
//! 1. Resolves each quote to a dated [`OisSwap`] and sorts by maturity
//! 2. Anchors the curve with DF = 1.0 at the evaluation date
//! 3. Solves each pillar in maturity order from the pillars before it
//! 4. Repeats sequential passes until no pillar moves
//!
//! Step 4 exists because the natural spline is global: adding a knot bends
//! earlier segments slightly, which moves the spot and coupon discount
//! factors of instruments already solved.

mod pricer;

pub use pricer::InstrumentPricer;

use std::sync::Arc;

use log::{debug, warn};

use rfr_core::Date;

use crate::config::{CurveConfig, MonotonicityPolicy};
use crate::conventions::Conventions;
use crate::error::{CurveError, CurveResult};
use crate::instruments::{CurveInstrument, OisSwap};
use crate::quotes::QuoteSet;

/// Solved knots of a curve and the instruments they reprice.
#[derive(Debug, Clone)]
pub struct BootstrapOutput {
    /// Swaps in pillar order.
    pub instruments: Vec<OisSwap>,
    /// Knot times, anchor first.
    pub times: Vec<f64>,
    /// Knot discount factors, anchor first.
    pub discount_factors: Vec<f64>,
    /// Refinement sweeps performed.
    pub sweeps: u32,
}

/// Sequential bootstrapper for OIS discount curves.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use rfr_core::Date;
/// use rfr_curves::bootstrap::Bootstrapper;
/// use rfr_curves::conventions::Conventions;
/// use rfr_curves::quotes::QuoteSet;
///
/// let eval = Date::from_ymd(2025, 1, 15).unwrap();
/// let quotes = QuoteSet::parse_list("1M=1.5,1Y=4.0,10Y=5.0").unwrap();
///
/// let output = Bootstrapper::new(eval, Arc::new(Conventions::sofr()))
///     .bootstrap(&quotes)
///     .unwrap();
///
/// assert_eq!(output.discount_factors.len(), 4);
/// assert_eq!(output.discount_factors[0], 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    evaluation_date: Date,
    conventions: Arc<Conventions>,
    config: CurveConfig,
}

impl Bootstrapper {
    /// Creates a bootstrapper with default settings.
    #[must_use]
    pub fn new(evaluation_date: Date, conventions: Arc<Conventions>) -> Self {
        Self {
            evaluation_date,
            conventions,
            config: CurveConfig::default(),
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: CurveConfig) -> Self {
        self.config = config;
        self
    }

    /// Bootstraps pillar discount factors from `quotes`.
    ///
    /// # Errors
    ///
    /// - `EmptyQuoteSet` if there are no quotes
    /// - `InvalidRate` if a quote cannot be turned into a swap
    /// - `DuplicatePillar` if two quotes mature on the same date
    /// - `NonConvergence` if a pillar cannot be solved or sweeps do not settle
    /// - `NonMonotonicCurve` if a discount factor increases under the strict policy
    pub fn bootstrap(&self, quotes: &QuoteSet) -> CurveResult<BootstrapOutput> {
        if quotes.is_empty() {
            return Err(CurveError::EmptyQuoteSet);
        }

        let mut instruments = quotes
            .iter()
            .map(|quote| OisSwap::resolve(quote, self.evaluation_date, &self.conventions))
            .collect::<CurveResult<Vec<_>>>()?;
        instruments.sort_by_key(|inst| inst.pillar_date());

        if let Some(pair) = instruments
            .windows(2)
            .find(|pair| pair[0].pillar_date() == pair[1].pillar_date())
        {
            return Err(CurveError::duplicate_pillar(
                pair[0].label(),
                pair[1].label(),
                pair[0].pillar_date(),
            ));
        }

        let day_count = self.conventions.day_count;
        let times: Vec<f64> = std::iter::once(0.0)
            .chain(
                instruments
                    .iter()
                    .map(|inst| day_count.year_fraction(self.evaluation_date, inst.pillar_date())),
            )
            .collect();

        let pricer = InstrumentPricer::new(self.evaluation_date, day_count, &self.config);

        let mut dfs = Vec::with_capacity(times.len());
        dfs.push(1.0);
        for (k, instrument) in instruments.iter().enumerate() {
            let df = pricer.solve_next(instrument, &times[..k + 2], &dfs)?;
            dfs.push(df);
        }

        let sweeps = self.refine(&pricer, &instruments, &times, &mut dfs)?;
        self.check_monotonic(&instruments, &dfs)?;

        Ok(BootstrapOutput {
            instruments,
            times,
            discount_factors: dfs,
            sweeps,
        })
    }

    /// Re-solves every pillar against the full curve until the largest
    /// change falls below the sweep tolerance.
    fn refine(
        &self,
        pricer: &InstrumentPricer,
        instruments: &[OisSwap],
        times: &[f64],
        dfs: &mut [f64],
    ) -> CurveResult<u32> {
        let mut last_change = 0.0;
        let mut worst = 0;

        for sweep in 1..=self.config.max_sweeps {
            let mut max_change = 0.0_f64;
            for (k, instrument) in instruments.iter().enumerate() {
                let slot = k + 1;
                let current = dfs[slot];
                let solved = pricer.solve_slot(instrument, times, dfs, slot, current)?;
                let change = (solved - current).abs();
                if change > max_change {
                    max_change = change;
                    worst = k;
                }
                dfs[slot] = solved;
            }

            debug!("Sweep {sweep}: max pillar change {max_change:.3e}");
            if max_change < self.config.sweep_tolerance {
                return Ok(sweep);
            }
            last_change = max_change;
        }

        if self.config.max_sweeps == 0 {
            return Ok(0);
        }
        Err(CurveError::non_convergence(
            instruments[worst].label(),
            self.config.max_sweeps,
            last_change,
        ))
    }

    fn check_monotonic(&self, instruments: &[OisSwap], dfs: &[f64]) -> CurveResult<()> {
        for (k, instrument) in instruments.iter().enumerate() {
            let previous = dfs[k];
            let current = dfs[k + 1];
            if current <= previous {
                continue;
            }

            let date = instrument.pillar_date();
            match self.config.monotonicity {
                MonotonicityPolicy::Strict => {
                    return Err(CurveError::NonMonotonicCurve {
                        date,
                        previous,
                        current,
                    });
                }
                MonotonicityPolicy::AllowNegativeForwards => {
                    warn!(
                        "Negative forwards before {} pillar {date}: DF {previous:.10} -> {current:.10}",
                        instrument.label()
                    );
                }
            }
        }
        Ok(())
    }
}
