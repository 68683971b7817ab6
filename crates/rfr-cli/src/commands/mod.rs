//! CLI command implementations.

pub mod build;
pub mod pillars;
pub mod query;

pub use build::BuildArgs;
pub use pillars::PillarsArgs;
pub use query::QueryArgs;

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Deserialize;

use rfr_core::Date;
use rfr_curves::{ConventionsRegistry, CurveBuilder, Extrapolation, MonotonicityPolicy, OisCurve, QuoteSet};

use crate::error::{CliError, CliResult};

/// Curve inputs shared by every command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Overnight index (SOFR, SONIA, TONA, ESTR or one defined with --conventions)
    #[arg(short, long, default_value = "SOFR")]
    pub index: String,

    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Par rates in percent (e.g., "1W=1.0,1M=1.5,3M=2.0,1Y=4.0,10Y=5.0")
    #[arg(short, long, conflicts_with = "quotes_file")]
    pub quotes: Option<String>,

    /// CSV file with `tenor,rate` columns, rates in percent
    #[arg(long)]
    pub quotes_file: Option<PathBuf>,

    /// Refuse dates past the last pillar instead of extrapolating flat-forward
    #[arg(long)]
    pub no_extrapolation: bool,

    /// Accept discount factors that rise between pillars
    #[arg(long)]
    pub allow_negative_forwards: bool,
}

impl CurveArgs {
    /// Extrapolation policy selected by the flags.
    pub fn extrapolation(&self) -> Extrapolation {
        if self.no_extrapolation {
            Extrapolation::Disabled
        } else {
            Extrapolation::FlatForward
        }
    }

    /// Monotonicity policy selected by the flags.
    pub fn monotonicity(&self) -> MonotonicityPolicy {
        if self.allow_negative_forwards {
            MonotonicityPolicy::AllowNegativeForwards
        } else {
            MonotonicityPolicy::Strict
        }
    }
}

/// One row of a quotes file.
#[derive(Debug, Deserialize)]
struct QuoteRecord {
    tenor: String,
    rate: f64,
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a comma-separated list of dates.
pub fn parse_dates(s: &str) -> CliResult<Vec<Date>> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_date)
        .collect()
}

/// Built-in conventions, extended or overridden by `path`.
pub fn load_registry(path: Option<&Path>) -> CliResult<ConventionsRegistry> {
    let registry = ConventionsRegistry::with_defaults();
    match path {
        Some(path) => Ok(registry.merge(ConventionsRegistry::from_path(path)?)),
        None => Ok(registry),
    }
}

/// Reads the quote set from `--quotes` or `--quotes-file`.
pub fn load_quotes(args: &CurveArgs) -> CliResult<QuoteSet> {
    let quotes = match (&args.quotes, &args.quotes_file) {
        (Some(list), _) => QuoteSet::parse_list(list)?,
        (None, Some(path)) => read_quotes_file(path)?,
        (None, None) => return Err(CliError::NoQuotes),
    };

    if quotes.is_empty() {
        return Err(CliError::NoQuotes);
    }
    Ok(quotes)
}

fn read_quotes_file(path: &Path) -> CliResult<QuoteSet> {
    let file_error = |reason: String| CliError::QuotesFile {
        path: path.display().to_string(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|e| file_error(e.to_string()))?;

    let records = reader
        .deserialize::<QuoteRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| file_error(e.to_string()))?;

    Ok(QuoteSet::from_pairs(
        records.into_iter().map(|record| (record.tenor, record.rate)),
    )?)
}

/// Evaluation date from `--date`, or today.
pub fn evaluation_date(date: Option<&str>) -> CliResult<Date> {
    date.map_or_else(|| Ok(Date::today()), parse_date)
}

/// Bootstraps the curve described by `args`.
pub fn build_curve(args: &CurveArgs, registry: &ConventionsRegistry) -> CliResult<OisCurve> {
    let evaluation_date = evaluation_date(args.date.as_deref())?;
    let quotes = load_quotes(args)?;

    let curve = CurveBuilder::for_index(evaluation_date, &args.index, registry)?
        .quotes(quotes)
        .extrapolation(args.extrapolation())
        .monotonicity(args.monotonicity())
        .build()?;
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(quotes: Option<&str>) -> CurveArgs {
        CurveArgs {
            index: "SOFR".to_string(),
            date: Some("2025-01-15".to_string()),
            quotes: quotes.map(str::to_string),
            quotes_file: None,
            no_extrapolation: false,
            allow_negative_forwards: false,
        }
    }

    #[test]
    fn test_parse_dates() {
        let dates = parse_dates("2030-01-15, 2040-01-15,").unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[1], Date::from_ymd(2040, 1, 15).unwrap());

        assert!(matches!(parse_dates("2030-13-01"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_quotes_required() {
        assert!(matches!(load_quotes(&args(None)), Err(CliError::NoQuotes)));
        assert!(matches!(load_quotes(&args(Some(" "))), Err(CliError::NoQuotes)));
        assert_eq!(load_quotes(&args(Some("1M=1.5,1Y=4"))).unwrap().len(), 2);
    }

    #[test]
    fn test_build_curve() {
        let registry = load_registry(None).unwrap();

        let curve = build_curve(&args(Some("1M=1.5,1Y=4,10Y=5")), &registry).unwrap();

        assert_eq!(curve.pillars().len(), 4);
        assert!(curve.config().extrapolation.is_enabled());
    }
}
