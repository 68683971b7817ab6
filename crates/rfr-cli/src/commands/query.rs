//! Query command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rfr_core::Date;
use rfr_curves::{ConventionsRegistry, CurveResult, OisCurve};

use crate::cli::OutputFormat;
use crate::commands::{build_curve, parse_dates, CurveArgs};
use crate::output::{format_df, format_percent, print_csv, print_header, print_json, print_table};

/// Arguments for the query command.
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub curve: CurveArgs,

    /// Dates to query (comma-separated YYYY-MM-DD)
    #[arg(short, long, required = true)]
    pub at: String,
}

/// Curve values at one date.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// Queried date.
    pub date: Date,
    /// Curve time in years.
    pub time: f64,
    /// Discount factor.
    pub discount_factor: f64,
    /// Continuously compounded zero rate in percent.
    pub zero_rate_pct: f64,
    /// Instantaneous forward rate in percent.
    pub instantaneous_forward_pct: f64,
}

impl QueryResult {
    fn evaluate(curve: &OisCurve, date: Date) -> CurveResult<Self> {
        Ok(Self {
            date,
            time: curve.year_fraction(date),
            discount_factor: curve.discount_factor(date)?,
            zero_rate_pct: curve.zero_rate(date)? * 100.0,
            instantaneous_forward_pct: curve.instantaneous_forward(date)? * 100.0,
        })
    }
}

#[derive(Tabled)]
struct QueryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time (Y)")]
    time: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
    #[tabled(rename = "Zero Rate (%)")]
    zero_rate: String,
    #[tabled(rename = "Inst. Forward (%)")]
    forward: String,
}

impl From<&QueryResult> for QueryRow {
    fn from(result: &QueryResult) -> Self {
        Self {
            date: result.date.to_string(),
            time: format!("{:.6}", result.time),
            discount_factor: format_df(result.discount_factor),
            zero_rate: format_percent(result.zero_rate_pct / 100.0),
            forward: format_percent(result.instantaneous_forward_pct / 100.0),
        }
    }
}

/// Execute the query command.
pub fn execute(args: QueryArgs, registry: &ConventionsRegistry, format: OutputFormat) -> Result<()> {
    let dates = parse_dates(&args.at)?;
    let curve = build_curve(&args.curve, registry)?;

    let results = dates
        .into_iter()
        .map(|date| QueryResult::evaluate(&curve, date))
        .collect::<CurveResult<Vec<_>>>()?;

    match format {
        OutputFormat::Table => {
            print_header(&format!(
                "{} OIS Curve @ {}",
                curve.conventions().index,
                curve.evaluation_date()
            ));
            let rows: Vec<QueryRow> = results.iter().map(QueryRow::from).collect();
            print_table(&rows);
        }
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Csv => print_csv(&results)?,
    }

    Ok(())
}
