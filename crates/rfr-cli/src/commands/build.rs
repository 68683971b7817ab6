//! Build command implementation.
//!
//! Bootstraps a curve and tabulates it on a monthly grid.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rfr_core::Date;
use rfr_curves::{ConventionsRegistry, CurveError, Extrapolation, OisCurve};

use crate::cli::OutputFormat;
use crate::commands::{build_curve, CurveArgs};
use crate::error::{CliError, CliResult};
use crate::output::{
    format_df, format_percent, print_csv, print_header, print_json, print_table, print_warning,
    KeyValue,
};

/// Arguments for the build command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub curve: CurveArgs,

    /// Horizon of the grid in months
    #[arg(long, default_value = "360")]
    pub months: u32,

    /// Grid step in months
    #[arg(long, default_value = "1")]
    pub step: u32,
}

/// One grid point of the term structure.
#[derive(Debug, Clone, Serialize)]
pub struct CurvePoint {
    /// Months after the evaluation date.
    pub months: u32,
    /// Grid date.
    pub date: Date,
    /// Discount factor.
    pub discount_factor: f64,
    /// Continuously compounded zero rate in percent.
    pub zero_rate_pct: f64,
}

#[derive(Tabled)]
struct CurveRow {
    #[tabled(rename = "Months")]
    months: u32,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
    #[tabled(rename = "Zero Rate (%)")]
    zero_rate: String,
}

impl From<&CurvePoint> for CurveRow {
    fn from(point: &CurvePoint) -> Self {
        Self {
            months: point.months,
            date: point.date.to_string(),
            discount_factor: format_df(point.discount_factor),
            zero_rate: format!("{:.4}", point.zero_rate_pct),
        }
    }
}

/// JSON document for the build command.
#[derive(Debug, Serialize)]
struct BuildReport<'a> {
    index: &'a str,
    evaluation_date: Date,
    day_count: String,
    extrapolation: Extrapolation,
    pillars: usize,
    max_date: Date,
    sweeps: u32,
    points: &'a [CurvePoint],
}

/// Execute the build command.
pub fn execute(args: BuildArgs, registry: &ConventionsRegistry, format: OutputFormat) -> Result<()> {
    let curve = build_curve(&args.curve, registry)?;
    let grid = grid_dates(&curve, args.months, args.step)?;

    if grid.len() < (args.months / args.step) as usize {
        print_warning(&format!(
            "Extrapolation disabled: grid stops at the last pillar {}",
            curve.max_date()
        ));
    }

    let points = grid
        .into_iter()
        .map(|(months, date)| {
            Ok(CurvePoint {
                months,
                date,
                discount_factor: curve.discount_factor(date)?,
                zero_rate_pct: curve.zero_rate(date)? * 100.0,
            })
        })
        .collect::<Result<Vec<_>, CurveError>>()?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("{} OIS Curve", curve.conventions().index));
            print_table(&summary(&curve));
            println!();
            let rows: Vec<CurveRow> = points.iter().map(CurveRow::from).collect();
            print_table(&rows);
        }
        OutputFormat::Json => {
            let report = BuildReport {
                index: &curve.conventions().index,
                evaluation_date: curve.evaluation_date(),
                day_count: curve.conventions().day_count.to_string(),
                extrapolation: curve.config().extrapolation,
                pillars: curve.pillars().len() - 1,
                max_date: curve.max_date(),
                sweeps: curve.sweeps(),
                points: &points,
            };
            print_json(&report)?;
        }
        OutputFormat::Csv => print_csv(&points)?,
    }

    Ok(())
}

/// Monthly grid dates, cut at the last pillar when extrapolation is off.
fn grid_dates(curve: &OisCurve, months: u32, step: u32) -> CliResult<Vec<(u32, Date)>> {
    if step == 0 {
        return Err(CliError::InvalidGrid("--step must be positive".to_string()));
    }

    let evaluation_date = curve.evaluation_date();
    let mut grid = Vec::new();
    for m in (step..=months).step_by(step as usize) {
        let date = evaluation_date
            .add_months(m as i32)
            .map_err(CurveError::from)?;
        if date > curve.max_date() && !curve.config().extrapolation.is_enabled() {
            break;
        }
        grid.push((m, date));
    }
    Ok(grid)
}

fn summary(curve: &OisCurve) -> Vec<KeyValue> {
    let conventions = curve.conventions();
    vec![
        KeyValue::new("Index", &conventions.index),
        KeyValue::new("Calendar", conventions.calendar().name()),
        KeyValue::new("Day Count", conventions.day_count),
        KeyValue::new("Evaluation Date", curve.evaluation_date()),
        KeyValue::new("Pillars", curve.pillars().len() - 1),
        KeyValue::new("Last Pillar", curve.max_date()),
        KeyValue::new("Extrapolation", curve.config().extrapolation),
        KeyValue::new("Sweeps", curve.sweeps()),
        KeyValue::new(
            "Short Rate (%)",
            curve
                .zero_rate(curve.evaluation_date())
                .map_or_else(|_| "n/a".to_string(), format_percent),
        ),
    ]
}
