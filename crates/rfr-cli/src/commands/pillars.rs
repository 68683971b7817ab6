//! Pillars command implementation.
//!
//! Prints the solved pillars next to the repricing of their quotes.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rfr_core::Date;
use rfr_curves::repricing::RepricingReport;
use rfr_curves::{ConventionsRegistry, OisCurve};

use crate::cli::OutputFormat;
use crate::commands::{build_curve, CurveArgs};
use crate::output::{
    format_df, print_csv, print_error, print_header, print_json, print_success, print_table,
};

/// Arguments for the pillars command.
#[derive(Args, Debug)]
pub struct PillarsArgs {
    #[command(flatten)]
    pub curve: CurveArgs,
}

/// A pillar with the repricing of the quote that fixed it.
#[derive(Debug, Clone, Serialize)]
pub struct PillarRecord {
    /// Quote label; empty for the anchor.
    pub quote: String,
    /// Pillar date.
    pub date: Date,
    /// Curve time in years.
    pub time: f64,
    /// Solved discount factor.
    pub discount_factor: f64,
    /// Zero rate to the pillar in percent.
    pub zero_rate_pct: f64,
    /// Quoted par rate in percent.
    pub quoted_rate_pct: Option<f64>,
    /// Par rate implied by the curve in percent.
    pub model_rate_pct: Option<f64>,
    /// Absolute NPV of the quoted swap on the curve.
    pub npv_error: Option<f64>,
    /// Whether the quote reprices within tolerance.
    pub passed: Option<bool>,
}

#[derive(Tabled)]
struct PillarRow {
    #[tabled(rename = "Quote")]
    quote: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
    #[tabled(rename = "Zero Rate (%)")]
    zero_rate: String,
    #[tabled(rename = "Quoted (%)")]
    quoted: String,
    #[tabled(rename = "Model (%)")]
    model: String,
    #[tabled(rename = "|NPV|")]
    error: String,
}

impl From<&PillarRecord> for PillarRow {
    fn from(record: &PillarRecord) -> Self {
        let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
        Self {
            quote: if record.quote.is_empty() {
                "anchor".to_string()
            } else {
                record.quote.clone()
            },
            date: record.date.to_string(),
            discount_factor: format_df(record.discount_factor),
            zero_rate: format!("{:.4}", record.zero_rate_pct),
            quoted: or_dash(record.quoted_rate_pct.map(|r| format!("{r:.4}"))),
            model: or_dash(record.model_rate_pct.map(|r| format!("{r:.4}"))),
            error: or_dash(record.npv_error.map(|e| format!("{e:.2e}"))),
        }
    }
}

#[derive(Serialize)]
struct PillarsReport<'a> {
    index: &'a str,
    evaluation_date: Date,
    pillars: &'a [PillarRecord],
    max_error: f64,
    rms_error: f64,
    valid: bool,
}

/// Execute the pillars command.
pub fn execute(args: PillarsArgs, registry: &ConventionsRegistry, format: OutputFormat) -> Result<()> {
    let curve = build_curve(&args.curve, registry)?;
    let report = curve.repricing_report()?;
    let records = pillar_records(&curve, &report);

    match format {
        OutputFormat::Table => {
            print_header(&format!(
                "{} Pillars @ {}",
                curve.conventions().index,
                curve.evaluation_date()
            ));
            let rows: Vec<PillarRow> = records.iter().map(PillarRow::from).collect();
            print_table(&rows);
            println!();
            let summary = format!(
                "{}/{} quotes reprice within {:.0e} (max |NPV| {:.2e}, {} sweeps)",
                report.passed_count(),
                report.checks().len(),
                curve.config().repricing_tolerance,
                report.max_error(),
                curve.sweeps()
            );
            if report.is_valid() {
                print_success(&summary);
            } else {
                print_error(&summary);
            }
        }
        OutputFormat::Json => print_json(&PillarsReport {
            index: &curve.conventions().index,
            evaluation_date: curve.evaluation_date(),
            pillars: &records,
            max_error: report.max_error(),
            rms_error: report.rms_error(),
            valid: report.is_valid(),
        })?,
        OutputFormat::Csv => print_csv(&records)?,
    }

    Ok(())
}

fn pillar_records(curve: &OisCurve, report: &RepricingReport) -> Vec<PillarRecord> {
    curve
        .pillars()
        .iter()
        .map(|pillar| {
            let check = pillar
                .quote
                .as_deref()
                .and_then(|label| report.checks().iter().find(|c| c.quote == label));
            PillarRecord {
                quote: pillar.quote.clone().unwrap_or_default(),
                date: pillar.date,
                time: pillar.time,
                discount_factor: pillar.discount_factor,
                zero_rate_pct: pillar.zero_rate() * 100.0,
                quoted_rate_pct: check.map(|c| c.quoted_rate * 100.0),
                model_rate_pct: check.map(|c| c.model_rate * 100.0),
                npv_error: check.map(|c| c.error),
                passed: check.map(|c| c.passed),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rfr_curves::{Conventions, CurveBuilder, QuoteSet};

    #[test]
    fn test_records_align_with_pillars() {
        let curve = CurveBuilder::new(Date::from_ymd(2025, 1, 15).unwrap(), Arc::new(Conventions::sofr()))
            .quotes(QuoteSet::parse_list("1W=1,1M=1.5,3M=2,1Y=4,10Y=5").unwrap())
            .build()
            .unwrap();
        let report = curve.repricing_report().unwrap();

        let records = pillar_records(&curve, &report);

        assert_eq!(records.len(), 6);
        assert_eq!(records[0].quote, "");
        assert_eq!(records[0].passed, None);
        assert_eq!(records[4].quote, "1Y");
        assert_eq!(records[4].passed, Some(true));
        assert!((records[4].quoted_rate_pct.unwrap() - 4.0).abs() < 1e-12);
        assert!(records.iter().skip(1).all(|r| r.npv_error.unwrap() < 1e-10));
    }

    #[test]
    fn test_anchor_row() {
        let record = PillarRecord {
            quote: String::new(),
            date: Date::from_ymd(2025, 1, 15).unwrap(),
            time: 0.0,
            discount_factor: 1.0,
            zero_rate_pct: 0.0,
            quoted_rate_pct: None,
            model_rate_pct: None,
            npv_error: None,
            passed: None,
        };

        let row = PillarRow::from(&record);

        assert_eq!(row.quote, "anchor");
        assert_eq!(row.quoted, "-");
        assert_eq!(row.discount_factor, "1.0000000000");
    }
}
