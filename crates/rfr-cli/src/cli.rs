//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{BuildArgs, PillarsArgs, QueryArgs};

/// RFR - OIS discount curve bootstrapping CLI
#[derive(Parser)]
#[command(name = "rfr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// JSON file of index conventions, merged over the built-in SOFR/SONIA/TONA/ESTR set
    #[arg(long, global = true, env = "RFR_CONVENTIONS")]
    pub conventions: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap a curve and print discount factors and zero rates on a monthly grid
    Build(BuildArgs),

    /// Bootstrap a curve and query it at specific dates
    Query(QueryArgs),

    /// Bootstrap a curve and print its pillars with the repricing check
    Pillars(PillarsArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
