//! RFR CLI - Build and query OIS discount curves from par quotes.
//!
//! # Usage
//!
//! ```bash
//! # Monthly discount factors and zero rates over 30 years
//! rfr build --index SOFR --date 2025-01-15 \
//!     --quotes "1W=1,1M=1.5,3M=2,6M=3,1Y=4,2Y=4.5,3Y=4.6,5Y=4.7,10Y=5"
//!
//! # Query specific dates
//! rfr query --date 2025-01-15 --quotes "1M=1.5,1Y=4,10Y=5" --at 2030-01-15,2040-01-15
//!
//! # Solved pillars and the repricing check
//! rfr pillars --date 2025-01-15 --quotes-file quotes.csv --format json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let registry = commands::load_registry(cli.conventions.as_deref())?;

    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &registry, cli.format)?,
        Commands::Query(args) => commands::query::execute(args, &registry, cli.format)?,
        Commands::Pillars(args) => commands::pillars::execute(args, &registry, cli.format)?,
    }

    Ok(())
}

/// Installs the stderr subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,rfr_curves=info",
        2 => "info,rfr_curves=debug",
        _ => "debug,rfr_curves=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
