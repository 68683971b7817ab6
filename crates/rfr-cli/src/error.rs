//! CLI error types.

use thiserror::Error;

use rfr_curves::CurveError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Neither `--quotes` nor `--quotes-file` yielded any quote.
    #[error("No quotes given. Use --quotes \"1M=1.5,1Y=4\" or --quotes-file.")]
    NoQuotes,

    /// Malformed quotes file.
    #[error("Invalid quotes file {path}: {reason}")]
    QuotesFile {
        /// File path.
        path: String,
        /// Description of the problem.
        reason: String,
    },

    /// Invalid grid arguments.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Curve construction or query failure.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
