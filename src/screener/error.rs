//! Error types for the screening pipeline.

use thiserror::Error;

/// Errors that can occur while screening pairs for cointegration.
///
/// Per-pair failures are caught at the orchestrator boundary and exclude
/// that pair from the results; they never abort a whole screening run.
#[derive(Error, Debug)]
pub enum ScreenerError {
    /// A required symbol has no aligned price data for the window.
    #[error("no price data available for symbol {symbol}")]
    DataUnavailable { symbol: String },

    /// Not enough overlapping observations to run the tests.
    #[error("insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Singular or degenerate regression/eigen-decomposition input.
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// Malformed critical-value labels or invalid thresholds.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// I/O error (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart rendering failure; never fatal to the screening run.
    #[error("chart rendering failed: {0}")]
    Plot(String),
}
