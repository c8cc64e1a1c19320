//! CLI argument parsing using clap.

use clap::{Parser, Subcommand};

/// CointScreen - Cointegration Pair Screener
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set the verbosity level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub verbose: String,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Screen a sector's price history for cointegrated pairs
    Screen {
        /// Directory holding per-sector price data
        #[arg(long, default_value = "data")]
        data_dir: String,
        /// Sector subdirectory to screen (e.g. "Information Technology")
        #[arg(long)]
        sector: String,
        /// Minimum Pearson correlation for a candidate pair
        #[arg(long, default_value_t = 0.9)]
        min_correlation: f64,
        /// Historical lookback window in months
        #[arg(long, default_value_t = 6)]
        lookback_months: u32,
        /// Minimum overlapping observations required per pair
        #[arg(long, default_value_t = 20)]
        min_observations: usize,
        /// Output directory for result artifacts
        #[arg(long, default_value = "screen_results")]
        output_dir: String,
        /// Sort the summary by spread standard deviation, descending
        #[arg(long, default_value_t = false)]
        sort_by_stddev: bool,
        /// Render a price chart for each accepted pair
        #[arg(long, default_value_t = false)]
        plot: bool,
    },
}
