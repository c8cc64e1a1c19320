use clap::Parser;
use tracing_subscriber::EnvFilter;

use cointscreen::cli::{Cli, Commands};
use cointscreen::commands::screen;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.verbose).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match &cli.command {
        Commands::Screen {
            data_dir,
            sector,
            min_correlation,
            lookback_months,
            min_observations,
            output_dir,
            sort_by_stddev,
            plot,
        } => {
            screen::run_screen(
                data_dir,
                sector,
                *min_correlation,
                *lookback_months,
                *min_observations,
                output_dir,
                *sort_by_stddev,
                *plot,
            )?;
        }
    }

    Ok(())
}
