//! Screening command handler.
//!
//! Loads a sector's close prices, writes the snapshot artifacts, runs
//! correlation-based pair selection and the dual cointegration tests,
//! and writes the summary table (plus optional per-pair charts).

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::data::{AlignedPriceMatrix, CsvPriceSource, PriceSource};
use crate::plot;
use crate::screener::{
    report, select_pairs, CorrelationMatrix, Orchestrator, ScreenerConfig, SummaryTable,
};

/// Run the screening pipeline.
///
/// # Errors
/// Returns an error for invalid configuration or an unreadable data
/// directory; individual symbol or pair failures are logged and skipped.
#[allow(clippy::too_many_arguments)]
pub fn run_screen(
    data_dir: &str,
    sector: &str,
    min_correlation: f64,
    lookback_months: u32,
    min_observations: usize,
    output_dir: &str,
    sort_by_stddev: bool,
    plot_pairs: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScreenerConfig {
        correlation_threshold: min_correlation,
        lookback_months,
        min_observations,
        ..Default::default()
    };
    config.validate()?;

    info!(
        sector,
        min_correlation,
        lookback_months,
        sort_by_stddev,
        plot = plot_pairs,
        "Screening sector for cointegrated pairs"
    );

    let source = CsvPriceSource::new(data_dir, sector, config.lookback_months);
    let symbols = source.symbols()?;
    info!(symbols = symbols.len(), "Loading close-price series");

    let mut series = Vec::with_capacity(symbols.len());
    for symbol in &symbols {
        match source.close_series(symbol) {
            Ok(s) => series.push(s),
            Err(error) => warn!(symbol, %error, "Skipping symbol"),
        }
    }
    let matrix = AlignedPriceMatrix::from_series(series);
    info!(
        symbols = matrix.symbols().len(),
        dates = matrix.num_dates(),
        "Aligned price matrix built"
    );

    let out = Path::new(output_dir);
    fs::create_dir_all(out)?;

    report::write_close_prices_csv(&matrix, out.join(format!("{sector}_close_prices.csv")))?;

    let correlation = CorrelationMatrix::build(&matrix);
    report::write_correlation_csv(&correlation, out.join(format!("{sector}_correlation.csv")))?;

    let candidates = select_pairs(&correlation, config.correlation_threshold)?;
    info!(candidates = candidates.len(), "Candidate pairs selected");

    let orchestrator = Orchestrator::new(config)?;
    let results = orchestrator.test_pairs(&matrix, &candidates);
    for result in &results {
        info!("{result}");
    }

    let table = SummaryTable::build(&results, sort_by_stddev);
    let summary_path = out.join(format!("{sector}_cointegration.csv"));
    table.write_csv(&summary_path)?;
    info!(
        accepted = results.len(),
        summary = %summary_path.display(),
        "Summary written"
    );

    if plot_pairs {
        let charts_dir = out.join("charts");
        fs::create_dir_all(&charts_dir)?;
        for result in &results {
            let chart_path =
                charts_dir.join(format!("{}_{}.png", result.asset_a, result.asset_b));
            // Chart failures never cost a screening result.
            if let Err(error) = plot::plot_pair(&matrix, result, &chart_path) {
                warn!(
                    pair = format!("{}-{}", result.asset_a, result.asset_b),
                    %error,
                    "Chart rendering failed, continuing"
                );
            }
        }
    }

    Ok(())
}
