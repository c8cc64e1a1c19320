//! Chart rendering for accepted pairs.
//!
//! Renders both legs of an accepted pair to a PNG as a side effect of
//! screening. This is a best-effort collaborator: the caller logs a
//! failure and carries on, so a rendering problem never costs a result.
//! Charts are drawn without text so no native font stack is required.

use std::path::Path;

use plotters::prelude::*;

use crate::data::AlignedPriceMatrix;
use crate::screener::{CointData, ScreenerError};

const CHART_SIZE: (u32, u32) = (1024, 600);

/// Render the aligned close prices of both legs of `result` to
/// `out_path` (leg A red, leg B blue, date index on the x axis).
pub fn plot_pair(
    matrix: &AlignedPriceMatrix,
    result: &CointData,
    out_path: &Path,
) -> Result<(), ScreenerError> {
    let series_a = leg_points(matrix, &result.asset_a)?;
    let series_b = leg_points(matrix, &result.asset_b)?;
    if series_a.is_empty() && series_b.is_empty() {
        return Err(ScreenerError::Plot(format!(
            "no observations to plot for {}-{}",
            result.asset_a, result.asset_b
        )));
    }

    let (y_min, y_max) = value_range(series_a.iter().chain(series_b.iter()));
    let x_max = matrix.num_dates().max(1) as f64;

    let root = BitMapBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(series_a, &RED))
        .map_err(plot_error)?;
    chart
        .draw_series(LineSeries::new(series_b, &BLUE))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

fn leg_points(
    matrix: &AlignedPriceMatrix,
    symbol: &str,
) -> Result<Vec<(f64, f64)>, ScreenerError> {
    let column = matrix
        .column(symbol)
        .ok_or_else(|| ScreenerError::DataUnavailable {
            symbol: symbol.to_string(),
        })?;
    Ok(column
        .iter()
        .enumerate()
        .filter_map(|(i, value)| value.map(|v| (i as f64, v)))
        .collect())
}

fn value_range<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, v) in points {
        min = min.min(*v);
        max = max.max(*v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    // Pad so flat series still get a nonzero range.
    let pad = ((max - min) * 0.05).max(1e-6);
    (min - pad, max + pad)
}

fn plot_error(error: impl std::fmt::Display) -> ScreenerError {
    ScreenerError::Plot(error.to_string())
}
