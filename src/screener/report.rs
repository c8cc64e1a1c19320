//! Tabular artifacts: the cointegration summary table and the CSV
//! snapshots of close prices and correlations.
//!
//! CSV files are written line by line; a missing value is an empty
//! cell, never a zero. Snapshot writes truncate any prior file for the
//! same scope.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data::AlignedPriceMatrix;

use super::coint::CointData;
use super::correlation::CorrelationMatrix;
use super::error::ScreenerError;

/// Column set of the summary table, in output order.
pub const SUMMARY_COLUMNS: [&str; 8] = [
    "cointegrated",
    "confidence",
    "weight",
    "intercept",
    "asset_a",
    "asset_b",
    "spread_mean",
    "spread_stddev",
];

/// One row per accepted [`CointData`], optionally sorted by spread
/// standard deviation descending. An empty result set still yields a
/// table with the full column set.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    rows: Vec<CointData>,
}

impl SummaryTable {
    pub fn build(results: &[CointData], sort_by_stddev_descending: bool) -> Self {
        let mut rows = results.to_vec();
        if sort_by_stddev_descending {
            // Missing spread_stddev sorts last; ties keep input order.
            rows.sort_by(|a, b| match (a.spread_stddev, b.spread_stddev) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
        Self { rows }
    }

    pub fn columns() -> &'static [&'static str] {
        &SUMMARY_COLUMNS
    }

    pub fn rows(&self) -> &[CointData] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as CSV, header always included.
    pub fn to_csv_string(&self) -> String {
        let mut out = SUMMARY_COLUMNS.join(",");
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                row.cointegrated,
                row.confidence,
                row.weight,
                optional_cell(row.intercept),
                row.asset_a,
                row.asset_b,
                optional_cell(row.spread_mean),
                optional_cell(row.spread_stddev),
            ));
        }
        out
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), ScreenerError> {
        let mut file = File::create(path)?;
        file.write_all(self.to_csv_string().as_bytes())?;
        Ok(())
    }
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write the symbol-by-symbol correlation snapshot, overwriting any
/// prior snapshot at `path`.
pub fn write_correlation_csv(
    matrix: &CorrelationMatrix,
    path: impl AsRef<Path>,
) -> Result<(), ScreenerError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let symbols = matrix.symbols();

    write!(writer, "symbol")?;
    for symbol in symbols {
        write!(writer, ",{symbol}")?;
    }
    writeln!(writer)?;

    for row in symbols {
        write!(writer, "{row}")?;
        for col in symbols {
            match matrix.get(row, col) {
                Some(value) => write!(writer, ",{value}")?,
                None => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the aligned close-price table, one row per date, empty cells
/// for gaps. Overwrites any prior snapshot at `path`.
pub fn write_close_prices_csv(
    matrix: &AlignedPriceMatrix,
    path: impl AsRef<Path>,
) -> Result<(), ScreenerError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let symbols = matrix.symbols();

    write!(writer, "Date")?;
    for symbol in &symbols {
        write!(writer, ",{symbol}")?;
    }
    writeln!(writer)?;

    for (i, date) in matrix.dates().iter().enumerate() {
        write!(writer, "{}", date.format("%Y-%m-%d"))?;
        for symbol in &symbols {
            match matrix.column(symbol).and_then(|col| col[i]) {
                Some(value) => write!(writer, ",{value}")?,
                None => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(asset_a: &str, stddev: Option<f64>) -> CointData {
        let mut data = CointData::new(true, 5, 1.5, asset_a.to_string(), "X".to_string())
            .with_intercept(0.5);
        if let Some(sd) = stddev {
            data.set_spread_stats(1.0, sd);
        }
        data
    }

    #[test]
    fn empty_input_yields_table_with_full_column_set() {
        let table = SummaryTable::build(&[], true);
        assert!(table.is_empty());
        assert_eq!(SummaryTable::columns().len(), 8);
        let csv = table.to_csv_string();
        assert_eq!(
            csv,
            "cointegrated,confidence,weight,intercept,asset_a,asset_b,spread_mean,spread_stddev\n"
        );
    }

    #[test]
    fn unsorted_build_preserves_input_order() {
        let rows = [record("A", Some(1.0)), record("B", Some(3.0))];
        let table = SummaryTable::build(&rows, false);
        assert_eq!(table.rows()[0].asset_a, "A");
        assert_eq!(table.rows()[1].asset_a, "B");
    }

    #[test]
    fn sort_is_descending_with_missing_last() {
        let rows = [
            record("LOW", Some(0.5)),
            record("NONE", None),
            record("HIGH", Some(2.5)),
        ];
        let table = SummaryTable::build(&rows, true);
        let order: Vec<&str> = table.rows().iter().map(|r| r.asset_a.as_str()).collect();
        assert_eq!(order, vec!["HIGH", "LOW", "NONE"]);
    }

    #[test]
    fn missing_values_are_empty_cells() {
        let mut row = CointData::new(true, 1, 2.0, "A".to_string(), "B".to_string());
        row.intercept = None;
        let table = SummaryTable::build(&[row], false);
        let csv = table.to_csv_string();
        let line = csv.lines().nth(1).unwrap();
        assert_eq!(line, "true,99,2,,A,B,,");
    }

    #[test]
    fn summary_csv_round_trips_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let table = SummaryTable::build(&[record("A", Some(1.0))], false);
        table.write_csv(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("cointegrated,"));
        assert_eq!(written.lines().count(), 2);

        // A second write fully replaces the first.
        SummaryTable::build(&[], false).write_csv(&path).unwrap();
        let replaced = std::fs::read_to_string(&path).unwrap();
        assert_eq!(replaced.lines().count(), 1);
    }
}
