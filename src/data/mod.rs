//! Price data loading and date alignment.
//!
//! A [`PriceSource`] hands out one close-price series per symbol; the
//! bundled [`CsvPriceSource`] reads the per-symbol CSV files a data
//! puller drops under `<data_dir>/<sector>/<SYMBOL>.csv`. Series are
//! outer-joined on date into an [`AlignedPriceMatrix`]; a date where a
//! symbol has no observation stays an explicit gap, never a zero.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Months, NaiveDate};
use tracing::{debug, warn};

use crate::screener::ScreenerError;

/// One symbol's ordered close-price history.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    /// (date, close) observations, strictly increasing by date.
    pub observations: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
    /// Build a series from unordered observations. Sorts by date and
    /// keeps the last value for a duplicated date.
    pub fn from_observations(symbol: String, mut observations: Vec<(NaiveDate, f64)>) -> Self {
        observations.sort_by_key(|(date, _)| *date);
        observations.dedup_by(|later, earlier| {
            if later.0 == earlier.0 {
                earlier.1 = later.1;
                true
            } else {
                false
            }
        });
        Self {
            symbol,
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Drop observations older than `months` before the last date.
    pub fn truncate_to_lookback(&mut self, months: u32) {
        let Some(&(last, _)) = self.observations.last() else {
            return;
        };
        let cutoff = last
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        self.observations.retain(|(date, _)| *date >= cutoff);
    }
}

/// A provider of per-symbol close-price series.
///
/// A symbol with no data must surface as [`ScreenerError::DataUnavailable`],
/// never as an empty or zero-filled series.
pub trait PriceSource {
    /// Symbols this source can serve, sorted.
    fn symbols(&self) -> Result<Vec<String>, ScreenerError>;

    /// The close-price series for one symbol, lookback already applied.
    fn close_series(&self, symbol: &str) -> Result<PriceSeries, ScreenerError>;
}

/// Reads `<data_dir>/<sector>/<SYMBOL>.csv` files with `Date` and
/// `Close` columns, as written by the historical data puller.
pub struct CsvPriceSource {
    sector_dir: PathBuf,
    lookback_months: u32,
}

impl CsvPriceSource {
    pub fn new(data_dir: impl AsRef<Path>, sector: &str, lookback_months: u32) -> Self {
        Self {
            sector_dir: data_dir.as_ref().join(sector),
            lookback_months,
        }
    }
}

impl PriceSource for CsvPriceSource {
    fn symbols(&self) -> Result<Vec<String>, ScreenerError> {
        let mut symbols = Vec::new();
        for entry in fs::read_dir(&self.sector_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    symbols.push(stem.to_string());
                }
            }
        }
        symbols.sort();
        Ok(symbols)
    }

    fn close_series(&self, symbol: &str) -> Result<PriceSeries, ScreenerError> {
        let path = self.sector_dir.join(format!("{symbol}.csv"));
        let contents = fs::read_to_string(&path).map_err(|_| ScreenerError::DataUnavailable {
            symbol: symbol.to_string(),
        })?;

        let mut lines = contents.lines();
        let header = lines.next().unwrap_or_default();
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        let date_idx = columns.iter().position(|c| *c == "Date");
        let close_idx = columns.iter().position(|c| *c == "Close");
        let (Some(date_idx), Some(close_idx)) = (date_idx, close_idx) else {
            return Err(ScreenerError::Configuration(format!(
                "{}: expected 'Date' and 'Close' columns, got '{header}'",
                path.display()
            )));
        };

        let mut observations = Vec::new();
        for line in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let (Some(date_raw), Some(close_raw)) =
                (fields.get(date_idx), fields.get(close_idx))
            else {
                continue;
            };
            // Gaps appear as empty cells; skip them rather than inventing zeros.
            if close_raw.is_empty() {
                continue;
            }
            let Ok(date) = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d") else {
                debug!(file = %path.display(), line, "Unparseable date, skipping row");
                continue;
            };
            let Ok(close) = close_raw.parse::<f64>() else {
                debug!(file = %path.display(), line, "Unparseable close, skipping row");
                continue;
            };
            if close.is_finite() {
                observations.push((date, close));
            }
        }

        if observations.is_empty() {
            warn!(symbol, file = %path.display(), "No usable observations");
            return Err(ScreenerError::DataUnavailable {
                symbol: symbol.to_string(),
            });
        }

        let mut series = PriceSeries::from_observations(symbol.to_string(), observations);
        series.truncate_to_lookback(self.lookback_months);
        Ok(series)
    }
}

/// Every loaded series outer-joined on date.
///
/// Shared read-only by everything downstream; built once per run and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AlignedPriceMatrix {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl AlignedPriceMatrix {
    /// Outer-join the series on date. Dates any series observed become
    /// the shared axis; symbols without a value on a date get `None`.
    pub fn from_series(series: Vec<PriceSeries>) -> Self {
        let mut date_set: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for s in &series {
            for (date, _) in &s.observations {
                date_set.entry(*date).or_insert(0);
            }
        }
        let dates: Vec<NaiveDate> = date_set.keys().copied().collect();
        for (i, date) in dates.iter().enumerate() {
            date_set.insert(*date, i);
        }

        let mut columns = BTreeMap::new();
        for s in series {
            let mut column = vec![None; dates.len()];
            for (date, close) in s.observations {
                column[date_set[&date]] = Some(close);
            }
            columns.insert(s.symbol, column);
        }

        Self { dates, columns }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Symbols in sorted order.
    pub fn symbols(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn column(&self, symbol: &str) -> Option<&[Option<f64>]> {
        self.columns.get(symbol).map(Vec::as_slice)
    }

    pub fn num_dates(&self) -> usize {
        self.dates.len()
    }

    /// Inner-join two symbols: the value pairs over dates where both
    /// have an observation.
    pub fn pair_observations(
        &self,
        symbol_a: &str,
        symbol_b: &str,
    ) -> Result<(Vec<f64>, Vec<f64>), ScreenerError> {
        let col_a = self
            .column(symbol_a)
            .ok_or_else(|| ScreenerError::DataUnavailable {
                symbol: symbol_a.to_string(),
            })?;
        let col_b = self
            .column(symbol_b)
            .ok_or_else(|| ScreenerError::DataUnavailable {
                symbol: symbol_b.to_string(),
            })?;

        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for (a, b) in col_a.iter().zip(col_b.iter()) {
            if let (Some(a), Some(b)) = (a, b) {
                xs.push(*a);
                ys.push(*b);
            }
        }
        Ok((xs, ys))
    }
}
