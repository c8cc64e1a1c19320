//! End-to-end screening pipeline test over a synthetic sector.
//!
//! Builds a small universe where one pair is genuinely cointegrated
//! (BBB = 2*AAA + stationary noise), runs the full pipeline from CSV
//! files to the summary artifact, and checks both testers agree.

use std::fs;
use std::io::Write;

use chrono::{Days, NaiveDate};

use cointscreen::data::{AlignedPriceMatrix, CsvPriceSource, PriceSeries, PriceSource};
use cointscreen::screener::{
    select_pairs, CointegrationTest, CorrelationMatrix, EngleGrangerTester, JohansenTester,
    Orchestrator, ScreenerConfig, SummaryTable,
};

/// Deterministic pseudo-random steps in [-0.5, 0.5].
fn steps(seed: u64, n: usize) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
        })
        .collect()
}

/// Three symbols: AAA a random walk, BBB = 2*AAA + noise, CCC an
/// unrelated drifting walk.
fn synthetic_universe(n: usize) -> Vec<(&'static str, Vec<f64>)> {
    let walk = steps(7, n);
    let other_walk = steps(21, n);
    let band = steps(99, n);
    let mut a = Vec::with_capacity(n);
    let mut b = Vec::with_capacity(n);
    let mut c = Vec::with_capacity(n);
    let mut level = 100.0;
    let mut other = 80.0;
    for i in 0..n {
        level += walk[i];
        other += other_walk[i] + 0.4;
        a.push(level);
        b.push(2.0 * level + 0.5 * band[i]);
        c.push(other);
    }
    vec![("AAA", a), ("BBB", b), ("CCC", c)]
}

fn to_matrix(universe: &[(&str, Vec<f64>)]) -> AlignedPriceMatrix {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    AlignedPriceMatrix::from_series(
        universe
            .iter()
            .map(|(symbol, prices)| {
                PriceSeries::from_observations(
                    symbol.to_string(),
                    prices
                        .iter()
                        .enumerate()
                        .map(|(i, p)| (base + Days::new(i as u64), *p))
                        .collect(),
                )
            })
            .collect(),
    )
}

#[test]
fn both_testers_confirm_a_constructed_pair() {
    let universe = synthetic_universe(250);
    let matrix = to_matrix(&universe);
    let (a, b) = matrix.pair_observations("AAA", "BBB").unwrap();

    let eg = EngleGrangerTester::new(2).test("AAA", &a, "BBB", &b).unwrap();
    assert!(eg.cointegrated, "Engle-Granger should confirm: {eg}");
    assert!((eg.weight - 2.0).abs() < 0.05, "E-G weight {}", eg.weight);

    let joh = JohansenTester::new(2).test("AAA", &a, "BBB", &b).unwrap();
    assert!(joh.cointegrated, "Johansen should confirm: {joh}");
    assert!((joh.weight - 2.0).abs() < 0.1, "Johansen weight {}", joh.weight);
    assert!(joh.intercept.is_none());
}

#[test]
fn pipeline_selects_and_confirms_only_the_real_pair() {
    let universe = synthetic_universe(250);
    let matrix = to_matrix(&universe);

    let correlation = CorrelationMatrix::build(&matrix);
    assert!(correlation.get("AAA", "BBB").unwrap() > 0.9);

    let candidates = select_pairs(&correlation, 0.9).unwrap();
    assert!(candidates
        .iter()
        .any(|p| p.symbol_a == "AAA" && p.symbol_b == "BBB"));

    let orchestrator = Orchestrator::new(ScreenerConfig::default()).unwrap();
    let results = orchestrator.test_pairs(&matrix, &candidates);

    assert_eq!(results.len(), 1, "only the constructed pair should pass");
    let result = &results[0];
    assert!(result.cointegrated);
    assert!((result.weight - 2.0).abs() < 0.05);
    assert!(result.intercept.is_some(), "accepted record is Engle-Granger");
    assert!(result.spread_mean.is_some());
    assert!(result.spread_stddev.is_some());
}

#[test]
fn pipeline_is_deterministic_end_to_end() {
    let universe = synthetic_universe(250);
    let matrix = to_matrix(&universe);
    let correlation = CorrelationMatrix::build(&matrix);
    let candidates = select_pairs(&correlation, 0.9).unwrap();
    let orchestrator = Orchestrator::new(ScreenerConfig::default()).unwrap();

    let first = orchestrator.test_pairs(&matrix, &candidates);
    let second = orchestrator.test_pairs(&matrix, &candidates);
    assert_eq!(first, second);
}

#[test]
fn csv_to_summary_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let sector_dir = dir.path().join("Synthetic");
    fs::create_dir_all(&sector_dir).unwrap();

    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for (symbol, prices) in synthetic_universe(250) {
        let mut file = fs::File::create(sector_dir.join(format!("{symbol}.csv"))).unwrap();
        writeln!(file, "Date,Close").unwrap();
        for (i, price) in prices.iter().enumerate() {
            let date = base + Days::new(i as u64);
            writeln!(file, "{},{}", date.format("%Y-%m-%d"), price).unwrap();
        }
    }

    let source = CsvPriceSource::new(dir.path(), "Synthetic", 12);
    let symbols = source.symbols().unwrap();
    assert_eq!(symbols, vec!["AAA", "BBB", "CCC"]);

    let series: Vec<PriceSeries> = symbols
        .iter()
        .map(|s| source.close_series(s).unwrap())
        .collect();
    let matrix = AlignedPriceMatrix::from_series(series);

    let correlation = CorrelationMatrix::build(&matrix);
    let candidates = select_pairs(&correlation, 0.9).unwrap();
    let orchestrator = Orchestrator::new(ScreenerConfig::default()).unwrap();
    let results = orchestrator.test_pairs(&matrix, &candidates);

    let table = SummaryTable::build(&results, true);
    let path = dir.path().join("summary.csv");
    table.write_csv(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next().unwrap(),
        "cointegrated,confidence,weight,intercept,asset_a,asset_b,spread_mean,spread_stddev"
    );
    let row = lines.next().expect("one accepted pair row");
    assert!(row.starts_with("true,"));
    assert!(row.contains("AAA") && row.contains("BBB"));
}
