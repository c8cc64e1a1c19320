//! Pairwise correlation over the aligned price matrix and selection of
//! highly correlated candidate pairs.

use tracing::debug;

use crate::data::AlignedPriceMatrix;

use super::error::ScreenerError;

/// Symmetric Pearson correlation matrix over all loaded symbols.
///
/// Each entry is computed over the dates where both symbols have a
/// value (pairwise-complete observations). Entries that cannot be
/// computed (fewer than two overlapping observations, non-finite
/// result) are absent rather than defaulted.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    symbols: Vec<String>,
    values: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    /// Compute all pairwise correlations. Symbols come out sorted, so
    /// the matrix is a pure function of the input data.
    pub fn build(matrix: &AlignedPriceMatrix) -> Self {
        let symbols: Vec<String> = matrix.symbols().iter().map(|s| s.to_string()).collect();
        let n = symbols.len();
        let mut values = vec![None; n * n];

        for i in 0..n {
            values[i * n + i] = Some(1.0);
            let col_i = matrix.column(&symbols[i]).unwrap_or(&[]);
            for j in (i + 1)..n {
                let col_j = matrix.column(&symbols[j]).unwrap_or(&[]);
                let corr = pairwise_correlation(col_i, col_j);
                values[i * n + j] = corr;
                values[j * n + i] = corr;
            }
        }

        Self { symbols, values }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Correlation between two symbols, if both exist and the entry is
    /// defined.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        self.values[i * self.symbols.len() + j]
    }

    fn get_by_index(&self, i: usize, j: usize) -> Option<f64> {
        self.values[i * self.symbols.len() + j]
    }
}

/// Pearson correlation over the positions where both columns have a
/// value. Returns `None` for fewer than two overlapping observations or
/// a non-finite result; exactly zero variance yields 0.0.
fn pairwise_correlation(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let paired: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if paired.len() < 2 {
        return None;
    }

    let n = paired.len() as f64;
    let mean_a = paired.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = paired.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &paired {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return Some(0.0);
    }

    let correlation = covariance / (var_a.sqrt() * var_b.sqrt());
    correlation.is_finite().then_some(correlation)
}

/// An unordered pair of distinct symbols whose correlation exceeded the
/// selection threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidatePair {
    pub symbol_a: String,
    pub symbol_b: String,
}

/// Select every unordered pair with correlation strictly above
/// `threshold`, exactly once each, independent of any scan order.
/// Self-pairs are excluded by construction.
pub fn select_pairs(
    matrix: &CorrelationMatrix,
    threshold: f64,
) -> Result<Vec<CandidatePair>, ScreenerError> {
    if !(-1.0..=1.0).contains(&threshold) {
        return Err(ScreenerError::Configuration(format!(
            "correlation threshold must be within [-1.0, 1.0], got {threshold}"
        )));
    }

    let symbols = matrix.symbols();
    let mut pairs = Vec::new();
    for i in 0..symbols.len() {
        for j in (i + 1)..symbols.len() {
            let Some(correlation) = matrix.get_by_index(i, j) else {
                continue;
            };
            if correlation > threshold {
                pairs.push(CandidatePair {
                    symbol_a: symbols[i].clone(),
                    symbol_b: symbols[j].clone(),
                });
            } else {
                debug!(
                    pair = format!("{}-{}", symbols[i], symbols[j]),
                    corr = correlation,
                    "Correlation below threshold"
                );
            }
        }
    }
    Ok(pairs)
}
