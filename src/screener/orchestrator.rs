//! Runs both cointegration tests per candidate pair and aggregates the
//! accepted results.

use tracing::{debug, info, warn};

use crate::data::AlignedPriceMatrix;

use super::coint::{CointData, CointegrationTest};
use super::config::ScreenerConfig;
use super::correlation::CandidatePair;
use super::engle_granger::EngleGrangerTester;
use super::error::ScreenerError;
use super::johansen::JohansenTester;

/// Drives the two testers over the candidate pairs.
///
/// A pair is accepted only when Engle-Granger and Johansen both report
/// cointegration; the Engle-Granger record (the one carrying an
/// intercept) is what gets kept. Each pair's evaluation is independent:
/// a failure excludes that pair and never aborts the run.
pub struct Orchestrator {
    config: ScreenerConfig,
    engle_granger: EngleGrangerTester,
    johansen: JohansenTester,
}

impl Orchestrator {
    pub fn new(config: ScreenerConfig) -> Result<Self, ScreenerError> {
        config.validate()?;
        let engle_granger = EngleGrangerTester::new(config.decimals);
        let johansen = JohansenTester::new(config.decimals);
        Ok(Self {
            config,
            engle_granger,
            johansen,
        })
    }

    /// Test every candidate pair, returning the accepted records in the
    /// candidate order, spread statistics attached.
    pub fn test_pairs(
        &self,
        matrix: &AlignedPriceMatrix,
        pairs: &[CandidatePair],
    ) -> Vec<CointData> {
        info!(candidates = pairs.len(), "Testing candidate pairs");
        let mut accepted = Vec::new();

        for pair in pairs {
            match self.test_pair(matrix, pair) {
                Ok(Some(result)) => {
                    info!(
                        pair = format!("{}-{}", pair.symbol_a, pair.symbol_b),
                        confidence = result.confidence,
                        weight = result.weight,
                        "Pair confirmed by both tests"
                    );
                    accepted.push(result);
                }
                Ok(None) => {
                    debug!(
                        pair = format!("{}-{}", pair.symbol_a, pair.symbol_b),
                        "Not confirmed by both tests"
                    );
                }
                Err(error) => {
                    warn!(
                        pair = format!("{}-{}", pair.symbol_a, pair.symbol_b),
                        %error,
                        "Pair evaluation failed, skipping"
                    );
                }
            }
        }

        self.annotate_spreads(matrix, &mut accepted);
        info!(accepted = accepted.len(), "Pair testing complete");
        accepted
    }

    /// Evaluate one pair with both testers. `Ok(None)` means the pair
    /// was tested but not confirmed by both.
    fn test_pair(
        &self,
        matrix: &AlignedPriceMatrix,
        pair: &CandidatePair,
    ) -> Result<Option<CointData>, ScreenerError> {
        let (a, b) = matrix.pair_observations(&pair.symbol_a, &pair.symbol_b)?;
        if a.len() < self.config.min_observations {
            return Err(ScreenerError::InsufficientData {
                expected: self.config.min_observations,
                actual: a.len(),
            });
        }

        let eg = self
            .engle_granger
            .test(&pair.symbol_a, &a, &pair.symbol_b, &b)?;
        let joh = self.johansen.test(&pair.symbol_a, &a, &pair.symbol_b, &b)?;

        debug!(
            pair = format!("{}-{}", pair.symbol_a, pair.symbol_b),
            eg = %eg,
            johansen = %joh,
            "Both tests evaluated"
        );

        if eg.cointegrated && joh.cointegrated {
            Ok(Some(eg))
        } else {
            Ok(None)
        }
    }

    /// Attach spread mean and population standard deviation to each
    /// accepted record, over the dates where both legs have a value.
    fn annotate_spreads(&self, matrix: &AlignedPriceMatrix, results: &mut [CointData]) {
        for result in results {
            match matrix.pair_observations(&result.asset_a, &result.asset_b) {
                Ok((a, b)) if !a.is_empty() => {
                    let spread: Vec<f64> = a
                        .iter()
                        .zip(b.iter())
                        .map(|(x, y)| x - result.weight * y)
                        .collect();
                    let n = spread.len() as f64;
                    let mean = spread.iter().sum::<f64>() / n;
                    let variance = spread.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
                    result.set_spread_stats(mean, variance.sqrt());
                }
                Ok(_) => {
                    warn!(
                        pair = format!("{}-{}", result.asset_a, result.asset_b),
                        "No overlapping observations for spread statistics"
                    );
                }
                Err(error) => {
                    warn!(
                        pair = format!("{}-{}", result.asset_a, result.asset_b),
                        %error,
                        "Could not compute spread statistics"
                    );
                }
            }
        }
    }
}
