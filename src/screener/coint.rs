//! The cointegration test result entity and the tester interface.

use std::fmt;

use serde::Serialize;

use super::error::ScreenerError;

/// Result of one cointegration test on one pair.
///
/// `asset_a ≈ intercept + weight * asset_b` is the stationary relation;
/// the orientation of `asset_a`/`asset_b` is chosen by the tester, not
/// by caller order. Spread statistics are attached later by the
/// orchestrator for accepted pairs only; nothing else mutates a record
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CointData {
    pub cointegrated: bool,
    /// Confidence in percent: 0, 90, 95 or 99. Zero iff not cointegrated.
    pub confidence: u8,
    /// Hedge ratio in the stationary relation, rounded.
    pub weight: f64,
    /// Regression intercept; present for Engle-Granger, absent for Johansen.
    pub intercept: Option<f64>,
    pub asset_a: String,
    pub asset_b: String,
    /// Mean of `asset_a - weight * asset_b`, attached post-hoc.
    pub spread_mean: Option<f64>,
    /// Population standard deviation of the spread, attached post-hoc.
    pub spread_stddev: Option<f64>,
}

impl CointData {
    /// Build a record from a classifier interval (1, 5 or 10 percent
    /// significance, 0 for none), mapping it to the confidence level.
    pub fn new(
        cointegrated: bool,
        interval: u8,
        weight: f64,
        asset_a: String,
        asset_b: String,
    ) -> Self {
        let confidence = if cointegrated { 100 - interval } else { 0 };
        Self {
            cointegrated,
            confidence,
            weight,
            intercept: None,
            asset_a,
            asset_b,
            spread_mean: None,
            spread_stddev: None,
        }
    }

    pub fn with_intercept(mut self, intercept: f64) -> Self {
        self.intercept = Some(intercept);
        self
    }

    /// Attach spread statistics. Called once, by the annotator.
    pub fn set_spread_stats(&mut self, mean: f64, stddev: f64) {
        self.spread_mean = Some(mean);
        self.spread_stddev = Some(stddev);
    }
}

impl fmt::Display for CointData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.intercept {
            Some(intercept) => write!(
                f,
                "cointegrated: {}, confidence: {}, weight: {}, intercept: {} ({}, {})",
                self.cointegrated,
                self.confidence,
                self.weight,
                intercept,
                self.asset_a,
                self.asset_b
            ),
            None => write!(
                f,
                "cointegrated: {}, confidence: {}, weight: {} ({}, {})",
                self.cointegrated, self.confidence, self.weight, self.asset_a, self.asset_b
            ),
        }
    }
}

/// A pairwise cointegration test: two aligned price slices in, one
/// [`CointData`] out. Implemented by the Engle-Granger and Johansen
/// testers.
pub trait CointegrationTest {
    fn name(&self) -> &'static str;

    /// Test the pair for cointegration. `a` and `b` are the inner-joined
    /// close prices for `symbol_a` and `symbol_b`, equal length.
    fn test(
        &self,
        symbol_a: &str,
        a: &[f64],
        symbol_b: &str,
        b: &[f64],
    ) -> Result<CointData, ScreenerError>;
}
