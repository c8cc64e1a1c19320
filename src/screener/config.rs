//! Configuration for the screening pipeline.

use serde::{Deserialize, Serialize};

use super::error::ScreenerError;

/// Configuration for a screening run.
///
/// Passed into the orchestrator and testers at construction; the core
/// components carry no ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Minimum Pearson correlation for a pair to become a candidate.
    #[serde(default = "default_correlation_threshold")]
    pub correlation_threshold: f64,

    /// Historical lookback window in months.
    #[serde(default = "default_lookback_months")]
    pub lookback_months: u32,

    /// Decimal places for reported weights, intercepts and statistics.
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    /// Minimum overlapping observations required to test a pair.
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,
}

// Default value functions for serde
fn default_correlation_threshold() -> f64 {
    0.9
}
fn default_lookback_months() -> u32 {
    6
}
fn default_decimals() -> u32 {
    2
}
fn default_min_observations() -> usize {
    20
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: default_correlation_threshold(),
            lookback_months: default_lookback_months(),
            decimals: default_decimals(),
            min_observations: default_min_observations(),
        }
    }
}

impl ScreenerConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ScreenerError> {
        if !(-1.0..=1.0).contains(&self.correlation_threshold) {
            return Err(ScreenerError::Configuration(format!(
                "correlation_threshold must be within [-1.0, 1.0], got {}",
                self.correlation_threshold
            )));
        }
        if self.lookback_months == 0 {
            return Err(ScreenerError::Configuration(
                "lookback_months must be at least 1".to_string(),
            ));
        }
        if self.decimals > 8 {
            return Err(ScreenerError::Configuration(format!(
                "decimals must be at most 8, got {}",
                self.decimals
            )));
        }
        if self.min_observations < 15 {
            return Err(ScreenerError::Configuration(format!(
                "min_observations must be at least 15 for the unit-root test, got {}",
                self.min_observations
            )));
        }
        Ok(())
    }
}
