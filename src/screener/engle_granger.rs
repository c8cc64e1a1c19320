//! Engle-Granger two-step cointegration test.
//!
//! Regresses each asset on the other, keeps the orientation with the
//! larger slope, and runs an augmented Dickey-Fuller test on the chosen
//! residual series. A stationary residual means the linear combination
//! is mean-reverting, i.e. the pair is cointegrated.

use crate::math::{adf, ols, round_to};

use super::classify::classify;
use super::coint::{CointData, CointegrationTest};
use super::error::ScreenerError;

/// Regression-residual unit-root tester.
#[derive(Debug, Clone)]
pub struct EngleGrangerTester {
    decimals: u32,
}

impl EngleGrangerTester {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl CointegrationTest for EngleGrangerTester {
    fn name(&self) -> &'static str {
        "engle-granger"
    }

    fn test(
        &self,
        symbol_a: &str,
        a: &[f64],
        symbol_b: &str,
        b: &[f64],
    ) -> Result<CointData, ScreenerError> {
        let fit_ab = ols::fit_line(a, b).ok_or_else(|| {
            ScreenerError::NumericalInstability(format!(
                "degenerate regression of {symbol_a} on {symbol_b}"
            ))
        })?;
        let fit_ba = ols::fit_line(b, a).ok_or_else(|| {
            ScreenerError::NumericalInstability(format!(
                "degenerate regression of {symbol_b} on {symbol_a}"
            ))
        })?;

        // Keep the orientation with the larger slope; it determines the
        // reported residuals, intercept and asset roles.
        let (fit, asset_a, asset_b) = if fit_ab.slope < fit_ba.slope {
            (fit_ba, symbol_b, symbol_a)
        } else {
            (fit_ab, symbol_a, symbol_b)
        };

        let adf_result = adf::adf_test(&fit.residuals).ok_or_else(|| {
            ScreenerError::NumericalInstability(format!(
                "unit-root test failed on {asset_a}/{asset_b} residuals"
            ))
        })?;

        let statistic = round_to(adf_result.statistic, self.decimals);
        let (cointegrated, interval) = classify(statistic, &adf_result.critical_values)?;

        Ok(CointData::new(
            cointegrated,
            interval,
            round_to(fit.slope, self.decimals),
            asset_a.to_string(),
            asset_b.to_string(),
        )
        .with_intercept(round_to(fit.intercept, self.decimals)))
    }
}
