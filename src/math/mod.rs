//! Numerical primitives for the screening pipeline.
//!
//! This module provides the regression and unit-root machinery the
//! cointegration testers are built on: ordinary least squares with
//! standard errors, the augmented Dickey-Fuller test, and the Johansen
//! trace test for a two-asset system.

pub mod adf;
pub mod johansen;
pub mod ols;

/// Round `value` to `decimals` decimal places.
///
/// All reported statistics (hedge ratios, intercepts, test statistics)
/// go through this helper so re-running a test on identical input yields
/// bit-identical output.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(1.005_001, 2), 1.01);
        assert_eq!(round_to(-2.861, 2), -2.86);
        assert_eq!(round_to(2.0, 2), 2.0);
    }

    #[test]
    fn round_is_idempotent() {
        let rounded = round_to(3.14159, 2);
        assert_eq!(round_to(rounded, 2), rounded);
    }
}
