//! Johansen trace-statistic cointegration tester.

use crate::math::{johansen, round_to};

use super::classify::classify;
use super::coint::{CointData, CointegrationTest};
use super::error::ScreenerError;

/// Labels for the trace critical values, matching the test's output
/// column order (90%, 95%, 99% levels).
const TRACE_LABELS: [&str; 3] = ["10%", "5%", "1%"];

/// Eigenvector-based trace tester.
#[derive(Debug, Clone)]
pub struct JohansenTester {
    decimals: u32,
}

impl JohansenTester {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl CointegrationTest for JohansenTester {
    fn name(&self) -> &'static str {
        "johansen"
    }

    fn test(
        &self,
        symbol_a: &str,
        a: &[f64],
        symbol_b: &str,
        b: &[f64],
    ) -> Result<CointData, ScreenerError> {
        let result = johansen::trace_test(a, b).ok_or_else(|| {
            ScreenerError::NumericalInstability(format!(
                "singular eigen-decomposition for {symbol_a}/{symbol_b}"
            ))
        })?;

        let [v0, v1] = result.eigenvector;
        if v1.abs() < 1e-12 {
            return Err(ScreenerError::NumericalInstability(format!(
                "unbounded hedge ratio for {symbol_a}/{symbol_b}"
            )));
        }
        let weight = round_to((v0 / v1).abs(), self.decimals);

        let critical_values: Vec<(String, f64)> = TRACE_LABELS
            .iter()
            .zip(result.critical_values)
            .map(|(label, value)| (label.to_string(), value))
            .collect();
        let (cointegrated, interval) = classify(result.statistic, &critical_values)?;

        // Johansen does not reorient: the input order is reported, and
        // there is no intercept in the relation.
        Ok(CointData::new(
            cointegrated,
            interval,
            weight,
            symbol_a.to_string(),
            symbol_b.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn cointegrated_pair(n: usize) -> (Vec<f64>, Vec<f64>) {
        let walk = steps(7, n);
        let noise = steps(99, n);
        let mut a = Vec::with_capacity(n);
        let mut b = Vec::with_capacity(n);
        let mut level = 100.0;
        for i in 0..n {
            level += walk[i];
            a.push(level);
            b.push(2.0 * level + 0.5 * noise[i]);
        }
        (a, b)
    }

    #[test]
    fn detects_cointegration_without_reorienting() {
        let (a, b) = cointegrated_pair(250);
        let tester = JohansenTester::new(2);
        let result = tester.test("AAA", &a, "BBB", &b).unwrap();

        assert!(result.cointegrated);
        assert_eq!(result.asset_a, "AAA");
        assert_eq!(result.asset_b, "BBB");
        assert!(result.intercept.is_none());
        assert!((result.weight - 2.0).abs() < 0.1, "weight {}", result.weight);
    }

    #[test]
    fn constant_input_is_numerically_unstable() {
        let a = vec![10.0; 100];
        let b: Vec<f64> = steps(3, 100).iter().map(|s| 50.0 + s).collect();
        let tester = JohansenTester::new(2);
        assert!(matches!(
            tester.test("AAA", &a, "BBB", &b),
            Err(ScreenerError::NumericalInstability(_))
        ));
    }

    #[test]
    fn rerun_is_bit_identical() {
        let (a, b) = cointegrated_pair(200);
        let tester = JohansenTester::new(2);
        let first = tester.test("AAA", &a, "BBB", &b).unwrap();
        let second = tester.test("AAA", &a, "BBB", &b).unwrap();
        assert_eq!(first, second);
    }
}
