//! Augmented Dickey-Fuller unit-root test.
//!
//! Tests the null hypothesis that a series has a unit root (is
//! non-stationary) against the alternative of mean reversion. The
//! Engle-Granger tester runs this on regression residuals: a stationary
//! residual series is the evidence of cointegration.
//!
//! The regression includes a constant and `p` lagged differences:
//!
//! ```text
//! Δy[t] = c + γ·y[t-1] + φ_1·Δy[t-1] + ... + φ_p·Δy[t-p] + ε
//! ```
//!
//! The lag order is chosen by minimizing AIC over 0..=maxlag (Schwert's
//! rule of thumb) on a common sample, then the test is re-run with the
//! chosen lag on the full available sample. The t-statistic of γ is the
//! test statistic; critical values come from the MacKinnon (2010)
//! response-surface approximation for the constant-only regression.

use nalgebra::{DMatrix, DVector};

use super::ols;

/// Outcome of an augmented Dickey-Fuller test.
#[derive(Debug, Clone)]
pub struct AdfResult {
    /// t-statistic of the lagged-level coefficient. More negative means
    /// stronger evidence of stationarity.
    pub statistic: f64,
    /// Number of lagged-difference terms selected by AIC.
    pub used_lag: usize,
    /// Effective observations in the final regression.
    pub nobs: usize,
    /// Critical values labeled by significance level ("1%", "5%", "10%").
    pub critical_values: Vec<(String, f64)>,
}

/// MacKinnon (2010) response-surface coefficients for the tau statistic,
/// single series, regression with constant. Critical value at sample
/// size T is `b0 + b1/T + b2/T^2 + b3/T^3`.
const TAU_C: [(&str, [f64; 4]); 3] = [
    ("1%", [-3.430_35, -6.5393, -16.786, -79.433]),
    ("5%", [-2.861_54, -2.8903, -4.234, -40.040]),
    ("10%", [-2.566_77, -1.5384, -2.809, 0.0]),
];

/// Run the augmented Dickey-Fuller test with AIC lag selection.
///
/// Returns `None` for degenerate input: series too short, constant, or
/// producing a rank-deficient regression.
pub fn adf_test(series: &[f64]) -> Option<AdfResult> {
    let n = series.len();
    if n < 15 || series.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    let nd = diffs.len();

    // Schwert rule of thumb, capped so the selection regressions keep
    // enough degrees of freedom.
    let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
    let maxlag = schwert.min(nd.saturating_sub(5) / 2);

    // Lag selection over a common sample (first `maxlag` rows trimmed for
    // every candidate so AICs are comparable).
    let mut best: Option<(f64, usize)> = None;
    for lag in 0..=maxlag {
        let (_, aic, _) = adf_regression(series, &diffs, maxlag, lag)?;
        if best.map_or(true, |(best_aic, _)| aic < best_aic) {
            best = Some((aic, lag));
        }
    }
    let (_, used_lag) = best?;

    // Final regression with the chosen lag on the full available sample.
    let (statistic, _, nobs) = adf_regression(series, &diffs, used_lag, used_lag)?;

    Some(AdfResult {
        statistic,
        used_lag,
        nobs,
        critical_values: critical_values(nobs),
    })
}

/// MacKinnon critical values at effective sample size `nobs`.
pub fn critical_values(nobs: usize) -> Vec<(String, f64)> {
    let t = nobs as f64;
    TAU_C
        .iter()
        .map(|(label, b)| {
            let cv = b[0] + b[1] / t + b[2] / (t * t) + b[3] / (t * t * t);
            (label.to_string(), cv)
        })
        .collect()
}

/// One ADF regression: response `Δy[t]` for `t` in `trim..`, design
/// `[1, y[t-1], Δy[t-1..t-lag]]`. Returns `(t_statistic, aic, nobs)`.
fn adf_regression(
    series: &[f64],
    diffs: &[f64],
    trim: usize,
    lag: usize,
) -> Option<(f64, f64, usize)> {
    let nd = diffs.len();
    let k = 2 + lag;
    if trim < lag || nd <= trim || nd - trim <= k {
        return None;
    }
    let rows = nd - trim;

    let mut x = DMatrix::zeros(rows, k);
    let mut y = DVector::zeros(rows);
    for (r, t) in (trim..nd).enumerate() {
        y[r] = diffs[t];
        x[(r, 0)] = 1.0;
        // diffs[t] = series[t+1] - series[t], so the lagged level is series[t]
        x[(r, 1)] = series[t];
        for i in 1..=lag {
            x[(r, 1 + i)] = diffs[t - i];
        }
    }

    let fit = ols::fit(&x, &y)?;
    let se = fit.std_errors[1];
    if !(se.is_finite() && se > 0.0) {
        return None;
    }
    let t_statistic = fit.params[1] / se;
    if !t_statistic.is_finite() {
        return None;
    }

    // Gaussian log-likelihood AIC with constant terms dropped; only
    // differences across lag orders matter.
    let nf = rows as f64;
    let aic = nf * (fit.ssr / nf).ln() + 2.0 * k as f64;

    Some((t_statistic, aic, rows))
}
