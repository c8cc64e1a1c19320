//! Ordinary least squares via SVD.
//!
//! The screener repeatedly solves small regression problems: the two
//! orientation regressions of the Engle-Granger test and the augmented
//! Dickey-Fuller regressions (a handful of columns, a few hundred rows).
//! We solve them with SVD so tall, nearly collinear design matrices are
//! handled robustly, and we recover coefficient standard errors from
//! `(X'X)^-1` for the unit-root t-statistic.

use nalgebra::{DMatrix, DVector};

/// A fitted least-squares regression.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Coefficients, ordered as the design matrix columns.
    pub params: DVector<f64>,
    /// Standard error of each coefficient.
    pub std_errors: DVector<f64>,
    /// Residuals, one per observation.
    pub residuals: DVector<f64>,
    /// Sum of squared residuals.
    pub ssr: f64,
    /// Number of observations.
    pub nobs: usize,
}

/// Simple regression of `y` on a constant and a single regressor.
#[derive(Debug, Clone)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
    pub residuals: Vec<f64>,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `y = X beta + e`, returning coefficients, residuals and standard
/// errors.
///
/// Returns `None` when the system is rank deficient (e.g. a constant
/// regressor alongside the intercept column) or has too few rows for the
/// error variance to be defined.
pub fn fit(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<OlsFit> {
    let n = x.nrows();
    let k = x.ncols();
    if n <= k || y.len() != n {
        return None;
    }

    let beta = solve_least_squares(x, y)?;
    let residuals = y - x * &beta;
    let ssr = residuals.dot(&residuals);
    let sigma2 = ssr / (n - k) as f64;

    // (X'X)^-1 fails for rank-deficient designs, which is exactly the
    // degenerate-input case the testers must reject.
    let xtx_inv = (x.transpose() * x).try_inverse()?;
    let std_errors = DVector::from_fn(k, |i, _| (xtx_inv[(i, i)] * sigma2).sqrt());
    if std_errors.iter().any(|se| !se.is_finite()) {
        return None;
    }

    Some(OlsFit {
        params: beta,
        std_errors,
        residuals,
        ssr,
        nobs: n,
    })
}

/// Regress `y` on a constant and `x`.
pub fn fit_line(y: &[f64], x: &[f64]) -> Option<LineFit> {
    if y.len() != x.len() || y.len() < 3 {
        return None;
    }
    let design = DMatrix::from_fn(y.len(), 2, |r, c| if c == 0 { 1.0 } else { x[r] });
    let yv = DVector::from_column_slice(y);
    let fitted = fit(&design, &yv)?;
    Some(LineFit {
        intercept: fitted.params[0],
        slope: fitted.params[1],
        residuals: fitted.residuals.iter().copied().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn fit_line_recovers_slope_and_intercept() {
        let x: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 4.0 + 1.5 * v).collect();

        let fit = fit_line(&y, &x).unwrap();
        assert!((fit.intercept - 4.0).abs() < 1e-8);
        assert!((fit.slope - 1.5).abs() < 1e-10);
        assert!(fit.residuals.iter().all(|r| r.abs() < 1e-8));
    }

    #[test]
    fn fit_rejects_constant_regressor() {
        // Intercept plus a constant column is rank deficient.
        let design = DMatrix::from_fn(20, 2, |_, c| if c == 0 { 1.0 } else { 7.0 });
        let y = DVector::from_fn(20, |i, _| i as f64);
        assert!(fit(&design, &y).is_none());
    }

    #[test]
    fn fit_standard_errors_shrink_with_noiseless_data() {
        let x: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 1.0 + 2.0 * v).collect();
        let design = DMatrix::from_fn(30, 2, |r, c| if c == 0 { 1.0 } else { x[r] });
        let yv = DVector::from_column_slice(&y);

        let fit = fit(&design, &yv).unwrap();
        assert!(fit.ssr < 1e-12);
        assert!(fit.std_errors[1] < 1e-6);
    }
}
