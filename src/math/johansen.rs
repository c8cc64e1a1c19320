//! Johansen trace test for a two-asset system.
//!
//! Eigenvector-based cointegration test: the levels are demeaned, the
//! first differences and lagged levels are residualized against one
//! lagged difference (VECM with `k_ar_diff = 1`, no deterministic
//! trend), and the canonical correlations between the two residual sets
//! give the eigenvalues. The trace statistic for the rank-0 null is
//! `-T · Σ ln(1 - λ_i)`; the eigenvector of the largest eigenvalue is
//! the cointegrating relation from which the hedge ratio is read.
//!
//! The generalized eigenproblem `Σ v = λ S_kk v` is symmetrized through
//! the Cholesky factor of `S_kk` so it can be solved with a symmetric
//! eigendecomposition; the eigenvectors are mapped back through the same
//! factor.

use nalgebra::{Cholesky, DMatrix, SymmetricEigen};

/// Osterwald-Lenum critical values for the trace statistic, rank-0 null,
/// two variables, constant term only. Columns are the 90%, 95% and 99%
/// levels, matching the test output order.
pub const TRACE_CRIT_RANK0: [f64; 3] = [13.4294, 15.4943, 19.9349];

/// Outcome of the rank-0 trace test on a two-column system.
#[derive(Debug, Clone)]
pub struct TraceTest {
    /// Trace statistic for the null of no cointegration.
    pub statistic: f64,
    /// Critical values at the 90%, 95% and 99% levels.
    pub critical_values: [f64; 3],
    /// Cointegrating eigenvector for the largest eigenvalue.
    pub eigenvector: [f64; 2],
    /// Both eigenvalues, descending.
    pub eigenvalues: [f64; 2],
}

/// Run the Johansen trace test on two aligned level series.
///
/// Returns `None` for degenerate input: mismatched or too-short series,
/// or a singular moment matrix (collinear or constant columns), where
/// the eigenproblem has no stable solution.
pub fn trace_test(a: &[f64], b: &[f64]) -> Option<TraceTest> {
    let n = a.len();
    if n != b.len() || n < 12 {
        return None;
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    let levels = demean_columns(DMatrix::from_fn(n, 2, |r, c| if c == 0 { a[r] } else { b[r] }));

    // First differences; one lagged difference is the short-run regressor.
    let dx = DMatrix::from_fn(n - 1, 2, |r, c| levels[(r + 1, c)] - levels[(r, c)]);
    let t = n - 2;
    let dxk = demean_columns(dx.rows(1, t).into_owned());
    let z = demean_columns(dx.rows(0, t).into_owned());
    let lx = demean_columns(levels.rows(1, t).into_owned());

    let r0 = residualize(&dxk, &z)?;
    let r1 = residualize(&lx, &z)?;

    let tf = t as f64;
    let s00 = (r0.transpose() * &r0) / tf;
    let sk0 = (r1.transpose() * &r0) / tf;
    let skk = (r1.transpose() * &r1) / tf;

    let s00_inv = s00.try_inverse()?;
    let sig = &sk0 * s00_inv * sk0.transpose();

    // Symmetrize S_kk^-1 Σ through the Cholesky factor of S_kk.
    let chol = Cholesky::new(skk)?;
    let l_inv = chol.l().try_inverse()?;
    let m = &l_inv * sig * l_inv.transpose();
    let m = (&m + m.transpose()) * 0.5;

    let eig = SymmetricEigen::new(m);
    let (hi, lo) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };
    let eigenvalues = [eig.eigenvalues[hi], eig.eigenvalues[lo]];

    let mut log_sum = 0.0;
    for lam in eigenvalues {
        let lam = lam.max(0.0);
        // An eigenvalue at 1 means an exact linear dependence between the
        // columns; the hedge ratio is undefined there.
        if lam >= 1.0 - 1e-12 {
            return None;
        }
        log_sum += (1.0 - lam).ln();
    }
    let statistic = -tf * log_sum;
    if !statistic.is_finite() {
        return None;
    }

    let v = l_inv.transpose() * eig.eigenvectors.column(hi);
    if v.iter().any(|x| !x.is_finite()) {
        return None;
    }

    Some(TraceTest {
        statistic,
        critical_values: TRACE_CRIT_RANK0,
        eigenvector: [v[0], v[1]],
        eigenvalues,
    })
}

/// Subtract each column's mean.
fn demean_columns(mut m: DMatrix<f64>) -> DMatrix<f64> {
    let rows = m.nrows() as f64;
    for mut col in m.column_iter_mut() {
        let mean = col.iter().sum::<f64>() / rows;
        for v in col.iter_mut() {
            *v -= mean;
        }
    }
    m
}

/// OLS residuals of every column of `y` on the columns of `x`.
fn residualize(y: &DMatrix<f64>, x: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    let svd = x.clone().svd(true, true);
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(y - x * beta);
            }
        }
    }
    None
}
