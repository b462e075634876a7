//! Independent two-sample t-test used to compare verse categories.
//!
//! The p-value comes from the Student's t distribution in `statrs`.
//!
//! License: MIT OR Apache-2.0

use statrs::distribution::{ContinuousCDF, StudentsT};

use ayatscope_entropy::statistics::compute_stats;

/// Variance assumption for [`independent_t_test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTestKind {
    /// Pooled variance (Student). Matches `scipy.stats.ttest_ind` defaults.
    Student,
    /// Unequal variances with Welch-Satterthwaite degrees of freedom.
    Welch,
}

/// Outcome of a two-sided independent two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    pub kind: TTestKind,
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
}

/// Two-tailed p-value `P(|T| >= |t|)`, or `None` for invalid degrees of freedom.
pub fn two_tailed_p_value(t: f64, df: f64) -> Option<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

/// Runs a two-sided independent two-sample t-test on `a` and `b`.
///
/// Returns `None` when either sample has fewer than two values or the
/// standard error is zero, since the statistic is undefined there.
pub fn independent_t_test(a: &[f64], b: &[f64], kind: TTestKind) -> Option<TTestResult> {
    let sa = compute_stats(a)?;
    let sb = compute_stats(b)?;
    if sa.count < 2 || sb.count < 2 {
        return None;
    }

    let na = sa.count as f64;
    let nb = sb.count as f64;

    let (std_err, df) = match kind {
        TTestKind::Student => {
            let df = na + nb - 2.0;
            let pooled = ((na - 1.0) * sa.variance() + (nb - 1.0) * sb.variance()) / df;
            ((pooled * (1.0 / na + 1.0 / nb)).sqrt(), df)
        }
        TTestKind::Welch => {
            let va = sa.variance() / na;
            let vb = sb.variance() / nb;
            let denom = va * va / (na - 1.0) + vb * vb / (nb - 1.0);
            if denom == 0.0 {
                return None;
            }
            ((va + vb).sqrt(), (va + vb) * (va + vb) / denom)
        }
    };

    if std_err == 0.0 || !std_err.is_finite() {
        return None;
    }

    let t_statistic = (sa.mean - sb.mean) / std_err;
    Some(TTestResult {
        kind,
        t_statistic,
        degrees_of_freedom: df,
        p_value: two_tailed_p_value(t_statistic, df)?,
    })
}
