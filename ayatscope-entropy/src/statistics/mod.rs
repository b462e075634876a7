// ayatscope-entropy/src/statistics/mod.rs
//! Descriptive statistics over entropy samples.

use libm::sqrt;

/// Summary statistics for a set of entropy values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyStats {
    /// Number of sampled values.
    pub count: usize,
    /// The arithmetic mean of the sampled entropy values.
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator); 0.0 for a single value.
    pub std_dev: f64,
}

impl EntropyStats {
    /// Sample variance (N-1 denominator).
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculates mean and sample standard deviation for a slice of values.
///
/// Returns `None` for an empty slice so callers never see a NaN mean.
pub fn compute_stats(values: &[f64]) -> Option<EntropyStats> {
    let mean = mean(values)?;
    let count = values.len();

    if count < 2 {
        return Some(EntropyStats { count, mean, std_dev: 0.0 });
    }

    let variance = values
        .iter()
        .map(|value| {
            let diff = mean - value;
            diff * diff
        })
        .sum::<f64>()
        / (count - 1) as f64;

    Some(EntropyStats {
        count,
        mean,
        std_dev: sqrt(variance),
    })
}

/// Pearson correlation coefficient.
///
/// Only pairs where both values are finite are used. Returns `None` if fewer
/// than 3 such pairs remain or either series is constant.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let mut n = 0usize;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        if xi.is_finite() && yi.is_finite() {
            n += 1;
            sum_x += xi;
            sum_y += yi;
        }
    }

    if n < 3 {
        return None;
    }

    let mx = sum_x / n as f64;
    let my = sum_y / n as f64;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        if xi.is_finite() && yi.is_finite() {
            let dx = xi - mx;
            let dy = yi - my;
            sum_xy += dx * dy;
            sum_xx += dx * dx;
            sum_yy += dy * dy;
        }
    }

    let denom = sqrt(sum_xx * sum_yy);
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}
