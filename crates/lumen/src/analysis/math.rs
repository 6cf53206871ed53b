//! Numeric helpers shared by the analysis components.
//!
//! Every degenerate case (empty input, zero variance, zero denominator)
//! resolves to a neutral 0 rather than NaN.

use crate::model::{FlaggedValues, Quartiles};

/// Arithmetic mean, 0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Sorted copy of the input.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Median of a sorted slice using the even/odd midpoint rule.
pub fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 0 {
        sorted[n / 2 - 1] / 2.0 + sorted[n / 2] / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Nearest-rank value at `sorted[floor(n * p)]`, without interpolation.
pub fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
    sorted[index]
}

/// Nearest-rank quartiles of a sorted slice.
pub fn quartiles_of_sorted(sorted: &[f64]) -> Quartiles {
    Quartiles {
        q1: nearest_rank(sorted, 0.25),
        q2: nearest_rank(sorted, 0.5),
        q3: nearest_rank(sorted, 0.75),
    }
}

/// Flag values outside `[q1 - m·IQR, q3 + m·IQR]`.
///
/// Flagged values keep their input order and positions.
pub fn iqr_fence(values: &[f64], multiplier: f64) -> FlaggedValues {
    let quartiles = quartiles_of_sorted(&sorted(values));
    let (lower_fence, upper_fence) = quartiles.fences(multiplier);

    let (indices, values): (Vec<usize>, Vec<f64>) = values
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, v)| v < lower_fence || v > upper_fence)
        .unzip();

    FlaggedValues {
        values,
        indices,
        lower_fence,
        upper_fence,
    }
}

/// Pearson product-moment correlation on mean-centred values.
///
/// Returns 0 when either variable has no spread or the slices are too short
/// or differ in length. The result is clamped to [-1, 1].
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 || n != y.len() {
        return 0.0;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return 0.0;
    }

    let r = sxy / (sxx * syy).sqrt();
    if r.is_finite() { r.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Approximate two-tailed p-value for a correlation coefficient.
///
/// Uses `t = r·√((n-2)/(1-r²))` with `n - 2` degrees of freedom and maps the
/// t statistic onto a standard normal before taking the tail area. This is
/// an approximation; it is close for moderate `n` and conservative enough for
/// ranking, but it is not an exact t-distribution CDF.
///
/// `None` when fewer than three pairs are available.
pub fn correlation_p_value(r: f64, n: usize) -> Option<f64> {
    if n < 3 {
        return None;
    }
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return Some(0.0);
    }
    let df = (n - 2) as f64;
    let t = r * (df / denom).sqrt();
    Some(t_two_tailed_p(t, df))
}

/// Two-tailed tail area of Student's t via a normal approximation.
fn t_two_tailed_p(t: f64, df: f64) -> f64 {
    let t = t.abs();
    let z = t * (1.0 - 1.0 / (4.0 * df)) / (1.0 + t * t / (2.0 * df)).sqrt();
    (2.0 * (1.0 - normal_cdf(z))).clamp(0.0, 1.0)
}

/// Standard normal CDF.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Error function, Abramowitz & Stegun 7.1.26 (|error| < 1.5e-7).
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Euclidean distance between two points.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
