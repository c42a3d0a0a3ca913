//! Shared sample statistics and missing-value handling.
//!
//! Every primitive strips missing values through these helpers so the rules
//! are stated once: a lone observation has no sample variance, and a constant
//! sample has no correlation with anything.

/// Monthly data throughout; annualization factors derive from this.
pub const PERIODS_PER_YEAR: f64 = 12.0;

/// The non-missing values of a slice, in order.
pub fn present(values: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    values.iter().filter_map(|v| *v)
}

/// Pairwise-complete observations of two date-aligned slices.
///
/// An index contributes only when both slices have a value there; a gap on
/// either side removes the month from both. Slices must already be aligned to
/// the same date axis (the evaluator enforces this contract).
pub fn paired(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<(f64, f64)> {
    debug_assert_eq!(a.len(), b.len(), "paired slices must be date-aligned");
    a.iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (n−1 denominator); `None` below two points.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(sum_sq / (values.len() - 1) as f64)
}

pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Unbiased sample covariance of paired observations; `None` below two pairs.
pub fn sample_covariance(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
    let mean_x = mean(&xs)?;
    let mean_y = mean(&ys)?;
    let sum = pairs
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum::<f64>();
    Some(sum / (pairs.len() - 1) as f64)
}

/// Pearson correlation of paired observations.
///
/// `None` below two pairs or when either side has zero sample variance — a
/// constant series correlates with nothing, it does not divide by zero.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let covariance = sample_covariance(pairs)?;
    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
    let var_x = sample_variance(&xs)?;
    let var_y = sample_variance(&ys)?;
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(covariance / (var_x * var_y).sqrt())
}
