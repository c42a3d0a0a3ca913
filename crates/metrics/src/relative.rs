//! Two-series metrics: how a fund moves relative to its benchmark.
//!
//! All functions take date-aligned slices and pair observations
//! pairwise-complete: a month is usable only when both series have a value.

use crate::support::{self, PERIODS_PER_YEAR};

/// Annualized sample standard deviation of the active returns
/// (fund minus benchmark, pairwise-complete).
///
/// Undefined with one usable pair or fewer.
pub fn tracking_error(fund: &[Option<f64>], benchmark: &[Option<f64>]) -> Option<f64> {
    let active: Vec<f64> = support::paired(fund, benchmark)
        .into_iter()
        .map(|(f, b)| f - b)
        .collect();
    support::sample_std(&active).map(|std| std * PERIODS_PER_YEAR.sqrt())
}

/// Sensitivity of the fund to benchmark moves: cov(fund, benchmark) over
/// var(benchmark), both sample (n−1) statistics.
///
/// Undefined with one usable pair or fewer, or when the benchmark slice has
/// zero variance.
pub fn beta(fund: &[Option<f64>], benchmark: &[Option<f64>]) -> Option<f64> {
    let pairs = support::paired(fund, benchmark);
    let covariance = support::sample_covariance(&pairs)?;
    let bench: Vec<f64> = pairs.iter().map(|(_, b)| *b).collect();
    let bench_variance = support::sample_variance(&bench)?;
    if bench_variance == 0.0 {
        return None;
    }
    Some(covariance / bench_variance)
}

/// Share of the fund's variance explained by the benchmark: squared Pearson
/// correlation, in [0, 1] whenever defined.
pub fn r_squared(fund: &[Option<f64>], benchmark: &[Option<f64>]) -> Option<f64> {
    correlation(fund, benchmark).map(|corr| corr * corr)
}

/// Pearson correlation over the pairwise-complete observations.
pub fn correlation(fund: &[Option<f64>], benchmark: &[Option<f64>]) -> Option<f64> {
    let pairs = support::paired(fund, benchmark);
    support::pearson(&pairs)
}

/// Pearson correlation restricted to months where the benchmark return is
/// strictly positive.
pub fn up_correlation(fund: &[Option<f64>], benchmark: &[Option<f64>]) -> Option<f64> {
    regime_correlation(fund, benchmark, |b| b > 0.0)
}

/// Pearson correlation restricted to months where the benchmark return is
/// strictly negative.
pub fn down_correlation(fund: &[Option<f64>], benchmark: &[Option<f64>]) -> Option<f64> {
    regime_correlation(fund, benchmark, |b| b < 0.0)
}

fn regime_correlation(
    fund: &[Option<f64>],
    benchmark: &[Option<f64>],
    regime: impl Fn(f64) -> bool,
) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = support::paired(fund, benchmark)
        .into_iter()
        .filter(|(_, b)| regime(*b))
        .collect();
    support::pearson(&pairs)
}
