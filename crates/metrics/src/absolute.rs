//! Single-series metrics: return, volatility, drawdown and risk-adjusted
//! ratios computed from one fund's monthly returns.

use crate::support::{self, PERIODS_PER_YEAR};

/// Finite stand-in for an Omega ratio with zero realized losses.
///
/// The true ratio is unbounded; a fixed large constant keeps downstream
/// rankings total-ordered. The magnitude is a convention carried over from the
/// original ranking system, not an economic quantity.
pub const ZERO_LOSS_OMEGA: f64 = 1000.0;

/// Risk-free input for [`sharpe_ratio`], resolved by the caller before the
/// primitive is invoked.
///
/// `Constant` is an annual rate; `Series` is monthly, date-aligned with the
/// return slice.
#[derive(Debug, Clone, Copy)]
pub enum RiskFree<'a> {
    Constant(f64),
    Series(&'a [Option<f64>]),
}

/// Geometrically compounded return, annualized over the non-missing sample.
///
/// Compounds `(1 + r)` over the `n` present observations and annualizes as
/// `growth^(12/n) − 1`. Undefined for an empty sample, and for a path that
/// wipes out capital (total growth ≤ 0 has no real-valued annualization).
pub fn annualized_return(returns: &[Option<f64>]) -> Option<f64> {
    let mut growth = 1.0;
    let mut count = 0usize;
    for value in support::present(returns) {
        growth *= 1.0 + value;
        count += 1;
    }
    if count == 0 || growth <= 0.0 {
        return None;
    }
    Some(growth.powf(PERIODS_PER_YEAR / count as f64) - 1.0)
}

/// Annualized sample standard deviation of the non-missing returns.
///
/// Undefined below two observations.
pub fn volatility(returns: &[Option<f64>]) -> Option<f64> {
    let values: Vec<f64> = support::present(returns).collect();
    support::sample_std(&values).map(|std| std * PERIODS_PER_YEAR.sqrt())
}

/// Largest peak-to-trough decline of the compounded return path, in [0, 1].
///
/// Missing months are treated as a 0% return for path continuity only — the
/// level holds flat through a gap. This is the single place a missing value is
/// substituted rather than excluded. Undefined when every month is missing.
pub fn max_drawdown(returns: &[Option<f64>]) -> Option<f64> {
    if returns.iter().all(Option::is_none) {
        return None;
    }

    let mut level = 1.0;
    let mut peak = 1.0f64;
    let mut worst = 0.0f64;
    for value in returns {
        level *= 1.0 + value.unwrap_or(0.0);
        peak = peak.max(level);
        worst = worst.max(1.0 - level / peak);
    }
    Some(worst)
}

/// The minimum non-missing monthly return; undefined iff all are missing.
pub fn worst_month(returns: &[Option<f64>]) -> Option<f64> {
    support::present(returns).reduce(f64::min)
}

/// Annualized excess return per unit of annualized volatility.
///
/// With a monthly risk-free *series*, excess returns are formed pointwise
/// (months missing on either side drop out) and both the numerator and the
/// volatility are computed from the excess series. With a constant *annual*
/// rate, the rate is subtracted from the annualized return and volatility is
/// taken from the raw returns. Undefined when volatility is zero or undefined.
pub fn sharpe_ratio(returns: &[Option<f64>], risk_free: RiskFree<'_>) -> Option<f64> {
    let (excess_return, vol) = match risk_free {
        RiskFree::Series(rates) => {
            debug_assert_eq!(returns.len(), rates.len(), "risk-free series must be aligned");
            let excess: Vec<Option<f64>> = returns
                .iter()
                .zip(rates)
                .map(|(r, rf)| Some((*r)? - (*rf)?))
                .collect();
            (annualized_return(&excess)?, volatility(&excess)?)
        }
        RiskFree::Constant(rate) => (annualized_return(returns)? - rate, volatility(returns)?),
    };

    if vol == 0.0 {
        return None;
    }
    Some(excess_return / vol)
}

/// Probability-weighted gains over losses relative to a monthly threshold.
///
/// `Σ max(r − θ, 0) / Σ max(θ − r, 0)` over the non-missing sample. Zero
/// realized losses yield [`ZERO_LOSS_OMEGA`] rather than an infinity, so the
/// value still sorts. Undefined for an empty sample.
pub fn omega_ratio(returns: &[Option<f64>], threshold: f64) -> Option<f64> {
    let mut gains = 0.0;
    let mut losses = 0.0;
    let mut count = 0usize;
    for value in support::present(returns) {
        gains += (value - threshold).max(0.0);
        losses += (threshold - value).max(0.0);
        count += 1;
    }

    if count == 0 {
        return None;
    }
    if losses == 0.0 {
        return Some(ZERO_LOSS_OMEGA);
    }
    Some(gains / losses)
}
