//! The tagged set of supported metrics and the dispatch from a kind to its
//! primitive. Keeping this a closed enum (rather than string-keyed lookup)
//! means a forgotten metric is a compile error, not a silent `None`.

use crate::absolute::{
    RiskFree, annualized_return, max_drawdown, omega_ratio, sharpe_ratio, volatility, worst_month,
};
use crate::relative::{
    beta, correlation, down_correlation, r_squared, tracking_error, up_correlation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every metric the engine can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    AnnualizedReturn,
    Volatility,
    MaxDrawdown,
    WorstMonth,
    SharpeRatio,
    OmegaRatio,
    TrackingError,
    Beta,
    RSquared,
    Correlation,
    UpCorrelation,
    DownCorrelation,
}

impl MetricKind {
    pub const ALL: [MetricKind; 12] = [
        MetricKind::AnnualizedReturn,
        MetricKind::Volatility,
        MetricKind::MaxDrawdown,
        MetricKind::WorstMonth,
        MetricKind::SharpeRatio,
        MetricKind::OmegaRatio,
        MetricKind::TrackingError,
        MetricKind::Beta,
        MetricKind::RSquared,
        MetricKind::Correlation,
        MetricKind::UpCorrelation,
        MetricKind::DownCorrelation,
    ];

    /// Whether this metric compares the fund against a benchmark series.
    pub fn requires_benchmark(self) -> bool {
        matches!(
            self,
            MetricKind::TrackingError
                | MetricKind::Beta
                | MetricKind::RSquared
                | MetricKind::Correlation
                | MetricKind::UpCorrelation
                | MetricKind::DownCorrelation
        )
    }

    /// Stable snake_case key, used for configuration and output file names.
    pub fn key(self) -> &'static str {
        match self {
            MetricKind::AnnualizedReturn => "annualized_return",
            MetricKind::Volatility => "volatility",
            MetricKind::MaxDrawdown => "max_drawdown",
            MetricKind::WorstMonth => "worst_month",
            MetricKind::SharpeRatio => "sharpe_ratio",
            MetricKind::OmegaRatio => "omega_ratio",
            MetricKind::TrackingError => "tracking_error",
            MetricKind::Beta => "beta",
            MetricKind::RSquared => "r_squared",
            MetricKind::Correlation => "correlation",
            MetricKind::UpCorrelation => "up_correlation",
            MetricKind::DownCorrelation => "down_correlation",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-request parameters shared by all metric evaluations.
#[derive(Debug, Clone, Copy)]
pub struct MetricContext<'a> {
    /// Risk-free input for the Sharpe ratio, already resolved to the window.
    pub risk_free: RiskFree<'a>,
    /// Monthly threshold for the Omega ratio.
    pub omega_threshold: f64,
}

impl Default for MetricContext<'_> {
    fn default() -> Self {
        Self {
            risk_free: RiskFree::Constant(0.0),
            omega_threshold: 0.0,
        }
    }
}

/// Evaluates one metric over a window slice.
///
/// `benchmark` must be `Some` (and date-aligned with `fund`) for metrics where
/// [`MetricKind::requires_benchmark`] holds; a missing benchmark yields `None`
/// here, while the evaluator treats it as a caller error upfront.
pub fn compute(
    kind: MetricKind,
    fund: &[Option<f64>],
    benchmark: Option<&[Option<f64>]>,
    context: &MetricContext<'_>,
) -> Option<f64> {
    match kind {
        MetricKind::AnnualizedReturn => annualized_return(fund),
        MetricKind::Volatility => volatility(fund),
        MetricKind::MaxDrawdown => max_drawdown(fund),
        MetricKind::WorstMonth => worst_month(fund),
        MetricKind::SharpeRatio => sharpe_ratio(fund, context.risk_free),
        MetricKind::OmegaRatio => omega_ratio(fund, context.omega_threshold),
        MetricKind::TrackingError => tracking_error(fund, benchmark?),
        MetricKind::Beta => beta(fund, benchmark?),
        MetricKind::RSquared => r_squared(fund, benchmark?),
        MetricKind::Correlation => correlation(fund, benchmark?),
        MetricKind::UpCorrelation => up_correlation(fund, benchmark?),
        MetricKind::DownCorrelation => down_correlation(fund, benchmark?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absolute;
    use approx::assert_relative_eq;

    #[test]
    fn dispatch_matches_the_primitive() {
        let fund = vec![Some(0.01), Some(0.03), Some(-0.02)];
        let context = MetricContext::default();
        assert_relative_eq!(
            compute(MetricKind::Volatility, &fund, None, &context).unwrap(),
            absolute::volatility(&fund).unwrap(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn relative_metric_without_benchmark_is_undefined() {
        let fund = vec![Some(0.01), Some(0.03)];
        let context = MetricContext::default();
        assert_eq!(compute(MetricKind::Beta, &fund, None, &context), None);
    }

    #[test]
    fn benchmark_requirement_splits_the_enum() {
        let relative: Vec<MetricKind> = MetricKind::ALL
            .into_iter()
            .filter(|kind| kind.requires_benchmark())
            .collect();
        assert_eq!(relative.len(), 6);
        assert!(!MetricKind::OmegaRatio.requires_benchmark());
    }

    #[test]
    fn keys_agree_with_serde_names() {
        // Configuration files name metrics by the serde identifier; key()
        // must produce the same spelling.
        for kind in MetricKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.key()));
        }
    }
}
