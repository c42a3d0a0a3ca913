use core_types::{DEFAULT_WINDOWS, FundId, ReturnSeries, RiskFreeRate, Window};
use metrics::MetricKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One evaluation batch: the fund universe with pre-resolved benchmarks, the
/// windows and metrics to evaluate, and optional risk-free input.
///
/// Benchmark resolution (peer group → index) happens outside the engine; the
/// `benchmarks` map is keyed by fund and already holds each fund's assigned
/// benchmark series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub funds: BTreeMap<FundId, ReturnSeries>,
    pub benchmarks: BTreeMap<FundId, ReturnSeries>,
    #[serde(default = "default_windows")]
    pub windows: Vec<Window>,
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricKind>,
    #[serde(default)]
    pub risk_free: Option<RiskFreeRate>,
    /// Monthly threshold for the Omega ratio.
    #[serde(default)]
    pub omega_threshold: f64,
}

impl EvaluationRequest {
    /// A request over the default windows and the full metric set.
    pub fn new(
        funds: BTreeMap<FundId, ReturnSeries>,
        benchmarks: BTreeMap<FundId, ReturnSeries>,
    ) -> Self {
        Self {
            funds,
            benchmarks,
            windows: default_windows(),
            metrics: default_metrics(),
            risk_free: None,
            omega_threshold: 0.0,
        }
    }
}

fn default_windows() -> Vec<Window> {
    DEFAULT_WINDOWS.to_vec()
}

fn default_metrics() -> Vec<MetricKind> {
    MetricKind::ALL.to_vec()
}
