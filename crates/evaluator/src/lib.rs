//! # Fundlens Rolling Window Evaluator
//!
//! Drives the metric primitives across a universe of monthly return series:
//! for every fund, every configured window length and every date with a full
//! trailing window, it slices the history and invokes the metric, assembling
//! the results into columnar per-(metric, window) tables.
//!
//! ## Architectural Principles
//!
//! - **Pure batch compute:** All inputs arrive in memory; loading, caching and
//!   benchmark resolution belong to the caller. Evaluation is deterministic
//!   and retry-free.
//! - **Funds are independent units:** Each fund is evaluated with no shared
//!   mutable state, so the batch parallelizes across funds with rayon and one
//!   fund's bad data can only ever produce undefined cells in its own column.
//! - **Caller contract up front:** Misaligned benchmark or risk-free series
//!   are configuration errors, rejected before any computation starts —
//!   never silently re-aligned.

pub mod error;
pub mod request;
pub mod table;

// Re-export the key components to create a clean, public-facing API.
pub use error::EvaluatorError;
pub use request::EvaluationRequest;
pub use table::{EvaluationOutput, MetricTable};

use chrono::NaiveDate;
use core_types::{FundId, ReturnSeries, RiskFreeRate, Window};
use itertools::iproduct;
use metrics::{MetricContext, MetricKind, RiskFree};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Per-fund results, keyed by (metric, window), then by evaluation date.
type FundResults = BTreeMap<(MetricKind, Window), BTreeMap<NaiveDate, Option<f64>>>;

/// A stateless engine that evaluates metric batches over rolling windows.
#[derive(Debug, Default)]
pub struct Evaluator {}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates the request into one table per requested (metric, window).
    ///
    /// # Errors
    ///
    /// Returns an error when a fund needing a relative metric has no resolved
    /// benchmark, or when a benchmark/risk-free series is not on the fund's
    /// date axis. Insufficient or degenerate data never errors; it surfaces
    /// as undefined cells.
    pub fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationOutput, EvaluatorError> {
        self.validate(request)?;

        let per_fund: Vec<(FundId, FundResults)> = request
            .funds
            .par_iter()
            .map(|(id, series)| {
                let results = evaluate_fund(series, request.benchmarks.get(id), request);
                debug!(fund = %id, months = series.len(), "evaluated fund");
                (id.clone(), results)
            })
            .collect();

        let output = assemble(&per_fund, request);
        info!(
            funds = request.funds.len(),
            tables = output.len(),
            "evaluation batch complete"
        );
        Ok(output)
    }

    /// Rejects caller contract violations before any unit of work runs.
    fn validate(&self, request: &EvaluationRequest) -> Result<(), EvaluatorError> {
        let needs_benchmark = request.metrics.iter().any(|m| m.requires_benchmark());
        let sharpe_requested = request.metrics.contains(&MetricKind::SharpeRatio);
        let risk_free_series = match &request.risk_free {
            Some(RiskFreeRate::Series(series)) => Some(series),
            _ => None,
        };

        for (id, series) in &request.funds {
            if needs_benchmark {
                let benchmark = request
                    .benchmarks
                    .get(id)
                    .ok_or_else(|| EvaluatorError::MissingBenchmark { fund: id.clone() })?;
                if !series.same_axis_as(benchmark) {
                    return Err(EvaluatorError::ShapeMismatch {
                        fund: id.clone(),
                        series: "benchmark",
                    });
                }
            }
            if sharpe_requested {
                if let Some(rates) = risk_free_series {
                    if !series.same_axis_as(rates) {
                        return Err(EvaluatorError::ShapeMismatch {
                            fund: id.clone(),
                            series: "risk-free",
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Evaluates every (metric, window, date) cell for one fund.
///
/// Validation has already guaranteed axis alignment, so benchmark and
/// risk-free slices use the same indices as the fund slice.
fn evaluate_fund(
    series: &ReturnSeries,
    benchmark: Option<&ReturnSeries>,
    request: &EvaluationRequest,
) -> FundResults {
    let mut results = FundResults::new();
    let (constant_rate, rate_series) = match &request.risk_free {
        Some(RiskFreeRate::Constant(rate)) => (*rate, None),
        Some(RiskFreeRate::Series(rates)) => (0.0, Some(rates)),
        None => (0.0, None),
    };

    for &window in &request.windows {
        let months = window.months() as usize;
        // Ensure a (metric, window) entry exists even when the history is too
        // short for a single full window.
        for &metric in &request.metrics {
            results.entry((metric, window)).or_default();
        }

        for end_index in months.saturating_sub(1)..series.len() {
            let Some(fund_slice) = series.window_ending(end_index, months) else {
                continue;
            };
            let date = series.dates()[end_index];
            let bench_slice = benchmark.and_then(|b| b.window_ending(end_index, months));
            let risk_free = match rate_series {
                Some(rates) => rates
                    .window_ending(end_index, months)
                    .map(RiskFree::Series)
                    .unwrap_or(RiskFree::Constant(0.0)),
                None => RiskFree::Constant(constant_rate),
            };
            let context = MetricContext {
                risk_free,
                omega_threshold: request.omega_threshold,
            };

            for &metric in &request.metrics {
                let value = metrics::compute(metric, fund_slice, bench_slice, &context);
                results
                    .entry((metric, window))
                    .or_default()
                    .insert(date, value);
            }
        }
    }
    results
}

/// Merges per-fund results into columnar tables on the union date axis.
fn assemble(per_fund: &[(FundId, FundResults)], request: &EvaluationRequest) -> EvaluationOutput {
    let mut tables = Vec::new();
    for (&metric, &window) in iproduct!(&request.metrics, &request.windows) {
        let mut axis = BTreeSet::new();
        for (_, results) in per_fund {
            if let Some(cells) = results.get(&(metric, window)) {
                axis.extend(cells.keys().copied());
            }
        }
        let dates: Vec<NaiveDate> = axis.into_iter().collect();

        let columns: BTreeMap<FundId, Vec<Option<f64>>> = per_fund
            .iter()
            .map(|(id, results)| {
                let cells = results.get(&(metric, window));
                let column = dates
                    .iter()
                    .map(|date| cells.and_then(|c| c.get(date).copied().flatten()))
                    .collect();
                (id.clone(), column)
            })
            .collect();

        tables.push(MetricTable {
            metric,
            window,
            dates,
            columns,
        });
    }
    EvaluationOutput::from_tables(tables)
}
