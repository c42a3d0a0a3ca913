use crate::series::ReturnSeries;
use serde::{Deserialize, Serialize};

/// The risk-free rate input for excess-return statistics.
///
/// The two shapes carry different conventions, matching how rate data is
/// usually sourced:
/// - `Constant` is an *annual* rate, subtracted from a fund's annualized
///   return;
/// - `Series` holds *monthly* rates on the same axis as the fund series,
///   subtracted pointwise before annualization.
///
/// The shape is resolved once at the evaluation boundary; primitives never
/// inspect runtime types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFreeRate {
    Constant(f64),
    Series(ReturnSeries),
}
