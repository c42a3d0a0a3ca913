use core_types::FundId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error("Fund {fund} has no resolved benchmark but a relative metric was requested")]
    MissingBenchmark { fund: FundId },

    #[error("Fund {fund}: {series} series is not on the fund's date axis")]
    ShapeMismatch {
        fund: FundId,
        /// Which input was misaligned: "benchmark" or "risk-free".
        series: &'static str,
    },
}
