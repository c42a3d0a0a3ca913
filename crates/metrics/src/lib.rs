//! # Fundlens Metric Primitives
//!
//! Pure, stateless statistics over monthly return slices. This crate is the
//! numerical heart of the workspace: every ranking and chart downstream is only
//! as correct as the edge handling here.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** No I/O, no shared state, no knowledge of funds or
//!   calendars. Every function consumes one or two aligned slices of
//!   `Option<f64>` (monthly returns, `None` = missing) and returns
//!   `Option<f64>` (`None` = undefined).
//! - **Total functions:** Primitives never panic, never return infinities and
//!   never raise on degenerate input. Too little data or a zero denominator
//!   yields `None`, with one documented exception: a zero-loss Omega ratio
//!   returns the finite [`ZERO_LOSS_OMEGA`] sentinel so that rankings stay
//!   total-ordered.
//! - **Fixed monthly convention:** Annualization assumes 12 periods per year
//!   throughout; the crate is deliberately not generic over frequency.

pub mod absolute;
pub mod kind;
pub mod relative;
pub mod support;

pub use absolute::{
    RiskFree, ZERO_LOSS_OMEGA, annualized_return, max_drawdown, omega_ratio, sharpe_ratio,
    volatility, worst_month,
};
pub use kind::{MetricContext, MetricKind, compute};
pub use relative::{
    beta, correlation, down_correlation, r_squared, tracking_error, up_correlation,
};
