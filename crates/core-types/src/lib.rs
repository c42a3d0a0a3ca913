//! # Fundlens Core Types
//!
//! The foundational data types shared by every other crate in the workspace.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate depends on nothing else in the workspace. It defines
//!   the vocabulary (return series, windows, identifiers) that the metric and
//!   evaluator layers speak.
//! - **Validated at the boundary:** A [`ReturnSeries`] can only be constructed
//!   through [`ReturnSeries::from_observations`], which enforces the monthly,
//!   strictly-ordered date axis every downstream computation relies on.

pub mod error;
pub mod rate;
pub mod series;
pub mod window;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use rate::RiskFreeRate;
pub use series::{FundId, Observation, ReturnSeries};
pub use window::{DEFAULT_WINDOWS, Window};
