//! # Fundlens Configuration
//!
//! Loads and validates the run configuration (`fundlens.toml`): which windows
//! and metrics to evaluate, the risk-free input, and where series come from
//! and results go.

use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, Data, Evaluation};

#[cfg(feature = "clap")]
pub use settings::CliOverrides;

/// Loads the run configuration from a TOML file and validates it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    let loaded = builder.try_deserialize::<Config>()?;
    loaded.validate()?;
    Ok(loaded)
}

/// Loads configuration from an in-memory TOML string. Used by tests and
/// embedding callers.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    let loaded = builder.try_deserialize::<Config>()?;
    loaded.validate()?;
    Ok(loaded)
}
