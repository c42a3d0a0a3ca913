use crate::error::ConfigError;
use core_types::{DEFAULT_WINDOWS, Window};
use metrics::MetricKind;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for a fundlens run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub evaluation: Evaluation,
    pub data: Data,
}

/// What to evaluate: windows, metric set and risk-free input.
#[derive(Debug, Clone, Deserialize)]
pub struct Evaluation {
    /// Trailing window lengths in months.
    #[serde(default = "default_windows")]
    pub windows: Vec<Window>,
    /// Metrics to compute; defaults to the full set.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricKind>,
    /// A constant annual risk-free rate for the Sharpe ratio.
    /// Mutually exclusive with `data.risk_free_file`.
    #[serde(default)]
    pub risk_free_rate: Option<f64>,
    /// Monthly threshold for the Omega ratio.
    #[serde(default)]
    pub omega_threshold: f64,
}

/// Where input series come from and where output tables go.
#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    /// JSON file holding fund series, benchmark series and the
    /// fund-to-benchmark assignment.
    pub universe_file: PathBuf,
    /// Optional JSON file holding a monthly risk-free rate series.
    #[serde(default)]
    pub risk_free_file: Option<PathBuf>,
    /// Directory receiving one JSON table per (metric, window).
    pub output_dir: PathBuf,
}

impl Config {
    /// Checks cross-field constraints the deserializer cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.evaluation.windows.is_empty() {
            return Err(ConfigError::Validation(
                "at least one evaluation window is required".to_string(),
            ));
        }
        if self.evaluation.metrics.is_empty() {
            return Err(ConfigError::Validation(
                "at least one metric is required".to_string(),
            ));
        }
        if self.evaluation.risk_free_rate.is_some() && self.data.risk_free_file.is_some() {
            return Err(ConfigError::Validation(
                "risk_free_rate and risk_free_file are mutually exclusive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command-line overrides for the most commonly varied settings.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CliOverrides {
    /// Path to the input universe file, overriding the configured one.
    #[arg(long)]
    pub universe: Option<PathBuf>,

    /// Directory for the output tables, overriding the configured one.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[cfg(feature = "clap")]
impl CliOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(universe) = &self.universe {
            config.data.universe_file = universe.clone();
        }
        if let Some(output) = &self.output {
            config.data.output_dir = output.clone();
        }
    }
}

fn default_windows() -> Vec<Window> {
    DEFAULT_WINDOWS.to_vec()
}

fn default_metrics() -> Vec<MetricKind> {
    MetricKind::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_config_from_str;

    const MINIMAL: &str = r#"
        [evaluation]

        [data]
        universe_file = "universe.json"
        output_dir = "out"
    "#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = load_config_from_str(MINIMAL).unwrap();
        assert_eq!(
            config.evaluation.windows,
            DEFAULT_WINDOWS.to_vec()
        );
        assert_eq!(config.evaluation.metrics.len(), MetricKind::ALL.len());
        assert_eq!(config.evaluation.omega_threshold, 0.0);
    }

    #[test]
    fn explicit_windows_and_metrics_parse() {
        let toml = r#"
            [evaluation]
            windows = [12, 36]
            metrics = ["volatility", "tracking_error"]
            risk_free_rate = 0.02

            [data]
            universe_file = "universe.json"
            output_dir = "out"
        "#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.evaluation.windows.len(), 2);
        assert_eq!(config.evaluation.metrics[1], MetricKind::TrackingError);
        assert_eq!(config.evaluation.risk_free_rate, Some(0.02));
    }

    #[test]
    fn zero_month_window_is_rejected() {
        let toml = r#"
            [evaluation]
            windows = [0]

            [data]
            universe_file = "universe.json"
            output_dir = "out"
        "#;
        assert!(load_config_from_str(toml).is_err());
    }

    #[test]
    fn conflicting_risk_free_sources_fail_validation() {
        let toml = r#"
            [evaluation]
            risk_free_rate = 0.02

            [data]
            universe_file = "universe.json"
            risk_free_file = "rates.json"
            output_dir = "out"
        "#;
        let error = load_config_from_str(toml).unwrap_err();
        assert!(matches!(error, ConfigError::Validation(_)));
    }
}
