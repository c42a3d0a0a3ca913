//! Input loading for the CLI: the universe file format, the explicit file
//! cache, and assembly of an [`EvaluationRequest`].
//!
//! All I/O lives here, on the caller side of the engine boundary. The engine
//! itself only ever sees already-loaded series.

use anyhow::Context;
use configuration::Config;
use core_types::{FundId, ReturnSeries, RiskFreeRate};
use evaluator::EvaluationRequest;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// The JSON input universe: fund and benchmark series plus the externally
/// resolved fund-to-benchmark assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct UniverseFile {
    pub funds: BTreeMap<FundId, ReturnSeries>,
    pub benchmarks: BTreeMap<FundId, ReturnSeries>,
    /// Fund id → benchmark id, produced by the peer-group lookup upstream.
    #[serde(default)]
    pub assignments: BTreeMap<FundId, FundId>,
}

/// A parsed-file cache keyed by path, invalidated by file modification time
/// or explicitly by the caller.
#[derive(Debug, Default)]
pub struct FileCache<T> {
    entries: HashMap<PathBuf, CacheEntry<T>>,
}

#[derive(Debug)]
struct CacheEntry<T> {
    modified: SystemTime,
    value: Arc<T>,
}

impl<T: DeserializeOwned> FileCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the cached value for `path`, re-reading the file when its
    /// modification time has changed since it was cached.
    pub fn load(&mut self, path: &Path) -> anyhow::Result<Arc<T>> {
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("cannot stat {}", path.display()))?;

        if let Some(entry) = self.entries.get(path) {
            if entry.modified == modified {
                debug!(path = %path.display(), "file cache hit");
                return Ok(entry.value.clone());
            }
        }

        let file = fs::File::open(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        let value: T = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("cannot parse {}", path.display()))?;
        let value = Arc::new(value);
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                value: value.clone(),
            },
        );
        debug!(path = %path.display(), "file cache miss, loaded");
        Ok(value)
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }
}

/// Builds the evaluation request from the loaded universe and configuration:
/// resolves each fund's benchmark series from the assignment map and the
/// risk-free input from either the constant rate or the rate series file.
pub fn build_request(
    universe: &UniverseFile,
    config: &Config,
    rate_series: Option<&ReturnSeries>,
) -> anyhow::Result<EvaluationRequest> {
    let mut benchmarks = BTreeMap::new();
    for (fund_id, benchmark_id) in &universe.assignments {
        let series = universe.benchmarks.get(benchmark_id).with_context(|| {
            format!("fund {fund_id} is assigned unknown benchmark {benchmark_id}")
        })?;
        benchmarks.insert(fund_id.clone(), series.clone());
    }

    let risk_free = match (&config.evaluation.risk_free_rate, rate_series) {
        (Some(rate), _) => Some(RiskFreeRate::Constant(*rate)),
        (None, Some(series)) => Some(RiskFreeRate::Series(series.clone())),
        (None, None) => None,
    };

    let mut request = EvaluationRequest::new(universe.funds.clone(), benchmarks);
    request.windows = config.evaluation.windows.clone();
    request.metrics = config.evaluation.metrics.clone();
    request.risk_free = risk_free;
    request.omega_threshold = config.evaluation.omega_threshold;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use configuration::load_config_from_str;
    use std::io::Write;

    fn series(values: &[f64]) -> ReturnSeries {
        let observations = values.iter().enumerate().map(|(i, v)| {
            (
                NaiveDate::from_ymd_opt(2024, 1 + i as u32, 28).unwrap(),
                Some(*v),
            )
        });
        ReturnSeries::from_observations(observations).unwrap()
    }

    fn config(toml_tail: &str) -> Config {
        let toml = format!(
            r#"
            [evaluation]
            {toml_tail}

            [data]
            universe_file = "universe.json"
            output_dir = "out"
            "#
        );
        load_config_from_str(&toml).unwrap()
    }

    #[test]
    fn build_request_resolves_assigned_benchmarks() {
        let universe = UniverseFile {
            funds: BTreeMap::from([(FundId::from("F1"), series(&[0.01, 0.02]))]),
            benchmarks: BTreeMap::from([(FundId::from("PG1"), series(&[0.005, 0.01]))]),
            assignments: BTreeMap::from([(FundId::from("F1"), FundId::from("PG1"))]),
        };

        let request = build_request(&universe, &config("windows = [2]"), None).unwrap();
        assert_eq!(
            request.benchmarks.get(&FundId::from("F1")),
            universe.benchmarks.get(&FundId::from("PG1"))
        );
        assert!(request.risk_free.is_none());
    }

    #[test]
    fn build_request_rejects_unknown_benchmark_ids() {
        let universe = UniverseFile {
            funds: BTreeMap::from([(FundId::from("F1"), series(&[0.01, 0.02]))]),
            benchmarks: BTreeMap::new(),
            assignments: BTreeMap::from([(FundId::from("F1"), FundId::from("NOPE"))]),
        };
        assert!(build_request(&universe, &config("windows = [2]"), None).is_err());
    }

    #[test]
    fn constant_rate_takes_priority_in_request_assembly() {
        let universe = UniverseFile {
            funds: BTreeMap::new(),
            benchmarks: BTreeMap::new(),
            assignments: BTreeMap::new(),
        };
        let request =
            build_request(&universe, &config("risk_free_rate = 0.02"), None).unwrap();
        assert_eq!(request.risk_free, Some(RiskFreeRate::Constant(0.02)));
    }

    #[test]
    fn file_cache_reuses_and_invalidates() {
        let path = std::env::temp_dir().join("fundlens_loader_cache_test.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"[["2024-01-31", 0.01]]"#).unwrap();
        drop(file);

        let mut cache: FileCache<ReturnSeries> = FileCache::new();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        fs::write(&path, br#"[["2024-01-31", 0.05]]"#).unwrap();
        cache.invalidate(&path);
        let third = cache.load(&path).unwrap();
        assert_eq!(third.values(), &[Some(0.05)]);

        fs::remove_file(&path).ok();
    }
}
