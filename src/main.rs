use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::CliOverrides;
use core_types::ReturnSeries;
use evaluator::{EvaluationOutput, Evaluator};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod loader;

use loader::{FileCache, UniverseFile, build_request};

/// The main entry point for the fundlens analytics application.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate(args) => {
            if let Err(e) = handle_evaluate(args) {
                eprintln!("Error during evaluation: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Rolling-window risk and performance metrics for a fund universe.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the configured metric batch and write the output tables.
    Evaluate(EvaluateArgs),
}

#[derive(Parser)]
struct EvaluateArgs {
    /// Path to the run configuration file.
    #[arg(long, default_value = "fundlens.toml")]
    config: PathBuf,

    #[command(flatten)]
    overrides: CliOverrides,
}

// ==============================================================================
// Evaluate Command Logic
// ==============================================================================

/// Orchestrates one evaluation batch: load, evaluate, write, summarize.
fn handle_evaluate(args: EvaluateArgs) -> anyhow::Result<()> {
    let mut config = configuration::load_config(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    args.overrides.apply(&mut config);

    let mut universe_cache: FileCache<UniverseFile> = FileCache::new();
    let universe = universe_cache.load(&config.data.universe_file)?;
    info!(
        funds = universe.funds.len(),
        benchmarks = universe.benchmarks.len(),
        "loaded universe from {}",
        config.data.universe_file.display()
    );

    let mut rate_cache: FileCache<ReturnSeries> = FileCache::new();
    let rate_series = match &config.data.risk_free_file {
        Some(path) => Some(rate_cache.load(path)?),
        None => None,
    };

    let request = build_request(&universe, &config, rate_series.as_deref())?;
    let output = Evaluator::new().evaluate(&request)?;

    write_tables(&output, &config.data.output_dir)?;
    print_summary(&output);
    Ok(())
}

/// Writes one JSON table per (metric, window) into the output directory,
/// named like `volatility_36M.json`.
fn write_tables(output: &EvaluationOutput, output_dir: &PathBuf) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    for table in output.tables() {
        let path = output_dir.join(format!("{}_{}.json", table.metric.key(), table.window));
        let file = fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, table)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    info!(tables = output.len(), "wrote output tables to {}", output_dir.display());
    Ok(())
}

/// Prints a per-table batch summary on the terminal.
fn print_summary(output: &EvaluationOutput) {
    let mut summary = Table::new();
    summary.set_header(vec!["Metric", "Window", "Dates", "Funds", "Defined cells"]);
    for table in output.tables() {
        summary.add_row(vec![
            table.metric.to_string(),
            table.window.to_string(),
            table.dates.len().to_string(),
            table.columns.len().to_string(),
            table.defined_cells().to_string(),
        ]);
    }
    println!("{summary}");
}
