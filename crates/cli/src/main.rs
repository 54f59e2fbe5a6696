//! intenteval CLI - search-intent classification evaluation
//!
//! This binary runs the labeled dataset through a language model and reports
//! how well it separates search requests from conversation.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use intenteval::{
    apply_overrides, build_evaluator, export_run, load_cases, run_evaluation, run_single_query,
    EvalOverrides,
};
use intenteval_core::config::Config;
use intenteval_evals::{render_failure_analysis, render_report};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const USAGE_EXAMPLES: &str = "\
Examples:
  intenteval --full-eval
  intenteval --dataset ambiguous --temp 0.2
  intenteval --full-eval --export-results results.json
  intenteval --full-eval --analyze-failures --quiet
  intenteval --query \"find AI discussions\"";

#[derive(Parser, Debug)]
#[command(name = "intenteval")]
#[command(about = "Evaluate search-intent vs chat classification by a language model")]
#[command(version)]
struct Cli {
    /// Run evaluation on all test cases
    #[arg(long)]
    full_eval: bool,

    /// Only evaluate categories containing this text (e.g. "ambiguous", "edge_case")
    #[arg(long, value_name = "FILTER")]
    dataset: Option<String>,

    /// Generation temperature (0.0-1.0)
    #[arg(long, value_name = "T")]
    temp: Option<f32>,

    /// Show detailed failure analysis after the report
    #[arg(long)]
    analyze_failures: bool,

    /// Export results to a .json or .csv file
    #[arg(long, value_name = "PATH")]
    export_results: Option<PathBuf>,

    /// Show a progress bar instead of per-case lines
    #[arg(short, long)]
    quiet: bool,

    /// Classify a single query and print the parsed response
    #[arg(long, value_name = "TEXT", conflicts_with_all = ["full_eval", "dataset"])]
    query: Option<String>,

    /// Load test cases from a JSON file instead of the built-in dataset
    #[arg(long, value_name = "FILE")]
    cases: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn has_mode(&self) -> bool {
        self.full_eval || self.dataset.is_some() || self.analyze_failures || self.query.is_some()
    }

    fn runs_evaluation(&self) -> bool {
        self.full_eval || self.dataset.is_some()
    }

    fn overrides(&self) -> EvalOverrides {
        EvalOverrides {
            temperature: self.temp,
            dataset_filter: self.dataset.clone(),
            quiet: self.quiet,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.has_mode() {
        Cli::command()
            .print_help()
            .context("Failed to print help")?;
        println!("\n{USAGE_EXAMPLES}");
        return Ok(());
    }

    init_logging(cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli.overrides());
    config.validate()?;

    if let Some(query) = &cli.query {
        let evaluator = build_evaluator(&config).await?;
        return run_single_query(&evaluator, query).await;
    }

    if !cli.runs_evaluation() {
        println!("No results to analyze. Run --full-eval first.");
        return Ok(());
    }

    evaluate(&cli, &config).await
}

/// Initialize logging system
///
/// Logs go to stderr so reports on stdout can be redirected cleanly.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={level}", env!("CARGO_PKG_NAME"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Cancel `token` on the first Ctrl+C
fn install_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted by user, reporting partial results");
            token.cancel();
        }
    });
}

async fn evaluate(cli: &Cli, config: &Config) -> Result<()> {
    let cases = load_cases(cli.cases.as_deref())?;
    let evaluator = build_evaluator(config).await?;

    let cancel = CancellationToken::new();
    install_interrupt_handler(cancel.clone());

    let run = run_evaluation(&evaluator, cases, &cancel).await;

    println!("\n{}", render_report(&run));

    if cli.analyze_failures {
        println!("\n{}", render_failure_analysis(&run.results));
    }

    if let Some(path) = &cli.export_results {
        export_run(path, &run, evaluator.model_name())?;
    }

    Ok(())
}
