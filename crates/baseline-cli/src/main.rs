use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use baseline_analysis::scanner::collect_files;
use baseline_analysis::{
    ComplianceOracle, CompliancePipeline, CssUsageAnalyzer, FeatureDataset, WhitelistSet,
};
use baseline_core::config::{BaselineConfig, CliOverrides};
use baseline_core::constants::DEFAULT_LOG_FILTER;
use baseline_core::tracing::init_tracing_with_default;

mod report;

/// Exit status when the run completed with no violations.
const EXIT_CLEAN: u8 = 0;
/// Exit status when at least one violation was reported.
const EXIT_VIOLATIONS: u8 = 1;
/// Exit status for configuration and dataset failures.
const EXIT_FATAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "baseline-check", version)]
#[command(about = "Report web-platform features below the Baseline target", long_about = None)]
struct Cli {
    /// Files or directories to scan. Defaults to the current directory.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Config file to use instead of ./baseline.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compliance target: "widely", "newly", or a year such as 2022.
    #[arg(long)]
    target: Option<String>,

    /// Treat newly available features as non-compliant.
    #[arg(long)]
    strict: bool,

    /// Feature-status dataset (JSON).
    #[arg(long, value_name = "PATH")]
    dataset: Option<PathBuf>,

    /// Browser target, e.g. "safari 15.4". Repeatable. When given, stylesheet
    /// usages every target supports are not reported.
    #[arg(long = "browser", value_name = "BROWSER", action = clap::ArgAction::Append)]
    browsers: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match run(&cli) {
        Ok(true) => ExitCode::from(EXIT_VIOLATIONS),
        Ok(false) => ExitCode::from(EXIT_CLEAN),
        Err(err) => {
            eprintln!("baseline-check: {err:?}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        "baseline_core=debug,baseline_analysis=debug,baseline_check=debug"
    } else if verbose {
        DEFAULT_LOG_FILTER
    } else {
        "warn"
    };
    init_tracing_with_default(filter);
}

/// Returns whether any violation was found.
fn run(cli: &Cli) -> Result<bool> {
    let roots = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths.clone()
    };
    let project_root = project_root(&roots[0]);

    let overrides = CliOverrides {
        config_path: cli.config.clone(),
        target: cli.target.clone(),
        strict: cli.strict.then_some(true),
        dataset_path: cli.dataset.clone(),
        browsers: cli.browsers.clone(),
    };
    let config = BaselineConfig::load(&project_root, Some(&overrides))
        .context("failed to load configuration")?;
    let policy = config.policy().context("invalid compliance target")?;
    let targets = config.browser_targets().context("invalid browser target")?;

    let dataset_path = config.dataset.effective_path(&project_root);
    let dataset = Arc::new(
        FeatureDataset::load(&dataset_path)
            .with_context(|| format!("failed to load dataset {}", dataset_path.display()))?,
    );

    let files = resolve_files(&roots, &config);
    info!(files = files.len(), %policy, "starting compliance run");

    let mut pipeline = CompliancePipeline::new(
        ComplianceOracle::new(dataset.clone()),
        policy,
        WhitelistSet::new(config.whitelist_names()),
        Box::new(CssUsageAnalyzer::new(targets, dataset)),
    )
    .with_max_file_size(config.scan.effective_max_file_size())
    .with_root(&project_root);

    let result = pipeline.run(&files);
    let summary = pipeline.last_summary().clone();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => report::write_text(&mut out, &result, &summary)?,
        OutputFormat::Json => report::write_json(&mut out, &policy, &result, &summary)?,
    }

    Ok(!result.data.is_empty())
}

/// Directory whose `baseline.toml` and relative dataset path apply.
fn project_root(first: &Path) -> PathBuf {
    if first.is_dir() {
        first.to_path_buf()
    } else {
        match first.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Expand directories through the walker; explicit files pass through.
/// Order follows the command line, duplicates dropped.
fn resolve_files(roots: &[PathBuf], config: &BaselineConfig) -> Vec<PathBuf> {
    let include = config.scan.effective_include();
    let mut seen = std::collections::BTreeSet::new();
    let mut files = Vec::new();
    for root in roots {
        let found = if root.is_dir() {
            collect_files(root, &include, &config.scan.exclude)
        } else {
            vec![root.clone()]
        };
        for path in found {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }
    debug!(files = files.len(), "resolved input files");
    files
}
