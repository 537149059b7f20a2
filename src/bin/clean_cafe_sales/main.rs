//! Cafe sales cleaner - reads a dirty export and writes a clean CSV
//!
//! Usage:
//!   clean-cafe-sales <INPUT_FILE> <OUTPUT_FILE> [--report report.json] [--impute mode]

use anyhow::{bail, Context, Result};
use cafe_sales_cleaner::cleaning::nulls::UNKNOWN_PLACEHOLDER;
use cafe_sales_cleaner::cleaning::write::write_report;
use cafe_sales_cleaner::cleaning::{clean_file, Imputation, PipelineConfig};
use clap::{Parser, ValueEnum};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A tool to clean cafe sales data
#[derive(Parser, Debug)]
#[command(name = "clean-cafe-sales", version)]
struct Cli {
    /// Path to the input (dirty) CSV file [env: CLEAN_INPUT_PATH]
    input_file: Option<PathBuf>,

    /// Path to save the output (clean) CSV file [env: CLEAN_OUTPUT_PATH]
    output_file: Option<PathBuf>,

    /// Write the run report as JSON to this path [env: CLEAN_REPORT_PATH]
    #[arg(long)]
    report: Option<PathBuf>,

    /// How missing payment method and location are filled [env: CLEAN_IMPUTE_STRATEGY]
    #[arg(long, value_enum)]
    impute: Option<ImputeStrategy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ImputeStrategy {
    /// Fill with the "Unknown" placeholder
    Constant,
    /// Fill with the most frequent value
    Mode,
}

impl ImputeStrategy {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "constant" => Ok(ImputeStrategy::Constant),
            "mode" => Ok(ImputeStrategy::Mode),
            other => bail!("CLEAN_IMPUTE_STRATEGY must be 'constant' or 'mode', got '{}'", other),
        }
    }

    fn imputation(self) -> Imputation {
        match self {
            ImputeStrategy::Constant => Imputation::Constant(UNKNOWN_PLACEHOLDER.to_string()),
            ImputeStrategy::Mode => Imputation::Mode,
        }
    }
}

fn main() -> Result<()> {
    // Load .env first so RUST_LOG can come from it
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = EnvConfig::from_env()?.with_cli(cli)?;
    info!("Configuration loaded");

    let pipeline_config =
        PipelineConfig::default().with_contextual_imputation(config.impute.imputation());

    info!(
        "Cleaning {:?} -> {:?} (imputation: {:?})",
        config.input_path, config.output_path, config.impute
    );

    let report = clean_file(&config.input_path, &config.output_path, pipeline_config)
        .with_context(|| format!("Failed to clean '{}'", config.input_path.display()))?;

    info!("✓ Cleaning process completed: {}", report);

    if let Some(report_path) = &config.report_path {
        write_report(&report, report_path)
            .with_context(|| format!("Failed to write report to '{}'", report_path.display()))?;
    }

    Ok(())
}

/// Configuration from environment variables, overridden by CLI arguments
#[derive(Debug, Clone)]
struct Config {
    input_path: PathBuf,
    output_path: PathBuf,
    report_path: Option<PathBuf>,
    impute: ImputeStrategy,
}

/// Environment defaults before CLI arguments are applied
#[derive(Debug, Clone, Default)]
struct EnvConfig {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    report_path: Option<PathBuf>,
    impute: Option<ImputeStrategy>,
}

impl EnvConfig {
    fn from_env() -> Result<Self> {
        Ok(EnvConfig {
            input_path: env::var("CLEAN_INPUT_PATH").ok().map(PathBuf::from),
            output_path: env::var("CLEAN_OUTPUT_PATH").ok().map(PathBuf::from),
            report_path: env::var("CLEAN_REPORT_PATH").ok().map(PathBuf::from),
            impute: env::var("CLEAN_IMPUTE_STRATEGY")
                .ok()
                .map(|s| ImputeStrategy::parse(&s))
                .transpose()?,
        })
    }

    fn with_cli(self, cli: Cli) -> Result<Config> {
        Ok(Config {
            input_path: cli
                .input_file
                .or(self.input_path)
                .context("No input file given (pass INPUT_FILE or set CLEAN_INPUT_PATH)")?,
            output_path: cli
                .output_file
                .or(self.output_path)
                .context("No output file given (pass OUTPUT_FILE or set CLEAN_OUTPUT_PATH)")?,
            report_path: cli.report.or(self.report_path),
            impute: cli
                .impute
                .or(self.impute)
                .unwrap_or(ImputeStrategy::Constant),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_env() {
        let env = EnvConfig {
            input_path: Some(PathBuf::from("env_in.csv")),
            output_path: Some(PathBuf::from("env_out.csv")),
            report_path: None,
            impute: Some(ImputeStrategy::Mode),
        };
        let cli = Cli::parse_from(["clean-cafe-sales", "cli_in.csv"]);

        let config = env.with_cli(cli).unwrap();

        assert_eq!(config.input_path, PathBuf::from("cli_in.csv"));
        assert_eq!(config.output_path, PathBuf::from("env_out.csv"));
        assert_eq!(config.impute, ImputeStrategy::Mode);
    }

    #[test]
    fn test_missing_paths_rejected() {
        let cli = Cli::parse_from(["clean-cafe-sales"]);
        assert!(EnvConfig::default().with_cli(cli).is_err());
    }

    #[test]
    fn test_impute_flag() {
        let cli = Cli::parse_from(["clean-cafe-sales", "in.csv", "out.csv", "--impute", "mode"]);
        let config = EnvConfig::default().with_cli(cli).unwrap();

        assert_eq!(config.impute.imputation(), Imputation::Mode);
        assert_eq!(config.report_path, None);
    }

    #[test]
    fn test_parse_impute_strategy() {
        assert_eq!(ImputeStrategy::parse("Mode").unwrap(), ImputeStrategy::Mode);
        assert_eq!(ImputeStrategy::parse("constant").unwrap(), ImputeStrategy::Constant);
        assert!(ImputeStrategy::parse("median").is_err());
    }
}
