//! Cleaning pipeline - composes the steps in their fixed order
//!
//! Each step takes the dataset by value and hands it to the next one, so a
//! step's postconditions are the following step's preconditions:
//!
//! 1. diagnose the raw rows
//! 2. coerce numeric and date columns
//! 3. normalize sentinel strings to missing
//! 4. drop rows missing essential columns, impute contextual ones
//! 5. recompute total spent
//! 6. deduplicate
//! 7. persist (only in [`clean_file`])

use crate::cleaning::coerce::{coerce_types, DEFAULT_DATE_FORMATS};
use crate::cleaning::dedupe::deduplicate;
use crate::cleaning::derive::recompute_total_spent;
use crate::cleaning::diagnose::{diagnose, log_diagnosis};
use crate::cleaning::error::Result;
use crate::cleaning::load::load_raw_csv;
use crate::cleaning::normalize::{normalize_sentinels, SentinelSet};
use crate::cleaning::nulls::{handle_nulls, Imputation, NullPolicy};
use crate::cleaning::types::{CleaningReport, Dataset, RawDataset};
use crate::cleaning::write::write_csv;
use std::path::Path;
use tracing::info;

/// Tunables for a cleaning run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub sentinels: SentinelSet,
    pub null_policy: NullPolicy,
    pub date_formats: Vec<String>,
    /// Values listed per column in diagnosis output
    pub diagnosis_top_n: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            sentinels: SentinelSet::default(),
            null_policy: NullPolicy::default(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            diagnosis_top_n: 5,
        }
    }
}

impl PipelineConfig {
    /// Use one imputation strategy for every contextual column
    pub fn with_contextual_imputation(self, imputation: Imputation) -> Self {
        PipelineConfig {
            null_policy: self.null_policy.with_imputation(imputation),
            ..self
        }
    }
}

/// Ordered, single-pass cleaning of one dataset
#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    config: PipelineConfig,
}

impl CleaningPipeline {
    /// Build a pipeline, rejecting inconsistent null policies up front
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.null_policy.validate(&config.sentinels)?;
        Ok(CleaningPipeline { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run steps 1-6 over the raw rows
    pub fn run(&self, raw: RawDataset) -> (Dataset, CleaningReport) {
        let config = &self.config;
        let mut report = CleaningReport {
            rows_loaded: raw.rows.len(),
            malformed_records: raw.malformed_records,
            ..Default::default()
        };

        info!("Step 1/7: Diagnosing raw data...");
        report.raw_diagnosis = diagnose(&raw.rows, config.diagnosis_top_n);
        log_diagnosis("Raw", &report.raw_diagnosis);
        info!("✓ Diagnosis complete");

        info!("Step 2/7: Adjusting data types...");
        let (dataset, failures) = coerce_types(raw.rows, &config.date_formats);
        report.coercion_failures = failures;
        info!("✓ Data types adjusted");

        info!("Step 3/7: Standardizing missing values and errors...");
        let (dataset, replaced) = normalize_sentinels(dataset, &config.sentinels);
        report.sentinels_replaced = replaced;
        info!("✓ Values standardized to missing");

        info!("Step 4/7: Handling null values...");
        let (dataset, nulls) = handle_nulls(dataset, &config.null_policy);
        report.dropped_missing_essential = nulls.dropped;
        report.imputed = nulls.imputed;
        info!("✓ Null values handled");

        info!("Step 5/7: Validating total spent...");
        let (dataset, derived) = recompute_total_spent(dataset);
        report.totals_corrected = derived.corrected;
        report.dropped_invalid_derived = derived.dropped;
        info!("✓ Total spent recalculated");

        info!("Step 6/7: Checking for duplicate data...");
        let (dataset, duplicates) = deduplicate(dataset);
        report.duplicates_removed = duplicates;
        info!("✓ Deduplication complete");

        report.rows_retained = dataset.len();
        report.final_diagnosis = diagnose(&dataset, config.diagnosis_top_n);
        log_diagnosis("Clean", &report.final_diagnosis);

        (dataset, report)
    }
}

/// Load, clean and persist in one go. Any I/O failure aborts the run.
pub fn clean_file(input: &Path, output: &Path, config: PipelineConfig) -> Result<CleaningReport> {
    let pipeline = CleaningPipeline::new(config)?;

    let raw = load_raw_csv(input)?;
    let (dataset, mut report) = pipeline.run(raw);

    info!("Step 7/7: Saving clean data...");
    report.rows_written = write_csv(&dataset, output)?;
    info!("✓ Clean file contains {} rows", report.rows_written);

    Ok(report)
}
