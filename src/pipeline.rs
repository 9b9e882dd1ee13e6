use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::common::format_count;
use crate::constants::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_CSV, DEFAULT_TAXONOMY_SUMMARY_CSV};
use crate::provider::{expand_registry, export_cleaned_csv};
use crate::registry::load_registry_file;
use crate::taxonomy::{export_taxonomy_summary_csv, summarize_taxonomy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerConfig {
    pub input_path: PathBuf,
    pub output_csv: PathBuf,
    pub taxonomy_summary_csv: PathBuf,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_csv: PathBuf::from(DEFAULT_OUTPUT_CSV),
            taxonomy_summary_csv: PathBuf::from(DEFAULT_TAXONOMY_SUMMARY_CSV),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub input_rows: usize,
    pub output_records: usize,
    pub mailing_records: usize,
    pub distinct_taxonomy_codes: usize,
}

/// Load, expand, summarize, then write both outputs.
///
/// Nothing is written until every row has been processed, so a failure while
/// loading leaves no output files behind.
pub fn run(config: &CleanerConfig) -> Result<RunSummary> {
    let table = load_registry_file(&config.input_path)?;
    let missing = table.missing_optional_columns();
    if !missing.is_empty() {
        debug!(
            columns = %missing.join(", "),
            "optional columns absent; values default to empty"
        );
    }

    let records = expand_registry(&table);
    let counts = summarize_taxonomy(&records);

    export_cleaned_csv(&config.output_csv, &records).with_context(|| {
        format!(
            "Failed writing cleaned output {}",
            config.output_csv.display()
        )
    })?;
    export_taxonomy_summary_csv(&config.taxonomy_summary_csv, &counts).with_context(|| {
        format!(
            "Failed writing taxonomy summary {}",
            config.taxonomy_summary_csv.display()
        )
    })?;

    let summary = RunSummary {
        input_rows: table.len(),
        output_records: records.len(),
        mailing_records: records.len() - table.len(),
        distinct_taxonomy_codes: counts.len(),
    };
    debug!(
        input_rows = %format_count(summary.input_rows),
        output_records = %format_count(summary.output_records),
        mailing_records = %format_count(summary.mailing_records),
        distinct_taxonomy_codes = summary.distinct_taxonomy_codes,
        "cleaning finished"
    );
    Ok(summary)
}
