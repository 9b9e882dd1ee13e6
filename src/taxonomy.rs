use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::HashMap, io::Write, path::Path};
use tracing::debug;

use crate::common::write_atomically;
use crate::constants::{TAXONOMY_COLUMN_PREFIX, TAXONOMY_OUTPUT_PREFIX, TAXONOMY_SLOTS};
use crate::provider::CleanedRecord;
use crate::registry::RegistryRow;

pub fn taxonomy_source_columns() -> impl Iterator<Item = String> {
    (1..=TAXONOMY_SLOTS).map(|i| format!("{TAXONOMY_COLUMN_PREFIX}{i}"))
}

pub fn taxonomy_output_columns() -> impl Iterator<Item = String> {
    (1..=TAXONOMY_SLOTS).map(|i| format!("{TAXONOMY_OUTPUT_PREFIX}{i}"))
}

/// Drops empty codes, keeping the rest in source order.
pub fn compact<I, S>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .filter(|code| !code.as_ref().trim().is_empty())
        .map(|code| code.as_ref().to_string())
        .collect()
}

/// Fixed-width taxonomy columns. Filled slots always precede empty ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomySlots([String; TAXONOMY_SLOTS]);

impl TaxonomySlots {
    /// Places `codes` into slots 1..N and leaves the rest empty. Codes past the
    /// last slot are dropped.
    pub fn pad(codes: Vec<String>) -> Self {
        let mut slots: [String; TAXONOMY_SLOTS] = Default::default();
        for (slot, code) in slots.iter_mut().zip(codes) {
            *slot = code;
        }
        Self(slots)
    }

    pub fn from_row(row: &RegistryRow<'_>) -> Self {
        let columns: Vec<String> = taxonomy_source_columns().collect();
        Self::pad(compact(columns.iter().map(|column| row.field(column))))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str).filter(|c| !c.is_empty())
    }

    pub fn len(&self) -> usize {
        self.codes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0[0].is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyCount {
    #[serde(rename = "Taxonomy Code")]
    pub code: String,
    #[serde(rename = "Count")]
    pub count: usize,
}

/// Counts every non-empty taxonomy slot across `records`.
///
/// Sorted by descending count. Equal counts keep first-seen order, walking
/// records in output order and slots left to right.
pub fn summarize_taxonomy(records: &[CleanedRecord]) -> Vec<TaxonomyCount> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<TaxonomyCount> = Vec::new();

    for code in records.iter().flat_map(|r| r.common.taxonomy.codes()) {
        match position.get(code) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                position.insert(code, counts.len());
                counts.push(TaxonomyCount {
                    code: code.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn write_taxonomy_summary<W: Write>(out: W, counts: &[TaxonomyCount]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if counts.is_empty() {
        writer
            .write_record(["Taxonomy Code", "Count"])
            .context("Failed writing taxonomy summary header")?;
    }
    for count in counts {
        writer
            .serialize(count)
            .with_context(|| format!("Failed writing taxonomy count for {}", count.code))?;
    }
    writer
        .flush()
        .context("Failed flushing taxonomy summary writer")?;
    Ok(())
}

pub fn export_taxonomy_summary_csv(output_path: &Path, counts: &[TaxonomyCount]) -> Result<()> {
    write_atomically(output_path, "taxonomy_counts.csv", |out| {
        write_taxonomy_summary(out, counts)
    })?;
    debug!(
        path = %output_path.display(),
        distinct_codes = counts.len(),
        "wrote taxonomy summary"
    );
    Ok(())
}
