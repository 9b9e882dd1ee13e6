use anyhow::{Context, Result};
use csv::StringRecord;
use std::{collections::HashMap, fs::File, io::Read, path::Path};
use tracing::debug;

use crate::constants::{
    COL_CREDENTIAL, COL_ENUMERATION_DATE, COL_FIRST_NAME, COL_LAST_NAME, COL_LICENSE_NUMBER,
    COL_LICENSE_STATE, COL_MAILING_CITY, COL_MAILING_LINE_1, COL_MAILING_LINE_2,
    COL_MAILING_PHONE, COL_MAILING_POSTAL_CODE, COL_MAILING_STATE, COL_NPI,
    COL_OFFICIAL_FIRST_NAME, COL_OFFICIAL_LAST_NAME, COL_ORGANIZATION_NAME, COL_PRACTICE_CITY,
    COL_PRACTICE_LINE_1, COL_PRACTICE_LINE_2, COL_PRACTICE_PHONE, COL_PRACTICE_POSTAL_CODE,
    COL_PRACTICE_STATE,
};
use crate::taxonomy::taxonomy_source_columns;

/// Column name -> position lookup for one NPPES extract.
///
/// Names are matched after trimming, so `" NPI "` in a hand-edited header still
/// resolves. When a name appears twice the first occurrence wins.
#[derive(Debug, Clone)]
pub struct RegistryHeaders {
    positions: HashMap<String, usize>,
}

impl RegistryHeaders {
    pub fn from_record(headers: &StringRecord) -> Result<Self> {
        let mut positions = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            positions.entry(name.trim().to_string()).or_insert(idx);
        }
        let headers = Self { positions };
        headers.required(COL_NPI)?;
        Ok(headers)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn required(&self, name: &str) -> Result<usize> {
        self.position(name)
            .with_context(|| format!("CSV missing required header '{name}'"))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }
}

/// Read-only view of one input record.
#[derive(Debug, Clone, Copy)]
pub struct RegistryRow<'a> {
    headers: &'a RegistryHeaders,
    record: &'a StringRecord,
}

impl<'a> RegistryRow<'a> {
    pub fn new(headers: &'a RegistryHeaders, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    /// Value of `column`, or `""` when the column is unknown or the record is short.
    pub fn field(&self, column: &str) -> &'a str {
        self.headers
            .position(column)
            .and_then(|idx| self.record.get(idx))
            .unwrap_or("")
    }

    pub fn npi(&self) -> &'a str {
        self.field(COL_NPI)
    }
}

/// Whole input file held in memory.
#[derive(Debug, Clone)]
pub struct RegistryTable {
    headers: RegistryHeaders,
    records: Vec<StringRecord>,
}

impl RegistryTable {
    pub fn headers(&self) -> &RegistryHeaders {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = RegistryRow<'_>> + '_ {
        self.records
            .iter()
            .map(|record| RegistryRow::new(&self.headers, record))
    }

    /// Expected optional columns that the header does not carry.
    pub fn missing_optional_columns(&self) -> Vec<String> {
        let mut expected: Vec<String> = [
            COL_FIRST_NAME,
            COL_LAST_NAME,
            COL_OFFICIAL_FIRST_NAME,
            COL_OFFICIAL_LAST_NAME,
            COL_CREDENTIAL,
            COL_ORGANIZATION_NAME,
            COL_ENUMERATION_DATE,
            COL_LICENSE_NUMBER,
            COL_LICENSE_STATE,
            COL_PRACTICE_LINE_1,
            COL_PRACTICE_LINE_2,
            COL_PRACTICE_CITY,
            COL_PRACTICE_STATE,
            COL_PRACTICE_POSTAL_CODE,
            COL_PRACTICE_PHONE,
            COL_MAILING_LINE_1,
            COL_MAILING_LINE_2,
            COL_MAILING_CITY,
            COL_MAILING_STATE,
            COL_MAILING_POSTAL_CODE,
            COL_MAILING_PHONE,
        ]
        .iter()
        .map(|name| name.to_string())
        .collect();
        expected.extend(taxonomy_source_columns());
        expected.retain(|name| !self.headers.contains(name));
        expected
    }
}

pub fn load_registry<R: Read>(reader: R) -> Result<RegistryTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let header_record = reader
        .headers()
        .context("Failed reading NPPES headers")?
        .clone();
    let headers = RegistryHeaders::from_record(&header_record)?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        // +2: one for the header line, one for 1-based numbering.
        let row = row.with_context(|| format!("Failed reading record on line {}", idx + 2))?;
        records.push(row);
    }

    Ok(RegistryTable { headers, records })
}

pub fn load_registry_file(path: &Path) -> Result<RegistryTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed opening NPPES CSV {}", path.display()))?;
    let table =
        load_registry(file).with_context(|| format!("Failed loading {}", path.display()))?;
    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers.positions.len(),
        "loaded NPPES extract"
    );
    Ok(table)
}
