use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::{io::Write, path::Path};
use tracing::{debug, warn};

use crate::address::{AddressBlock, AddressType};
use crate::common::write_atomically;
use crate::constants::{
    COL_CREDENTIAL, COL_ENUMERATION_DATE, COL_FIRST_NAME, COL_LAST_NAME, COL_LICENSE_NUMBER,
    COL_LICENSE_STATE, COL_MAILING_PHONE, COL_OFFICIAL_FIRST_NAME, COL_OFFICIAL_LAST_NAME,
    COL_ORGANIZATION_NAME, COL_PRACTICE_PHONE, OUT_ADDRESS_TYPE, OUT_CITY, OUT_CREDENTIAL,
    OUT_ENUMERATION_DATE, OUT_FIRST_NAME, OUT_LAST_NAME, OUT_LICENSE_NUMBER, OUT_LICENSE_STATE,
    OUT_NPI, OUT_ORGANIZATION_NAME, OUT_PHONE_NUMBER, OUT_STATE, OUT_STREET_ADDRESS, OUT_ZIP_CODE,
};
use crate::registry::{RegistryRow, RegistryTable};
use crate::taxonomy::{TaxonomySlots, taxonomy_output_columns};

/// Fields shared by every record expanded from one input row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCommon {
    pub npi: String,
    pub first_name: String,
    pub last_name: String,
    pub credential: String,
    pub organization_name: String,
    pub enumeration_date: String,
    pub license_number: String,
    pub license_state: String,
    pub phone_number: String,
    pub taxonomy: TaxonomySlots,
}

impl ProviderCommon {
    pub fn from_row(row: &RegistryRow<'_>) -> Self {
        let (first_name, last_name) = resolve_name(row);
        Self {
            npi: row.npi().to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            credential: row.field(COL_CREDENTIAL).to_string(),
            organization_name: row.field(COL_ORGANIZATION_NAME).to_string(),
            enumeration_date: row.field(COL_ENUMERATION_DATE).to_string(),
            license_number: row.field(COL_LICENSE_NUMBER).to_string(),
            license_state: row.field(COL_LICENSE_STATE).to_string(),
            phone_number: resolve_phone(row).to_string(),
            taxonomy: TaxonomySlots::from_row(row),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRecord {
    pub common: ProviderCommon,
    pub address: AddressBlock,
    pub address_type: AddressType,
}

/// Individual first/last when both are present, otherwise the authorized
/// official's pair. The two sources are never mixed.
pub fn resolve_name<'a>(row: &RegistryRow<'a>) -> (&'a str, &'a str) {
    let first = row.field(COL_FIRST_NAME);
    let last = row.field(COL_LAST_NAME);
    if !first.is_empty() && !last.is_empty() {
        return (first, last);
    }
    (
        row.field(COL_OFFICIAL_FIRST_NAME),
        row.field(COL_OFFICIAL_LAST_NAME),
    )
}

pub fn resolve_phone<'a>(row: &RegistryRow<'a>) -> &'a str {
    let practice = row.field(COL_PRACTICE_PHONE);
    if !practice.is_empty() {
        return practice;
    }
    row.field(COL_MAILING_PHONE)
}

/// One BP record when practice and mailing addresses normalize to the same
/// string, otherwise BP followed by BM.
pub fn expand_row(row: &RegistryRow<'_>) -> Vec<CleanedRecord> {
    let common = ProviderCommon::from_row(row);
    let practice = AddressBlock::practice(row);
    let mailing = AddressBlock::mailing(row);

    if practice.same_place_as(&mailing) {
        return vec![CleanedRecord {
            common,
            address: practice,
            address_type: AddressType::Practice,
        }];
    }

    vec![
        CleanedRecord {
            common: common.clone(),
            address: practice,
            address_type: AddressType::Practice,
        },
        CleanedRecord {
            common,
            address: mailing,
            address_type: AddressType::Mailing,
        },
    ]
}

fn expansion_progress(total: usize) -> ProgressBar {
    let progress = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
    progress.set_prefix("NPI");
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} {prefix:.bold} [{elapsed_precise}] [{bar:32.cyan/blue}] \
{pos}/{len} ({percent}%) {msg}",
    ) {
        progress.set_style(style.progress_chars("=> "));
    }
    progress
}

pub fn expand_registry(table: &RegistryTable) -> Vec<CleanedRecord> {
    let progress = expansion_progress(table.len());
    let mut records = Vec::with_capacity(table.len() * 2);
    let mut split_rows = 0usize;

    for row in table.rows() {
        if row.npi().trim().is_empty() {
            warn!("input row has an empty NPI; keeping it as-is");
        }
        let expanded = expand_row(&row);
        if expanded.len() > 1 {
            split_rows += 1;
        }
        records.extend(expanded);
        progress.inc(1);
    }
    progress.finish_and_clear();

    debug!(
        input_rows = table.len(),
        output_records = records.len(),
        split_rows,
        "expanded provider rows"
    );
    records
}

pub fn cleaned_header() -> Vec<String> {
    let mut header: Vec<String> = [
        OUT_NPI,
        OUT_FIRST_NAME,
        OUT_LAST_NAME,
        OUT_CREDENTIAL,
        OUT_ORGANIZATION_NAME,
        OUT_ENUMERATION_DATE,
        OUT_LICENSE_NUMBER,
        OUT_LICENSE_STATE,
        OUT_PHONE_NUMBER,
    ]
    .iter()
    .map(|name| name.to_string())
    .collect();
    header.extend(taxonomy_output_columns());
    header.extend(
        [
            OUT_STREET_ADDRESS,
            OUT_CITY,
            OUT_STATE,
            OUT_ZIP_CODE,
            OUT_ADDRESS_TYPE,
        ]
        .iter()
        .map(|name| name.to_string()),
    );
    header
}

impl CleanedRecord {
    /// Field values in `cleaned_header` order.
    pub fn to_fields(&self) -> Vec<&str> {
        let common = &self.common;
        let mut fields = vec![
            common.npi.as_str(),
            common.first_name.as_str(),
            common.last_name.as_str(),
            common.credential.as_str(),
            common.organization_name.as_str(),
            common.enumeration_date.as_str(),
            common.license_number.as_str(),
            common.license_state.as_str(),
            common.phone_number.as_str(),
        ];
        fields.extend(common.taxonomy.as_slice().iter().map(String::as_str));
        fields.extend([
            self.address.line_1.as_str(),
            self.address.city.as_str(),
            self.address.state.as_str(),
            self.address.postal_code.as_str(),
            self.address_type.code(),
        ]);
        fields
    }
}

pub fn write_cleaned_csv<W: Write>(out: W, records: &[CleanedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(cleaned_header())
        .context("Failed writing cleaned CSV header")?;
    for record in records {
        writer
            .write_record(record.to_fields())
            .with_context(|| {
                format!("Failed writing cleaned record for NPI {}", record.common.npi)
            })?;
    }
    writer.flush().context("Failed flushing cleaned CSV writer")?;
    Ok(())
}

pub fn export_cleaned_csv(output_path: &Path, records: &[CleanedRecord]) -> Result<()> {
    write_atomically(output_path, "cleaned_output.csv", |out| {
        write_cleaned_csv(out, records)
    })?;
    debug!(
        path = %output_path.display(),
        records = records.len(),
        "wrote cleaned provider CSV"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::load_registry;

    const HEADER: &str = "NPI,Provider First Name,Provider Last Name (Legal Name),\
Authorized Official First Name,Authorized Official Last Name,\
Provider Business Practice Location Telephone Number,\
Provider Business Mailing Address Telephone Number";

    fn table(rows: &[&str]) -> RegistryTable {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv.push('\n');
        load_registry(csv.as_bytes()).unwrap()
    }

    #[test]
    fn individual_name_wins_when_complete() {
        let table = table(&["1,Jane,Doe,John,Smith,,"]);
        let row = table.rows().next().unwrap();
        assert_eq!(resolve_name(&row), ("Jane", "Doe"));
    }

    #[test]
    fn official_name_used_when_individual_incomplete() {
        let table = table(&["1,,Doe,John,Smith,,"]);
        let row = table.rows().next().unwrap();
        assert_eq!(resolve_name(&row), ("John", "Smith"));
    }

    #[test]
    fn official_name_is_not_mixed_with_individual() {
        let table = table(&["1,Jane,,,Smith,,"]);
        let row = table.rows().next().unwrap();
        assert_eq!(resolve_name(&row), ("", "Smith"));
    }

    #[test]
    fn phone_falls_back_to_mailing() {
        let table = table(&["1,,,,,,555-1234", "2,,,,,555-9999,555-1234", "3,,,,,,"]);
        let phones: Vec<&str> = table.rows().map(|r| resolve_phone(&r)).collect();
        assert_eq!(phones, vec!["555-1234", "555-9999", ""]);
    }

    #[test]
    fn matching_addresses_yield_single_practice_record() {
        let csv = "NPI,Provider First Line Business Practice Location Address,\
Provider First Line Business Mailing Address\n\
1,12 Elm St.,12 ELM ST\n";
        let table = load_registry(csv.as_bytes()).unwrap();

        let records = expand_row(&table.rows().next().unwrap());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address_type, AddressType::Practice);
        assert_eq!(records[0].address.line_1, "12 Elm St.");
    }

    #[test]
    fn differing_addresses_yield_practice_then_mailing() {
        let csv = "NPI,Provider First Line Business Practice Location Address,\
Provider First Line Business Mailing Address,Healthcare Provider Taxonomy Code_2\n\
1,12 Elm St,PO Box 9,207Q00000X\n";
        let table = load_registry(csv.as_bytes()).unwrap();

        let records = expand_row(&table.rows().next().unwrap());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].address_type, AddressType::Practice);
        assert_eq!(records[0].address.line_1, "12 Elm St");
        assert_eq!(records[1].address_type, AddressType::Mailing);
        assert_eq!(records[1].address.line_1, "PO Box 9");
        assert_eq!(records[0].common, records[1].common);
        assert_eq!(records[0].common.taxonomy.as_slice()[0], "207Q00000X");
    }

    #[test]
    fn every_row_expands_to_one_or_two_records() {
        let csv = "NPI,Provider Business Practice Location City Name,\
Provider Business Mailing Address City Name\n\
1,Austin,Austin\n2,Austin,Dallas\n3,,\n";
        let table = load_registry(csv.as_bytes()).unwrap();

        let records = expand_registry(&table);

        assert_eq!(records.len(), 4);
        let npis: Vec<&str> = records.iter().map(|r| r.common.npi.as_str()).collect();
        assert_eq!(npis, vec!["1", "2", "2", "3"]);
    }

    #[test]
    fn cleaned_csv_header_order() {
        let header = cleaned_header();
        assert_eq!(header.len(), 9 + 15 + 5);
        assert_eq!(header[0], "NPI");
        assert_eq!(header[8], "Phone Number");
        assert_eq!(header[9], "Taxonomy Code_1");
        assert_eq!(header[23], "Taxonomy Code_15");
        assert_eq!(header[24], "Street Address");
        assert_eq!(header[28], "Address Type");
    }

    #[test]
    fn cleaned_csv_rows_match_header_width() {
        let table = table(&["1,Jane,Doe,,,555-0000,"]);
        let records = expand_registry(&table);
        let mut out = Vec::new();

        write_cleaned_csv(&mut out, &records).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1,Jane,Doe,,,,,,555-0000,,,,,,,,,,,,,,,,,,,,BP");
    }
}
