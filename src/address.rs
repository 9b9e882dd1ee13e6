use std::fmt;

use crate::constants::{
    COL_MAILING_CITY, COL_MAILING_LINE_1, COL_MAILING_LINE_2, COL_MAILING_POSTAL_CODE,
    COL_MAILING_STATE, COL_PRACTICE_CITY, COL_PRACTICE_LINE_1, COL_PRACTICE_LINE_2,
    COL_PRACTICE_POSTAL_CODE, COL_PRACTICE_STATE,
};
use crate::registry::RegistryRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// Business practice location.
    Practice,
    /// Business mailing address.
    Mailing,
}

impl AddressType {
    pub fn code(self) -> &'static str {
        match self {
            AddressType::Practice => "BP",
            AddressType::Mailing => "BM",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw address fields, exactly as they appear in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBlock {
    pub line_1: String,
    pub line_2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl AddressBlock {
    pub fn practice(row: &RegistryRow<'_>) -> Self {
        Self {
            line_1: row.field(COL_PRACTICE_LINE_1).to_string(),
            line_2: row.field(COL_PRACTICE_LINE_2).to_string(),
            city: row.field(COL_PRACTICE_CITY).to_string(),
            state: row.field(COL_PRACTICE_STATE).to_string(),
            postal_code: row.field(COL_PRACTICE_POSTAL_CODE).to_string(),
        }
    }

    pub fn mailing(row: &RegistryRow<'_>) -> Self {
        Self {
            line_1: row.field(COL_MAILING_LINE_1).to_string(),
            line_2: row.field(COL_MAILING_LINE_2).to_string(),
            city: row.field(COL_MAILING_CITY).to_string(),
            state: row.field(COL_MAILING_STATE).to_string(),
            postal_code: row.field(COL_MAILING_POSTAL_CODE).to_string(),
        }
    }

    /// Comparison key for deciding whether two blocks describe the same place.
    /// Never used for output.
    pub fn normalized(&self) -> String {
        [
            &self.line_1,
            &self.line_2,
            &self.city,
            &self.state,
            &self.postal_code,
        ]
        .iter()
        .map(|field| normalize_field(field))
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn same_place_as(&self, other: &AddressBlock) -> bool {
        self.normalized() == other.normalized()
    }
}

fn normalize_field(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .collect()
}
