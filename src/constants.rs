pub const DEFAULT_INPUT_PATH: &str = "sample_data/NPI_Sample_200_Records.csv";
pub const DEFAULT_OUTPUT_CSV: &str = "output/cleaned_output_example.csv";
pub const DEFAULT_TAXONOMY_SUMMARY_CSV: &str = "summary/taxonomy_counts.csv";

/// Number of `Healthcare Provider Taxonomy Code_N` columns in an NPPES extract.
pub const TAXONOMY_SLOTS: usize = 15;

pub const COL_NPI: &str = "NPI";
pub const COL_FIRST_NAME: &str = "Provider First Name";
pub const COL_LAST_NAME: &str = "Provider Last Name (Legal Name)";
pub const COL_OFFICIAL_FIRST_NAME: &str = "Authorized Official First Name";
pub const COL_OFFICIAL_LAST_NAME: &str = "Authorized Official Last Name";
pub const COL_CREDENTIAL: &str = "Provider Credential Text";
pub const COL_ORGANIZATION_NAME: &str = "Provider Organization Name (Legal Business Name)";
pub const COL_ENUMERATION_DATE: &str = "Provider Enumeration Date";
pub const COL_LICENSE_NUMBER: &str = "Provider License Number_1";
pub const COL_LICENSE_STATE: &str = "Provider License Number State Code_1";

pub const COL_PRACTICE_LINE_1: &str = "Provider First Line Business Practice Location Address";
pub const COL_PRACTICE_LINE_2: &str = "Provider Second Line Business Practice Location Address";
pub const COL_PRACTICE_CITY: &str = "Provider Business Practice Location City Name";
pub const COL_PRACTICE_STATE: &str = "Provider Business Practice Location State Name";
pub const COL_PRACTICE_POSTAL_CODE: &str = "Provider Business Practice Location Postal Code";
pub const COL_PRACTICE_PHONE: &str = "Provider Business Practice Location Telephone Number";

pub const COL_MAILING_LINE_1: &str = "Provider First Line Business Mailing Address";
pub const COL_MAILING_LINE_2: &str = "Provider Second Line Business Mailing Address";
pub const COL_MAILING_CITY: &str = "Provider Business Mailing Address City Name";
pub const COL_MAILING_STATE: &str = "Provider Business Mailing Address State Name";
pub const COL_MAILING_POSTAL_CODE: &str = "Provider Business Mailing Address Postal Code";
pub const COL_MAILING_PHONE: &str = "Provider Business Mailing Address Telephone Number";

pub const TAXONOMY_COLUMN_PREFIX: &str = "Healthcare Provider Taxonomy Code_";
pub const TAXONOMY_OUTPUT_PREFIX: &str = "Taxonomy Code_";

pub const OUT_NPI: &str = "NPI";
pub const OUT_FIRST_NAME: &str = "First Name";
pub const OUT_LAST_NAME: &str = "Last Name";
pub const OUT_CREDENTIAL: &str = "Credential";
pub const OUT_ORGANIZATION_NAME: &str = "Organization Name";
pub const OUT_ENUMERATION_DATE: &str = "Enumeration Date";
pub const OUT_LICENSE_NUMBER: &str = "License Number";
pub const OUT_LICENSE_STATE: &str = "License State";
pub const OUT_PHONE_NUMBER: &str = "Phone Number";
pub const OUT_STREET_ADDRESS: &str = "Street Address";
pub const OUT_CITY: &str = "City";
pub const OUT_STATE: &str = "State";
pub const OUT_ZIP_CODE: &str = "Zip Code";
pub const OUT_ADDRESS_TYPE: &str = "Address Type";
