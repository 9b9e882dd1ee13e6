use clap::Parser;

use crate::constants::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_CSV, DEFAULT_TAXONOMY_SUMMARY_CSV};
use crate::pipeline::CleanerConfig;

#[derive(Debug, Parser)]
#[command(name = "clean_npi_dataset")]
#[command(about = "Clean an NPPES provider extract into practice/mailing rows plus a taxonomy summary")]
pub struct Args {
    /// NPPES CSV extract to clean.
    #[arg(long, default_value = DEFAULT_INPUT_PATH)]
    pub input_path: std::path::PathBuf,

    /// Cleaned provider CSV output path. Parent directory is created if missing.
    #[arg(long, default_value = DEFAULT_OUTPUT_CSV)]
    pub output_csv: std::path::PathBuf,

    /// Taxonomy code frequency CSV output path. Parent directory is created if missing.
    #[arg(long, default_value = DEFAULT_TAXONOMY_SUMMARY_CSV)]
    pub taxonomy_summary_csv: std::path::PathBuf,
}

impl Args {
    pub fn into_config(self) -> CleanerConfig {
        CleanerConfig {
            input_path: self.input_path,
            output_csv: self.output_csv,
            taxonomy_summary_csv: self.taxonomy_summary_csv,
        }
    }
}
