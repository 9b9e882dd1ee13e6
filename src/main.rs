use anyhow::{Context, Result};
use clap::Parser;

use clean_npi_dataset::args::Args;
use clean_npi_dataset::pipeline;

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Args::parse().into_config();
    pipeline::run(&config).context("cleaning failed")?;

    println!(
        "Cleaning completed. Files saved in {} and {}.",
        config.output_csv.display(),
        config.taxonomy_summary_csv.display()
    );
    Ok(())
}
