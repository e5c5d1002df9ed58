use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ifc_quantities::config::Config;
use ifc_quantities::export::export_json;
use ifc_quantities::extract::extract_file;

#[derive(Parser, Debug)]
#[command(name = "ifc-quantities")]
#[command(about = "Extract quantities, materials and MEP systems from an IFC file")]
#[command(version)]
struct Args {
    /// Path to IFC file
    #[arg(required = true)]
    input: PathBuf,

    /// Path of the JSON report to write
    #[arg(required = true)]
    output: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let result = extract_file(&args.input, &config)?;
    export_json(&result, &args.output)?;

    eprintln!(
        "OK: {} structural + {} MEP elements, parsed in {}ms",
        result.quantity_summary.total_elements,
        result.quantity_summary.total_mep_elements,
        result.parse_time_ms
    );
    Ok(())
}
