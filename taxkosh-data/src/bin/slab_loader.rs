use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use taxkosh_core::AgeCategory;
use taxkosh_data::SlabScheduleLoader;

/// Validate a slab schedule CSV file and print the regime it builds.
///
/// The CSV file should have the following columns:
/// - fiscal_year: The fiscal year (e.g., 2024-25)
/// - category: The age category code (below_60, senior, super_senior)
/// - lower_bound: The income level where the slab starts
/// - upper_bound: The income level where it ends (empty for unbounded)
/// - rate: The marginal rate as a percentage (e.g., 5 for 5%)
#[derive(Parser, Debug)]
#[command(name = "slab-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing slab schedule data
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Loading slab schedules from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = SlabScheduleLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let regime = SlabScheduleLoader::build_regime(&records, &taxkosh_core::TaxRegime::fy_2024_25())
        .context("Failed to assemble a regime from the records")?;

    println!("Regime for FY {}:", regime.fiscal_year);
    for category in AgeCategory::ALL {
        let schedule = regime.schedule_for(category);
        println!("  {} ({}):", category.label(), category.as_str());
        for slab in schedule.slabs() {
            match slab.upper_bound {
                Some(upper) => println!(
                    "    {:>12} - {:>12}  @ {}%",
                    slab.lower_bound, upper, slab.rate_percent
                ),
                None => println!(
                    "    {:>12} and above     @ {}%",
                    slab.lower_bound, slab.rate_percent
                ),
            }
        }
        println!(
            "    basic exemption limit: {}",
            schedule.basic_exemption_limit()
        );
    }

    Ok(())
}
