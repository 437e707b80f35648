mod bootstrap;

use anyhow::{Context, Result};
use hours_core::models::{EstimateRow, NormalizedRecord};
use hours_core::settings::{Mode, Settings};
use hours_data::analysis::{analyze_feed, estimate_from_records};
use hours_report::csv_export::{save_estimates, save_records};
use hours_report::table_view::render_records_table;

fn main() -> Result<()> {
    let settings = Settings::load()?;
    bootstrap::setup_logging(&settings.log_level)?;

    let mode = settings.mode()?;
    tracing::info!("ticket-hours v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Mode: {}, input: {}", mode, settings.input.display());

    match mode {
        Mode::Parse | Mode::All => {
            let analysis = analyze_feed(&settings.input)
                .with_context(|| format!("cannot process feed {}", settings.input.display()))?;

            print_records(&analysis.records, &settings);

            // Nothing is written until the whole feed has been processed.
            save_records(&settings.records_out, &analysis.records)?;
            println!("\nCSV written to: {}", settings.records_out.display());

            if mode.writes_estimates() {
                write_estimates(&analysis.estimates, &settings)?;
            }
        }

        Mode::Estimate => {
            let estimates = estimate_from_records(&settings.input).with_context(|| {
                format!("cannot estimate from {}", settings.input.display())
            })?;
            write_estimates(&estimates, &settings)?;
        }
    }

    Ok(())
}

fn print_records(records: &[NormalizedRecord], settings: &Settings) {
    println!("Parsed {} activity entries.\n", records.len());
    if !settings.no_preview {
        print!("{}", render_records_table(records));
    }
}

fn write_estimates(estimates: &[EstimateRow], settings: &Settings) -> Result<()> {
    save_estimates(&settings.estimates_out, estimates)?;
    println!(
        "Written {} rows -> {}",
        estimates.len(),
        settings.estimates_out.display()
    );
    Ok(())
}
