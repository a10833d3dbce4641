//! Dataset health check: verifies every configured dataset loads and
//! reports how much of it the distance filters can actually use.

use crate::cli::CheckArgs;
use crate::config::AppConfig;
use crate::output::OutputWriter;
use anyhow::Result;
use chargescout_data::catalog::DatasetCatalog;
use console::style;

pub fn execute(args: CheckArgs, config: &AppConfig, _output: &OutputWriter) -> Result<()> {
    println!("\n{}", style("Chargescout Dataset Check").bold().underlined());
    println!("{}", style("═".repeat(60)).dim());
    println!();

    let catalog = DatasetCatalog::with_files(&config.data_dir, config.files.clone());

    let mut checks_passed = 0;
    let mut total_checks = 0;

    total_checks += 1;
    if catalog.data_dir().is_dir() {
        println!(
            "{} Data directory: {}",
            style("✓").green(),
            catalog.data_dir().display()
        );
        checks_passed += 1;
    } else {
        println!(
            "{} Data directory: {} does not exist",
            style("✗").red(),
            catalog.data_dir().display()
        );
        println!("  → Pass --data-dir or set CHARGESCOUT_DATA_DIR");
    }

    let files = catalog.files().clone();
    let point_datasets = [
        ("Existing EV chargers", files.existing_chargers.clone(), catalog.existing_chargers()),
        ("Petrol stations", files.petrol_stations.clone(), catalog.petrol_stations()),
        ("Traffic counts", files.traffic_counts.clone(), catalog.traffic_counts()),
        ("Proposed investment", files.proposed_investment.clone(), catalog.proposed_investment()),
        ("Metro plug forecast", files.metro_forecast.clone(), catalog.metro_forecast()),
        ("Approved chargers", files.approved_chargers.clone(), catalog.approved_chargers()),
    ];

    for (label, file, loaded) in point_datasets {
        total_checks += 1;
        match loaded {
            Ok(records) => {
                let usable = records.iter().filter(|r| r.location().is_some()).count();
                println!(
                    "{} {}: {} rows, {} with usable coordinates",
                    style("✓").green(),
                    label,
                    records.len(),
                    usable
                );
                if usable < records.len() {
                    println!(
                        "  {} {} rows will be skipped by distance filters",
                        style("⚠").yellow(),
                        records.len() - usable
                    );
                }
                if args.verbose {
                    println!("  {}", style(catalog.path_of(&file).display()).dim());
                }
                checks_passed += 1;
            }
            Err(error) => println!("{} {}: {}", style("✗").red(), label, error),
        }
    }

    total_checks += 1;
    match catalog.grid_assets() {
        Ok(records) => {
            let with_start = records.iter().filter(|r| r.start().is_some()).count();
            let with_end = records.iter().filter(|r| r.end().is_some()).count();
            println!(
                "{} Grid assets: {} rows, {} with a start point, {} with an end point",
                style("✓").green(),
                records.len(),
                with_start,
                with_end
            );
            if args.verbose {
                println!("  {}", style(catalog.path_of(&files.grid_assets).display()).dim());
            }
            checks_passed += 1;
        }
        Err(error) => println!("{} Grid assets: {}", style("✗").red(), error),
    }

    total_checks += 1;
    match catalog.regional_forecast() {
        Ok(records) => {
            println!(
                "{} Regional plug forecast: {} usable zones",
                style("✓").green(),
                records.len()
            );
            checks_passed += 1;
        }
        Err(error) => println!("{} Regional plug forecast: {}", style("✗").red(), error),
    }

    total_checks += 1;
    match catalog.postcode_index() {
        Ok(index) => {
            println!(
                "{} Postcode index: {} postcodes",
                style("✓").green(),
                index.len()
            );
            checks_passed += 1;
        }
        Err(error) => println!("{} Postcode index: {}", style("✗").red(), error),
    }

    total_checks += 1;
    match catalog.ev_registrations() {
        Ok(rows) => {
            println!("{} EV registrations: {} rows", style("✓").green(), rows.len());
            checks_passed += 1;
        }
        Err(error) => println!("{} EV registrations: {}", style("✗").red(), error),
    }

    println!();
    println!("{}", style("═".repeat(60)).dim());

    let percentage = (checks_passed as f64 / total_checks as f64 * 100.0) as usize;
    let status_icon = if percentage >= 80 {
        style("✓").green()
    } else if percentage >= 50 {
        style("⚠").yellow()
    } else {
        style("✗").red()
    };

    println!(
        "{} Overall Status: {}/{} checks passed ({}%)",
        status_icon, checks_passed, total_checks, percentage
    );
    println!();

    if checks_passed < total_checks {
        println!(
            "{}",
            style("Some datasets are unusable. Fix the paths above before analyzing.").yellow()
        );
    } else {
        println!("{}", style("All datasets are present and usable.").green());
    }

    Ok(())
}
