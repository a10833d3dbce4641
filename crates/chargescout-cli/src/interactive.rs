//! Interactive prompt flow for the analyze command.

use crate::commands::analyze::AnalyzeInputs;
use crate::config::AppConfig;
use anyhow::Result;
use dialoguer::{Input, Select};

/// Postcode range covered by the NSW datasets.
const POSTCODE_RANGE: std::ops::RangeInclusive<u32> = 1001..=4385;

pub fn analyze_inputs(config: &AppConfig) -> Result<AnalyzeInputs> {
    let modes = vec![
        "Coordinates - for precise analysis",
        "Postcode - for holistic analysis",
    ];
    let mode = Select::new()
        .with_prompt("Search by")
        .items(&modes)
        .default(0)
        .interact()?;

    let (latitude, longitude) = if mode == 0 {
        let latitude: f64 = Input::new()
            .with_prompt("Latitude")
            .default(-33.778375)
            .interact()?;
        let longitude: f64 = Input::new()
            .with_prompt("Longitude")
            .default(150.815781)
            .interact()?;
        (Some(latitude), Some(longitude))
    } else {
        (None, None)
    };

    // The postcode is asked for in both modes; it also selects the EV
    // registration rows to report.
    let postcode: u32 = Input::new()
        .with_prompt("Postcode")
        .default(2000)
        .validate_with(|input: &u32| {
            if POSTCODE_RANGE.contains(input) {
                Ok(())
            } else {
                Err("NSW postcodes are between 1001 and 4385")
            }
        })
        .interact()?;

    let radius_km: f64 = Input::new()
        .with_prompt("Radius in kilometers")
        .default(config.radius_km)
        .validate_with(|input: &f64| {
            if *input >= 0.0 {
                Ok(())
            } else {
                Err("The radius cannot be negative")
            }
        })
        .interact()?;

    Ok(AnalyzeInputs {
        latitude,
        longitude,
        postcode: Some(postcode),
        radius_km,
        cutoff_km: config.cutoff_km,
    })
}
