//! The analysis pass: resolve an origin, run every dataset through its
//! matching engine operation, and render the report.

use crate::cli::AnalyzeArgs;
use crate::config::AppConfig;
use crate::interactive;
use crate::output::OutputWriter;
use crate::summary::{summarize_traffic, traffic_summary_table, TrafficSummaryRow};
use crate::tables;
use anyhow::{bail, Context, Result};
use chargescout_core::models::{
    DistanceAnnotatedRecord, GeoPoint, SegmentRecord, ZonedRecord,
};
use chargescout_core::spatial::{
    filter_segments_within_radius, filter_within_radius, find_first_in_zone, find_nearest,
    RadiusOptions,
};
use chargescout_data::catalog::DatasetCatalog;
use chargescout_data::loader::{filter_rows_by_column, Row};
use chrono::{DateTime, Local};
use serde::Serialize;

/// The resolved user inputs for one analysis pass.
#[derive(Debug, Clone)]
pub struct AnalyzeInputs {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub postcode: Option<u32>,
    pub radius_km: f64,
    pub cutoff_km: f64,
}

/// Everything one analysis pass produced, in rendering order.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Local>,
    pub origin: GeoPoint,
    pub radius_km: f64,
    pub cutoff_km: f64,
    pub postcode: Option<u32>,
    pub existing_chargers: Vec<DistanceAnnotatedRecord>,
    pub petrol_stations: Vec<DistanceAnnotatedRecord>,
    pub traffic_counts: Vec<DistanceAnnotatedRecord>,
    pub traffic_summary: Vec<TrafficSummaryRow>,
    pub ev_registrations: Option<Vec<Row>>,
    pub proposed_investment: Vec<DistanceAnnotatedRecord>,
    pub grid_assets: Vec<SegmentRecord>,
    pub metro_forecast: Option<DistanceAnnotatedRecord>,
    pub regional_forecast: Option<ZonedRecord>,
    pub approved_chargers: Vec<DistanceAnnotatedRecord>,
}

pub fn execute(args: AnalyzeArgs, config: &AppConfig, output: &OutputWriter) -> Result<()> {
    let inputs = if args.interactive {
        interactive::analyze_inputs(config)?
    } else {
        AnalyzeInputs {
            latitude: args.lat,
            longitude: args.lon,
            postcode: args.postcode,
            radius_km: args.radius.unwrap_or(config.radius_km),
            cutoff_km: args.cutoff.unwrap_or(config.cutoff_km),
        }
    };

    let catalog = DatasetCatalog::with_files(&config.data_dir, config.files.clone());
    let origin = resolve_origin(&inputs, &catalog)?;

    let options = RadiusOptions {
        strip_coordinates: args.no_coordinates,
    };
    let radius_km = inputs.radius_km;
    let cutoff_km = inputs.cutoff_km;

    let existing_chargers =
        filter_within_radius(&catalog.existing_chargers()?, origin, radius_km, options)?;
    let petrol_stations =
        filter_within_radius(&catalog.petrol_stations()?, origin, radius_km, options)?;
    let traffic_counts =
        filter_within_radius(&catalog.traffic_counts()?, origin, radius_km, options)?;
    let traffic_summary = summarize_traffic(&traffic_counts);
    let proposed_investment =
        filter_within_radius(&catalog.proposed_investment()?, origin, radius_km, options)?;
    let approved_chargers =
        filter_within_radius(&catalog.approved_chargers()?, origin, radius_km, options)?;

    let grid_assets: Vec<SegmentRecord> =
        filter_segments_within_radius(&catalog.grid_assets()?, origin, radius_km)?
            .into_iter()
            .cloned()
            .collect();

    let metro_forecast = find_nearest(&catalog.metro_forecast()?, origin, cutoff_km)?;
    let regional_forecast = find_first_in_zone(&catalog.regional_forecast()?, origin).cloned();

    let ev_registrations = match inputs.postcode {
        Some(postcode) => {
            let rows = catalog.ev_registrations()?;
            Some(
                filter_rows_by_column(&rows, "Postcode", &postcode.to_string())
                    .into_iter()
                    .cloned()
                    .collect(),
            )
        }
        None => None,
    };

    let report = AnalysisReport {
        generated_at: Local::now(),
        origin,
        radius_km,
        cutoff_km,
        postcode: inputs.postcode,
        existing_chargers,
        petrol_stations,
        traffic_counts,
        traffic_summary,
        ev_registrations,
        proposed_investment,
        grid_assets,
        metro_forecast,
        regional_forecast,
        approved_chargers,
    };

    if output.is_json() {
        return output.result(&report);
    }
    render(&report, output);
    Ok(())
}

/// Pick the reference point: explicit coordinates win, then a resolved
/// postcode. An unusable origin is fatal to the whole request.
fn resolve_origin(inputs: &AnalyzeInputs, catalog: &DatasetCatalog) -> Result<GeoPoint> {
    match (inputs.latitude, inputs.longitude) {
        (Some(latitude), Some(longitude)) => {
            return GeoPoint::new(latitude, longitude)
                .context("The reference point is not a usable coordinate");
        }
        (None, None) => {}
        _ => bail!("Both --lat and --lon are required for a coordinate search"),
    }

    let Some(postcode) = inputs.postcode else {
        bail!("Provide --lat/--lon or --postcode, or run with --interactive");
    };

    let index = catalog.postcode_index()?;
    index
        .resolve(postcode)
        .with_context(|| format!("No coordinates found for postcode {}", postcode))
}

fn render(report: &AnalysisReport, output: &OutputWriter) {
    output.section("EV charger potential analysis");
    output.kv(
        "Origin",
        format!(
            "({:.6}, {:.6})",
            report.origin.latitude(),
            report.origin.longitude()
        ),
    );
    output.kv("Radius", format!("{} km", report.radius_km));
    output.kv("Forecast cutoff", format!("{} km", report.cutoff_km));
    if let Some(postcode) = report.postcode {
        output.kv("Postcode", postcode);
    }

    output.section(format!(
        "Existing EV chargers within {} km",
        report.radius_km
    ));
    let (columns, rows) = tables::annotated_table(&report.existing_chargers);
    output.rows(&columns, &rows);

    output.section(format!("Petrol stations within {} km", report.radius_km));
    let (columns, rows) = tables::annotated_table(&report.petrol_stations);
    output.rows(&columns, &rows);

    output.section(format!(
        "Traffic on busy roads within {} km",
        report.radius_km
    ));
    let (columns, rows) = traffic_summary_table(&report.traffic_summary);
    output.rows(&columns, &rows);

    if let Some(postcode) = report.postcode {
        output.section(format!("EV registrations for postcode {}", postcode));
        match report.ev_registrations.as_deref() {
            Some([]) | None => {
                output.info(format!("No EV registration data found for postcode {}", postcode));
            }
            Some(rows) => {
                let (columns, cells) = tables::row_table(rows);
                output.rows(&columns, &cells);
            }
        }
    }

    output.section(format!(
        "Proposed grid investment within {} km",
        report.radius_km
    ));
    let (columns, rows) = tables::annotated_table(&report.proposed_investment);
    output.rows(&columns, &rows);

    output.section(format!(
        "Planned grid asset work within {} km",
        report.radius_km
    ));
    let (columns, rows) = tables::segment_table(&report.grid_assets);
    output.rows(&columns, &rows);

    output.section("Future plug demand (metro)");
    match &report.metro_forecast {
        Some(record) => {
            let (columns, rows) = tables::forecast_table(record);
            output.rows(&columns, &rows);
        }
        None => output.warning(format!(
            "No metro forecast record within {} km",
            report.cutoff_km
        )),
    }

    output.section("Future plug demand (regional)");
    match &report.regional_forecast {
        Some(record) => {
            let (columns, rows) = tables::zoned_table(record);
            output.rows(&columns, &rows);
        }
        None => output.warning("No regional forecast zone covers this location"),
    }

    output.section(format!(
        "Approved chargers to be built within {} km",
        report.radius_km
    ));
    let (columns, rows) = tables::annotated_table(&report.approved_chargers);
    output.rows(&columns, &rows);
}
