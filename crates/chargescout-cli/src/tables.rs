//! Shapes engine results into column/row form for the table renderer.
//!
//! Every dataset carries its own columns, so tables are built dynamically:
//! the descriptive fields first (in column-name order), coordinates where
//! present, and the derived values last.

use chargescout_core::models::{DistanceAnnotatedRecord, SegmentRecord, ZonedRecord};
use chargescout_data::loader::Row;

pub type TableData = (Vec<String>, Vec<Vec<String>>);

/// Annotated point matches: fields, coordinates (unless stripped), distance.
pub fn annotated_table(records: &[DistanceAnnotatedRecord]) -> TableData {
    let Some(first) = records.first() else {
        return (Vec::new(), Vec::new());
    };
    let field_columns: Vec<String> = first.fields.keys().cloned().collect();
    let include_coordinates = records
        .iter()
        .any(|record| record.latitude.is_some() || record.longitude.is_some());

    let mut columns = field_columns.clone();
    if include_coordinates {
        columns.push("latitude".to_string());
        columns.push("longitude".to_string());
    }
    columns.push("distance_km".to_string());

    let rows = records
        .iter()
        .map(|record| {
            let mut row = field_cells(&record.fields, &field_columns);
            if include_coordinates {
                row.push(coordinate_cell(record.latitude));
                row.push(coordinate_cell(record.longitude));
            }
            row.push(format!("{:.2}", record.distance_km));
            row
        })
        .collect();

    (columns, rows)
}

/// A single forecast match: descriptive fields plus the distance, without
/// the raw coordinates.
pub fn forecast_table(record: &DistanceAnnotatedRecord) -> TableData {
    let field_columns: Vec<String> = record.fields.keys().cloned().collect();

    let mut columns = field_columns.clone();
    columns.push("distance_km".to_string());

    let mut row = field_cells(&record.fields, &field_columns);
    row.push(format!("{:.2}", record.distance_km));

    (columns, vec![row])
}

/// A single zone match: descriptive fields, location, and the zone radius
/// that contained the origin.
pub fn zoned_table(record: &ZonedRecord) -> TableData {
    let field_columns: Vec<String> = record.fields.keys().cloned().collect();

    let mut columns = field_columns.clone();
    columns.push("latitude".to_string());
    columns.push("longitude".to_string());
    columns.push("zone_km".to_string());

    let mut row = field_cells(&record.fields, &field_columns);
    row.push(coordinate_cell(Some(record.location.latitude())));
    row.push(coordinate_cell(Some(record.location.longitude())));
    row.push(format!("{}", record.zone_radius_km));

    (columns, vec![row])
}

/// Segment matches: fields plus both endpoints.
pub fn segment_table(records: &[SegmentRecord]) -> TableData {
    let Some(first) = records.first() else {
        return (Vec::new(), Vec::new());
    };
    let field_columns: Vec<String> = first.fields.keys().cloned().collect();

    let mut columns = field_columns.clone();
    for coordinate in ["latitude", "longitude", "latitude_end", "longitude_end"] {
        columns.push(coordinate.to_string());
    }

    let rows = records
        .iter()
        .map(|record| {
            let mut row = field_cells(&record.fields, &field_columns);
            row.push(coordinate_cell(record.latitude));
            row.push(coordinate_cell(record.longitude));
            row.push(coordinate_cell(record.latitude_end));
            row.push(coordinate_cell(record.longitude_end));
            row
        })
        .collect();

    (columns, rows)
}

/// Plain rows, keyed by the first row's columns.
pub fn row_table(rows: &[Row]) -> TableData {
    let Some(first) = rows.first() else {
        return (Vec::new(), Vec::new());
    };
    let columns: Vec<String> = first.keys().cloned().collect();

    let cells = rows
        .iter()
        .map(|row| field_cells(row, &columns))
        .collect();

    (columns, cells)
}

fn field_cells(fields: &Row, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|column| fields.get(column).cloned().unwrap_or_default())
        .collect()
}

fn coordinate_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_default()
}
