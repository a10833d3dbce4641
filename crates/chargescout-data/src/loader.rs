//! CSV readers for the chargescout dataset shapes.
//!
//! The sources disagree on coordinate column names (`latitude`,
//! `wgs84_latitude`, `Latitude`, ...), so each reader locates its
//! coordinate columns by case-insensitive alias matching, parses them into
//! typed optional fields, and carries every other column through as-is.
//!
//! Rows with unusable coordinate cells still load (the engine skips them
//! per operation); only a missing coordinate *column* fails a dataset.

use crate::error::{DataError, Result};
use chargescout_core::models::{GeoPoint, PointRecord, SegmentRecord, ZonedRecord};
use csv::StringRecord;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// A plain row for datasets the engine never measures distances on.
pub type Row = BTreeMap<String, String>;

/// Accepted spellings for each coordinate column, matched case-insensitively.
pub const LATITUDE_ALIASES: &[&str] = &["latitude", "lat", "wgs84_latitude"];
pub const LONGITUDE_ALIASES: &[&str] = &["longitude", "lon", "lng", "wgs84_longitude"];
pub const LATITUDE_END_ALIASES: &[&str] = &["latitude_end", "lat_end", "wgs84_latitude_end"];
pub const LONGITUDE_END_ALIASES: &[&str] =
    &["longitude_end", "lon_end", "lng_end", "wgs84_longitude_end"];
pub const ZONE_RADIUS_ALIASES: &[&str] = &["zone (km)", "zone_km", "zone_radius_km"];

/// Read a point-tagged dataset.
pub fn read_point_records(path: impl AsRef<Path>) -> Result<Vec<PointRecord>> {
    let path = path.as_ref();
    let (mut reader, headers) = open(path)?;
    let latitude = require_column(&headers, LATITUDE_ALIASES, path)?;
    let longitude = require_column(&headers, LONGITUDE_ALIASES, path)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = csv_row(row, path)?;
        records.push(PointRecord {
            latitude: numeric_cell(&row, latitude),
            longitude: numeric_cell(&row, longitude),
            fields: remaining_fields(&headers, &row, &[latitude, longitude]),
        });
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "loaded point dataset");
    Ok(records)
}

/// Read a span-tagged dataset. The end-point columns are optional; when a
/// dataset has none, every record is judged on its start point alone.
pub fn read_segment_records(path: impl AsRef<Path>) -> Result<Vec<SegmentRecord>> {
    let path = path.as_ref();
    let (mut reader, headers) = open(path)?;
    let latitude = require_column(&headers, LATITUDE_ALIASES, path)?;
    let longitude = require_column(&headers, LONGITUDE_ALIASES, path)?;
    let latitude_end = find_column(&headers, LATITUDE_END_ALIASES);
    let longitude_end = find_column(&headers, LONGITUDE_END_ALIASES);

    let mut coordinate_columns = vec![latitude, longitude];
    coordinate_columns.extend(latitude_end);
    coordinate_columns.extend(longitude_end);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = csv_row(row, path)?;
        records.push(SegmentRecord {
            latitude: numeric_cell(&row, latitude),
            longitude: numeric_cell(&row, longitude),
            latitude_end: latitude_end.and_then(|index| numeric_cell(&row, index)),
            longitude_end: longitude_end.and_then(|index| numeric_cell(&row, index)),
            fields: remaining_fields(&headers, &row, &coordinate_columns),
        });
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "loaded segment dataset");
    Ok(records)
}

/// Read a zone-tagged dataset. Location and zone radius are required per
/// record; rows without usable values are skipped with a warning.
pub fn read_zoned_records(path: impl AsRef<Path>) -> Result<Vec<ZonedRecord>> {
    let path = path.as_ref();
    let (mut reader, headers) = open(path)?;
    let latitude = require_column(&headers, LATITUDE_ALIASES, path)?;
    let longitude = require_column(&headers, LONGITUDE_ALIASES, path)?;
    let zone = require_column(&headers, ZONE_RADIUS_ALIASES, path)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = csv_row(row, path)?;
        let location = numeric_cell(&row, latitude)
            .zip(numeric_cell(&row, longitude))
            .and_then(|(lat, lon)| GeoPoint::new(lat, lon).ok());
        let zone_radius_km = numeric_cell(&row, zone).filter(|radius| *radius >= 0.0);

        match (location, zone_radius_km) {
            (Some(location), Some(zone_radius_km)) => records.push(ZonedRecord {
                location,
                zone_radius_km,
                fields: remaining_fields(&headers, &row, &[latitude, longitude, zone]),
            }),
            _ => {
                // Header is line 1, so data row N sits on line N + 1.
                tracing::warn!(
                    path = %path.display(),
                    line = index + 2,
                    "skipping zoned row without a usable location and zone radius"
                );
            }
        }
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "loaded zoned dataset");
    Ok(records)
}

/// Read a dataset as plain rows, keyed by header name.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let (mut reader, headers) = open(path)?;

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = csv_row(row, path)?;
        rows.push(remaining_fields(&headers, &row, &[]));
    }
    Ok(rows)
}

/// Rows whose `column` value equals `value`, compared after trimming.
pub fn filter_rows_by_column<'a>(rows: &'a [Row], column: &str, value: &str) -> Vec<&'a Row> {
    rows.iter()
        .filter(|row| {
            row.get(column)
                .map(|cell| cell.trim() == value.trim())
                .unwrap_or(false)
        })
        .collect()
}

/// Open a CSV reader and pull its header row. Ragged rows are tolerated;
/// short rows read as missing cells.
pub(crate) fn open(path: &Path) -> Result<(csv::Reader<File>, StringRecord)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let headers = reader
        .headers()
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    Ok((reader, headers))
}

fn csv_row(row: csv::Result<StringRecord>, path: &Path) -> Result<StringRecord> {
    row.map_err(|source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Index of the first header matching one of `aliases`.
pub(crate) fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim();
        aliases.iter().any(|alias| header.eq_ignore_ascii_case(alias))
    })
}

pub(crate) fn require_column(
    headers: &StringRecord,
    aliases: &[&str],
    path: &Path,
) -> Result<usize> {
    find_column(headers, aliases).ok_or_else(|| DataError::MissingColumn {
        path: path.to_path_buf(),
        column: aliases[0].to_string(),
    })
}

fn numeric_cell(row: &StringRecord, index: usize) -> Option<f64> {
    let cell = row.get(index)?.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok()
}

/// Every column except the already-extracted coordinate ones, keyed by its
/// trimmed header name.
fn remaining_fields(
    headers: &StringRecord,
    row: &StringRecord,
    coordinate_columns: &[usize],
) -> BTreeMap<String, String> {
    headers
        .iter()
        .enumerate()
        .filter(|(index, _)| !coordinate_columns.contains(index))
        .map(|(index, header)| {
            (
                header.trim().to_string(),
                row.get(index).unwrap_or_default().trim().to_string(),
            )
        })
        .collect()
}
