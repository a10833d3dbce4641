//! Postcode-to-coordinate resolution.

use crate::error::{DataError, Result};
use crate::loader::{open, require_column};
use chargescout_core::models::GeoPoint;
use csv::StringRecord;
use std::collections::HashMap;
use std::path::Path;

const POSTCODE_ALIASES: &[&str] = &["postcode"];
const LATITUDE_ALIASES: &[&str] = &["lat_precise", "latitude", "lat"];
const LONGITUDE_ALIASES: &[&str] = &["long_precise", "longitude", "lon"];

/// Lookup table from postcode to a representative coordinate, built from
/// the postcode coordinates dataset.
#[derive(Debug, Clone, Default)]
pub struct PostcodeIndex {
    entries: HashMap<u32, GeoPoint>,
}

impl PostcodeIndex {
    /// Build the index from a CSV with `postcode`, `Lat_precise` and
    /// `Long_precise` columns. When a postcode appears more than once, the
    /// first row wins.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (mut reader, headers) = open(path)?;

        let postcode = require_column(&headers, POSTCODE_ALIASES, path)?;
        let latitude = require_column(&headers, LATITUDE_ALIASES, path)?;
        let longitude = require_column(&headers, LONGITUDE_ALIASES, path)?;

        let mut entries: HashMap<u32, GeoPoint> = HashMap::new();
        let mut skipped = 0usize;
        for row in reader.records() {
            let row = row.map_err(|source| DataError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

            match parse_entry(&row, postcode, latitude, longitude) {
                Some((postcode, point)) => {
                    entries.entry(postcode).or_insert(point);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(
                path = %path.display(),
                skipped,
                "skipped postcode rows without usable values"
            );
        }
        Ok(Self { entries })
    }

    /// Resolve a postcode to its representative coordinate, if known.
    pub fn resolve(&self, postcode: u32) -> Option<GeoPoint> {
        self.entries.get(&postcode).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(
    row: &StringRecord,
    postcode: usize,
    latitude: usize,
    longitude: usize,
) -> Option<(u32, GeoPoint)> {
    let postcode = row.get(postcode)?.trim().parse::<u32>().ok()?;
    let latitude = row.get(latitude)?.trim().parse::<f64>().ok()?;
    let longitude = row.get(longitude)?.trim().parse::<f64>().ok()?;
    let point = GeoPoint::new(latitude, longitude).ok()?;
    Some((postcode, point))
}
