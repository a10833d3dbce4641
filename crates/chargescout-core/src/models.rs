//! Record models shared across the chargescout crates.
//!
//! Each dataset row keeps its coordinate columns as typed optional fields
//! and every other column as an ordered name-to-value map, so the engine
//! never handles raw untyped cells. Coordinate validity is checked once, at
//! [`GeoPoint`] construction.

use crate::error::{ChargescoutError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// A validated WGS-84 coordinate pair in decimal degrees.
///
/// Immutable once constructed; [`GeoPoint::new`] is the only way to build
/// one, so a `GeoPoint` always carries finite, in-range coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Construct a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let latitude_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let longitude_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if !latitude_ok || !longitude_ok {
            return Err(ChargescoutError::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// One row of a point-tagged dataset (chargers, petrol stations, traffic
/// counts, investment plans, plug forecasts).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Remaining named columns of the row, ordered by column name.
    pub fields: BTreeMap<String, String>,
}

impl PointRecord {
    /// The row's location, if both coordinates are present and valid.
    ///
    /// A missing or out-of-range coordinate yields `None`; bulk operations
    /// skip such rows instead of failing the batch.
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude?, self.longitude?).ok()
    }
}

/// One row of a span-tagged dataset (grid assets running between two
/// points). Either endpoint may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub latitude_end: Option<f64>,
    pub longitude_end: Option<f64>,
    pub fields: BTreeMap<String, String>,
}

impl SegmentRecord {
    /// The span's start point, if present and valid.
    pub fn start(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude?, self.longitude?).ok()
    }

    /// The span's end point, if present and valid.
    pub fn end(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude_end?, self.longitude_end?).ok()
    }
}

/// One row of the regional forecast dataset, carrying its own inclusion
/// radius. The location and zone radius are required; rows without usable
/// values are rejected at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZonedRecord {
    pub location: GeoPoint,
    pub zone_radius_km: f64,
    pub fields: BTreeMap<String, String>,
}

/// A point record annotated with its computed distance from the origin.
///
/// Derived fresh per analysis pass and never written back to a dataset.
/// The source coordinates are carried over unless the caller asked for
/// them to be stripped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceAnnotatedRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_km: f64,
    pub fields: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChargescoutError;

    #[test]
    fn test_geopoint_accepts_valid_coordinates() {
        let point = GeoPoint::new(-33.778375, 150.815781).unwrap();
        assert_eq!(point.latitude(), -33.778375);
        assert_eq!(point.longitude(), 150.815781);
    }

    #[test]
    fn test_geopoint_accepts_boundary_coordinates() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_geopoint_rejects_out_of_range_coordinates() {
        assert!(matches!(
            GeoPoint::new(90.5, 0.0),
            Err(ChargescoutError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.5),
            Err(ChargescoutError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_geopoint_rejects_non_finite_coordinates() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_point_record_location_requires_both_coordinates() {
        let mut record = PointRecord {
            latitude: Some(-33.78),
            longitude: None,
            fields: BTreeMap::new(),
        };
        assert!(record.location().is_none());

        record.longitude = Some(150.81);
        assert!(record.location().is_some());
    }

    #[test]
    fn test_point_record_location_none_for_invalid_coordinates() {
        let record = PointRecord {
            latitude: Some(95.0),
            longitude: Some(150.81),
            fields: BTreeMap::new(),
        };
        assert!(record.location().is_none());
    }

    #[test]
    fn test_segment_record_endpoints_are_independent() {
        let record = SegmentRecord {
            latitude: Some(-33.78),
            longitude: Some(150.81),
            latitude_end: None,
            longitude_end: None,
            fields: BTreeMap::new(),
        };
        assert!(record.start().is_some());
        assert!(record.end().is_none());
    }
}
