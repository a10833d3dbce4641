//! The spatial match engine: the distance primitive, radius filters, and
//! the nearest/zone matchers.
//!
//! Every operation is a pure linear scan over caller-owned records. The
//! datasets are tens of thousands of rows at most, so no spatial index is
//! used and none of the scans mutate their input.

use crate::error::{ChargescoutError, Result};
use crate::models::{
    DistanceAnnotatedRecord, GeoPoint, PointRecord, SegmentRecord, ZonedRecord,
};
use geo::{coord, Distance, Euclidean, Geodesic, Line, Point};

/// Kilometers per degree of arc at the equator. Used to move a kilometer
/// radius into degree space for the planar segment test.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Options for [`filter_within_radius`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RadiusOptions {
    /// Drop the raw coordinate columns from the annotated results. Some
    /// consumers only want the descriptive columns plus `distance_km`.
    pub strip_coordinates: bool,
}

/// Geodesic distance between two points in kilometers, on the WGS-84
/// ellipsoid.
///
/// Symmetric, and zero exactly when both points coincide. Coordinate
/// validity is guaranteed by [`GeoPoint`] construction.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let a = Point::new(a.longitude(), a.latitude());
    let b = Point::new(b.longitude(), b.latitude());
    Geodesic.distance(a, b) / 1000.0
}

/// Records within `radius_km` of `origin`, each annotated with its
/// distance and sorted nearest-first. Equidistant records keep their
/// dataset order.
///
/// Rows with a missing or unusable coordinate are skipped rather than
/// failing the batch.
pub fn filter_within_radius(
    records: &[PointRecord],
    origin: GeoPoint,
    radius_km: f64,
    options: RadiusOptions,
) -> Result<Vec<DistanceAnnotatedRecord>> {
    validate_radius(radius_km)?;

    let mut matches: Vec<DistanceAnnotatedRecord> = records
        .iter()
        .filter_map(|record| {
            let distance = distance_km(origin, record.location()?);
            (distance <= radius_km).then(|| annotate(record, distance, options))
        })
        .collect();

    // Stable sort keeps equidistant records in dataset order.
    matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(matches)
}

/// Segment records with any part within `radius_km` of `origin`, in
/// dataset order.
///
/// A record matches when its start point is in range, its end point is in
/// range, or the connecting segment passes within range. The segment test
/// compares planar degree-space distance against
/// `radius_km / KM_PER_DEGREE`, an equator-calibrated approximation that
/// holds at single-digit kilometer radii but not near the poles or at
/// continental scale.
///
/// Records without a start point cannot be evaluated and are excluded;
/// records without an end point are judged on the start test alone.
pub fn filter_segments_within_radius<'a>(
    records: &'a [SegmentRecord],
    origin: GeoPoint,
    radius_km: f64,
) -> Result<Vec<&'a SegmentRecord>> {
    validate_radius(radius_km)?;

    Ok(records
        .iter()
        .filter(|record| segment_in_range(record, origin, radius_km))
        .collect())
}

/// The closest record to `origin`, or `None` when the dataset is empty or
/// the closest record is still farther than `cutoff_km` away.
///
/// Exact distance ties go to the record encountered first in dataset
/// order. The cutoff is caller policy; the engine applies whatever it is
/// given.
pub fn find_nearest(
    records: &[PointRecord],
    origin: GeoPoint,
    cutoff_km: f64,
) -> Result<Option<DistanceAnnotatedRecord>> {
    if cutoff_km.is_nan() || cutoff_km < 0.0 {
        return Err(ChargescoutError::InvalidCutoff { cutoff_km });
    }

    let mut nearest: Option<(f64, &PointRecord)> = None;
    for record in records {
        let Some(location) = record.location() else {
            continue;
        };
        let distance = distance_km(origin, location);
        // Strict comparison keeps the earliest record on exact ties.
        if nearest.is_none_or(|(best, _)| distance < best) {
            nearest = Some((distance, record));
        }
    }

    Ok(nearest
        .filter(|(distance, _)| *distance <= cutoff_km)
        .map(|(distance, record)| annotate(record, distance, RadiusOptions::default())))
}

/// The first record, in dataset order, whose own zone radius contains
/// `origin`; `None` when no zone does.
///
/// Deliberately first-match-wins rather than nearest-wins: zones are
/// assumed non-overlapping or ordered by priority in the source dataset,
/// and the scan short-circuits, so reordering the dataset can change which
/// record is returned.
pub fn find_first_in_zone<'a>(
    records: &'a [ZonedRecord],
    origin: GeoPoint,
) -> Option<&'a ZonedRecord> {
    records
        .iter()
        .find(|record| distance_km(origin, record.location) <= record.zone_radius_km)
}

fn validate_radius(radius_km: f64) -> Result<()> {
    if radius_km.is_nan() || radius_km < 0.0 {
        return Err(ChargescoutError::InvalidRadius { radius_km });
    }
    Ok(())
}

fn annotate(
    record: &PointRecord,
    distance_km: f64,
    options: RadiusOptions,
) -> DistanceAnnotatedRecord {
    let (latitude, longitude) = if options.strip_coordinates {
        (None, None)
    } else {
        (record.latitude, record.longitude)
    };
    DistanceAnnotatedRecord {
        latitude,
        longitude,
        distance_km,
        fields: record.fields.clone(),
    }
}

fn segment_in_range(record: &SegmentRecord, origin: GeoPoint, radius_km: f64) -> bool {
    let Some(start) = record.start() else {
        return false;
    };
    if distance_km(origin, start) <= radius_km {
        return true;
    }
    let Some(end) = record.end() else {
        return false;
    };
    if distance_km(origin, end) <= radius_km {
        return true;
    }

    let segment = Line::new(
        coord! { x: start.longitude(), y: start.latitude() },
        coord! { x: end.longitude(), y: end.latitude() },
    );
    let point = Point::new(origin.longitude(), origin.latitude());
    Euclidean.distance(&point, &segment) <= radius_km / KM_PER_DEGREE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude).unwrap()
    }

    /// Reference point in western Sydney, used throughout these tests.
    fn origin() -> GeoPoint {
        point(-33.778375, 150.815781)
    }

    fn named_fields(name: &str) -> BTreeMap<String, String> {
        BTreeMap::from([("name".to_string(), name.to_string())])
    }

    fn point_record(name: &str, latitude: f64, longitude: f64) -> PointRecord {
        PointRecord {
            latitude: Some(latitude),
            longitude: Some(longitude),
            fields: named_fields(name),
        }
    }

    fn segment_record(
        name: &str,
        start: Option<(f64, f64)>,
        end: Option<(f64, f64)>,
    ) -> SegmentRecord {
        SegmentRecord {
            latitude: start.map(|(lat, _)| lat),
            longitude: start.map(|(_, lon)| lon),
            latitude_end: end.map(|(lat, _)| lat),
            longitude_end: end.map(|(_, lon)| lon),
            fields: named_fields(name),
        }
    }

    fn zoned_record(name: &str, latitude: f64, longitude: f64, zone_radius_km: f64) -> ZonedRecord {
        ZonedRecord {
            location: point(latitude, longitude),
            zone_radius_km,
            fields: named_fields(name),
        }
    }

    fn name_of(record: &DistanceAnnotatedRecord) -> &str {
        record.fields.get("name").unwrap()
    }

    #[test]
    fn test_distance_zero_for_identical_points() {
        let a = point(-33.778375, 150.815781);
        assert!(distance_km(a, a).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = point(-33.778375, 150.815781);
        let b = point(-33.9, 151.0);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_known_value() {
        // Paris to London is roughly 344 km.
        let paris = point(48.8566, 2.3522);
        let london = point(51.5074, -0.1276);
        let distance = distance_km(paris, london);
        assert!(
            distance > 339.0 && distance < 349.0,
            "Paris-London distance {} should be ~344 km",
            distance
        );
    }

    #[test]
    fn test_radius_filter_includes_only_records_in_range() {
        // A charger ~0.6 km away and one ~22 km away.
        let records = vec![
            point_record("near", -33.78, 150.81),
            point_record("far", -33.9, 151.0),
        ];

        let matches =
            filter_within_radius(&records, origin(), 3.0, RadiusOptions::default()).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(name_of(&matches[0]), "near");
        assert!(
            matches[0].distance_km > 0.4 && matches[0].distance_km < 0.8,
            "expected ~0.6 km, got {}",
            matches[0].distance_km
        );
    }

    #[test]
    fn test_radius_filter_sorts_by_distance() {
        let records = vec![
            point_record("second", -33.79, 150.82),
            point_record("third", -33.80, 150.84),
            point_record("first", -33.778, 150.8158),
        ];

        let matches =
            filter_within_radius(&records, origin(), 10.0, RadiusOptions::default()).unwrap();

        let names: Vec<&str> = matches.iter().map(name_of).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_radius_filter_ties_keep_dataset_order() {
        let records = vec![
            point_record("a", -33.78, 150.81),
            point_record("b", -33.78, 150.81),
        ];

        let matches =
            filter_within_radius(&records, origin(), 3.0, RadiusOptions::default()).unwrap();

        let names: Vec<&str> = matches.iter().map(name_of).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_radius_filter_skips_unusable_rows() {
        let records = vec![
            PointRecord {
                latitude: Some(-33.78),
                longitude: None,
                fields: named_fields("missing longitude"),
            },
            PointRecord {
                latitude: Some(95.0),
                longitude: Some(150.81),
                fields: named_fields("latitude out of range"),
            },
            point_record("usable", -33.78, 150.81),
        ];

        let matches =
            filter_within_radius(&records, origin(), 3.0, RadiusOptions::default()).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(name_of(&matches[0]), "usable");
    }

    #[test]
    fn test_radius_filter_keeps_coordinates_by_default() {
        let records = vec![point_record("near", -33.78, 150.81)];
        let matches =
            filter_within_radius(&records, origin(), 3.0, RadiusOptions::default()).unwrap();

        assert_eq!(matches[0].latitude, Some(-33.78));
        assert_eq!(matches[0].longitude, Some(150.81));
    }

    #[test]
    fn test_radius_filter_strips_coordinates_on_request() {
        let records = vec![point_record("near", -33.78, 150.81)];
        let options = RadiusOptions {
            strip_coordinates: true,
        };
        let matches = filter_within_radius(&records, origin(), 3.0, options).unwrap();

        assert_eq!(matches[0].latitude, None);
        assert_eq!(matches[0].longitude, None);
        assert_eq!(name_of(&matches[0]), "near");
    }

    #[test]
    fn test_radius_filter_zero_radius_keeps_exact_location() {
        let records = vec![point_record("here", -33.778375, 150.815781)];
        let matches =
            filter_within_radius(&records, origin(), 0.0, RadiusOptions::default()).unwrap();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].distance_km.abs() < 1e-9);
    }

    #[test]
    fn test_radius_filter_is_monotonic_in_radius() {
        let records = vec![
            point_record("near", -33.78, 150.81),
            point_record("mid", -33.80, 150.85),
            point_record("far", -33.9, 151.0),
        ];

        let small =
            filter_within_radius(&records, origin(), 3.0, RadiusOptions::default()).unwrap();
        let large =
            filter_within_radius(&records, origin(), 30.0, RadiusOptions::default()).unwrap();

        for matched in &small {
            assert!(large.iter().any(|r| r.fields == matched.fields));
        }
        assert!(large.len() >= small.len());
    }

    #[test]
    fn test_radius_filter_rejects_negative_radius() {
        let records = vec![point_record("near", -33.78, 150.81)];
        let result = filter_within_radius(&records, origin(), -1.0, RadiusOptions::default());
        assert!(matches!(
            result,
            Err(ChargescoutError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn test_segment_filter_matches_on_start_point() {
        let records = vec![segment_record(
            "asset",
            Some((-33.78, 150.81)),
            Some((-33.80, 150.83)),
        )];

        let matches = filter_segments_within_radius(&records, origin(), 3.0).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_segment_filter_matches_on_end_point() {
        let records = vec![segment_record(
            "asset",
            Some((-34.2, 151.2)),
            Some((-33.78, 150.81)),
        )];

        let matches = filter_segments_within_radius(&records, origin(), 3.0).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_segment_filter_matches_line_passing_near_origin() {
        // Both endpoints are ~19 km out, but the span runs straight through
        // the origin's longitude at its latitude.
        let records = vec![segment_record(
            "transmission line",
            Some((-33.60, 150.815781)),
            Some((-33.95, 150.815781)),
        )];

        let matches = filter_segments_within_radius(&records, origin(), 3.0).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_segment_filter_excludes_distant_line() {
        // A parallel span one degree of longitude east, ~90 km away.
        let records = vec![segment_record(
            "distant line",
            Some((-33.60, 151.815781)),
            Some((-33.95, 151.815781)),
        )];

        let matches = filter_segments_within_radius(&records, origin(), 3.0).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_segment_filter_missing_end_judged_on_start_only() {
        let records = vec![
            segment_record("start in range", Some((-33.78, 150.81)), None),
            segment_record("start out of range", Some((-33.90, 151.00)), None),
        ];

        let matches = filter_segments_within_radius(&records, origin(), 3.0).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].fields.get("name").unwrap(), "start in range");
    }

    #[test]
    fn test_segment_filter_missing_start_excludes_record() {
        // Even an end point sitting on the origin cannot rescue a record
        // without a start point.
        let records = vec![segment_record("no start", None, Some((-33.778375, 150.815781)))];

        let matches = filter_segments_within_radius(&records, origin(), 3.0).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_segment_filter_preserves_dataset_order() {
        let records = vec![
            segment_record("b", Some((-33.80, 150.83)), None),
            segment_record("far", Some((-33.90, 151.00)), None),
            segment_record("a", Some((-33.78, 150.81)), None),
        ];

        let matches = filter_segments_within_radius(&records, origin(), 5.0).unwrap();
        let names: Vec<&str> = matches
            .iter()
            .map(|r| r.fields.get("name").unwrap().as_str())
            .collect();
        // "a" is closer than "b" but the filter does not sort.
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_segment_filter_rejects_negative_radius() {
        let result = filter_segments_within_radius(&[], origin(), -0.5);
        assert!(matches!(
            result,
            Err(ChargescoutError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn test_find_nearest_empty_dataset_returns_none() {
        assert!(find_nearest(&[], origin(), 5.0).unwrap().is_none());
    }

    #[test]
    fn test_find_nearest_returns_closest_record() {
        let records = vec![
            point_record("far", -33.9, 151.0),
            point_record("near", -33.78, 150.81),
        ];

        let nearest = find_nearest(&records, origin(), 5.0).unwrap().unwrap();
        assert_eq!(name_of(&nearest), "near");
        assert!(nearest.distance_km < 1.0);
    }

    #[test]
    fn test_find_nearest_beyond_cutoff_returns_none() {
        let records = vec![point_record("far", -33.9, 151.0)];
        assert!(find_nearest(&records, origin(), 5.0).unwrap().is_none());
    }

    #[test]
    fn test_find_nearest_ties_prefer_first_record() {
        let records = vec![
            point_record("first", -33.78, 150.81),
            point_record("second", -33.78, 150.81),
        ];

        let nearest = find_nearest(&records, origin(), 5.0).unwrap().unwrap();
        assert_eq!(name_of(&nearest), "first");
    }

    #[test]
    fn test_find_nearest_skips_unusable_rows() {
        let records = vec![
            PointRecord {
                latitude: None,
                longitude: None,
                fields: named_fields("no coordinates"),
            },
            point_record("usable", -33.78, 150.81),
        ];

        let nearest = find_nearest(&records, origin(), 5.0).unwrap().unwrap();
        assert_eq!(name_of(&nearest), "usable");
    }

    #[test]
    fn test_find_nearest_rejects_negative_cutoff() {
        let result = find_nearest(&[], origin(), -2.0);
        assert!(matches!(
            result,
            Err(ChargescoutError::InvalidCutoff { .. })
        ));
    }

    #[test]
    fn test_first_zone_match_wins_over_closer_record() {
        // The first zone is ~30 km away but 50 km wide; the second is under
        // a kilometer away. Scan order decides.
        let records = vec![
            zoned_record("wide zone", -34.0, 151.0, 50.0),
            zoned_record("close zone", -33.78, 150.82, 1.0),
        ];

        let matched = find_first_in_zone(&records, origin()).unwrap();
        assert_eq!(matched.fields.get("name").unwrap(), "wide zone");
    }

    #[test]
    fn test_zone_scan_order_is_load_bearing() {
        let records = vec![
            zoned_record("wide zone", -34.0, 151.0, 50.0),
            zoned_record("close zone", -33.78, 150.82, 1.0),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = find_first_in_zone(&records, origin()).unwrap();
        let backward = find_first_in_zone(&reversed, origin()).unwrap();

        assert_eq!(forward.fields.get("name").unwrap(), "wide zone");
        assert_eq!(backward.fields.get("name").unwrap(), "close zone");
    }

    #[test]
    fn test_zone_radius_is_per_record() {
        // The same location matches or not depending on its own radius.
        let too_small = vec![zoned_record("tight", -34.0, 151.0, 10.0)];
        let wide_enough = vec![zoned_record("wide", -34.0, 151.0, 50.0)];

        assert!(find_first_in_zone(&too_small, origin()).is_none());
        assert!(find_first_in_zone(&wide_enough, origin()).is_some());
    }

    #[test]
    fn test_no_zone_contains_origin_returns_none() {
        let records = vec![
            zoned_record("sydney cbd", -33.8688, 151.2093, 2.0),
            zoned_record("newcastle", -32.9283, 151.7817, 5.0),
        ];
        assert!(find_first_in_zone(&records, origin()).is_none());
    }
}
