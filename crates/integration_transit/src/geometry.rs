//! Route geometry helpers
//!
//! Leg paths arrive as Google-style encoded polylines. Decoding failures are
//! logged and turned into empty paths so a single bad leg never prevents the
//! rest of an itinerary from being drawn.

use domain::{BoundingBox, Coordinate};
use tracing::debug;

use crate::error::TransitError;
use crate::models::Itinerary;

/// Precision (decimal places) of encoded leg geometries
pub const GEOMETRY_PRECISION: u32 = 6;

/// Highest precision whose scale factor (10^p) fits the decoder's 32-bit base
pub const MAX_PRECISION: u32 = 9;

/// Decode a polyline at the fixed geometry precision
///
/// Returns an empty path for empty or malformed input.
#[must_use]
pub fn decode(encoded: &str) -> Vec<Coordinate> {
    decode_with_precision(encoded, GEOMETRY_PRECISION)
}

/// Decode a polyline at an explicit precision, degrading to an empty path
#[must_use]
pub fn decode_with_precision(encoded: &str, precision: u32) -> Vec<Coordinate> {
    match try_decode(encoded, precision) {
        Ok(path) => path,
        Err(e) => {
            debug!(%e, len = encoded.len(), "Discarding undecodable geometry");
            Vec::new()
        },
    }
}

/// Decode a polyline, reporting malformed input
///
/// # Errors
///
/// Returns `TransitError::InvalidGeometry` if the string is not a valid
/// polyline at `precision` or `precision` is above [`MAX_PRECISION`].
pub fn try_decode(encoded: &str, precision: u32) -> Result<Vec<Coordinate>, TransitError> {
    if precision > MAX_PRECISION {
        return Err(TransitError::InvalidGeometry(format!(
            "precision {precision} exceeds {MAX_PRECISION}"
        )));
    }
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(pos) = encoded.bytes().position(|b| !(63..=126).contains(&b)) {
        return Err(TransitError::InvalidGeometry(format!(
            "unexpected character at position {pos}"
        )));
    }

    let line = polyline::decode_polyline(encoded, precision)
        .map_err(|e| TransitError::InvalidGeometry(format!("{e:?}")))?;

    // geo-types stores x = longitude, y = latitude
    Ok(line
        .0
        .into_iter()
        .map(|coord| Coordinate::new_unchecked(coord.y, coord.x))
        .collect())
}

/// Bounding box of everything an itinerary draws
///
/// Folds over every leg's decoded geometry plus its from/to places.
/// Returns `None` for an itinerary without legs.
#[must_use]
pub fn bounds(itinerary: &Itinerary) -> Option<BoundingBox> {
    itinerary
        .legs
        .iter()
        .flat_map(|leg| {
            let mut points = leg.coordinates();
            points.push(leg.from.coordinate());
            points.push(leg.to.coordinate());
            points
        })
        .fold(None, |acc: Option<BoundingBox>, point| {
            Some(acc.map_or_else(|| BoundingBox::from_point(point), |bbox| bbox.extended(point)))
        })
}

#[cfg(test)]
mod tests {
    use geo_types::Coord;

    use super::*;
    use crate::models::{EncodedPolyline, Leg, Mode, Place};

    fn encode(points: &[(f64, f64)], precision: u32) -> String {
        polyline::encode_coordinates(
            points.iter().map(|(lat, lon)| Coord { x: *lon, y: *lat }),
            precision,
        )
        .unwrap()
    }

    fn place(name: &str, lat: f64, lon: f64) -> Place {
        Place {
            name: name.to_string(),
            stop_id: None,
            lat,
            lon,
            level: None,
            track: None,
            scheduled_track: None,
            arrival: None,
            departure: None,
        }
    }

    fn leg(mode: Mode, from: Place, to: Place, points: String) -> Leg {
        Leg {
            mode,
            from,
            to,
            duration: 0,
            start_time: None,
            end_time: None,
            leg_geometry: EncodedPolyline {
                points,
                precision: GEOMETRY_PRECISION,
                length: 0,
            },
            intermediate_stops: Vec::new(),
            route_short_name: None,
            headsign: None,
            route_color: None,
            agency_name: None,
            distance: None,
        }
    }

    #[test]
    fn test_decode_reference_polyline() {
        // Reference example from the polyline algorithm documentation
        let path = decode_with_precision("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5);
        assert_eq!(path.len(), 3);
        assert!((path[0].latitude() - 38.5).abs() < 1e-9);
        assert!((path[0].longitude() + 120.2).abs() < 1e-9);
        assert!((path[2].latitude() - 43.252).abs() < 1e-9);
        assert!((path[2].longitude() + 126.453).abs() < 1e-9);
    }

    #[test]
    fn test_decode_fixed_precision() {
        let encoded = encode(&[(48.265_061, 11.671_093), (48.262_5, 11.668)], 6);
        let path = decode(&encoded);
        assert_eq!(path.len(), 2);
        assert!((path[0].latitude() - 48.265_061).abs() < 1e-6);
        assert!((path[1].longitude() - 11.668).abs() < 1e-6);
    }

    #[test]
    fn test_decode_empty_is_empty() {
        assert!(decode("").is_empty());
        assert!(try_decode("", GEOMETRY_PRECISION).unwrap().is_empty());
    }

    #[test]
    fn test_decode_malformed_is_empty() {
        assert!(decode("\u{1}\u{2}").is_empty());
        assert!(decode("abc def").is_empty());
        assert!(try_decode("\u{1}\u{2}", GEOMETRY_PRECISION).is_err());
    }

    #[test]
    fn test_bounds_includes_geometry_and_endpoints() {
        let geometry = encode(&[(48.20, 11.60), (48.30, 11.55)], 6);
        let itinerary = Itinerary {
            legs: vec![leg(
                Mode::Bus,
                place("A", 48.25, 11.70),
                place("B", 48.22, 11.58),
                geometry,
            )],
            ..Itinerary::default()
        };

        let bbox = bounds(&itinerary).unwrap();
        assert!((bbox.min_lat - 48.20).abs() < 1e-6);
        assert!((bbox.max_lat - 48.30).abs() < 1e-6);
        assert!((bbox.min_lon - 11.55).abs() < 1e-6);
        assert!((bbox.max_lon - 11.70).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_survives_bad_geometry() {
        let itinerary = Itinerary {
            legs: vec![leg(
                Mode::Walk,
                place("A", 48.0, 11.0),
                place("B", 48.1, 11.1),
                "\u{1}".to_string(),
            )],
            ..Itinerary::default()
        };
        let bbox = bounds(&itinerary).unwrap();
        assert!((bbox.max_lat - 48.1).abs() < 1e-9);
    }

    #[test]
    fn test_decode_rejects_unrepresentable_precision() {
        assert!(decode_with_precision("_p~iF~ps|U", 20).is_empty());
        assert!(decode_with_precision("_p~iF~ps|U", u32::MAX).is_empty());
        assert!(try_decode("", MAX_PRECISION + 1).is_err());
        assert_eq!(decode_with_precision("_p~iF~ps|U", MAX_PRECISION).len(), 1);
    }

    #[test]
    fn test_bounds_survives_oversized_precision() {
        let json = r#"{
            "legs": [{
                "mode": "BUS",
                "from": { "name": "A", "lat": 48.0, "lon": 11.0 },
                "to": { "name": "B", "lat": 48.1, "lon": 11.1 },
                "legGeometry": { "points": "_p~iF~ps|U", "precision": 20, "length": 1 }
            }]
        }"#;
        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        assert!(itinerary.legs[0].coordinates().is_empty());

        let bbox = bounds(&itinerary).unwrap();
        assert!((bbox.min_lat - 48.0).abs() < 1e-9);
        assert!((bbox.max_lon - 11.1).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_of_empty_itinerary() {
        assert!(bounds(&Itinerary::default()).is_none());
    }
}
