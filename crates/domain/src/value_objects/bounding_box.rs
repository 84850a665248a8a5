//! Axis-aligned geographic bounding box

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Smallest latitude/longitude rectangle enclosing a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Degenerate box containing exactly one point
    #[must_use]
    pub const fn from_point(point: Coordinate) -> Self {
        Self {
            min_lat: point.latitude(),
            max_lat: point.latitude(),
            min_lon: point.longitude(),
            max_lon: point.longitude(),
        }
    }

    /// Build the enclosing box of a sequence of points, `None` if it is empty
    pub fn enclosing(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        points.into_iter().fold(None, |acc, point| match acc {
            None => Some(Self::from_point(point)),
            Some(bbox) => Some(bbox.extended(point)),
        })
    }

    /// Return a copy grown to include `point`
    #[must_use]
    pub fn extended(self, point: Coordinate) -> Self {
        Self {
            min_lat: self.min_lat.min(point.latitude()),
            max_lat: self.max_lat.max(point.latitude()),
            min_lon: self.min_lon.min(point.longitude()),
            max_lon: self.max_lon.max(point.longitude()),
        }
    }

    /// Return the union of two boxes
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lon: self.min_lon.min(other.min_lon),
            max_lon: self.max_lon.max(other.max_lon),
        }
    }

    /// Whether `point` lies inside or on the edge of the box
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude())
            && (self.min_lon..=self.max_lon).contains(&point.longitude())
    }

    /// Geometric center of the box
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new_unchecked(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_empty_is_none() {
        assert!(BoundingBox::enclosing(Vec::new()).is_none());
    }

    #[test]
    fn enclosing_covers_all_points() {
        let points = vec![
            Coordinate::new_unchecked(48.1, 11.5),
            Coordinate::new_unchecked(48.3, 11.4),
            Coordinate::new_unchecked(48.2, 11.7),
        ];
        let bbox = BoundingBox::enclosing(points.clone()).expect("non-empty");
        assert!((bbox.min_lat - 48.1).abs() < f64::EPSILON);
        assert!((bbox.max_lat - 48.3).abs() < f64::EPSILON);
        assert!((bbox.min_lon - 11.4).abs() < f64::EPSILON);
        assert!((bbox.max_lon - 11.7).abs() < f64::EPSILON);
        assert!(points.iter().all(|p| bbox.contains(p)));
    }

    #[test]
    fn union_is_superset() {
        let a = BoundingBox::from_point(Coordinate::new_unchecked(1.0, 1.0));
        let b = BoundingBox::from_point(Coordinate::new_unchecked(-1.0, 3.0));
        let u = a.union(b);
        assert!(u.contains(&Coordinate::new_unchecked(0.0, 2.0)));
        assert_eq!(u.center(), Coordinate::new_unchecked(0.0, 2.0));
    }
}
