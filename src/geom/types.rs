//! Core geometry types: points and multi-ring polygons
//!
//! Polygons own their rings as plain point lists and convert to `geo` types
//! at the boundary when a boolean operation or predicate is needed.

use geo::{Coord, LineString};
use serde::Serialize;

/// Number of segments used when a circle is approximated as a polygon
pub const CIRCLE_STEPS: usize = 64;

/// A 2D point in millimeters, offset-corrected
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// A closed polygon: one exterior ring plus zero or more interior rings
/// (holes). Rings do not repeat their first point; the closing edge is
/// implicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub exterior: Vec<Point>,
    pub interiors: Vec<Vec<Point>>,
}

impl Polygon {
    /// A polygon with no holes
    pub fn new(exterior: Vec<Point>) -> Self {
        Polygon {
            exterior,
            interiors: Vec::new(),
        }
    }

    /// Regular-polygon approximation of a circle
    pub fn circle(center: Point, radius: f64, steps: usize) -> Self {
        let step = std::f64::consts::TAU / steps as f64;
        let exterior = (0..steps)
            .map(|i| {
                let theta = i as f64 * step;
                Point::new(
                    radius * theta.cos() + center.x,
                    radius * theta.sin() + center.y,
                )
            })
            .collect();
        Polygon::new(exterior)
    }

    /// Convert to a `geo` polygon, closing each ring
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let interiors = self.interiors.iter().map(|ring| ring_to_geo(ring)).collect();
        geo::Polygon::new(ring_to_geo(&self.exterior), interiors)
    }

    /// Convert back from a `geo` polygon, dropping the repeated closing point
    pub fn from_geo(polygon: &geo::Polygon<f64>) -> Self {
        Polygon {
            exterior: ring_from_geo(polygon.exterior()),
            interiors: polygon.interiors().iter().map(ring_from_geo).collect(),
        }
    }

    /// True when the two polygons share any point, boundaries included
    pub fn intersects(&self, other: &Polygon) -> bool {
        use geo::Intersects;
        self.to_geo().intersects(&other.to_geo())
    }

    /// Enclosed area, interior rings subtracted
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo().unsigned_area()
    }
}

fn ring_to_geo(ring: &[Point]) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    if let (Some(first), Some(last)) = (coords.first().copied(), coords.last().copied()) {
        if first != last {
            coords.push(first);
        }
    }
    LineString::new(coords)
}

fn ring_from_geo(ring: &LineString<f64>) -> Vec<Point> {
    let mut points: Vec<Point> = ring.0.iter().map(|c| Point::new(c.x, c.y)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Axis-aligned bounding box of a ring, `None` for an empty ring
pub fn ring_bbox(ring: &[Point]) -> Option<(Point, Point)> {
    let first = ring.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in ring {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Area of a ring's bounding box, 0 for an empty ring
pub fn ring_bbox_area(ring: &[Point]) -> f64 {
    match ring_bbox(ring) {
        Some((min, max)) => (max.x - min.x) * (max.y - min.y),
        None => 0.0,
    }
}

/// Center of a ring's bounding box
pub fn ring_bbox_centroid(ring: &[Point]) -> Option<Point> {
    let (min, max) = ring_bbox(ring)?;
    Some(Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_bbox_spans_diameter() {
        let c = Polygon::circle(Point::new(1.0, 2.0), 3.0, CIRCLE_STEPS);
        let (min, max) = ring_bbox(&c.exterior).unwrap();
        // 64 is divisible by 4, so the extreme axis points are exact
        assert!((min.x - -2.0).abs() < 1e-9);
        assert!((max.x - 4.0).abs() < 1e-9);
        assert!((min.y - -1.0).abs() < 1e-9);
        assert!((max.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn geo_round_trip_preserves_rings() {
        let poly = Polygon {
            exterior: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            interiors: vec![vec![
                Point::new(4.0, 4.0),
                Point::new(4.0, 6.0),
                Point::new(6.0, 6.0),
                Point::new(6.0, 4.0),
            ]],
        };
        let back = Polygon::from_geo(&poly.to_geo());
        assert_eq!(back, poly);
    }

    #[test]
    fn intersects_detects_overlap_and_disjoint() {
        let a = Polygon::circle(Point::new(0.0, 0.0), 1.0, CIRCLE_STEPS);
        let b = Polygon::circle(Point::new(1.5, 0.0), 1.0, CIRCLE_STEPS);
        let c = Polygon::circle(Point::new(10.0, 0.0), 1.0, CIRCLE_STEPS);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
