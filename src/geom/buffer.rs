//! Stroke buffering: filled polygons from stroked paths
//!
//! A stroked polyline covers the plane with a disc of the half-width around
//! every vertex and a rectangle of the full width along every edge. Unioning
//! those pieces yields the filled polygon the ink would cover, round caps
//! and joins included.

use super::types::{Point, Polygon, CIRCLE_STEPS};
use geo::{BooleanOps, MultiPolygon};

/// Buffer a stroked path into the filled polygon it covers.
///
/// Returns `None` for an empty path. A single-point path produces the
/// vertex disc alone. A path that closes on itself (first point repeated
/// last) produces a polygon with an interior ring.
pub fn stroke(path: &[Point], half_width: f64) -> Option<Polygon> {
    let mut pieces: Vec<geo::Polygon<f64>> = Vec::new();

    for point in path {
        pieces.push(Polygon::circle(*point, half_width, CIRCLE_STEPS).to_geo());
    }

    for pair in path.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        if p1 == p2 {
            continue;
        }
        pieces.push(edge_rectangle(p1, p2, half_width).to_geo());
    }

    let mut iter = pieces.into_iter();
    let mut union = MultiPolygon::new(vec![iter.next()?]);
    for piece in iter {
        union = union.union(&MultiPolygon::new(vec![piece]));
    }

    // A connected path unions into one polygon; keep the dominant piece if
    // numeric noise ever splits off slivers
    union
        .0
        .iter()
        .map(Polygon::from_geo)
        .max_by(|a, b| a.area().total_cmp(&b.area()))
}

/// Rectangle of width `2 * offset` running along the edge `p1 -> p2`.
fn edge_rectangle(p1: Point, p2: Point, offset: f64) -> Polygon {
    // Offsets from each endpoint to the rectangle corners, perpendicular to
    // the edge. A horizontal edge has no finite slope to invert, so it gets
    // the vertical normal directly.
    let (dx, dy) = if p1.y != p2.y {
        let m = (p1.x - p2.x) / (p2.y - p1.y);
        let dx = offset / (1.0 + m * m).sqrt();
        (dx, m * dx)
    } else {
        (0.0, offset)
    };

    Polygon::new(vec![
        Point::new(p1.x + dx, p1.y + dy),
        Point::new(p1.x - dx, p1.y - dy),
        Point::new(p2.x - dx, p2.y - dy),
        Point::new(p2.x + dx, p2.y + dy),
    ])
}
