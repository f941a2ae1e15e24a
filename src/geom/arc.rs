//! Circle-center reconstruction for two-point arcs
//!
//! Arc records encode an arc as two endpoints, a radius and a pair of
//! direction flags. Recovering the drawable geometry means finding which of
//! the two candidate circle centers is meant, then walking the circle from
//! the start angle through the sweep.

use super::types::{Point, CIRCLE_STEPS};
use std::f64::consts::TAU;
use thiserror::Error;

/// Values whose magnitude is below this are treated as zero before the
/// center-distance square root, absorbing floating-point noise when the
/// chord midpoint coincides with the center.
const CENTER_EPSILON: f64 = 1e-6;

/// An arc with its circle reconstructed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedArc {
    pub center: Point,
    pub radius: f64,
    /// Polar angle at which the walk starts, radians
    pub start_angle: f64,
    /// Counter-clockwise extent of the walk, radians, in `[0, 2pi)`
    pub sweep: f64,
}

/// Reasons an arc cannot be reconstructed. Recovered by the caller with a
/// straight chord between the endpoints, never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArcDegeneracy {
    #[error("elliptical arcs are not supported, only circular ones")]
    Elliptical,
    #[error("arc endpoints coincide, no bisector direction exists")]
    CoincidentEndpoints,
    #[error("radius {radius} is too small for a chord of length {chord}")]
    RadiusTooShort { radius: f64, chord: f64 },
}

/// Reconstruct the circle behind a two-point arc.
///
/// The center lies on the perpendicular bisector of the chord, at distance
/// `sqrt(r^2 - half_chord^2)` from the chord midpoint. The flag pair picks
/// one of the two candidates: equal flags take the center offset along the
/// bisector direction, unequal flags take the opposite one.
pub fn resolve(
    start: Point,
    end: Point,
    radius_x: f64,
    radius_y: f64,
    clockwise: bool,
    solution_select: bool,
) -> Result<ResolvedArc, ArcDegeneracy> {
    if (radius_x - radius_y).abs() > CENTER_EPSILON {
        return Err(ArcDegeneracy::Elliptical);
    }
    let radius = radius_x;

    let chord = start.distance(&end);
    if chord < 1e-12 {
        return Err(ArcDegeneracy::CoincidentEndpoints);
    }

    // Unit direction of the perpendicular bisector of the chord
    let bisector_x = (start.y - end.y) / chord;
    let bisector_y = (end.x - start.x) / chord;

    // Chord midpoint
    let mid = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);

    let mut offset_sq = radius.powi(2) - (mid.x - start.x).powi(2) - (mid.y - start.y).powi(2);
    if offset_sq.abs() < CENTER_EPSILON {
        offset_sq = 0.0;
    }
    if offset_sq < 0.0 {
        return Err(ArcDegeneracy::RadiusTooShort { radius, chord });
    }
    let offset = offset_sq.sqrt();

    let center = if clockwise == solution_select {
        Point::new(mid.x + offset * bisector_x, mid.y + offset * bisector_y)
    } else {
        Point::new(mid.x - offset * bisector_x, mid.y - offset * bisector_y)
    };

    // Endpoint angles about the chosen center. The walk direction is fixed
    // clockwise: when the flags say otherwise the two angles swap roles.
    let mut theta1 = (end.y - center.y).atan2(end.x - center.x);
    let mut theta2 = (start.y - center.y).atan2(start.x - center.x);
    if !clockwise {
        std::mem::swap(&mut theta1, &mut theta2);
    }

    while theta2 < theta1 {
        theta2 += TAU;
    }
    let sweep = (theta2 - theta1) % TAU;

    Ok(ResolvedArc {
        center,
        radius,
        start_angle: theta1,
        sweep,
    })
}

/// Walk the resolved arc into a point polyline, stepping at the same
/// angular resolution used for circle approximation.
pub fn sample(arc: &ResolvedArc) -> Vec<Point> {
    let step = TAU / CIRCLE_STEPS as f64;
    let steps = ((arc.sweep / step).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| {
            let theta = arc.start_angle + arc.sweep * i as f64 / steps as f64;
            Point::new(
                arc.center.x + arc.radius * theta.cos(),
                arc.center.y + arc.radius * theta.sin(),
            )
        })
        .collect()
}
