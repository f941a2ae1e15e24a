//! Connectivity grouping and boolean union of polygon sets
//!
//! Outline shapes are buffered independently, so a board edge drawn as four
//! tracks arrives as four overlapping stadium polygons. Grouping them by
//! pairwise intersection and unioning each group reconstructs the closed
//! shape, interior rings included.

use super::types::Polygon;
use geo::{BooleanOps, MultiPolygon};
use tracing::debug;

/// Partition polygons into transitively-connected clusters and union each
/// cluster into one (possibly multi-ring) polygon. Singleton clusters pass
/// through untouched.
///
/// Grouping is a streaming scan: each polygon joins the first existing group
/// it intersects; a hit on a second group folds that whole group into the
/// first, so chains of pairwise overlaps end up together even when no single
/// polygon touches them all. Quadratic in the polygon count, which board
/// outlines keep small.
pub fn merge(polygons: Vec<Polygon>) -> Vec<Polygon> {
    let mut groups: Vec<Vec<Polygon>> = Vec::new();

    for polygon in polygons {
        // Scan backward so absorbed groups can be removed in place
        let mut target: Option<usize> = None;
        let mut i = groups.len();
        while i > 0 {
            i -= 1;
            if !groups[i].iter().any(|member| polygon.intersects(member)) {
                continue;
            }
            match target {
                None => {
                    groups[i].push(polygon.clone());
                    target = Some(i);
                }
                Some(t) => {
                    let absorbed = groups.remove(i);
                    // Removal below the target shifts it down one slot
                    let t = t - 1;
                    groups[t].extend(absorbed);
                    target = Some(t);
                }
            }
        }
        if target.is_none() {
            groups.push(vec![polygon]);
        }
    }

    debug!(groups = groups.len(), "grouped outline polygons");

    let mut merged = Vec::with_capacity(groups.len());
    for mut group in groups {
        if group.len() == 1 {
            merged.push(group.pop().expect("group has one member"));
            continue;
        }
        let mut union = MultiPolygon::new(vec![group[0].to_geo()]);
        for polygon in &group[1..] {
            union = union.union(&MultiPolygon::new(vec![polygon.to_geo()]));
        }
        merged.extend(union.0.iter().map(Polygon::from_geo));
    }
    merged
}
