//! Board border and hole classification
//!
//! Shapes on the dedicated outline layer are stroke-buffered, merged by
//! intersection and classified: the merged polygon enclosing exactly one
//! empty interior with the largest interior bounding box is the board
//! border, and every other merged polygon is a hole cut out of the board.
//! Drill holes from vias, bare holes and pad holes are appended separately.

use super::arc;
use super::buffer::stroke;
use super::merge::merge;
use super::types::{ring_bbox_area, ring_bbox_centroid, Point, Polygon, CIRCLE_STEPS};
use crate::board::decode::UnknownShapePolicy;
use crate::board::shape::{Arc, ArcGeometry, Shape};
use crate::board::store::ShapeStore;
use crate::error::{ClassificationError, Result};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, warn};

/// Name of the layer whose shapes draw the board boundary
pub const OUTLINE_LAYER: &str = "BoardOutLine";

/// Stroke width applied to every outline-layer shape, in mm. The host
/// editor renders the outline at this fixed width regardless of the
/// declared shape width.
pub const OUTLINE_WIDTH: f64 = 0.3;

/// The classified board boundary: one border ring and the rings of every
/// hole through the board, all in mm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardOutline {
    /// The closed border ring
    pub border: Vec<Point>,
    /// Holes from the outline layer first, drill holes after
    pub holes: Vec<Vec<Point>>,
}

/// Stroke-buffer every shape on the outline layer into a filled polygon.
///
/// Tracks and arcs shorter than two points are ignored. Shape kinds that
/// cannot contribute outline geometry are fatal or skipped according to the
/// store's tolerance policy.
pub fn outline_polygons(store: &ShapeStore) -> Result<Vec<Polygon>> {
    let layer = store.layer_by_name(OUTLINE_LAYER)?;
    let half_width = OUTLINE_WIDTH / 2.0;

    let mut polygons = Vec::new();
    for entry in store.shapes_on_layer(layer.id) {
        match &entry.shape {
            Shape::Track(track) => {
                if track.points.len() > 1 {
                    polygons.extend(stroke(&track.points, half_width));
                }
            }
            Shape::Arc(arc_shape) => {
                let points = arc_polyline(arc_shape);
                if points.len() > 1 {
                    polygons.extend(stroke(&points, half_width));
                }
            }
            Shape::Circle(circle) => {
                // Stroke the circle outline as a closed path so a circular
                // board edge keeps its enclosed interior
                let mut ring =
                    Polygon::circle(circle.center, circle.radius, CIRCLE_STEPS).exterior;
                ring.push(ring[0]);
                polygons.extend(stroke(&ring, half_width));
            }
            other => match store.policy() {
                UnknownShapePolicy::Fail => {
                    return Err(ClassificationError::UnexpectedOutlineShape {
                        kind: other.kind_name(),
                    }
                    .into());
                }
                UnknownShapePolicy::Skip => {
                    warn!(
                        kind = other.kind_name(),
                        "skipping outline-layer shape with no outline geometry"
                    );
                }
            },
        }
    }
    Ok(polygons)
}

/// Resolve an arc shape into a drawable polyline, falling back to the
/// straight chord between its endpoints when the circle cannot be
/// reconstructed.
fn arc_polyline(arc_shape: &Arc) -> Vec<Point> {
    match &arc_shape.geometry {
        ArcGeometry::Sampled(points) => points.clone(),
        ArcGeometry::Encoded {
            start,
            end,
            radius_x,
            radius_y,
            clockwise,
            solution_select,
        } => match arc::resolve(*start, *end, *radius_x, *radius_y, *clockwise, *solution_select)
        {
            Ok(resolved) => arc::sample(&resolved),
            Err(reason) => {
                warn!(
                    arc = %arc_shape.id,
                    %reason,
                    "arc reconstruction failed, approximating with a straight chord"
                );
                vec![*start, *end]
            }
        },
    }
}

/// Split merged outline polygons into the border ring and outline-layer
/// hole rings.
///
/// Only a polygon with exactly one interior ring, i.e. a single closed loop
/// enclosing one empty interior, can be the border; among those the largest
/// interior bounding box wins. Everything else contributes its exterior
/// ring as a hole.
pub fn classify(merged: &[Polygon]) -> Result<(Vec<Point>, Vec<Vec<Point>>)> {
    let mut border: Option<usize> = None;
    let mut max_area = 0.0;
    for (i, polygon) in merged.iter().enumerate() {
        if polygon.interiors.len() == 1 {
            let area = ring_bbox_area(&polygon.interiors[0]);
            if area > max_area {
                border = Some(i);
                max_area = area;
            }
        }
    }
    let border_index = border.ok_or(ClassificationError::NoBorder)?;

    let border_ring = merged[border_index].interiors[0].clone();
    let holes = merged
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != border_index)
        .map(|(_, polygon)| polygon.exterior.clone())
        .collect();
    Ok((border_ring, holes))
}

/// Extract drill hole rings from via, bare-hole and pad shapes anywhere on
/// the board.
pub fn drill_holes(store: &ShapeStore) -> Vec<Vec<Point>> {
    let mut holes = Vec::new();
    for entry in store.shapes() {
        match &entry.shape {
            Shape::Via(via) if via.drill_diameter > 0.0 => {
                holes.push(
                    Polygon::circle(via.center, via.drill_diameter / 2.0, CIRCLE_STEPS).exterior,
                );
            }
            Shape::Hole(hole) if hole.diameter > 0.0 => {
                holes.push(Polygon::circle(hole.center, hole.diameter / 2.0, CIRCLE_STEPS).exterior);
            }
            Shape::Pad(pad) if pad.hole_diameter > 0.0 => {
                if pad.slot.len() > 1 {
                    // Slotted hole: the slot path buffered at the hole radius
                    if let Some(slot) = stroke(&pad.slot, pad.hole_diameter / 2.0) {
                        holes.push(slot.exterior);
                    }
                } else {
                    let center = pad.hole_center.unwrap_or(pad.center);
                    holes.push(
                        Polygon::circle(center, pad.hole_diameter / 2.0, CIRCLE_STEPS).exterior,
                    );
                }
            }
            _ => {}
        }
    }
    holes
}

/// Run the full outline pass: buffer, merge, classify, append drill holes.
pub fn compute_outline(store: &ShapeStore) -> Result<BoardOutline> {
    let polygons = outline_polygons(store)?;
    debug!(count = polygons.len(), "buffered outline-layer shapes");
    let merged = merge(polygons);
    let (border, mut holes) = classify(&merged)?;
    holes.extend(drill_holes(store));
    debug!(holes = holes.len(), "classified board outline");
    Ok(BoardOutline { border, holes })
}

/// An immutable board with its outline computed at most once.
#[derive(Debug)]
pub struct Board {
    store: ShapeStore,
    outline: OnceCell<BoardOutline>,
}

impl Board {
    pub fn new(store: ShapeStore) -> Self {
        Board {
            store,
            outline: OnceCell::new(),
        }
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    /// The border and holes, computed on first call and reused after. The
    /// store never changes, so the cached value never invalidates.
    pub fn outline(&self) -> Result<&BoardOutline> {
        self.outline.get_or_try_init(|| compute_outline(&self.store))
    }

    /// Bounding-box center of the border ring, e.g. for aiming a camera
    pub fn centroid(&self) -> Result<Point> {
        let outline = self.outline()?;
        Ok(ring_bbox_centroid(&outline.border)
            .unwrap_or(Point::new(0.0, 0.0)))
    }
}
