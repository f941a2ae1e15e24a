//! Placement transforms for footprint-mounted 3D models
//!
//! Each model reference resolves to the transform chain the mesh builder
//! applies: uniform scale to the declared width, declared axis rotations,
//! re-centering onto the local origin, a flip for bottom-side components and
//! the final world translation. The model geometry itself is fetched and
//! measured elsewhere; only its bounds enter here.

use crate::board::shape::{ModelRef, Shape};
use crate::board::store::ShapeStore;
use crate::error::Result;
use serde::Serialize;

/// Board thickness in mm, the z offset of top-side components
pub const BOARD_THICKNESS: f64 = 1.6;

/// Layer names deciding which side a footprint mounts on
pub const BOTTOM_LAYER: &str = "BottomLayer";

/// Axis-aligned bounds of a model's geometry, in the model's own units,
/// supplied by the external loader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl ModelBounds {
    /// Extent along the x axis, the reference for uniform scaling
    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }
}

/// The resolved transform chain for one model, applied in field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementTransform {
    /// Uniform scale bringing the raw model to its declared width
    pub scale: f64,
    /// Rotation about the x, y and z axes, radians
    pub rotation: [f64; 3],
    /// Translation centering the rotated model on its local origin
    pub recenter: [f64; 2],
    /// Whether the component mounts on the bottom side; when set the
    /// consumer flips the model half a turn about the vertical axis
    pub bottom: bool,
    /// World translation in mm; z is the board thickness on top, 0 on the
    /// bottom
    pub translation: [f64; 3],
}

/// All model references in the store, paired with their owning footprint's
/// group id.
pub fn model_refs(store: &ShapeStore) -> Vec<(&ModelRef, Option<&str>)> {
    store
        .shapes()
        .iter()
        .filter_map(|entry| match &entry.shape {
            Shape::ModelRef(model) => Some((model, entry.footprint_gid.as_deref())),
            _ => None,
        })
        .collect()
}

/// Resolve the placement transform for one model reference.
///
/// `raw_bounds` are the bounds of the model as loaded; `oriented_bounds`
/// are measured again after scale and rotation, the re-centering reference.
pub fn resolve_placement(
    store: &ShapeStore,
    model: &ModelRef,
    footprint_gid: Option<&str>,
    raw_bounds: &ModelBounds,
    oriented_bounds: &ModelBounds,
) -> Result<PlacementTransform> {
    let parent = store.shape_by_gid(footprint_gid.unwrap_or_default())?;
    let bottom_layer = store.layer_by_name(BOTTOM_LAYER)?;
    let bottom = parent.shape.layer_id() == Some(bottom_layer.id);

    Ok(PlacementTransform {
        scale: model.width / raw_bounds.width(),
        rotation: model.rotation.map(f64::to_radians),
        recenter: [
            -(oriented_bounds.min[0] + oriented_bounds.max[0]) / 2.0,
            -(oriented_bounds.min[1] + oriented_bounds.max[1]) / 2.0,
        ],
        bottom,
        translation: [
            model.origin.x,
            model.origin.y,
            if bottom { 0.0 } else { BOARD_THICKNESS },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::decode::UnknownShapePolicy;
    use crate::board::layer::Layer;
    use crate::board::shape::Footprint;
    use crate::board::units::Offset;
    use crate::error::{Error, LookupError};
    use crate::geom::types::Point;
    use std::f64::consts::FRAC_PI_2;

    fn store_with_footprint(layer_id: i32) -> ShapeStore {
        let mut store = ShapeStore::new(
            Offset::new(0.0, 0.0).unwrap(),
            UnknownShapePolicy::Skip,
        );
        store.add_layer(Layer {
            id: 1,
            name: "TopLayer".to_string(),
            color: String::new(),
            visible: true,
            editor_visible: true,
        });
        store.add_layer(Layer {
            id: 2,
            name: BOTTOM_LAYER.to_string(),
            color: String::new(),
            visible: true,
            editor_visible: true,
        });
        store.push(Shape::Footprint(Footprint {
            id: "g1".to_string(),
            layer_id,
        }));
        store
    }

    fn model() -> ModelRef {
        ModelRef {
            id: "m1".to_string(),
            uuid: "abc123".to_string(),
            width: 25.4,
            rotation: [0.0, 0.0, 90.0],
            origin: Point::new(12.7, 5.08),
        }
    }

    fn bounds() -> (ModelBounds, ModelBounds) {
        (
            ModelBounds {
                min: [-1.0, -1.0, 0.0],
                max: [1.0, 1.0, 2.0],
            },
            ModelBounds {
                min: [-5.0, -5.0, 0.0],
                max: [15.0, 5.0, 10.0],
            },
        )
    }

    #[test]
    fn top_side_models_sit_on_the_board_surface() {
        let store = store_with_footprint(1);
        let (raw, oriented) = bounds();
        let transform =
            resolve_placement(&store, &model(), Some("g1"), &raw, &oriented).unwrap();
        assert!(!transform.bottom);
        assert_eq!(transform.scale, 12.7);
        assert_eq!(transform.rotation[0], 0.0);
        assert_eq!(transform.rotation[1], 0.0);
        assert!((transform.rotation[2] - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(transform.recenter, [-5.0, 0.0]);
        assert_eq!(transform.translation, [12.7, 5.08, BOARD_THICKNESS]);
    }

    #[test]
    fn bottom_side_models_flip_and_sit_at_zero() {
        let store = store_with_footprint(2);
        let (raw, oriented) = bounds();
        let transform =
            resolve_placement(&store, &model(), Some("g1"), &raw, &oriented).unwrap();
        assert!(transform.bottom);
        assert_eq!(transform.translation[2], 0.0);
    }

    #[test]
    fn missing_footprint_group_is_a_lookup_error() {
        let store = store_with_footprint(1);
        let (raw, oriented) = bounds();
        assert!(matches!(
            resolve_placement(&store, &model(), None, &raw, &oriented),
            Err(Error::Lookup(LookupError::GroupId { .. }))
        ));
        assert!(matches!(
            resolve_placement(&store, &model(), Some("g9"), &raw, &oriented),
            Err(Error::Lookup(LookupError::GroupId { .. }))
        ));
    }
}
