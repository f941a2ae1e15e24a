//! The shape store: flat ownership of every decoded shape and layer
//!
//! Footprint members are flattened into the same arena as top-level shapes.
//! Each entry keeps its owning footprint's group id as a plain value, so the
//! parent can be found again by lookup without any ownership cycle.

use super::decode::UnknownShapePolicy;
use super::layer::Layer;
use super::shape::{Shape, ShapeKind};
use super::units::Offset;
use crate::error::LookupError;
use indexmap::IndexMap;

/// One shape in the store, stamped with its origin
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEntry {
    pub shape: Shape,
    /// Group id of the owning footprint, `None` for top-level shapes
    pub footprint_gid: Option<String>,
}

/// Owns all shapes and layers decoded from one board description.
///
/// Immutable once decoding finishes; a changed description means a fresh
/// decode pass, never an edit.
#[derive(Debug, Clone)]
pub struct ShapeStore {
    offset: Offset,
    policy: UnknownShapePolicy,
    layers: IndexMap<i32, Layer>,
    shapes: Vec<ShapeEntry>,
}

impl ShapeStore {
    pub fn new(offset: Offset, policy: UnknownShapePolicy) -> Self {
        ShapeStore {
            offset,
            policy,
            layers: IndexMap::new(),
            shapes: Vec::new(),
        }
    }

    /// The board coordinate offset the shapes were converted with
    pub fn offset(&self) -> &Offset {
        &self.offset
    }

    /// The tolerance policy the store was decoded under
    pub fn policy(&self) -> UnknownShapePolicy {
        self.policy
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.insert(layer.id, layer);
    }

    /// Append a top-level shape
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(ShapeEntry {
            shape,
            footprint_gid: None,
        });
    }

    /// Append a shape owned by the footprint with the given group id
    pub fn push_nested(&mut self, shape: Shape, footprint_gid: &str) {
        self.shapes.push(ShapeEntry {
            shape,
            footprint_gid: Some(footprint_gid.to_string()),
        });
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    pub fn shapes(&self) -> &[ShapeEntry] {
        &self.shapes
    }

    pub fn layer_by_id(&self, id: i32) -> Result<&Layer, LookupError> {
        self.layers.get(&id).ok_or(LookupError::LayerId { id })
    }

    pub fn layer_by_name(&self, name: &str) -> Result<&Layer, LookupError> {
        self.layers
            .values()
            .find(|layer| layer.name == name)
            .ok_or_else(|| LookupError::LayerName {
                name: name.to_string(),
            })
    }

    /// All shapes sitting on the given layer
    pub fn shapes_on_layer(&self, layer_id: i32) -> Vec<&ShapeEntry> {
        self.shapes
            .iter()
            .filter(|entry| entry.shape.layer_id() == Some(layer_id))
            .collect()
    }

    /// All shapes whose kind is one of the given set
    pub fn shapes_of_kinds(&self, kinds: &[ShapeKind]) -> Vec<&ShapeEntry> {
        self.shapes
            .iter()
            .filter(|entry| kinds.contains(&entry.shape.kind()))
            .collect()
    }

    /// Find a shape by its group id, e.g. the footprint a nested shape
    /// points back to
    pub fn shape_by_gid(&self, gid: &str) -> Result<&ShapeEntry, LookupError> {
        self.shapes
            .iter()
            .find(|entry| entry.shape.id() == Some(gid))
            .ok_or_else(|| LookupError::GroupId {
                gid: gid.to_string(),
            })
    }
}
