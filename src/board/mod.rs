//! Board description model: units, layers, shapes, decoding and storage
//!
//! # Submodules
//! - `units` - raw-unit to millimeter conversion and the board offset
//! - `layer` - layer records
//! - `shape` - the typed shape model
//! - `decode` - the two description-generation decoders
//! - `store` - flat ownership of decoded shapes and layers

pub mod decode;
pub mod layer;
pub mod shape;
pub mod store;
pub mod units;

pub use decode::{parse_document, UnknownShapePolicy};
pub use layer::Layer;
pub use shape::{
    Arc, ArcGeometry, Circle, Footprint, Hole, ModelRef, Pad, Shape, ShapeKind, Track, Via,
};
pub use store::{ShapeEntry, ShapeStore};
pub use units::{dist_to_mm, Offset};
