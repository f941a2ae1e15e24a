//! Board geometry reconstruction for PCB descriptions
//!
//! Turns a flat, per-shape board description into closed 2D polygons: the
//! board border, the holes through it and the placement transform of every
//! footprint-mounted 3D model. The output is what a mesh builder needs to
//! extrude and render the board; extrusion, model fetching and file export
//! live outside this crate.
//!
//! The pass is a single synchronous pipeline:
//!
//! ```text
//! raw description -> decode -> shape store -> stroke buffer -> merge
//!                 -> border/hole classification (+ placement transforms)
//! ```
//!
//! # Example
//! ```
//! use pcb3d::{parse_document, Board};
//!
//! let doc = serde_json::json!({
//!     "head": { "x": 4000, "y": 3000 },
//!     "layers": ["10~BoardOutLine~#FF00FF~true~true~true~"],
//!     "shape": [
//!         "TRACK~1~10~~4000 3000 4100 3000 4100 2950 4000 2950 4000 3000~gge1~0"
//!     ]
//! });
//! let board = Board::new(parse_document(&doc)?);
//! let outline = board.outline()?;
//! assert!(outline.holes.is_empty());
//! # Ok::<(), pcb3d::Error>(())
//! ```

pub mod board;
pub mod error;
pub mod geom;
pub mod placement;

pub use board::{parse_document, Shape, ShapeKind, ShapeStore, UnknownShapePolicy};
pub use error::{ClassificationError, DecodeError, Error, LookupError, Result};
pub use geom::{Board, BoardOutline, Point, Polygon, OUTLINE_WIDTH};
pub use placement::{
    model_refs, resolve_placement, ModelBounds, PlacementTransform, BOARD_THICKNESS,
};
