//! Geometry pipeline: arc reconstruction, stroke buffering, polygon merging
//! and outline classification
//!
//! # Submodules
//! - `types` - points and multi-ring polygons
//! - `arc` - circle-center reconstruction for two-point arcs
//! - `buffer` - filled polygons from stroked paths
//! - `merge` - connectivity grouping and boolean union
//! - `outline` - border/hole classification and the memoized board outline

pub mod arc;
pub mod buffer;
pub mod merge;
pub mod outline;
pub mod types;

pub use arc::{ArcDegeneracy, ResolvedArc};
pub use buffer::stroke;
pub use merge::merge;
pub use outline::{Board, BoardOutline, OUTLINE_LAYER, OUTLINE_WIDTH};
pub use types::{Point, Polygon, CIRCLE_STEPS};
