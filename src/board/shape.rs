//! The typed shape model
//!
//! Every raw record decodes into one variant of [`Shape`]. Consumers match
//! exhaustively, so supporting a new shape kind is a single-point,
//! compiler-checked change.

use crate::geom::types::Point;

/// A copper trace or outline segment: a stroked multi-point line on a layer
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub layer_id: i32,
    pub net: Option<String>,
    /// Stroke width in mm
    pub width: f64,
    pub locked: bool,
    pub points: Vec<Point>,
}

/// A plated through-hole connecting layers
#[derive(Debug, Clone, PartialEq)]
pub struct Via {
    pub id: String,
    pub net: Option<String>,
    pub locked: bool,
    pub center: Point,
    /// Outer (annular ring) diameter in mm
    pub diameter: f64,
    /// Drill diameter in mm
    pub drill_diameter: f64,
}

/// A soldering pad, optionally holding a round or slotted hole
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    pub id: String,
    pub layer_id: i32,
    pub net: Option<String>,
    /// Pin number; multiple pads on a board may share one
    pub number: Option<i32>,
    pub locked: bool,
    /// Whether the hole walls are plated
    pub plated: bool,
    /// Outline kind code as the source spells it ("ELLIPSE", "OVAL", ...)
    pub shape_code: String,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Hole diameter in mm, 0 when the pad has no hole
    pub hole_diameter: f64,
    /// Slot length in mm, 0 for round holes
    pub slot_length: f64,
    pub solder_mask_expansion: f64,
    /// Hole center when it differs from the pad center
    pub hole_center: Option<Point>,
    /// Slot path for slotted holes, empty for round ones
    pub slot: Vec<Point>,
}

/// How an arc record carries its geometry
#[derive(Debug, Clone, PartialEq)]
pub enum ArcGeometry {
    /// Two endpoints, a radius pair and the flags selecting which of the two
    /// candidate circle centers and directions is meant
    Encoded {
        start: Point,
        end: Point,
        radius_x: f64,
        radius_y: f64,
        clockwise: bool,
        solution_select: bool,
    },
    /// An already-sampled point polyline
    Sampled(Vec<Point>),
}

/// A curved track
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub id: String,
    pub layer_id: i32,
    pub net: Option<String>,
    /// Stroke width in mm
    pub width: f64,
    pub locked: bool,
    pub geometry: ArcGeometry,
}

/// A full circle outline on a layer
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub id: String,
    pub layer_id: i32,
    pub center: Point,
    /// Radius in mm
    pub radius: f64,
}

/// A bare, unplated drill hole
#[derive(Debug, Clone, PartialEq)]
pub struct Hole {
    pub id: String,
    pub center: Point,
    /// Drill diameter in mm
    pub diameter: f64,
}

/// A component footprint: a placement grouping whose member shapes are
/// flattened into the store, stamped with this footprint's group id
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    /// Group id, the back-reference target for member shapes
    pub id: String,
    /// Layer the footprint mounts on, deciding the board side
    pub layer_id: i32,
}

/// A footprint-mounted reference to an externally-fetched 3D model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRef {
    pub id: String,
    /// Identifier the external loader fetches the model by
    pub uuid: String,
    /// Declared model width in mm, the scaling target
    pub width: f64,
    /// Declared rotation about the three axes, degrees
    pub rotation: [f64; 3],
    /// Placement origin in mm, offset-corrected
    pub origin: Point,
}

/// One decoded shape record
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Track(Track),
    Via(Via),
    Pad(Pad),
    Arc(Arc),
    Circle(Circle),
    Hole(Hole),
    Footprint(Footprint),
    ModelRef(ModelRef),
    /// A recognized kind with no geometric meaning here, kept so the store
    /// mirrors the source document
    Unsupported { kind: String },
}

/// Discriminant of [`Shape`], for type-filtered lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Track,
    Via,
    Pad,
    Arc,
    Circle,
    Hole,
    Footprint,
    ModelRef,
    Unsupported,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Track(_) => ShapeKind::Track,
            Shape::Via(_) => ShapeKind::Via,
            Shape::Pad(_) => ShapeKind::Pad,
            Shape::Arc(_) => ShapeKind::Arc,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Hole(_) => ShapeKind::Hole,
            Shape::Footprint(_) => ShapeKind::Footprint,
            Shape::ModelRef(_) => ShapeKind::ModelRef,
            Shape::Unsupported { .. } => ShapeKind::Unsupported,
        }
    }

    /// The source kind tag, for messages and logs
    pub fn kind_name(&self) -> &'static str {
        match self.kind() {
            ShapeKind::Track => "TRACK",
            ShapeKind::Via => "VIA",
            ShapeKind::Pad => "PAD",
            ShapeKind::Arc => "ARC",
            ShapeKind::Circle => "CIRCLE",
            ShapeKind::Hole => "HOLE",
            ShapeKind::Footprint => "FOOTPRINT",
            ShapeKind::ModelRef => "SVGNODE",
            ShapeKind::Unsupported => "UNSUPPORTED",
        }
    }

    /// Stable identifier, absent for unsupported records
    pub fn id(&self) -> Option<&str> {
        match self {
            Shape::Track(s) => Some(&s.id),
            Shape::Via(s) => Some(&s.id),
            Shape::Pad(s) => Some(&s.id),
            Shape::Arc(s) => Some(&s.id),
            Shape::Circle(s) => Some(&s.id),
            Shape::Hole(s) => Some(&s.id),
            Shape::Footprint(s) => Some(&s.id),
            Shape::ModelRef(s) => Some(&s.id),
            Shape::Unsupported { .. } => None,
        }
    }

    /// Owning layer id, for the kinds that sit on a layer
    pub fn layer_id(&self) -> Option<i32> {
        match self {
            Shape::Track(s) => Some(s.layer_id),
            Shape::Pad(s) => Some(s.layer_id),
            Shape::Arc(s) => Some(s.layer_id),
            Shape::Circle(s) => Some(s.layer_id),
            Shape::Footprint(s) => Some(s.layer_id),
            Shape::Via(_) | Shape::Hole(_) | Shape::ModelRef(_) | Shape::Unsupported { .. } => None,
        }
    }
}
