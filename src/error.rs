//! Error types for the board geometry pipeline
//!
//! Three failure families exist:
//! - [`DecodeError`] - a raw shape or layer record could not be turned into a
//!   typed value (bad field count, bad tag, malformed arc path, ...)
//! - [`LookupError`] - a shape referenced a layer or footprint group that is
//!   not present in the store
//! - [`ClassificationError`] - the merged outline polygons contain no
//!   well-formed board border
//!
//! All error types use `thiserror`. Arc-center degeneracy is deliberately
//! absent here: it is recovered in place with a chord fallback and only
//! logged, never propagated.

use thiserror::Error;

/// Failure while decoding a single raw record into a typed shape or layer.
///
/// Always fatal to the record being decoded; whether it aborts the whole
/// document or is skipped with a warning depends on the decoder's
/// [`UnknownShapePolicy`](crate::board::decode::UnknownShapePolicy).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A delimited record did not have the field count its kind requires
    #[error("{kind} record has {count} fields, expected {expected}")]
    FieldCount {
        /// The shape kind tag of the record.
        kind: &'static str,
        /// The number of fields found.
        count: usize,
        /// The number of fields the kind requires.
        expected: &'static str,
    },

    /// The leading tag of a record did not match the kind being decoded
    #[error("record tagged '{found}' where {expected} was expected")]
    TagMismatch {
        /// The expected kind tag.
        expected: &'static str,
        /// The tag actually found.
        found: String,
    },

    /// A numeric field failed to parse
    #[error("invalid number '{value}' in {field}")]
    InvalidNumber {
        /// The name of the field being parsed.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// A coordinate list had an odd number of values
    #[error("coordinate list of {kind} record has an odd number of values")]
    OddCoordinateCount {
        /// The shape kind tag of the record.
        kind: &'static str,
    },

    /// An arc path string did not match the expected `M .. A ..` form
    #[error("arc path '{path}' does not match the expected form")]
    ArcPath {
        /// The path string that failed to match.
        path: String,
    },

    /// The board offset was missing or not finite
    #[error("board offset must be a finite pair, got ({x}, {y})")]
    NonFiniteOffset {
        /// The x value found.
        x: f64,
        /// The y value found.
        y: f64,
    },

    /// A record kind that no decoder exists for, under the fail policy
    #[error("unknown shape kind '{kind}'")]
    UnknownKind {
        /// The unrecognized kind tag.
        kind: String,
    },

    /// A structured record was missing a required field
    #[error("missing field '{field}' in {kind} record")]
    MissingField {
        /// The shape kind of the record.
        kind: &'static str,
        /// The missing field name.
        field: &'static str,
    },

    /// The document as a whole had the wrong shape
    #[error("malformed board document: {detail}")]
    Document {
        /// What was wrong with the document.
        detail: String,
    },
}

/// A reference inside the store could not be resolved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// No layer with the given id
    #[error("layer {id} not found")]
    LayerId {
        /// The layer id that was looked up.
        id: i32,
    },

    /// No layer with the given name
    #[error("layer '{name}' not found")]
    LayerName {
        /// The layer name that was looked up.
        name: String,
    },

    /// No shape with the given footprint group id
    #[error("shape with group id '{gid}' not found")]
    GroupId {
        /// The group id that was looked up.
        gid: String,
    },
}

/// The merged outline polygons could not be classified into a border.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassificationError {
    /// No merged polygon encloses exactly one empty interior
    #[error("no closed board outline found on the outline layer")]
    NoBorder,

    /// A shape kind that cannot contribute outline geometry sat on the
    /// outline layer, under the fail policy
    #[error("unexpected {kind} shape on the outline layer")]
    UnexpectedOutlineShape {
        /// The offending shape kind.
        kind: &'static str,
    },
}

/// Unified error type for the whole geometry pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Record decoding failure
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Store lookup failure
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Border classification failure
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

/// Result type using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
