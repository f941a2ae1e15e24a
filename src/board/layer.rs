//! Board layer records

/// A board layer. Shapes reference layers by id and never own them.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Unique integer id, the target of shape layer references
    pub id: i32,
    /// Display name, e.g. "TopLayer" or "BoardOutLine"
    pub name: String,
    /// Display color as the source encodes it
    pub color: String,
    /// Visibility in the 3D view
    pub visible: bool,
    /// Visibility in the board editor, independent of the 3D view
    pub editor_visible: bool,
}
