//! Shape and connector definitions for the diagram.

use crate::id::ShapeId;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Minimum shape scale. Resizing never collapses a shape below 0.3x its
/// base size.
pub const MIN_SCALE: f64 = 0.3;

/// The kind of a shape, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Diamond,
    /// Free-standing text label.
    #[serde(rename = "text-label")]
    Label,
}

impl ShapeKind {
    /// Base (unscaled) footprint of the kind.
    pub fn base_size(&self) -> Size {
        match self {
            ShapeKind::Rectangle => Size::new(90.0, 50.0),
            ShapeKind::Ellipse => Size::new(70.0, 70.0),
            ShapeKind::Diamond => Size::new(60.0, 60.0),
            ShapeKind::Label => Size::new(60.0, 30.0),
        }
    }

    /// Label a freshly created shape of this kind starts with.
    pub fn default_label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Diamond => "Diamond",
            ShapeKind::Label => "Text",
        }
    }
}

/// A single diagram shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Top-left anchor in canvas coordinates.
    pub position: Point,
    /// Uniform scale applied to the base size.
    pub scale: f64,
    /// Free text, arbitrary content including empty.
    pub label: String,
}

impl Shape {
    /// Create a shape of `kind` at `position` with default scale and label.
    pub fn new(id: ShapeId, kind: ShapeKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            scale: 1.0,
            label: kind.default_label().to_string(),
        }
    }

    /// Apply a scale delta, clamped so the shape never shrinks below
    /// [`MIN_SCALE`].
    pub fn apply_scale_delta(&mut self, delta: f64) {
        self.scale = (self.scale + delta).max(MIN_SCALE);
    }
}

/// A directional connector between two shapes.
///
/// Endpoints are weak references: a connector whose endpoint no longer
/// exists is filtered at read time, never treated as corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub from: ShapeId,
    pub to: ShapeId,
}

impl Connector {
    pub fn new(from: ShapeId, to: ShapeId) -> Self {
        Self { from, to }
    }

    /// Whether this connector references `id` as either endpoint.
    pub fn references(&self, id: ShapeId) -> bool {
        self.from == id || self.to == id
    }
}
