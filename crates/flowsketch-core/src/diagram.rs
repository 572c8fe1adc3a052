//! The authoritative in-memory diagram model.

use crate::geometry;
use crate::id::ShapeId;
use crate::shapes::{Connector, Shape};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The aggregate of shapes and connectors being edited.
///
/// Shapes are kept in insertion order, which doubles as z-order (back to
/// front). Connectors may reference ids that are no longer present; such
/// stale references are filtered at read time rather than eagerly pruned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub shapes: Vec<Shape>,
    pub connectors: Vec<Connector>,
}

impl Diagram {
    /// Create a new empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the diagram has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Append a shape at the top of the z-order.
    pub fn insert_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Get a shape by id.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Get a mutable reference to a shape by id.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Move a shape. No-op when `id` is absent.
    pub fn update_position(&mut self, id: ShapeId, position: Point) {
        if let Some(shape) = self.shape_mut(id) {
            shape.position = position;
        }
    }

    /// Apply a scale delta to a shape, clamped at the minimum scale.
    /// No-op when `id` is absent.
    pub fn apply_scale_delta(&mut self, id: ShapeId, delta: f64) {
        if let Some(shape) = self.shape_mut(id) {
            shape.apply_scale_delta(delta);
        }
    }

    /// Overwrite a shape's label. No-op when `id` is absent.
    pub fn set_label(&mut self, id: ShapeId, label: impl Into<String>) {
        if let Some(shape) = self.shape_mut(id) {
            shape.label = label.into();
        }
    }

    /// Remove a shape and drop every connector referencing it.
    /// Returns the removed shape, or `None` when `id` is absent.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        let shape = self.shapes.remove(index);
        self.connectors.retain(|c| !c.references(id));
        Some(shape)
    }

    /// Append a connector unconditionally. Self-loops and duplicates are
    /// permitted; the store keeps no dedup invariant.
    pub fn add_connector(&mut self, from: ShapeId, to: ShapeId) {
        self.connectors.push(Connector::new(from, to));
    }

    /// Connectors whose endpoints both resolve to live shapes.
    pub fn live_connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors
            .iter()
            .filter(|c| self.shape(c.from).is_some() && self.shape(c.to).is_some())
    }

    /// Anchor-to-anchor endpoint pairs for every live connector, in the
    /// order the renderer draws them.
    pub fn connector_segments(&self) -> Vec<(Point, Point)> {
        self.live_connectors()
            .filter_map(|c| {
                let from = self.shape(c.from)?;
                let to = self.shape(c.to)?;
                Some((geometry::anchor_point(from), geometry::anchor_point(to)))
            })
            .collect()
    }

    /// Find the topmost shape at a canvas point, if any.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        // Front to back so the topmost shape wins.
        self.shapes
            .iter()
            .rev()
            .find(|s| geometry::hit_test(s, point))
            .map(|s| s.id)
    }

    /// Serialize the diagram to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a diagram from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
