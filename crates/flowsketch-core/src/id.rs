//! Shape identifier generation.
//!
//! Id creation is a capability injected into the editor so that shape
//! creation stays deterministic under test while production uses random
//! UUIDs.

use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Source of fresh shape identifiers.
pub trait IdSource {
    /// Produce the next identifier. Must never repeat within a session.
    fn next_id(&mut self) -> ShapeId;
}

/// Random v4 UUIDs, the production source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> ShapeId {
        Uuid::new_v4()
    }
}

/// Counter-derived identifiers for deterministic tests and presets.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Create a sequential source starting at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> ShapeId {
        let id = Uuid::from_u128(self.next);
        self.next += 1;
        id
    }
}
