//! Editor facade wiring the diagram store to the interaction controllers.

use crate::diagram::Diagram;
use crate::drag::{DragController, DragEnd};
use crate::id::{IdSource, RandomIds, ShapeId};
use crate::interaction::{Interaction, TapOutcome, ToolMode};
use crate::shapes::{Shape, ShapeKind};
use crate::template;
use kurbo::Point;

/// Top-left corner of the spawn region for newly added shapes.
const SPAWN_ORIGIN: Point = Point::new(40.0, 80.0);
/// Extent of the spawn region.
const SPAWN_WIDTH: f64 = 220.0;
const SPAWN_HEIGHT: f64 = 160.0;

/// Pick a spawn position inside the spawn region.
///
/// Uses a counter + hash approach (splitmix32-like) so repeated adds land
/// at scattered positions instead of stacking exactly on top of each other.
fn spawn_position() -> Point {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SPAWN_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SPAWN_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;

    let fx = (x & 0xFFFF) as f64 / 65536.0;
    let fy = (x >> 16) as f64 / 65536.0;
    Point::new(
        SPAWN_ORIGIN.x + fx * SPAWN_WIDTH,
        SPAWN_ORIGIN.y + fy * SPAWN_HEIGHT,
    )
}

/// A staged in-place text edit. The buffer only lands in the shape's label
/// on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditSession {
    pub target: ShapeId,
    pub buffer: String,
}

/// The diagram editor: the authoritative store plus the ephemeral
/// interaction state, fed by discrete pointer events.
pub struct Editor {
    pub diagram: Diagram,
    interaction: Interaction,
    drag: DragController,
    text_edit: Option<TextEditSession>,
    ids: Box<dyn IdSource>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with an empty diagram.
    pub fn new() -> Self {
        Self::with_ids(Box::new(RandomIds))
    }

    /// Create an editor seeded with the flowchart preset template.
    pub fn from_template() -> Self {
        let mut editor = Self::new();
        editor.diagram = template::flowchart_preset(editor.ids.as_mut());
        editor
    }

    /// Create an editor with an injected id source.
    pub fn with_ids(ids: Box<dyn IdSource>) -> Self {
        Self {
            diagram: Diagram::new(),
            interaction: Interaction::new(),
            drag: DragController::new(),
            text_edit: None,
            ids,
        }
    }

    /// Add a shape of `kind` at a randomized position inside the spawn
    /// region. Returns the new shape's id.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        self.add_shape_at(kind, spawn_position())
    }

    /// Add a shape of `kind` at an explicit position.
    pub fn add_shape_at(&mut self, kind: ShapeKind, position: Point) -> ShapeId {
        let id = self.ids.next_id();
        self.diagram.insert_shape(Shape::new(id, kind, position));
        log::debug!("added {kind:?} shape {id} at {position:?}");
        id
    }

    /// Remove a shape, dropping its connectors and clearing any ephemeral
    /// state that referenced it.
    pub fn remove_shape(&mut self, id: ShapeId) {
        if self.diagram.remove_shape(id).is_none() {
            return;
        }
        self.interaction.shape_removed(id);
        if self.text_edit.as_ref().is_some_and(|edit| edit.target == id) {
            self.text_edit = None;
        }
        if self.drag.is_active() {
            self.drag.cancel();
        }
        log::debug!("removed shape {id}");
    }

    /// Apply a resize delta to a shape's scale.
    pub fn apply_scale_delta(&mut self, id: ShapeId, delta: f64) {
        self.diagram.apply_scale_delta(id, delta);
    }

    // --- Tool mode -----------------------------------------------------

    /// Current tool mode.
    pub fn tool_mode(&self) -> ToolMode {
        self.interaction.mode()
    }

    /// Switch tool mode.
    pub fn set_tool(&mut self, mode: ToolMode) {
        match mode {
            ToolMode::Select => self.interaction.enter_select(),
            ToolMode::Connect => self.interaction.enter_connect(),
        }
    }

    /// Currently selected shape.
    pub fn selected_shape(&self) -> Option<ShapeId> {
        self.interaction.selected()
    }

    /// Pending connector source, if connect mode is waiting for a target.
    pub fn pending_source(&self) -> Option<ShapeId> {
        self.interaction.pending_source()
    }

    // --- Pointer events ------------------------------------------------

    /// Pointer down: capture the topmost shape under the pointer for
    /// dragging, if any.
    pub fn pointer_down(&mut self, point: Point) {
        if let Some(id) = self.diagram.shape_at(point) {
            // Shape was just found; its position is present.
            if let Some(shape) = self.diagram.shape(id) {
                self.drag.begin(id, point, shape.position);
            }
        }
    }

    /// Pointer move: reposition the dragged shape, if any.
    pub fn pointer_move(&mut self, point: Point) {
        if let Some((id, position)) = self.drag.update(point) {
            self.diagram.update_position(id, position);
        }
    }

    /// Pointer up: finish the drag; a sub-threshold release becomes a tap
    /// and is routed to the tool-mode controller.
    pub fn pointer_up(&mut self, point: Point) -> Option<TapOutcome> {
        match self.drag.end(point)? {
            DragEnd::Tap(id) => {
                let outcome = self.interaction.tap_shape(id);
                if let TapOutcome::ConnectorCompleted { from, to } = outcome {
                    self.diagram.add_connector(from, to);
                    log::debug!("connected {from} -> {to}");
                }
                Some(outcome)
            }
            DragEnd::Moved(_) => None,
        }
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    // --- Text editing --------------------------------------------------

    /// Open the in-place text edit flow for a shape. No-op when the shape
    /// is absent.
    pub fn begin_text_edit(&mut self, id: ShapeId) {
        if let Some(shape) = self.diagram.shape(id) {
            self.text_edit = Some(TextEditSession {
                target: id,
                buffer: shape.label.clone(),
            });
        }
    }

    /// The active text-edit session.
    pub fn text_edit(&self) -> Option<&TextEditSession> {
        self.text_edit.as_ref()
    }

    /// Replace the staged edit buffer.
    pub fn set_text_buffer(&mut self, text: impl Into<String>) {
        if let Some(edit) = self.text_edit.as_mut() {
            edit.buffer = text.into();
        }
    }

    /// Commit the staged buffer into the shape's label and close the flow.
    pub fn commit_text_edit(&mut self) {
        if let Some(edit) = self.text_edit.take() {
            self.diagram.set_label(edit.target, edit.buffer);
        }
    }

    /// Close the flow discarding the staged buffer.
    pub fn cancel_text_edit(&mut self) {
        self.text_edit = None;
    }
}
