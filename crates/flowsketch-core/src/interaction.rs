//! Tool-mode state machine.
//!
//! One tagged value holds the whole ephemeral interaction state, so a
//! pending connector source cannot exist while in select mode.

use crate::id::ShapeId;
use serde::{Deserialize, Serialize};

/// The interpretation rule currently applied to a tap on a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolMode {
    Select,
    Connect,
}

/// Ephemeral interaction state, not part of the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Taps select shapes.
    Select { selected: Option<ShapeId> },
    /// Taps pick connector endpoints; `pending` is the chosen source
    /// awaiting a target tap.
    Connect { pending: Option<ShapeId> },
}

/// What a tap on a shape resulted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The shape became the selection.
    Selected(ShapeId),
    /// The shape became the pending connector source.
    ConnectPending(ShapeId),
    /// A connector should be created; the controller has reverted to
    /// select mode.
    ConnectorCompleted { from: ShapeId, to: ShapeId },
    /// Tap on the shape already pending; kept pending, nothing created.
    Ignored,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::Select { selected: None }
    }
}

impl Interaction {
    /// Start in select mode with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tool mode.
    pub fn mode(&self) -> ToolMode {
        match self {
            Interaction::Select { .. } => ToolMode::Select,
            Interaction::Connect { .. } => ToolMode::Connect,
        }
    }

    /// Currently selected shape, if any.
    pub fn selected(&self) -> Option<ShapeId> {
        match self {
            Interaction::Select { selected } => *selected,
            Interaction::Connect { .. } => None,
        }
    }

    /// The pending connector source, if any.
    pub fn pending_source(&self) -> Option<ShapeId> {
        match self {
            Interaction::Connect { pending } => *pending,
            Interaction::Select { .. } => None,
        }
    }

    /// Switch to connect mode (explicit tool selection by the user).
    pub fn enter_connect(&mut self) {
        *self = Interaction::Connect { pending: None };
    }

    /// Switch back to select mode, dropping any pending source.
    pub fn enter_select(&mut self) {
        *self = Interaction::Select { selected: None };
    }

    /// Handle a tap on a shape.
    ///
    /// In select mode the shape becomes the selection. In connect mode the
    /// first tap stages the source; a second tap on a different shape
    /// completes the connector and auto-reverts to select mode. Tapping
    /// the pending shape again is a no-op, which keeps an accidental
    /// double-tap from producing a zero-length self-connector.
    pub fn tap_shape(&mut self, id: ShapeId) -> TapOutcome {
        match self {
            Interaction::Select { selected } => {
                *selected = Some(id);
                TapOutcome::Selected(id)
            }
            Interaction::Connect { pending: None } => {
                *self = Interaction::Connect { pending: Some(id) };
                TapOutcome::ConnectPending(id)
            }
            Interaction::Connect { pending: Some(source) } => {
                let from = *source;
                if from == id {
                    return TapOutcome::Ignored;
                }
                *self = Interaction::Select { selected: None };
                TapOutcome::ConnectorCompleted { from, to: id }
            }
        }
    }

    /// Drop any reference to a removed shape.
    pub fn shape_removed(&mut self, id: ShapeId) {
        match self {
            Interaction::Select { selected } if *selected == Some(id) => *selected = None,
            Interaction::Connect { pending } if *pending == Some(id) => *pending = None,
            _ => {}
        }
    }
}
