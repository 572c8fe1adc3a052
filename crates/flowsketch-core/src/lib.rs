//! FlowSketch Core Library
//!
//! Platform-agnostic data model and interaction logic for the FlowSketch
//! diagram editor: shapes, connectors, geometry resolution, tool modes,
//! drag handling and preset templates.

pub mod diagram;
pub mod drag;
pub mod editor;
pub mod geometry;
pub mod id;
pub mod interaction;
pub mod shapes;
pub mod template;

pub use diagram::Diagram;
pub use drag::{DragController, DragEnd, TAP_THRESHOLD};
pub use editor::{Editor, TextEditSession};
pub use id::{IdSource, RandomIds, SequentialIds, ShapeId};
pub use interaction::{Interaction, TapOutcome, ToolMode};
pub use shapes::{Connector, Shape, ShapeKind, MIN_SCALE};
pub use template::flowchart_preset;
