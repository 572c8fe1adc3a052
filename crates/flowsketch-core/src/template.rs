//! Preset diagram templates.

use crate::diagram::Diagram;
use crate::id::IdSource;
use crate::shapes::{Shape, ShapeKind};
use kurbo::Point;

/// Build the flowchart preset used when the editor is entered through the
/// template-selection path: start, process, decision and a note, already
/// connected.
pub fn flowchart_preset(ids: &mut dyn IdSource) -> Diagram {
    let mut diagram = Diagram::new();

    let start = ids.next_id();
    let mut shape = Shape::new(start, ShapeKind::Ellipse, Point::new(120.0, 40.0));
    shape.label = "Start".to_string();
    diagram.insert_shape(shape);

    let process = ids.next_id();
    let mut shape = Shape::new(process, ShapeKind::Rectangle, Point::new(110.0, 160.0));
    shape.label = "Process".to_string();
    diagram.insert_shape(shape);

    let decision = ids.next_id();
    let mut shape = Shape::new(decision, ShapeKind::Diamond, Point::new(125.0, 270.0));
    shape.label = "Decision".to_string();
    diagram.insert_shape(shape);

    let note = ids.next_id();
    let mut shape = Shape::new(note, ShapeKind::Label, Point::new(260.0, 285.0));
    shape.label = "Add notes here".to_string();
    diagram.insert_shape(shape);

    diagram.add_connector(start, process);
    diagram.add_connector(process, decision);
    diagram.add_connector(decision, note);

    diagram
}
