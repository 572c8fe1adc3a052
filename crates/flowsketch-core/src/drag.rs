//! Drag controller: converts pointer-move streams into shape positions.

use crate::id::ShapeId;
use kurbo::Point;

/// Manhattan displacement below which a pointer-down/up pair is a tap,
/// not a drag.
pub const TAP_THRESHOLD: f64 = 10.0;

/// State of a drag interaction.
#[derive(Debug, Clone, Default)]
enum DragState {
    /// No pointer captured.
    #[default]
    Idle,
    /// Pointer is down on a shape.
    Active {
        /// Shape being dragged.
        shape: ShapeId,
        /// Absolute pointer position at grab time.
        pointer_start: Point,
        /// Shape position at grab time.
        shape_start: Point,
    },
}

/// How a drag interaction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    /// Displacement stayed below the threshold; reclassified as a tap.
    Tap(ShapeId),
    /// A real drag; no tap fires.
    Moved(ShapeId),
}

/// Tracks one pointer-drag at a time.
///
/// Positions are delta-based: each move yields
/// `shape_start + (pointer - pointer_start)`, so the grab point under the
/// finger stays fixed wherever within the shape the drag started. The move
/// path allocates nothing; it runs once per input sample.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the pointer on a shape.
    pub fn begin(&mut self, shape: ShapeId, pointer: Point, shape_position: Point) {
        self.state = DragState::Active {
            shape,
            pointer_start: pointer,
            shape_start: shape_position,
        };
    }

    /// Feed a pointer-move sample. Returns the shape's new position while
    /// a drag is active.
    pub fn update(&self, pointer: Point) -> Option<(ShapeId, Point)> {
        match self.state {
            DragState::Active {
                shape,
                pointer_start,
                shape_start,
            } => {
                let delta = pointer - pointer_start;
                Some((shape, shape_start + delta))
            }
            DragState::Idle => None,
        }
    }

    /// Release the pointer and classify the interaction.
    pub fn end(&mut self, pointer: Point) -> Option<DragEnd> {
        match std::mem::take(&mut self.state) {
            DragState::Active {
                shape,
                pointer_start,
                ..
            } => {
                let displacement = (pointer.x - pointer_start.x).abs()
                    + (pointer.y - pointer_start.y).abs();
                if displacement < TAP_THRESHOLD {
                    Some(DragEnd::Tap(shape))
                } else {
                    Some(DragEnd::Moved(shape))
                }
            }
            DragState::Idle => None,
        }
    }

    /// Abandon the current drag, if any.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Check if a drag is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id(n: u128) -> ShapeId {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_delta_based_positions() {
        let mut drag = DragController::new();
        // Grab at (120, 80) while the shape sits at (100, 60): the grab
        // point is 20,20 into the shape.
        drag.begin(id(1), Point::new(120.0, 80.0), Point::new(100.0, 60.0));

        let (shape, pos) = drag.update(Point::new(170.0, 110.0)).unwrap();
        assert_eq!(shape, id(1));
        assert_eq!(pos, Point::new(150.0, 90.0));
    }

    #[test]
    fn test_release_below_threshold_is_tap() {
        let mut drag = DragController::new();
        drag.begin(id(1), Point::new(100.0, 100.0), Point::ZERO);
        let end = drag.end(Point::new(104.0, 103.0));
        assert_eq!(end, Some(DragEnd::Tap(id(1))));
        assert!(!drag.is_active());
    }

    #[test]
    fn test_release_at_threshold_is_drag() {
        let mut drag = DragController::new();
        drag.begin(id(1), Point::new(100.0, 100.0), Point::ZERO);
        // Manhattan displacement exactly 10: a drag, not a tap.
        let end = drag.end(Point::new(106.0, 104.0));
        assert_eq!(end, Some(DragEnd::Moved(id(1))));
    }

    #[test]
    fn test_net_zero_drag_is_tap() {
        let mut drag = DragController::new();
        let start = Point::new(50.0, 50.0);
        drag.begin(id(1), start, Point::new(10.0, 10.0));

        // Wander away and come back.
        let (_, pos) = drag.update(Point::new(90.0, 70.0)).unwrap();
        assert_eq!(pos, Point::new(50.0, 30.0));
        let (_, pos) = drag.update(start).unwrap();
        assert_eq!(pos, Point::new(10.0, 10.0));

        assert_eq!(drag.end(start), Some(DragEnd::Tap(id(1))));
    }

    #[test]
    fn test_end_without_begin() {
        let mut drag = DragController::new();
        assert_eq!(drag.end(Point::ZERO), None);
    }

    #[test]
    fn test_cancel() {
        let mut drag = DragController::new();
        drag.begin(id(1), Point::ZERO, Point::ZERO);
        drag.cancel();
        assert!(!drag.is_active());
        assert_eq!(drag.update(Point::new(5.0, 5.0)), None);
    }
}
