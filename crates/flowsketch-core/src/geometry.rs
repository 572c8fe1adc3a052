//! Geometry resolution for shapes.
//!
//! Pure functions mapping a shape's kind, position and scale to its visual
//! footprint. The renderer and the connector endpoint computation must both
//! go through these functions; if they disagree, connector lines visually
//! detach from their shapes.

use crate::shapes::Shape;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Size};

/// Visual footprint of a shape after scaling.
pub fn scaled_size(shape: &Shape) -> Size {
    let base = shape.kind.base_size();
    Size::new(base.width * shape.scale, base.height * shape.scale)
}

/// Bounding box in canvas coordinates.
pub fn bounds(shape: &Shape) -> Rect {
    let size = scaled_size(shape);
    Rect::new(
        shape.position.x,
        shape.position.y,
        shape.position.x + size.width,
        shape.position.y + size.height,
    )
}

/// The point connector endpoints attach to: the shape's visual center,
/// `position + (base_size / 2) * scale`.
pub fn anchor_point(shape: &Shape) -> Point {
    let base = shape.kind.base_size();
    Point::new(
        shape.position.x + base.width / 2.0 * shape.scale,
        shape.position.y + base.height / 2.0 * shape.scale,
    )
}

/// Check if a canvas point hits the shape's scaled bounds.
pub fn hit_test(shape: &Shape, point: Point) -> bool {
    bounds(shape).contains(point)
}

/// Outline path for rendering.
pub fn outline_path(shape: &Shape) -> BezPath {
    use crate::shapes::ShapeKind;

    let rect = bounds(shape);
    match shape.kind {
        ShapeKind::Rectangle | ShapeKind::Label => rect.to_path(0.1),
        ShapeKind::Ellipse => kurbo::Ellipse::from_rect(rect).to_path(0.1),
        ShapeKind::Diamond => {
            let center = rect.center();
            let mut path = BezPath::new();
            path.move_to(Point::new(center.x, rect.y0));
            path.line_to(Point::new(rect.x1, center.y));
            path.line_to(Point::new(center.x, rect.y1));
            path.line_to(Point::new(rect.x0, center.y));
            path.close_path();
            path
        }
    }
}
