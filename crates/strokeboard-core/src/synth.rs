//! Shape synthesis: element geometry from a draft's sampled points.
//!
//! Synthesis runs once per sampled point and always starts over from the
//! full point history, so the element renders incrementally while the
//! pointer moves.

use crate::shapes::Shape;
use kurbo::{BezPath, Point, Rect};

/// Fraction of the neighbour-to-neighbour vector used for control points.
pub const SMOOTHING: f64 = 0.2;

/// Build a smoothed path through every sampled point.
///
/// Emits one move-to for the first point and one cubic curve-to per
/// following point.
pub fn smooth_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);
    for (i, &point) in points.iter().enumerate().skip(1) {
        let start = control_point(points, i - 1, false);
        let end = control_point(points, i, true);
        path.curve_to(start, end, point);
    }
    path
}

/// Control point leaving (or, reversed, entering) `points[i]`.
///
/// The offset runs along the vector between the neighbours of `i`, with
/// missing neighbours clamped to `points[i]` itself.
fn control_point(points: &[Point], i: usize, reverse: bool) -> Point {
    let current = points[i];
    let previous = i.checked_sub(1).map_or(current, |j| points[j]);
    let next = points.get(i + 1).copied().unwrap_or(current);
    let offset = (next - previous) * SMOOTHING;
    if reverse {
        current - offset
    } else {
        current + offset
    }
}

/// Axis-aligned box spanned by two corner points, in either order.
pub fn corner_box(start: Point, end: Point) -> Rect {
    Rect::new(
        start.x.min(end.x),
        start.y.min(end.y),
        start.x.max(end.x),
        start.y.max(end.y),
    )
}

/// Circle center and radius for a drag from `start` to `end`.
///
/// The radius is the larger half-extent of the corner box and the circle
/// grows from the box's min corner.
pub fn circle_geometry(start: Point, end: Point) -> (Point, f64) {
    let rect = corner_box(start, end);
    let radius = (rect.width() / 2.0).max(rect.height() / 2.0);
    (Point::new(rect.x0 + radius, rect.y0 + radius), radius)
}

/// Recompute an element's geometry from its draft points.
///
/// An empty history leaves the element untouched. Zero-size results are
/// valid geometry.
pub fn synthesize(shape: &mut Shape, points: &[Point]) {
    let (Some(&start), Some(&end)) = (points.first(), points.last()) else {
        return;
    };
    match shape {
        Shape::Freehand(freehand) => freehand.path = smooth_path(points),
        Shape::Rectangle(rect) => rect.set_rect(corner_box(start, end)),
        Shape::Ellipse(ellipse) => {
            let rect = corner_box(start, end);
            ellipse.center = rect.center();
            ellipse.radius_x = rect.width() / 2.0;
            ellipse.radius_y = rect.height() / 2.0;
        }
        Shape::Circle(circle) => {
            let (center, radius) = circle_geometry(start, end);
            circle.center = center;
            circle.radius_x = radius;
            circle.radius_y = radius;
        }
    }
}
