//! Rectangle element.

use super::{ElementId, ShapeStyle, ShapeTrait};
use crate::transform::AffineTransform;
use kurbo::{Point, Rect};
use uuid::Uuid;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
    pub(crate) transform: Option<AffineTransform>,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
            transform: None,
        }
    }

    /// Replace the geometry with a normalized box.
    pub fn set_rect(&mut self, rect: Rect) {
        let rect = rect.abs();
        self.position = rect.origin();
        self.width = rect.width();
        self.height = rect.height();
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        let reach = tolerance + self.style.stroke_width / 2.0;
        let outer = rect.inflate(reach, reach);
        if self.style.fill_color.is_some() {
            // Filled: hit anywhere inside
            return outer.contains(point);
        }
        // Outline only: hit on the border band
        let inner = rect.inflate(-reach, -reach);
        outer.contains(point) && !inner.contains(point)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform_attribute(&self) -> Option<AffineTransform> {
        self.transform
    }

    fn set_transform(&mut self, transform: AffineTransform) {
        self.transform = Some(transform);
    }
}
