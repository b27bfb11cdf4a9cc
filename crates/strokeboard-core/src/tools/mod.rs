//! Gesture state for the drawing surface.

use crate::scene::SceneStore;
use crate::shapes::{ElementId, Shape, ShapeKind, ShapeStyle};
use crate::synth;
use kurbo::Point;

/// An element under construction and the points sampled for it so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// Element being created; it lives in the scene while drafting.
    pub element: ElementId,
    points: Vec<Point>,
}

impl Draft {
    /// Start a draft with the gesture's first point.
    pub fn new(element: ElementId, start: Point) -> Self {
        Self {
            element,
            points: vec![start],
        }
    }

    /// Create a fresh element of `kind`, insert it on top of the scene and
    /// start drafting it from `start`.
    pub fn begin(scene: &mut SceneStore, kind: ShapeKind, style: ShapeStyle, start: Point) -> Self {
        let mut shape = Shape::new(kind, style);
        synth::synthesize(&mut shape, &[start]);
        let element = scene.insert(shape);
        Self::new(element, start)
    }

    /// Record a sampled point and rebuild the element's geometry.
    ///
    /// Returns `false` when the element is no longer in the scene.
    pub fn extend(&mut self, scene: &mut SceneStore, point: Point) -> bool {
        let Some(shape) = scene.get_mut(self.element) else {
            return false;
        };
        self.points.push(point);
        synth::synthesize(shape, &self.points);
        true
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// State of the single active gesture.
///
/// Drafting and dragging are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Creating a new element.
    Drawing(Draft),
    /// Moving an existing element.
    Dragging(ElementId),
}

impl Gesture {
    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }

    /// Element the gesture acts on.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Gesture::Idle => None,
            Gesture::Drawing(draft) => Some(draft.element),
            Gesture::Dragging(id) => Some(*id),
        }
    }

    /// End the gesture, returning the state it was in.
    pub fn end(&mut self) -> Gesture {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_inserts_element() {
        let mut scene = SceneStore::new();
        let draft = Draft::begin(
            &mut scene,
            ShapeKind::Rect,
            ShapeStyle::default(),
            Point::new(10.0, 10.0),
        );
        assert_eq!(scene.len(), 1);
        assert_eq!(draft.points(), &[Point::new(10.0, 10.0)]);
        let shape = scene.get(draft.element).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Rect);
        assert_eq!(shape.bounds().origin(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_extend_resynthesizes() {
        let mut scene = SceneStore::new();
        let mut draft = Draft::begin(
            &mut scene,
            ShapeKind::Path,
            ShapeStyle::default(),
            Point::new(0.0, 0.0),
        );
        assert!(draft.extend(&mut scene, Point::new(10.0, 0.0)));
        assert!(draft.extend(&mut scene, Point::new(20.0, 5.0)));
        let Some(Shape::Freehand(path)) = scene.get(draft.element) else {
            panic!("expected a freehand element");
        };
        assert_eq!(path.path.elements().len(), 3);
    }

    #[test]
    fn test_extend_after_removal() {
        let mut scene = SceneStore::new();
        let mut draft = Draft::begin(
            &mut scene,
            ShapeKind::Ellipse,
            ShapeStyle::default(),
            Point::ZERO,
        );
        scene.remove(draft.element);
        assert!(!draft.extend(&mut scene, Point::new(5.0, 5.0)));
        assert_eq!(draft.points().len(), 1);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_gesture_end() {
        let id = uuid::Uuid::new_v4();
        let mut gesture = Gesture::Dragging(id);
        assert!(gesture.is_active());
        assert_eq!(gesture.target(), Some(id));
        assert_eq!(gesture.end(), Gesture::Dragging(id));
        assert!(!gesture.is_active());
        assert_eq!(gesture.target(), None);
    }
}
