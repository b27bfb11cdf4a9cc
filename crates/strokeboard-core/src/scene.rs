//! Scene store: the ordered element collection and current selection.

use crate::config::ViewBox;
use crate::render::{RenderContext, Renderer, SvgRenderer};
use crate::shapes::{ElementId, Shape};
use kurbo::Point;
use std::collections::HashMap;

/// Filename given to exported documents.
pub const EXPORT_FILENAME: &str = "exported.svg";
/// Content type of exported documents.
pub const EXPORT_CONTENT_TYPE: &str = "image/svg+xml";

/// A self-contained SVG payload ready to hand to a file consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

impl ExportedDocument {
    fn svg(content: String) -> Self {
        Self {
            filename: EXPORT_FILENAME.to_string(),
            content_type: EXPORT_CONTENT_TYPE.to_string(),
            content,
        }
    }

    /// Raw bytes of the payload.
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

/// All elements on the surface, in paint order.
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    /// Elements keyed by ID.
    elements: HashMap<ElementId, Shape>,
    /// Paint order (back to front).
    z_order: Vec<ElementId>,
    /// Currently selected element, if any.
    selected: Option<ElementId>,
}

impl SceneStore {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top of everything else.
    ///
    /// Re-inserting an existing ID replaces that element and moves it to
    /// the top.
    pub fn insert(&mut self, shape: Shape) -> ElementId {
        let id = shape.id();
        if self.elements.insert(id, shape).is_some() {
            self.z_order.retain(|&existing| existing != id);
        }
        self.z_order.push(id);
        id
    }

    /// Remove an element by identity. Unknown IDs are a no-op.
    ///
    /// Removing the selected element also clears the selection.
    pub fn remove(&mut self, id: ElementId) -> Option<Shape> {
        let removed = self.elements.remove(&id)?;
        self.z_order.retain(|&existing| existing != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(removed)
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.z_order.clear();
        self.selected = None;
    }

    pub fn get(&self, id: ElementId) -> Option<&Shape> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Shape> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Elements in paint order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.elements.get(id))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Topmost element whose painted geometry is under `point`.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.elements
                .get(id)
                .is_some_and(|shape| shape.hit_test(point, tolerance))
        })
    }

    /// Mark an element as selected. Unknown IDs clear the selection.
    pub fn select(&mut self, id: ElementId) {
        self.selected = self.contains(id).then_some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Serialize the scene as a standalone SVG document.
    ///
    /// The selection marker is view state and never appears in the export.
    pub fn export_document(&self, view_box: &ViewBox) -> ExportedDocument {
        let ctx = RenderContext::new(self, *view_box);
        ExportedDocument::svg(SvgRenderer.render(&ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, SerializableColor, ShapeKind, ShapeStyle};
    use crate::transform::AffineTransform;

    fn rect(x: f64, y: f64, size: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Point::new(x, y), size, size))
    }

    fn filled_rect(x: f64, y: f64, size: f64) -> Shape {
        let mut shape = rect(x, y, size);
        shape.style_mut().fill_color = Some(SerializableColor::black());
        shape
    }

    #[test]
    fn test_insert_appends() {
        let mut scene = SceneStore::new();
        let a = scene.insert(rect(0.0, 0.0, 10.0));
        let b = scene.insert(rect(5.0, 5.0, 10.0));
        let order: Vec<_> = scene.iter().map(Shape::id).collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_reinsert_moves_to_top() {
        let mut scene = SceneStore::new();
        let first = rect(0.0, 0.0, 10.0);
        let a = scene.insert(first.clone());
        let b = scene.insert(rect(5.0, 5.0, 10.0));
        scene.insert(first);
        let order: Vec<_> = scene.iter().map(Shape::id).collect();
        assert_eq!(order, vec![b, a]);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut scene = SceneStore::new();
        scene.insert(rect(0.0, 0.0, 10.0));
        assert!(scene.remove(uuid::Uuid::new_v4()).is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut scene = SceneStore::new();
        let id = scene.insert(rect(0.0, 0.0, 10.0));
        scene.select(id);
        assert_eq!(scene.selected(), Some(id));
        scene.remove(id);
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn test_select_unknown_clears() {
        let mut scene = SceneStore::new();
        let id = scene.insert(rect(0.0, 0.0, 10.0));
        scene.select(id);
        scene.select(uuid::Uuid::new_v4());
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn test_clear() {
        let mut scene = SceneStore::new();
        let id = scene.insert(rect(0.0, 0.0, 10.0));
        scene.select(id);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.selected(), None);
        assert_eq!(scene.iter().count(), 0);
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut scene = SceneStore::new();
        let bottom = scene.insert(filled_rect(0.0, 0.0, 100.0));
        let top = scene.insert(filled_rect(50.0, 50.0, 100.0));

        assert_eq!(scene.element_at(Point::new(75.0, 75.0), 0.0), Some(top));
        assert_eq!(scene.element_at(Point::new(25.0, 25.0), 0.0), Some(bottom));
        assert_eq!(scene.element_at(Point::new(400.0, 400.0), 0.0), None);
    }

    #[test]
    fn test_element_at_honors_transform() {
        let mut scene = SceneStore::new();
        let id = scene.insert(filled_rect(0.0, 0.0, 10.0));
        if let Some(shape) = scene.get_mut(id) {
            shape.set_transform(AffineTransform::new(100.0, 100.0, 1.0));
        }
        assert_eq!(scene.element_at(Point::new(5.0, 5.0), 0.0), None);
        assert_eq!(scene.element_at(Point::new(105.0, 105.0), 0.0), Some(id));
    }

    #[test]
    fn test_export_after_insert_and_remove() {
        let mut scene = SceneStore::new();
        let style = ShapeStyle::stroke(SerializableColor::black(), 5.0);
        let first = scene.insert(Shape::new(ShapeKind::Ellipse, style.clone()));
        let mut survivor = Shape::Rectangle(Rectangle::new(Point::new(10.0, 10.0), 40.0, 70.0));
        *survivor.style_mut() = style;
        survivor.set_transform(AffineTransform::new(4.0, 1.0, 1.2));
        let second = scene.insert(survivor);
        scene.remove(first);

        let doc = scene.export_document(&ViewBox::default());
        assert_eq!(doc.filename, "exported.svg");
        assert_eq!(doc.content_type, "image/svg+xml");
        assert!(!doc.content.contains("<ellipse"));
        assert!(doc.content.contains("<rect x=\"10\" y=\"10\" width=\"40\" height=\"70\""));
        assert!(doc.content.contains(" transform=\"translate(4, 1) scale(1.2)\""));
        assert_eq!(doc.content.matches("<rect").count(), 1);
        assert!(scene.get(second).is_some());
    }

    #[test]
    fn test_export_omits_selection_marker() {
        let mut scene = SceneStore::new();
        let id = scene.insert(rect(0.0, 0.0, 10.0));
        scene.select(id);
        let doc = scene.export_document(&ViewBox::default());
        assert!(!doc.content.contains("selected"));
        assert_eq!(doc.as_bytes(), doc.content.as_bytes());
    }
}
