//! The editing surface: routes input to selection, creation and transforms.

use crate::config::SurfaceConfig;
use crate::input::{EditCommand, KeyEvent, PointerEvent, SurfaceBounds};
use crate::render::{RenderContext, Renderer, SvgRenderer};
use crate::scene::{ExportedDocument, SceneStore};
use crate::shapes::{ElementId, Shape, ShapeKind};
use crate::tools::{Draft, Gesture};
use crate::transform::{SCALE_STEP, apply_scale_step, apply_translation};
use kurbo::Point;

/// Extra reach, in surface pixels, around painted geometry for selection.
pub const HIT_TOLERANCE: f64 = 1.0;

/// Operations the host may invoke on a mounted surface.
pub trait DrawingSurface {
    /// The currently selected element, if any.
    fn selected_element(&self) -> Option<ElementId>;

    /// Append an element on top of the scene.
    fn insert_element(&mut self, element: Shape);

    /// Remove an element. Unknown IDs are ignored.
    fn delete_element(&mut self, id: ElementId);

    /// Remove every element.
    fn clear(&mut self);

    /// Serialize the scene as an SVG file payload.
    fn export_as_svg(&self) -> ExportedDocument;
}

/// A drawing surface with its scene and the gesture in progress.
#[derive(Debug, Clone, Default)]
pub struct DrawingBoard {
    config: SurfaceConfig,
    bounds: SurfaceBounds,
    scene: SceneStore,
    gesture: Gesture,
}

impl DrawingBoard {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// New style and mode apply to the next creation gesture only; an
    /// element already being drafted keeps its kind and style.
    pub fn configure(&mut self, config: SurfaceConfig) {
        log::debug!("Surface reconfigured: {:?}", config);
        self.config = config;
    }

    /// Change the creation kind for the next gesture.
    pub fn set_mode(&mut self, mode: ShapeKind) {
        self.config.mode = mode;
    }

    /// Record where the surface sits in client coordinates.
    pub fn set_bounds(&mut self, bounds: SurfaceBounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Handle a pointer event carrying client coordinates.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        let point = self.bounds.to_local(event.position());
        match event {
            PointerEvent::Down { button, .. } => {
                if !button.is_primary() {
                    log::debug!("Ignoring {:?} button press", button);
                    return;
                }
                self.pointer_down(point);
            }
            PointerEvent::Move { movement, .. } => {
                let lost_target = match &mut self.gesture {
                    Gesture::Idle => false,
                    // Drag only touches the transform, never geometry.
                    Gesture::Dragging(id) => match self.scene.get_mut(*id) {
                        Some(shape) => {
                            apply_translation(shape, movement);
                            false
                        }
                        None => true,
                    },
                    Gesture::Drawing(draft) => !draft.extend(&mut self.scene, point),
                };
                if lost_target {
                    log::debug!("Gesture target was removed, ending gesture");
                    self.gesture = Gesture::Idle;
                }
            }
            PointerEvent::Up { .. } => self.end_gesture(),
        }
    }

    fn pointer_down(&mut self, point: Point) {
        self.end_gesture();
        self.scene.clear_selection();

        if let Some(id) = self.scene.element_at(point, HIT_TOLERANCE) {
            log::debug!("Selected element {} at {:?}", id, point);
            self.scene.select(id);
            self.gesture = Gesture::Dragging(id);
            return;
        }

        let draft = Draft::begin(
            &mut self.scene,
            self.config.mode,
            self.config.stroke_style(),
            point,
        );
        log::debug!(
            "Started drawing {} element {} at {:?}",
            self.config.mode,
            draft.element,
            point
        );
        self.gesture = Gesture::Drawing(draft);
    }

    fn end_gesture(&mut self) {
        match self.gesture.end() {
            Gesture::Idle => {}
            Gesture::Drawing(draft) => log::debug!(
                "Finished drawing element {} from {} points",
                draft.element,
                draft.points().len()
            ),
            Gesture::Dragging(id) => log::debug!("Finished dragging element {}", id),
        }
    }

    /// Handle a document-level keyboard event.
    ///
    /// Returns `true` when the key mapped to an edit command.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        match event {
            KeyEvent::Pressed(key) => match EditCommand::from_key(key) {
                Some(command) => {
                    self.apply_command(command);
                    true
                }
                None => false,
            },
            KeyEvent::Released(_) => false,
        }
    }

    /// Apply an edit command to the selected element. No-op without one.
    pub fn apply_command(&mut self, command: EditCommand) {
        let Some(id) = self.scene.selected() else {
            log::debug!("{:?} ignored, nothing selected", command);
            return;
        };
        match command {
            EditCommand::Delete => self.delete_element(id),
            EditCommand::ScaleUp => self.scale_element(id, SCALE_STEP),
            EditCommand::ScaleDown => self.scale_element(id, -SCALE_STEP),
        }
    }

    fn scale_element(&mut self, id: ElementId, step: f64) {
        if let Some(shape) = self.scene.get_mut(id) {
            apply_scale_step(shape, step);
            log::debug!("Element {} scale now {}", id, shape.transform().scale);
        }
    }

    /// Markup for the live display, with the selection marker.
    pub fn render_display(&self) -> String {
        let ctx = RenderContext::new(&self.scene, self.config.view_box).with_selection_marker(true);
        SvgRenderer.render(&ctx)
    }
}

impl DrawingSurface for DrawingBoard {
    fn selected_element(&self) -> Option<ElementId> {
        self.scene.selected()
    }

    fn insert_element(&mut self, element: Shape) {
        self.scene.insert(element);
    }

    fn delete_element(&mut self, id: ElementId) {
        if self.scene.remove(id).is_none() {
            return;
        }
        log::debug!("Deleted element {}", id);
        if self.gesture.target() == Some(id) {
            self.gesture.end();
        }
    }

    fn clear(&mut self) {
        self.scene.clear();
        self.gesture.end();
    }

    fn export_as_svg(&self) -> ExportedDocument {
        self.scene.export_document(&self.config.view_box)
    }
}
