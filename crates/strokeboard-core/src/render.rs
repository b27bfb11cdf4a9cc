//! SVG projection of the scene.
//!
//! The same renderer produces both the live display markup and the export
//! payload; they differ only in whether the selection marker is drawn.

use crate::config::ViewBox;
use crate::scene::SceneStore;
use crate::shapes::Shape;
use std::fmt::Write;

/// Class attribute value marking the selected element on the display.
pub const SELECTED_CLASS: &str = "selected";

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a SceneStore,
    /// Logical extents written on the root element.
    pub view_box: ViewBox,
    /// Whether to tag the selected element.
    pub mark_selection: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a context for an export pass.
    pub fn new(scene: &'a SceneStore, view_box: ViewBox) -> Self {
        Self {
            scene,
            view_box,
            mark_selection: false,
        }
    }

    /// Tag the selected element, for the display pass.
    pub fn with_selection_marker(mut self, mark: bool) -> Self {
        self.mark_selection = mark;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    type Output;

    /// Render the whole scene in paint order.
    fn render(&self, ctx: &RenderContext) -> Self::Output;
}

/// Writes the scene as standalone SVG markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, ctx: &RenderContext) -> String {
        let mut svg = String::with_capacity(256 + ctx.scene.len() * 160);
        let _ = write!(
            svg,
            "<svg xmlns=\"{SVG_NAMESPACE}\" viewBox=\"{}\">",
            ctx.view_box
        );
        for shape in ctx.scene.iter() {
            let selected = ctx.mark_selection && ctx.scene.is_selected(shape.id());
            render_element(&mut svg, shape, selected);
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Markup for a single element, without the document wrapper.
pub fn element_markup(shape: &Shape) -> String {
    let mut svg = String::new();
    render_element(&mut svg, shape, false);
    svg
}

fn render_element(svg: &mut String, shape: &Shape, selected: bool) {
    match shape {
        Shape::Freehand(path) => {
            let _ = write!(svg, "<path d=\"{}\"", escape_xml(&path.path_data()));
        }
        Shape::Rectangle(rect) => {
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                rect.position.x, rect.position.y, rect.width, rect.height
            );
        }
        // Circles are written as ellipses with equal radii.
        Shape::Ellipse(ellipse) | Shape::Circle(ellipse) => {
            let _ = write!(
                svg,
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"",
                ellipse.center.x, ellipse.center.y, ellipse.radius_x, ellipse.radius_y
            );
        }
    }
    let _ = write!(svg, " style=\"{}\"", escape_xml(&shape.style().to_css()));
    if let Some(transform) = shape.transform_attribute() {
        let _ = write!(svg, " transform=\"{transform}\"");
    }
    if selected {
        let _ = write!(svg, " class=\"{SELECTED_CLASS}\"");
    }
    svg.push_str("/>");
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
