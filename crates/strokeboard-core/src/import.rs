//! Reading previously exported SVG markup back into elements.

use crate::shapes::{Ellipse, Freehand, Rectangle, Shape, ShapeStyle, parse_length};
use crate::transform::AffineTransform;
use kurbo::{Point, SvgParseError};
use roxmltree::{Document, Node};
use thiserror::Error;

/// Presentation attributes honored on imported elements.
const PRESENTATION_ATTRIBUTES: [&str; 4] = ["stroke", "stroke-width", "stroke-linecap", "fill"];

/// Errors produced while importing SVG markup.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Malformed markup: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("Expected an <svg> root, found <{0}>")]
    MissingRoot(String),
    #[error("Unsupported element <{0}>")]
    UnsupportedElement(String),
    #[error("Invalid path data: {0}")]
    PathData(#[from] SvgParseError),
    #[error("Invalid number for `{attribute}`: {value:?}")]
    InvalidNumber { attribute: String, value: String },
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Parse a whole document into its top-level elements, in paint order.
///
/// Children other than `path`, `rect`, `ellipse` and `circle` are skipped.
pub fn parse_document(markup: &str) -> ImportResult<Vec<Shape>> {
    let doc = Document::parse(markup)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(ImportError::MissingRoot(root.tag_name().name().to_string()));
    }

    let mut shapes = Vec::new();
    for node in root.children().filter(Node::is_element) {
        match parse_node(node) {
            Ok(shape) => shapes.push(shape),
            Err(ImportError::UnsupportedElement(name)) => {
                log::warn!("Skipping unsupported <{}> element", name);
            }
            Err(e) => return Err(e),
        }
    }
    log::info!("Imported {} elements", shapes.len());
    Ok(shapes)
}

/// Parse markup holding a single element.
pub fn parse_element(markup: &str) -> ImportResult<Shape> {
    let doc = Document::parse(markup)?;
    parse_node(doc.root_element())
}

/// Exported circles are `<ellipse>` elements, so they come back as
/// [`ShapeKind::Ellipse`](crate::ShapeKind); only `<circle>` yields a circle.
fn parse_node(node: Node) -> ImportResult<Shape> {
    let mut shape = match node.tag_name().name() {
        "path" => {
            let data = node.attribute("d").unwrap_or_default();
            Shape::Freehand(Freehand::from_path_data(data)?)
        }
        "rect" => Shape::Rectangle(Rectangle::new(
            Point::new(number(node, "x")?, number(node, "y")?),
            number(node, "width")?,
            number(node, "height")?,
        )),
        "ellipse" => Shape::Ellipse(Ellipse::new(
            Point::new(number(node, "cx")?, number(node, "cy")?),
            number(node, "rx")?,
            number(node, "ry")?,
        )),
        "circle" => Shape::Circle(Ellipse::circle(
            Point::new(number(node, "cx")?, number(node, "cy")?),
            number(node, "r")?,
        )),
        other => return Err(ImportError::UnsupportedElement(other.to_string())),
    };

    *shape.style_mut() = parse_style(node);
    if let Some(transform) = AffineTransform::from_attribute(node.attribute("transform")) {
        shape.set_transform(transform);
    }
    Ok(shape)
}

/// Presentation attributes first, then the inline style, which wins.
fn parse_style(node: Node) -> ShapeStyle {
    let mut style = ShapeStyle::default();
    for name in PRESENTATION_ATTRIBUTES {
        if let Some(value) = node.attribute(name) {
            style.apply_property(name, value.trim());
        }
    }
    if let Some(css) = node.attribute("style") {
        style.apply_declarations(css);
    }
    style
}

/// A numeric attribute; absent attributes read as zero.
fn number(node: Node, attribute: &str) -> ImportResult<f64> {
    match node.attribute(attribute) {
        None => Ok(0.0),
        Some(value) => parse_length(value).ok_or_else(|| ImportError::InvalidNumber {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }),
    }
}
