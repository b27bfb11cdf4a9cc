//! Element definitions for the drawing surface.

mod ellipse;
mod freehand;
mod rectangle;

pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use rectangle::Rectangle;

use crate::error::EditorError;
use crate::transform::AffineTransform;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Serializable color representation (RGBA8).
///
/// Travels as a CSS color string in configuration and markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` or
    /// `transparent`.
    pub fn parse_css(color: &str) -> Result<Self, EditorError> {
        let color = color.trim();
        let invalid = || EditorError::InvalidColor(color.to_string());

        if color.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }

        if let Some(hex) = color.strip_prefix('#') {
            let channel = |range: std::ops::Range<usize>| {
                hex.get(range)
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                    .ok_or_else(invalid)
            };
            return match hex.len() {
                3 => Ok(Self::new(
                    channel(0..1)? * 17,
                    channel(1..2)? * 17,
                    channel(2..3)? * 17,
                    255,
                )),
                6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
                8 => Ok(Self::new(
                    channel(0..2)?,
                    channel(2..4)?,
                    channel(4..6)?,
                    channel(6..8)?,
                )),
                _ => Err(invalid()),
            };
        }

        let args = color
            .strip_prefix("rgba(")
            .or_else(|| color.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |part: &str| {
            part.parse::<f64>()
                .ok()
                .filter(|v| (0.0..=255.0).contains(v))
                .map(|v| v.round() as u8)
                .ok_or_else(invalid)
        };
        match parts.as_slice() {
            [r, g, b] => Ok(Self::new(channel(*r)?, channel(*g)?, channel(*b)?, 255)),
            [r, g, b, a] => {
                let alpha = a
                    .parse::<f64>()
                    .ok()
                    .filter(|v| (0.0..=1.0).contains(v))
                    .ok_or_else(invalid)?;
                Ok(Self::new(
                    channel(*r)?,
                    channel(*g)?,
                    channel(*b)?,
                    (alpha * 255.0).round() as u8,
                ))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for SerializableColor {
    /// Formats the way browsers serialize inline style colors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (f64::from(self.a) / 255.0 * 1000.0).round() / 1000.0;
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_css(&value)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_string()
    }
}

/// Stroke line cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

/// Style properties for elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Stroke line cap.
    pub line_cap: LineCap,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 5.0,
            line_cap: LineCap::Round,
            fill_color: None,
        }
    }
}

impl ShapeStyle {
    /// The static style given to newly drawn elements.
    pub fn stroke(stroke_color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            stroke_color,
            stroke_width,
            line_cap: LineCap::Round,
            fill_color: None,
        }
    }

    /// Inline `style` attribute text.
    pub fn to_css(&self) -> String {
        let fill = self
            .fill_color
            .map_or_else(|| "none".to_string(), |c| c.to_string());
        format!(
            "stroke: {}; stroke-width: {}px; stroke-linecap: {}; fill: {};",
            self.stroke_color,
            self.stroke_width,
            self.line_cap.as_str(),
            fill
        )
    }

    /// Apply every `name: value` declaration of an inline style.
    pub fn apply_declarations(&mut self, css: &str) {
        for declaration in css.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                self.apply_property(name.trim(), value.trim());
            }
        }
    }

    /// Apply a single presentation property. Unknown properties and
    /// unparsable values leave the style unchanged.
    pub fn apply_property(&mut self, name: &str, value: &str) {
        match name {
            "stroke" => match SerializableColor::parse_css(value) {
                Ok(color) => self.stroke_color = color,
                Err(e) => log::warn!("Keeping previous stroke: {}", e),
            },
            "stroke-width" => match parse_length(value) {
                Some(width) => self.stroke_width = width,
                None => log::warn!("Keeping previous stroke width, got {:?}", value),
            },
            "stroke-linecap" => {
                if let Some(cap) = LineCap::parse(value) {
                    self.line_cap = cap;
                }
            }
            "fill" => {
                if value == "none" {
                    self.fill_color = None;
                } else {
                    match SerializableColor::parse_css(value) {
                        Ok(color) => self.fill_color = Some(color),
                        Err(e) => log::warn!("Keeping previous fill: {}", e),
                    }
                }
            }
            _ => {}
        }
    }
}

/// Parse a CSS/SVG length in user units, accepting a `px` suffix.
pub fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Creation kind selected on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Path,
    Rect,
    Ellipse,
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Path,
        ShapeKind::Rect,
        ShapeKind::Ellipse,
        ShapeKind::Circle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Path => "path",
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Circle => "circle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EditorError::UnsupportedKind(s.to_string()))
    }
}

/// Common trait for all elements.
///
/// Geometry methods work in element-local coordinates, before the
/// element's transform is applied.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Get the local bounding box.
    fn bounds(&self) -> Rect;

    /// Check if a local point hits the painted geometry.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// The transform as last written, if ever.
    fn transform_attribute(&self) -> Option<AffineTransform>;

    /// Replace the transform.
    fn set_transform(&mut self, transform: AffineTransform);
}

/// Enum wrapper for all element kinds.
///
/// Circles share the ellipse geometry; only their synthesis differs.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Freehand(Freehand),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Circle(Ellipse),
}

impl Shape {
    /// Create an empty element of the given kind.
    pub fn new(kind: ShapeKind, style: ShapeStyle) -> Self {
        let mut shape = match kind {
            ShapeKind::Path => Shape::Freehand(Freehand::new()),
            ShapeKind::Rect => Shape::Rectangle(Rectangle::new(Point::ZERO, 0.0, 0.0)),
            ShapeKind::Ellipse => Shape::Ellipse(Ellipse::new(Point::ZERO, 0.0, 0.0)),
            ShapeKind::Circle => Shape::Circle(Ellipse::circle(Point::ZERO, 0.0)),
        };
        *shape.style_mut() = style;
        shape
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Freehand(_) => ShapeKind::Path,
            Shape::Rectangle(_) => ShapeKind::Rect,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }

    pub fn id(&self) -> ElementId {
        match self {
            Shape::Freehand(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) | Shape::Circle(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Freehand(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) | Shape::Circle(s) => s.bounds(),
        }
    }

    /// Check if a surface point hits this element, honoring its transform.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let transform = self.transform();
        if transform.scale == 0.0 {
            return false;
        }
        let local = transform.to_affine().inverse() * point;
        let tolerance = tolerance / transform.scale.abs();
        let reach = tolerance + self.style().stroke_width / 2.0;
        let area = self.bounds().abs().inflate(reach, reach);
        if local.x < area.x0 || local.x > area.x1 || local.y < area.y0 || local.y > area.y1 {
            return false;
        }
        match self {
            Shape::Freehand(s) => s.hit_test(local, tolerance),
            Shape::Rectangle(s) => s.hit_test(local, tolerance),
            Shape::Ellipse(s) | Shape::Circle(s) => s.hit_test(local, tolerance),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Freehand(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) | Shape::Circle(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Freehand(s) => s.style_mut(),
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Ellipse(s) | Shape::Circle(s) => s.style_mut(),
        }
    }

    /// The transform as last written, if ever.
    pub fn transform_attribute(&self) -> Option<AffineTransform> {
        match self {
            Shape::Freehand(s) => s.transform_attribute(),
            Shape::Rectangle(s) => s.transform_attribute(),
            Shape::Ellipse(s) | Shape::Circle(s) => s.transform_attribute(),
        }
    }

    /// The effective transform; an unwritten transform reads as identity.
    pub fn transform(&self) -> AffineTransform {
        self.transform_attribute().unwrap_or_default()
    }

    pub fn set_transform(&mut self, transform: AffineTransform) {
        match self {
            Shape::Freehand(s) => s.set_transform(transform),
            Shape::Rectangle(s) => s.set_transform(transform),
            Shape::Ellipse(s) | Shape::Circle(s) => s.set_transform(transform),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(
            SerializableColor::parse_css("#FF6900").unwrap(),
            SerializableColor::new(255, 105, 0, 255)
        );
        assert_eq!(
            SerializableColor::parse_css("#fff").unwrap(),
            SerializableColor::new(255, 255, 255, 255)
        );
        assert_eq!(
            SerializableColor::parse_css("#00000080").unwrap(),
            SerializableColor::new(0, 0, 0, 128)
        );
        assert!(SerializableColor::parse_css("#12345").is_err());
        assert!(SerializableColor::parse_css("#gg0000").is_err());
    }

    #[test]
    fn test_parse_rgb_colors() {
        assert_eq!(
            SerializableColor::parse_css("rgb(6, 147, 227)").unwrap(),
            SerializableColor::new(6, 147, 227, 255)
        );
        assert_eq!(
            SerializableColor::parse_css("rgba(0, 0, 0, 0.5)").unwrap(),
            SerializableColor::new(0, 0, 0, 128)
        );
        assert!(SerializableColor::parse_css("rgb(300, 0, 0)").is_err());
        assert!(SerializableColor::parse_css("red").is_err());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(SerializableColor::black().to_string(), "rgb(0, 0, 0)");
        assert_eq!(
            SerializableColor::new(255, 0, 0, 0).to_string(),
            "rgba(255, 0, 0, 0)"
        );
    }

    #[test]
    fn test_style_css_round_trip() {
        let style = ShapeStyle::stroke(SerializableColor::new(235, 20, 76, 255), 5.0);
        let css = style.to_css();
        assert_eq!(
            css,
            "stroke: rgb(235, 20, 76); stroke-width: 5px; stroke-linecap: round; fill: none;"
        );

        let mut parsed = ShapeStyle::default();
        parsed.stroke_width = 1.0;
        parsed.apply_declarations(&css);
        assert_eq!(parsed, style);
    }

    #[test]
    fn test_style_ignores_bad_values() {
        let mut style = ShapeStyle::default();
        style.apply_declarations("stroke: chartreuse; stroke-width: wide; opacity: 0.5");
        assert_eq!(style, ShapeStyle::default());
    }

    #[test]
    fn test_shape_kind_parse() {
        assert_eq!("rect".parse::<ShapeKind>().unwrap(), ShapeKind::Rect);
        assert_eq!("circle".parse::<ShapeKind>().unwrap(), ShapeKind::Circle);
        assert!(matches!(
            "triangle".parse::<ShapeKind>(),
            Err(EditorError::UnsupportedKind(kind)) if kind == "triangle"
        ));
    }

    #[test]
    fn test_new_shape_kind_and_style() {
        let style = ShapeStyle::stroke(SerializableColor::new(1, 2, 3, 255), 7.0);
        for kind in ShapeKind::ALL {
            let shape = Shape::new(kind, style.clone());
            assert_eq!(shape.kind(), kind);
            assert_eq!(shape.style(), &style);
            assert_eq!(shape.transform_attribute(), None);
        }
    }

    #[test]
    fn test_hit_test_follows_transform() {
        let mut shape = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0));
        assert!(shape.hit_test(Point::new(0.0, 50.0), 0.0));

        shape.set_transform(AffineTransform::new(200.0, 0.0, 1.0));
        assert!(!shape.hit_test(Point::new(0.0, 50.0), 0.0));
        assert!(shape.hit_test(Point::new(200.0, 50.0), 0.0));

        shape.set_transform(AffineTransform::new(0.0, 0.0, 2.0));
        assert!(shape.hit_test(Point::new(200.0, 100.0), 0.0));

        shape.set_transform(AffineTransform::new(0.0, 0.0, 0.0));
        assert!(!shape.hit_test(Point::new(0.0, 0.0), 10.0));
    }

    #[test]
    fn test_hit_test_bounds_edges() {
        let mut shape = Shape::Ellipse(Ellipse::new(Point::new(20.0, 10.0), 20.0, 10.0));
        shape.style_mut().stroke_width = 2.0;
        // Outermost painted points sit exactly on the inflated bounds.
        assert!(shape.hit_test(Point::new(41.0, 10.0), 0.0));
        assert!(shape.hit_test(Point::new(20.0, 21.0), 0.0));
        assert!(!shape.hit_test(Point::new(41.5, 10.0), 0.0));
        assert!(shape.hit_test(Point::new(41.5, 10.0), 1.0));
    }
}
