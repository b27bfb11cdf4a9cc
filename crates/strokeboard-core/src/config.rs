//! Surface configuration supplied by the host.

use crate::error::{EditorError, EditorResult};
use crate::shapes::{SerializableColor, ShapeKind, ShapeStyle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical coordinate extents of the drawing surface (`min-x min-y width height`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::new(0.0, 0.0, 500.0, 500.0)
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

impl FromStr for ViewBox {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditorError::InvalidViewBox(s.to_string());
        let values = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| token.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;
        match values.as_slice() {
            &[min_x, min_y, width, height] if width >= 0.0 && height >= 0.0 => {
                Ok(Self::new(min_x, min_y, width, height))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for ViewBox {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ViewBox> for String {
    fn from(view_box: ViewBox) -> Self {
        view_box.to_string()
    }
}

/// Options recognized by the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurfaceConfig {
    pub view_box: ViewBox,
    /// Kind of element created by the next drawing gesture.
    pub mode: ShapeKind,
    pub stroke_color: SerializableColor,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            view_box: ViewBox::default(),
            mode: ShapeKind::Path,
            stroke_color: SerializableColor::black(),
            stroke_width: 5.0,
        }
    }
}

impl SurfaceConfig {
    /// Parse a JSON configuration; missing options keep their defaults.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Style applied to newly drawn elements.
    pub fn stroke_style(&self) -> ShapeStyle {
        ShapeStyle::stroke(self.stroke_color, self.stroke_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SurfaceConfig::default();
        assert_eq!(config.view_box.to_string(), "0 0 500 500");
        assert_eq!(config.mode, ShapeKind::Path);
        assert_eq!(config.stroke_color, SerializableColor::black());
        assert!((config.stroke_width - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json() {
        let config = SurfaceConfig::from_json(
            r##"{"viewBox": "0 0 800 600", "mode": "circle", "strokeColor": "#0693E3"}"##,
        )
        .unwrap();
        assert_eq!(config.view_box, ViewBox::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(config.mode, ShapeKind::Circle);
        assert_eq!(config.stroke_color, SerializableColor::new(6, 147, 227, 255));
        assert!((config.stroke_width - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unsupported_mode_is_reported() {
        let result = SurfaceConfig::from_json(r#"{"mode": "polygon"}"#);
        assert!(matches!(result, Err(EditorError::Config(_))));
    }

    #[test]
    fn test_bad_color_is_reported() {
        assert!(SurfaceConfig::from_json(r##"{"strokeColor": "#zzz"}"##).is_err());
    }

    #[test]
    fn test_view_box_parse() {
        assert_eq!(
            "0,0,100,50".parse::<ViewBox>().unwrap(),
            ViewBox::new(0.0, 0.0, 100.0, 50.0)
        );
        assert!("0 0 100".parse::<ViewBox>().is_err());
        assert!("0 0 -1 10".parse::<ViewBox>().is_err());
        assert!("a b c d".parse::<ViewBox>().is_err());
    }

    #[test]
    fn test_stroke_style() {
        let config = SurfaceConfig {
            stroke_width: 3.0,
            ..SurfaceConfig::default()
        };
        let style = config.stroke_style();
        assert!((style.stroke_width - 3.0).abs() < f64::EPSILON);
        assert!(style.fill_color.is_none());
    }
}
