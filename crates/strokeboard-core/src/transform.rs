//! Per-element translate + uniform scale transforms.
//!
//! The transform lives beside an element's geometry and is never baked into
//! it, so moving or rescaling an element does not touch its path data or
//! box attributes. Its textual form is the SVG `transform` attribute value
//! `translate(tx, ty) scale(s)`.

use crate::shapes::Shape;
use kurbo::{Affine, Vec2};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scale increment applied by the scale keyboard commands.
pub const SCALE_STEP: f64 = 0.1;

/// Errors produced while reading transform attribute text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformParseError {
    #[error("expected a transform function at `{0}`")]
    Syntax(String),
    #[error("unsupported transform function `{0}`")]
    UnsupportedFunction(String),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("`{function}` expects {expected} arguments, got {found}")]
    Arity {
        function: &'static str,
        expected: &'static str,
        found: usize,
    },
    #[error("non-uniform scale ({0}, {1})")]
    NonUniformScale(f64, f64),
}

/// Translation plus uniform scale, applied as `translate * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

impl AffineTransform {
    /// Create a transform from its three components.
    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    /// Read an optional attribute value.
    ///
    /// Malformed text is treated exactly like a missing attribute.
    pub fn from_attribute(value: Option<&str>) -> Option<Self> {
        let text = value?;
        match text.parse() {
            Ok(transform) => Some(transform),
            Err(e) => {
                log::debug!("Ignoring malformed transform {:?}: {}", text, e);
                None
            }
        }
    }

    /// The translation component as a vector.
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    /// The equivalent kurbo affine (element-local to surface space).
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation()) * Affine::scale(self.scale)
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}, {}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

impl FromStr for AffineTransform {
    type Err = TransformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut transform = Self::default();
        let mut rest = s.trim_start_matches(is_separator);

        while !rest.is_empty() {
            let open = rest
                .find('(')
                .ok_or_else(|| TransformParseError::Syntax(rest.to_string()))?;
            let close = rest[open..]
                .find(')')
                .map(|i| open + i)
                .ok_or_else(|| TransformParseError::Syntax(rest.to_string()))?;
            let name = rest[..open].trim();
            let args = parse_args(&rest[open + 1..close])?;

            match name {
                "translate" => match args.as_slice() {
                    [tx] => {
                        transform.translate_x = *tx;
                        transform.translate_y = 0.0;
                    }
                    [tx, ty] => {
                        transform.translate_x = *tx;
                        transform.translate_y = *ty;
                    }
                    _ => {
                        return Err(TransformParseError::Arity {
                            function: "translate",
                            expected: "1 or 2",
                            found: args.len(),
                        });
                    }
                },
                "scale" => match args.as_slice() {
                    [s] => transform.scale = *s,
                    [sx, sy] if sx == sy => transform.scale = *sx,
                    [sx, sy] => return Err(TransformParseError::NonUniformScale(*sx, *sy)),
                    _ => {
                        return Err(TransformParseError::Arity {
                            function: "scale",
                            expected: "1 or 2",
                            found: args.len(),
                        });
                    }
                },
                "" => return Err(TransformParseError::Syntax(rest.to_string())),
                other => return Err(TransformParseError::UnsupportedFunction(other.to_string())),
            }

            rest = rest[close + 1..].trim_start_matches(is_separator);
        }

        Ok(transform)
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn parse_args(args: &str) -> Result<Vec<f64>, TransformParseError> {
    args.split(is_separator)
        .filter(|token| !token.is_empty())
        .map(parse_number)
        .collect()
}

/// Parse a numeric component, dropping a `px` unit suffix.
fn parse_number(token: &str) -> Result<f64, TransformParseError> {
    let digits = token.strip_suffix("px").unwrap_or(token);
    digits
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| TransformParseError::InvalidNumber(token.to_string()))
}

/// Accumulate a relative drag delta onto an element's translation.
pub fn apply_translation(shape: &mut Shape, delta: Vec2) {
    let mut transform = shape.transform();
    transform.translate_x += delta.x;
    transform.translate_y += delta.y;
    shape.set_transform(transform);
}

/// Add `step` to an element's scale.
///
/// The result is deliberately left unclamped: repeated decrements reach
/// zero and then negative scales, which mirror the element through its
/// local origin.
pub fn apply_scale_step(shape: &mut Shape, step: f64) {
    let mut transform = shape.transform();
    transform.scale += step;
    shape.set_transform(transform);
}
