//! Freehand path element.

use super::{ElementId, ShapeStyle, ShapeTrait};
use crate::transform::AffineTransform;
use kurbo::{BezPath, ParamCurveExtrema, ParamCurveNearest, PathEl, Point, Rect, SvgParseError};
use uuid::Uuid;

/// Accuracy used when measuring distance to curved segments.
const NEAREST_ACCURACY: f64 = 1e-3;

/// A freehand stroke, stored as SVG path data.
#[derive(Debug, Clone, PartialEq)]
pub struct Freehand {
    pub(crate) id: ElementId,
    /// Path geometry (the `d` attribute).
    pub path: BezPath,
    /// Style properties.
    pub style: ShapeStyle,
    pub(crate) transform: Option<AffineTransform>,
}

impl Freehand {
    /// Create a new empty freehand element.
    pub fn new() -> Self {
        Self::from_path(BezPath::new())
    }

    /// Create from existing path geometry.
    pub fn from_path(path: BezPath) -> Self {
        Self {
            id: Uuid::new_v4(),
            path,
            style: ShapeStyle::default(),
            transform: None,
        }
    }

    /// Create from `d` attribute text.
    pub fn from_path_data(data: &str) -> Result<Self, SvgParseError> {
        Ok(Self::from_path(BezPath::from_svg(data)?))
    }

    /// The `d` attribute text.
    pub fn path_data(&self) -> String {
        self.path.to_svg()
    }

    fn start_point(&self) -> Option<Point> {
        match self.path.elements().first() {
            Some(PathEl::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }
}

impl Default for Freehand {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.path
            .segments()
            .map(|seg| seg.bounding_box())
            .reduce(|acc, rect| acc.union(rect))
            .or_else(|| self.start_point().map(|p| Rect::from_points(p, p)))
            .unwrap_or(Rect::ZERO)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        // A bare move-to paints nothing.
        let reach = tolerance + self.style.stroke_width / 2.0;
        self.path
            .segments()
            .any(|seg| seg.nearest(point, NEAREST_ACCURACY).distance_sq <= reach * reach)
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
