//! Strokeboard Core Library
//!
//! Platform-agnostic editing surface: scene store, shape synthesis,
//! element transforms, input routing and SVG import/export.

pub mod board;
pub mod config;
pub mod error;
pub mod import;
pub mod input;
pub mod keyboard;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod synth;
pub mod tools;
pub mod transform;

pub use board::{DrawingBoard, DrawingSurface};
pub use config::{SurfaceConfig, ViewBox};
pub use error::{EditorError, EditorResult};
pub use input::{EditCommand, KeyEvent, MouseButton, PointerEvent, SurfaceBounds};
pub use keyboard::{KeyEventSource, KeyboardSubscription};
pub use render::{RenderContext, Renderer, SvgRenderer};
pub use scene::{ExportedDocument, SceneStore};
pub use shapes::{ElementId, Shape, ShapeKind, ShapeStyle};
pub use transform::AffineTransform;
