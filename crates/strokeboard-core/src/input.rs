//! Pointer and keyboard events delivered to the drawing surface.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value. Back/forward buttons map to `None`.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }

    /// Only the primary button drives gestures.
    pub fn is_primary(self) -> bool {
        self == MouseButton::Left
    }
}

/// Pointer event in the host's client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    /// `movement` is the relative motion reported by the host since the
    /// previous move event.
    Move {
        position: Point,
        movement: Vec2,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => position,
        }
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Placement of the surface in the host's client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceBounds {
    /// Top-left corner of the surface's bounding rectangle.
    pub origin: Point,
}

impl SurfaceBounds {
    pub fn new(left: f64, top: f64) -> Self {
        Self {
            origin: Point::new(left, top),
        }
    }

    /// Convert a client position to surface-local pixels.
    ///
    /// No view box scaling is applied.
    pub fn to_local(&self, client: Point) -> Point {
        (client - self.origin).to_point()
    }
}

/// Keyboard commands acting on the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Delete,
    ScaleUp,
    ScaleDown,
}

impl EditCommand {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Backspace" | "Delete" => Some(EditCommand::Delete),
            "=" => Some(EditCommand::ScaleUp),
            "-" => Some(EditCommand::ScaleDown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_buttons() {
        assert_eq!(MouseButton::from_dom(0), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_dom(2), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_dom(3), None);
        assert!(MouseButton::Left.is_primary());
        assert!(!MouseButton::Middle.is_primary());
    }

    #[test]
    fn test_to_local() {
        let bounds = SurfaceBounds::new(100.0, 40.0);
        assert_eq!(bounds.to_local(Point::new(110.0, 45.0)), Point::new(10.0, 5.0));
        assert_eq!(SurfaceBounds::default().to_local(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_edit_commands() {
        assert_eq!(EditCommand::from_key("Backspace"), Some(EditCommand::Delete));
        assert_eq!(EditCommand::from_key("Delete"), Some(EditCommand::Delete));
        assert_eq!(EditCommand::from_key("="), Some(EditCommand::ScaleUp));
        assert_eq!(EditCommand::from_key("-"), Some(EditCommand::ScaleDown));
        assert_eq!(EditCommand::from_key("+"), None);
        assert_eq!(EditCommand::from_key("a"), None);
    }

    #[test]
    fn test_event_position() {
        let event = PointerEvent::Move {
            position: Point::new(1.0, 2.0),
            movement: Vec2::new(1.0, 0.0),
        };
        assert_eq!(event.position(), Point::new(1.0, 2.0));
    }
}
