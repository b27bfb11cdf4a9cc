//! Lifetime management for the document-level keyboard listener.
//!
//! A mounted surface owns exactly one listener registration. The
//! registration is held by a [`KeyboardSubscription`] and released when the
//! subscription is dropped or explicitly unsubscribed.

use crate::board::DrawingBoard;
use crate::input::KeyEvent;
use std::cell::RefCell;
use std::rc::Rc;

/// Callback invoked for every key event from a source.
pub type KeyHandler = Box<dyn FnMut(&KeyEvent)>;

/// Something that delivers keyboard events to registered handlers.
pub trait KeyEventSource {
    /// Token identifying one registration.
    type Listener;
    type Error;

    fn add_listener(&mut self, handler: KeyHandler) -> Result<Self::Listener, Self::Error>;

    fn remove_listener(&mut self, listener: Self::Listener);
}

/// Owns one listener registration on a source.
pub struct KeyboardSubscription<S: KeyEventSource> {
    source: S,
    listener: Option<S::Listener>,
}

impl<S: KeyEventSource> KeyboardSubscription<S> {
    /// Register `handler` on `source`.
    pub fn new(mut source: S, handler: KeyHandler) -> Result<Self, S::Error> {
        let listener = source.add_listener(handler)?;
        Ok(Self {
            source,
            listener: Some(listener),
        })
    }

    /// Route key events from `source` to `board`.
    ///
    /// Events arriving while the board is already borrowed are dropped.
    pub fn for_board(source: S, board: Rc<RefCell<DrawingBoard>>) -> Result<Self, S::Error> {
        Self::new(
            source,
            Box::new(move |event: &KeyEvent| match board.try_borrow_mut() {
                Ok(mut board) => {
                    board.handle_key_event(event);
                }
                Err(_) => log::warn!("Dropping {:?}, surface is busy", event),
            }),
        )
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Release the registration now instead of on drop.
    pub fn unsubscribe(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.source.remove_listener(listener);
        }
    }
}

impl<S: KeyEventSource> Drop for KeyboardSubscription<S> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::DrawingSurface;
    use crate::shapes::{Shape, ShapeKind, ShapeStyle};

    /// In-memory source that counts live registrations.
    #[derive(Clone, Default)]
    struct MockSource {
        handlers: Rc<RefCell<Vec<(usize, KeyHandler)>>>,
        next_id: Rc<RefCell<usize>>,
        fail: bool,
    }

    impl MockSource {
        fn live(&self) -> usize {
            self.handlers.borrow().len()
        }

        fn dispatch(&self, key: &str) {
            let event = KeyEvent::Pressed(key.to_string());
            for (_, handler) in self.handlers.borrow_mut().iter_mut() {
                handler(&event);
            }
        }
    }

    impl KeyEventSource for MockSource {
        type Listener = usize;
        type Error = &'static str;

        fn add_listener(&mut self, handler: KeyHandler) -> Result<usize, &'static str> {
            if self.fail {
                return Err("no document");
            }
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            self.handlers.borrow_mut().push((*next, handler));
            Ok(*next)
        }

        fn remove_listener(&mut self, listener: usize) {
            self.handlers.borrow_mut().retain(|(id, _)| *id != listener);
        }
    }

    #[test]
    fn test_drop_releases_listener() {
        let source = MockSource::default();
        {
            let subscription =
                KeyboardSubscription::new(source.clone(), Box::new(|_: &KeyEvent| {})).unwrap();
            assert!(subscription.is_active());
            assert_eq!(source.live(), 1);
        }
        assert_eq!(source.live(), 0);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let source = MockSource::default();
        let mut subscription =
            KeyboardSubscription::new(source.clone(), Box::new(|_: &KeyEvent| {})).unwrap();
        subscription.unsubscribe();
        subscription.unsubscribe();
        assert!(!subscription.is_active());
        drop(subscription);
        assert_eq!(source.live(), 0);
    }

    #[test]
    fn test_registration_failure() {
        let source = MockSource {
            fail: true,
            ..MockSource::default()
        };
        assert!(KeyboardSubscription::new(source.clone(), Box::new(|_: &KeyEvent| {})).is_err());
        assert_eq!(source.live(), 0);
    }

    #[test]
    fn test_routes_keys_to_board() {
        let source = MockSource::default();
        let board = Rc::new(RefCell::new(DrawingBoard::default()));
        let shape = Shape::new(ShapeKind::Rect, ShapeStyle::default());
        let id = shape.id();
        board.borrow_mut().insert_element(shape);

        let _subscription = KeyboardSubscription::for_board(source.clone(), board.clone()).unwrap();
        source.dispatch("=");
        // Nothing selected yet.
        assert_eq!(board.borrow().scene().get(id).unwrap().transform_attribute(), None);

        // Select through a press on the zero-size rectangle.
        board.borrow_mut().handle_pointer_event(crate::input::PointerEvent::Down {
            position: kurbo::Point::ZERO,
            button: crate::input::MouseButton::Left,
        });
        assert_eq!(board.borrow().selected_element(), Some(id));
        source.dispatch("Backspace");
        assert!(board.borrow().scene().is_empty());
    }

    #[test]
    fn test_busy_board_drops_event() {
        let source = MockSource::default();
        let board = Rc::new(RefCell::new(DrawingBoard::default()));
        let shape = Shape::new(ShapeKind::Rect, ShapeStyle::default());
        let id = shape.id();
        board.borrow_mut().insert_element(shape);
        board.borrow_mut().handle_pointer_event(crate::input::PointerEvent::Down {
            position: kurbo::Point::ZERO,
            button: crate::input::MouseButton::Left,
        });
        assert_eq!(board.borrow().selected_element(), Some(id));

        let _subscription = KeyboardSubscription::for_board(source.clone(), board.clone()).unwrap();
        {
            let _guard = board.borrow_mut();
            source.dispatch("Delete");
        }
        assert!(board.borrow().scene().contains(id));
        assert_eq!(board.borrow().selected_element(), Some(id));
    }
}
