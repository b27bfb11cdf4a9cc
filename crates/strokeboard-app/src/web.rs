//! WebAssembly entry point and browser binding.

use kurbo::{Point, Vec2};
use std::cell::RefCell;
use std::rc::Rc;
use strokeboard_core::import;
use strokeboard_core::keyboard::KeyHandler;
use strokeboard_core::{
    DrawingBoard, DrawingSurface, ElementId, KeyEvent, KeyEventSource, KeyboardSubscription,
    MouseButton, PointerEvent, ShapeKind, SurfaceBounds, SurfaceConfig,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Keyboard events from the page's `document`.
pub struct DocumentKeys {
    document: web_sys::Document,
}

impl DocumentKeys {
    /// The current window's document, if there is one.
    pub fn current() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;
        Ok(Self { document })
    }
}

impl KeyEventSource for DocumentKeys {
    type Listener = Closure<dyn FnMut(web_sys::KeyboardEvent)>;
    type Error = JsValue;

    fn add_listener(&mut self, mut handler: KeyHandler) -> Result<Self::Listener, JsValue> {
        let closure = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |event: web_sys::KeyboardEvent| handler(&KeyEvent::Pressed(event.key())),
        );
        self.document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        Ok(closure)
    }

    fn remove_listener(&mut self, listener: Self::Listener) {
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove keyboard listener: {:?}", e);
        }
    }
}

/// A drawing surface bound to a host element.
#[wasm_bindgen]
pub struct WebDrawingBoard {
    board: Rc<RefCell<DrawingBoard>>,
    /// Element whose bounding rectangle defines surface-local coordinates.
    element: web_sys::Element,
    keyboard: Option<KeyboardSubscription<DocumentKeys>>,
}

#[wasm_bindgen]
impl WebDrawingBoard {
    /// Create a surface over `element`. `config` may be `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(element: web_sys::Element, config: JsValue) -> Result<WebDrawingBoard, JsValue> {
        let config = parse_config(config)?;
        Ok(Self {
            board: Rc::new(RefCell::new(DrawingBoard::new(config))),
            element,
            keyboard: None,
        })
    }

    /// Replace the surface options.
    pub fn configure(&self, config: JsValue) -> Result<(), JsValue> {
        let config = parse_config(config)?;
        self.board.borrow_mut().configure(config);
        Ok(())
    }

    /// Change the creation kind (`path`, `rect`, `ellipse` or `circle`).
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: ShapeKind = mode.parse().map_err(js_error)?;
        self.board.borrow_mut().set_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = getSelectedElement)]
    pub fn selected_element(&self) -> Option<String> {
        self.board
            .borrow()
            .selected_element()
            .map(|id| id.to_string())
    }

    /// Insert one element from its markup; returns the new element's ID.
    #[wasm_bindgen(js_name = insertElement)]
    pub fn insert_element(&self, markup: &str) -> Result<String, JsValue> {
        let shape = import::parse_element(markup).map_err(js_error)?;
        let id = shape.id();
        self.board.borrow_mut().insert_element(shape);
        Ok(id.to_string())
    }

    /// Insert every top-level element of an exported document.
    #[wasm_bindgen(js_name = importDocument)]
    pub fn import_document(&self, markup: &str) -> Result<usize, JsValue> {
        let shapes = import::parse_document(markup).map_err(js_error)?;
        let count = shapes.len();
        let mut board = self.board.borrow_mut();
        for shape in shapes {
            board.insert_element(shape);
        }
        Ok(count)
    }

    /// Remove an element by ID. Unknown or malformed IDs are ignored.
    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&self, id: &str) {
        match id.parse::<ElementId>() {
            Ok(id) => self.board.borrow_mut().delete_element(id),
            Err(_) => log::debug!("Ignoring delete of malformed id {:?}", id),
        }
    }

    pub fn clear(&self) {
        self.board.borrow_mut().clear();
    }

    /// The scene as an `exported.svg` file.
    #[wasm_bindgen(js_name = exportAsSvg)]
    pub fn export_as_svg(&self) -> Result<web_sys::File, JsValue> {
        let doc = self.board.borrow().export_as_svg();
        let parts = js_sys::Array::of1(&JsValue::from_str(&doc.content));
        let options = web_sys::FilePropertyBag::new();
        options.set_type(&doc.content_type);
        web_sys::File::new_with_str_sequence_and_options(&parts, &doc.filename, &options)
    }

    /// Display markup, with the selected element tagged.
    pub fn render(&self) -> String {
        self.board.borrow().render_display()
    }

    #[wasm_bindgen(js_name = handlePointerDown)]
    pub fn handle_pointer_down(&self, event: &web_sys::PointerEvent) {
        let Some(button) = MouseButton::from_dom(event.button()) else {
            return;
        };
        self.dispatch(PointerEvent::Down {
            position: client_position(event),
            button,
        });
    }

    #[wasm_bindgen(js_name = handlePointerMove)]
    pub fn handle_pointer_move(&self, event: &web_sys::PointerEvent) {
        self.dispatch(PointerEvent::Move {
            position: client_position(event),
            movement: Vec2::new(f64::from(event.movement_x()), f64::from(event.movement_y())),
        });
    }

    #[wasm_bindgen(js_name = handlePointerUp)]
    pub fn handle_pointer_up(&self, event: &web_sys::PointerEvent) {
        let button = MouseButton::from_dom(event.button()).unwrap_or(MouseButton::Left);
        self.dispatch(PointerEvent::Up {
            position: client_position(event),
            button,
        });
    }

    /// Start listening for document keyboard shortcuts.
    pub fn mount(&mut self) -> Result<(), JsValue> {
        if self.keyboard.is_some() {
            return Ok(());
        }
        let subscription =
            KeyboardSubscription::for_board(DocumentKeys::current()?, self.board.clone())?;
        self.keyboard = Some(subscription);
        log::info!("Drawing surface mounted");
        Ok(())
    }

    /// Stop listening for keyboard shortcuts.
    pub fn unmount(&mut self) {
        if let Some(mut subscription) = self.keyboard.take() {
            subscription.unsubscribe();
            log::info!("Drawing surface unmounted");
        }
    }
}

impl WebDrawingBoard {
    fn dispatch(&self, event: PointerEvent) {
        let rect = self.element.get_bounding_client_rect();
        let Ok(mut board) = self.board.try_borrow_mut() else {
            log::warn!("Dropping {:?}, surface is busy", event);
            return;
        };
        board.set_bounds(SurfaceBounds::new(rect.left(), rect.top()));
        board.handle_pointer_event(event);
    }
}

fn client_position(event: &web_sys::PointerEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn parse_config(config: JsValue) -> Result<SurfaceConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(SurfaceConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}

/// Initialize logging when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Strokeboard surface module loaded");
}
