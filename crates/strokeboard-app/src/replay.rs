//! Headless replay of recorded drawing sessions.
//!
//! A script is a JSON document holding an optional surface configuration
//! and a list of input events:
//!
//! ```json
//! {
//!   "config": { "mode": "rect", "strokeColor": "#0693e3" },
//!   "events": [
//!     { "type": "down", "x": 10, "y": 10 },
//!     { "type": "move", "x": 60, "y": 40 },
//!     { "type": "up", "x": 60, "y": 40 },
//!     { "type": "key", "key": "=" }
//!   ]
//! }
//! ```

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strokeboard_core::import::{self, ImportError};
use strokeboard_core::{
    DrawingBoard, DrawingSurface, ExportedDocument, KeyEvent, MouseButton, PointerEvent,
    ShapeKind, SurfaceConfig,
};
use thiserror::Error;

/// Errors produced while loading, replaying or writing a session.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

fn default_button() -> MouseButton {
    MouseButton::Left
}

/// One recorded input event, in client coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScriptEvent {
    Down {
        x: f64,
        y: f64,
        #[serde(default = "default_button")]
        button: MouseButton,
    },
    /// Relative movement defaults to the distance from the previous
    /// pointer position.
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: Option<f64>,
        #[serde(default)]
        dy: Option<f64>,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default = "default_button")]
        button: MouseButton,
    },
    Key {
        key: String,
    },
    Mode {
        mode: ShapeKind,
    },
    Clear,
}

/// A recorded session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: SurfaceConfig,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> ReplayResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// Drives a drawing surface from script events.
pub struct Replayer {
    board: DrawingBoard,
    last_position: Option<Point>,
}

impl Replayer {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            board: DrawingBoard::new(config),
            last_position: None,
        }
    }

    pub fn board(&self) -> &DrawingBoard {
        &self.board
    }

    /// Insert every element of a previously exported document.
    pub fn import(&mut self, markup: &str) -> ReplayResult<usize> {
        let shapes = import::parse_document(markup)?;
        let count = shapes.len();
        for shape in shapes {
            self.board.insert_element(shape);
        }
        Ok(count)
    }

    /// Feed every event of `script` to the surface, in order.
    pub fn run(&mut self, script: &Script) {
        for event in &script.events {
            self.apply(event);
        }
    }

    pub fn apply(&mut self, event: &ScriptEvent) {
        match *event {
            ScriptEvent::Down { x, y, button } => {
                let position = self.track(x, y);
                self.board
                    .handle_pointer_event(PointerEvent::Down { position, button });
            }
            ScriptEvent::Move { x, y, dx, dy } => {
                let previous = self.last_position;
                let position = self.track(x, y);
                let fallback = previous.map_or(Vec2::ZERO, |p| position - p);
                let movement = Vec2::new(dx.unwrap_or(fallback.x), dy.unwrap_or(fallback.y));
                self.board
                    .handle_pointer_event(PointerEvent::Move { position, movement });
            }
            ScriptEvent::Up { x, y, button } => {
                let position = self.track(x, y);
                self.board
                    .handle_pointer_event(PointerEvent::Up { position, button });
            }
            ScriptEvent::Key { ref key } => {
                if !self.board.handle_key_event(&KeyEvent::Pressed(key.clone())) {
                    log::debug!("Key {:?} has no binding", key);
                }
            }
            ScriptEvent::Mode { mode } => self.board.set_mode(mode),
            ScriptEvent::Clear => self.board.clear(),
        }
    }

    fn track(&mut self, x: f64, y: f64) -> Point {
        let position = Point::new(x, y);
        self.last_position = Some(position);
        position
    }

    pub fn export(&self) -> ExportedDocument {
        self.board.export_as_svg()
    }
}

/// Write an exported document into `dir` under its own filename.
pub fn write_document(doc: &ExportedDocument, dir: &Path) -> ReplayResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&doc.filename);
    fs::write(&path, doc.as_bytes())?;
    log::info!("Wrote {} ({} bytes)", path.display(), doc.content.len());
    Ok(path)
}
