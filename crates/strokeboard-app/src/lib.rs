//! Strokeboard Application
//!
//! Hosts the drawing surface: a wasm-bindgen binding for the browser and a
//! headless replay tool for native builds.

mod replay;
mod shortcuts;

pub use replay::{ReplayError, ReplayResult, Replayer, Script, ScriptEvent, write_document};
pub use shortcuts::{Shortcut, ShortcutRegistry};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{DocumentKeys, WebDrawingBoard, start};
