//! Keyboard shortcut registry and documentation.

use strokeboard_core::EditCommand;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// DOM `KeyboardEvent.key` value.
    pub key: &'static str,
    pub command: EditCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: EditCommand, description: &'static str) -> Self {
        Self {
            key,
            command,
            description,
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Backspace", EditCommand::Delete, "Delete selected element"),
            Shortcut::new("Delete", EditCommand::Delete, "Delete selected element"),
            Shortcut::new("=", EditCommand::ScaleUp, "Grow selected element by 10%"),
            Shortcut::new("-", EditCommand::ScaleDown, "Shrink selected element by 10%"),
        ]
    }

    /// Help text listing every shortcut, one per line.
    pub fn help_text() -> String {
        Self::all()
            .iter()
            .map(|shortcut| format!("  {:12} {}", shortcut.key, shortcut.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        println!("{}", Self::help_text());
        println!();
    }
}
