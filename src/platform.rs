//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Submit shortcut display for the status bar
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Whether the modifiers held with `s` trigger a submit.
/// Ctrl works on every platform; Cmd also counts on terminals that report it.
pub fn is_submit_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}
