//! Symbolic keyboard keys and their WebDriver codepoints.
//!
//! Script authors name keys symbolically (`keypress "ENTER" key in "search"`).
//! Unrecognized names resolve to no key rather than an error; the dispatcher
//! logs and skips such steps.

use serde::{Deserialize, Serialize};

/// A symbolic keyboard key with a W3C WebDriver codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Enter,
    Tab,
    Escape,
    Space,
    Backspace,
    Delete,
    Insert,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Shift,
    Control,
    Alt,
}

impl Key {
    /// Look up a key by its symbolic name, case-insensitively.
    ///
    /// Accepts both the plain names (`ENTER`) and the underscored aliases
    /// scripts tend to use (`BACK_SPACE`, `ARROW_UP`). Returns `None` for
    /// anything unrecognized.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name.trim().to_ascii_uppercase().as_str() {
            "ENTER" | "RETURN" => Key::Enter,
            "TAB" => Key::Tab,
            "ESCAPE" | "ESC" => Key::Escape,
            "SPACE" => Key::Space,
            "BACKSPACE" | "BACK_SPACE" => Key::Backspace,
            "DELETE" | "DEL" => Key::Delete,
            "INSERT" => Key::Insert,
            "ARROW_UP" | "UP" => Key::ArrowUp,
            "ARROW_DOWN" | "DOWN" => Key::ArrowDown,
            "ARROW_LEFT" | "LEFT" => Key::ArrowLeft,
            "ARROW_RIGHT" | "RIGHT" => Key::ArrowRight,
            "HOME" => Key::Home,
            "END" => Key::End,
            "PAGE_UP" | "PAGEUP" => Key::PageUp,
            "PAGE_DOWN" | "PAGEDOWN" => Key::PageDown,
            "SHIFT" => Key::Shift,
            "CONTROL" | "CTRL" => Key::Control,
            "ALT" => Key::Alt,
            _ => return None,
        };
        Some(key)
    }

    /// The WebDriver key codepoint sent over the wire.
    pub fn codepoint(&self) -> &'static str {
        match self {
            Key::Backspace => "\u{E003}",
            Key::Tab => "\u{E004}",
            Key::Enter => "\u{E007}",
            Key::Shift => "\u{E008}",
            Key::Control => "\u{E009}",
            Key::Alt => "\u{E00A}",
            Key::Escape => "\u{E00C}",
            Key::Space => "\u{E00D}",
            Key::PageUp => "\u{E00E}",
            Key::PageDown => "\u{E00F}",
            Key::End => "\u{E010}",
            Key::Home => "\u{E011}",
            Key::ArrowLeft => "\u{E012}",
            Key::ArrowUp => "\u{E013}",
            Key::ArrowRight => "\u{E014}",
            Key::ArrowDown => "\u{E015}",
            Key::Insert => "\u{E016}",
            Key::Delete => "\u{E017}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Key::from_name("enter"), Some(Key::Enter));
        assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_name("RETURN"), Some(Key::Enter));
    }

    #[test]
    fn unknown_names_resolve_to_no_key() {
        assert_eq!(Key::from_name("HYPERDRIVE"), None);
        assert_eq!(Key::from_name(""), None);
    }

    #[test]
    fn enter_codepoint_matches_webdriver_spec() {
        assert_eq!(Key::Enter.codepoint(), "\u{E007}");
        assert_eq!(Key::Tab.codepoint(), "\u{E004}");
    }
}
