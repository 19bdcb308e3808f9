// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

use crate::ESC_CHAR;

/// Canonical name of a decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyName {
    Return,
    Enter,
    Tab,
    Backspace,
    Escape,
    Space,
    Up,
    Down,
    Left,
    Right,
    Clear,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    /// `F1` through `F12`.
    Function(u8),
    /// Start of a bracketed paste (`ESC [ 200 ~`).
    PasteStart,
    /// End of a bracketed paste (`ESC [ 201 ~`).
    PasteEnd,
    /// Letters (always lowercase, see [`Key::shift`]), digits, and the letter part of
    /// Ctrl combinations.
    Char(char),
}

impl Display for KeyName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            KeyName::Return => write!(f, "return"),
            KeyName::Enter => write!(f, "enter"),
            KeyName::Tab => write!(f, "tab"),
            KeyName::Backspace => write!(f, "backspace"),
            KeyName::Escape => write!(f, "escape"),
            KeyName::Space => write!(f, "space"),
            KeyName::Up => write!(f, "up"),
            KeyName::Down => write!(f, "down"),
            KeyName::Left => write!(f, "left"),
            KeyName::Right => write!(f, "right"),
            KeyName::Clear => write!(f, "clear"),
            KeyName::Home => write!(f, "home"),
            KeyName::End => write!(f, "end"),
            KeyName::Insert => write!(f, "insert"),
            KeyName::Delete => write!(f, "delete"),
            KeyName::PageUp => write!(f, "pageup"),
            KeyName::PageDown => write!(f, "pagedown"),
            KeyName::Function(n) => write!(f, "f{n}"),
            KeyName::PasteStart => write!(f, "paste-start"),
            KeyName::PasteEnd => write!(f, "paste-end"),
            KeyName::Char(ch) => write!(f, "{ch}"),
        }
    }
}

/// One decoded key press.
///
/// - `sequence` is the raw text that produced it (`"a"`, `"\x1b[1;5A"`).
/// - `name` is [None] for chars with no canonical name (punctuation, non-ASCII text) and
///   for escape sequences that no terminal in the code table sends.
/// - `code` is the escape code after the modifier was taken out (`"[A"` for the example
///   above). Only set for escape sequences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Key {
    pub sequence: String,
    pub name: Option<KeyName>,
    pub code: Option<String>,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Key {
    /// A key with no modifiers.
    pub fn new(sequence: impl Into<String>, name: Option<KeyName>) -> Self {
        Self {
            sequence: sequence.into(),
            name,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// The text this key inserts into the line, if any. Keys produced by escape sequences
    /// never insert anything.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        if self.sequence.is_empty() || self.sequence.starts_with(ESC_CHAR) {
            None
        } else {
            Some(&self.sequence)
        }
    }

    #[must_use]
    pub fn is(&self, name: KeyName) -> bool { self.name == Some(name) }

    #[must_use]
    pub fn has_modifiers(&self) -> bool { self.ctrl || self.meta || self.shift }
}
