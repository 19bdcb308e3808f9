// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editing state machine behind [`crate::Readline`].
//!
//! [`LineEditor`] owns the line buffer and cursor, applies decoded [`crate::Key`]s to
//! them, and repaints the prompt and line after each change. It never reads input or
//! awaits anything: keys go in, terminal output and [`EditorEvent`]s come out.
//!
//! | Module           | Responsibility                                               |
//! |------------------|--------------------------------------------------------------|
//! | `core`           | [`LineEditor`] struct, [`EditorEvent`], accessors            |
//! | `text_offsets`   | Char lengths and boundaries around a byte offset             |
//! | `render`         | Repainting, cursor position math, relative cursor moves      |
//! | `navigation`     | Char, word and line-end movement                             |
//! | `editing`        | Insert, delete, kill, yank, undo and redo, committing a line |
//! | `history_nav`    | Browsing history with a typed prefix                         |
//! | `completion`     | Applying a completer's candidates                            |
//! | `event_handlers` | Key dispatch (Ctrl+Shift, Ctrl, Meta, unmodified keys)       |
//!
//! The cursor is a byte offset into the line and always sits on a `char` boundary.

// Private modules organized by functional responsibility.
mod completion;
mod core;
mod editing;
mod event_handlers;
mod history_nav;
mod navigation;
mod render;
mod text_offsets;

#[cfg(test)]
mod test_support;

// Public re-exports (expose stable API).
pub use core::*;
