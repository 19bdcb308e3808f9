// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line editing engine.
//!
//! | Module        | Responsibility                                                 |
//! |---------------|----------------------------------------------------------------|
//! | `history`     | [`HistoryStore`], past lines newest first, file persistence    |
//! | `kill_ring`   | [`KillRing`], deleted fragments and the yank cursor            |
//! | `undo_redo`   | [`UndoRedoStacks`] of [`EditSnapshot`]s                        |
//! | `line_editor` | [`LineEditor`], key dispatch, editing commands and repainting  |

// Attach sources.
pub mod history;
pub mod kill_ring;
pub mod line_editor;
pub mod undo_redo;

// Re-export.
pub use history::*;
pub use kill_ring::*;
pub use line_editor::*;
pub use undo_redo::*;
