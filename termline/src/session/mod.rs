// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The async host around a [`crate::LineEditor`].
//!
//! | Module           | Contents                                                    |
//! |------------------|-------------------------------------------------------------|
//! | `readline`       | [`Readline`]: reads input chunks and returns line events     |
//! | `readline_event` | [`ReadlineEvent`]                                           |
//! | `line_splitter`  | [`LineSplitter`]: line splitting when input isn't a terminal |
//! | `stdio`          | [`TerminalSession`]: a [`Readline`] on the process's stdio   |

// Attach sources.
pub mod line_splitter;
pub mod readline;
pub mod readline_event;
pub mod stdio;

// Re-export.
pub use line_splitter::*;
pub use readline::*;
pub use readline_event::*;
pub use stdio::*;
