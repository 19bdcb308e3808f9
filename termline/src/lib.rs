// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

//! # termline
//!
//! An interactive terminal line editor. Raw characters typed into a terminal are decoded
//! into named keys, the keys edit a single line buffer (with history, a kill ring, and
//! undo / redo), and every edit is painted back to the terminal with the smallest set of
//! cursor moves and clears that keeps the screen in sync with the buffer.
//!
//! ```text
//! input chunks ──▶ KeyDecoder ──▶ LineEditor ──▶ terminal ops (CSI) ──▶ output sink
//!                     │               │
//!              escape timeout    width math, history, kill ring, undo / redo
//! ```
//!
//! # Layers
//!
//! 1. [`width`] - display width of code points and strings, and the row / column that a
//!    string ends on for a given terminal width.
//! 2. [`keys`] - the incremental escape sequence decoder ([`KeyDecoder`]) and the
//!    [`Key`] it produces.
//! 3. [`editor`] - [`HistoryStore`], [`KillRing`], [`UndoRedoStacks`] and the
//!    [`LineEditor`] that ties them together.
//! 4. [`completion`] - the [`Completer`] capability and the column grid used to list
//!    candidates.
//! 5. [`session`] - the async host: [`Readline`] reads chunks from an input stream,
//!    arms the escape timeout, awaits the completer, and hands back [`ReadlineEvent`]s.
//! 6. [`ansi`] - the CSI sequences written to the terminal, plus [`PendingTerminalOps`]
//!    for batching them.
//!
//! # Usage
//!
//! ```no_run
//! use termline::{EditorConfig, ReadlineEvent, TerminalSession};
//!
//! # async fn run() -> miette::Result<()> {
//! let Some(mut session) = TerminalSession::try_new(EditorConfig::default())? else {
//!     return Ok(()); // Not an interactive terminal.
//! };
//! loop {
//!     session.readline.prompt(false)?;
//!     match session.readline.readline().await? {
//!         ReadlineEvent::Line(line) => print!("{line}\r\n"),
//!         ReadlineEvent::Eof | ReadlineEvent::Interrupted => break,
//!         ReadlineEvent::Suspended => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events. Use [`tracing_logging::init`] to send them to a
//! file (writing logs to the same terminal that is being edited garbles the line).

// Attach sources.
pub mod ansi;
pub mod completion;
pub mod config;
pub mod decl_macros;
pub mod editor;
pub mod error;
pub mod keys;
pub mod session;
pub mod tracing_logging;
pub mod width;

// Re-export the public API.
pub use ansi::*;
pub use completion::*;
pub use config::*;
pub use editor::*;
pub use error::*;
pub use keys::*;
pub use session::*;
pub use width::*;

// Type aliases.
use std::{io, pin::Pin, sync::Arc};

use futures_core::Stream;

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type SendRawTerminal = dyn io::Write + Send;
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

pub type SafeHistory = Arc<StdMutex<HistoryStore>>;
pub type SafeCompleter = Arc<dyn Completer>;

/// One chunk of decoded terminal input (or the error that ended the input).
pub type InputChunkResult = io::Result<String>;
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

// Constants.
pub const HISTORY_SIZE_DEFAULT: usize = 30;
pub const MAX_UNDO_REDO_STACK_SIZE: usize = 2_048;
pub const KILL_RING_MAX: usize = 32;
pub const ESCAPE_CODE_TIMEOUT_DEFAULT_MS: u64 = 500;
pub const CRLF_DELAY_MIN_MS: u64 = 100;
pub const TAB_SIZE_DEFAULT: usize = 8;
pub const PROMPT_DEFAULT: &str = "> ";
