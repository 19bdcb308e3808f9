// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Events returned by [`crate::Readline::readline()`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ReadlineEvent {
    /// The user entered a line of text.
    Line(String),

    /// The user pressed `Ctrl+D` on an empty line, the input ended, or the session was
    /// cancelled. The session is closed.
    Eof,

    /// The user pressed `Ctrl+C`. The session stays open and the line is kept; the host
    /// decides whether to clear it or close.
    Interrupted,

    /// The user pressed `Ctrl+Z`. Raw mode is still on; the host decides what suspending
    /// means.
    Suspended,
}
