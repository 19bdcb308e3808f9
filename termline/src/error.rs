// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use miette::Diagnostic;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ReadlineError {
    #[error("IO error: {0}")]
    #[diagnostic(code(termline::io))]
    IO(#[from] io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("readline session was used after it was closed")]
    #[diagnostic(
        code(termline::use_after_close),
        help("Create a new session, a closed one can't read or write any more")
    )]
    UseAfterClose,

    #[error("failed to access history file {path}")]
    #[diagnostic(code(termline::history_file))]
    History {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Rejected [`crate::EditorConfig`] values. Raised when a session is created, never
/// while editing.
#[derive(Debug, thiserror::Error, Diagnostic, PartialEq)]
pub enum ConfigError {
    #[error("tab_size must be at least 1, got {tab_size}")]
    #[diagnostic(code(termline::config::tab_size))]
    InvalidTabSize { tab_size: usize },

    #[error("escape_code_timeout must be a finite, non-negative number of ms, got {value}")]
    #[diagnostic(
        code(termline::config::escape_code_timeout),
        help("The default is 500 ms")
    )]
    InvalidEscapeCodeTimeout { value: f64 },

    #[error("crlf_delay must be a finite, non-negative number of ms, got {value}")]
    #[diagnostic(
        code(termline::config::crlf_delay),
        help("Values below 100 ms are raised to 100 ms")
    )]
    InvalidCrlfDelay { value: f64 },

    #[error("history_size must be a non-negative integer, got {value}")]
    #[diagnostic(
        code(termline::config::history_size),
        help("Use 0 to disable history")
    )]
    InvalidHistorySize { value: f64 },
}

/// Failure reported by a [`crate::Completer`]. The session prints it inline as
/// `Tab completion error: <message>` and keeps going.
#[derive(Debug, Clone, thiserror::Error, Diagnostic, PartialEq, Eq)]
#[error("{message}")]
#[diagnostic(code(termline::completer))]
pub struct CompleterError {
    pub message: String,
}

impl From<String> for CompleterError {
    fn from(message: String) -> Self { Self { message } }
}

impl From<&str> for CompleterError {
    fn from(message: &str) -> Self { Self::from(message.to_owned()) }
}

impl From<io::Error> for CompleterError {
    fn from(error: io::Error) -> Self { Self::from(error.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        pretty_assertions::assert_eq!(
            ReadlineError::UseAfterClose.to_string(),
            "readline session was used after it was closed"
        );
        pretty_assertions::assert_eq!(
            ReadlineError::from(ConfigError::InvalidTabSize { tab_size: 0 }).to_string(),
            "tab_size must be at least 1, got 0"
        );
        pretty_assertions::assert_eq!(CompleterError::from("boom").to_string(), "boom");
    }

    #[test]
    fn test_diagnostic_codes() {
        let code = ReadlineError::UseAfterClose.code().unwrap().to_string();
        pretty_assertions::assert_eq!(code, "termline::use_after_close");

        let error = ReadlineError::from(ConfigError::InvalidHistorySize { value: -1.0 });
        let code = error.code().unwrap().to_string();
        pretty_assertions::assert_eq!(code, "termline::config::history_size");
    }
}
