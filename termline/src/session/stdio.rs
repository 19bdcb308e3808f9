// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{self, IsTerminal, stdin, stdout},
          sync::Arc};

use futures_util::stream;
use tokio::io::AsyncReadExt;

use crate::{EditorConfig, InputChunkResult, PinnedInputStream, Readline, ReadlineError,
            SafeRawTerminal, StdMutex, ok};

const STDIN_READ_BUFFER_SIZE: usize = 1_024;

/// Chunks of text read from the process's stdin, ending when stdin is closed.
///
/// Reads are decoded as UTF-8 incrementally: a multi byte sequence split between two
/// reads is carried over to the next chunk. Invalid bytes become `U+FFFD`.
#[must_use]
pub fn stdin_chunk_stream() -> PinnedInputStream<InputChunkResult> {
    let initial_state = (tokio::io::stdin(), Vec::<u8>::new());
    let it = stream::unfold(initial_state, |(mut stdin, mut carry)| async move {
        let mut buffer = [0_u8; STDIN_READ_BUFFER_SIZE];
        loop {
            match stdin.read(&mut buffer).await {
                Ok(0) => {
                    if carry.is_empty() {
                        return None;
                    }
                    let rest = String::from_utf8_lossy(&carry).into_owned();
                    carry.clear();
                    return Some((Ok(rest), (stdin, carry)));
                }
                Ok(count) => {
                    carry.extend_from_slice(&buffer[..count]);
                    let chunk = take_utf8_prefix(&mut carry);
                    // Only part of a multi byte sequence has arrived.
                    if chunk.is_empty() {
                        continue;
                    }
                    return Some((Ok(chunk), (stdin, carry)));
                }
                Err(error) => return Some((Err(error), (stdin, carry))),
            }
        }
    });
    Box::pin(it)
}

/// Remove and return the decodable prefix of `bytes`, leaving an incomplete trailing
/// sequence behind.
fn take_utf8_prefix(bytes: &mut Vec<u8>) -> String {
    let mut decoded = String::new();
    let mut start = 0;
    loop {
        match std::str::from_utf8(&bytes[start..]) {
            Ok(valid) => {
                decoded.push_str(valid);
                start = bytes.len();
                break;
            }
            Err(error) => {
                let valid_up_to = start + error.valid_up_to();
                decoded.push_str(&String::from_utf8_lossy(&bytes[start..valid_up_to]));
                match error.error_len() {
                    Some(invalid_len) => {
                        decoded.push(char::REPLACEMENT_CHARACTER);
                        start = valid_up_to + invalid_len;
                    }
                    None => {
                        start = valid_up_to;
                        break;
                    }
                }
            }
        }
    }
    bytes.drain(..start);
    decoded
}

/// Turns raw mode on for as long as it lives.
#[derive(Debug)]
pub struct RawModeGuard;

impl RawModeGuard {
    /// # Errors
    ///
    /// If the terminal can't be put into raw mode.
    pub fn try_new() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        tracing::debug!(message = "raw mode enabled");
        ok!(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(error) = crossterm::terminal::disable_raw_mode() {
            tracing::warn!(message = "failed to disable raw mode", error = ?error);
        }
    }
}

/// Width of the terminal attached to stdout, or [None] if it can't be queried.
#[must_use]
pub fn terminal_columns() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(columns, _rows)| usize::from(columns))
        .filter(|&columns| columns > 0)
}

/// A [`Readline`] wired to the process's stdin and stdout, with raw mode on.
#[derive(Debug)]
pub struct TerminalSession {
    pub readline: Readline,
    /// Dropped after `readline`, which restores cooked mode.
    _raw_mode_guard: RawModeGuard,
}

impl TerminalSession {
    /// Start a session on the process's stdio.
    ///
    /// # Returns
    ///
    /// 1. [None] if stdin or stdout is not a terminal (eg: input is piped in). Use
    ///    [`Readline`] with [`EditorConfig::terminal`] set to `false` in that case.
    /// 2. Otherwise a session with raw mode enabled, sized to the terminal. Raw mode is
    ///    turned off when the session is dropped.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::Config`] if `config` is invalid.
    /// - [`ReadlineError::IO`] if raw mode can't be enabled.
    pub fn try_new(config: EditorConfig) -> Result<Option<Self>, ReadlineError> {
        if !stdin().is_terminal() || !stdout().is_terminal() {
            tracing::debug!(message = "stdio is not a terminal");
            return ok!(None);
        }

        let config = config
            .with_terminal(true)
            .with_columns(terminal_columns());
        config.validate()?;

        let raw_mode_guard = RawModeGuard::try_new()?;
        let output: SafeRawTerminal = Arc::new(StdMutex::new(stdout()));
        let readline = Readline::try_new(&config, output, stdin_chunk_stream())?;

        ok!(Some(Self {
            readline,
            _raw_mode_guard: raw_mode_guard,
        }))
    }

    /// Repaint for the current terminal width.
    ///
    /// # Errors
    ///
    /// If writing to stdout fails.
    pub fn refresh_columns(&mut self) -> Result<(), ReadlineError> {
        self.readline.resize(terminal_columns())
    }
}
