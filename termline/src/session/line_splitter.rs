// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{mem,
          time::{Duration, Instant}};

/// Splits raw input into lines when nothing is being edited (input is not a terminal).
///
/// `\r\n`, `\n` and `\r` all end a line. A chunk that ends in `\r` can't know whether a
/// `\n` follows, so the line ends there; a `\n` at the start of the next chunk, arriving
/// within `crlf_delay`, is then dropped instead of producing an empty line.
#[derive(Debug, Clone)]
pub struct LineSplitter {
    buffer: String,
    saw_return_at: Option<Instant>,
    crlf_delay: Duration,
}

impl LineSplitter {
    #[must_use]
    pub fn new(crlf_delay: Duration) -> Self {
        Self {
            buffer: String::new(),
            saw_return_at: None,
            crlf_delay,
        }
    }

    /// Add a chunk of input, returning the lines it completed.
    pub fn push(&mut self, chunk: &str) -> Vec<String> { self.push_at(chunk, Instant::now()) }

    /// [`Self::push`] with an explicit arrival time.
    pub fn push_at(&mut self, chunk: &str, now: Instant) -> Vec<String> {
        let mut chunk = chunk;
        if let Some(saw_return_at) = self.saw_return_at.take()
            && now.saturating_duration_since(saw_return_at) <= self.crlf_delay
        {
            chunk = chunk.strip_prefix('\n').unwrap_or(chunk);
        }

        let mut lines = vec![];
        let mut rest = chunk;
        while let Some(index) = rest.find(['\r', '\n']) {
            self.buffer.push_str(&rest[..index]);
            lines.push(mem::take(&mut self.buffer));
            let ending_len = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
            rest = &rest[index + ending_len..];
        }
        self.buffer.push_str(rest);

        if chunk.ends_with('\r') {
            self.saw_return_at = Some(now);
        }
        lines
    }

    /// Text received after the last line ending.
    #[must_use]
    pub fn buffered(&self) -> &str { &self.buffer }

    /// The unterminated last line, if any. Called when the input ends.
    pub fn finish(&mut self) -> Option<String> {
        self.saw_return_at = None;
        if self.buffer.is_empty() {
            None
        } else {
            Some(mem::take(&mut self.buffer))
        }
    }
}
