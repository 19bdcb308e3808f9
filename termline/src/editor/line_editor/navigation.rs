// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{self, Write},
          sync::LazyLock};

use regex::Regex;

use super::{core::LineEditor,
            text_offsets::{char_len_at, char_len_left, to_isize}};
use crate::ok;

// Word chars are ASCII `[0-9A-Za-z_]`.

/// Matched against the text before the cursor, reversed: optional whitespace, then a run
/// of punctuation or a run of word chars.
static WORD_LEFT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[^0-9A-Za-z_\s]+|[0-9A-Za-z_]+)?")
        .expect("WORD_LEFT_REGEX should compile")
});

/// Matched against the text after the cursor when moving.
static WORD_RIGHT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s+|[^0-9A-Za-z_\s]+|[0-9A-Za-z_]+)\s*")
        .expect("WORD_RIGHT_REGEX should compile")
});

/// Matched against the text after the cursor when deleting. Unlike
/// [`WORD_RIGHT_REGEX`], a punctuation run also swallows whitespace.
static DELETE_WORD_RIGHT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s+|[^0-9A-Za-z_]+|[0-9A-Za-z_]+)\s*")
        .expect("DELETE_WORD_RIGHT_REGEX should compile")
});

/// Bytes between the start of the previous word and the end of `before_cursor`.
pub fn word_left_len(before_cursor: &str) -> usize {
    let reversed: String = before_cursor.chars().rev().collect();
    WORD_LEFT_REGEX.find(&reversed).map_or(0, |it| it.len())
}

/// Bytes from the start of `after_cursor` to the start of the next word.
pub fn word_right_len(after_cursor: &str) -> usize {
    WORD_RIGHT_REGEX.find(after_cursor).map_or(0, |it| it.len())
}

/// Bytes that delete-word-right removes from the start of `after_cursor`.
pub fn delete_word_right_len(after_cursor: &str) -> usize {
    DELETE_WORD_RIGHT_REGEX
        .find(after_cursor)
        .map_or(0, |it| it.len())
}

// ╭───────────────────────────────────────────────╮
// │ Movement commands                             │
// ╰───────────────────────────────────────────────╯

impl LineEditor {
    /// One char left.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn move_left(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let len = char_len_left(&self.line, self.cursor);
        self.move_cursor(-to_isize(len), term)
    }

    /// One char right.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn move_right(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let len = char_len_at(&self.line, self.cursor);
        self.move_cursor(to_isize(len), term)
    }

    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn move_home(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.move_cursor(isize::MIN, term)
    }

    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn move_end(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.move_cursor(isize::MAX, term)
    }

    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn word_left(&mut self, term: &mut dyn Write) -> io::Result<()> {
        if self.cursor == 0 {
            return ok!();
        }
        let len = word_left_len(self.line_before_cursor());
        self.move_cursor(-to_isize(len), term)
    }

    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn word_right(&mut self, term: &mut dyn Write) -> io::Result<()> {
        if self.cursor >= self.line.len() {
            return ok!();
        }
        let len = word_right_len(self.line_after_cursor());
        self.move_cursor(to_isize(len), term)
    }
}
