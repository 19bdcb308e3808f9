// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Cursor movement and clearing, written straight to an output sink.
//!
//! | operation | bytes written |
//! |---|---|
//! | [`cursor_to`] (column only) | `ESC [ col+1 G` |
//! | [`cursor_to`] (column and row) | `ESC [ row+1 ; col+1 H` |
//! | [`move_cursor`] | `ESC [ n D` or `C`, then `ESC [ n A` or `B` |
//! | [`clear_line`] | `ESC [ 1 K`, `ESC [ 0 K`, or `ESC [ 2 K` |
//! | [`clear_screen_down`] | `ESC [ 0 J` |

use std::io::{self, Write};

use crate::{CsiSequence, ERASE_ALL, ERASE_TO_END, ERASE_TO_START, ok};

/// Which part of the current row [`clear_line`] erases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ClearLineDirection {
    /// From the start of the row up to the cursor.
    Left,
    /// From the cursor to the end of the row.
    Right,
    /// The whole row.
    Both,
}

/// `x` and `y` are 0-based.
#[must_use]
pub fn cursor_to_sequence(x: usize, y: Option<usize>) -> CsiSequence {
    match y {
        None => CsiSequence::CursorHorizontalAbsolute(x + 1),
        Some(y) => CsiSequence::CursorPosition {
            row: y + 1,
            col: x + 1,
        },
    }
}

/// Horizontal move first, then vertical. A zero delta on an axis produces nothing for
/// that axis.
pub fn move_cursor_sequences(dx: isize, dy: isize) -> impl Iterator<Item = CsiSequence> {
    let horizontal = match dx {
        0 => None,
        dx if dx < 0 => Some(CsiSequence::CursorBackward(dx.unsigned_abs())),
        dx => Some(CsiSequence::CursorForward(dx.unsigned_abs())),
    };
    let vertical = match dy {
        0 => None,
        dy if dy < 0 => Some(CsiSequence::CursorUp(dy.unsigned_abs())),
        dy => Some(CsiSequence::CursorDown(dy.unsigned_abs())),
    };
    [horizontal, vertical].into_iter().flatten()
}

#[must_use]
pub fn clear_line_sequence(direction: ClearLineDirection) -> CsiSequence {
    match direction {
        ClearLineDirection::Left => CsiSequence::EraseLine(ERASE_TO_START),
        ClearLineDirection::Right => CsiSequence::EraseLine(ERASE_TO_END),
        ClearLineDirection::Both => CsiSequence::EraseLine(ERASE_ALL),
    }
}

pub const CLEAR_SCREEN_DOWN: CsiSequence = CsiSequence::EraseDisplay(ERASE_TO_END);

/// Move to column `x` of the current row, or to `(x, y)` of the screen.
///
/// # Errors
///
/// If writing to `term` fails.
pub fn cursor_to(term: &mut dyn Write, x: usize, y: Option<usize>) -> io::Result<()> {
    write!(term, "{}", cursor_to_sequence(x, y))
}

/// Move relative to the current position.
///
/// # Errors
///
/// If writing to `term` fails.
pub fn move_cursor(term: &mut dyn Write, dx: isize, dy: isize) -> io::Result<()> {
    for sequence in move_cursor_sequences(dx, dy) {
        write!(term, "{sequence}")?;
    }
    ok!()
}

/// # Errors
///
/// If writing to `term` fails.
pub fn clear_line(term: &mut dyn Write, direction: ClearLineDirection) -> io::Result<()> {
    write!(term, "{}", clear_line_sequence(direction))
}

/// Clear from the cursor to the end of the screen.
///
/// # Errors
///
/// If writing to `term` fails.
pub fn clear_screen_down(term: &mut dyn Write) -> io::Result<()> {
    write!(term, "{CLEAR_SCREEN_DOWN}")
}
