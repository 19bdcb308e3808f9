// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The `CsiSequence` enum, one variant per control sequence the editor emits. Each
//! variant renders to its escape code via [`std::fmt::Display`].

use std::fmt::{Display, Formatter, Result};

use crate::{CHA_CURSOR_COLUMN, CSI_PARAM_SEPARATOR, CSI_START, CUB_CURSOR_BACKWARD,
            CUD_CURSOR_DOWN, CUF_CURSOR_FORWARD, CUP_CURSOR_POSITION, CUU_CURSOR_UP,
            ED_ERASE_DISPLAY, EL_ERASE_LINE};

/// Counts are the values written on the wire. Positions are 1-based, as the terminal
/// expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiSequence {
    /// Cursor Up (CUU) - ESC [ n A
    CursorUp(usize),
    /// Cursor Down (CUD) - ESC [ n B
    CursorDown(usize),
    /// Cursor Forward (CUF) - ESC [ n C
    CursorForward(usize),
    /// Cursor Backward (CUB) - ESC [ n D
    CursorBackward(usize),
    /// Cursor Horizontal Absolute (CHA) - ESC [ n G
    CursorHorizontalAbsolute(usize),
    /// Cursor Position (CUP) - ESC [ row ; col H
    CursorPosition { row: usize, col: usize },
    /// Erase Display (ED) - ESC [ n J
    EraseDisplay(u16),
    /// Erase Line (EL) - ESC [ n K
    EraseLine(u16),
}

impl Display for CsiSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CsiSequence::CursorUp(n) => write!(f, "{CSI_START}{n}{CUU_CURSOR_UP}"),
            CsiSequence::CursorDown(n) => write!(f, "{CSI_START}{n}{CUD_CURSOR_DOWN}"),
            CsiSequence::CursorForward(n) => {
                write!(f, "{CSI_START}{n}{CUF_CURSOR_FORWARD}")
            }
            CsiSequence::CursorBackward(n) => {
                write!(f, "{CSI_START}{n}{CUB_CURSOR_BACKWARD}")
            }
            CsiSequence::CursorHorizontalAbsolute(col) => {
                write!(f, "{CSI_START}{col}{CHA_CURSOR_COLUMN}")
            }
            CsiSequence::CursorPosition { row, col } => write!(
                f,
                "{CSI_START}{row}{CSI_PARAM_SEPARATOR}{col}{CUP_CURSOR_POSITION}"
            ),
            CsiSequence::EraseDisplay(mode) => {
                write!(f, "{CSI_START}{mode}{ED_ERASE_DISPLAY}")
            }
            CsiSequence::EraseLine(mode) => write!(f, "{CSI_START}{mode}{EL_ERASE_LINE}"),
        }
    }
}
