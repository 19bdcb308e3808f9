// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

pub const ESC_CHAR: char = '\x1b';
pub const CSI_START: &str = "\x1b[";
pub const CSI_PARAM_SEPARATOR: char = ';';

/// Cursor Up (CUU).
pub const CUU_CURSOR_UP: char = 'A';
/// Cursor Down (CUD).
pub const CUD_CURSOR_DOWN: char = 'B';
/// Cursor Forward (CUF).
pub const CUF_CURSOR_FORWARD: char = 'C';
/// Cursor Backward (CUB).
pub const CUB_CURSOR_BACKWARD: char = 'D';
/// Cursor Horizontal Absolute (CHA).
pub const CHA_CURSOR_COLUMN: char = 'G';
/// Cursor Position (CUP).
pub const CUP_CURSOR_POSITION: char = 'H';
/// Erase in Display (ED).
pub const ED_ERASE_DISPLAY: char = 'J';
/// Erase in Line (EL).
pub const EL_ERASE_LINE: char = 'K';

/// `ED` / `EL` parameter: from the cursor to the end.
pub const ERASE_TO_END: u16 = 0;
/// `ED` / `EL` parameter: from the start to the cursor.
pub const ERASE_TO_START: u16 = 1;
/// `ED` / `EL` parameter: everything.
pub const ERASE_ALL: u16 = 2;

pub const CRLF: &str = "\r\n";
