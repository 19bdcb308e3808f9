// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{code_point_width, strip_vt_control_characters};

/// Where the cursor lands after printing some text from the start of a row: `rows` full
/// rows below, at column `cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPos {
    pub cols: usize,
    pub rows: usize,
}

/// Compute the [`DisplayPos`] reached after printing `text` from column 0.
///
/// - `columns` is the terminal width. [None] means output is not wrapped (for example
///   when it goes to something that isn't a terminal).
/// - `\n` starts a new row. A row that was filled exactly (wrapped) still only counts as
///   one row, and an empty row counts as one.
/// - `\t` advances to the next multiple of `tab_size`.
/// - A wide char that would start in the last column of a row is pushed to the next row,
///   leaving a one column gap.
/// - ANSI escape sequences are ignored.
#[must_use]
pub fn display_pos(text: &str, columns: Option<usize>, tab_size: usize) -> DisplayPos {
    let columns = columns.filter(|&it| it > 0);
    let tab_size = tab_size.max(1);
    let text = strip_vt_control_characters(text);

    let mut offset: usize = 0;
    let mut rows = 0;

    for ch in text.chars() {
        match ch {
            '\n' => {
                rows += match columns {
                    Some(columns) => offset.div_ceil(columns).max(1),
                    None => 1,
                };
                offset = 0;
            }
            '\t' => offset += tab_size - (offset % tab_size),
            _ => {
                let width = code_point_width(ch);
                if width == 2
                    && let Some(columns) = columns
                    && (offset + 1).is_multiple_of(columns)
                {
                    offset += 1;
                }
                offset += width;
            }
        }
    }

    match columns {
        Some(columns) => DisplayPos {
            cols: offset % columns,
            rows: rows + offset / columns,
        },
        None => DisplayPos { cols: offset, rows },
    }
}
