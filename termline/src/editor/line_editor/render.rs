// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use super::{core::LineEditor,
            text_offsets::{floor_char_boundary, to_isize}};
use crate::{DisplayPos, clear_screen_down, cursor_to, display_pos, move_cursor, ok};

impl LineEditor {
    /// Where the cursor is on screen, counting from the start of the prompt.
    #[must_use]
    pub fn cursor_pos(&self) -> DisplayPos {
        let before_cursor = format!("{}{}", self.prompt, self.line_before_cursor());
        self.display_pos_of(&before_cursor)
    }

    fn display_pos_of(&self, text: &str) -> DisplayPos {
        display_pos(text, self.columns, self.tab_size)
    }

    /// Repaint the prompt and line, and put the cursor back where it belongs.
    ///
    /// The whole repaint is built in memory and written to `term` in one go:
    ///
    /// 1. Move up to the prompt's row (using the rows the last repaint left behind).
    /// 2. Go to column 0 and clear everything below.
    /// 3. Write the prompt and line. A line that ends exactly at a row boundary gets an
    ///    extra space so the terminal wraps to the next row.
    /// 4. Move to the cursor's column, then up to the cursor's row.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn refresh_line(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let full_line = format!("{}{}", self.prompt, self.line);
        let line_pos = self.display_pos_of(&full_line);
        let cursor_pos = self.cursor_pos();

        let mut buffer = Vec::<u8>::with_capacity(full_line.len() + 32);
        if self.prev_rows > 0 {
            move_cursor(&mut buffer, 0, -to_isize(self.prev_rows))?;
        }
        cursor_to(&mut buffer, 0, None)?;
        clear_screen_down(&mut buffer)?;
        buffer.write_all(full_line.as_bytes())?;
        if line_pos.cols == 0 {
            buffer.write_all(b" ")?;
        }
        cursor_to(&mut buffer, cursor_pos.cols, None)?;
        let rows_below_cursor = line_pos.rows.saturating_sub(cursor_pos.rows);
        if rows_below_cursor > 0 {
            move_cursor(&mut buffer, 0, -to_isize(rows_below_cursor))?;
        }
        self.prev_rows = cursor_pos.rows;

        term.write_all(&buffer)?;
        term.flush()
    }

    /// Show the prompt (and the line) again. The cursor goes to the start of the line
    /// unless `preserve_cursor` is set.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn prompt(&mut self, preserve_cursor: bool, term: &mut dyn Write) -> io::Result<()> {
        if !preserve_cursor {
            self.cursor = 0;
        }
        self.refresh_line(term)
    }

    /// Track a new terminal width and repaint for it.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn set_columns(
        &mut self,
        columns: Option<usize>,
        term: &mut dyn Write,
    ) -> io::Result<()> {
        self.columns = columns;
        self.refresh_line(term)
    }

    /// Clear the whole screen and repaint the line at the top.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn clear_screen(&mut self, term: &mut dyn Write) -> io::Result<()> {
        cursor_to(term, 0, Some(0))?;
        clear_screen_down(term)?;
        self.refresh_line(term)
    }

    /// Move the cursor by `dx` bytes, clamped to the line and snapped to a char
    /// boundary. A move that stays on the same screen row is a relative cursor move;
    /// anything else repaints.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn move_cursor(&mut self, dx: isize, term: &mut dyn Write) -> io::Result<()> {
        if dx == 0 {
            return ok!();
        }
        let old_pos = self.cursor_pos();
        let target = self.cursor.saturating_add_signed(dx);
        self.cursor = floor_char_boundary(&self.line, target);
        let new_pos = self.cursor_pos();

        if old_pos.rows == new_pos.rows {
            move_cursor(term, to_isize(new_pos.cols) - to_isize(old_pos.cols), 0)?;
            term.flush()
        } else {
            self.refresh_line(term)
        }
    }

    pub(super) fn write_to_output(text: &str, term: &mut dyn Write) -> io::Result<()> {
        term.write_all(text.as_bytes())?;
        term.flush()
    }
}
