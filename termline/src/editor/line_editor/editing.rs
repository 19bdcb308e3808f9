// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use super::{core::LineEditor,
            navigation::{delete_word_right_len, word_left_len},
            text_offsets::{char_len_at, char_len_left}};
use crate::{CRLF, EditSnapshot, lock, ok};

// ╭───────────────────────────────────────────────╮
// │ Inserting and deleting                        │
// ╰───────────────────────────────────────────────╯

impl LineEditor {
    /// Insert `text` at the cursor. At the end of the line, when the text doesn't push
    /// the cursor onto a new row, only the text itself is written. Otherwise the line is
    /// repainted.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn insert_str(&mut self, text: &str, term: &mut dyn Write) -> io::Result<()> {
        self.before_edit();
        if self.cursor < self.line.len() {
            self.line.insert_str(self.cursor, text);
            self.cursor += text.len();
            self.refresh_line(term)
        } else {
            let old_pos = self.cursor_pos();
            self.line.push_str(text);
            self.cursor += text.len();
            let new_pos = self.cursor_pos();
            if old_pos.rows < new_pos.rows {
                self.refresh_line(term)
            } else {
                Self::write_to_output(text, term)
            }
        }
    }

    /// Delete the char before the cursor.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn delete_left(&mut self, term: &mut dyn Write) -> io::Result<()> {
        if self.cursor == 0 || self.line.is_empty() {
            return ok!();
        }
        self.before_edit();
        let start = self.cursor - char_len_left(&self.line, self.cursor);
        self.line.replace_range(start..self.cursor, "");
        self.cursor = start;
        self.refresh_line(term)
    }

    /// Delete the char under the cursor.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn delete_right(&mut self, term: &mut dyn Write) -> io::Result<()> {
        if self.cursor >= self.line.len() {
            return ok!();
        }
        self.before_edit();
        let end = self.cursor + char_len_at(&self.line, self.cursor);
        self.line.replace_range(self.cursor..end, "");
        self.refresh_line(term)
    }

    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn delete_word_left(&mut self, term: &mut dyn Write) -> io::Result<()> {
        if self.cursor == 0 {
            return ok!();
        }
        self.before_edit();
        let start = self.cursor - word_left_len(self.line_before_cursor());
        self.line.replace_range(start..self.cursor, "");
        self.cursor = start;
        self.refresh_line(term)
    }

    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn delete_word_right(&mut self, term: &mut dyn Write) -> io::Result<()> {
        if self.cursor >= self.line.len() {
            return ok!();
        }
        self.before_edit();
        let end = self.cursor + delete_word_right_len(self.line_after_cursor());
        self.line.replace_range(self.cursor..end, "");
        self.refresh_line(term)
    }
}

// ╭───────────────────────────────────────────────╮
// │ Kill ring                                     │
// ╰───────────────────────────────────────────────╯

impl LineEditor {
    /// Delete from the start of the line to the cursor, saving the text in the kill
    /// ring.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn delete_line_left(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.before_edit();
        let deleted: String = self.line.drain(..self.cursor).collect();
        self.kill_ring.push(&deleted);
        self.cursor = 0;
        self.refresh_line(term)
    }

    /// Delete from the cursor to the end of the line, saving the text in the kill ring.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn delete_line_right(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.before_edit();
        let deleted = self.line.split_off(self.cursor);
        self.kill_ring.push(&deleted);
        self.refresh_line(term)
    }

    /// Insert the kill ring entry under the yank cursor and start yanking, so that
    /// [`Self::yank_pop`] can swap it for older entries.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn yank(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let Some(text) = self.kill_ring.current().map(str::to_owned) else {
            return ok!();
        };
        self.yanking = true;
        self.insert_str(&text, term)
    }

    /// Replace the text just yanked with the next older kill ring entry. Only works
    /// right after a yank or another yank pop, and only with 2 or more entries.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn yank_pop(&mut self, term: &mut dyn Write) -> io::Result<()> {
        if !self.yanking || self.kill_ring.len() < 2 {
            return ok!();
        }
        let Some(last_yank_len) = self.kill_ring.current().map(str::len) else {
            return ok!();
        };
        let Some(start) = self
            .cursor
            .checked_sub(last_yank_len)
            .filter(|&it| self.line.is_char_boundary(it))
        else {
            return ok!();
        };

        self.kill_ring.advance();
        let Some(current_yank) = self.kill_ring.current().map(str::to_owned) else {
            return ok!();
        };
        self.before_edit();
        self.line.replace_range(start..self.cursor, &current_yank);
        self.cursor = start + current_yank.len();
        self.refresh_line(term)
    }
}

// ╭───────────────────────────────────────────────╮
// │ Undo and redo                                 │
// ╰───────────────────────────────────────────────╯

impl LineEditor {
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn undo(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let current = EditSnapshot::new(self.line.clone(), self.cursor);
        let Some(previous) = self.undo_redo.undo(current) else {
            return ok!();
        };
        self.restore(previous);
        self.refresh_line(term)
    }

    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn redo(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let current = EditSnapshot::new(self.line.clone(), self.cursor);
        let Some(next) = self.undo_redo.redo(current) else {
            return ok!();
        };
        self.restore(next);
        self.refresh_line(term)
    }
}

// ╭───────────────────────────────────────────────╮
// │ Committing a line                             │
// ╰───────────────────────────────────────────────╯

impl LineEditor {
    /// Add the line to history (see [`crate::HistoryStore::add`]), stop browsing, and
    /// return the line.
    pub fn add_to_history(&mut self) -> String {
        self.history_index = None;
        if self.line.is_empty() {
            return String::new();
        }
        let mut history = lock!(self.history);
        if history.add(&self.line) {
            tracing::debug!(message = "history updated", len = history.len());
        }
        self.line.clone()
    }

    /// Move below the line and reset it to empty, leaving what was typed on screen.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn clear_line(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.move_end(term)?;
        Self::write_to_output(CRLF, term)?;
        self.line.clear();
        self.cursor = 0;
        self.prev_rows = 0;
        ok!()
    }

    /// Finish the current line: record it in history, drop its undo / redo state, and
    /// start a fresh line below it. Returns the committed text.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn commit_line(&mut self, term: &mut dyn Write) -> io::Result<String> {
        let line = self.add_to_history();
        self.undo_redo.clear();
        self.clear_line(term)?;
        tracing::debug!(message = "line committed", len = line.len());
        ok!(line)
    }
}
