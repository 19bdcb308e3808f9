// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use super::core::LineEditor;
use crate::{Completions, common_prefix, format_completion_grid, ok};

impl LineEditor {
    /// Apply what a completer returned for the text before the cursor.
    ///
    /// 1. No candidates: nothing happens.
    /// 2. The candidates' common prefix extends `completed_on`: the extra text is
    ///    inserted.
    /// 3. The common prefix diverges from `completed_on`: `completed_on` is replaced with
    ///    it.
    /// 4. Otherwise, on the second tab in a row, the candidates are listed in a grid
    ///    below the line and the line is repainted under them.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn apply_completions(
        &mut self,
        completions: &Completions,
        last_keypress_was_tab: bool,
        term: &mut dyn Write,
    ) -> io::Result<()> {
        let Completions {
            candidates,
            completed_on,
        } = completions;
        if candidates.is_empty() {
            return ok!();
        }

        let non_empty: Vec<&str> = candidates
            .iter()
            .map(String::as_str)
            .filter(|it| !it.is_empty())
            .collect();
        let prefix = common_prefix(&non_empty);

        if let Some(extension) = prefix.strip_prefix(completed_on.as_str())
            && !extension.is_empty()
        {
            return self.insert_str(extension, term);
        }

        if !completed_on.starts_with(&prefix) {
            let Some(start) = self
                .cursor
                .checked_sub(completed_on.len())
                .filter(|&it| self.line.is_char_boundary(it))
            else {
                return ok!();
            };
            self.before_edit();
            self.line.replace_range(start..self.cursor, &prefix);
            self.cursor = start + prefix.len();
            return self.refresh_line(term);
        }

        if !last_keypress_was_tab {
            return ok!();
        }

        self.before_edit();
        let grid = format_completion_grid(candidates, self.columns);
        Self::write_to_output(&grid, term)?;
        self.refresh_line(term)
    }
}
