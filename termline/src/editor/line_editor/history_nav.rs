// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Up / down browse the entries that start with the text that was before the cursor when
//! browsing began. Entries equal to the line being shown are skipped, so a run of
//! duplicates takes one key press.

use std::io::{self, Write};

use super::core::LineEditor;
use crate::{HistoryStore, lock, ok};

fn is_candidate(history: &HistoryStore, index: usize, search: &str, line: &str) -> bool {
    history
        .get(index)
        .is_some_and(|entry| entry.starts_with(search) && entry != line)
}

impl LineEditor {
    /// Show the next older matching entry. Past the oldest match, the search prefix is
    /// shown again.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn history_prev(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let history_len = lock!(self.history).len();
        let start = match self.history_index {
            None => 0,
            Some(index) if index < history_len => index + 1,
            Some(_) => return ok!(),
        };
        if history_len == 0 {
            return ok!();
        }

        self.before_edit();
        let search = self.substring_search.clone().unwrap_or_default();
        let found = {
            let history = lock!(self.history);
            (start..history.len())
                .find(|&index| is_candidate(&history, index, &search, &self.line))
                .and_then(|index| history.get(index).map(|it| (index, it.to_owned())))
        };
        let (index, line) = found.unwrap_or((history_len, search));

        self.line = line;
        self.history_index = Some(index);
        self.cursor = self.line.len();
        self.refresh_line(term)
    }

    /// Show the next newer matching entry. Past the newest match, the search prefix is
    /// shown again and browsing ends.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn history_next(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let Some(current) = self.history_index else {
            return ok!();
        };

        self.before_edit();
        let search = self.substring_search.clone().unwrap_or_default();
        let found = {
            let history = lock!(self.history);
            (0..current.min(history.len()))
                .rev()
                .find(|&index| is_candidate(&history, index, &search, &self.line))
                .and_then(|index| history.get(index).map(|it| (index, it.to_owned())))
        };

        match found {
            Some((index, line)) => {
                self.line = line;
                self.history_index = Some(index);
            }
            None => {
                self.line = search;
                self.history_index = None;
            }
        }
        self.cursor = self.line.len();
        self.refresh_line(term)
    }
}

#[cfg(test)]
mod tests {
    use termline_test_fixtures::StdoutMock;

    use super::super::test_support::type_text;
    use crate::{EditorConfig, LineEditor};

    const UP: &str = "\x1b[A";
    const DOWN: &str = "\x1b[B";

    fn editor_with_history(entries: &[&str]) -> LineEditor {
        let config = EditorConfig::default()
            .with_history(entries.iter().map(ToString::to_string).collect());
        LineEditor::new(&config).unwrap()
    }

    #[test]
    fn test_browse_all_entries() {
        let mut stdout_mock = StdoutMock::new();
        let mut editor = editor_with_history(&["three", "two", "one"]);

        type_text(&mut editor, UP, &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "three");
        pretty_assertions::assert_eq!(editor.cursor(), 5);
        pretty_assertions::assert_eq!(editor.history_index(), Some(0));

        type_text(&mut editor, &format!("{UP}{UP}"), &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "one");

        type_text(&mut editor, UP, &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "");
        pretty_assertions::assert_eq!(editor.history_index(), Some(3));

        type_text(&mut editor, DOWN, &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "one");
        type_text(&mut editor, &format!("{DOWN}{DOWN}{DOWN}"), &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "");
        pretty_assertions::assert_eq!(editor.history_index(), None);
    }

    #[test]
    fn test_prefix_search() {
        let mut stdout_mock = StdoutMock::new();
        let mut editor = editor_with_history(&["git push", "ls", "git commit", "git push"]);

        type_text(&mut editor, "git", &mut stdout_mock);
        type_text(&mut editor, UP, &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.substring_search(), Some("git"));
        pretty_assertions::assert_eq!(editor.line(), "git push");

        type_text(&mut editor, UP, &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "git commit");

        // The older "git push" is skipped only while it is the line being shown.
        type_text(&mut editor, UP, &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "git push");
        pretty_assertions::assert_eq!(editor.history_index(), Some(3));

        type_text(&mut editor, UP, &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "git");
    }

    #[test]
    fn test_other_key_ends_search() {
        let mut stdout_mock = StdoutMock::new();
        let mut editor = editor_with_history(&["abc"]);

        type_text(&mut editor, "x", &mut stdout_mock);
        type_text(&mut editor, UP, &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "x");
        pretty_assertions::assert_eq!(editor.history_index(), Some(1));

        type_text(&mut editor, "y", &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.substring_search(), None);
        pretty_assertions::assert_eq!(editor.history_index(), None);
        pretty_assertions::assert_eq!(editor.line(), "xy");
    }

    #[test]
    fn test_empty_history_does_nothing() {
        let mut stdout_mock = StdoutMock::new();
        let mut editor = editor_with_history(&[]);
        type_text(&mut editor, "q", &mut stdout_mock);
        type_text(&mut editor, UP, &mut stdout_mock);
        pretty_assertions::assert_eq!(editor.line(), "q");
        pretty_assertions::assert_eq!(editor.history_index(), None);
        pretty_assertions::assert_eq!(editor.undo_redo().undo_len(), 1);
    }
}
