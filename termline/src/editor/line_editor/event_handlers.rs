// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{self, Write},
          sync::LazyLock,
          time::Instant};

use regex::Regex;

use super::core::{EditorEvent, LineEditor};
use crate::{Key, KeyName, ReadlineError, lock, ok};

/// First char of the sequence Ctrl+_ sends.
const UNDO_CHAR: char = '\x1f';
/// First char of the sequence Ctrl+^ sends.
const REDO_CHAR: char = '\x1e';

static LINE_ENDING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\n|\r").expect("LINE_ENDING_REGEX should compile"));

impl LineEditor {
    /// Apply one decoded key.
    ///
    /// Returns the event the key produced, if any: a committed line, end of input,
    /// interrupt / suspend requests, or a request to run the completer.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn apply_key(
        &mut self,
        key: &Key,
        term: &mut dyn Write,
    ) -> Result<Option<EditorEvent>, ReadlineError> {
        let previous_key = self.previous_key.replace(key.clone());
        if self.handle_any_key(key, term)? {
            return ok!(None);
        }

        if key.is(KeyName::Escape) {
            return ok!(None);
        }

        if key.ctrl && key.shift {
            handle_ctrl_shift_key(self, key, term)
        } else if key.ctrl {
            handle_control_key(self, key, term)
        } else if key.meta {
            handle_meta_key(self, key, term)
        } else {
            handle_regular_key(self, key, previous_key.as_ref(), term)
        }
    }

    /// Apply text written by the host as if it were typed, with no key attached. Every
    /// line break in `text` commits a line.
    ///
    /// # Errors
    ///
    /// If writing to `term` fails.
    pub fn write(
        &mut self,
        text: &str,
        term: &mut dyn Write,
    ) -> Result<Vec<EditorEvent>, ReadlineError> {
        let key = Key::new(text, None);
        self.previous_key = Some(key.clone());
        if self.handle_any_key(&key, term)? {
            return ok!(vec![]);
        }
        self.saw_return_at = None;
        let lines = self.insert_lines(text, term)?;
        ok!(lines.into_iter().map(EditorEvent::Line).collect())
    }

    /// Bookkeeping done for every key before dispatch. Returns `true` if the key was
    /// consumed (undo / redo).
    fn handle_any_key(&mut self, key: &Key, term: &mut dyn Write) -> io::Result<bool> {
        if !(key.meta && key.is(KeyName::Char('y'))) {
            if self.yanking {
                self.kill_ring.reset_cursor();
            }
            self.yanking = false;
        }

        let is_history_key =
            (key.is(KeyName::Up) || key.is(KeyName::Down)) && !key.has_modifiers();
        if is_history_key {
            if self.substring_search.is_none() {
                self.substring_search = Some(self.line_before_cursor().to_owned());
            }
        } else if self.substring_search.take().is_some() {
            let history_len = lock!(self.history).len();
            if self.history_index == Some(history_len) {
                self.history_index = None;
            }
        }

        match key.sequence.chars().next() {
            Some(UNDO_CHAR) => {
                self.undo(term)?;
                ok!(true)
            }
            Some(REDO_CHAR) => {
                self.redo(term)?;
                ok!(true)
            }
            _ => ok!(false),
        }
    }

    /// Insert `text`, committing a line at each `\r\n`, `\n` or `\r`. Returns the
    /// committed lines.
    fn insert_lines(&mut self, text: &str, term: &mut dyn Write) -> io::Result<Vec<String>> {
        let mut lines = vec![];
        let mut rest = text;
        while let Some(line_ending) = LINE_ENDING_REGEX.find(rest) {
            let before = &rest[..line_ending.start()];
            if !before.is_empty() {
                self.insert_str(before, term)?;
            }
            lines.push(self.commit_line(term)?);
            rest = &rest[line_ending.end()..];
        }
        if !rest.is_empty() {
            self.insert_str(rest, term)?;
        }
        ok!(lines)
    }
}

/// Ctrl+Shift combinations.
fn handle_ctrl_shift_key(
    editor: &mut LineEditor,
    key: &Key,
    term: &mut dyn Write,
) -> Result<Option<EditorEvent>, ReadlineError> {
    match key.name {
        Some(KeyName::Backspace) => editor.delete_line_left(term)?,
        Some(KeyName::Delete) => editor.delete_line_right(term)?,
        _ => {}
    }
    ok!(None)
}

/// Ctrl combinations.
fn handle_control_key(
    editor: &mut LineEditor,
    key: &Key,
    term: &mut dyn Write,
) -> Result<Option<EditorEvent>, ReadlineError> {
    let Some(name) = key.name else {
        return ok!(None);
    };
    match name {
        KeyName::Char('c') => return ok!(Some(EditorEvent::Interrupted)),
        KeyName::Char('d') => return handle_ctrl_d(editor, term),
        KeyName::Char('z') => return ok!(Some(EditorEvent::Suspended)),
        KeyName::Char('h') => editor.delete_left(term)?,
        KeyName::Char('u') => editor.delete_line_left(term)?,
        KeyName::Char('k') => editor.delete_line_right(term)?,
        KeyName::Char('a') => editor.move_home(term)?,
        KeyName::Char('e') => editor.move_end(term)?,
        KeyName::Char('b') => editor.move_left(term)?,
        KeyName::Char('f') => editor.move_right(term)?,
        KeyName::Char('l') => editor.clear_screen(term)?,
        KeyName::Char('n') => editor.history_next(term)?,
        KeyName::Char('p') => editor.history_prev(term)?,
        KeyName::Char('y') => editor.yank(term)?,
        KeyName::Char('w') | KeyName::Backspace => editor.delete_word_left(term)?,
        KeyName::Delete => editor.delete_word_right(term)?,
        KeyName::Left => editor.word_left(term)?,
        KeyName::Right => editor.word_right(term)?,
        _ => {}
    }
    ok!(None)
}

/// End of input on an empty line, otherwise delete the char under the cursor.
fn handle_ctrl_d(
    editor: &mut LineEditor,
    term: &mut dyn Write,
) -> Result<Option<EditorEvent>, ReadlineError> {
    if editor.cursor == 0 && editor.line.is_empty() {
        return ok!(Some(EditorEvent::Eof));
    }
    editor.delete_right(term)?;
    ok!(None)
}

/// Meta (Alt) combinations.
fn handle_meta_key(
    editor: &mut LineEditor,
    key: &Key,
    term: &mut dyn Write,
) -> Result<Option<EditorEvent>, ReadlineError> {
    match key.name {
        Some(KeyName::Char('b')) => editor.word_left(term)?,
        Some(KeyName::Char('f')) => editor.word_right(term)?,
        Some(KeyName::Char('d') | KeyName::Delete) => editor.delete_word_right(term)?,
        Some(KeyName::Backspace) => editor.delete_word_left(term)?,
        Some(KeyName::Char('y')) => editor.yank_pop(term)?,
        _ => {}
    }
    ok!(None)
}

/// Keys with no Ctrl or Meta modifier.
fn handle_regular_key(
    editor: &mut LineEditor,
    key: &Key,
    previous_key: Option<&Key>,
    term: &mut dyn Write,
) -> Result<Option<EditorEvent>, ReadlineError> {
    // A `\r` only matters if a `\n` comes right after it.
    if editor.saw_return_at.is_some() && !key.is(KeyName::Enter) {
        editor.saw_return_at = None;
    }

    match key.name {
        Some(KeyName::Return) => {
            editor.saw_return_at = Some(Instant::now());
            return ok!(Some(EditorEvent::Line(editor.commit_line(term)?)));
        }
        Some(KeyName::Enter) => return handle_enter(editor, term),
        Some(KeyName::Backspace) => editor.delete_left(term)?,
        Some(KeyName::Delete) => editor.delete_right(term)?,
        Some(KeyName::Left) => editor.move_left(term)?,
        Some(KeyName::Right) => editor.move_right(term)?,
        Some(KeyName::Home) => editor.move_home(term)?,
        Some(KeyName::End) => editor.move_end(term)?,
        Some(KeyName::Up) => editor.history_prev(term)?,
        Some(KeyName::Down) => editor.history_next(term)?,
        Some(KeyName::Tab) if editor.has_completer && editor.completion_enabled => {
            return ok!(Some(EditorEvent::CompletionRequested {
                line_before_cursor: editor.line_before_cursor().to_owned(),
                last_keypress_was_tab: previous_key.is_some_and(|it| it.is(KeyName::Tab)),
            }));
        }
        _ => return handle_text(editor, key, term),
    }
    ok!(None)
}

/// `\n`. Part of a `\r\n` pair (and ignored) if it arrives within `crlf_delay` of the
/// `\r`.
fn handle_enter(
    editor: &mut LineEditor,
    term: &mut dyn Write,
) -> Result<Option<EditorEvent>, ReadlineError> {
    let is_new_line_ending = editor
        .saw_return_at
        .is_none_or(|saw_return_at| saw_return_at.elapsed() > editor.crlf_delay);
    editor.saw_return_at = None;
    if is_new_line_ending {
        return ok!(Some(EditorEvent::Line(editor.commit_line(term)?)));
    }
    ok!(None)
}

/// Insert whatever text the key carries. Keys from [`crate::KeyDecoder`] carry a single
/// char; if a key carries several line breaks, every line is committed and the last one
/// is reported.
fn handle_text(
    editor: &mut LineEditor,
    key: &Key,
    term: &mut dyn Write,
) -> Result<Option<EditorEvent>, ReadlineError> {
    let Some(text) = key.text() else {
        return ok!(None);
    };
    let mut lines = editor.insert_lines(text, term)?;
    ok!(lines.pop().map(EditorEvent::Line))
}
