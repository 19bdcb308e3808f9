// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{sync::Arc,
          time::{Duration, Instant}};

use super::text_offsets::floor_char_boundary;
use crate::{ConfigError, EditSnapshot, EditorConfig, HistoryStore, Key, KillRing,
            SafeHistory, StdMutex, UndoRedoStacks, ok};

/// What applying a key (or text written by the host) asks of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// A line was committed. It has been added to history and the editor is already
    /// empty and ready for the next line.
    Line(String),
    /// Ctrl+D on an empty line.
    Eof,
    /// Ctrl+C.
    Interrupted,
    /// Ctrl+Z.
    Suspended,
    /// Tab was pressed with a completer installed. Run the completer on
    /// `line_before_cursor` and hand its result to [`LineEditor::apply_completions`].
    CompletionRequested {
        line_before_cursor: String,
        last_keypress_was_tab: bool,
    },
}

/// A single line being edited, plus everything needed to edit it: history browsing
/// state, the kill ring, undo / redo, and the number of rows the last repaint used.
///
/// Every operation that changes what is on screen takes the output sink as
/// `term: &mut dyn Write`.
#[derive(Debug)]
pub struct LineEditor {
    pub(super) prompt: String,
    pub(super) line: String,
    /// Byte offset into `line`, always on a char boundary.
    pub(super) cursor: usize,
    /// Row of the cursor (relative to the prompt's row) after the last repaint.
    pub(super) prev_rows: usize,
    pub(super) columns: Option<usize>,
    pub(super) tab_size: usize,
    pub(super) crlf_delay: Duration,

    pub(super) history: SafeHistory,
    /// Entry being shown. [None] when not browsing. `Some(history.len())` means the
    /// browse went past the oldest match and the typed prefix is showing again.
    pub(super) history_index: Option<usize>,
    /// Text before the cursor when up / down browsing started.
    pub(super) substring_search: Option<String>,

    pub(super) undo_redo: UndoRedoStacks,
    pub(super) kill_ring: KillRing,
    pub(super) yanking: bool,

    pub(super) previous_key: Option<Key>,
    pub(super) saw_return_at: Option<Instant>,

    pub(super) has_completer: bool,
    pub(super) completion_enabled: bool,
}

impl LineEditor {
    /// Editor with its own history, seeded from `config.history`.
    ///
    /// # Errors
    ///
    /// If `config` fails [`EditorConfig::validate`].
    pub fn new(config: &EditorConfig) -> Result<Self, ConfigError> {
        let history =
            HistoryStore::new(config.history_size, config.remove_history_duplicates)
                .with_entries(config.history.iter().cloned());
        Self::with_history(config, Arc::new(StdMutex::new(history)))
    }

    /// Editor that shares `history` with other editors. `config.history` is ignored.
    ///
    /// # Errors
    ///
    /// If `config` fails [`EditorConfig::validate`].
    pub fn with_history(
        config: &EditorConfig,
        history: SafeHistory,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        ok!(Self {
            prompt: config.prompt.clone(),
            line: String::new(),
            cursor: 0,
            prev_rows: 0,
            columns: config.columns,
            tab_size: config.tab_size,
            crlf_delay: config.effective_crlf_delay(),
            history,
            history_index: None,
            substring_search: None,
            undo_redo: UndoRedoStacks::new(),
            kill_ring: KillRing::new(),
            yanking: false,
            previous_key: None,
            saw_return_at: None,
            has_completer: false,
            completion_enabled: true,
        })
    }
}

impl LineEditor {
    #[must_use]
    pub fn line(&self) -> &str { &self.line }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn line_before_cursor(&self) -> &str {
        self.line.get(..self.cursor).unwrap_or(&self.line)
    }

    #[must_use]
    pub fn line_after_cursor(&self) -> &str { self.line.get(self.cursor..).unwrap_or_default() }

    #[must_use]
    pub fn prompt_text(&self) -> &str { &self.prompt }

    /// Takes effect on the next repaint.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) { self.prompt = prompt.into(); }

    #[must_use]
    pub fn prev_rows(&self) -> usize { self.prev_rows }

    #[must_use]
    pub fn columns(&self) -> Option<usize> { self.columns }

    #[must_use]
    pub fn history(&self) -> SafeHistory { self.history.clone() }

    #[must_use]
    pub fn history_index(&self) -> Option<usize> { self.history_index }

    #[must_use]
    pub fn substring_search(&self) -> Option<&str> { self.substring_search.as_deref() }

    #[must_use]
    pub fn kill_ring(&self) -> &KillRing { &self.kill_ring }

    #[must_use]
    pub fn undo_redo(&self) -> &UndoRedoStacks { &self.undo_redo }

    #[must_use]
    pub fn is_yanking(&self) -> bool { self.yanking }

    /// Tab only asks for completion when a completer is installed.
    pub fn set_has_completer(&mut self, has_completer: bool) {
        self.has_completer = has_completer;
    }

    /// Turned off by the host for tabs that arrive in the middle of pasted text, so they
    /// are inserted literally.
    pub fn set_completion_enabled(&mut self, completion_enabled: bool) {
        self.completion_enabled = completion_enabled;
    }
}

impl LineEditor {
    /// Snapshot the line before an edit, so it can be undone.
    pub(super) fn before_edit(&mut self) {
        self.undo_redo
            .record_edit(EditSnapshot::new(self.line.clone(), self.cursor));
    }

    pub(super) fn restore(&mut self, snapshot: EditSnapshot) {
        self.cursor = floor_char_boundary(&snapshot.text, snapshot.cursor);
        self.line = snapshot.text;
    }
}
