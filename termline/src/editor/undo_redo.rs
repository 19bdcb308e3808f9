// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use crate::MAX_UNDO_REDO_STACK_SIZE;

/// Line text and cursor as they were before an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSnapshot {
    pub text: String,
    pub cursor: usize,
}

impl EditSnapshot {
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        Self {
            text: text.into(),
            cursor,
        }
    }
}

/// Undo and redo stacks of [`EditSnapshot`]s. Each holds at most
/// [`MAX_UNDO_REDO_STACK_SIZE`] entries and drops the oldest beyond that.
#[derive(Debug, Clone, Default)]
pub struct UndoRedoStacks {
    undo: VecDeque<EditSnapshot>,
    redo: VecDeque<EditSnapshot>,
}

impl UndoRedoStacks {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Called before a new edit. A new edit makes the redo history meaningless, so it is
    /// cleared.
    pub fn record_edit(&mut self, before: EditSnapshot) {
        push_capped(&mut self.undo, before);
        self.redo.clear();
    }

    /// Pop the most recent undo snapshot, saving `current` so it can be redone.
    pub fn undo(&mut self, current: EditSnapshot) -> Option<EditSnapshot> {
        let previous = self.undo.pop_back()?;
        push_capped(&mut self.redo, current);
        Some(previous)
    }

    /// Pop the most recent redo snapshot, saving `current` so it can be undone again.
    pub fn redo(&mut self, current: EditSnapshot) -> Option<EditSnapshot> {
        let next = self.redo.pop_back()?;
        push_capped(&mut self.undo, current);
        Some(next)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    #[must_use]
    pub fn undo_len(&self) -> usize { self.undo.len() }

    #[must_use]
    pub fn redo_len(&self) -> usize { self.redo.len() }
}

fn push_capped(stack: &mut VecDeque<EditSnapshot>, snapshot: EditSnapshot) {
    stack.push_back(snapshot);
    if stack.len() > MAX_UNDO_REDO_STACK_SIZE {
        stack.pop_front();
    }
}
