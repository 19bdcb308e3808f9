// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crate::{CLEAR_SCREEN_DOWN, ClearLineDirection, CsiSequence, clear_line_sequence,
            cursor_to_sequence, move_cursor_sequences, ok};

/// Queues cursor and clear operations and writes them to the sink in one go.
///
/// - [`Self::commit`] writes everything queued so far and empties the queue.
/// - [`Self::rollback`] drops the queue without writing.
/// - With `auto_commit` set, each operation is written as soon as it is queued.
///
/// ```
/// use termline::PendingTerminalOps;
///
/// let mut ops = PendingTerminalOps::new(Vec::<u8>::new(), false);
/// ops.cursor_to(0, None).unwrap().clear_screen_down().unwrap();
/// ops.commit().unwrap();
/// assert_eq!(ops.into_inner(), b"\x1b[1G\x1b[0J");
/// ```
#[derive(Debug)]
pub struct PendingTerminalOps<W: Write> {
    term: W,
    todo: Vec<CsiSequence>,
    auto_commit: bool,
}

impl<W: Write> PendingTerminalOps<W> {
    pub fn new(term: W, auto_commit: bool) -> Self {
        Self {
            term,
            todo: Vec::new(),
            auto_commit,
        }
    }

    /// # Errors
    ///
    /// In `auto_commit` mode, if writing to the sink fails.
    pub fn cursor_to(&mut self, x: usize, y: Option<usize>) -> io::Result<&mut Self> {
        self.enqueue([cursor_to_sequence(x, y)])
    }

    /// # Errors
    ///
    /// In `auto_commit` mode, if writing to the sink fails.
    pub fn move_cursor(&mut self, dx: isize, dy: isize) -> io::Result<&mut Self> {
        self.enqueue(move_cursor_sequences(dx, dy))
    }

    /// # Errors
    ///
    /// In `auto_commit` mode, if writing to the sink fails.
    pub fn clear_line(&mut self, direction: ClearLineDirection) -> io::Result<&mut Self> {
        self.enqueue([clear_line_sequence(direction)])
    }

    /// # Errors
    ///
    /// In `auto_commit` mode, if writing to the sink fails.
    pub fn clear_screen_down(&mut self) -> io::Result<&mut Self> {
        self.enqueue([CLEAR_SCREEN_DOWN])
    }

    /// Write all queued operations as a single buffer.
    ///
    /// # Errors
    ///
    /// If writing to the sink fails. The queue is emptied either way.
    pub fn commit(&mut self) -> io::Result<()> {
        let buffer: String = self.todo.drain(..).map(|it| it.to_string()).collect();
        if buffer.is_empty() {
            return ok!();
        }
        self.term.write_all(buffer.as_bytes())?;
        self.term.flush()
    }

    /// Forget all queued operations.
    pub fn rollback(&mut self) -> &mut Self {
        self.todo.clear();
        self
    }

    #[must_use]
    pub fn pending(&self) -> &[CsiSequence] { &self.todo }

    pub fn into_inner(self) -> W { self.term }

    fn enqueue(
        &mut self,
        sequences: impl IntoIterator<Item = CsiSequence>,
    ) -> io::Result<&mut Self> {
        self.todo.extend(sequences);
        if self.auto_commit {
            self.commit()?;
        }
        ok!(self)
    }
}
