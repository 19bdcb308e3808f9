// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use crate::KILL_RING_MAX;

/// Text removed by the line-kill commands, newest first, for later yanking.
///
/// The yank cursor picks which entry [`Self::current`] returns. Yank-pop advances it
/// through the ring, wrapping back to the newest entry after the oldest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KillRing {
    entries: VecDeque<String>,
    yank_cursor: usize,
}

impl KillRing {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Remember `text`. Empty text, or text equal to the newest entry, is ignored. The
    /// ring keeps at most [`KILL_RING_MAX`] entries.
    pub fn push(&mut self, text: &str) {
        if text.is_empty() || self.entries.front().is_some_and(|newest| newest == text) {
            return;
        }
        self.entries.push_front(text.to_owned());
        self.entries.truncate(KILL_RING_MAX);
        self.yank_cursor = 0;
    }

    /// Entry under the yank cursor.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.yank_cursor).map(String::as_str)
    }

    /// Move the yank cursor to the next older entry, wrapping around.
    pub fn advance(&mut self) {
        if !self.entries.is_empty() {
            self.yank_cursor = (self.yank_cursor + 1) % self.entries.len();
        }
    }

    pub fn reset_cursor(&mut self) { self.yank_cursor = 0; }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_newest_first() {
        let mut kill_ring = KillRing::new();
        kill_ring.push("one");
        kill_ring.push("two");
        pretty_assertions::assert_eq!(kill_ring.current(), Some("two"));
        pretty_assertions::assert_eq!(kill_ring.get(1), Some("one"));
    }

    #[test]
    fn test_push_ignores_empty_and_repeat() {
        let mut kill_ring = KillRing::new();
        kill_ring.push("");
        kill_ring.push("x");
        kill_ring.push("x");
        pretty_assertions::assert_eq!(kill_ring.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut kill_ring = KillRing::new();
        for index in 0..=KILL_RING_MAX {
            kill_ring.push(&format!("kill {index}"));
        }
        pretty_assertions::assert_eq!(kill_ring.len(), KILL_RING_MAX);
        pretty_assertions::assert_eq!(kill_ring.current(), Some("kill 32"));
        pretty_assertions::assert_eq!(kill_ring.get(KILL_RING_MAX - 1), Some("kill 1"));
    }

    #[test]
    fn test_advance_wraps() {
        let mut kill_ring = KillRing::new();
        kill_ring.push("a");
        kill_ring.push("b");
        kill_ring.push("c");

        kill_ring.advance();
        pretty_assertions::assert_eq!(kill_ring.current(), Some("b"));
        kill_ring.advance();
        pretty_assertions::assert_eq!(kill_ring.current(), Some("a"));
        kill_ring.advance();
        pretty_assertions::assert_eq!(kill_ring.current(), Some("c"));

        kill_ring.advance();
        kill_ring.reset_cursor();
        pretty_assertions::assert_eq!(kill_ring.current(), Some("c"));
    }

    #[test]
    fn test_push_resets_cursor() {
        let mut kill_ring = KillRing::new();
        kill_ring.push("a");
        kill_ring.push("b");
        kill_ring.advance();
        kill_ring.push("c");
        pretty_assertions::assert_eq!(kill_ring.current(), Some("c"));
    }

    #[test]
    fn test_empty_ring() {
        let mut kill_ring = KillRing::new();
        kill_ring.advance();
        pretty_assertions::assert_eq!(kill_ring.current(), None);
    }
}
