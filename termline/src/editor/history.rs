// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::{VecDeque, vec_deque},
          fs,
          path::Path};

use crate::{HISTORY_SIZE_DEFAULT, ReadlineError, ok};

/// Past lines, newest first, capped at `max_size` entries.
///
/// The store only holds the entries. Browsing state (which entry is showing, the prefix
/// being searched for) belongs to the [`crate::LineEditor`], so that one store can be
/// shared by several editing sessions via [`crate::SafeHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStore {
    entries: VecDeque<String>,
    max_size: usize,
    remove_duplicates: bool,
}

impl Default for HistoryStore {
    fn default() -> Self { Self::new(HISTORY_SIZE_DEFAULT, false) }
}

impl HistoryStore {
    /// A `max_size` of 0 disables history: [`Self::add`] never stores anything.
    #[must_use]
    pub fn new(max_size: usize, remove_duplicates: bool) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
            remove_duplicates,
        }
    }

    /// Seed the store with `entries`, newest first. Entries past `max_size` are dropped.
    #[must_use]
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = String>) -> Self {
        self.entries = entries.into_iter().take(self.max_size).collect();
        self
    }
}

impl HistoryStore {
    /// Record a committed line. Returns `true` if the store changed.
    ///
    /// Nothing is stored when history is disabled, when the line is blank, or when it is
    /// the same as the newest entry. With `remove_duplicates` set, an older copy of the
    /// line is removed before it is added to the front.
    pub fn add(&mut self, line: &str) -> bool {
        if self.max_size == 0 || line.trim().is_empty() {
            return false;
        }
        if self.entries.front().is_some_and(|newest| newest == line) {
            return false;
        }

        if self.remove_duplicates
            && let Some(index) = self.entries.iter().position(|it| it == line)
        {
            self.entries.remove(index);
        }

        self.entries.push_front(line.to_owned());
        self.entries.truncate(self.max_size);

        tracing::debug!(message = "history updated", len = self.entries.len());
        true
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Newest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, String> { self.entries.iter() }

    #[must_use]
    pub fn max_size(&self) -> usize { self.max_size }

    /// Shrinking the limit drops the oldest entries.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.entries.truncate(max_size);
    }

    #[must_use]
    pub fn remove_duplicates(&self) -> bool { self.remove_duplicates }

    pub fn clear(&mut self) { self.entries.clear(); }
}

impl<'a> IntoIterator for &'a HistoryStore {
    type Item = &'a String;
    type IntoIter = vec_deque::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

// ╭───────────────────────────────────────────────────────────────────────────────────╮
// │ Persistence                                                                       │
// ╰───────────────────────────────────────────────────────────────────────────────────╯

impl HistoryStore {
    /// Read a history file written by [`Self::save_to_file`]: one entry per line, newest
    /// first. Blank lines are skipped. A missing file gives an empty store.
    ///
    /// # Errors
    ///
    /// If the file exists but can't be read.
    pub fn load_from_file(
        path: impl AsRef<Path>,
        max_size: usize,
        remove_duplicates: bool,
    ) -> Result<Self, ReadlineError> {
        let path = path.as_ref();
        let store = Self::new(max_size, remove_duplicates);

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return ok!(store),
            Err(source) => {
                return Err(ReadlineError::History {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let entries = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned);
        ok!(store.with_entries(entries))
    }

    /// # Errors
    ///
    /// If the file can't be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ReadlineError> {
        let path = path.as_ref();
        let mut content = String::new();
        for entry in &self.entries {
            content.push_str(entry);
            content.push('\n');
        }
        fs::write(path, content).map_err(|source| ReadlineError::History {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(history: &HistoryStore) -> Vec<&str> {
        history.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_add() {
        let mut history = HistoryStore::new(2, false);
        assert!(history.add("test1"));
        pretty_assertions::assert_eq!(history.get(0), Some("test1"));

        // Same as the newest entry.
        assert!(!history.add("test1"));
        pretty_assertions::assert_eq!(history.len(), 1);

        assert!(history.add("test2"));
        pretty_assertions::assert_eq!(entries(&history), vec!["test2", "test1"]);

        // Oldest is evicted.
        assert!(history.add("test3"));
        pretty_assertions::assert_eq!(entries(&history), vec!["test3", "test2"]);
    }

    #[test]
    fn test_add_skips_blank_lines() {
        let mut history = HistoryStore::default();
        assert!(!history.add(""));
        assert!(!history.add("   \t"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_add_with_history_disabled() {
        let mut history = HistoryStore::new(0, false);
        assert!(!history.add("ls"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_remove_duplicates() {
        let mut history = HistoryStore::new(2, true);
        history.add("a");
        history.add("b");
        history.add("a");
        pretty_assertions::assert_eq!(entries(&history), vec!["a", "b"]);
    }

    #[test]
    fn test_keeps_duplicates_by_default() {
        let mut history = HistoryStore::new(5, false);
        history.add("a");
        history.add("b");
        history.add("a");
        pretty_assertions::assert_eq!(entries(&history), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_set_max_size_truncates() {
        let mut history =
            HistoryStore::new(5, false).with_entries(["c", "b", "a"].map(String::from));
        history.set_max_size(2);
        pretty_assertions::assert_eq!(entries(&history), vec!["c", "b"]);
    }

    #[test]
    fn test_with_entries_respects_max_size() {
        let history =
            HistoryStore::new(2, false).with_entries(["c", "b", "a"].map(String::from));
        pretty_assertions::assert_eq!(entries(&history), vec!["c", "b"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");

        let mut history = HistoryStore::new(10, false);
        history.add("first");
        history.add("second");
        history.save_to_file(&path).unwrap();

        pretty_assertions::assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "second\nfirst\n"
        );

        let loaded = HistoryStore::load_from_file(&path, 1, false).unwrap();
        pretty_assertions::assert_eq!(entries(&loaded), vec!["second"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded =
            HistoryStore::load_from_file(dir.path().join("nope"), 10, false).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = HistoryStore::load_from_file(dir.path(), 10, false);
        assert!(matches!(result, Err(ReadlineError::History { .. })));
    }
}
