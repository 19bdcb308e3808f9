// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, future::Future, pin::Pin};

use crate::CompleterError;

/// What a [`Completer`] found for the text before the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions {
    /// Full candidates for `completed_on`. An empty string separates groups when the
    /// candidates are listed.
    pub candidates: Vec<String>,
    /// The tail of the line (ending at the cursor) that the candidates would replace.
    pub completed_on: String,
}

impl Completions {
    pub fn new(
        candidates: impl IntoIterator<Item = impl Into<String>>,
        completed_on: impl Into<String>,
    ) -> Self {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            completed_on: completed_on.into(),
        }
    }
}

pub type CompleterFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Completions, CompleterError>> + Send + 'a>>;

/// Produces completion candidates for the text before the cursor.
///
/// The session stops reading input while the returned future runs, so keys typed in the
/// meantime are applied after the completion.
pub trait Completer: Send + Sync {
    fn complete<'a>(&'a self, line_before_cursor: &'a str) -> CompleterFuture<'a>;
}

/// [`Completer`] backed by a synchronous function.
pub struct FnCompleter<F>(F);

impl<F> Debug for FnCompleter<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnCompleter")
    }
}

impl<F> Completer for FnCompleter<F>
where
    F: Fn(&str) -> Result<Completions, CompleterError> + Send + Sync,
{
    fn complete<'a>(&'a self, line_before_cursor: &'a str) -> CompleterFuture<'a> {
        Box::pin(std::future::ready((self.0)(line_before_cursor)))
    }
}

/// Wrap a synchronous completion function.
///
/// ```
/// use termline::{Completions, completer_fn};
///
/// let completer = completer_fn(|line: &str| {
///     Ok(Completions::new(["help", "history"].into_iter().filter(|it| it.starts_with(line)), line))
/// });
/// ```
pub fn completer_fn<F>(function: F) -> FnCompleter<F>
where
    F: Fn(&str) -> Result<Completions, CompleterError> + Send + Sync,
{
    FnCompleter(function)
}

/// Completes the last whitespace separated word of the line against a fixed list. When
/// nothing matches, every word is offered.
#[derive(Debug, Clone, Default)]
pub struct WordListCompleter {
    words: Vec<String>,
}

impl WordListCompleter {
    pub fn new(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn complete_now(&self, line_before_cursor: &str) -> Completions {
        let last_word = line_before_cursor
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default();
        let hits: Vec<&String> = self
            .words
            .iter()
            .filter(|word| word.starts_with(last_word))
            .collect();
        if hits.is_empty() {
            Completions::new(&self.words, last_word)
        } else {
            Completions::new(hits, last_word)
        }
    }
}

impl Completer for WordListCompleter {
    fn complete<'a>(&'a self, line_before_cursor: &'a str) -> CompleterFuture<'a> {
        Box::pin(std::future::ready(Ok(self.complete_now(line_before_cursor))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completer_fn() {
        let completer = completer_fn(|line: &str| {
            if line == "fail" {
                Err(CompleterError::from("no luck"))
            } else {
                Ok(Completions::new([format!("{line}!")], line))
            }
        });

        pretty_assertions::assert_eq!(
            completer.complete("hi").await.unwrap(),
            Completions::new(["hi!"], "hi")
        );
        pretty_assertions::assert_eq!(
            completer.complete("fail").await.unwrap_err().message,
            "no luck"
        );
    }

    #[tokio::test]
    async fn test_word_list_completer() {
        let completer = WordListCompleter::new(["help", "history", "quit"]);

        pretty_assertions::assert_eq!(
            completer.complete("show h").await.unwrap(),
            Completions::new(["help", "history"], "h")
        );
        pretty_assertions::assert_eq!(
            completer.complete("x").await.unwrap(),
            Completions::new(["help", "history", "quit"], "x")
        );
        pretty_assertions::assert_eq!(
            completer.complete("").await.unwrap().candidates.len(),
            3
        );
    }
}
