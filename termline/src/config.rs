// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use crate::{CRLF_DELAY_MIN_MS, ConfigError, ESCAPE_CODE_TIMEOUT_DEFAULT_MS,
            HISTORY_SIZE_DEFAULT, PROMPT_DEFAULT, TAB_SIZE_DEFAULT, ok};

/// Minimum time between `\r` and `\n` for them to count as two separate line endings.
pub const CRLF_DELAY_MIN: Duration = Duration::from_millis(CRLF_DELAY_MIN_MS);

/// Options for a [`crate::Readline`] session and its [`crate::LineEditor`].
///
/// Build with [`Default`] and the `with_*` setters. The `try_with_*` setters accept raw
/// numbers (as read from a config file or command line) and reject the ones that make
/// no sense. [`Self::validate`] is run by every constructor that takes a config.
///
/// ```
/// use std::time::Duration;
///
/// use termline::EditorConfig;
///
/// let config = EditorConfig::default()
///     .with_prompt("$ ")
///     .with_history_size(100)
///     .with_remove_history_duplicates(true)
///     .try_with_escape_code_timeout_ms(50.0)
///     .unwrap();
/// assert_eq!(config.escape_code_timeout, Duration::from_millis(50));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub prompt: String,
    /// Maximum number of history entries. 0 disables history.
    pub history_size: usize,
    pub remove_history_duplicates: bool,
    /// Initial history, newest first.
    pub history: Vec<String>,
    /// A `\n` arriving within this long after a `\r` belongs to the same line ending.
    pub crlf_delay: Duration,
    /// How long to wait after a lone `ESC` before deciding it is the Escape key.
    pub escape_code_timeout: Duration,
    pub tab_size: usize,
    /// `false` when input is not an interactive terminal: lines are split from the raw
    /// input and no editing or repainting happens.
    pub terminal: bool,
    /// Terminal width. [None] means output is never wrapped.
    pub columns: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            prompt: PROMPT_DEFAULT.to_owned(),
            history_size: HISTORY_SIZE_DEFAULT,
            remove_history_duplicates: false,
            history: Vec::new(),
            crlf_delay: CRLF_DELAY_MIN,
            escape_code_timeout: Duration::from_millis(ESCAPE_CODE_TIMEOUT_DEFAULT_MS),
            tab_size: TAB_SIZE_DEFAULT,
            terminal: true,
            columns: None,
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self
    }

    #[must_use]
    pub fn with_remove_history_duplicates(mut self, remove_history_duplicates: bool) -> Self {
        self.remove_history_duplicates = remove_history_duplicates;
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: Vec<String>) -> Self {
        self.history = history;
        self
    }

    /// Values below [`CRLF_DELAY_MIN`] are raised to it.
    #[must_use]
    pub fn with_crlf_delay(mut self, crlf_delay: Duration) -> Self {
        self.crlf_delay = crlf_delay.max(CRLF_DELAY_MIN);
        self
    }

    #[must_use]
    pub fn with_escape_code_timeout(mut self, escape_code_timeout: Duration) -> Self {
        self.escape_code_timeout = escape_code_timeout;
        self
    }

    #[must_use]
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    #[must_use]
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: Option<usize>) -> Self {
        self.columns = columns;
        self
    }
}

impl EditorConfig {
    /// # Errors
    ///
    /// [`ConfigError::InvalidEscapeCodeTimeout`] if `ms` is negative, NaN or infinite.
    pub fn try_with_escape_code_timeout_ms(self, ms: f64) -> Result<Self, ConfigError> {
        match duration_from_ms(ms) {
            Some(timeout) => ok!(self.with_escape_code_timeout(timeout)),
            None => Err(ConfigError::InvalidEscapeCodeTimeout { value: ms }),
        }
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidCrlfDelay`] if `ms` is negative, NaN or infinite.
    pub fn try_with_crlf_delay_ms(self, ms: f64) -> Result<Self, ConfigError> {
        match duration_from_ms(ms) {
            Some(delay) => ok!(self.with_crlf_delay(delay)),
            None => Err(ConfigError::InvalidCrlfDelay { value: ms }),
        }
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidHistorySize`] unless `value` is a non-negative integer.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_with_history_size(self, value: f64) -> Result<Self, ConfigError> {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
            return Err(ConfigError::InvalidHistorySize { value });
        }
        ok!(self.with_history_size(value as usize))
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidTabSize`] if `tab_size` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_size == 0 {
            return Err(ConfigError::InvalidTabSize {
                tab_size: self.tab_size,
            });
        }
        ok!()
    }

    /// [`Self::crlf_delay`] with the floor applied, in case the field was set directly.
    #[must_use]
    pub fn effective_crlf_delay(&self) -> Duration { self.crlf_delay.max(CRLF_DELAY_MIN) }
}

fn duration_from_ms(ms: f64) -> Option<Duration> {
    if ms.is_finite() && ms >= 0.0 {
        Duration::try_from_secs_f64(ms / 1_000.0).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        pretty_assertions::assert_eq!(config.prompt, "> ");
        pretty_assertions::assert_eq!(config.history_size, 30);
        pretty_assertions::assert_eq!(config.crlf_delay, Duration::from_millis(100));
        pretty_assertions::assert_eq!(config.escape_code_timeout, Duration::from_millis(500));
        pretty_assertions::assert_eq!(config.tab_size, 8);
        assert!(config.terminal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_crlf_delay_floor() {
        let config = EditorConfig::default().with_crlf_delay(Duration::from_millis(10));
        pretty_assertions::assert_eq!(config.crlf_delay, CRLF_DELAY_MIN);

        let config = EditorConfig::default().try_with_crlf_delay_ms(250.0).unwrap();
        pretty_assertions::assert_eq!(config.crlf_delay, Duration::from_millis(250));

        let config = EditorConfig {
            crlf_delay: Duration::ZERO,
            ..Default::default()
        };
        pretty_assertions::assert_eq!(config.effective_crlf_delay(), CRLF_DELAY_MIN);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        pretty_assertions::assert_eq!(
            EditorConfig::default().try_with_escape_code_timeout_ms(f64::INFINITY),
            Err(ConfigError::InvalidEscapeCodeTimeout {
                value: f64::INFINITY
            })
        );
        assert!(
            EditorConfig::default()
                .try_with_crlf_delay_ms(-5.0)
                .is_err()
        );
        assert!(
            EditorConfig::default()
                .try_with_history_size(f64::NAN)
                .is_err()
        );
        assert!(EditorConfig::default().try_with_history_size(2.5).is_err());
        pretty_assertions::assert_eq!(
            EditorConfig::default()
                .try_with_history_size(0.0)
                .unwrap()
                .history_size,
            0
        );
    }

    #[test]
    fn test_validate_tab_size() {
        pretty_assertions::assert_eq!(
            EditorConfig::default().with_tab_size(0).validate(),
            Err(ConfigError::InvalidTabSize { tab_size: 0 })
        );
    }
}
