// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque,
          fmt::{Debug, Formatter},
          io::Write,
          time::Duration};

use futures_util::StreamExt;
use tokio::{select,
            time::{Instant, sleep_until}};
use tokio_util::sync::CancellationToken;

use crate::{DisplayPos, ESC_CHAR, EditorConfig, EditorEvent, InputChunkResult, Key,
            KeyDecoder, LineEditor, LineSplitter, PinnedInputStream, ReadlineError,
            ReadlineEvent, SafeCompleter, SafeHistory, SafeRawTerminal, lock, ok};

/// # Mental model and overview
///
/// An async replacement for [`std::io::BufRead::read_line`] on an interactive terminal.
/// Each call to [`Self::readline()`] reads input chunks until the user commits a line
/// (or presses `Ctrl+C`, `Ctrl+D`, `Ctrl+Z`), editing and repainting the line as keys
/// arrive.
///
/// ```text
/// input stream ──chunk──▶ pending chars ──char──▶ KeyDecoder ──Key──▶ LineEditor
///                                                     ▲                   │
///                                  escape timeout ────┘        output sink ◀┘
/// ```
///
/// # Inputs and dependency injection
///
/// 1. The input is a [`PinnedInputStream`] of text chunks. [`crate::stdin_chunk_stream`]
///    reads them from stdin; tests pass a scripted stream.
/// 2. The output is a [`SafeRawTerminal`]. It is locked for each key and never held
///    across an `.await`.
///
/// # Timers and waiting
///
/// A chunk that ends with a lone `ESC` might be the Escape key or the start of a
/// sequence split across reads. The decoder waits for more input, up to
/// [`EditorConfig::escape_code_timeout`], then resolves it. New input cancels the timer.
///
/// While a [`crate::Completer`] runs, no input is read, so keys typed meanwhile are
/// applied after the completion.
///
/// # Closing
///
/// [`ReadlineEvent::Eof`] closes the session, whatever produced it: `Ctrl+D` on an empty
/// line, the end of the input stream, or the [`CancellationToken`] being cancelled. After
/// that, [`Self::readline()`], [`Self::prompt()`] and [`Self::write()`] return
/// [`ReadlineError::UseAfterClose`].
pub struct Readline {
    editor: LineEditor,
    decoder: KeyDecoder,
    splitter: LineSplitter,
    /// `false` when lines are split from raw input with no editing.
    terminal: bool,

    output: SafeRawTerminal,
    input: PinnedInputStream<InputChunkResult>,
    completer: Option<SafeCompleter>,

    /// Rest of the current input chunk, still to be decoded.
    pending_input: VecDeque<char>,
    /// Events produced but not yet returned (several lines can arrive in one chunk).
    pending_events: VecDeque<ReadlineEvent>,
    input_ended: bool,

    escape_code_timeout: Duration,
    escape_deadline: Option<Instant>,

    cancellation_token: CancellationToken,
    closed: bool,
}

impl Debug for Readline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Readline")
            .field("editor", &self.editor)
            .field("decoder", &self.decoder)
            .field("terminal", &self.terminal)
            .field("has_completer", &self.completer.is_some())
            .field("pending_input", &self.pending_input)
            .field("pending_events", &self.pending_events)
            .field("input_ended", &self.input_ended)
            .field("escape_deadline", &self.escape_deadline)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Readline {
    /// Create a session with its own history (seeded from `config.history`). Nothing is
    /// written until [`Self::prompt()`] is called.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::Config`] if `config` fails [`EditorConfig::validate`].
    pub fn try_new(
        config: &EditorConfig,
        output: SafeRawTerminal,
        input: PinnedInputStream<InputChunkResult>,
    ) -> Result<Self, ReadlineError> {
        let editor = LineEditor::new(config)?;
        ok!(Self::from_editor(config, editor, output, input))
    }

    /// Create a session that shares `history` with other sessions.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::Config`] if `config` fails [`EditorConfig::validate`].
    pub fn try_new_with_history(
        config: &EditorConfig,
        history: SafeHistory,
        output: SafeRawTerminal,
        input: PinnedInputStream<InputChunkResult>,
    ) -> Result<Self, ReadlineError> {
        let editor = LineEditor::with_history(config, history)?;
        ok!(Self::from_editor(config, editor, output, input))
    }

    fn from_editor(
        config: &EditorConfig,
        editor: LineEditor,
        output: SafeRawTerminal,
        input: PinnedInputStream<InputChunkResult>,
    ) -> Self {
        tracing::debug!(
            message = "readline session opened",
            terminal = config.terminal,
            columns = ?config.columns,
        );
        Self {
            editor,
            decoder: KeyDecoder::new(),
            splitter: LineSplitter::new(config.effective_crlf_delay()),
            terminal: config.terminal,
            output,
            input,
            completer: None,
            pending_input: VecDeque::new(),
            pending_events: VecDeque::new(),
            input_ended: false,
            escape_code_timeout: config.escape_code_timeout,
            escape_deadline: None,
            cancellation_token: CancellationToken::new(),
            closed: false,
        }
    }
}

impl Readline {
    /// Wait for the next [`ReadlineEvent`].
    ///
    /// This is cancel safe: if the future is dropped, input that was already read stays
    /// queued for the next call.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::UseAfterClose`] once the session is closed.
    /// - [`ReadlineError::IO`] if the input stream or the output sink fails.
    pub async fn readline(&mut self) -> Result<ReadlineEvent, ReadlineError> {
        if self.closed {
            return Err(ReadlineError::UseAfterClose);
        }

        loop {
            if let Some(event) = self.pending_events.pop_front() {
                return ok!(self.on_event(event));
            }
            if let Some(event) = self.drain_pending_input().await? {
                return ok!(self.on_event(event));
            }
            if self.cancellation_token.is_cancelled() {
                tracing::debug!(message = "readline cancelled");
                return ok!(self.on_event(ReadlineEvent::Eof));
            }
            if self.input_ended {
                self.end_of_input()?;
                continue;
            }

            let escape_deadline = self.escape_deadline;
            select! {
                // Handled at the top of the loop.
                () = self.cancellation_token.cancelled() => {}

                () = sleep_until_deadline(escape_deadline) => {
                    self.escape_deadline = None;
                    if let Some(key) = self.decoder.flush() {
                        tracing::trace!(message = "escape timeout resolved key", key = ?key);
                        if let Some(event) = self.apply_key(&key).await? {
                            return ok!(self.on_event(event));
                        }
                    }
                }

                // Cancel safe: a chunk is either fully moved into `pending_input` or
                // still in the stream.
                maybe_chunk = self.input.next() => match maybe_chunk {
                    Some(Ok(chunk)) => self.on_chunk(&chunk),
                    Some(Err(error)) => return Err(error.into()),
                    None => self.input_ended = true,
                },
            }
        }
    }

    fn on_chunk(&mut self, chunk: &str) {
        self.escape_deadline = None;
        if self.terminal {
            self.pending_input.extend(chunk.chars());
        } else {
            let lines = self.splitter.push(chunk);
            self.pending_events
                .extend(lines.into_iter().map(ReadlineEvent::Line));
        }
    }

    /// Queue whatever the input left unfinished, followed by [`ReadlineEvent::Eof`].
    fn end_of_input(&mut self) -> Result<(), ReadlineError> {
        tracing::debug!(message = "input ended");
        if self.terminal {
            if let Some(key) = self.decoder.flush() {
                let mut term = lock!(self.output);
                if let Some(EditorEvent::Line(line)) = self.editor.apply_key(&key, &mut *term)? {
                    self.pending_events.push_back(ReadlineEvent::Line(line));
                }
            }
            if !self.editor.line().is_empty() {
                let mut term = lock!(self.output);
                let line = self.editor.commit_line(&mut *term)?;
                self.pending_events.push_back(ReadlineEvent::Line(line));
            }
        } else if let Some(line) = self.splitter.finish() {
            self.pending_events.push_back(ReadlineEvent::Line(line));
        }
        self.pending_events.push_back(ReadlineEvent::Eof);
        ok!()
    }

    /// Decode and apply the rest of the current chunk, stopping at the first key that
    /// produces an event.
    async fn drain_pending_input(&mut self) -> Result<Option<ReadlineEvent>, ReadlineError> {
        while let Some(ch) = self.pending_input.pop_front() {
            let is_last_of_chunk = self.pending_input.is_empty();
            let maybe_key = self.decoder.feed(ch);

            if ch == ESC_CHAR && is_last_of_chunk && !self.escape_code_timeout.is_zero() {
                self.escape_deadline = Some(Instant::now() + self.escape_code_timeout);
            }

            if let Some(key) = maybe_key {
                // Tabs in the middle of pasted text are inserted, not completed.
                self.editor.set_completion_enabled(is_last_of_chunk);
                if let Some(event) = self.apply_key(&key).await? {
                    return ok!(Some(event));
                }
            }
        }
        ok!(None)
    }

    async fn apply_key(&mut self, key: &Key) -> Result<Option<ReadlineEvent>, ReadlineError> {
        let maybe_editor_event = {
            let mut term = lock!(self.output);
            self.editor.apply_key(key, &mut *term)?
        };
        let Some(editor_event) = maybe_editor_event else {
            return ok!(None);
        };

        match editor_event {
            EditorEvent::Line(line) => ok!(Some(ReadlineEvent::Line(line))),
            EditorEvent::Eof => ok!(Some(ReadlineEvent::Eof)),
            EditorEvent::Interrupted => ok!(Some(ReadlineEvent::Interrupted)),
            EditorEvent::Suspended => ok!(Some(ReadlineEvent::Suspended)),
            EditorEvent::CompletionRequested {
                line_before_cursor,
                last_keypress_was_tab,
            } => {
                self.complete(&line_before_cursor, last_keypress_was_tab)
                    .await?;
                ok!(None)
            }
        }
    }

    /// Run the completer and apply its result. A failing completer is reported inline
    /// and leaves the line as it was.
    async fn complete(
        &mut self,
        line_before_cursor: &str,
        last_keypress_was_tab: bool,
    ) -> Result<(), ReadlineError> {
        let Some(completer) = self.completer.clone() else {
            return ok!();
        };

        let result = select! {
            () = self.cancellation_token.cancelled() => return ok!(),
            result = completer.complete(line_before_cursor) => result,
        };

        let mut term = lock!(self.output);
        match result {
            Ok(completions) => {
                self.editor
                    .apply_completions(&completions, last_keypress_was_tab, &mut *term)?;
            }
            Err(error) => {
                tracing::warn!(message = "tab completion failed", error = ?error);
                write!(term, "Tab completion error: {error}")?;
                term.flush()?;
            }
        }
        ok!()
    }

    fn on_event(&mut self, event: ReadlineEvent) -> ReadlineEvent {
        if event == ReadlineEvent::Eof {
            self.close();
        }
        event
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl Readline {
    /// Show the prompt and the line. In non-terminal mode, just write the prompt.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::UseAfterClose`] once the session is closed.
    /// - [`ReadlineError::IO`] if writing to the output fails.
    pub fn prompt(&mut self, preserve_cursor: bool) -> Result<(), ReadlineError> {
        if self.closed {
            return Err(ReadlineError::UseAfterClose);
        }
        let mut term = lock!(self.output);
        if self.terminal {
            self.editor.prompt(preserve_cursor, &mut *term)?;
        } else {
            term.write_all(self.editor.prompt_text().as_bytes())?;
            term.flush()?;
        }
        ok!()
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) { self.editor.set_prompt(prompt); }

    #[must_use]
    pub fn prompt_text(&self) -> &str { self.editor.prompt_text() }

    /// Feed `text` in as if the user typed it (or, in non-terminal mode, as if it was
    /// read from the input). Lines it completes are returned by the next
    /// [`Self::readline()`] calls.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::UseAfterClose`] once the session is closed.
    /// - [`ReadlineError::IO`] if writing to the output fails.
    pub fn write(&mut self, text: &str) -> Result<(), ReadlineError> {
        if self.closed {
            return Err(ReadlineError::UseAfterClose);
        }
        if self.terminal {
            let events = {
                let mut term = lock!(self.output);
                self.editor.write(text, &mut *term)?
            };
            self.pending_events
                .extend(events.into_iter().filter_map(|event| match event {
                    EditorEvent::Line(line) => Some(ReadlineEvent::Line(line)),
                    _ => None,
                }));
        } else {
            let lines = self.splitter.push(text);
            self.pending_events
                .extend(lines.into_iter().map(ReadlineEvent::Line));
        }
        ok!()
    }

    /// The terminal changed width. Repaints the line.
    ///
    /// # Errors
    ///
    /// If writing to the output fails.
    pub fn resize(&mut self, columns: Option<usize>) -> Result<(), ReadlineError> {
        tracing::debug!(message = "terminal resized", columns = ?columns);
        if !self.terminal || self.closed {
            return ok!();
        }
        let mut term = lock!(self.output);
        self.editor.set_columns(columns, &mut *term)?;
        ok!()
    }

    /// Close the session. Does nothing if it is already closed.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.escape_deadline = None;
        tracing::debug!(message = "readline session closed");
    }

    #[must_use]
    pub fn is_closed(&self) -> bool { self.closed }

    #[must_use]
    pub fn line(&self) -> &str { self.editor.line() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.editor.cursor() }

    #[must_use]
    pub fn cursor_pos(&self) -> DisplayPos { self.editor.cursor_pos() }

    #[must_use]
    pub fn editor(&self) -> &LineEditor { &self.editor }

    #[must_use]
    pub fn history(&self) -> SafeHistory { self.editor.history() }

    /// Cancelling this token closes the session, even while a completer is running.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken { self.cancellation_token.clone() }

    pub fn set_completer(&mut self, completer: Option<SafeCompleter>) {
        self.editor.set_has_completer(completer.is_some());
        self.completer = completer;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use termline_test_fixtures::{StdoutMock, gen_input_stream, gen_input_stream_then_pending,
                                 gen_input_stream_with_delay};

    use super::*;
    use crate::{CompleterError, Completions, StdMutex, WordListCompleter, completer_fn};

    fn chunks(items: &[&str]) -> Vec<InputChunkResult> {
        items.iter().map(|it| Ok((*it).to_string())).collect()
    }

    fn new_readline(
        config: &EditorConfig,
        input: PinnedInputStream<InputChunkResult>,
    ) -> (Readline, StdoutMock) {
        let stdout_mock = StdoutMock::new();
        let output: SafeRawTerminal = Arc::new(StdMutex::new(stdout_mock.clone()));
        let readline = Readline::try_new(config, output, input).unwrap();
        (readline, stdout_mock)
    }

    #[tokio::test]
    async fn test_readline() {
        let input = gen_input_stream(chunks(&["abc\r"]));
        let (mut readline, stdout_mock) = new_readline(&EditorConfig::default(), input);
        readline.prompt(false).unwrap();

        let result = readline.readline().await;
        pretty_assertions::assert_eq!(result.unwrap(), ReadlineEvent::Line("abc".to_string()));
        pretty_assertions::assert_eq!(readline.line(), "");

        let output_buffer_data = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output_buffer_data.contains("> abc"));
    }

    #[tokio::test]
    async fn test_several_lines_in_one_chunk() {
        let input = gen_input_stream_then_pending(chunks(&["one\rtwo\r"]));
        let (mut readline, _stdout_mock) = new_readline(&EditorConfig::default(), input);

        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("one".to_string())
        );
        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("two".to_string())
        );
    }

    #[tokio::test]
    async fn test_end_of_input_returns_partial_line_then_eof() {
        let input = gen_input_stream(chunks(&["par", "tial"]));
        let (mut readline, _stdout_mock) = new_readline(&EditorConfig::default(), input);

        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("partial".to_string())
        );
        pretty_assertions::assert_eq!(readline.readline().await.unwrap(), ReadlineEvent::Eof);
        assert!(readline.is_closed());
        assert!(matches!(
            readline.readline().await,
            Err(ReadlineError::UseAfterClose)
        ));
        assert!(matches!(readline.prompt(false), Err(ReadlineError::UseAfterClose)));
        assert!(matches!(readline.write("x"), Err(ReadlineError::UseAfterClose)));
    }

    #[tokio::test]
    async fn test_ctrl_d_on_empty_line_closes() {
        let input = gen_input_stream_then_pending(chunks(&["\x04"]));
        let (mut readline, _stdout_mock) = new_readline(&EditorConfig::default(), input);

        pretty_assertions::assert_eq!(readline.readline().await.unwrap(), ReadlineEvent::Eof);
        assert!(matches!(
            readline.readline().await,
            Err(ReadlineError::UseAfterClose)
        ));
    }

    #[tokio::test]
    async fn test_ctrl_c_keeps_session_open() {
        let input = gen_input_stream_then_pending(chunks(&["ab\x03", "c\r"]));
        let (mut readline, _stdout_mock) = new_readline(&EditorConfig::default(), input);

        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Interrupted
        );
        assert!(!readline.is_closed());
        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_cancellation_closes() {
        let input = gen_input_stream_then_pending(chunks(&["typing"]));
        let (mut readline, _stdout_mock) = new_readline(&EditorConfig::default(), input);
        let token = readline.cancellation_token();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        pretty_assertions::assert_eq!(readline.readline().await.unwrap(), ReadlineEvent::Eof);
        pretty_assertions::assert_eq!(readline.line(), "typing");
        assert!(readline.is_closed());
    }

    #[tokio::test]
    async fn test_escape_timeout_resolves_lone_escape() {
        let config = EditorConfig::default()
            .try_with_escape_code_timeout_ms(10.0)
            .unwrap();
        // Without the timeout, `ESC x` would decode as Meta+X and the `x` would be lost.
        let input = gen_input_stream_with_delay(
            chunks(&["q\x1b", "x\r"]),
            Duration::from_millis(100),
        );
        let (mut readline, _stdout_mock) = new_readline(&config, input);

        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("qx".to_string())
        );
    }

    #[tokio::test]
    async fn test_escape_sequence_in_one_chunk() {
        let input = gen_input_stream(chunks(&["ac\x1b[Db\r"]));
        let (mut readline, _stdout_mock) = new_readline(&EditorConfig::default(), input);

        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_tab_completion() {
        let config = EditorConfig::default().with_columns(Some(80));
        let input = gen_input_stream(chunks(&["he\t", "\t", "p\r"]));
        let (mut readline, stdout_mock) = new_readline(&config, input);
        readline.set_completer(Some(Arc::new(WordListCompleter::new(["hello", "help"]))));

        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("help".to_string())
        );
        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("hello  help"));
    }

    #[tokio::test]
    async fn test_pasted_tab_is_inserted() {
        let input = gen_input_stream(chunks(&["a\tb\r"]));
        let (mut readline, _stdout_mock) = new_readline(&EditorConfig::default(), input);
        readline.set_completer(Some(Arc::new(WordListCompleter::new(["zzz"]))));

        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("a\tb".to_string())
        );
    }

    #[tokio::test]
    async fn test_completer_error_is_reported_inline() {
        let input = gen_input_stream(chunks(&["x\t", "\r"]));
        let (mut readline, stdout_mock) = new_readline(&EditorConfig::default(), input);
        let completer = completer_fn(|_: &str| -> Result<Completions, CompleterError> {
            Err(CompleterError::from("boom"))
        });
        readline.set_completer(Some(Arc::new(completer)));

        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("x".to_string())
        );
        assert!(
            stdout_mock
                .get_copy_of_buffer_as_string()
                .contains("Tab completion error: boom")
        );
    }

    #[tokio::test]
    async fn test_non_terminal_mode() {
        let config = EditorConfig::default().with_terminal(false);
        let input = gen_input_stream(chunks(&["a\r", "\nb\nc"]));
        let (mut readline, stdout_mock) = new_readline(&config, input);
        readline.prompt(false).unwrap();

        for expected in ["a", "b", "c"] {
            pretty_assertions::assert_eq!(
                readline.readline().await.unwrap(),
                ReadlineEvent::Line(expected.to_string())
            );
        }
        pretty_assertions::assert_eq!(readline.readline().await.unwrap(), ReadlineEvent::Eof);
        pretty_assertions::assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "> ");
    }

    #[tokio::test]
    async fn test_write_queues_lines() {
        let input = gen_input_stream_then_pending(Vec::new());
        let (mut readline, _stdout_mock) = new_readline(&EditorConfig::default(), input);

        readline.write("first\nsec").unwrap();
        pretty_assertions::assert_eq!(
            readline.readline().await.unwrap(),
            ReadlineEvent::Line("first".to_string())
        );
        pretty_assertions::assert_eq!(readline.line(), "sec");
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let output: SafeRawTerminal = Arc::new(StdMutex::new(StdoutMock::new()));
        let config = EditorConfig::default().with_tab_size(0);
        let result = Readline::try_new(&config, output, gen_input_stream(Vec::new()));
        assert!(matches!(result, Err(ReadlineError::Config(_))));
    }

    #[tokio::test]
    async fn test_shared_history_across_sessions() {
        let history: SafeHistory = Arc::new(StdMutex::new(crate::HistoryStore::default()));
        for line in ["first\r", "second\r"] {
            let output: SafeRawTerminal = Arc::new(StdMutex::new(StdoutMock::new()));
            let mut readline = Readline::try_new_with_history(
                &EditorConfig::default(),
                history.clone(),
                output,
                gen_input_stream(chunks(&[line])),
            )
            .unwrap();
            readline.readline().await.unwrap();
        }
        pretty_assertions::assert_eq!(lock!(history).get(0), Some("second"));
        pretty_assertions::assert_eq!(lock!(history).len(), 2);
    }
}
