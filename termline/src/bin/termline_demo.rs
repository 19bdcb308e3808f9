// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A small REPL on top of [`termline`]. Type a line and it is echoed back. Press `Tab`
//! to complete the built-in commands, `Up` / `Down` to browse history, and `Ctrl+D` on
//! an empty line (or type `quit`) to exit.
//!
//! ```text
//! cargo run --bin termline_demo -- --history-file /tmp/termline_history --enable-logging
//! ```
//!
//! When stdin is piped, lines are read without editing and echoed back.

use std::{io::{Write, stdout},
          path::PathBuf,
          sync::Arc};

use clap::Parser;
use miette::IntoDiagnostic;
use termline::{EditorConfig, HistoryStore, Readline, ReadlineEvent, SafeRawTerminal,
               StdMutex, TerminalSession, WordListCompleter, lock, stdin_chunk_stream,
               tracing_logging::{self, TracingConfig}};

const COMMANDS: [&str; 5] = ["help", "history", "clear-history", "prompt", "quit"];

#[derive(Debug, Parser)]
#[command(bin_name = "termline_demo")]
#[command(about = "Line editing playground for the termline crate", long_about = None)]
#[command(version)]
struct CliArg {
    /// Text shown before the line.
    #[arg(long, default_value = "termline> ")]
    prompt: String,

    /// Maximum number of history entries (0 disables history).
    #[arg(long, default_value_t = 30.0)]
    history_size: f64,

    /// Load history from this file at startup and save it on exit.
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Move a re-entered line to the front of history instead of keeping both copies.
    #[arg(long)]
    remove_history_duplicates: bool,

    /// How long to wait after a lone `ESC` before treating it as the Escape key.
    #[arg(long, default_value_t = 500.0)]
    escape_code_timeout_ms: f64,

    /// Maximum time between `\r` and `\n` for them to count as one line ending.
    #[arg(long, default_value_t = 100.0)]
    crlf_delay_ms: f64,

    /// Width of a tab stop.
    #[arg(long, default_value_t = 8)]
    tab_size: usize,

    /// Write debug logs to `--log-file`.
    #[arg(long, short = 'l')]
    enable_logging: bool,

    #[arg(long, default_value = "termline_demo.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli_arg = CliArg::parse();

    if cli_arg.enable_logging {
        tracing_logging::init(TracingConfig::new_file(
            Some(cli_arg.log_file.clone()),
            tracing::Level::DEBUG,
        ))?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let config = try_create_config(&cli_arg)?;

    let Some(mut session) = TerminalSession::try_new(config.clone())? else {
        return run_piped(config).await;
    };
    session
        .readline
        .set_completer(Some(Arc::new(WordListCompleter::new(COMMANDS))));

    run_repl(&mut session).await?;

    if let Some(path) = &cli_arg.history_file {
        lock!(session.readline.history()).save_to_file(path)?;
    }
    tracing::debug!(message = "Stop logging...");
    Ok(())
}

fn try_create_config(cli_arg: &CliArg) -> miette::Result<EditorConfig> {
    let config = EditorConfig::default()
        .with_prompt(cli_arg.prompt.clone())
        .with_remove_history_duplicates(cli_arg.remove_history_duplicates)
        .with_tab_size(cli_arg.tab_size)
        .try_with_history_size(cli_arg.history_size)?
        .try_with_escape_code_timeout_ms(cli_arg.escape_code_timeout_ms)?
        .try_with_crlf_delay_ms(cli_arg.crlf_delay_ms)?;

    let Some(path) = &cli_arg.history_file else {
        return Ok(config);
    };
    let history = HistoryStore::load_from_file(
        path,
        config.history_size,
        config.remove_history_duplicates,
    )?;
    let entries = history.iter().cloned().collect();
    Ok(config.with_history(entries))
}

async fn run_repl(session: &mut TerminalSession) -> miette::Result<()> {
    let mut resize_signal = ResizeSignal::try_new();

    session.readline.prompt(false)?;
    loop {
        let event = tokio::select! {
            // Cancel safe: unread input stays queued inside the session.
            event = session.readline.readline() => event?,
            () = resize_signal.recv() => {
                session.refresh_columns()?;
                continue;
            }
        };

        match event {
            ReadlineEvent::Line(line) => {
                if !run_command(&mut session.readline, line.trim())? {
                    break;
                }
            }
            ReadlineEvent::Interrupted => {
                print_raw("^C")?;
                break;
            }
            ReadlineEvent::Suspended => {
                print_raw("Suspend isn't supported, press Ctrl+D to exit.")?;
            }
            ReadlineEvent::Eof => break,
        }
        session.readline.prompt(false)?;
    }
    Ok(())
}

/// Returns `false` when the REPL should stop.
fn run_command(readline: &mut Readline, line: &str) -> miette::Result<bool> {
    match line {
        "quit" => return Ok(false),
        "help" => print_raw(&format!("Commands: {}", COMMANDS.join(", ")))?,
        "history" => {
            let history = readline.history();
            let history = lock!(history);
            for (index, entry) in history.iter().enumerate() {
                print_raw(&format!("{index:>4}  {entry}"))?;
            }
        }
        "clear-history" => lock!(readline.history()).clear(),
        "prompt" => {
            let next = if readline.prompt_text() == "$ " { "termline> " } else { "$ " };
            readline.set_prompt(next);
        }
        "" => {}
        other => print_raw(&format!("You typed: {other}"))?,
    }
    Ok(true)
}

/// Raw mode is on, so lines end in `\r\n`.
fn print_raw(text: &str) -> miette::Result<()> {
    let mut stdout = stdout();
    write!(stdout, "{text}\r\n").into_diagnostic()?;
    stdout.flush().into_diagnostic()
}

/// Input isn't a terminal: read lines without editing.
async fn run_piped(config: EditorConfig) -> miette::Result<()> {
    let output: SafeRawTerminal = Arc::new(StdMutex::new(stdout()));
    let config = config.with_terminal(false);
    let mut readline = Readline::try_new(&config, output, stdin_chunk_stream())?;

    while let ReadlineEvent::Line(line) = readline.readline().await? {
        println!("You typed: {line}");
    }
    Ok(())
}

/// `SIGWINCH`, delivered when the terminal is resized.
#[cfg(unix)]
struct ResizeSignal(Option<tokio::signal::unix::Signal>);

#[cfg(unix)]
impl ResizeSignal {
    fn try_new() -> Self {
        use tokio::signal::unix::{SignalKind, signal};
        Self(signal(SignalKind::window_change()).ok())
    }

    async fn recv(&mut self) {
        match &mut self.0 {
            Some(signal) => {
                signal.recv().await;
            }
            None => std::future::pending().await,
        }
    }
}

#[cfg(not(unix))]
struct ResizeSignal;

#[cfg(not(unix))]
impl ResizeSignal {
    fn try_new() -> Self { Self }

    async fn recv(&mut self) { std::future::pending().await }
}
