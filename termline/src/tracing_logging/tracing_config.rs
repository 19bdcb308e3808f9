// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use tracing_core::LevelFilter;

pub const TRACING_LOG_FILE_DEFAULT: &str = "termline_log.log";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// This configuration also sets the log level. Pass it to [`crate::tracing_logging::init`]
/// to initialize the tracing system.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level: tracing::Level,
}

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(PathBuf),
    DisplayAndFile(DisplayPreference, PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    /// Log to a file only. This is the right choice while a line is being edited.
    #[must_use]
    pub fn new_file(path: Option<PathBuf>, level: tracing::Level) -> Self {
        Self {
            writer_config: WriterConfig::File(
                path.unwrap_or_else(|| PathBuf::from(TRACING_LOG_FILE_DEFAULT)),
            ),
            level,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference, level: tracing::Level) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { LevelFilter::from_level(self.level) }
}

impl WriterConfig {
    #[must_use]
    pub fn display_preference(&self) -> Option<DisplayPreference> {
        match self {
            WriterConfig::Display(display) | WriterConfig::DisplayAndFile(display, _) => {
                Some(*display)
            }
            WriterConfig::None | WriterConfig::File(_) => None,
        }
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            WriterConfig::File(path) | WriterConfig::DisplayAndFile(_, path) => Some(path),
            WriterConfig::None | WriterConfig::Display(_) => None,
        }
    }
}
