// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Route the crate's [`tracing`] events to stdout, stderr, a log file, or both.
//!
//! While a line is being edited, the terminal belongs to the editor. Logging to the
//! same terminal garbles the line, so interactive hosts should log to a file.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_setup;

// Re-export.
pub use tracing_config::*;
pub use tracing_setup::*;
