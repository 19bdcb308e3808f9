// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures used by the `termline` tests.
//!
//! - [`StdoutMock`] is a cloneable [`std::io::Write`] sink. Hand one clone to the code
//!   under test and keep the other to inspect what was written, with or without the
//!   ANSI escape sequences.
//! - [`gen_input_stream`] and [`gen_input_stream_with_delay`] turn a `Vec` of items into
//!   a [`PinnedInputStream`], which is how the line editor session receives terminal
//!   input chunks.
//!
//! ```
//! use std::io::Write;
//!
//! use termline_test_fixtures::StdoutMock;
//!
//! let mut stdout_mock = StdoutMock::default();
//! let stdout_mock_clone = stdout_mock.clone(); // Shares the same buffer.
//!
//! stdout_mock.write_all(b"\x1b[31mhello\x1b[0m").unwrap();
//!
//! assert_eq!(stdout_mock_clone.get_copy_of_buffer_as_string_strip_ansi(), "hello");
//! ```

// Attach sources.
pub mod input_device_fixtures;
pub mod output_device_fixtures;

// Re-export.
pub use input_device_fixtures::*;
pub use output_device_fixtures::*;
