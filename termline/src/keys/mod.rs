// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turning raw terminal input into named keys.
//!
//! Terminals send most keys as a single char, but arrows, function keys, and modified
//! keys arrive as escape sequences (`ESC [ 1 ; 5 A` is Ctrl+Up). The sequences differ
//! between xterm, gnome-terminal, rxvt, putty and the Cygwin console, and a lone `ESC`
//! can't be told apart from the start of a sequence until more input arrives or a timeout
//! expires. [`KeyDecoder`] handles all of this one char at a time.

// Attach sources.
pub mod escape_code_table;
pub mod key;
pub mod key_decoder;

// Re-export.
pub use escape_code_table::*;
pub use key::*;
pub use key_decoder::*;
