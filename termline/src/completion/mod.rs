// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tab completion: the [`Completer`] capability a host plugs in, and the presentation of
//! its candidates (common prefix insertion, or a column grid).

// Attach sources.
pub mod completer;
pub mod presenter;

// Re-export.
pub use completer::*;
pub use presenter::*;
