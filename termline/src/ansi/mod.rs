// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The output side of the editor: the few CSI sequences needed to move the cursor and
//! clear parts of the screen.

// Attach sources.
pub mod constants;
pub mod csi_sequence;
pub mod pending_terminal_ops;
pub mod terminal_ops;

// Re-export.
pub use constants::*;
pub use csi_sequence::*;
pub use pending_terminal_ops::*;
pub use terminal_ops::*;
