// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! How many terminal columns text occupies, and where a string ends up (row and column)
//! once the terminal wraps it.

// Attach sources.
pub mod code_point_width;
pub mod display_pos;
pub mod string_width;

// Re-export.
pub use code_point_width::*;
pub use display_pos::*;
pub use string_width::*;
