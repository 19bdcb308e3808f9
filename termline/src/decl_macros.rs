// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Short for `Ok(())`, or `Ok($value)` when an arg is passed.
///
/// - If no arg is passed then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Lock a [`crate::StdMutex`], recovering the guard if another thread panicked while
/// holding it. The data behind these mutexes (history entries, the output sink) stays
/// usable after such a panic.
#[macro_export]
macro_rules! lock {
    ($mutex:expr) => {
        $mutex
            .lock()
            .unwrap_or_else(::std::sync::PoisonError::into_inner)
    };
}
