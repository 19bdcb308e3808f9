// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

/// A file appender that never rotates, writing to `path`. A relative path with no
/// directory is created in the current directory.
///
/// # Errors
///
/// If `path` has no file name (eg: it is `/` or ends in `..`).
pub fn try_create(path: &Path) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't use {} as a log file, it has no file name",
            path.display()
        )
    })?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    Ok(tracing_appender::rolling::never(parent, file_name))
}
