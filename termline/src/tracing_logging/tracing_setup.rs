// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

use super::{DisplayPreference, TracingConfig, rolling_file_appender_impl};

pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(true)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

/// Simply initialize the tracing system with the provided [`TracingConfig`].
///
/// # Errors
///
/// If the log file can't be created, or a global subscriber is already set.
pub fn init(tracing_config: TracingConfig) -> miette::Result<()> {
    let Some(layers) = try_create_layers(&tracing_config)? else {
        return Ok(());
    };
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|error| miette::miette!("Can't initialize tracing: {error}"))
}

/// Returns the layers, or [None] for [`super::WriterConfig::None`]. This does not
/// initialize the tracing system. Once you have the layers, you can run:
/// `tracing_subscriber::registry().with(layers).init()`.
///
/// # Errors
///
/// If the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    let writer_config = &tracing_config.writer_config;
    if writer_config.display_preference().is_none() && writer_config.file_path().is_none() {
        return Ok(None);
    }

    let level_filter = tracing_config.get_level_filter();

    let mut layers: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Applies to every layer added after it.
    layers.push(Box::new(level_filter));

    if let Some(display) = writer_config.display_preference() {
        layers.push(create_display_layer(level_filter, display));
    }

    if let Some(path) = writer_config.file_path() {
        layers.push(try_create_file_layer(level_filter, path)?);
    }

    Ok(Some(layers))
}

fn create_display_layer<S>(level_filter: LevelFilter, display: DisplayPreference) -> Box<DynLayer<S>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!().with_ansi(true);
    match display {
        DisplayPreference::Stdout => Box::new(
            fmt_layer
                .with_writer(std::io::stdout)
                .with_filter(level_filter),
        ),
        DisplayPreference::Stderr => Box::new(
            fmt_layer
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        ),
    }
}

fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    path: &std::path::Path,
) -> miette::Result<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let file = rolling_file_appender_impl::try_create(path)?;
    Ok(Box::new(
        create_fmt!()
            .with_ansi(false)
            .with_writer(file)
            .with_filter(level_filter),
    ))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::tracing_logging::WriterConfig;

    #[test]
    fn test_no_writer_no_layers() {
        let config = TracingConfig {
            writer_config: WriterConfig::None,
            level: tracing::Level::INFO,
        };
        assert!(try_create_layers(&config).unwrap().is_none());
    }

    #[test]
    fn test_display_and_file_layers() {
        let dir = tempfile::tempdir().unwrap();
        let config = TracingConfig {
            writer_config: WriterConfig::DisplayAndFile(
                DisplayPreference::Stderr,
                dir.path().join("both.log"),
            ),
            level: tracing::Level::DEBUG,
        };
        let layers = try_create_layers(&config).unwrap().unwrap();
        // Level filter, display, file.
        pretty_assertions::assert_eq!(layers.len(), 3);
    }

    #[test]
    #[serial]
    fn test_file_logging_writes_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.log");
        let config = TracingConfig::new_file(Some(path.clone()), tracing::Level::DEBUG);
        let layers = try_create_layers(&config).unwrap().unwrap();

        let subscriber = tracing_subscriber::registry().with(layers);
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(message = "line committed", len = 3);
            tracing::trace!(message = "filtered out");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("line committed"));
        assert!(contents.contains("len=3"));
        assert!(!contents.contains("filtered out"));
    }
}
