// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{pin::Pin, time::Duration};

use async_stream::stream;
use futures_core::Stream;

/// Same shape as the input stream a `termline` session reads from.
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// The main constructors are:
/// - [`gen_input_stream`]
/// - [`gen_input_stream_with_delay`]
pub fn gen_input_stream<T>(generator_vec: Vec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

/// Sleeps for `delay` before yielding each item. Useful to let timers in the code under
/// test fire between chunks.
pub fn gen_input_stream_with_delay<T>(
    generator_vec: Vec<T>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

/// Yields the items and then never ends, the way an idle terminal behaves.
pub fn gen_input_stream_then_pending<T>(generator_vec: Vec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
        std::future::pending::<()>().await;
    };
    Box::pin(it)
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;

    #[tokio::test]
    async fn test_gen_input_stream() {
        let mut input_stream = gen_input_stream(vec![1, 2, 3]);
        for _ in 1..=3 {
            input_stream.next().await;
        }
        pretty_assertions::assert_eq!(input_stream.next().await, None);
    }

    #[tokio::test]
    async fn test_gen_input_stream_with_delay() {
        const DELAY: u64 = 100;

        // Start timer.
        let start_time = std::time::Instant::now();

        let mut input_stream =
            gen_input_stream_with_delay(vec![1, 2, 3], Duration::from_millis(DELAY));
        for _ in 1..=3 {
            input_stream.next().await;
        }

        // End timer.
        let end_time = std::time::Instant::now();

        pretty_assertions::assert_eq!(input_stream.next().await, None);

        assert!(end_time - start_time >= Duration::from_millis(DELAY * 3));
    }

    #[tokio::test]
    async fn test_gen_input_stream_then_pending() {
        let mut input_stream = gen_input_stream_then_pending(vec!["a"]);
        pretty_assertions::assert_eq!(input_stream.next().await, Some("a"));

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), input_stream.next()).await;
        assert!(timed_out.is_err());
    }
}
