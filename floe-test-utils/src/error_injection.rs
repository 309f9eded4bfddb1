// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream wrappers that inject `StreamItem::Error` values into streams for
//! testing error propagation behavior in the gating operators.

use floe_core::{FloeError, StreamItem};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A stream wrapper that injects an error at a specified position.
///
/// Wraps each value of the inner stream in `StreamItem::Value` and emits a
/// single `StreamItem::Error` at the given 0-indexed position.
///
/// # Examples
///
/// ```rust
/// use floe_core::StreamItem;
/// use floe_test_utils::ErrorInjectingStream;
/// use futures::{stream, StreamExt};
///
/// # async fn example() {
/// let base = stream::iter(vec![1, 2]);
/// let mut events = ErrorInjectingStream::new(base, 1);
///
/// assert!(matches!(events.next().await.unwrap(), StreamItem::Value(1)));
/// assert!(matches!(events.next().await.unwrap(), StreamItem::Error(_)));
/// assert!(matches!(events.next().await.unwrap(), StreamItem::Value(2)));
/// # }
/// ```
pub struct ErrorInjectingStream<S> {
    inner: S,
    inject_error_at: Option<usize>,
    count: usize,
}

impl<S> ErrorInjectingStream<S> {
    /// Creates a new error-injecting stream wrapper.
    ///
    /// # Arguments
    ///
    /// * `inner` - The base stream to wrap
    /// * `inject_error_at` - The position (0-indexed) at which to inject an error
    pub fn new(inner: S, inject_error_at: usize) -> Self {
        Self {
            inner,
            inject_error_at: Some(inject_error_at),
            count: 0,
        }
    }
}

impl<S> Stream for ErrorInjectingStream<S>
where
    S: Stream + Unpin,
{
    type Item = StreamItem<S::Item>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(error_pos) = self.inject_error_at {
            if self.count == error_pos {
                self.inject_error_at = None; // Only inject once
                self.count += 1;
                return Poll::Ready(Some(StreamItem::Error(FloeError::stream(
                    "Injected test error",
                ))));
            }
        }

        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                self.count += 1;
                Poll::Ready(Some(StreamItem::Value(item)))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
