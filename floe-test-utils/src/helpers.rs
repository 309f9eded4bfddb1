// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Assertion helpers for stream-facing tests.

use floe_core::StreamItem;
use futures::stream::StreamExt;
use futures::Stream;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::sleep;

/// Asserts that `stream` emits nothing within the given window.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected element emitted, expected no output.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Asserts that the next emission is `StreamItem::Value(expected)`.
pub async fn expect_next_value<S, T>(stream: &mut S, expected: T)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: PartialEq + Debug,
{
    let item = stream.next().await.expect("expected next item");
    assert_eq!(item, StreamItem::Value(expected));
}

/// Asserts that the next emission is an in-band error.
pub async fn expect_error<S, T>(stream: &mut S)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: Debug,
{
    let item = stream.next().await.expect("expected next item");
    assert!(item.is_error(), "expected an error, got {item:?}");
}

/// Asserts that the stream has completed.
pub async fn expect_completed<S, T>(stream: &mut S)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: Debug,
{
    let item = stream.next().await;
    assert!(item.is_none(), "expected completion, got {item:?}");
}
