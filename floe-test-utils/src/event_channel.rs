// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Unbounded channels that carry [`StreamItem`]s.
//!
//! Tests send plain values of type `T`; the sender wraps them into
//! `StreamItem::Value` at send time, so the receiving stream is directly
//! consumable by the gating operators. Errors can be injected in-band with
//! [`EventSender::error`].

use floe_core::{FloeError, StreamItem};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// An unbounded sender that wraps outgoing values into `StreamItem::Value`.
#[derive(Debug)]
pub struct EventSender<T> {
    inner: mpsc::UnboundedSender<StreamItem<T>>,
}

impl<T> Clone for EventSender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> EventSender<T> {
    /// Sends a value event.
    ///
    /// # Errors
    ///
    /// Returns an error if the receiving stream has been dropped.
    pub fn send(&self, value: T) -> Result<(), mpsc::error::SendError<StreamItem<T>>> {
        self.inner.send(StreamItem::Value(value))
    }

    /// Sends an error event in-band.
    ///
    /// # Errors
    ///
    /// Returns an error if the receiving stream has been dropped.
    pub fn error(&self, error: FloeError) -> Result<(), mpsc::error::SendError<StreamItem<T>>> {
        self.inner.send(StreamItem::Error(error))
    }

    /// Checks whether the receiving stream has been dropped.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Closes the channel, completing the receiving stream once drained.
    pub fn close(self) {
        drop(self);
    }
}

/// Creates an unbounded event channel.
///
/// Dropping (or [`close`](EventSender::close)-ing) the sender completes the
/// stream, which is how tests model natural upstream completion.
pub fn test_channel<T>() -> (EventSender<T>, UnboundedReceiverStream<StreamItem<T>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { inner: tx }, UnboundedReceiverStream::new(rx))
}
