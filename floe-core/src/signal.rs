// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-writer, multi-reader freeze signal with replay-latest observation.
//!
//! A [`FreezeSignal`] is the boolean cell every freeze gate of one screen
//! listens to: `true` means "hold deliveries back", `false` means "deliver
//! normally". Writes come from exactly one place (the lifecycle coordinator);
//! any number of gates observe it concurrently.
//!
//! Observation has behavior-subject semantics: a new observer immediately
//! receives the current value, then every subsequent flip. A gate attaching
//! while the signal is already frozen therefore starts frozen instead of
//! seeing a spurious "unfrozen" first.
//!
//! ## Example
//!
//! ```
//! use floe_core::FreezeSignal;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let signal = FreezeSignal::new();
//! let mut flips = signal.observe().unwrap();
//!
//! // The snapshot is replayed to the new observer first.
//! assert_eq!(flips.next().await, Some(false));
//!
//! signal.set(true).unwrap();
//! assert_eq!(flips.next().await, Some(true));
//!
//! // Closing ends every observer stream.
//! signal.close();
//! assert_eq!(flips.next().await, None);
//! # }
//! ```

use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

/// Errors raised by freeze-signal operations.
///
/// A closed signal belongs to a destroyed screen; touching it afterwards is a
/// use-after-destroy bug and is reported loudly rather than ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The signal has been closed and accepts no further writes or observers.
    #[error("freeze signal is closed")]
    Closed,
}

struct SignalState {
    frozen: bool,
    closed: bool,
    observers: Vec<UnboundedSender<bool>>,
}

/// A single-writer, multi-reader boolean cell with change notification.
///
/// Cheap to clone; all clones share the same state. One clone lives inside the
/// lifecycle coordinator (the writer), the others only call [`observe`] and
/// [`get`].
///
/// [`observe`]: FreezeSignal::observe
/// [`get`]: FreezeSignal::get
pub struct FreezeSignal {
    state: Arc<Mutex<SignalState>>,
}

impl FreezeSignal {
    /// Creates a new signal in the unfrozen state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SignalState {
                frozen: false,
                closed: false,
                observers: Vec::new(),
            })),
        }
    }

    /// Writes a new value, notifying every current observer.
    ///
    /// Writing the value the signal already holds is a silent no-op: observers
    /// are only notified of actual flips. Observers whose streams were dropped
    /// are pruned here.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Closed`] if the signal has been closed.
    pub fn set(&self, frozen: bool) -> Result<(), SignalError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SignalError::Closed);
        }
        if state.frozen == frozen {
            return Ok(());
        }

        state.frozen = frozen;
        state.observers.retain(|tx| tx.send(frozen).is_ok());
        debug!(frozen, observers = state.observers.len(), "freeze signal flipped");
        Ok(())
    }

    /// Returns the current value.
    #[must_use]
    pub fn get(&self) -> bool {
        self.state.lock().frozen
    }

    /// Subscribes to the signal, receiving the current value immediately and
    /// every flip afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Closed`] if the signal has been closed.
    pub fn observe(&self) -> Result<SignalStream, SignalError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SignalError::Closed);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is held right here, so the send cannot fail.
        let _ = tx.send(state.frozen);
        state.observers.push(tx);
        Ok(SignalStream {
            inner: UnboundedReceiverStream::new(rx),
        })
    }

    /// Closes the signal, ending every observer stream.
    ///
    /// After closing, [`set`](FreezeSignal::set) and
    /// [`observe`](FreezeSignal::observe) fail with [`SignalError::Closed`].
    /// Closing twice has no additional effect.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if !state.closed {
            debug!(observers = state.observers.len(), "freeze signal closed");
        }
        state.closed = true;
        state.observers.clear();
    }

    /// Returns `true` if the signal has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns the number of currently registered observers.
    ///
    /// Dropped observers are pruned lazily on the next `set`, not immediately.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }
}

impl Default for FreezeSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FreezeSignal {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl std::fmt::Debug for FreezeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("FreezeSignal")
            .field("frozen", &state.frozen)
            .field("closed", &state.closed)
            .field("observers", &state.observers.len())
            .finish()
    }
}

/// The flip feed handed to one observer: the snapshot value first, then every
/// change, ending when the signal closes.
#[derive(Debug)]
pub struct SignalStream {
    inner: UnboundedReceiverStream<bool>,
}

impl Stream for SignalStream {
    type Item = bool;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
