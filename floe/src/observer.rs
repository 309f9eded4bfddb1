// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Callback bundles for consuming driven streams.

use floe_core::FloeError;
use tracing::error;

/// The consumer side of a driven subscription.
///
/// Bundles the value callback with optional completion and error callbacks.
/// The value callback is required; the terminal callbacks are builder-style
/// additions. A stream delivers either an error or a completion, never both.
///
/// # Examples
///
/// ```rust
/// use floe::Observer;
///
/// let observer = Observer::new(|value: u32| println!("got {value}"))
///     .on_error(|error| eprintln!("stream failed: {error}"))
///     .on_complete(|| println!("done"));
/// # let _ = observer;
/// ```
pub struct Observer<T> {
    on_next: Box<dyn FnMut(T) + Send>,
    on_error: Option<Box<dyn FnMut(FloeError) + Send>>,
    on_complete: Option<Box<dyn FnOnce() + Send>>,
}

impl<T> Observer<T> {
    /// Creates an observer from a value callback.
    pub fn new(on_next: impl FnMut(T) + Send + 'static) -> Self {
        Self {
            on_next: Box::new(on_next),
            on_error: None,
            on_complete: None,
        }
    }

    /// Sets the error callback.
    ///
    /// Without one, stream errors are logged at error level and otherwise
    /// dropped.
    pub fn on_error(mut self, on_error: impl FnMut(FloeError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(on_error));
        self
    }

    /// Sets the completion callback, invoked when the stream ends naturally.
    pub fn on_complete(mut self, on_complete: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    pub(crate) fn next(&mut self, value: T) {
        (self.on_next)(value);
    }

    pub(crate) fn error(&mut self, err: FloeError) {
        match self.on_error.as_mut() {
            Some(callback) => callback(err),
            None => error!(%err, "unhandled stream error"),
        }
    }

    pub(crate) fn complete(&mut self) {
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }
}
