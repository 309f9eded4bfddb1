// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::FloeError;

/// A stream item that is either a value or an error.
///
/// Gated streams carry `StreamItem<T>` so that errors flow through the same
/// ordered pipeline as values: a freeze gate buffers an error exactly like a
/// value and never lets it overtake the values emitted before it. For the gate
/// an error is terminal, the last item the stream produces.
#[derive(Debug, Clone)]
pub enum StreamItem<T> {
    /// A successful value.
    Value(T),
    /// An error that terminates the stream.
    Error(FloeError),
}

impl<T: PartialEq> PartialEq for StreamItem<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StreamItem::Value(a), StreamItem::Value(b)) => a == b,
            // Errors are never equal
            _ => false,
        }
    }
}

impl<T> StreamItem<T> {
    /// Returns `true` if this is a `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, StreamItem::Value(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, StreamItem::Error(_))
    }

    /// Converts to `Option<T>`, discarding an error.
    pub fn ok(self) -> Option<T> {
        match self {
            StreamItem::Value(v) => Some(v),
            StreamItem::Error(_) => None,
        }
    }

    /// Converts to `Option<FloeError>`, discarding a value.
    pub fn err(self) -> Option<FloeError> {
        match self {
            StreamItem::Value(_) => None,
            StreamItem::Error(e) => Some(e),
        }
    }

    /// Maps the contained value, passing errors through unchanged.
    pub fn map<U, F>(self, f: F) -> StreamItem<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            StreamItem::Value(v) => StreamItem::Value(f(v)),
            StreamItem::Error(e) => StreamItem::Error(e),
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the item is an `Error`.
    pub fn unwrap(self) -> T {
        match self {
            StreamItem::Value(v) => v,
            StreamItem::Error(e) => {
                panic!("called `StreamItem::unwrap()` on an `Error` value: {e:?}")
            }
        }
    }

    /// Returns the contained value, panicking with `msg` if it is an `Error`.
    ///
    /// # Panics
    ///
    /// Panics with the provided message if the item is an `Error`.
    pub fn expect(self, msg: &str) -> T {
        match self {
            StreamItem::Value(v) => v,
            StreamItem::Error(e) => panic!("{msg}: {e:?}"),
        }
    }
}

impl<T> From<Result<T, FloeError>> for StreamItem<T> {
    fn from(result: Result<T, FloeError>) -> Self {
        match result {
            Ok(v) => StreamItem::Value(v),
            Err(e) => StreamItem::Error(e),
        }
    }
}

impl<T> From<StreamItem<T>> for Result<T, FloeError> {
    fn from(item: StreamItem<T>) -> Self {
        match item {
            StreamItem::Value(v) => Ok(v),
            StreamItem::Error(e) => Err(e),
        }
    }
}
