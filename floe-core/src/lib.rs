// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types for floe, a lifecycle-gated event freezing library.
//!
//! This crate holds the pieces every other floe crate builds on:
//!
//! - [`StreamItem`]: the in-band item type carried by gated streams, giving each
//!   stream a value channel and an error channel without inventing a new
//!   subscriber vocabulary.
//! - [`FloeError`]: the root error type for stream-level failures, plus the
//!   [`Result`] alias.
//! - [`FreezeSignal`]: a single-writer, multi-reader boolean cell with
//!   replay-latest observation, the input every freeze gate listens to.
//!
//! The freeze operator itself lives in `floe-stream`; the lifecycle facade that
//! writes the signal lives in `floe`.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error;
pub mod signal;
pub mod stream_item;

pub use error::{FloeError, Result};
pub use signal::{FreezeSignal, SignalError, SignalStream};
pub use stream_item::StreamItem;
