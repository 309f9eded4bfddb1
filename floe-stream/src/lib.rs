// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream gating for `floe`.
//!
//! This crate provides the [`FreezeExt`] extension trait, which attaches a
//! freeze gate to any stream of [`StreamItem`]s. While the gate is frozen,
//! upstream events accumulate in an internal buffer instead of reaching the
//! consumer; when the gate thaws, the buffer drains in arrival order before
//! any new event is delivered. An optional collapse predicate keeps the
//! buffer from growing without bound by letting a newly buffered event
//! replace the most recent one it supersedes.
//!
//! The freeze state itself usually comes from a
//! [`FreezeSignal`](floe_core::FreezeSignal), whose
//! [`observe`](floe_core::FreezeSignal::observe) streams replay the current
//! value on attach so that a gate created mid-lifecycle starts in the right
//! state.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod freeze;

// Re-export the core types so that consumers of the operator do not need a
// direct floe-core dependency.
pub use floe_core::{FloeError, FreezeSignal, Result, SignalError, SignalStream, StreamItem};
pub use freeze::{FreezeExt, Frozen};
