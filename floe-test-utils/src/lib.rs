// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the floe workspace.
//!
//! Provides event channels that speak [`StreamItem`](floe_core::StreamItem)
//! natively, error-injecting stream wrappers, and assertion helpers shared by
//! the integration tests across the workspace crates.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod error_injection;
pub mod event_channel;
pub mod helpers;

pub use error_injection::ErrorInjectingStream;
pub use event_channel::{test_channel, EventSender};
pub use helpers::{
    assert_no_element_emitted, expect_completed, expect_error, expect_next_value,
};
