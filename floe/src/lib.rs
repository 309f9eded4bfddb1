// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Floe
//!
//! Lifecycle-driven freeze gating for async event streams.
//!
//! ## Overview
//!
//! Floe solves a recurring problem in screen-shaped applications: event
//! streams keep producing while their consumer is temporarily unable to
//! receive (backgrounded, mid-rebuild, detached). Dropping those events loses
//! state; delivering them into a dead consumer crashes or leaks work.
//!
//! Floe gates each stream behind a shared boolean [`FreezeSignal`]. While the
//! signal is frozen, events buffer in arrival order; when it thaws, the
//! buffer drains before anything new is delivered. A [`LifecycleCoordinator`]
//! owns the signal, translates host lifecycle transitions into freeze state,
//! and bulk-cancels every subscription exactly once at destruction.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use floe::{LifecycleCoordinator, Observer};
//! use floe_test_utils::test_channel;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let coordinator = LifecycleCoordinator::new();
//!     let (sender, events) = test_channel::<String>();
//!
//!     // Delivery of `events` now follows the screen lifecycle.
//!     coordinator.subscribe(events, Observer::new(|event| println!("{event}")))?;
//!
//!     coordinator.on_resume()?;
//!     sender.send("ready".into())?;
//!
//!     // Backgrounded: events buffer instead of reaching the observer.
//!     coordinator.on_pause()?;
//!     sender.send("while hidden".into())?;
//!
//!     // Foregrounded again: the buffered event is delivered first.
//!     coordinator.on_resume()?;
//!
//!     // Teardown cancels every subscription.
//!     coordinator.on_destroy()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Layering
//!
//! - [`floe_core`]: [`FreezeSignal`], [`StreamItem`], error types.
//! - [`floe_stream`]: the [`FreezeExt`] gating operator, usable on its own.
//! - `floe` (this crate): [`LifecycleCoordinator`], [`SubscriptionRegistry`],
//!   [`Observer`] callbacks.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod coordinator;
pub mod observer;
pub mod registry;

pub use coordinator::{LifecycleCoordinator, LifecycleError, LifecycleStage};
pub use observer::Observer;
pub use registry::{RegistrationKey, RegistryError, SubscriptionHandle, SubscriptionRegistry};

// Re-export the lower layers
pub use floe_core::{FloeError, FreezeSignal, Result, SignalError, SignalStream, StreamItem};
pub use floe_stream::{FreezeExt, Frozen};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coordinator::{LifecycleCoordinator, LifecycleError, LifecycleStage};
    pub use crate::observer::Observer;
    pub use crate::registry::{SubscriptionHandle, SubscriptionRegistry};
    pub use floe_core::{FloeError, FreezeSignal, StreamItem};
    pub use floe_stream::FreezeExt;
}
