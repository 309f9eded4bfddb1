// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bulk-cancellation bookkeeping for driven subscriptions.
//!
//! A [`SubscriptionRegistry`] holds one [`SubscriptionHandle`] per live
//! subscription of a screen. Teardown is a single [`cancel_all`] that fires
//! every handle exactly once and seals the registry; subscriptions that end
//! on their own are discharged by their driver instead, so the registry never
//! grows across a long-lived screen.
//!
//! [`cancel_all`]: SubscriptionRegistry::cancel_all

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Errors surfaced by registry operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry has already run its bulk cancellation.
    #[error("subscription registry is already finalized")]
    Finalized,
}

/// Opaque identifier of one registry entry.
///
/// Returned by [`SubscriptionRegistry::register`] and consumed by
/// [`SubscriptionRegistry::discharge`] when the underlying stream ends
/// naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationKey(u64);

/// Cancellation handle for one driven subscription.
///
/// Cloning shares the underlying state: cancelling any clone cancels the
/// subscription. Cancellation is idempotent and terminal.
#[derive(Debug, Clone)]
pub struct SubscriptionHandle {
    token: CancellationToken,
    completed: Arc<AtomicBool>,
}

impl SubscriptionHandle {
    /// Creates a fresh, active handle.
    ///
    /// Subscriptions made through the coordinator create their own handles;
    /// this constructor exists for registering externally managed work into
    /// a registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            completed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests cancellation of the subscription.
    ///
    /// Repeated calls are no-ops. Delivery stops at the next event boundary;
    /// a callback already running is allowed to finish.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the underlying stream completed or errored on its own.
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    /// True when the subscription no longer delivers, for either reason.
    pub fn is_disposed(&self) -> bool {
        self.is_cancelled() || self.is_completed()
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub(crate) fn mark_completed(&self) {
        self.completed.store(true, Ordering::Release);
    }
}

impl Default for SubscriptionHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    entries: HashMap<u64, SubscriptionHandle>,
    next_key: u64,
    finalized: bool,
}

/// A single-shot container of subscription handles.
///
/// The registry is tied to one screen's one-way lifecycle: it accepts
/// registrations until [`cancel_all`](Self::cancel_all) runs, then rejects
/// everything after. Cloning shares the same underlying registry.
#[derive(Debug, Clone)]
pub struct SubscriptionRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl SubscriptionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RegistryState::default())),
        }
    }

    /// Registers a handle, returning the key its driver later uses to
    /// discharge the entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Finalized`] once `cancel_all` has run.
    pub fn register(&self, handle: SubscriptionHandle) -> Result<RegistrationKey, RegistryError> {
        let mut state = self.state.lock();
        if state.finalized {
            return Err(RegistryError::Finalized);
        }
        let key = state.next_key;
        state.next_key += 1;
        state.entries.insert(key, handle);
        debug!(key, active = state.entries.len(), "subscription registered");
        Ok(RegistrationKey(key))
    }

    /// Removes an entry without cancelling it.
    ///
    /// Unknown keys are ignored: the entry may already have been cleared by
    /// `cancel_all` in the window before its driver observed cancellation.
    pub fn discharge(&self, key: RegistrationKey) {
        let mut state = self.state.lock();
        if state.finalized {
            warn!(key = key.0, "discharge after registry finalization");
            return;
        }
        if state.entries.remove(&key.0).is_some() {
            debug!(key = key.0, active = state.entries.len(), "subscription discharged");
        }
    }

    /// Cancels every registered handle exactly once and seals the registry.
    ///
    /// Idempotent: a second call finds the registry already sealed and does
    /// nothing.
    pub fn cancel_all(&self) {
        let entries = {
            let mut state = self.state.lock();
            if state.finalized {
                return;
            }
            state.finalized = true;
            std::mem::take(&mut state.entries)
        };
        // Tokens are fired outside the lock; their wakers run arbitrary code.
        debug!(cancelled = entries.len(), "registry finalized");
        for handle in entries.values() {
            handle.cancel();
        }
    }

    /// Number of currently registered entries.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once `cancel_all` has run.
    pub fn is_finalized(&self) -> bool {
        self.state.lock().finalized
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
