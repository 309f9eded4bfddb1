// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lifecycle-to-freeze translation and subscription driving.

use crate::observer::Observer;
use crate::registry::{RegistryError, SubscriptionHandle, SubscriptionRegistry};
use floe_core::{FreezeSignal, SignalError, StreamItem};
use floe_stream::FreezeExt;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors surfaced by lifecycle and subscribe operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The coordinator has already been destroyed; it cannot be revived.
    #[error("lifecycle coordinator is already destroyed")]
    AlreadyDestroyed,
    /// A freeze-signal write failed.
    #[error(transparent)]
    Signal(#[from] SignalError),
    /// A registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Lifecycle stages in host call order.
///
/// Recorded for diagnostics; apart from [`Destroyed`](Self::Destroyed) being
/// terminal, the coordinator does not police transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    Created,
    Loaded,
    Started,
    Resumed,
    Paused,
    Stopped,
    ViewDetached,
    Destroyed,
}

#[derive(Debug)]
struct CoordinatorState {
    stage: LifecycleStage,
    freeze_on_pause: bool,
}

/// Translates host lifecycle transitions into freeze-signal writes and
/// bulk subscription teardown.
///
/// One coordinator belongs to one screen instance. Streams subscribed through
/// it are gated on the screen's [`FreezeSignal`]: events buffer while the
/// screen cannot receive (paused with the freeze-on-pause policy, or view
/// detached) and drain in order once it can again. [`on_destroy`] cancels
/// every subscription exactly once; afterwards the coordinator rejects all
/// further calls with [`LifecycleError::AlreadyDestroyed`].
///
/// Cloning shares the same underlying coordinator.
///
/// [`on_destroy`]: Self::on_destroy
#[derive(Clone)]
pub struct LifecycleCoordinator {
    signal: FreezeSignal,
    registry: SubscriptionRegistry,
    state: Arc<Mutex<CoordinatorState>>,
}

impl LifecycleCoordinator {
    /// Creates a coordinator with the default policy: freeze on pause.
    #[must_use]
    pub fn new() -> Self {
        Self::with_freeze_on_pause(true)
    }

    /// Creates a coordinator with an explicit freeze-on-pause policy.
    ///
    /// With the policy disabled, events keep flowing while paused and freeze
    /// only when the view detaches.
    pub fn with_freeze_on_pause(freeze_on_pause: bool) -> Self {
        Self {
            signal: FreezeSignal::new(),
            registry: SubscriptionRegistry::new(),
            state: Arc::new(Mutex::new(CoordinatorState {
                stage: LifecycleStage::Created,
                freeze_on_pause,
            })),
        }
    }

    fn ensure_alive(&self) -> Result<(), LifecycleError> {
        if self.state.lock().stage == LifecycleStage::Destroyed {
            return Err(LifecycleError::AlreadyDestroyed);
        }
        Ok(())
    }

    fn transition(&self, stage: LifecycleStage) -> Result<(), LifecycleError> {
        let mut state = self.state.lock();
        if state.stage == LifecycleStage::Destroyed {
            return Err(LifecycleError::AlreadyDestroyed);
        }
        debug!(from = ?state.stage, to = ?stage, "lifecycle transition");
        state.stage = stage;
        Ok(())
    }

    /// The view has loaded. `view_recreated` is true when the view was
    /// rebuilt after a configuration change rather than created fresh.
    pub fn on_load(&self, view_recreated: bool) -> Result<(), LifecycleError> {
        trace!(view_recreated, "load");
        self.transition(LifecycleStage::Loaded)
    }

    /// Called after [`on_load`](Self::on_load) has completed.
    pub fn on_load_finished(&self) -> Result<(), LifecycleError> {
        trace!("load finished");
        self.ensure_alive()
    }

    /// The view has started.
    pub fn on_start(&self) -> Result<(), LifecycleError> {
        self.transition(LifecycleStage::Started)
    }

    /// The view has come to the foreground: thaws the freeze signal, which
    /// drains every gated buffer in order.
    pub fn on_resume(&self) -> Result<(), LifecycleError> {
        self.transition(LifecycleStage::Resumed)?;
        self.signal.set(false)?;
        Ok(())
    }

    /// The view has left the foreground: freezes the signal if the
    /// freeze-on-pause policy is enabled.
    pub fn on_pause(&self) -> Result<(), LifecycleError> {
        let freeze = {
            let mut state = self.state.lock();
            if state.stage == LifecycleStage::Destroyed {
                return Err(LifecycleError::AlreadyDestroyed);
            }
            debug!(from = ?state.stage, to = ?LifecycleStage::Paused, "lifecycle transition");
            state.stage = LifecycleStage::Paused;
            state.freeze_on_pause
        };
        if freeze {
            self.signal.set(true)?;
        }
        Ok(())
    }

    /// The view has stopped.
    pub fn on_stop(&self) -> Result<(), LifecycleError> {
        self.transition(LifecycleStage::Stopped)
    }

    /// The view is gone (detached for rebuild or teardown): always freezes,
    /// independent of the pause policy. Events produced now buffer until a
    /// new view resumes.
    pub fn on_view_detached(&self) -> Result<(), LifecycleError> {
        self.transition(LifecycleStage::ViewDetached)?;
        self.signal.set(true)?;
        Ok(())
    }

    /// The screen is finally destroyed: cancels every registered
    /// subscription exactly once and closes the freeze signal.
    ///
    /// Terminal. Every later lifecycle or subscribe call fails with
    /// [`LifecycleError::AlreadyDestroyed`].
    pub fn on_destroy(&self) -> Result<(), LifecycleError> {
        self.transition(LifecycleStage::Destroyed)?;
        self.registry.cancel_all();
        self.signal.close();
        Ok(())
    }

    /// Changes the freeze-on-pause policy.
    ///
    /// Takes effect from the next [`on_pause`](Self::on_pause); it does not
    /// rewrite the current freeze state.
    pub fn set_freeze_on_pause(&self, enabled: bool) -> Result<(), LifecycleError> {
        let mut state = self.state.lock();
        if state.stage == LifecycleStage::Destroyed {
            return Err(LifecycleError::AlreadyDestroyed);
        }
        state.freeze_on_pause = enabled;
        Ok(())
    }

    /// Subscribes an observer to a stream gated on this screen's freeze
    /// signal.
    ///
    /// The stream is wrapped with the [`freeze`](FreezeExt::freeze) operator
    /// and pumped by a spawned driver task: values go to the observer's value
    /// callback, a terminal error or completion to the matching terminal
    /// callback. The subscription is registered for bulk cancellation at
    /// [`on_destroy`](Self::on_destroy) and discharges itself when the
    /// stream ends on its own.
    ///
    /// # Errors
    ///
    /// Fails with [`LifecycleError::AlreadyDestroyed`] after destruction.
    pub fn subscribe<S, T>(
        &self,
        stream: S,
        observer: Observer<T>,
    ) -> Result<SubscriptionHandle, LifecycleError>
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.ensure_alive()?;
        let gated = stream.freeze(self.signal.observe()?);
        self.spawn_driver(gated, observer)
    }

    /// Like [`subscribe`](Self::subscribe), with a collapse predicate
    /// bounding the freeze buffer.
    ///
    /// While frozen, a new event replaces the most recently buffered one
    /// whenever `collapse(&new, &tail)` returns true.
    pub fn subscribe_with<S, T, P>(
        &self,
        stream: S,
        collapse: P,
        observer: Observer<T>,
    ) -> Result<SubscriptionHandle, LifecycleError>
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
        T: Send + 'static,
        P: FnMut(&T, &T) -> bool + Send + 'static,
    {
        self.ensure_alive()?;
        let gated = stream.freeze_with(self.signal.observe()?, collapse);
        self.spawn_driver(gated, observer)
    }

    /// Subscribes without freeze gating: events reach the observer in every
    /// lifecycle state. The subscription is still registered for bulk
    /// cancellation at destruction.
    pub fn subscribe_direct<S, T>(
        &self,
        stream: S,
        observer: Observer<T>,
    ) -> Result<SubscriptionHandle, LifecycleError>
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.ensure_alive()?;
        self.spawn_driver(stream, observer)
    }

    fn spawn_driver<S, T>(
        &self,
        stream: S,
        mut observer: Observer<T>,
    ) -> Result<SubscriptionHandle, LifecycleError>
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
        T: Send + 'static,
    {
        let handle = SubscriptionHandle::new();
        let key = self.registry.register(handle.clone())?;
        let registry = self.registry.clone();
        let driver_handle = handle.clone();

        tokio::spawn(async move {
            let token = driver_handle.token();
            let mut stream = Box::pin(stream);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!(?key, "subscription cancelled");
                        break;
                    }
                    item = stream.next() => match item {
                        Some(StreamItem::Value(value)) => observer.next(value),
                        Some(StreamItem::Error(error)) => {
                            // Bookkeeping first: terminal callbacks observe a
                            // registry that no longer lists this entry.
                            driver_handle.mark_completed();
                            registry.discharge(key);
                            observer.error(error);
                            break;
                        }
                        None => {
                            driver_handle.mark_completed();
                            registry.discharge(key);
                            observer.complete();
                            break;
                        }
                    }
                }
            }
        });

        Ok(handle)
    }

    /// True once [`on_destroy`](Self::on_destroy) has run.
    pub fn is_destroyed(&self) -> bool {
        self.state.lock().stage == LifecycleStage::Destroyed
    }

    /// Current freeze state of the screen's signal.
    pub fn is_frozen(&self) -> bool {
        self.signal.get()
    }

    /// Last lifecycle stage recorded.
    pub fn stage(&self) -> LifecycleStage {
        self.state.lock().stage
    }

    /// Current freeze-on-pause policy.
    pub fn freeze_on_pause(&self) -> bool {
        self.state.lock().freeze_on_pause
    }

    /// Number of registered subscriptions that have not ended or been
    /// discharged.
    pub fn active_subscriptions(&self) -> usize {
        self.registry.len()
    }
}

impl Default for LifecycleCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
