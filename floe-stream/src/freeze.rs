// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use floe_core::StreamItem;
use futures::Stream;
use pin_project::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::{trace, warn};

/// Extension trait providing the `freeze` and `freeze_with` operators.
///
/// A freeze gate sits between an event stream and its consumer. While the
/// gate is frozen, events accumulate in an internal buffer; when it thaws,
/// the buffer drains in arrival order before any new event is delivered.
pub trait FreezeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Gates this stream on a boolean freeze selector.
    ///
    /// Every emission of `selector` sets the gate state: `true` freezes the
    /// gate, `false` thaws it. The gate keeps consuming the upstream in both
    /// states, so a frozen consumer never exerts backpressure on the
    /// producer.
    ///
    /// # Behavior
    ///
    /// - While live, upstream events pass through unchanged.
    /// - While frozen, upstream events are appended to an internal buffer.
    /// - On thaw, buffered events drain in arrival order before any new
    ///   upstream event is delivered. A refreeze during the drain leaves the
    ///   rest of the buffer in place.
    /// - An upstream error is delivered after everything buffered ahead of
    ///   it, then the gate completes. Upstream completion is likewise
    ///   deferred until the buffer has drained.
    /// - Selector emissions are absorbed before the upstream is polled, so an
    ///   event racing a freeze is classified against the latest known state.
    /// - If the selector completes while the gate is live, the gate degrades
    ///   to a passthrough. If it completes while frozen, nothing can ever
    ///   thaw the gate again, so the gate completes without delivering the
    ///   buffer.
    ///
    /// The gate assumes the live state until the selector's first emission.
    /// Selectors obtained from [`FreezeSignal::observe`] replay the current
    /// value on attach, so a gate created mid-lifecycle starts in the right
    /// state before the first upstream event is classified.
    ///
    /// [`FreezeSignal::observe`]: floe_core::FreezeSignal::observe
    ///
    /// # Arguments
    ///
    /// * `selector` - Stream of freeze states. `true` freezes, `false` thaws.
    ///
    /// # Returns
    ///
    /// A [`Frozen`] stream yielding the gated events.
    ///
    /// # See Also
    ///
    /// - [`freeze_with`](FreezeExt::freeze_with) - Same gate with a collapse
    ///   predicate bounding the buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use floe_core::FreezeSignal;
    /// use floe_stream::FreezeExt;
    /// use floe_test_utils::test_channel;
    /// use futures::StreamExt;
    ///
    /// # async fn example() {
    /// let signal = FreezeSignal::new();
    /// let (sender, events) = test_channel::<i32>();
    /// let mut gated = Box::pin(events.freeze(signal.observe().unwrap()));
    ///
    /// sender.send(1).unwrap();
    /// assert_eq!(gated.next().await.unwrap().unwrap(), 1);
    ///
    /// signal.set(true).unwrap();
    /// sender.send(2).unwrap();
    /// sender.send(3).unwrap();
    ///
    /// // Nothing is delivered while frozen; thawing drains 2 then 3.
    /// signal.set(false).unwrap();
    /// assert_eq!(gated.next().await.unwrap().unwrap(), 2);
    /// assert_eq!(gated.next().await.unwrap().unwrap(), 3);
    /// # }
    /// ```
    fn freeze<G>(self, selector: G) -> Frozen<Self, G, fn(&T, &T) -> bool>
    where
        G: Stream<Item = bool>;

    /// Gates this stream on a freeze selector, collapsing superseded events.
    ///
    /// Identical to [`freeze`](FreezeExt::freeze), except that while the gate
    /// is frozen each new event is checked against the most recently buffered
    /// one. When `collapse(&new, &tail)` returns `true` the tail is replaced
    /// by the new event instead of the buffer growing, which keeps a long
    /// freeze from accumulating stale intermediate states.
    ///
    /// Only the buffer tail is ever considered, so distinct interleaved
    /// events are all retained. The predicate is consulted for value events
    /// only; errors are always appended.
    ///
    /// # Arguments
    ///
    /// * `selector` - Stream of freeze states. `true` freezes, `false` thaws.
    /// * `collapse` - Called with the new event and the buffered tail.
    ///   Returns `true` when the new event supersedes the tail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use floe_core::FreezeSignal;
    /// use floe_stream::FreezeExt;
    /// use floe_test_utils::test_channel;
    /// use futures::StreamExt;
    ///
    /// # async fn example() {
    /// let signal = FreezeSignal::new();
    /// let (sender, updates) = test_channel::<(&str, i32)>();
    /// let mut gated = Box::pin(updates.freeze_with(
    ///     signal.observe().unwrap(),
    ///     |new, tail| new.0 == tail.0,
    /// ));
    ///
    /// signal.set(true).unwrap();
    /// sender.send(("progress", 10)).unwrap();
    /// sender.send(("progress", 60)).unwrap();
    /// sender.send(("progress", 90)).unwrap();
    ///
    /// // Only the latest progress update survives the freeze.
    /// signal.set(false).unwrap();
    /// assert_eq!(gated.next().await.unwrap().unwrap(), ("progress", 90));
    /// # }
    /// ```
    fn freeze_with<G, P>(self, selector: G, collapse: P) -> Frozen<Self, G, P>
    where
        G: Stream<Item = bool>,
        P: FnMut(&T, &T) -> bool;
}

impl<S, T> FreezeExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn freeze<G>(self, selector: G) -> Frozen<Self, G, fn(&T, &T) -> bool>
    where
        G: Stream<Item = bool>,
    {
        Frozen::new(self, selector, None)
    }

    fn freeze_with<G, P>(self, selector: G, collapse: P) -> Frozen<Self, G, P>
    where
        G: Stream<Item = bool>,
        P: FnMut(&T, &T) -> bool,
    {
        Frozen::new(self, selector, Some(collapse))
    }
}

/// Stream returned by [`freeze`](FreezeExt::freeze) and
/// [`freeze_with`](FreezeExt::freeze_with).
#[pin_project]
pub struct Frozen<S, G, P>
where
    S: Stream,
{
    #[pin]
    upstream: S,
    #[pin]
    selector: G,
    collapse: Option<P>,
    buffer: VecDeque<S::Item>,
    frozen: bool,
    selector_done: bool,
    upstream_done: bool,
    done: bool,
}

impl<S, G, P> Frozen<S, G, P>
where
    S: Stream,
{
    fn new(upstream: S, selector: G, collapse: Option<P>) -> Self {
        Self {
            upstream,
            selector,
            collapse,
            buffer: VecDeque::new(),
            frozen: false,
            selector_done: false,
            upstream_done: false,
            done: false,
        }
    }
}

impl<S, G, P, T> Stream for Frozen<S, G, P>
where
    S: Stream<Item = StreamItem<T>>,
    G: Stream<Item = bool>,
    P: FnMut(&T, &T) -> bool,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        loop {
            // 1. Absorb every selector emission that is already pending so
            //    upstream events are classified against the latest state.
            while !*this.selector_done {
                match this.selector.as_mut().poll_next(cx) {
                    Poll::Ready(Some(frozen)) => {
                        if frozen != *this.frozen {
                            trace!(frozen, buffered = this.buffer.len(), "freeze state flipped");
                        }
                        *this.frozen = frozen;
                    }
                    Poll::Ready(None) => {
                        *this.selector_done = true;
                    }
                    Poll::Pending => break,
                }
            }

            // 2. A finished selector can never thaw the gate again, so
            //    remaining frozen would strand the buffer forever.
            if *this.frozen && *this.selector_done {
                if !this.buffer.is_empty() {
                    warn!(
                        discarded = this.buffer.len(),
                        "freeze selector ended while frozen, completing gate"
                    );
                }
                *this.done = true;
                return Poll::Ready(None);
            }

            // 3. While live, the buffer drains in arrival order before the
            //    upstream is polled for anything new.
            if !*this.frozen {
                if let Some(item) = this.buffer.pop_front() {
                    if item.is_error() {
                        // A buffered error ends the stream once everything
                        // ahead of it has been delivered.
                        *this.done = true;
                    }
                    return Poll::Ready(Some(item));
                }
                if *this.upstream_done {
                    *this.done = true;
                    return Poll::Ready(None);
                }
            }

            // 4. Pull from the upstream. While frozen the loop keeps pulling
            //    so the producer never sees backpressure from a frozen
            //    consumer.
            if *this.upstream_done {
                // Frozen over a finished upstream: only a thaw can make
                // progress. Step 1 left the selector waker registered.
                return Poll::Pending;
            }
            match this.upstream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if *this.frozen {
                        let terminal = item.is_error();
                        buffer_item(this.buffer, this.collapse.as_mut(), item);
                        if terminal {
                            *this.upstream_done = true;
                        }
                        continue;
                    }
                    if item.is_error() {
                        *this.upstream_done = true;
                        *this.done = true;
                    }
                    return Poll::Ready(Some(item));
                }
                Poll::Ready(None) => {
                    *this.upstream_done = true;
                    if !*this.frozen {
                        *this.done = true;
                        return Poll::Ready(None);
                    }
                    // Frozen: completion is deferred behind the buffer.
                }
                Poll::Pending => {
                    return Poll::Pending;
                }
            }
        }
    }
}

/// Appends `item` to the buffer, replacing the tail when the collapse
/// predicate reports the tail as superseded.
fn buffer_item<T, P>(
    buffer: &mut VecDeque<StreamItem<T>>,
    collapse: Option<&mut P>,
    item: StreamItem<T>,
) where
    P: FnMut(&T, &T) -> bool,
{
    if let (Some(predicate), StreamItem::Value(incoming)) = (collapse, &item) {
        if let Some(StreamItem::Value(tail)) = buffer.back() {
            if predicate(incoming, tail) {
                trace!("collapsing superseded buffered event");
                if let Some(slot) = buffer.back_mut() {
                    *slot = item;
                }
                return;
            }
        }
    }
    buffer.push_back(item);
}
