// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use floe_core::{FloeError, FreezeSignal};
use floe_stream::FreezeExt;
use floe_test_utils::{
    assert_no_element_emitted, expect_completed, expect_error, expect_next_value, test_channel,
    ErrorInjectingStream,
};
use futures::stream;

#[tokio::test]
async fn test_error_passes_through_live_and_terminates_gate() -> anyhow::Result<()> {
    // Arrange
    let signal = FreezeSignal::new();
    let (sender, events) = test_channel();
    let mut gated = Box::pin(events.freeze(signal.observe()?));

    // Act
    sender.send(1)?;
    sender.error(FloeError::stream("upstream failed"))?;
    sender.send(2)?;

    // Assert: the error terminates the gate; later events are never seen
    expect_next_value(&mut gated, 1).await;
    expect_error(&mut gated).await;
    expect_completed(&mut gated).await;

    Ok(())
}

#[tokio::test]
async fn test_error_while_frozen_is_delivered_after_buffer() -> anyhow::Result<()> {
    // Arrange
    let signal = FreezeSignal::new();
    let (sender, events) = test_channel();
    let mut gated = Box::pin(events.freeze(signal.observe()?));

    // Act: values then an error, all under freeze
    signal.set(true)?;
    sender.send(1)?;
    sender.send(2)?;
    sender.error(FloeError::stream("upstream failed"))?;

    // Assert: the error waits behind the buffer
    assert_no_element_emitted(&mut gated, 100).await;

    signal.set(false)?;
    expect_next_value(&mut gated, 1).await;
    expect_next_value(&mut gated, 2).await;
    expect_error(&mut gated).await;
    expect_completed(&mut gated).await;

    Ok(())
}

#[tokio::test]
async fn test_error_first_while_frozen_terminates_on_thaw() -> anyhow::Result<()> {
    // Arrange
    let signal = FreezeSignal::new();
    let (sender, events) = test_channel::<i32>();
    let mut gated = Box::pin(events.freeze(signal.observe()?));

    // Act
    signal.set(true)?;
    sender.error(FloeError::stream("upstream failed"))?;
    assert_no_element_emitted(&mut gated, 100).await;
    signal.set(false)?;

    // Assert
    expect_error(&mut gated).await;
    expect_completed(&mut gated).await;

    Ok(())
}

#[tokio::test]
async fn test_error_is_never_collapsed() -> anyhow::Result<()> {
    // Arrange: a collapse predicate that would replace any tail
    let signal = FreezeSignal::new();
    let (sender, events) = test_channel();
    let mut gated = Box::pin(events.freeze_with(signal.observe()?, |_new, _tail| true));

    // Act
    signal.set(true)?;
    sender.send(1)?;
    sender.send(2)?;
    sender.error(FloeError::stream("upstream failed"))?;
    assert_no_element_emitted(&mut gated, 100).await;
    signal.set(false)?;

    // Assert: values collapsed to the latest, the error kept intact
    expect_next_value(&mut gated, 2).await;
    expect_error(&mut gated).await;
    expect_completed(&mut gated).await;

    Ok(())
}

#[tokio::test]
async fn test_gate_over_error_injecting_stream() -> anyhow::Result<()> {
    // Arrange: error injected after the first value
    let signal = FreezeSignal::new();
    let events = ErrorInjectingStream::new(stream::iter(vec![1, 2, 3]), 1);
    let mut gated = Box::pin(events.freeze(signal.observe()?));

    // Act & Assert
    expect_next_value(&mut gated, 1).await;
    expect_error(&mut gated).await;
    expect_completed(&mut gated).await;

    Ok(())
}
