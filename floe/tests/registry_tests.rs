// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use floe::{RegistryError, SubscriptionHandle, SubscriptionRegistry};

#[test]
fn test_register_returns_distinct_keys() -> anyhow::Result<()> {
    // Arrange
    let registry = SubscriptionRegistry::new();

    // Act
    let first = registry.register(SubscriptionHandle::new())?;
    let second = registry.register(SubscriptionHandle::new())?;

    // Assert
    assert_ne!(first, second);
    assert_eq!(registry.len(), 2);

    Ok(())
}

#[test]
fn test_discharge_removes_without_cancelling() -> anyhow::Result<()> {
    // Arrange
    let registry = SubscriptionRegistry::new();
    let handle = SubscriptionHandle::new();
    let key = registry.register(handle.clone())?;

    // Act
    registry.discharge(key);

    // Assert
    assert!(registry.is_empty());
    assert!(!handle.is_cancelled(), "discharge must not cancel the handle");

    Ok(())
}

#[test]
fn test_discharge_unknown_key_is_silent() -> anyhow::Result<()> {
    // Arrange
    let registry = SubscriptionRegistry::new();
    let key = registry.register(SubscriptionHandle::new())?;
    registry.discharge(key);

    // Act & Assert: a second discharge of the same key is a no-op
    registry.discharge(key);
    assert!(registry.is_empty());

    Ok(())
}

#[test]
fn test_cancel_all_cancels_every_handle_and_seals() -> anyhow::Result<()> {
    // Arrange
    let registry = SubscriptionRegistry::new();
    let handles: Vec<SubscriptionHandle> =
        (0..3).map(|_| SubscriptionHandle::new()).collect();
    for handle in &handles {
        registry.register(handle.clone())?;
    }

    // Act
    registry.cancel_all();

    // Assert
    for handle in &handles {
        assert!(handle.is_cancelled());
    }
    assert!(registry.is_empty());
    assert!(registry.is_finalized());

    Ok(())
}

#[test]
fn test_cancel_all_is_idempotent() -> anyhow::Result<()> {
    // Arrange
    let registry = SubscriptionRegistry::new();
    registry.register(SubscriptionHandle::new())?;
    registry.cancel_all();

    // Act & Assert: the second call finds the registry drained
    registry.cancel_all();
    assert!(registry.is_finalized());
    assert!(registry.is_empty());

    Ok(())
}

#[test]
fn test_register_after_finalize_is_rejected() {
    // Arrange
    let registry = SubscriptionRegistry::new();
    registry.cancel_all();

    // Act
    let result = registry.register(SubscriptionHandle::new());

    // Assert
    assert_eq!(result, Err(RegistryError::Finalized));
    assert!(registry.is_empty());
}

#[test]
fn test_discharge_after_finalize_is_tolerated() -> anyhow::Result<()> {
    // Arrange
    let registry = SubscriptionRegistry::new();
    let key = registry.register(SubscriptionHandle::new())?;

    // Act: finalize, then a late discharge from a straggling driver
    registry.cancel_all();
    registry.discharge(key);

    // Assert
    assert!(registry.is_empty());

    Ok(())
}

#[test]
fn test_handle_cancel_is_idempotent() {
    // Arrange
    let handle = SubscriptionHandle::new();

    // Act
    handle.cancel();
    handle.cancel();

    // Assert
    assert!(handle.is_cancelled());
    assert!(handle.is_disposed());
    assert!(!handle.is_completed());
}

#[test]
fn test_fresh_handle_is_active() {
    let handle = SubscriptionHandle::new();

    assert!(!handle.is_cancelled());
    assert!(!handle.is_completed());
    assert!(!handle.is_disposed());
}

#[test]
fn test_clones_share_cancellation_state() {
    // Arrange
    let handle = SubscriptionHandle::new();
    let clone = handle.clone();

    // Act
    clone.cancel();

    // Assert
    assert!(handle.is_cancelled());
}
