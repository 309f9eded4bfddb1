// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use floe_core::{FloeError, StreamItem};

#[test]
fn test_stream_item_value_creation() {
    let item: StreamItem<i32> = StreamItem::Value(42);
    assert!(item.is_value());
    assert!(!item.is_error());
}

#[test]
fn test_stream_item_error_creation() {
    let item: StreamItem<i32> = StreamItem::Error(FloeError::stream("test error"));
    assert!(!item.is_value());
    assert!(item.is_error());
}

#[test]
fn test_stream_item_ok_extracts_value() {
    let item = StreamItem::Value(42);
    assert_eq!(item.ok(), Some(42));
}

#[test]
fn test_stream_item_ok_discards_error() {
    let item: StreamItem<i32> = StreamItem::Error(FloeError::stream("test"));
    assert_eq!(item.ok(), None);
}

#[test]
fn test_stream_item_err_extracts_error() {
    let error = FloeError::stream("test error");
    let item: StreamItem<i32> = StreamItem::Error(error.clone());

    let extracted = item.err();
    assert!(extracted.is_some());
}

#[test]
fn test_stream_item_err_discards_value() {
    let item = StreamItem::Value(42);
    assert!(item.err().is_none());
}

#[test]
fn test_stream_item_err_preserves_error_message() {
    let item: StreamItem<i32> = StreamItem::Error(FloeError::stream("device unplugged"));
    let error = item.err().expect("expected an error");
    assert_eq!(
        error.to_string(),
        "stream processing error: device unplugged"
    );
}

#[test]
fn test_stream_item_carries_wrapped_source_error() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let item: StreamItem<i32> = StreamItem::Error(FloeError::source(io));
    let error = item.err().expect("expected an error");
    assert_eq!(error.to_string(), "source error: pipe closed");
}

#[test]
fn test_stream_item_map_transforms_value() {
    let item = StreamItem::Value(5);
    let mapped = item.map(|x| x * 2);
    assert_eq!(mapped.ok(), Some(10));
}

#[test]
fn test_stream_item_map_propagates_error() {
    let item: StreamItem<i32> = StreamItem::Error(FloeError::stream("test"));
    let mapped = item.map(|x| x * 2);
    assert!(mapped.is_error());
}

#[test]
fn test_stream_item_map_type_transformation() {
    let item = StreamItem::Value(42);
    let mapped = item.map(|x| x.to_string());
    assert_eq!(mapped.ok(), Some("42".to_string()));
}

#[test]
fn test_stream_item_map_with_closure_capturing() {
    let multiplier = 10;
    let item = StreamItem::Value(5);
    let result = item.map(|x| x * multiplier);

    assert_eq!(result.ok(), Some(50));
}

#[test]
fn test_stream_item_chained_map_operations() {
    let item = StreamItem::Value(5);
    let result = item.map(|x| x * 2).map(|x| x + 3).map(|x| x.to_string());

    assert_eq!(result.ok(), Some("13".to_string()));
}

#[test]
fn test_stream_item_unwrap_returns_value() {
    let item = StreamItem::Value(42);
    assert_eq!(item.unwrap(), 42);
}

#[test]
#[should_panic(expected = "called `StreamItem::unwrap()` on an `Error` value")]
fn test_stream_item_unwrap_panics_on_error() {
    let item: StreamItem<i32> = StreamItem::Error(FloeError::stream("test"));
    let _ = item.unwrap();
}

#[test]
fn test_stream_item_expect_returns_value() {
    let item = StreamItem::Value(42);
    assert_eq!(item.expect("should be a value"), 42);
}

#[test]
#[should_panic(expected = "expected a value")]
fn test_stream_item_expect_panics_with_message() {
    let item: StreamItem<i32> = StreamItem::Error(FloeError::stream("test"));
    let _ = item.expect("expected a value");
}

#[test]
fn test_stream_item_from_result_ok() {
    let result: Result<i32, FloeError> = Ok(42);
    let item: StreamItem<i32> = result.into();
    assert_eq!(item.ok(), Some(42));
}

#[test]
fn test_stream_item_from_result_err() {
    let result: Result<i32, FloeError> = Err(FloeError::stream("test"));
    let item: StreamItem<i32> = result.into();
    assert!(item.is_error());
}

#[test]
fn test_stream_item_into_result_value() {
    let item = StreamItem::Value(42);
    let result: Result<i32, FloeError> = item.into();
    assert_eq!(result.unwrap(), 42);
}

#[test]
fn test_stream_item_into_result_error() {
    let item: StreamItem<i32> = StreamItem::Error(FloeError::stream("test"));
    let result: Result<i32, FloeError> = item.into();
    assert!(result.is_err());
}

#[test]
fn test_stream_item_eq_same_values() {
    let item1 = StreamItem::Value(42);
    let item2 = StreamItem::Value(42);
    assert_eq!(item1, item2);
}

#[test]
fn test_stream_item_eq_different_values() {
    let item1 = StreamItem::Value(42);
    let item2 = StreamItem::Value(43);
    assert_ne!(item1, item2);
}

#[test]
fn test_stream_item_eq_errors_never_equal() {
    let item1: StreamItem<i32> = StreamItem::Error(FloeError::stream("error1"));
    let item2: StreamItem<i32> = StreamItem::Error(FloeError::stream("error1"));
    assert_ne!(item1, item2);
}

#[test]
fn test_stream_item_eq_value_not_equal_error() {
    let item1 = StreamItem::Value(42);
    let item2: StreamItem<i32> = StreamItem::Error(FloeError::stream("test"));
    assert_ne!(item1, item2);
}

#[test]
fn test_stream_item_clone() {
    let item = StreamItem::Value(42);
    let cloned = item.clone();
    assert_eq!(cloned.ok(), Some(42));
}

#[test]
fn test_stream_item_clone_error() {
    let item: StreamItem<i32> = StreamItem::Error(FloeError::stream("test"));
    let cloned = item.clone();
    assert!(cloned.is_error());
}

#[test]
fn test_stream_item_clone_degrades_source_error_to_message() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let item: StreamItem<i32> = StreamItem::Error(FloeError::source(io));
    let cloned = item.clone();

    let error = cloned.err().expect("expected an error");
    assert_eq!(
        error.to_string(),
        "stream processing error: source error: pipe closed"
    );
}

#[test]
fn test_stream_item_debug_format() {
    let value_item = StreamItem::Value(42);
    let debug_str = format!("{:?}", value_item);
    assert!(debug_str.contains("Value"));
    assert!(debug_str.contains("42"));
}

#[test]
fn test_stream_item_error_debug_format() {
    let error_item: StreamItem<i32> = StreamItem::Error(FloeError::stream("test error"));
    let debug_str = format!("{:?}", error_item);
    assert!(debug_str.contains("Error"));
}

#[test]
fn test_stream_item_with_custom_type() {
    #[derive(Debug, Clone, PartialEq)]
    struct CustomData {
        value: String,
        count: usize,
    }

    let data = CustomData {
        value: "test".to_string(),
        count: 42,
    };

    let item = StreamItem::Value(data.clone());
    assert_eq!(item.ok(), Some(data));
}
