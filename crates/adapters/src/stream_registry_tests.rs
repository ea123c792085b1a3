// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn get_source_is_get_or_create() {
    let registry = Arc::new(StreamRegistry::new());
    let a = registry.get_source("operations/op-1/stdout");
    let b = registry.get_source("operations/op-1/stdout");
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(registry.len(), 1);
}

#[test]
fn append_accumulates_and_committed_size_tracks_it() {
    let registry = Arc::new(StreamRegistry::new());
    let source = registry.get_source("s");
    source.append(b"hello ");
    source.append(b"world");
    assert_eq!(source.committed_size(), 11);
    assert_eq!(source.output_stream(0), b"hello world");
}

#[test]
fn output_stream_skips_to_offset() {
    let registry = Arc::new(StreamRegistry::new());
    let source = registry.get_source("s");
    source.append(b"0123456789");
    assert_eq!(source.output_stream(5), b"56789");
    assert_eq!(source.output_stream(100), Vec::<u8>::new());
}

#[test]
fn reset_drops_the_entry_without_closing() {
    let registry = Arc::new(StreamRegistry::new());
    let source = registry.get_source("s");
    registry.reset("s");
    assert!(registry.is_empty());
    assert!(!source.is_closed());
}

#[test]
fn close_removes_itself_from_the_registry() {
    let registry = Arc::new(StreamRegistry::new());
    let source = registry.get_source("s");
    source.close();
    assert!(registry.is_empty());
    assert!(source.is_closed());
}

#[test]
fn append_after_close_is_a_no_op() {
    let registry = Arc::new(StreamRegistry::new());
    let source = registry.get_source("s");
    source.append(b"before");
    source.close();
    source.append(b"after");
    assert_eq!(source.output_stream(0), b"before");
}

#[tokio::test]
async fn closed_future_resolves_once_closed() {
    let registry = Arc::new(StreamRegistry::new());
    let source = registry.get_source("s");
    let waiter = source.clone();
    let handle = tokio::spawn(async move {
        tokio::time::timeout(Duration::from_secs(1), waiter.closed_future())
            .await
            .expect("closed_future should resolve")
    });
    tokio::task::yield_now().await;
    source.close();
    handle.await.unwrap();
}

#[tokio::test]
async fn closed_future_on_already_closed_source_resolves_immediately() {
    let registry = Arc::new(StreamRegistry::new());
    let source = registry.get_source("s");
    source.close();
    tokio::time::timeout(Duration::from_millis(50), source.closed_future())
        .await
        .expect("should resolve immediately");
}
