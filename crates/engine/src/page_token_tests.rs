// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use remex_core::test_support::{any_command, queued_operation};

fn snapshot(seeds: &[&str]) -> Vec<OperationEntry> {
    let mut entries: Vec<OperationEntry> = seeds
        .iter()
        .map(|s| OperationEntry {
            operation: queued_operation(s),
            required_platform: any_command().platform,
        })
        .collect();
    entries.sort_by(|a, b| a.operation.name.cmp(&b.operation.name));
    entries
}

#[test]
fn empty_token_starts_from_the_beginning() {
    let snap = snapshot(&["a", "b", "c"]);
    let page = list_page(&snap, "", 2).unwrap();
    assert_eq!(page.operations.len(), 2);
    assert!(!page.next_page_token.is_empty());
}

#[test]
fn pages_concatenate_to_cover_everything_without_duplicates() {
    let snap = snapshot(&["a", "b", "c", "d", "e"]);
    let mut seen = Vec::new();
    let mut token = String::new();
    loop {
        let page = list_page(&snap, &token, 2).unwrap();
        seen.extend(page.operations.iter().map(|o| o.name.clone()));
        if page.next_page_token.is_empty() {
            break;
        }
        token = page.next_page_token;
    }
    let mut expected: Vec<_> = snap.iter().map(|e| e.operation.name.clone()).collect();
    expected.sort();
    let mut seen_sorted = seen.clone();
    seen_sorted.sort();
    assert_eq!(seen_sorted, expected);
    assert_eq!(seen.len(), snap.len());
}

#[test]
fn exhausted_iteration_returns_empty_token() {
    let snap = snapshot(&["a"]);
    let page = list_page(&snap, "", 10).unwrap();
    assert_eq!(page.operations.len(), 1);
    assert_eq!(page.next_page_token, "");
}

#[test]
fn malformed_token_raises_argument_error() {
    let snap = snapshot(&["a"]);
    let result = list_page(&snap, "not valid base64!!", 10);
    assert!(result.is_err());
}

#[test]
fn token_naming_a_since_removed_operation_resumes_after_its_sort_position() {
    let full = snapshot(&["a", "b", "c"]);
    let token = encode_token(&full[0].operation.name); // "a"
    // "a" has since been archived/removed from the live set.
    let without_a = snapshot(&["b", "c"]);
    let page = list_page(&without_a, &token, 10).unwrap();
    assert_eq!(page.operations.len(), 2);
}
