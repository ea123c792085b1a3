// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stable, cursored iteration over the in-flight operation set, keyed
//! by name in key order.
//!
//! Tokens are base64-encoded opaque records carrying the last-returned
//! operation's name. A malformed token raises [`PageTokenError`].

use crate::error::PageTokenError;
use crate::operations_map::OperationEntry;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use remex_core::{Operation, OperationName};

/// Encodes the cursor after `name` (i.e. the next page resumes after it).
pub fn encode_token(name: &OperationName) -> String {
    BASE64.encode(name.as_str())
}

fn decode_token(token: &str) -> Result<OperationName, PageTokenError> {
    let bytes = BASE64
        .decode(token)
        .map_err(|e| PageTokenError::Malformed(e.to_string()))?;
    let s = String::from_utf8(bytes).map_err(|e| PageTokenError::Malformed(e.to_string()))?;
    Ok(OperationName::new(s))
}

/// A single page of operations plus the token for the next one. An empty
/// `next_page_token` means iteration is exhausted.
pub struct Page {
    pub operations: Vec<Operation>,
    pub next_page_token: String,
}

/// Walks `snapshot` (assumed already in key order, as `OperationsMap`
/// guarantees) starting after `page_token`'s named operation, exclusive,
/// yielding up to `page_size` entries.
pub fn list_page(
    snapshot: &[OperationEntry],
    page_token: &str,
    page_size: usize,
) -> Result<Page, PageTokenError> {
    let start = if page_token.is_empty() {
        0
    } else {
        let after = decode_token(page_token)?;
        match snapshot.iter().position(|e| e.operation.name == after) {
            Some(idx) => idx + 1,
            // The named operation is no longer present (it may have
            // completed and been archived between pages); resume from
            // the first entry that would sort after it.
            None => snapshot
                .iter()
                .position(|e| e.operation.name > after)
                .unwrap_or(snapshot.len()),
        }
    };

    let end = (start + page_size).min(snapshot.len());
    let operations: Vec<Operation> = snapshot[start..end].iter().map(|e| e.operation.clone()).collect();
    let next_page_token = if end < snapshot.len() {
        encode_token(&snapshot[end - 1].operation.name)
    } else {
        String::new()
    };
    Ok(Page {
        operations,
        next_page_token,
    })
}

#[cfg(test)]
#[path = "page_token_tests.rs"]
mod tests;
