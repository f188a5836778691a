// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID generation abstractions
//!
//! Queue entries are keyed by their id, so ids must sort in creation order:
//! the store's native enumeration is the only ordering guarantee the queue
//! offers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates unique identifiers
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// Production generator: millisecond timestamp, per-process counter, and a
/// short random suffix. Lexicographic order of the output matches creation
/// order within a process; the suffix keeps concurrent processes from
/// colliding.
#[derive(Clone)]
pub struct MonotonicIdGen {
    counter: Arc<AtomicU64>,
}

impl MonotonicIdGen {
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for MonotonicIdGen {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGen for MonotonicIdGen {
    fn next(&self) -> String {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let seq = self.counter.fetch_add(1, Ordering::SeqCst);
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{:015}-{:06}-{}", millis, seq % 1_000_000, &suffix[..8])
    }
}

/// Sequential ID generator for testing
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("op")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{:06}", self.prefix, n)
    }
}
