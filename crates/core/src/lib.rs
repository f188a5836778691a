// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fx-core: coordination core for the fx focus relay
//!
//! This crate provides:
//! - Domain types: focus targets and pending operations
//! - The `KvStore` contract the coordination core runs against
//! - `LockStore` and `PendingQueue`, the two durable primitives
//! - `RequestGate` (inline fast path) and `Drainer` (deferred retry loop)
//! - The `StatusClient` seam for the exclusive upstream session

pub mod client;
pub mod drainer;
pub mod gate;
pub mod id;
pub mod kv;
pub mod lock;
pub mod op;
pub mod queue;
pub mod target;

// Re-exports
pub use client::{StatusClient, StatusError};
pub use drainer::{DrainReport, Drainer, DrainerConfig};
pub use gate::{GateError, GateOutcome, RequestGate};
pub use id::{IdGen, MonotonicIdGen, SequentialIdGen};
pub use kv::{KvError, KvStore};
pub use lock::{LockStore, LockWatch};
pub use op::PendingOperation;
pub use queue::PendingQueue;
pub use target::{FocusTarget, UnknownTarget};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use client::{FakeStatusClient, StatusCall};
#[cfg(any(test, feature = "test-support"))]
pub use kv::MemoryKvStore;
