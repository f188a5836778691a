// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key-value store contract
//!
//! The coordination core owns no storage of its own; it runs against any
//! store that offers atomic writes and compare-and-swap. The store is
//! assumed safe for concurrent access from multiple processes - that is the
//! store's contract, not re-implemented here.

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum KvError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A durable key-value store with atomic writes and compare-and-swap.
///
/// `compare_and_swap` is the primitive that makes lock acquisition race-free;
/// an implementation without it cannot back this core.
pub trait KvStore: Send + Sync + 'static {
    /// Read a key. Absent keys are `None`, not an error.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Write a key atomically; never partially applied.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), KvError>;

    /// Enumerate all entries under a prefix, sorted by key.
    fn list(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KvError>;

    /// Write `value` only if the current value equals `expected`
    /// (`None` = key absent). Returns whether the swap applied.
    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<bool, KvError>;
}

/// In-memory store for testing
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryKvStore;

#[cfg(any(test, feature = "test-support"))]
mod memory {
    use super::{KvError, KvStore};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    /// In-memory `KvStore` backed by a `BTreeMap`, so `list` enumeration
    /// order matches key order for free.
    #[derive(Clone, Default)]
    pub struct MemoryKvStore {
        entries: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
        fail_next: Arc<Mutex<bool>>,
        fail_next_delete: Arc<Mutex<bool>>,
    }

    impl MemoryKvStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make the next store operation fail, to exercise error paths.
        pub fn fail_next_op(&self) {
            *self.fail_next.lock().unwrap_or_else(|e| e.into_inner()) = true;
        }

        /// Make the next delete fail, leaving earlier operations untouched.
        /// Models a store blip that hits mid-batch rather than up front.
        pub fn fail_next_delete(&self) {
            *self
                .fail_next_delete
                .lock()
                .unwrap_or_else(|e| e.into_inner()) = true;
        }

        fn check_failure(&self) -> Result<(), KvError> {
            let mut fail = self.fail_next.lock().unwrap_or_else(|e| e.into_inner());
            if *fail {
                *fail = false;
                return Err(KvError::Unavailable("injected failure".to_string()));
            }
            Ok(())
        }
    }

    impl KvStore for MemoryKvStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
            self.check_failure()?;
            let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            Ok(entries.get(key).cloned())
        }

        fn put(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
            self.check_failure()?;
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.insert(key.to_string(), value.to_vec());
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<(), KvError> {
            self.check_failure()?;
            {
                let mut fail = self
                    .fail_next_delete
                    .lock()
                    .unwrap_or_else(|e| e.into_inner());
                if *fail {
                    *fail = false;
                    return Err(KvError::Unavailable("injected delete failure".to_string()));
                }
            }
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.remove(key);
            Ok(())
        }

        fn list(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KvError> {
            self.check_failure()?;
            let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            Ok(entries
                .range(prefix.to_string()..)
                .take_while(|(k, _)| k.starts_with(prefix))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect())
        }

        fn compare_and_swap(
            &self,
            key: &str,
            expected: Option<&[u8]>,
            value: &[u8],
        ) -> Result<bool, KvError> {
            self.check_failure()?;
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            let current = entries.get(key).map(|v| v.as_slice());
            if current != expected {
                return Ok(false);
            }
            entries.insert(key.to_string(), value.to_vec());
            Ok(true)
        }
    }
}
