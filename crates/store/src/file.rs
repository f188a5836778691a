// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed key-value store
//!
//! One file per key under a root directory. Writes go through a temp file
//! plus rename, so readers in other processes never observe a partial
//! value. Compare-and-swap serializes read-compare-write under an exclusive
//! `fs2` lock on a sidecar file, which holds across processes sharing the
//! same root.

use fs2::FileExt;
use fx_core::kv::{KvError, KvStore};
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const CAS_LOCK_FILE: &str = ".kv.lock";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// File-per-key `KvStore` implementation
#[derive(Clone, Debug)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, KvError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys map directly to file paths, so path traversal must be ruled out
    /// here rather than trusted away.
    fn path_for(&self, key: &str) -> Result<PathBuf, KvError> {
        if key.is_empty()
            || key.starts_with('/')
            || key.ends_with('/')
            || key.split('/').any(|seg| {
                seg.is_empty()
                    || seg == "."
                    || seg == ".."
                    || !seg
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            })
        {
            return Err(KvError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }

    fn write_atomic(&self, path: &Path, value: &[u8]) -> Result<(), KvError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file_name = path
            .file_name()
            .ok_or_else(|| KvError::InvalidKey(path.to_string_lossy().to_string()))?
            .to_string_lossy()
            .to_string();
        let tmp = path.with_file_name(format!(
            ".{}.tmp.{}.{}",
            file_name,
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Take the store-wide CAS lock. Released when the returned file drops.
    fn cas_guard(&self) -> Result<File, KvError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.root.join(CAS_LOCK_FILE))?;
        file.lock_exclusive()?;
        Ok(file)
    }

    fn read_value(path: &Path) -> Result<Option<Vec<u8>>, KvError> {
        match fs::read(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let path = self.path_for(key)?;
        Self::read_value(&path)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        self.write_atomic(&path, value)
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KvError> {
        // Split into directory part and filename prefix
        let (dir_part, name_prefix) = match prefix.rfind('/') {
            Some(pos) => (&prefix[..pos], &prefix[pos + 1..]),
            None => ("", prefix),
        };
        let dir = if dir_part.is_empty() {
            self.root.clone()
        } else {
            self.path_for(dir_part)?
        };
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            // Hidden names cover the CAS lock file and in-flight temp files
            if !name.starts_with(name_prefix) || name.starts_with('.') {
                continue;
            }
            let key = if dir_part.is_empty() {
                name
            } else {
                format!("{}/{}", dir_part, name)
            };
            if let Some(value) = Self::read_value(&entry.path())? {
                entries.push((key, value));
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> Result<bool, KvError> {
        let path = self.path_for(key)?;
        let _guard = self.cas_guard()?;

        let current = Self::read_value(&path)?;
        if current.as_deref() != expected {
            return Ok(false);
        }
        self.write_atomic(&path, value)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
