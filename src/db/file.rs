// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed key-value store.
//!
//! The whole store is one JSON object mapping keys to string values. Every
//! write rewrites the file through a temporary sibling and a rename, so a
//! reader never sees a partially written collection.

use crate::db::KeyValueStore;
use crate::error::{AppError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

/// Key-value store persisted to a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`. The file is created on first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        tracing::debug!(path = %path.display(), "Opened file store");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn read_entries(&self) -> Result<Entries> {
        let Some(raw) = self.read_raw()? else {
            return Ok(Entries::new());
        };
        serde_json::from_str(&raw).map_err(|e| {
            AppError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Entries to build the next write on, and whether the file must be
    /// rewritten regardless. Unparsable content counts as an empty store.
    fn entries_for_write(&self) -> Result<(Entries, bool)> {
        let Some(raw) = self.read_raw()? else {
            return Ok((Entries::new(), false));
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok((entries, false)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Overwriting unreadable store file"
                );
                Ok((Entries::new(), true))
            }
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialize store: {}", e)))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let (mut entries, _) = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let (mut entries, unreadable) = self.entries_for_write()?;
        if entries.remove(key).is_some() || unreadable {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}
