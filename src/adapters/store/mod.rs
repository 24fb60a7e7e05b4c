//! JSON document store
//!
//! Implements every persistence and directory port over a single JSON
//! document, either backed by a file or held in memory.

mod directory;
mod document;
mod signatures;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::debug;

pub use document::StoreData;

/// Store holding every record in one JSON document
///
/// Mutations are written back to the file immediately when the store was
/// opened from one. The lock is never held across an `.await`.
#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    data: Mutex<StoreData>,
}

impl JsonStore {
    /// Open a store file, starting empty if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                StoreData::default()
            } else {
                serde_json::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("invalid store file {}: {e}", path.display()))?
            }
        } else {
            debug!("store {} does not exist yet; starting empty", path.display());
            StoreData::default()
        };

        Ok(Self {
            path: Some(path),
            data: Mutex::new(data),
        })
    }

    /// Empty store that is never written to disk
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_data(StoreData::default())
    }

    /// In-memory store seeded with records
    #[must_use]
    pub fn with_data(data: StoreData) -> Self {
        Self {
            path: None,
            data: Mutex::new(data),
        }
    }

    /// Backing file, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of the current document
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn snapshot(&self) -> anyhow::Result<StoreData> {
        Ok(self.lock()?.clone())
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&StoreData) -> T) -> anyhow::Result<T> {
        let data = self.lock()?;
        Ok(f(&data))
    }

    /// Apply a mutation and write it back
    ///
    /// The document is left untouched when the mutation or the file write
    /// fails, so memory never runs ahead of disk.
    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&mut StoreData) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut data = self.lock()?;
        let mut next = data.clone();
        let result = f(&mut next)?;
        self.persist(&next)?;
        *data = next;
        Ok(result)
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, StoreData>> {
        self.data
            .lock()
            .map_err(|_| anyhow::anyhow!("store lock poisoned"))
    }

    fn persist(&self, data: &StoreData) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, content)?;
        fs::rename(&staging, path)?;
        Ok(())
    }
}

/// Current time as stored in records
pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
