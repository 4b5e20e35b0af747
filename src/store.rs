//! Key/value slot holding the last analysis payload.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, info};

use crate::error::ResultsError;
use crate::normalize::normalize_bytes;
use crate::types::DisplayModel;

/// Slot the analyser writes its response into.
pub const LAST_ANALYSIS_KEY: &str = "lastAnalysis";

pub trait SessionStore: Send + Sync {
    /// Raw slot contents; they are not assumed to be UTF-8.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// One-shot acquire-then-normalize.
pub fn load_display(store: &dyn SessionStore, key: &str) -> Result<DisplayModel> {
    let raw = store.get(key)?;
    debug!(key, present = raw.is_some(), "loaded stored analysis");
    Ok(normalize_bytes(raw.as_deref()))
}

#[derive(Default)]
pub struct MemoryStore { slots: RwLock<HashMap<String, Vec<u8>>> }

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let slots = self.slots.read().map_err(|_| ResultsError::Poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| ResultsError::Poisoned)?;
        slots.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| ResultsError::Poisoned)?;
        slots.remove(key);
        Ok(())
    }
}

/// Stores each slot as `<dir>/<key>.json`.
pub struct DirStore { dir: PathBuf }

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ResultsError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ResultsError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ResultsError::Storage(e).into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(ResultsError::Storage)?;
        fs::write(&path, value).map_err(ResultsError::Storage)?;
        info!(path = %path.display(), bytes = value.len(), "stored analysis");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ResultsError::Storage(e).into()),
        }
    }
}
