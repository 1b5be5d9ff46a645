use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::error::{AppError, Result};

pub const DEFECT_DATA_FILE: &str = "defect_data.json";
pub const CREDENTIALS_FILE: &str = "admin_credentials.json";

pub fn ensure_data_dir(data_dir: &Path) -> std::io::Result<PathBuf> {
    ensure_dir(data_dir)?;
    Ok(data_dir.to_path_buf())
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// A single JSON document on disk. Writes go through a temp file and a rename
/// and are serialized by the inner lock.
pub struct JsonFileStore<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|err| {
            AppError::IoError(format!("Failed to read {}: {}", self.path.display(), err))
        })?;
        let value = serde_json::from_str(&content).map_err(|err| {
            AppError::ParseError(format!("Failed to parse {}: {}", self.path.display(), err))
        })?;
        Ok(Some(value))
    }

    pub fn save(&self, value: &T) -> Result<()> {
        let _guard = self.lock()?;
        self.write(value)
    }

    /// Load, modify and save as one step under the write lock. A missing file
    /// starts from `T::default()`. Nothing is written when `apply` fails.
    pub fn update<R>(&self, apply: impl FnOnce(&mut T) -> Result<R>) -> Result<R>
    where
        T: Default,
    {
        let _guard = self.lock()?;
        let mut value = self.load()?.unwrap_or_default();
        let output = apply(&mut value)?;
        self.write(&value)?;
        Ok(output)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| AppError::Internal("Store lock poisoned".to_string()))
    }

    fn write(&self, value: &T) -> Result<()> {
        let serialized = serde_json::to_string_pretty(value).map_err(|err| {
            AppError::Internal(format!("Failed to serialize {}: {}", self.path.display(), err))
        })?;

        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized).map_err(|err| {
            AppError::IoError(format!("Failed to write {}: {}", tmp_path.display(), err))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|err| {
            AppError::IoError(format!("Failed to replace {}: {}", self.path.display(), err))
        })?;

        debug!(path = %self.path.display(), "Saved JSON store");
        Ok(())
    }
}
