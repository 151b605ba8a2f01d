use crate::errors::ClientError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;

/// Key-value store persisted as a single JSON object on disk.
pub struct LocalStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl LocalStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn save<T: Serialize>(&mut self, key: &str, data: &T) -> bool {
        match self.try_save(key, data).await {
            Ok(()) => true,
            Err(err) => {
                error!(key, "error saving to local store: {err}");
                false
            }
        }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(value) = self.entries.get(key) else {
            return default;
        };
        match serde_json::from_value(value.clone()) {
            Ok(data) => data,
            Err(err) => {
                error!(key, "error loading from local store: {err}");
                default
            }
        }
    }

    pub async fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_none() {
            return false;
        }
        match persist_entries(&self.path, &self.entries).await {
            Ok(()) => true,
            Err(err) => {
                error!(key, "error persisting local store: {err}");
                false
            }
        }
    }

    async fn try_save<T: Serialize>(&mut self, key: &str, data: &T) -> Result<(), ClientError> {
        let value = serde_json::to_value(data)?;
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(err) = persist_entries(&self.path, &self.entries).await {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }
}

async fn load_entries(path: &Path) -> Map<String, Value> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse local store: {err}");
                Map::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(err) => {
            error!("failed to read local store: {err}");
            Map::new()
        }
    }
}

async fn persist_entries(path: &Path, entries: &Map<String, Value>) -> Result<(), ClientError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(entries)?;
    fs::write(path, payload).await?;
    Ok(())
}
