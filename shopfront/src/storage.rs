//! Durable key-value storage backed by a single JSON file.
//!
//! All keys live in one flat JSON object. A mutex serializes the
//! load-modify-save cycle so concurrent writers cannot drop each other's
//! keys. A missing file reads as an empty map.

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::pin::Pin;

use tokio::sync::Mutex;

use shopfront_core::environment::{KeyValueStore, StorageError};

/// File-backed [`KeyValueStore`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), guard: Mutex::new(()) }
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|e| StorageError::Read(e.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StorageError::Read(e.to_string())),
        }
    }

    async fn save(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string(map).map_err(|e| StorageError::Write(e.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, StorageError>> + Send + 'a>> {
        Box::pin(async move {
            let _guard = self.guard.lock().await;
            Ok(self.load().await?.remove(key))
        })
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: String,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
        Box::pin(async move {
            let _guard = self.guard.lock().await;
            let mut map = self.load().await?;
            map.insert(key.to_string(), value);
            self.save(&map).await
        })
    }

    fn remove<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
        Box::pin(async move {
            let _guard = self.guard.lock().await;
            let mut map = self.load().await?;
            if map.remove(key).is_some() {
                self.save(&map).await?;
            }
            Ok(())
        })
    }
}
