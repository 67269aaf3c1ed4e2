//! # JSON-file backed fallback store
//!
//! [`FileStore`] is a [`Backend`] that persists each collection as a JSON file
//! in a data directory. It is the store the site keeps serving from when the
//! document store is unreachable, and the source the migration copies from.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── links.json      # [Link, ...]
//! ├── notes.json      # [Note, ...]
//! ├── learning.json   # [LearningItem, ...]
//! └── profile.json    # Profile
//! ```
//!
//! A missing file reads as an empty collection. Every write rewrites the whole
//! file through a temporary sibling and a rename, so readers never observe a
//! half-written file. Read-modify-write cycles are serialized by an async
//! mutex; separate processes writing the same directory are not coordinated.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::backend::Backend;
use crate::error::StoreError;
use crate::models::{Record, Singleton};

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base.join(format!("{collection}.json"))
    }

    async fn read_json<V: DeserializeOwned>(&self, path: &Path) -> Result<Option<V>, StoreError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_json<V: Serialize>(&self, path: &Path, value: &V) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.base).await?;
        let bytes = serde_json::to_vec_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    async fn read_rows<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let path = self.collection_path(T::COLLECTION);
        Ok(self.read_json(&path).await?.unwrap_or_default())
    }

    async fn write_rows<T: Record>(&self, rows: &[T]) -> Result<(), StoreError> {
        let path = self.collection_path(T::COLLECTION);
        self.write_json(&path, &rows).await
    }
}

impl Backend for FileStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        self.read_rows().await
    }

    async fn get<T: Record>(&self, id: &str) -> Result<Option<T>, StoreError> {
        let rows: Vec<T> = self.read_rows().await?;
        Ok(rows.into_iter().find(|row| row.id() == id))
    }

    async fn insert<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut rows: Vec<T> = self.read_rows().await?;
        if rows.iter().any(|row| row.id() == record.id()) {
            return Err(StoreError::Conflict {
                collection: T::COLLECTION,
                id: record.id().to_string(),
            });
        }
        rows.push(record.clone());
        self.write_rows(&rows).await
    }

    async fn replace<T: Record>(&self, record: &T) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut rows: Vec<T> = self.read_rows().await?;
        let Some(slot) = rows.iter_mut().find(|row| row.id() == record.id()) else {
            return Ok(false);
        };
        *slot = record.clone();
        self.write_rows(&rows).await?;
        Ok(true)
    }

    async fn remove<T: Record>(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut rows: Vec<T> = self.read_rows().await?;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Ok(false);
        }
        self.write_rows(&rows).await?;
        Ok(true)
    }

    async fn load<T: Singleton>(&self) -> Result<Option<T>, StoreError> {
        self.read_json(&self.collection_path(T::COLLECTION)).await
    }

    async fn save<T: Singleton>(&self, value: &T) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_json(&self.collection_path(T::COLLECTION), value)
            .await
    }
}
