//! JSON file storage
//!
//! Each collection lives in `{data_dir}/{resource}.json` as one JSON array
//! and is loaded fully into memory at startup. After every mutation the
//! whole array is written back. Writes for one file are serialized, and the
//! file is replaced through a temporary sibling so readers never see a
//! half-written array. A failed write rolls the in-memory change back, so
//! memory never holds records the file does not.

use super::in_memory::{InMemoryDataService, InMemoryDocument};
use crate::core::entity::Entity;
use crate::core::error::{StorageError, WayfarerResult};
use crate::core::service::{DataService, DocumentService};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Path of the data file for a resource
pub fn data_file(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{}.json", name))
}

/// Read and parse a JSON file, or `None` when it does not exist
async fn read_json<V: DeserializeOwned>(path: &Path) -> WayfarerResult<Option<V>> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StorageError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            }
            .into());
        }
    };

    serde_json::from_slice(&raw).map(Some).map_err(|e| {
        StorageError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Serialize `value` and atomically replace the file at `path`
async fn write_json<V: Serialize + ?Sized>(path: &Path, value: &V) -> WayfarerResult<()> {
    let io_error = |e: std::io::Error| StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let body = serde_json::to_vec_pretty(value)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, body).await.map_err(io_error)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_error)?;

    Ok(())
}

/// Collection service persisted as a JSON array file
pub struct JsonFileDataService<T> {
    memory: InMemoryDataService<T>,
    path: PathBuf,
    write_guard: Mutex<()>,
}

impl<T: Entity> JsonFileDataService<T> {
    /// Load `{data_dir}/{resource}.json`
    ///
    /// A missing file starts an empty collection; a file that is not a
    /// valid array of records is an error.
    pub async fn open(data_dir: &Path) -> WayfarerResult<Self> {
        let path = data_file(data_dir, T::resource_name());

        let records: Vec<T> = match read_json(&path).await? {
            Some(records) => records,
            None => {
                tracing::warn!(
                    path = %path.display(),
                    "data file not found, starting with an empty collection"
                );
                Vec::new()
            }
        };

        tracing::info!(
            resource = T::resource_name(),
            count = records.len(),
            "collection loaded"
        );

        Ok(Self {
            memory: InMemoryDataService::with_records(records),
            path,
            write_guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run an in-memory mutation and write the result to disk
    ///
    /// When the write fails the records go back to how they were before
    /// the mutation and the write error is returned.
    async fn commit<R, F>(&self, mutation: F) -> WayfarerResult<R>
    where
        F: Future<Output = WayfarerResult<R>> + Send,
        R: Send,
    {
        let _guard = self.write_guard.lock().await;
        let before = self.memory.snapshot()?;
        let result = mutation.await?;

        let records = self.memory.snapshot()?;
        if let Err(e) = write_json(&self.path, &records).await {
            tracing::error!(path = %self.path.display(), "failed to write data file: {}", e);
            self.memory.restore(before)?;
            return Err(e);
        }
        Ok(result)
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for JsonFileDataService<T> {
    async fn create(&self, entity: T) -> WayfarerResult<T> {
        self.commit(self.memory.create(entity)).await
    }

    async fn get(&self, key: &str) -> WayfarerResult<Option<T>> {
        self.memory.get(key).await
    }

    async fn list(&self) -> WayfarerResult<Vec<T>> {
        self.memory.list().await
    }

    async fn update(&self, id: u64, entity: T) -> WayfarerResult<T> {
        self.commit(self.memory.update(id, entity)).await
    }

    async fn delete(&self, id: u64) -> WayfarerResult<()> {
        self.commit(self.memory.delete(id)).await
    }

    async fn replace_all(&self, entities: Vec<T>) -> WayfarerResult<Vec<T>> {
        self.commit(self.memory.replace_all(entities)).await
    }

    async fn count(&self) -> WayfarerResult<usize> {
        self.memory.count().await
    }
}

/// Single-document service persisted as a JSON object file
pub struct JsonFileDocument<T> {
    memory: InMemoryDocument<T>,
    path: PathBuf,
    write_guard: Mutex<()>,
}

impl<T> JsonFileDocument<T>
where
    T: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Load `{data_dir}/{name}.json`, falling back to `T::default()`
    pub async fn open(data_dir: &Path, name: &'static str) -> WayfarerResult<Self> {
        let path = data_file(data_dir, name);
        let value = read_json(&path).await?.unwrap_or_else(|| {
            tracing::warn!(path = %path.display(), "document not found, using defaults");
            T::default()
        });

        Ok(Self {
            memory: InMemoryDocument::new(name, value),
            path,
            write_guard: Mutex::new(()),
        })
    }
}

#[async_trait]
impl<T> DocumentService<T> for JsonFileDocument<T>
where
    T: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self) -> WayfarerResult<T> {
        self.memory.get().await
    }

    async fn put(&self, document: T) -> WayfarerResult<T> {
        let _guard = self.write_guard.lock().await;
        let before = self.memory.get().await?;
        let stored = self.memory.put(document).await?;
        if let Err(e) = write_json(&self.path, &stored).await {
            tracing::error!(path = %self.path.display(), "failed to write document: {}", e);
            self.memory.put(before).await?;
            return Err(e);
        }
        Ok(stored)
    }
}
