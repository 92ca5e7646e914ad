//! High-level `RecordStore` wrapper over backend implementations.

use super::backend::RecordBackend;
use super::memory::MemoryBackend;
use super::redb::RedbBackend;
use crate::error::{Error, Result};
use crate::record::Record;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Record store interface used by the capture flow and the exporter.
///
/// Wraps a [`RecordBackend`] and maps every backend failure to
/// [`Error::Persistence`]. Failed transactions are surfaced, never retried;
/// since `insert` is an upsert the caller may simply retry it.
///
/// `RecordStore` is `Clone` and can be shared across tasks.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn RecordBackend>,
}

impl RecordStore {
    /// Opens a store backed by a redb database file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the database cannot be opened or created.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = RedbBackend::open(path)?;
        Ok(Self::custom(backend))
    }

    /// Creates a store backed by memory only.
    pub fn memory() -> Self {
        Self::custom(MemoryBackend::new())
    }

    /// Creates a store with a custom backend.
    pub fn custom<B: RecordBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Persists a record, replacing any record with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the transaction cannot commit.
    pub async fn insert(&self, record: &Record) -> Result<()> {
        self.backend
            .insert(record)
            .await
            .map_err(Error::Persistence)?;
        debug!(id = %record.id, has_photo = record.photo.is_some(), "Stored record");
        Ok(())
    }

    /// Returns every record, unordered. Callers sort if order matters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] on read failure.
    pub async fn scan_all(&self) -> Result<Vec<Record>> {
        let records = self.backend.scan_all().await.map_err(Error::Persistence)?;
        debug!(count = records.len(), "Scanned records");
        Ok(records)
    }

    /// Removes one record. Deleting an absent id is not an error.
    ///
    /// Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the transaction cannot commit.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let removed = self.backend.delete(id).await.map_err(Error::Persistence)?;
        debug!(id, removed, "Delete record");
        Ok(removed)
    }

    /// Removes all records. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the transaction cannot commit.
    pub async fn clear(&self) -> Result<usize> {
        let removed = self.backend.clear().await.map_err(Error::Persistence)?;
        info!(removed, "Cleared record store");
        Ok(removed)
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] on read failure.
    pub async fn count(&self) -> Result<usize> {
        self.backend.count().await.map_err(Error::Persistence)
    }
}
