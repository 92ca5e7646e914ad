//! Backend trait for the record store.
//!
//! Any concurrent-safe embedded or remote key-value store can implement this
//! to hold records keyed by id.

use crate::record::Record;
use anyhow::Result;
use async_trait::async_trait;

/// Backend trait for record storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// Each call is one transaction: it either commits completely or returns an
/// error and leaves the stored data unchanged.
#[async_trait]
pub trait RecordBackend: Send + Sync + 'static {
    /// Stores a record under its id, replacing any record with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction cannot commit.
    async fn insert(&self, record: &Record) -> Result<()>;

    /// Returns every stored record in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored value cannot be decoded.
    async fn scan_all(&self) -> Result<Vec<Record>>;

    /// Removes one record.
    ///
    /// Returns `Ok(true)` if it existed, `Ok(false)` if it didn't.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction cannot commit.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Removes all records and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction cannot commit.
    async fn clear(&self) -> Result<usize>;

    /// Number of stored records.
    ///
    /// Default implementation scans; backends may override.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    async fn count(&self) -> Result<usize> {
        Ok(self.scan_all().await?.len())
    }
}
