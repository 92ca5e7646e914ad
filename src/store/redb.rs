//! Redb-backed record storage backend.
//!
//! Each record is one JSON value keyed by id, so the photo payload and the
//! scalar fields commit in the same transaction.

use super::backend::RecordBackend;
use crate::record::Record;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Table holding serialized records keyed by id.
pub(crate) const RECORDS_TABLE: TableDefinition<'static, &'static str, &'static [u8]> =
    TableDefinition::new("records");

/// Redb-backed record backend.
///
/// `RedbBackend` is `Clone` and can be shared across threads. A scan runs in a
/// single read transaction and therefore sees one consistent snapshot even
/// while inserts commit concurrently.
#[derive(Clone)]
pub struct RedbBackend {
    pub(super) db: Arc<Database>,
}

impl RedbBackend {
    /// Opens or creates a redb database at the given path.
    ///
    /// Creates parent directories if needed and makes sure the records table
    /// exists so the first scan does not fail.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory cannot be created
    /// - Database file cannot be opened or created (permissions, disk full, etc.)
    /// - Initialization transaction fails to begin or commit
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create record store directory: {}", parent.display())
            })?;
        }

        let db = Database::create(path)
            .with_context(|| format!("Failed to open record database: {}", path.display()))?;

        let write_txn = db
            .begin_write()
            .context("Failed to begin initialization transaction")?;
        {
            let _table = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to initialize records table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initialization transaction")?;

        debug!(path = %path.display(), "Opened record database");
        Ok(Self { db: Arc::new(db) })
    }

    fn insert_sync(&self, record: &Record) -> Result<()> {
        let value = serde_json::to_vec(record)
            .with_context(|| format!("Failed to serialize record '{}'", record.id))?;

        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to open records table")?;
            table
                .insert(record.id.as_str(), value.as_slice())
                .with_context(|| format!("Failed to insert record '{}'", record.id))?;
        }
        write_txn
            .commit()
            .context("Failed to commit insert transaction")?;

        Ok(())
    }

    fn scan_sync(&self) -> Result<Vec<Record>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(RECORDS_TABLE)
            .context("Failed to open records table")?;

        let mut records = Vec::new();
        for item in table.iter().context("Failed to iterate records table")? {
            let (key, value) = item.context("Failed to read record entry")?;
            let record: Record = serde_json::from_slice(value.value())
                .with_context(|| format!("Failed to deserialize record '{}'", key.value()))?;
            records.push(record);
        }

        Ok(records)
    }

    fn delete_sync(&self, id: &str) -> Result<bool> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        let removed = {
            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to open records table")?;
            table
                .remove(id)
                .with_context(|| format!("Failed to remove record '{id}'"))?
                .is_some()
        };
        write_txn
            .commit()
            .context("Failed to commit delete transaction")?;

        Ok(removed)
    }

    fn clear_sync(&self) -> Result<usize> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        let removed = {
            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to open records table")?;

            let mut ids = Vec::new();
            for item in table.iter().context("Failed to iterate records table")? {
                let (key, _) = item.context("Failed to read record entry")?;
                ids.push(key.value().to_string());
            }
            for id in &ids {
                table
                    .remove(id.as_str())
                    .with_context(|| format!("Failed to remove record '{id}'"))?;
            }
            ids.len()
        };
        write_txn
            .commit()
            .context("Failed to commit clear transaction")?;

        Ok(removed)
    }
}

#[async_trait]
impl RecordBackend for RedbBackend {
    async fn insert(&self, record: &Record) -> Result<()> {
        let backend = self.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || backend.insert_sync(&record))
            .await
            .context("Task join error")?
    }

    async fn scan_all(&self) -> Result<Vec<Record>> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.scan_sync())
            .await
            .context("Task join error")?
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let backend = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || backend.delete_sync(&id))
            .await
            .context("Task join error")?
    }

    async fn clear(&self) -> Result<usize> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.clear_sync())
            .await
            .context("Task join error")?
    }
}
