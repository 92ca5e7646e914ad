//! In-memory record storage backend.
//!
//! Uses DashMap for concurrent access. Nothing is persisted.

use super::backend::RecordBackend;
use crate::record::Record;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// In-memory record backend.
///
/// All data is lost when the process exits. Used by tests and by callers
/// that embed the export pipeline without a database file.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    records: DashMap<String, Record>,
}

impl MemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordBackend for MemoryBackend {
    async fn insert(&self, record: &Record) -> Result<()> {
        self.records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Record>> {
        Ok(self.records.iter().map(|e| e.value().clone()).collect())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.records.remove(id).is_some())
    }

    async fn clear(&self) -> Result<usize> {
        let removed = self.records.len();
        self.records.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }
}
