//! Tests for the record store module.

use super::*;
use crate::error::Error;
use crate::record::Record;
use crate::record::tests::sample_record;
use anyhow::bail;
use async_trait::async_trait;
use tempfile::TempDir;

/// Both backends, plus the temp dir keeping the redb file alive.
fn stores() -> (TempDir, Vec<(&'static str, RecordStore)>) {
    let tmp = TempDir::new().unwrap();
    let redb = RecordStore::file(tmp.path().join("records.redb")).unwrap();
    (tmp, vec![("memory", RecordStore::memory()), ("redb", redb)])
}

#[tokio::test]
async fn test_insert_then_scan_returns_equal_record() {
    let (_tmp, stores) = stores();
    for (name, store) in stores {
        let record = sample_record("r1", "2024-01-01T10:00:00Z", Some(&[0xFF, 0xD8, 0x00, 0x42]));
        store.insert(&record).await.unwrap();

        let all = store.scan_all().await.unwrap();
        let matching: Vec<&Record> = all.iter().filter(|r| r.id == "r1").collect();
        assert_eq!(matching.len(), 1, "{name}");
        assert_eq!(matching[0], &record, "{name}");
    }
}

#[tokio::test]
async fn test_insert_is_upsert() {
    let (_tmp, stores) = stores();
    for (name, store) in stores {
        let mut record = sample_record("r1", "2024-01-01T10:00:00Z", None);
        store.insert(&record).await.unwrap();
        record.note = "retry".to_string();
        store.insert(&record).await.unwrap();

        let all = store.scan_all().await.unwrap();
        assert_eq!(all.len(), 1, "{name}");
        assert_eq!(all[0].note, "retry", "{name}");
    }
}

#[tokio::test]
async fn test_delete_by_id() {
    let (_tmp, stores) = stores();
    for (name, store) in stores {
        store
            .insert(&sample_record("keep", "2024-01-01T09:00:00Z", None))
            .await
            .unwrap();
        store
            .insert(&sample_record("drop", "2024-01-01T10:00:00Z", Some(b"jpeg")))
            .await
            .unwrap();

        assert!(store.delete_by_id("drop").await.unwrap(), "{name}");

        let all = store.scan_all().await.unwrap();
        assert!(all.iter().all(|r| r.id != "drop"), "{name}");
        assert_eq!(all.len(), 1, "{name}");
    }
}

#[tokio::test]
async fn test_delete_nonexistent_is_not_an_error() {
    let (_tmp, stores) = stores();
    for (name, store) in stores {
        let removed = store.delete_by_id("missing").await.unwrap();
        assert!(!removed, "{name}");
    }
}

#[tokio::test]
async fn test_clear_removes_everything() {
    let (_tmp, stores) = stores();
    for (name, store) in stores {
        for i in 0..5 {
            let id = format!("r{i}");
            store
                .insert(&sample_record(&id, "2024-01-01T10:00:00Z", None))
                .await
                .unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 5, "{name}");

        assert_eq!(store.clear().await.unwrap(), 5, "{name}");
        assert!(store.scan_all().await.unwrap().is_empty(), "{name}");
        assert_eq!(store.clear().await.unwrap(), 0, "{name}");
    }
}

#[tokio::test]
async fn test_redb_persists_across_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("records.redb");
    let record = sample_record("r1", "2024-01-01T10:00:00Z", Some(&[7u8; 100]));

    {
        let store = RecordStore::file(&path).unwrap();
        store.insert(&record).await.unwrap();
    }

    let store = RecordStore::file(&path).unwrap();
    assert_eq!(store.scan_all().await.unwrap(), vec![record]);
}

#[tokio::test]
async fn test_redb_rejects_corrupt_value() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("records.redb");
    let backend = RedbBackend::open(&path).unwrap();
    {
        let db = backend.db.clone();
        let txn = db.begin_write().unwrap();
        {
            let mut table = txn.open_table(super::redb::RECORDS_TABLE).unwrap();
            table.insert("bad", b"not json".as_slice()).unwrap();
        }
        txn.commit().unwrap();
    }

    let store = RecordStore::custom(backend);
    let err = store.scan_all().await.unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
    assert!(err.to_string().contains("Failed to deserialize record 'bad'"));
}

struct FailingBackend;

#[async_trait]
impl RecordBackend for FailingBackend {
    async fn insert(&self, _record: &Record) -> anyhow::Result<()> {
        bail!("Failed to commit insert transaction")
    }

    async fn scan_all(&self) -> anyhow::Result<Vec<Record>> {
        bail!("Failed to begin read transaction")
    }

    async fn delete(&self, _id: &str) -> anyhow::Result<bool> {
        bail!("Failed to commit delete transaction")
    }

    async fn clear(&self) -> anyhow::Result<usize> {
        bail!("Failed to commit clear transaction")
    }
}

#[tokio::test]
async fn test_backend_failures_surface_as_persistence_errors() {
    let store = RecordStore::custom(FailingBackend);
    let record = sample_record("r1", "2024-01-01T10:00:00Z", None);

    assert!(matches!(
        store.insert(&record).await,
        Err(Error::Persistence(_))
    ));
    assert!(matches!(store.scan_all().await, Err(Error::Persistence(_))));
    assert!(matches!(
        store.delete_by_id("r1").await,
        Err(Error::Persistence(_))
    ));
    assert!(matches!(store.clear().await, Err(Error::Persistence(_))));
    assert!(matches!(store.count().await, Err(Error::Persistence(_))));
}
