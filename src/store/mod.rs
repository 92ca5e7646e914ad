//! Durable record store with pluggable backends.
//!
//! Maps record id to a whole [`Record`](crate::record::Record). There is no
//! partial-field update: insert (upsert), full scan, single delete and
//! clear-all are the only operations.
//!
//! - **RedbBackend**: persistent storage with ACID transactions (CLI default)
//! - **MemoryBackend**: non-persistent storage for tests and embedding
//!
//! # Example
//!
//! ```ignore
//! use fieldlog::store::RecordStore;
//!
//! let store = RecordStore::file("~/.fieldlog/records.redb")?;
//! store.insert(&record).await?;
//! let all = store.scan_all().await?;
//! ```

mod backend;
mod memory;
mod redb;
mod store;

#[cfg(test)]
mod tests;

pub use backend::RecordBackend;
pub use memory::MemoryBackend;
pub use self::redb::RedbBackend;
pub use store::RecordStore;
