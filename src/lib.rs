//! fieldlog - offline geotagged field observations.
//!
//! Captures (location fix, optional photo, note) are stored as whole records
//! in a local key-value store and exported as a CSV file or a store-only ZIP
//! archive holding the CSV plus every photo.
//!
//! - [`store`] - durable record store (redb or in-memory)
//! - [`capture`] - validation of pending captures and `save`
//! - [`csv`] - deterministic CSV encoding
//! - [`archive`] - ZIP container writer
//! - [`export`] - export orchestration

pub mod archive;
pub mod capture;
pub mod config;
pub mod csv;
pub mod error;
pub mod export;
pub mod paths;
pub mod record;
pub mod store;
pub mod ui;

pub use error::{Error, Result};
