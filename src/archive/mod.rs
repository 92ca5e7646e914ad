//! Store-only ZIP archive writer.
//!
//! Builds a ZIP container from first principles: one local file header plus
//! raw data per entry, then one central directory header per entry, then the
//! end-of-central-directory record. Entries are never compressed and there is
//! no Zip64 support, so every size and offset must fit in 32 bits.
//!
//! # Example
//!
//! ```ignore
//! use fieldlog::archive::{ArchiveEntry, ArchiveOptions, build};
//!
//! let entries = [ArchiveEntry::new("data.csv", &csv)];
//! let zip = build(&entries, ArchiveOptions::default())?;
//! ```

pub mod layout;
mod writer;

pub use writer::{ArchiveEntry, ArchiveOptions, CrcMode, build, crc32, validate_entry_name};
