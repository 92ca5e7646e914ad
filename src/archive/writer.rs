//! Archive building: local entries, central directory, end record.

use super::layout::{
    CentralDirectoryHeader, EndOfCentralDirectory, FLAG_UTF8_NAME, LocalFileHeader,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named payload destined for the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveEntry<'a> {
    /// Path inside the archive, `/`-separated, no leading slash.
    pub name: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> ArchiveEntry<'a> {
    pub fn new(name: &'a str, bytes: &'a [u8]) -> Self {
        Self { name, bytes }
    }
}

/// What to write into the CRC-32 fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrcMode {
    /// CRC-32 of each entry's bytes. Accepted by strict validators.
    #[default]
    Computed,
    /// Always zero, byte-compatible with archives from the legacy web export.
    /// Readers that verify checksums will reject non-empty entries.
    Zero,
}

/// Options controlling header fields that do not affect layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub crc: CrcMode,
    /// Set general-purpose bit 11 so readers decode names as UTF-8.
    pub utf8_names: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            crc: CrcMode::Computed,
            utf8_names: true,
        }
    }
}

/// Metadata kept per entry until the central directory is written.
struct CentralRecord {
    crc32: u32,
    size: u32,
    name_len: u16,
    offset: u32,
}

/// CRC-32 (IEEE) of a byte slice.
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = flate2::Crc::new();
    crc.update(bytes);
    crc.sum()
}

/// Reject names that are not plain relative paths.
///
/// # Errors
///
/// Returns [`Error::InvalidEntryName`] for an empty name, a leading `/`, a
/// backslash, or an empty, `.` or `..` path segment.
pub fn validate_entry_name(name: &str) -> Result<()> {
    let bad_segment = name
        .split('/')
        .any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if name.is_empty() || name.contains('\\') || bad_segment {
        return Err(Error::InvalidEntryName(name.to_string()));
    }
    Ok(())
}

fn fit_u16(what: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::ArchiveLimit {
        what,
        value: value as u64,
    })
}

fn fit_u32(what: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::ArchiveLimit {
        what,
        value: value as u64,
    })
}

/// Build a store-only ZIP archive from entries, in input order.
///
/// Output is deterministic for a given entry list: no timestamps are
/// embedded. An empty list yields a valid archive holding only the end
/// record.
///
/// # Errors
///
/// Returns [`Error::InvalidEntryName`] for a malformed name, or
/// [`Error::ArchiveLimit`] if the entry count, a name length, an entry size
/// or an offset does not fit its header field. Nothing is returned on error.
pub fn build(entries: &[ArchiveEntry<'_>], options: ArchiveOptions) -> Result<Vec<u8>> {
    let entry_count = fit_u16("entry count", entries.len())?;
    let flags = if options.utf8_names { FLAG_UTF8_NAME } else { 0 };

    let payload: usize = entries
        .iter()
        .map(|e| LocalFileHeader::LEN + CentralDirectoryHeader::LEN + 2 * e.name.len() + e.bytes.len())
        .sum();
    let mut out = Vec::with_capacity(payload + EndOfCentralDirectory::LEN);
    let mut central = Vec::with_capacity(entries.len());

    for entry in entries {
        validate_entry_name(entry.name)?;
        let name_len = fit_u16("entry name length", entry.name.len())?;
        let size = fit_u32("entry size", entry.bytes.len())?;
        let offset = fit_u32("local header offset", out.len())?;
        let crc32 = match options.crc {
            CrcMode::Computed => crc32(entry.bytes),
            CrcMode::Zero => 0,
        };

        let header = LocalFileHeader {
            flags,
            crc32,
            size,
            name_len,
        };
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(entry.name.as_bytes());
        out.extend_from_slice(entry.bytes);

        central.push(CentralRecord {
            crc32,
            size,
            name_len,
            offset,
        });
    }

    let central_directory_offset = fit_u32("central directory offset", out.len())?;

    for (entry, record) in entries.iter().zip(&central) {
        let header = CentralDirectoryHeader {
            flags,
            crc32: record.crc32,
            size: record.size,
            name_len: record.name_len,
            local_header_offset: record.offset,
        };
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(entry.name.as_bytes());
    }

    let central_directory_size = fit_u32(
        "central directory size",
        out.len() - central_directory_offset as usize,
    )?;

    let end = EndOfCentralDirectory {
        entry_count,
        central_directory_size,
        central_directory_offset,
    };
    out.extend_from_slice(&end.to_bytes());

    debug!(
        entries = entries.len(),
        bytes = out.len(),
        crc = ?options.crc,
        "Built archive"
    );
    Ok(out)
}
