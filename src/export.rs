//! Export orchestration: record store → CSV / ZIP artifact.
//!
//! An export reads every record once, sorts oldest first, and produces either
//! the CSV bytes or a ZIP holding `data.csv` plus one `photos/<name>` entry per
//! record that has a photo. Only one export runs per [`Exporter`] at a time; a
//! concurrent call fails fast with [`Error::ExportInProgress`]. Captures may
//! keep arriving meanwhile; the export works on the snapshot its scan saw.

use crate::archive::{self, ArchiveEntry, ArchiveOptions};
use crate::csv;
use crate::error::{Error, Result};
use crate::record::{Record, sort_oldest_first};
use crate::store::RecordStore;
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Name of the CSV entry inside the archive.
pub const CSV_ENTRY_NAME: &str = "data.csv";

/// Directory holding photos inside the archive.
pub const PHOTO_DIR: &str = "photos";

/// Default artifact name prefix.
pub const DEFAULT_PREFIX: &str = "fieldlog";

/// Artifact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ExportKind {
    Csv,
    Zip,
}

impl ExportKind {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Zip => "zip",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "zip" => Ok(Self::Zip),
            other => Err(Error::Config(format!("unknown export kind: {other}"))),
        }
    }
}

/// An artifact written to disk by [`Exporter::export_to_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    /// Bytes written.
    pub size: u64,
}

/// `<prefix>_<YYYY-MM-DD>.<ext>`
#[must_use]
pub fn artifact_file_name(prefix: &str, kind: ExportKind, date: NaiveDate) -> String {
    format!("{prefix}_{}.{}", date.format("%Y-%m-%d"), kind.extension())
}

/// Archive path of a photo entry.
#[must_use]
pub fn photo_entry_name(photo_name: &str) -> String {
    format!("{PHOTO_DIR}/{photo_name}")
}

/// Build the ZIP artifact for records already sorted oldest first.
///
/// The CSV entry comes first, then photos in record order. Records without
/// a photo contribute no entry.
///
/// # Errors
///
/// Propagates [`archive::build`] errors unchanged.
pub fn build_zip(records: &[Record], options: ArchiveOptions) -> Result<Vec<u8>> {
    let csv = csv::encode(records);
    let photos: Vec<(String, &[u8])> = records
        .iter()
        .filter_map(|r| r.photo.as_ref())
        .map(|p| (photo_entry_name(&p.name), p.bytes.as_slice()))
        .collect();

    let mut entries = Vec::with_capacity(1 + photos.len());
    entries.push(ArchiveEntry::new(CSV_ENTRY_NAME, &csv));
    entries.extend(
        photos
            .iter()
            .map(|(name, bytes)| ArchiveEntry::new(name, bytes)),
    );

    debug!(photos = photos.len(), "Assembling archive entries");
    archive::build(&entries, options)
}

/// Marks an export as running; cleared on drop, including on error.
struct ExportGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExportGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::ExportInProgress)?;
        Ok(Self { flag })
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Produces export artifacts from a record store.
///
/// `Exporter` is `Clone`; clones share the in-flight guard.
#[derive(Clone)]
pub struct Exporter {
    store: RecordStore,
    archive: ArchiveOptions,
    prefix: String,
    in_flight: Arc<AtomicBool>,
}

impl Exporter {
    /// Creates an exporter with default archive options and name prefix.
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            archive: ArchiveOptions::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the archive header options.
    #[must_use]
    pub fn with_archive_options(mut self, options: ArchiveOptions) -> Self {
        self.archive = options;
        self
    }

    /// Sets the artifact name prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns true while an export is running.
    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Artifact file name for the given kind and date.
    #[must_use]
    pub fn file_name(&self, kind: ExportKind, date: NaiveDate) -> String {
        artifact_file_name(&self.prefix, kind, date)
    }

    /// Export every stored record.
    ///
    /// # Errors
    ///
    /// - [`Error::ExportInProgress`] if another export is running
    /// - [`Error::EmptyDataset`] if the store holds no records; no bytes are produced
    /// - [`Error::Persistence`] if the scan fails
    /// - archive errors from [`archive::build`]
    pub async fn export_all(&self, kind: ExportKind) -> Result<Vec<u8>> {
        let _guard = ExportGuard::acquire(&self.in_flight)?;

        let mut records = self.store.scan_all().await?;
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }
        sort_oldest_first(&mut records);

        let bytes = match kind {
            ExportKind::Csv => csv::encode(&records),
            ExportKind::Zip => build_zip(&records, self.archive)?,
        };

        info!(
            %kind,
            records = records.len(),
            bytes = bytes.len(),
            "Export complete"
        );
        Ok(bytes)
    }

    /// Export and write the artifact into `dir`, creating it if needed.
    ///
    /// Returns the path and size of the written file. Nothing is written if
    /// the export fails.
    ///
    /// # Errors
    ///
    /// Everything [`Exporter::export_all`] returns, plus [`Error::Io`] if the
    /// directory or file cannot be written.
    pub async fn export_to_dir(
        &self,
        kind: ExportKind,
        dir: &Path,
        date: NaiveDate,
    ) -> Result<WrittenArtifact> {
        let bytes = self.export_all(kind).await?;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;
        let path = dir.join(self.file_name(kind, date));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| Error::io(format!("writing {}", path.display()), e))?;

        let size = bytes.len() as u64;
        info!(path = %path.display(), size, "Wrote export artifact");
        Ok(WrittenArtifact { path, size })
    }
}
