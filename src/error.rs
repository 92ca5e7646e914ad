//! Error types for typed error handling.
//!
//! Storage backends report failures as `anyhow::Error` with a context chain;
//! [`RecordStore`](crate::store::RecordStore) wraps those in
//! [`Error::Persistence`] without retrying. Encoding has no failure modes for
//! in-limit input, so the remaining variants describe rejected input or a
//! product-level condition such as an empty dataset.

/// Result type for fieldlog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the record store, capture flow and export pipeline.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A storage transaction could not begin, read or commit.
    #[error("storage transaction failed: {0:#}")]
    Persistence(anyhow::Error),

    /// Export requested while the store holds no records.
    #[error("no records to export")]
    EmptyDataset,

    /// Capture input rejected before any storage write.
    #[error("unsupported capture input: {0}")]
    UnsupportedCaptureInput(String),

    /// Another export is still running on the same exporter.
    #[error("an export is already in progress")]
    ExportInProgress,

    /// Archive entry name cannot be written as a relative ZIP path.
    #[error("invalid archive entry name: {0:?}")]
    InvalidEntryName(String),

    /// A value does not fit the 16/32-bit fields of a ZIP header.
    #[error("archive limit exceeded: {what} is {value}")]
    ArchiveLimit { what: &'static str, value: u64 },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error with context.
    #[error("IO error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an unsupported capture input error.
    pub fn capture(reason: impl Into<String>) -> Self {
        Self::UnsupportedCaptureInput(reason.into())
    }

    /// Returns true for conditions the user can fix without a bug report.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::EmptyDataset
                | Self::UnsupportedCaptureInput(_)
                | Self::ExportInProgress
                | Self::Config(_)
        )
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Persistence(err)
    }
}
