//! Configuration for the fieldlog CLI.
//!
//! Settings come from an optional `fieldlog.toml`; every field has a default,
//! so a missing file is the same as an empty one.
//!
//! ```toml
//! [store]
//! path = "/data/records.redb"
//!
//! [export]
//! dir = "exports"
//! prefix = "survey"
//! crc = "computed"   # or "zero"
//! utf8_names = true
//!
//! [capture]
//! require_photo = false
//! ```

use crate::archive::{ArchiveOptions, CrcMode};
use crate::capture::CapturePolicy;
use crate::error::{Error, Result};
use crate::export::DEFAULT_PREFIX;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store: StoreConfig,
    pub export: ExportConfig,
    pub capture: CapturePolicy,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file; defaults to `<data dir>/records.redb`.
    pub path: Option<PathBuf>,
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
    pub prefix: String,
    pub crc: CrcMode,
    pub utf8_names: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
            crc: CrcMode::Computed,
            utf8_names: true,
        }
    }
}

impl ExportConfig {
    /// Archive header options for this configuration.
    #[must_use]
    pub fn archive_options(&self) -> ArchiveOptions {
        ArchiveOptions {
            crc: self.crc,
            utf8_names: self.utf8_names,
        }
    }
}

impl Config {
    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not valid TOML for this schema.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading config {}", path.display()), e))?;
        Self::parse(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Load configuration if the file exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load_from`] for a file that exists.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid TOML or failed validation.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] listing every problem found:
    /// - Empty artifact prefix, or one containing a path separator
    /// - Empty store path
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.export.prefix.is_empty() {
            errors.push("export.prefix cannot be empty".to_string());
        } else if self.export.prefix.contains(['/', '\\']) {
            errors.push(format!(
                "export.prefix must be a plain file name prefix (got: '{}')",
                self.export.prefix
            ));
        }

        if let Some(path) = &self.store.path
            && path.as_os_str().is_empty()
        {
            errors.push("store.path cannot be empty".to_string());
        }

        if !errors.is_empty() {
            return Err(Error::Config(format!(
                "validation failed:\n  - {}",
                errors.join("\n  - ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.export.prefix, "fieldlog");
        assert_eq!(config.export.archive_options(), ArchiveOptions::default());
        assert!(!config.capture.require_photo);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
[store]
path = "/data/records.redb"

[export]
dir = "exports"
prefix = "survey"
crc = "zero"
utf8_names = false

[capture]
require_photo = true
"#,
        )
        .unwrap();
        assert_eq!(config.store.path, Some(PathBuf::from("/data/records.redb")));
        assert_eq!(config.export.dir, PathBuf::from("exports"));
        assert_eq!(
            config.export.archive_options(),
            ArchiveOptions {
                crc: CrcMode::Zero,
                utf8_names: false
            }
        );
        assert!(config.capture.require_photo);
    }

    #[test]
    fn test_rejects_bad_prefix() {
        for prefix in ["", "a/b"] {
            let err = Config::parse(&format!("[export]\nprefix = \"{prefix}\"\n")).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{prefix:?}");
        }
    }

    #[test]
    fn test_rejects_unknown_crc_mode() {
        let err = Config::parse("[export]\ncrc = \"adler\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_section() {
        assert!(Config::parse("[server]\nport = 1\n").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_reports_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("fieldlog.toml");
        fs::write(&path, "[export]\nprefix = \"\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("fieldlog.toml"));
    }
}
