//! Application configuration.
//!
//! Everything that used to be a process-wide constant (folder paths, the
//! extension allow-list, CSV null markers) lives here and is handed to the
//! pipeline constructor explicitly.

use crate::error::{Result, ResultExt as _, TabcleanError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_STAGING_DIR: &str = "static/uploads";
pub const DEFAULT_OUTPUT_DIR: &str = "static/processed";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a whole multipart request body
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Raw uploads, named `<uuid>_<filename>`
    pub staging_dir: PathBuf,
    /// Cleaned artifacts, named `<uuid>_cleaned.<ext>`
    pub output_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CsvConfig {
    /// Cell contents read as null
    pub null_markers: Vec<String>,
    /// Rows sampled for dtype inference
    pub infer_schema_length: usize,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            null_markers: ["NA", "N/A", "NULL", "null", "NaN", "nan", "None", "#N/A", "<NA>"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            infer_schema_length: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub allowed_extensions: Vec<String>,
    pub csv: CsvConfig,
    /// Overrides the platform log directory
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            allowed_extensions: vec!["csv".to_owned(), "xls".to_owned(), "xlsx".to_owned()],
            csv: CsvConfig::default(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(contents)?;
        config.normalize()?;
        Ok(config)
    }

    fn normalize(&mut self) -> Result<()> {
        self.allowed_extensions = self
            .allowed_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self.allowed_extensions.dedup();

        if self.allowed_extensions.is_empty() {
            return Err(TabcleanError::Config(
                "allowed_extensions must name at least one extension".to_owned(),
            ));
        }
        if self.storage.staging_dir == self.storage.output_dir {
            return Err(TabcleanError::Config(
                "staging_dir and output_dir must differ".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = AppConfig::from_json(
            r#"{ "server": { "port": 8080 }, "allowed_extensions": [".CSV", "xlsx"] }"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.allowed_extensions, vec!["csv", "xlsx"]);
        assert_eq!(config.storage.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_rejects_empty_allow_list() {
        let err = AppConfig::from_json(r#"{ "allowed_extensions": [] }"#).unwrap_err();
        assert!(matches!(err, TabcleanError::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = AppConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TabcleanError::Config(_)));
    }
}
