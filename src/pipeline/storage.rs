//! On-disk layout for staged uploads and cleaned artifacts.
//!
//! Both directories are append-only: every file name starts with a fresh
//! unique id, so writers never collide and nothing needs locking.

use crate::config::StorageConfig;
use crate::error::{Result, ResultExt as _, TabcleanError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Storage {
    staging_dir: PathBuf,
    output_dir: PathBuf,
}

impl Storage {
    /// Create both directories if absent.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        for dir in [&config.staging_dir, &config.output_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        Ok(Self {
            staging_dir: config.staging_dir.clone(),
            output_dir: config.output_dir.clone(),
        })
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist raw upload bytes as `<id>_<filename>`.
    pub fn stage(&self, id: &str, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.staging_dir.join(format!("{id}_{filename}"));
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to stage upload {}", path.display()))?;
        Ok(path)
    }

    pub fn output_name(id: &str, ext: &str) -> String {
        format!("{id}_cleaned.{ext}")
    }

    pub fn output_path(&self, output_name: &str) -> PathBuf {
        self.output_dir.join(output_name)
    }

    /// Resolve a download reference to an existing artifact.
    ///
    /// Only flat names are accepted, so a reference can never escape the
    /// output directory.
    pub fn resolve_output(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty()
            || name.contains(['/', '\\'])
            || name.contains("..")
            || name.starts_with('.')
        {
            return Err(TabcleanError::InvalidPath(name.to_owned()));
        }

        let path = self.output_dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(TabcleanError::NotFound(name.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_in(dir: &Path) -> Storage {
        Storage::open(&StorageConfig {
            staging_dir: dir.join("uploads"),
            output_dir: dir.join("processed"),
        })
        .unwrap()
    }

    #[test]
    fn test_open_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        assert!(storage.staging_dir().is_dir());
        assert!(storage.output_dir().is_dir());
    }

    #[test]
    fn test_stage_names_file_with_id() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        let path = storage.stage("abc", "data.csv", b"a,b\n1,2\n").unwrap();
        assert_eq!(path, storage.staging_dir().join("abc_data.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"a,b\n1,2\n");
    }

    #[test]
    fn test_resolve_output() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        let name = Storage::output_name("abc", "csv");
        assert_eq!(name, "abc_cleaned.csv");
        std::fs::write(storage.output_path(&name), "x\n").unwrap();

        assert_eq!(storage.resolve_output(&name).unwrap(), storage.output_path(&name));
        assert!(matches!(
            storage.resolve_output("missing_cleaned.csv"),
            Err(TabcleanError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_output_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        for name in ["../uploads/x.csv", "..", "a/b.csv", "a\\b.csv", "", ".env"] {
            assert!(
                matches!(storage.resolve_output(name), Err(TabcleanError::InvalidPath(_))),
                "{name:?} should be rejected"
            );
        }
    }
}
