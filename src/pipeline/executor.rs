//! Batch execution engine.
//!
//! Runs every upload of a batch through validate → stage → load → clean →
//! write, one file at a time, and records a [`FileOutcome`] for each. A
//! failing file never stops the rest of the batch.

use super::ids::{IdGenerator, UuidGenerator};
use super::report::{BatchReport, FailureStage, FileOutcome, ProcessedFile, SkipReason};
use super::sanitize::secure_filename;
use super::storage::Storage;
use crate::cleaning::{
    CleaningConfig, ExtensionPolicy, clean_df, extension_of, load_df, output_extension, save_df,
};
use crate::config::{AppConfig, CsvConfig};
use crate::error::{Result, TabcleanError};
use std::sync::Arc;

/// One uploaded file: the name the client sent and its raw bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

pub struct CleaningPipeline {
    storage: Storage,
    policy: ExtensionPolicy,
    csv: CsvConfig,
    ids: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for CleaningPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleaningPipeline")
            .field("storage", &self.storage)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CleaningPipeline {
    pub fn new(
        storage: Storage,
        policy: ExtensionPolicy,
        csv: CsvConfig,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            storage,
            policy,
            csv,
            ids,
        }
    }

    /// Build from application config with UUID ids, creating the directories.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            Storage::open(&config.storage)?,
            ExtensionPolicy::new(&config.allowed_extensions),
            config.csv.clone(),
            Arc::new(UuidGenerator),
        ))
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn policy(&self) -> &ExtensionPolicy {
        &self.policy
    }

    /// Process every upload and collect the outcomes.
    ///
    /// Returns [`TabcleanError::EmptyBatch`] when no upload passes validation.
    pub fn process_batch(&self, config: &CleaningConfig, uploads: &[Upload]) -> Result<BatchReport> {
        tracing::info!(
            files = uploads.len(),
            null_action = %config.null_action,
            remove_duplicates = config.remove_duplicates,
            assign_primary_key = config.assign_primary_key,
            filetype = config.filetype.as_deref().unwrap_or("-"),
            "Processing batch"
        );

        if config.is_noop() {
            tracing::debug!("No cleaning options selected, files are rewritten unchanged");
        }

        let mut report = BatchReport::default();
        for upload in uploads {
            report.push(self.process_file(config, upload));
        }

        tracing::info!("Batch finished: {}", report.summary());

        if report.accepted_count() == 0 {
            return Err(TabcleanError::EmptyBatch);
        }
        Ok(report)
    }

    /// Run a single upload through the pipeline.
    pub fn process_file(&self, config: &CleaningConfig, upload: &Upload) -> FileOutcome {
        if !self.policy.is_allowed(&upload.filename) {
            tracing::debug!(filename = %upload.filename, "Skipping file with disallowed extension");
            return FileOutcome::Skipped {
                filename: upload.filename.clone(),
                reason: SkipReason::InvalidExtension,
            };
        }

        let filename = secure_filename(&upload.filename);
        let Some(ext) = extension_of(&filename).filter(|_| self.policy.is_allowed(&filename))
        else {
            tracing::debug!(filename = %upload.filename, "Skipping file whose sanitized name is unusable");
            return FileOutcome::Skipped {
                filename: upload.filename.clone(),
                reason: SkipReason::EmptyFilename,
            };
        };

        let id = self.ids.next_id();
        let fail = |stage: FailureStage, err: TabcleanError| {
            tracing::warn!(%id, %filename, %stage, "File failed: {err}");
            FileOutcome::Failed {
                filename: filename.clone(),
                stage,
                error: err.to_string(),
            }
        };

        let staged = match self.storage.stage(&id, &filename, &upload.bytes) {
            Ok(path) => path,
            Err(e) => return fail(FailureStage::Staging, e),
        };

        let df = match load_df(&staged, &ext, &self.csv) {
            Ok(df) => df,
            Err(e) => return fail(FailureStage::Load, e),
        };
        let (rows_before, columns_before) = (df.height(), df.width());

        let mut cleaned = match clean_df(df, config) {
            Ok(df) => df,
            Err(e) => return fail(FailureStage::Clean, e),
        };

        let output_name = Storage::output_name(&id, output_extension(&ext));
        let output_path = self.storage.output_path(&output_name);
        if let Err(e) = save_df(&mut cleaned, &output_path) {
            // Leave no half-written artifact behind.
            let _ = std::fs::remove_file(&output_path);
            return fail(FailureStage::Write, e);
        }

        let processed = ProcessedFile {
            original: filename.clone(),
            id: id.clone(),
            output_name,
            output_path,
            rows_before,
            rows_after: cleaned.height(),
            columns_before,
            columns_after: cleaned.width(),
        };
        tracing::info!(%id, "Cleaned {}", processed.summary());

        FileOutcome::Processed(processed)
    }
}
