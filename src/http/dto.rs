//! Request and response bodies for the HTTP API.

use crate::pipeline::{BatchReport, FailureStage, SkipReason};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// A cleaned file and where to fetch it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessedFileDto {
    pub original: String,
    /// `/download/<id>_cleaned.<ext>`
    pub download: String,
    pub rows_before: usize,
    pub rows_after: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedFileDto {
    pub filename: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedFileDto {
    pub filename: String,
    pub stage: FailureStage,
    pub error: String,
}

/// Response for `POST /process`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessResponse {
    pub files: Vec<ProcessedFileDto>,
    pub skipped: Vec<SkippedFileDto>,
    pub failed: Vec<FailedFileDto>,
}

/// Download reference for an artifact name.
pub fn download_url(output_name: &str) -> String {
    format!("/download/{output_name}")
}

impl From<&BatchReport> for ProcessResponse {
    fn from(report: &BatchReport) -> Self {
        Self {
            files: report
                .processed()
                .map(|file| ProcessedFileDto {
                    original: file.original.clone(),
                    download: download_url(&file.output_name),
                    rows_before: file.rows_before,
                    rows_after: file.rows_after,
                })
                .collect(),
            skipped: report
                .skipped()
                .map(|(filename, reason)| SkippedFileDto {
                    filename: filename.to_owned(),
                    reason,
                })
                .collect(),
            failed: report
                .failed()
                .map(|(filename, stage, error)| FailedFileDto {
                    filename: filename.to_owned(),
                    stage,
                    error: error.to_owned(),
                })
                .collect(),
        }
    }
}
