//! Per-file outcomes and the batch report that collects them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A successfully cleaned upload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProcessedFile {
    /// Sanitized upload name shown to the user
    pub original: String,
    pub id: String,
    /// `<id>_cleaned.<ext>`, the download reference
    pub output_name: String,
    #[serde(skip)]
    pub output_path: PathBuf,
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
}

impl ProcessedFile {
    pub fn summary(&self) -> String {
        format!(
            "{} -> {} ({} -> {} rows, {} -> {} columns)",
            self.original,
            self.output_name,
            self.rows_before,
            self.rows_after,
            self.columns_before,
            self.columns_after
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidExtension,
    /// Sanitizing the name left nothing usable
    EmptyFilename,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidExtension => write!(f, "file extension is not allowed"),
            Self::EmptyFilename => write!(f, "filename is empty after sanitizing"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Staging,
    Load,
    Clean,
    Write,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staging => write!(f, "staging"),
            Self::Load => write!(f, "load"),
            Self::Clean => write!(f, "clean"),
            Self::Write => write!(f, "write"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Processed(ProcessedFile),
    Skipped {
        filename: String,
        reason: SkipReason,
    },
    Failed {
        filename: String,
        stage: FailureStage,
        error: String,
    },
}

impl FileOutcome {
    /// Whether the file passed validation (processed or failed later).
    pub fn was_accepted(&self) -> bool {
        !matches!(self, Self::Skipped { .. })
    }
}

/// Outcomes of one batch, in upload order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn processed(&self) -> impl Iterator<Item = &ProcessedFile> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Processed(file) => Some(file),
            _ => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, SkipReason)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Skipped { filename, reason } => Some((filename.as_str(), *reason)),
            _ => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, FailureStage, &str)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Failed {
                filename,
                stage,
                error,
            } => Some((filename.as_str(), *stage, error.as_str())),
            _ => None,
        })
    }

    pub fn accepted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.was_accepted()).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} processed, {} skipped, {} failed",
            self.processed().count(),
            self.skipped().count(),
            self.failed().count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(name: &str) -> FileOutcome {
        FileOutcome::Processed(ProcessedFile {
            original: name.to_owned(),
            id: "id".to_owned(),
            output_name: "id_cleaned.csv".to_owned(),
            output_path: PathBuf::from("id_cleaned.csv"),
            rows_before: 3,
            rows_after: 1,
            columns_before: 2,
            columns_after: 3,
        })
    }

    #[test]
    fn test_views_and_counts() {
        let mut report = BatchReport::default();
        report.push(processed("a.csv"));
        report.push(FileOutcome::Skipped {
            filename: "b.txt".to_owned(),
            reason: SkipReason::InvalidExtension,
        });
        report.push(FileOutcome::Failed {
            filename: "c.xlsx".to_owned(),
            stage: FailureStage::Load,
            error: "corrupt".to_owned(),
        });

        assert_eq!(report.accepted_count(), 2);
        assert_eq!(report.processed().count(), 1);
        assert_eq!(report.skipped().collect::<Vec<_>>(), vec![("b.txt", SkipReason::InvalidExtension)]);
        assert_eq!(report.failed().next(), Some(("c.xlsx", FailureStage::Load, "corrupt")));
        assert_eq!(report.summary(), "1 processed, 1 skipped, 1 failed");
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(FileOutcome::Skipped {
            filename: "x.txt".to_owned(),
            reason: SkipReason::InvalidExtension,
        })
        .unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "invalid_extension");

        let json = serde_json::to_value(processed("a.csv")).unwrap();
        assert_eq!(json["status"], "processed");
        assert_eq!(json["output_name"], "id_cleaned.csv");
        assert!(json.get("output_path").is_none());
    }

    #[test]
    fn test_processed_summary() {
        let FileOutcome::Processed(file) = processed("a.csv") else {
            unreachable!()
        };
        assert_eq!(file.summary(), "a.csv -> id_cleaned.csv (3 -> 1 rows, 2 -> 3 columns)");
    }
}
