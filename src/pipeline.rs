//! Batch processing of uploaded files.
//!
//! Each upload in a batch is handled on its own:
//!
//! ```text
//! validate extension ─> sanitize name ─> stage bytes ─> load ─> clean ─> write artifact
//! ```
//!
//! A file that fails at any stage is recorded in the [`BatchReport`] and the
//! rest of the batch carries on.
//!
//! # Example
//!
//! ```no_run
//! use tabclean::cleaning::{CleaningConfig, NullAction};
//! use tabclean::config::AppConfig;
//! use tabclean::pipeline::{CleaningPipeline, Upload};
//!
//! let pipeline = CleaningPipeline::from_config(&AppConfig::default())?;
//! let config = CleaningConfig {
//!     null_action: NullAction::Mean,
//!     ..Default::default()
//! };
//! let report = pipeline.process_batch(&config, &[Upload::new("data.csv", "a,b\n1,\n")])?;
//! println!("{}", report.summary());
//! # Ok::<(), tabclean::error::TabcleanError>(())
//! ```

pub mod executor;
pub mod ids;
pub mod report;
pub mod sanitize;
pub mod storage;

pub use executor::{CleaningPipeline, Upload};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use report::{BatchReport, FailureStage, FileOutcome, ProcessedFile, SkipReason};
pub use sanitize::secure_filename;
pub use storage::Storage;
