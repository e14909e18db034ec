//! # tabclean - Tabular File Cleaning Service
//!
//! tabclean accepts batches of CSV and Excel files, cleans each one with a
//! shared set of options and writes a cleaned artifact per file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tabclean::cleaning::{CleaningConfig, NullAction};
//! use tabclean::config::AppConfig;
//! use tabclean::pipeline::{CleaningPipeline, Upload};
//!
//! let pipeline = CleaningPipeline::from_config(&AppConfig::default())?;
//! let config = CleaningConfig {
//!     null_action: NullAction::Drop,
//!     remove_duplicates: true,
//!     assign_primary_key: true,
//!     filetype: None,
//! };
//!
//! let upload = Upload::new("data.csv", std::fs::read("data.csv")?);
//! let report = pipeline.process_batch(&config, &[upload])?;
//! for file in report.processed() {
//!     println!("{}", file.summary());
//! }
//! # Ok::<(), tabclean::error::TabcleanError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`cleaning`]: Loading, transforming and writing a single table
//! - [`pipeline`]: Batch orchestration, staging and the per-file report
//! - [`http`]: axum router exposing upload and download endpoints
//! - [`config`]: JSON application configuration
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: tracing subscriber setup
//!
//! ## Cleaning Order
//!
//! Steps always run in the same order on a Polars `LazyFrame`:
//!
//! ```text
//! null handling -> duplicate removal -> primary key
//! ```
//!
//! so a primary key is assigned to the rows that survive, numbered from 1.

#![warn(clippy::all, rust_2018_idioms)]

pub mod cleaning;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod pipeline;
