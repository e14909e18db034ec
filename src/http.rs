//! HTTP surface for the cleaning pipeline.
//!
//! ```text
//! GET  /                     upload form
//! GET  /health               liveness
//! POST /process              multipart batch -> JSON report
//! GET  /download/{filename}  cleaned artifact as attachment
//! ```
//!
//! Handlers stay thin: they decode the request, hand the batch to
//! [`CleaningPipeline`](crate::pipeline::CleaningPipeline) on a blocking
//! thread and map [`TabcleanError`](crate::error::TabcleanError) to JSON
//! error bodies.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
