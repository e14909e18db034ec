//! Shared state for the HTTP server.

use crate::pipeline::CleaningPipeline;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Arc<CleaningPipeline>,
    /// Request body ceiling applied by the router
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(pipeline: CleaningPipeline, max_upload_bytes: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            max_upload_bytes,
        }
    }
}
