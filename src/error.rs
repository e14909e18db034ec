//! Centralized error handling for tabclean.
//!
//! Every fallible operation in the library returns [`Result`], whose error
//! type [`TabcleanError`] sorts failures into the categories the batch report
//! and the HTTP layer care about:
//!
//! ```
//! use tabclean::error::TabcleanError;
//!
//! fn describe(err: &TabcleanError) -> &'static str {
//!     match err {
//!         TabcleanError::Parse(_) => "the file is not valid tabular data",
//!         TabcleanError::EmptyBatch => "nothing to process",
//!         TabcleanError::NotFound(_) => "no such artifact",
//!         _ => "internal failure",
//!     }
//! }
//! ```
//!
//! `From` conversions let `?` lift I/O, Polars, calamine and workbook writer
//! errors. The [`ResultExt`] trait adds a message prefix:
//!
//! ```no_run
//! use tabclean::error::ResultExt as _;
//!
//! fn read_upload(path: &str) -> tabclean::error::Result<Vec<u8>> {
//!     std::fs::read(path).context("Failed to read staged upload")
//! }
//! ```

use std::fmt;

/// Main error type for tabclean operations.
#[derive(Debug)]
pub enum TabcleanError {
    /// I/O errors (staging, writing artifacts, reading downloads)
    Io(std::io::Error),

    /// Input content is not the tabular structure its extension promises
    Parse(String),

    /// Transformation or serialization failures
    DataProcessing(String),

    /// A caller-supplied name that cannot be resolved safely
    InvalidPath(String),

    /// No file in the batch passed validation
    EmptyBatch,

    /// Requested artifact does not exist
    NotFound(String),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for TabcleanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::EmptyBatch => write!(f, "No valid files uploaded!"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TabcleanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TabcleanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TabcleanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for TabcleanError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<calamine::Error> for TabcleanError {
    fn from(err: calamine::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for TabcleanError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::DataProcessing(format!("Workbook write failed: {err}"))
    }
}

/// Result type alias for tabclean operations.
pub type Result<T> = std::result::Result<T, TabcleanError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<TabcleanError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(msg.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(f(), e.into()))
    }
}

// Parse and NotFound keep their variant so callers can still classify them.
fn wrap(msg: String, err: TabcleanError) -> TabcleanError {
    match err {
        TabcleanError::Parse(inner) => TabcleanError::Parse(format!("{msg}: {inner}")),
        TabcleanError::NotFound(inner) => TabcleanError::NotFound(format!("{msg}: {inner}")),
        TabcleanError::EmptyBatch => TabcleanError::EmptyBatch,
        other => TabcleanError::Other(format!("{msg}: {other}")),
    }
}
