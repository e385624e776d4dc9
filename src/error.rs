//! Error types for coronagraph
//!
//! Every fallible operation in the pipeline returns `Result<T>`. All errors
//! are terminal for the current invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for coronagraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// All errors that can occur while fetching, validating, or charting data
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed date or stamp string
    #[error("Invalid format: {0}")]
    Format(String),

    /// Date or sample window outside the permitted bounds
    #[error("{0}")]
    Range(String),

    /// One or more requested region names are not in the catalog
    #[error("Invalid region {invalid:?}, the following are valid names:\n {valid}")]
    InvalidSelection { invalid: Vec<String>, valid: String },

    /// Remote retrieval failed
    #[error("Failed to fetch dataset: {0}")]
    Fetch(String),

    /// The download succeeded but the body is not a dataset
    #[error("Downloaded data is not a valid dataset: {0}")]
    InvalidPayload(String),

    /// The cached dataset exists but cannot be parsed
    #[error("Cached dataset {} is corrupt: {reason}", .path.display())]
    CorruptCache { path: PathBuf, reason: String },

    /// An expected cache file is missing
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Any other filesystem failure
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Runtime configuration could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),

    /// The chart could not be drawn or saved
    #[error("Failed to render chart: {0}")]
    Render(String),
}

impl Error {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Format(_) => Some("Dates must be in the yyyy-mm-dd form, e.g. 2020-03-15."),
            Self::InvalidSelection { .. } => Some("Quote names containing spaces, e.g. -r \"Emilia Romagna\"."),
            Self::Fetch(_) => Some("Check your network connection or try --fetcher curl."),
            Self::InvalidPayload(_) => Some("Check that --source-url points at the regional JSON dataset."),
            Self::CorruptCache { .. } => Some("Run again with --force to download the dataset anew."),
            Self::NotFound(_) => Some("Run again with --force to download the dataset."),
            Self::Config(_) => Some("Pass --data-dir or set CORONAGRAPH_DATA_DIR."),
            _ => None,
        }
    }
}
