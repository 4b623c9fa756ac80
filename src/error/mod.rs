//! Error handling module for the highlight pipeline

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for highlight operations
#[derive(Error, Debug)]
pub enum HighlightError {
    /// Transcript file missing or unreadable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Caption file extension outside {.vtt, .srt}
    #[error("Unsupported transcript format: '{extension}'. Expected .vtt or .srt")]
    UnsupportedFormat { extension: String },

    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Card export failed
    #[error("Serialization failed: {message}")]
    Serialization { message: String },

    /// Output artifact could not be written
    #[error("Failed to write output file: {message}")]
    Output { message: String },
}

impl HighlightError {
    /// Whether the error means the source yielded no usable entries
    pub fn is_no_entries(&self) -> bool {
        matches!(self, HighlightError::Domain(DomainError::NoEntriesFound(_)))
    }
}

/// Result type alias for highlight operations
pub type HighlightResult<T> = std::result::Result<T, HighlightError>;
