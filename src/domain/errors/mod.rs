// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Timestamp-shaped token that failed numeric conversion
    MalformedTimestamp(String),
    /// File extension outside the supported caption grammars
    UnsupportedFormat(String),
    /// Source parsed cleanly but produced no cues
    NoEntriesFound(String),
    /// Cue construction violated its invariants
    InvalidCue(String),
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::MalformedTimestamp(token) => write!(f, "Malformed timestamp: '{}'", token),
            DomainError::UnsupportedFormat(ext) => write!(f, "Unsupported format: '{}'", ext),
            DomainError::NoEntriesFound(source) => write!(f, "No entries found in {}", source),
            DomainError::InvalidCue(msg) => write!(f, "Invalid cue: {}", msg),
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
