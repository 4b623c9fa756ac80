//! Highlight CLI Library
//!
//! Caption and transcript ingestion for highlight previews: WebVTT/SRT and
//! pasted-transcript parsing, reading-rate duration estimation, and
//! keyword-first segment selection.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod parser;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{Cue, HighlightConfig, IndexSegment, TimeRangeSegment, Timestamp, Transcript};
pub use domain::rules::{DurationEstimator, SegmentSelector, TimeRangeSelector};
pub use error::{HighlightError, HighlightResult};
pub use parser::{CueParser, PastedTranscriptParser};
pub use utils::time::TimestampGrammar;
