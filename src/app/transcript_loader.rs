// Transcript loading shared by the interactors

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::model::HighlightConfig;
use crate::error::HighlightResult;
use crate::parser::{CueParser, ParseOutcome, PastedTranscriptParser};
use crate::ports::FsPort;

/// Where a transcript comes from and which grammar reads it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum TranscriptSource {
    /// `.vtt` or `.srt` file, grammar chosen by extension
    CueFile(PathBuf),
    /// Free-form pasted text with inline or alternating timestamps
    Pasted(PathBuf),
}

impl TranscriptSource {
    pub fn path(&self) -> &Path {
        match self {
            TranscriptSource::CueFile(path) | TranscriptSource::Pasted(path) => path,
        }
    }
}

/// Reads a source through the filesystem port and parses it
pub struct TranscriptLoader {
    fs_port: Arc<dyn FsPort>,
}

impl TranscriptLoader {
    pub fn new(fs_port: Arc<dyn FsPort>) -> Self {
        Self { fs_port }
    }

    /// Parse the source. A source that yields no cues is reported as
    /// `NoEntriesFound`.
    pub fn load(
        &self,
        source: &TranscriptSource,
        config: &HighlightConfig,
    ) -> HighlightResult<ParseOutcome> {
        // Grammar selection fails before any read
        let cue_parser = match source {
            TranscriptSource::CueFile(path) => Some(CueParser::for_path(path)?),
            TranscriptSource::Pasted(_) => None,
        };

        let path = source.path();
        if !self.fs_port.file_exists(path) {
            return Err(DomainError::FileNotFound(path.display().to_string()).into());
        }
        let content = self.fs_port.read_to_string(path)?;

        let outcome = match cue_parser {
            Some(parser) => parser.parse(&content),
            None => PastedTranscriptParser::from_config(config).parse(&content),
        };

        if outcome.is_empty() {
            return Err(DomainError::NoEntriesFound(path.display().to_string()).into());
        }

        info!(
            source = %path.display(),
            cues = outcome.transcript.len(),
            skipped = outcome.skipped.len(),
            "Transcript loaded"
        );
        Ok(outcome)
    }
}
