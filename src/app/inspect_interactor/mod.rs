// Inspect interactor - Reports what a transcript source contains

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::app::transcript_loader::{TranscriptLoader, TranscriptSource};
use crate::domain::model::{Cue, HighlightConfig};
use crate::error::HighlightResult;
use crate::ports::FsPort;

/// Request for transcript inspection
#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub source: TranscriptSource,
    /// Number of leading cues to include
    pub preview: usize,
}

/// One skipped block, flattened for reporting
#[derive(Debug, Clone, Serialize)]
pub struct SkippedReport {
    pub line: usize,
    pub reason: String,
}

/// Response from transcript inspection
#[derive(Debug, Clone, Serialize)]
pub struct InspectResponse {
    pub source: TranscriptSource,
    pub cue_count: usize,
    pub first_start: f64,
    pub last_end: f64,
    pub total_words: usize,
    pub preview: Vec<Cue>,
    pub skipped: Vec<SkippedReport>,
}

/// Interactor for transcript inspection use case
pub struct InspectInteractor {
    loader: TranscriptLoader,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(fs_port: Arc<dyn FsPort>) -> Self {
        Self {
            loader: TranscriptLoader::new(fs_port),
        }
    }

    /// Execute transcript inspection
    pub fn execute(
        &self,
        request: InspectRequest,
        config: &HighlightConfig,
    ) -> HighlightResult<InspectResponse> {
        let outcome = self.loader.load(&request.source, config)?;
        let transcript = outcome.transcript;

        let first_start = transcript
            .cues()
            .first()
            .map(|cue| cue.start().as_seconds())
            .unwrap_or_default();
        let last_end = transcript
            .iter()
            .map(|cue| cue.end().as_seconds())
            .fold(0.0, f64::max);
        let total_words = transcript
            .iter()
            .map(|cue| cue.text().split_whitespace().count())
            .sum();

        info!(
            cues = transcript.len(),
            skipped = outcome.skipped.len(),
            "Transcript inspection completed"
        );

        Ok(InspectResponse {
            source: request.source,
            cue_count: transcript.len(),
            first_start,
            last_end,
            total_words,
            preview: transcript.iter().take(request.preview).cloned().collect(),
            skipped: outcome
                .skipped
                .into_iter()
                .map(|block| SkippedReport {
                    line: block.line,
                    reason: block.error.to_string(),
                })
                .collect(),
        })
    }
}
