// Convert interactor - Pasted transcript to WebVTT

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::app::transcript_loader::{TranscriptLoader, TranscriptSource};
use crate::domain::model::{Cue, HighlightConfig};
use crate::error::HighlightResult;
use crate::output::{OverwritePolicy, WebVttWriter};
use crate::parser::SkippedBlock;
use crate::ports::FsPort;

/// Entries shown back to the caller after a conversion
pub const PREVIEW_ENTRIES: usize = 3;

/// Request to convert a pasted transcript
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub overwrite: OverwritePolicy,
}

/// Result of a conversion
#[derive(Debug, Clone)]
pub struct ConvertResponse {
    pub output: PathBuf,
    pub entry_count: usize,
    pub preview: Vec<Cue>,
    pub skipped: Vec<SkippedBlock>,
}

/// Interactor for the pasted-transcript conversion use case
pub struct ConvertInteractor {
    loader: TranscriptLoader,
}

impl ConvertInteractor {
    /// Create new convert interactor with injected ports
    pub fn new(fs_port: Arc<dyn FsPort>) -> Self {
        Self {
            loader: TranscriptLoader::new(fs_port),
        }
    }

    /// Parse, estimate end times and write the `.vtt` artifact
    pub fn execute(
        &self,
        request: ConvertRequest,
        config: &HighlightConfig,
    ) -> HighlightResult<ConvertResponse> {
        let source = TranscriptSource::Pasted(request.input.clone());
        let outcome = self.loader.load(&source, config)?;

        WebVttWriter::new(request.overwrite).write_to_path(&outcome.transcript, &request.output)?;

        let entry_count = outcome.transcript.len();
        info!(
            input = %request.input.display(),
            output = %request.output.display(),
            entries = entry_count,
            "Converted pasted transcript"
        );

        let preview = outcome
            .transcript
            .into_cues()
            .into_iter()
            .take(PREVIEW_ENTRIES)
            .collect();

        Ok(ConvertResponse {
            output: request.output,
            entry_count,
            preview,
            skipped: outcome.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FsLocalAdapter;
    use crate::domain::model::CaptionFormat;
    use crate::parser::CueParser;

    #[test]
    fn test_convert_writes_parseable_vtt() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pasted.txt");
        let output = dir.path().join("out.vtt");
        std::fs::write(
            &input,
            "0:15\nWelcome to the show\n0:42\nLet's talk\nabout testing\n1:05\nQuestions\n1:30\nBye\n",
        )
        .unwrap();

        let response = ConvertInteractor::new(Arc::new(FsLocalAdapter::new()))
            .execute(
                ConvertRequest {
                    input,
                    output: output.clone(),
                    overwrite: OverwritePolicy::Always,
                },
                &HighlightConfig::default(),
            )
            .unwrap();

        assert_eq!(response.entry_count, 4);
        assert_eq!(response.preview.len(), PREVIEW_ENTRIES);
        assert_eq!(response.preview[1].text(), "Let's talk about testing");

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("WEBVTT\n\n00:00:15.000 --> 00:00:17.000\nWelcome to the show\n"));

        let reparsed = CueParser::new(CaptionFormat::WebVtt).parse(&written);
        assert_eq!(reparsed.transcript.len(), 4);
        assert!(reparsed.skipped.is_empty());
    }

    #[test]
    fn test_convert_without_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pasted.txt");
        std::fs::write(&input, "nothing to see\n").unwrap();

        let err = ConvertInteractor::new(Arc::new(FsLocalAdapter::new()))
            .execute(
                ConvertRequest {
                    input,
                    output: dir.path().join("out.vtt"),
                    overwrite: OverwritePolicy::Always,
                },
                &HighlightConfig::default(),
            )
            .unwrap_err();

        assert!(err.is_no_entries());
        assert!(!dir.path().join("out.vtt").exists());
    }
}
