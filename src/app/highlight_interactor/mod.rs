// Highlight interactor - Orchestrates segment selection and card building

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::app::transcript_loader::{TranscriptLoader, TranscriptSource};
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::error::HighlightResult;
use crate::output::{CardBuilder, HighlightCard};
use crate::parser::SkippedBlock;
use crate::ports::*;

/// Request for index-segment highlight cards
#[derive(Debug, Clone)]
pub struct CardsRequest {
    pub source: TranscriptSource,
    pub keywords: Vec<String>,
    pub count: usize,
    pub video_url: Option<String>,
}

/// Request for time-range highlight cards
#[derive(Debug, Clone)]
pub struct RangesRequest {
    pub source: TranscriptSource,
    pub keywords: Vec<String>,
    pub count: usize,
    pub video_url: Option<String>,
    /// Video length in seconds; `None` means unknown
    pub duration: Option<f64>,
}

/// Cards plus what the parser had to skip
#[derive(Debug, Clone, Serialize)]
pub struct CardsResponse {
    pub cue_count: usize,
    pub cards: Vec<HighlightCard>,
    #[serde(skip)]
    pub skipped: Vec<SkippedBlock>,
}

impl CardsResponse {
    /// Fewer cards than requested is not an error, only worth reporting
    pub fn is_short(&self, requested: usize) -> bool {
        self.cards.len() < requested
    }
}

/// Interactor for the highlight card use cases
pub struct HighlightInteractor {
    loader: TranscriptLoader,
    summarizer: Arc<dyn SummarizerPort>,
}

impl HighlightInteractor {
    /// Create new highlight interactor with injected ports
    pub fn new(fs_port: Arc<dyn FsPort>, summarizer: Arc<dyn SummarizerPort>) -> Self {
        Self {
            loader: TranscriptLoader::new(fs_port),
            summarizer,
        }
    }

    /// Keyword-first index segments materialised as cards
    pub fn cards(
        &self,
        request: CardsRequest,
        config: &HighlightConfig,
    ) -> HighlightResult<CardsResponse> {
        let outcome = self.loader.load(&request.source, config)?;
        let transcript = &outcome.transcript;

        let selector = SegmentSelector::from_config(config);
        let segments = selector.select(transcript, &request.keywords, request.count);
        info!(
            requested = request.count,
            selected = segments.len(),
            "Selected index segments"
        );

        let cards = CardBuilder::new(Arc::clone(&self.summarizer), config)
            .with_video_url(request.video_url)
            .build_from_segments(transcript, &segments);

        Ok(CardsResponse {
            cue_count: transcript.len(),
            cards,
            skipped: outcome.skipped,
        })
    }

    /// Keyword-first time ranges, sorted by start, materialised as cards
    pub fn ranges(
        &self,
        request: RangesRequest,
        config: &HighlightConfig,
    ) -> HighlightResult<CardsResponse> {
        let outcome = self.loader.load(&request.source, config)?;
        let transcript = &outcome.transcript;

        let duration = request.duration.unwrap_or(0.0);
        let selector = TimeRangeSelector::from_config(config);
        let ranges = selector.select(transcript, &request.keywords, request.count, duration);
        info!(
            requested = request.count,
            selected = ranges.len(),
            duration,
            "Selected time ranges"
        );

        let cards = CardBuilder::new(Arc::clone(&self.summarizer), config)
            .with_video_url(request.video_url)
            .build_from_ranges(transcript, &ranges);

        Ok(CardsResponse {
            cue_count: transcript.len(),
            cards,
            skipped: outcome.skipped,
        })
    }
}
