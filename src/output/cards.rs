//! Highlight card assembly

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::domain::model::{HighlightConfig, IndexSegment, TimeRangeSegment, Timestamp, Transcript};
use crate::output::HighlightCard;
use crate::ports::SummarizerPort;
use crate::utils::time::TimestampGrammar;

/// Video id of a YouTube watch, `youtu.be`, `/embed/` or `/v/` link
pub fn youtube_video_id(video_url: &str) -> Option<String> {
    let parsed = Url::parse(video_url.trim()).ok()?;
    let id = match parsed.host_str()? {
        "youtu.be" => parsed.path_segments()?.next()?.to_string(),
        "www.youtube.com" | "youtube.com" | "m.youtube.com" => {
            let mut segments = parsed.path_segments()?;
            match segments.next()? {
                "watch" => parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")?
                    .1
                    .into_owned(),
                "embed" | "v" => segments.next()?.to_string(),
                _ => return None,
            }
        }
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

/// Link into the video at a whole second. YouTube links are rebuilt in
/// watch form; other URLs get a `t` query parameter appended.
pub fn deep_link(video_url: &str, start_seconds: f64) -> String {
    let seconds = start_seconds.max(0.0).floor() as u64;
    if let Some(id) = youtube_video_id(video_url) {
        return format!("https://www.youtube.com/watch?v={}&t={}s", id, seconds);
    }

    let separator = if video_url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}s", video_url, separator, seconds)
}

/// Thumbnail file name for a 1-based card index
pub fn thumbnail_name(index: usize) -> String {
    format!("thumbnail_{:03}.png", index)
}

/// Turns selected segments into cards
pub struct CardBuilder {
    summarizer: Arc<dyn SummarizerPort>,
    video_url: Option<String>,
    title_max_chars: usize,
}

impl CardBuilder {
    pub fn new(summarizer: Arc<dyn SummarizerPort>, config: &HighlightConfig) -> Self {
        Self {
            summarizer,
            video_url: None,
            title_max_chars: config.title_max_chars,
        }
    }

    pub fn with_video_url(mut self, video_url: Option<String>) -> Self {
        self.video_url = video_url.filter(|url| !url.trim().is_empty());
        self
    }

    /// One card per index segment, in segment order. Segments outside the
    /// transcript are dropped.
    pub fn build_from_segments(
        &self,
        transcript: &Transcript,
        segments: &[IndexSegment],
    ) -> Vec<HighlightCard> {
        let mut cards = Vec::with_capacity(segments.len());

        for segment in segments {
            let Some(cues) = transcript.slice(segment) else {
                warn!(?segment, "Segment outside transcript, skipping");
                continue;
            };
            let (Some(first), Some(last)) = (cues.first(), cues.last()) else {
                continue;
            };

            let text = cues.iter().map(|cue| cue.text()).collect::<Vec<_>>().join(" ");
            let title = truncate_chars(first.text(), self.title_max_chars);
            let start_seconds = first.start().as_seconds();
            // Out-of-order pasted cues can end before the segment starts
            let end_seconds = last.end().as_seconds().max(start_seconds);
            let card = self.card(cards.len() + 1, start_seconds, end_seconds, title, text);
            cards.push(card);
        }

        debug!(cards = cards.len(), "Built cards from index segments");
        cards
    }

    /// One card per time range. The transcript text is every cue overlapping
    /// the range.
    pub fn build_from_ranges(
        &self,
        transcript: &Transcript,
        ranges: &[TimeRangeSegment],
    ) -> Vec<HighlightCard> {
        ranges
            .iter()
            .enumerate()
            .map(|(i, range)| {
                let text = transcript
                    .iter()
                    .filter(|cue| {
                        cue.start().as_seconds() <= range.end && cue.end().as_seconds() >= range.start
                    })
                    .map(|cue| cue.text())
                    .collect::<Vec<_>>()
                    .join(" ");
                self.card(i + 1, range.start, range.end, range.title.clone(), text)
            })
            .collect()
    }

    fn card(
        &self,
        index: usize,
        start_seconds: f64,
        end_seconds: f64,
        title: String,
        transcript_text: String,
    ) -> HighlightCard {
        let clock = Timestamp::from_seconds(start_seconds)
            .map(TimestampGrammar::render_display)
            .unwrap_or_else(|_| "0:00".to_string());

        HighlightCard {
            index,
            start_seconds,
            end_seconds,
            mid_seconds: (start_seconds + end_seconds) / 2.0,
            clock,
            deep_link: self
                .video_url
                .as_deref()
                .map(|url| deep_link(url, start_seconds)),
            thumbnail: thumbnail_name(index),
            title,
            summary: self.summarizer.summarize(&transcript_text),
            transcript_text,
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
