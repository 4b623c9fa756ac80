// Domain models - Core types and data structures

use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::utils::time::TimestampGrammar;

/// Clock value in seconds with millisecond precision. Never negative; the hour
/// component is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp {
    seconds: f64,
}

impl Timestamp {
    /// Create a timestamp from seconds, rejecting negative or non-finite values
    pub fn from_seconds(seconds: f64) -> Result<Self, DomainError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Timestamp must be a non-negative number of seconds, got {}",
                seconds
            )));
        }
        Ok(Self { seconds })
    }

    /// Create a timestamp from clock components
    pub fn from_components(hours: u64, minutes: u64, seconds: u64, milliseconds: u64) -> Self {
        let total_seconds = hours as f64 * 3600.0
            + minutes as f64 * 60.0
            + seconds as f64
            + milliseconds as f64 / 1000.0;
        Self { seconds: total_seconds }
    }

    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Whole milliseconds, rounded to the nearest millisecond
    pub fn total_millis(&self) -> u64 {
        (self.seconds * 1000.0).round() as u64
    }

    /// Split into (hours, minutes, seconds, milliseconds)
    pub fn components(&self) -> (u64, u64, u64, u64) {
        let millis = self.total_millis();
        let hours = millis / 3_600_000;
        let minutes = (millis % 3_600_000) / 60_000;
        let seconds = (millis % 60_000) / 1000;
        (hours, minutes, seconds, millis % 1000)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TimestampGrammar::render_strict(*self))
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One normalized caption unit with explicit start and end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    start: Timestamp,
    end: Timestamp,
    text: String,
}

impl Cue {
    /// Create a cue, rejecting empty text and end times before the start
    pub fn new(start: Timestamp, end: Timestamp, text: &str) -> Result<Self, DomainError> {
        let text = collapse_whitespace(text);
        if text.is_empty() {
            return Err(DomainError::InvalidCue("cue text is empty".to_string()));
        }
        if end < start {
            return Err(DomainError::InvalidCue(format!(
                "end ({}) precedes start ({})",
                end, start
            )));
        }
        Ok(Self { start, end, text })
    }

    /// Create a cue whose raw end (in seconds) is clamped up to the start
    pub fn clamped(start: Timestamp, raw_end: f64, text: &str) -> Result<Self, DomainError> {
        let end = if raw_end.is_finite() && raw_end > start.as_seconds() {
            Timestamp::from_seconds(raw_end)?
        } else {
            start
        };
        Self::new(start, end, text)
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn duration(&self) -> f64 {
        self.end.as_seconds() - self.start.as_seconds()
    }

    /// Case-insensitive substring match; `keyword` must already be lowercase
    pub fn mentions(&self, keyword: &str) -> bool {
        self.text.to_lowercase().contains(keyword)
    }
}

/// Ordered cue sequence from a single source, in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    cues: Vec<Cue>,
}

impl Transcript {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn get(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.cues.len().checked_sub(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    /// Cues addressed by a segment, or `None` if it falls outside the transcript
    pub fn slice(&self, segment: &IndexSegment) -> Option<&[Cue]> {
        self.cues.get(segment.start_index..=segment.end_index)
    }

    pub fn into_cues(self) -> Vec<Cue> {
        self.cues
    }
}

impl FromIterator<Cue> for Transcript {
    fn from_iter<I: IntoIterator<Item = Cue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}

/// Inclusive range of transcript indices selected for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexSegment {
    pub start_index: usize,
    pub end_index: usize,
}

impl IndexSegment {
    pub fn new(start_index: usize, end_index: usize) -> Result<Self, DomainError> {
        if end_index < start_index {
            return Err(DomainError::BadArgs(format!(
                "Segment end index {} precedes start index {}",
                end_index, start_index
            )));
        }
        Ok(Self {
            start_index,
            end_index,
        })
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }
}

/// Raw time range chosen without a materialized transcript index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeRangeSegment {
    pub start: f64,
    pub end: f64,
    pub title: String,
    pub mid: f64,
}

impl TimeRangeSegment {
    pub fn new(start: f64, end: f64, title: String) -> Self {
        Self {
            start,
            end,
            title,
            mid: (start + end) / 2.0,
        }
    }
}

/// Timestamp/text pair recovered from pasted text, before end-time estimation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastedEntry {
    pub raw_timestamp: String,
    pub text: String,
}

impl PastedEntry {
    pub fn new(raw_timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            raw_timestamp: raw_timestamp.into(),
            text: text.into(),
        }
    }
}

/// Structured caption grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    /// WebVTT (.vtt), dot-millisecond timestamps
    WebVtt,
    /// SubRip (.srt), comma-millisecond timestamps with sequence numbers
    Srt,
}

impl CaptionFormat {
    /// Select a grammar from a file extension (case-insensitive, leading dot optional)
    pub fn from_extension(extension: &str) -> Result<Self, DomainError> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "vtt" => Ok(CaptionFormat::WebVtt),
            "srt" => Ok(CaptionFormat::Srt),
            "" => Err(DomainError::UnsupportedFormat("(no extension)".to_string())),
            other => Err(DomainError::UnsupportedFormat(format!(".{}", other))),
        }
    }

    /// Select a grammar from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_extension(&extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            CaptionFormat::WebVtt => "vtt",
            CaptionFormat::Srt => "srt",
        }
    }
}

impl fmt::Display for CaptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptionFormat::WebVtt => write!(f, "WebVTT"),
            CaptionFormat::Srt => write!(f, "SRT"),
        }
    }
}

/// Tunables for selection, estimation and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Number of highlight segments requested
    pub cards: usize,
    /// Cues following a keyword hit that join its segment
    pub segment_span: usize,
    /// Reading rate used to estimate cue durations
    pub words_per_second: f64,
    /// Floor for estimated cue durations, in seconds
    pub min_cue_duration: f64,
    /// Gap left before the next cue when capping an estimate, in seconds
    pub cue_gap: f64,
    /// Padding around keyword hits in the time-range variant, in seconds
    pub keyword_padding: f64,
    /// Longest filler range in the time-range variant, in seconds
    pub fill_cap: f64,
    /// Minimum distance between time-range midpoints, in seconds
    pub min_separation: f64,
    /// Longest card title, in characters
    pub title_max_chars: usize,
    /// Word budget for the extractive summary fallback
    pub summary_max_words: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            cards: 4,
            segment_span: 5,
            words_per_second: 3.0,
            min_cue_duration: 2.0,
            cue_gap: 0.1,
            keyword_padding: 10.0,
            fill_cap: 60.0,
            min_separation: 10.0,
            title_max_chars: 120,
            summary_max_words: 30,
            log_level: "info".to_string(),
            log_format: "compact".to_string(),
        }
    }
}
