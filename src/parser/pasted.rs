//! Free-form pasted transcripts
//!
//! Two layouts are recognised. Inline lines carry a leading clock and the
//! text on the same line; alternating layouts put a bare clock on its own
//! line followed by one or more text lines. The alternating pass only runs
//! when the inline pass finds nothing.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::domain::model::{Cue, HighlightConfig, PastedEntry, Timestamp, Transcript};
use crate::domain::rules::DurationEstimator;
use crate::utils::time::{ClockStyle, TimestampGrammar};

use super::{ParseOutcome, SkippedBlock};

/// Lines starting with these glyphs are chapter or music markers
const MARKER_GLYPHS: [char; 2] = ['■', '♪'];

/// Clock shape captured by an inline rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockShape {
    /// `H:MM:SS`
    Long,
    /// `M:SS` or `MM:SS`
    Short,
}

impl ClockShape {
    fn pattern(&self) -> &'static str {
        match self {
            ClockShape::Long => r"\d{1,2}:\d{2}:\d{2}",
            ClockShape::Short => r"\d{1,2}:\d{2}",
        }
    }
}

/// Inline layouts, tried in [`InlineRule::PRIORITY`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineRule {
    /// `[0:15] text`
    Bracketed(ClockShape),
    /// `0:15 - text`
    Dashed(ClockShape),
    /// `0:15 text`, `0:15: text`, `0:15-text`
    Loose(ClockShape),
}

impl InlineRule {
    pub const PRIORITY: [InlineRule; 6] = [
        InlineRule::Bracketed(ClockShape::Long),
        InlineRule::Bracketed(ClockShape::Short),
        InlineRule::Dashed(ClockShape::Long),
        InlineRule::Dashed(ClockShape::Short),
        InlineRule::Loose(ClockShape::Long),
        InlineRule::Loose(ClockShape::Short),
    ];

    /// Anchored pattern with the clock in group 1 and the text in group 2
    pub fn pattern(&self) -> String {
        match self {
            InlineRule::Bracketed(shape) => format!(r"^\[({})\]\s*(.+)$", shape.pattern()),
            InlineRule::Dashed(shape) => format!(r"^({})\s*-\s*(.+)$", shape.pattern()),
            InlineRule::Loose(shape) => format!(r"^({})\s*[-:]?\s*(.+)$", shape.pattern()),
        }
    }
}

fn inline_rules() -> &'static [(InlineRule, Regex)] {
    static INLINE_RULES: OnceLock<Vec<(InlineRule, Regex)>> = OnceLock::new();
    INLINE_RULES.get_or_init(|| {
        InlineRule::PRIORITY
            .iter()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern()).expect("Failed to compile inline rule");
                (*rule, regex)
            })
            .collect()
    })
}

fn bare_clock_regex() -> &'static Regex {
    static BARE_CLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    BARE_CLOCK_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{1,2}:\d{2}(?::\d{2})?)$").expect("Failed to compile bare clock regex")
    })
}

fn is_marker(line: &str) -> bool {
    MARKER_GLYPHS.iter().any(|glyph| line.starts_with(*glyph))
}

/// Returns the clock if the line holds nothing but one
fn bare_clock(line: &str) -> Option<&str> {
    bare_clock_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn flush_entry(current: Option<(String, Vec<&str>)>, entries: &mut Vec<PastedEntry>) {
    if let Some((clock, lines)) = current {
        let joined = lines.join(" ");
        let joined = joined.trim();
        if !joined.is_empty() {
            entries.push(PastedEntry::new(clock, joined));
        }
    }
}

/// Match a line against the inline rules; first rule wins
pub fn match_inline(line: &str) -> Option<(InlineRule, PastedEntry)> {
    // A lone H:MM:SS would otherwise read as M:SS followed by text
    if bare_clock(line).is_some() {
        return None;
    }

    // The first rule whose pattern matches decides the line
    let (rule, caps) = inline_rules()
        .iter()
        .find_map(|(rule, regex)| regex.captures(line).map(|caps| (*rule, caps)))?;
    let clock = caps.get(1)?.as_str();
    let text = caps.get(2)?.as_str().trim();

    // A dangling separator is not text
    if text.chars().all(|c| c == '-' || c == ':') {
        return None;
    }
    Some((rule, PastedEntry::new(clock, text)))
}

/// Parser for pasted transcripts; end times come from the estimator
#[derive(Debug, Clone, Default)]
pub struct PastedTranscriptParser {
    estimator: DurationEstimator,
}

impl PastedTranscriptParser {
    pub fn new(estimator: DurationEstimator) -> Self {
        Self { estimator }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::new(DurationEstimator::from_config(config))
    }

    /// Recover `(clock, text)` pairs in source order. An empty result means
    /// no timestamps were recognised.
    pub fn extract_entries(text: &str) -> Vec<PastedEntry> {
        let text = text.trim_start_matches('\u{feff}');
        let inline = Self::inline_pass(text);
        if !inline.is_empty() {
            debug!(entries = inline.len(), "Inline layout recognised");
            return inline;
        }

        let alternating = Self::alternating_pass(text);
        debug!(entries = alternating.len(), "Alternating layout pass finished");
        alternating
    }

    fn inline_pass(text: &str) -> Vec<PastedEntry> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(match_inline)
            .map(|(_, entry)| entry)
            .filter(|entry| !entry.text.is_empty())
            .collect()
    }

    fn alternating_pass(text: &str) -> Vec<PastedEntry> {
        let mut entries = Vec::new();
        let mut current: Option<(String, Vec<&str>)> = None;

        for line in text.lines().map(str::trim) {
            if line.is_empty() || is_marker(line) {
                continue;
            }

            match bare_clock(line) {
                Some(clock) => {
                    flush_entry(current.take(), &mut entries);
                    current = Some((clock.to_string(), Vec::new()));
                }
                None => {
                    // Text before the first clock has no owner
                    if let Some((_, lines)) = current.as_mut() {
                        lines.push(line);
                    }
                }
            }
        }
        flush_entry(current, &mut entries);

        entries
    }

    /// Normalise clocks and estimate end times. Each entry's end is capped by
    /// the next entry's start; ends that land before the start are clamped to
    /// it.
    pub fn to_transcript(&self, entries: &[PastedEntry]) -> ParseOutcome {
        let mut skipped = Vec::new();
        let starts: Vec<Option<Timestamp>> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                match TimestampGrammar::parse_as(&entry.raw_timestamp, ClockStyle::Annotated) {
                    Ok(start) => Some(start),
                    Err(error) => {
                        warn!(entry = index + 1, %error, "Skipping pasted entry");
                        skipped.push(SkippedBlock {
                            line: index + 1,
                            error,
                        });
                        None
                    }
                }
            })
            .collect();

        let mut cues = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let Some(start) = starts[index] else {
                continue;
            };
            let next_start = starts[index + 1..].iter().flatten().next().copied();
            let raw_end = self.estimator.estimate_end(start, &entry.text, next_start);
            if raw_end < start.as_seconds() {
                warn!(
                    entry = index + 1,
                    start = start.as_seconds(),
                    raw_end,
                    "Estimated end precedes start; clamping"
                );
            }

            match Cue::clamped(start, raw_end, &entry.text) {
                Ok(cue) => cues.push(cue),
                Err(error) => skipped.push(SkippedBlock {
                    line: index + 1,
                    error,
                }),
            }
        }

        ParseOutcome {
            transcript: Transcript::new(cues),
            skipped,
        }
    }

    /// Extract entries and materialise them as cues
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let entries = Self::extract_entries(text);
        let outcome = self.to_transcript(&entries);
        info!(
            entries = entries.len(),
            cues = outcome.transcript.len(),
            "Parsed pasted transcript"
        );
        outcome
    }
}
