// Domain rules - Segment selection and timing policies

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::model::*;
use crate::utils::time::TimestampGrammar;

/// Transcript indices claimed by segments during one selection call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimedIndices(BTreeSet<usize>);

impl ClaimedIndices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Mark every index of the segment as used
    pub fn claim(&mut self, segment: &IndexSegment) {
        self.0.extend(segment.indices());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indices below `total` not yet claimed, ascending
    pub fn unclaimed(&self, total: usize) -> Vec<usize> {
        (0..total).filter(|i| !self.0.contains(i)).collect()
    }
}

/// Keyword-first selection of non-overlapping transcript index ranges
#[derive(Debug, Clone)]
pub struct SegmentSelector {
    span: usize,
}

impl Default for SegmentSelector {
    fn default() -> Self {
        Self { span: 5 }
    }
}

impl SegmentSelector {
    /// `span` is the number of cues after a keyword hit that join its segment
    pub fn new(span: usize) -> Self {
        Self { span }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::new(config.segment_span)
    }

    /// Select at most `count` segments: keyword hits first, in keyword order,
    /// then evenly spaced filler over the unclaimed cues. Segments are not
    /// re-sorted.
    pub fn select<S: AsRef<str>>(
        &self,
        transcript: &Transcript,
        keywords: &[S],
        count: usize,
    ) -> Vec<IndexSegment> {
        let (mut segments, claimed) =
            self.keyword_phase(transcript, keywords, count, ClaimedIndices::new());
        let found = segments.len();

        let filler = self.fill_phase(transcript, &claimed, count.saturating_sub(found));
        debug!(
            keyword_segments = found,
            fill_segments = filler.len(),
            "Segment selection finished"
        );

        segments.extend(filler);
        segments.truncate(count);
        segments
    }

    /// First unclaimed, case-insensitive hit per keyword claims `[i, i + span]`
    /// (clipped to the last cue). Stops once `count` segments exist.
    pub fn keyword_phase<S: AsRef<str>>(
        &self,
        transcript: &Transcript,
        keywords: &[S],
        count: usize,
        mut claimed: ClaimedIndices,
    ) -> (Vec<IndexSegment>, ClaimedIndices) {
        let mut segments = Vec::new();
        let Some(last_index) = transcript.last_index() else {
            return (segments, claimed);
        };

        for keyword in keywords {
            if segments.len() >= count {
                break;
            }

            let needle = keyword.as_ref().to_lowercase();
            if needle.trim().is_empty() {
                debug!("Skipping blank keyword");
                continue;
            }

            let hit = transcript
                .iter()
                .enumerate()
                .find(|(index, cue)| !claimed.contains(*index) && cue.mentions(&needle))
                .map(|(index, _)| index);

            match hit {
                Some(index) => {
                    let segment = IndexSegment {
                        start_index: index,
                        end_index: index.saturating_add(self.span).min(last_index),
                    };
                    debug!(keyword = %needle, ?segment, "Keyword hit");
                    claimed.claim(&segment);
                    segments.push(segment);
                }
                None => debug!(keyword = %needle, "No unclaimed hit for keyword"),
            }
        }

        (segments, claimed)
    }

    /// Partition the unclaimed indices into `remaining` chunks by position in
    /// the unclaimed list. Chunk size is `max(1, unclaimed / remaining)`; the
    /// last chunk does not absorb leftovers.
    pub fn fill_phase(
        &self,
        transcript: &Transcript,
        claimed: &ClaimedIndices,
        remaining: usize,
    ) -> Vec<IndexSegment> {
        if remaining == 0 {
            return Vec::new();
        }

        let unclaimed = claimed.unclaimed(transcript.len());
        if unclaimed.is_empty() {
            return Vec::new();
        }

        let chunk = (unclaimed.len() / remaining).max(1);
        let mut segments = Vec::new();

        for i in 0..remaining {
            let start_pos = i * chunk;
            if start_pos >= unclaimed.len() {
                break;
            }
            let end_pos = ((i + 1) * chunk - 1).min(unclaimed.len() - 1);
            segments.push(IndexSegment {
                start_index: unclaimed[start_pos],
                end_index: unclaimed[end_pos],
            });
        }

        segments
    }
}

/// Keyword-first selection of raw time ranges, for inputs where only the
/// video duration is known
#[derive(Debug, Clone)]
pub struct TimeRangeSelector {
    padding: f64,
    fill_cap: f64,
    min_separation: f64,
    title_max_chars: usize,
}

impl Default for TimeRangeSelector {
    fn default() -> Self {
        Self::from_config(&HighlightConfig::default())
    }
}

impl TimeRangeSelector {
    pub fn from_config(config: &HighlightConfig) -> Self {
        Self {
            padding: config.keyword_padding,
            fill_cap: config.fill_cap,
            min_separation: config.min_separation,
            title_max_chars: config.title_max_chars,
        }
    }

    /// Select at most `count` ranges sorted by start time. A non-positive
    /// `total_duration` means the duration is unknown: keyword ranges are not
    /// clipped at the end and no filler is produced.
    pub fn select<S: AsRef<str>>(
        &self,
        transcript: &Transcript,
        keywords: &[S],
        count: usize,
        total_duration: f64,
    ) -> Vec<TimeRangeSegment> {
        let duration_known = total_duration > 0.0;
        let mut segments: Vec<TimeRangeSegment> = Vec::new();

        for keyword in keywords {
            let needle = keyword.as_ref().to_lowercase();
            if needle.trim().is_empty() {
                continue;
            }

            for cue in transcript.iter().filter(|cue| cue.mentions(&needle)) {
                let start = (cue.start().as_seconds() - self.padding).max(0.0);
                let mut end = cue.end().as_seconds() + self.padding;
                if duration_known {
                    end = end.min(total_duration);
                }
                let title: String = cue.text().chars().take(self.title_max_chars).collect();
                let candidate = TimeRangeSegment::new(start, end.max(start), title);

                if self.is_separated(&segments, candidate.mid) {
                    debug!(keyword = %needle, start, end, "Keyword range selected");
                    segments.push(candidate);
                    break;
                }
            }
        }

        if segments.len() < count && duration_known {
            let remaining = count - segments.len();
            let step = total_duration / (remaining + 1) as f64;

            for i in 0..remaining {
                let start = (i as f64 * step).max(0.0);
                let end = total_duration.min(start + self.fill_cap.min(step));
                let clock = TimestampGrammar::render_display(
                    Timestamp::from_seconds(start).unwrap_or_default(),
                );
                let candidate = TimeRangeSegment::new(start, end, format!("Highlight at {}", clock));

                if self.is_separated(&segments, candidate.mid) {
                    segments.push(candidate);
                }
            }
        }

        segments.sort_by(|a, b| a.start.total_cmp(&b.start));
        segments.truncate(count);
        segments
    }

    fn is_separated(&self, chosen: &[TimeRangeSegment], mid: f64) -> bool {
        chosen
            .iter()
            .all(|segment| (mid - segment.mid).abs() >= self.min_separation)
    }
}

/// Estimates end times for cues whose source states only a start
#[derive(Debug, Clone)]
pub struct DurationEstimator {
    words_per_second: f64,
    min_duration: f64,
    gap: f64,
}

impl Default for DurationEstimator {
    fn default() -> Self {
        Self {
            words_per_second: 3.0,
            min_duration: 2.0,
            gap: 0.1,
        }
    }
}

impl DurationEstimator {
    pub fn new(words_per_second: f64, min_duration: f64, gap: f64) -> Self {
        Self {
            words_per_second,
            min_duration,
            gap,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::new(config.words_per_second, config.min_cue_duration, config.cue_gap)
    }

    /// Spoken duration from the word count, never below the floor
    pub fn spoken_duration(&self, text: &str) -> f64 {
        let words = text.split_whitespace().count() as f64;
        (words / self.words_per_second).max(self.min_duration)
    }

    /// End time in seconds. When the next start is known the estimate is capped
    /// at `next_start - start - gap`; the capped value is returned as is, even
    /// when it does not exceed `start`.
    pub fn estimate_end(&self, start: Timestamp, text: &str, next_start: Option<Timestamp>) -> f64 {
        let mut duration = self.spoken_duration(text);
        if let Some(next) = next_start {
            duration = duration.min(next.as_seconds() - start.as_seconds() - self.gap);
        }
        start.as_seconds() + duration
    }
}
