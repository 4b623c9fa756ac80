//! WebVTT cue blocks

use crate::domain::errors::DomainError;
use crate::domain::model::Cue;
use crate::utils::time::{ClockStyle, TimestampGrammar};

use super::join_payload;

const DELIMITER: &str = "-->";

/// Parse one block. The timing line is the first line containing `-->`;
/// anything before it (cue identifier) is ignored and cue settings after the
/// end timestamp are dropped. Header, NOTE and STYLE blocks have no timing
/// line and yield `None`, as do cues without text.
pub fn parse_block(lines: &[&str]) -> Result<Option<Cue>, DomainError> {
    let Some(position) = lines.iter().position(|line| line.contains(DELIMITER)) else {
        return Ok(None);
    };

    let timing = lines[position];
    let (left, right) = timing
        .split_once(DELIMITER)
        .ok_or_else(|| DomainError::MalformedTimestamp(timing.trim().to_string()))?;
    let end_token = right.split_whitespace().next().unwrap_or_default();

    let start = TimestampGrammar::parse_as(left.trim(), ClockStyle::WebVtt)?;
    let end = TimestampGrammar::parse_as(end_token, ClockStyle::WebVtt)?;

    let text = join_payload(&lines[position + 1..]);
    if text.is_empty() {
        return Ok(None);
    }

    Cue::new(start, end, &text).map(Some)
}
