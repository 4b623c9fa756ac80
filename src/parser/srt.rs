//! SubRip cue blocks

use crate::domain::errors::DomainError;
use crate::domain::model::Cue;
use crate::utils::time::{ClockStyle, TimestampGrammar};

use super::join_payload;

/// Parse one block: sequence number, `HH:MM:SS,mmm --> HH:MM:SS,mmm`, then
/// text lines. Blocks of any other shape yield `None`.
pub fn parse_block(lines: &[&str]) -> Result<Option<Cue>, DomainError> {
    if lines.len() < 3 {
        return Ok(None);
    }

    let Some((left, right)) = lines[1].split_once("-->") else {
        return Ok(None);
    };

    // Trailing coordinates after the end time are ignored
    let end_token = right.split_whitespace().next().unwrap_or_default();

    let start = TimestampGrammar::parse_as(left.trim(), ClockStyle::SubRip)?;
    let end = TimestampGrammar::parse_as(end_token, ClockStyle::SubRip)?;

    let text = join_payload(&lines[2..]);
    if text.is_empty() {
        return Ok(None);
    }

    Cue::new(start, end, &text).map(Some)
}
