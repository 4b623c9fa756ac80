//! Caption clock parsing and rendering
//!
//! Recognised encodings:
//!
//! - `HH:MM:SS.mmm` (WebVTT cue timing)
//! - `HH:MM:SS,mmm` (SubRip cue timing)
//! - `M:SS.mmm` (short WebVTT cue timing)
//! - `M:SS`, `MM:SS`, `H:MM:SS` (free-text annotations)
//!
//! `seconds = hours * 3600 + minutes * 60 + secs + millis / 1000`

use crate::domain::errors::DomainError;
use crate::domain::model::Timestamp;

/// Context a timestamp token is read in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStyle {
    /// Any recognised encoding
    Any,
    /// Dot-millisecond cue timing, three fields or the short two-field form
    WebVtt,
    /// Comma-millisecond cue timing, always three fields
    SubRip,
    /// Annotation clock without a sub-second field
    Annotated,
}

/// Parser and renderer for caption clock values
pub struct TimestampGrammar;

impl TimestampGrammar {
    /// Parse a token in any recognised encoding
    pub fn parse(token: &str) -> Result<Timestamp, DomainError> {
        Self::parse_as(token, ClockStyle::Any)
    }

    /// Parse a token, accepting only the encodings allowed by `style`
    pub fn parse_as(token: &str, style: ClockStyle) -> Result<Timestamp, DomainError> {
        let token = token.trim();
        let malformed = || DomainError::MalformedTimestamp(token.to_string());

        let (clock, fraction) = match token.find(|c: char| c == '.' || c == ',') {
            Some(pos) => {
                let separator = token[pos..].chars().next().ok_or_else(malformed)?;
                (&token[..pos], Some((separator, &token[pos + 1..])))
            }
            None => (token, None),
        };

        let fields: Vec<&str> = clock.split(':').collect();
        if fields.len() < 2 || fields.len() > 3 {
            return Err(malformed());
        }
        if fields.iter().any(|f| f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit())) {
            return Err(malformed());
        }
        // Every field after the leading one is a zero-padded pair
        if fields[1..].iter().any(|f| f.len() != 2) {
            return Err(malformed());
        }

        let millis = match fraction {
            None => 0,
            Some((_, digits))
                if !digits.is_empty()
                    && digits.len() <= 3
                    && digits.bytes().all(|b| b.is_ascii_digit()) =>
            {
                // "5" means 500ms, "05" means 50ms
                let padded = format!("{:0<3}", digits);
                padded.parse::<u64>().map_err(|_| malformed())?
            }
            Some(_) => return Err(malformed()),
        };

        let allowed = match style {
            ClockStyle::Any => true,
            ClockStyle::WebVtt => matches!(fraction, Some(('.', d)) if d.len() == 3),
            ClockStyle::SubRip => {
                fields.len() == 3 && matches!(fraction, Some((',', d)) if d.len() == 3)
            }
            ClockStyle::Annotated => fraction.is_none(),
        };
        if !allowed {
            return Err(malformed());
        }

        let numbers = fields
            .iter()
            .map(|f| f.parse::<u64>().map_err(|_| malformed()))
            .collect::<Result<Vec<u64>, DomainError>>()?;

        let (hours, minutes, seconds) = match numbers.as_slice() {
            [m, s] => (0, *m, *s),
            [h, m, s] => (*h, *m, *s),
            _ => return Err(malformed()),
        };

        Ok(Timestamp::from_components(hours, minutes, seconds, millis))
    }

    /// Machine-readable WebVTT form, `HH:MM:SS.mmm`, hours always present
    pub fn render_strict(timestamp: Timestamp) -> String {
        let (hours, minutes, seconds, millis) = timestamp.components();
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }

    /// Machine-readable SubRip form, `HH:MM:SS,mmm`
    pub fn render_srt(timestamp: Timestamp) -> String {
        let (hours, minutes, seconds, millis) = timestamp.components();
        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Human-facing clock: `H:MM:SS`, or `M:SS` when the hour is zero.
    /// Sub-second precision is truncated.
    pub fn render_display(timestamp: Timestamp) -> String {
        let total = timestamp.as_seconds().floor() as u64;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", minutes, seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(token: &str) -> f64 {
        TimestampGrammar::parse(token).unwrap().as_seconds()
    }

    #[test]
    fn test_parse_dot_millis() {
        assert_eq!(secs("00:01:02.345"), 62.345);
    }

    #[test]
    fn test_parse_comma_millis() {
        assert_eq!(secs("01:00:03,500"), 3603.5);
    }

    #[test]
    fn test_parse_two_field_clock() {
        assert_eq!(secs("0:15"), 15.0);
        assert_eq!(secs("12:05"), 725.0);
    }

    #[test]
    fn test_parse_three_field_clock() {
        assert_eq!(secs("1:23:45"), 5025.0);
    }

    #[test]
    fn test_parse_short_fraction_is_padded() {
        assert_eq!(secs("0:01.5"), 1.5);
        assert_eq!(secs("0:01.05"), 1.05);
    }

    #[test]
    fn test_parse_unbounded_hours() {
        assert_eq!(secs("100:00:00.000"), 360000.0);
    }

    #[test]
    fn test_parse_malformed() {
        for token in ["bad", "1", "1:2", "1:2:3:4", "a:00", "0:15.", "0:15.1234", "0:1x", ""] {
            assert!(
                matches!(
                    TimestampGrammar::parse(token),
                    Err(DomainError::MalformedTimestamp(_))
                ),
                "expected {:?} to be malformed",
                token
            );
        }
    }

    #[test]
    fn test_style_restrictions() {
        assert!(TimestampGrammar::parse_as("00:00:01.000", ClockStyle::WebVtt).is_ok());
        assert!(TimestampGrammar::parse_as("0:01.000", ClockStyle::WebVtt).is_ok());
        assert!(TimestampGrammar::parse_as("00:00:01", ClockStyle::WebVtt).is_err());
        assert!(TimestampGrammar::parse_as("00:00:01,000", ClockStyle::WebVtt).is_err());

        assert!(TimestampGrammar::parse_as("00:00:01,000", ClockStyle::SubRip).is_ok());
        assert!(TimestampGrammar::parse_as("00:01,000", ClockStyle::SubRip).is_err());
        assert!(TimestampGrammar::parse_as("00:00:01.000", ClockStyle::SubRip).is_err());

        assert!(TimestampGrammar::parse_as("1:23:45", ClockStyle::Annotated).is_ok());
        assert!(TimestampGrammar::parse_as("1:23.450", ClockStyle::Annotated).is_err());
    }

    #[test]
    fn test_render_strict_keeps_zero_hours() {
        let time = Timestamp::from_components(0, 0, 15, 0);
        assert_eq!(TimestampGrammar::render_strict(time), "00:00:15.000");
        assert_eq!(TimestampGrammar::render_srt(time), "00:00:15,000");
    }

    #[test]
    fn test_render_display() {
        assert_eq!(
            TimestampGrammar::render_display(Timestamp::from_components(0, 2, 5, 900)),
            "2:05"
        );
        assert_eq!(
            TimestampGrammar::render_display(Timestamp::from_components(1, 0, 9, 0)),
            "1:00:09"
        );
    }

    #[test]
    fn test_render_then_parse_is_stable() {
        let time = TimestampGrammar::parse("02:03:04.056").unwrap();
        let rendered = TimestampGrammar::render_strict(time);
        assert_eq!(rendered, "02:03:04.056");
        assert_eq!(TimestampGrammar::parse(&rendered).unwrap(), time);
    }
}
