//! Caption grammars
//!
//! Structured cue files (WebVTT and SubRip) are split into blank-line
//! separated blocks and handed to the grammar chosen from the file
//! extension. Pasted transcripts go through [`pasted::PastedTranscriptParser`].

pub mod pasted;
pub mod srt;
pub mod vtt;

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::{CaptionFormat, Cue, Transcript};
use crate::error::{HighlightError, HighlightResult};

pub use pasted::PastedTranscriptParser;

/// A block that was dropped because one of its timestamps failed to parse
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    /// 1-based position in the source: the starting line for cue files,
    /// the entry number for pasted text
    pub line: usize,
    pub error: DomainError,
}

/// Cues recovered from one source plus the blocks that had to be skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub transcript: Transcript,
    pub skipped: Vec<SkippedBlock>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}

/// Run of non-blank lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub first_line: usize,
    pub lines: Vec<&'a str>,
}

/// Split source text into blocks. End of input terminates the last block.
pub fn split_blocks(source: &str) -> Vec<Block<'_>> {
    let source = source.trim_start_matches('\u{feff}');
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }

        current
            .get_or_insert_with(|| Block {
                first_line: index + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }

    if let Some(block) = current {
        blocks.push(block);
    }
    blocks
}

fn markup_regex() -> &'static Regex {
    static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKUP_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Failed to compile markup regex"))
}

/// Remove inline styling tags such as `<i>` or `<c.yellow>`
pub fn strip_markup(text: &str) -> String {
    markup_regex().replace_all(text, "").into_owned()
}

/// Join payload lines with single spaces, dropping markup and blank lines
pub(crate) fn join_payload(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| strip_markup(line))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parser for structured cue files, bound to one grammar
#[derive(Debug, Clone, Copy)]
pub struct CueParser {
    format: CaptionFormat,
}

impl CueParser {
    pub fn new(format: CaptionFormat) -> Self {
        Self { format }
    }

    /// Choose the grammar from the path's extension. There is no fallback
    /// between grammars.
    pub fn for_path(path: &Path) -> HighlightResult<Self> {
        match CaptionFormat::from_path(path) {
            Ok(format) => Ok(Self::new(format)),
            Err(DomainError::UnsupportedFormat(extension)) => {
                Err(HighlightError::UnsupportedFormat { extension })
            }
            Err(other) => Err(other.into()),
        }
    }

    pub fn format(&self) -> CaptionFormat {
        self.format
    }

    /// Parse a whole source buffer. Blocks with malformed timestamps are
    /// recorded and skipped; blocks of the wrong shape are ignored.
    pub fn parse(&self, source: &str) -> ParseOutcome {
        let mut cues: Vec<Cue> = Vec::new();
        let mut skipped = Vec::new();

        for block in split_blocks(source) {
            let parsed = match self.format {
                CaptionFormat::WebVtt => vtt::parse_block(&block.lines),
                CaptionFormat::Srt => srt::parse_block(&block.lines),
            };

            match parsed {
                Ok(Some(cue)) => cues.push(cue),
                Ok(None) => debug!(line = block.first_line, "Ignoring non-cue block"),
                Err(error) => {
                    warn!(line = block.first_line, %error, "Skipping caption block");
                    skipped.push(SkippedBlock {
                        line: block.first_line,
                        error,
                    });
                }
            }
        }

        debug!(
            format = %self.format,
            cues = cues.len(),
            skipped = skipped.len(),
            "Parsed caption source"
        );

        ParseOutcome {
            transcript: Transcript::new(cues),
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_blocks_handles_missing_trailing_blank() {
        let blocks = split_blocks("a\nb\n\n\nc");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines, vec!["a", "b"]);
        assert_eq!(blocks[1].first_line, 5);
        assert_eq!(blocks[1].lines, vec!["c"]);
    }

    #[test]
    fn test_split_blocks_crlf_and_bom() {
        let blocks = split_blocks("\u{feff}WEBVTT\r\n\r\none\r\ntwo\r\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines, vec!["WEBVTT"]);
        assert_eq!(blocks[1].lines, vec!["one", "two"]);
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<i>Hello</i> <c.yellow>there</c>"), "Hello there");
        assert_eq!(join_payload(&["  <b>one</b> ", "", "two"]), "one two");
    }

    #[test]
    fn test_for_path_rejects_unknown_extension() {
        let err = CueParser::for_path(Path::new("talk.txt")).unwrap_err();
        assert!(matches!(
            err,
            HighlightError::UnsupportedFormat { ref extension } if extension == ".txt"
        ));

        let err = CueParser::for_path(Path::new("talk")).unwrap_err();
        assert!(matches!(err, HighlightError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_for_path_selects_grammar() {
        let parser = CueParser::for_path(Path::new("captions/Talk.SRT")).unwrap();
        assert_eq!(parser.format(), CaptionFormat::Srt);
        let parser = CueParser::for_path(Path::new("talk.vtt")).unwrap();
        assert_eq!(parser.format(), CaptionFormat::WebVtt);
    }

    #[test]
    fn test_malformed_block_does_not_abort_parse() {
        let source = "1\n00:00:01 --> bad\nBroken\n\n2\n00:00:04,000 --> 00:00:05,000\nFine\n";
        let outcome = CueParser::new(CaptionFormat::Srt).parse(source);

        assert_eq!(outcome.transcript.len(), 1);
        assert_eq!(outcome.transcript.cues()[0].text(), "Fine");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].line, 1);
        assert!(matches!(
            outcome.skipped[0].error,
            DomainError::MalformedTimestamp(_)
        ));
    }

    #[test]
    fn test_empty_source_yields_empty_outcome() {
        let outcome = CueParser::new(CaptionFormat::WebVtt).parse("WEBVTT\n");
        assert!(outcome.is_empty());
        assert!(outcome.skipped.is_empty());
    }
}
