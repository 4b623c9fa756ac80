// Extractive summary adapter - First-sentence summaries without a model

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::model::collapse_whitespace;
use crate::ports::SummarizerPort;

const EMPTY_SUMMARY: &str = "No content available.";

/// Texts this short are returned unchanged
const SHORT_TEXT_WORDS: usize = 10;

fn sentence_break_regex() -> &'static Regex {
    static SENTENCE_BREAK: OnceLock<Regex> = OnceLock::new();
    SENTENCE_BREAK.get_or_init(|| Regex::new(r"[.!?]+").expect("Failed to compile sentence regex"))
}

/// Summarizer that keeps the first sentence, or the leading words when
/// there is no sentence to keep
#[derive(Debug, Clone)]
pub struct ExtractiveSummaryAdapter {
    max_words: usize,
}

impl ExtractiveSummaryAdapter {
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words: max_words.max(1),
        }
    }
}

impl Default for ExtractiveSummaryAdapter {
    fn default() -> Self {
        Self::new(30)
    }
}

impl SummarizerPort for ExtractiveSummaryAdapter {
    fn summarize(&self, text: &str) -> String {
        let text = collapse_whitespace(text);
        if text.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }

        let words: Vec<&str> = text.split(' ').collect();
        if words.len() <= SHORT_TEXT_WORDS {
            return text;
        }

        let first_sentence = sentence_break_regex()
            .split(&text)
            .next()
            .map(str::trim)
            .unwrap_or_default();
        if !first_sentence.is_empty() {
            return format!("{}.", first_sentence);
        }

        if words.len() > self.max_words {
            format!("{}...", words[..self.max_words].join(" "))
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(ExtractiveSummaryAdapter::default().summarize("  \n "), EMPTY_SUMMARY);
    }

    #[test]
    fn test_short_text_is_unchanged() {
        let summarizer = ExtractiveSummaryAdapter::default();
        assert_eq!(summarizer.summarize("Hello   there. Bye!"), "Hello there. Bye!");
    }

    #[test]
    fn test_first_sentence() {
        let summarizer = ExtractiveSummaryAdapter::default();
        let text = "We start with the demo today! Then we cover testing and wrap up with questions";
        assert_eq!(summarizer.summarize(text), "We start with the demo today.");
    }

    #[test]
    fn test_leading_words_when_first_sentence_is_empty() {
        let summarizer = ExtractiveSummaryAdapter::new(3);
        let text = "... one two three four five six seven eight nine ten eleven";
        assert_eq!(summarizer.summarize(text), "... one two...");
    }
}
