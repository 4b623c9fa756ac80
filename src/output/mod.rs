//! Produced artifacts: highlight cards and WebVTT files

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{HighlightError, HighlightResult};

pub mod cards;
pub mod writer;

pub use cards::CardBuilder;
pub use writer::WebVttWriter;

/// One preview card, ready for the thumbnail and page collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightCard {
    /// 1-based position in the card list
    pub index: usize,
    pub start_seconds: f64,
    pub end_seconds: f64,
    /// Frame-extraction point for the thumbnail
    pub mid_seconds: f64,
    /// Display clock of the start, `H:MM:SS` or `M:SS`
    pub clock: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_link: Option<String>,
    /// `thumbnail_NNN.png`
    pub thumbnail: String,
    pub title: String,
    pub summary: String,
    pub transcript_text: String,
}

/// Overwrite policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverwritePolicy {
    /// Always overwrite
    Always,
    /// Never overwrite
    Never,
}

/// Card export encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Yaml,
    Text,
}

impl ExportFormat {
    pub fn parse(format: &str) -> HighlightResult<Self> {
        match format.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(HighlightError::Config {
                message: format!("Unknown export format '{}'. Expected json, yaml or text", other),
            }),
        }
    }
}

/// Serialize cards in the requested encoding
pub fn export_cards(cards: &[HighlightCard], format: ExportFormat) -> HighlightResult<String> {
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(cards).map_err(|e| HighlightError::Serialization {
                message: e.to_string(),
            })
        }
        ExportFormat::Yaml => {
            serde_yaml::to_string(cards).map_err(|e| HighlightError::Serialization {
                message: e.to_string(),
            })
        }
        ExportFormat::Text => Ok(render_text(cards)),
    }
}

fn render_text(cards: &[HighlightCard]) -> String {
    let mut out = String::new();
    for card in cards {
        // Writing to a String cannot fail
        let _ = writeln!(out, "#{} [{}] {}", card.index, card.clock, card.title);
        let _ = writeln!(
            out,
            "   {:.3}s - {:.3}s  thumbnail at {:.3}s ({})",
            card.start_seconds, card.end_seconds, card.mid_seconds, card.thumbnail
        );
        if let Some(link) = &card.deep_link {
            let _ = writeln!(out, "   {}", link);
        }
        let _ = writeln!(out, "   {}", card.summary);
        out.push('\n');
    }
    out
}
