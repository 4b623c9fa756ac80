//! WebVTT artifact writer

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::domain::model::Transcript;
use crate::error::{HighlightError, HighlightResult};
use crate::output::OverwritePolicy;
use crate::utils::time::TimestampGrammar;

/// Serializes a transcript as WebVTT that the cue parser reads back
pub struct WebVttWriter {
    overwrite: OverwritePolicy,
}

impl WebVttWriter {
    pub fn new(overwrite: OverwritePolicy) -> Self {
        Self { overwrite }
    }

    /// `WEBVTT` header, then one `start --> end` entry per cue
    pub fn render(transcript: &Transcript) -> String {
        let mut out = String::from("WEBVTT\n\n");
        for cue in transcript {
            out.push_str(&TimestampGrammar::render_strict(cue.start()));
            out.push_str(" --> ");
            out.push_str(&TimestampGrammar::render_strict(cue.end()));
            out.push('\n');
            out.push_str(cue.text());
            out.push_str("\n\n");
        }
        out
    }

    /// Write the rendered transcript through a temporary file in the target
    /// directory, then persist it over `path`
    pub fn write_to_path(&self, transcript: &Transcript, path: &Path) -> HighlightResult<()> {
        if self.overwrite == OverwritePolicy::Never && path.exists() {
            return Err(HighlightError::Output {
                message: format!(
                    "{} already exists (pass --force to overwrite)",
                    path.display()
                ),
            });
        }

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(directory)?;

        let mut temp = NamedTempFile::new_in(directory)?;
        temp.write_all(Self::render(transcript).as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| HighlightError::Output {
            message: format!("Failed to persist {}: {}", path.display(), e.error),
        })?;

        info!(
            path = %path.display(),
            cues = transcript.len(),
            "WebVTT file written"
        );
        Ok(())
    }
}

impl Default for WebVttWriter {
    fn default() -> Self {
        Self::new(OverwritePolicy::Always)
    }
}
