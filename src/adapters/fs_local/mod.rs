// Local filesystem adapter - Whole-file reads of transcript sources

use std::path::Path;

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::error::HighlightResult;
use crate::ports::FsPort;

/// Filesystem adapter backed by `std::fs`
#[derive(Debug, Default)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl FsPort for FsLocalAdapter {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> HighlightResult<String> {
        if !path.exists() {
            return Err(DomainError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = content.len(), "Read source file");
        Ok(content)
    }
}
