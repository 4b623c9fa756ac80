// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::model::HighlightConfig;
use crate::error::HighlightResult;

/// Port for reading transcript sources
pub trait FsPort: Send + Sync {
    /// Check if file exists
    fn file_exists(&self, path: &Path) -> bool;

    /// Read a whole source file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> HighlightResult<String>;
}

/// Port for configuration management
pub trait ConfigPort: Send + Sync {
    /// Load configuration from `path`, or from the default location when
    /// `None`. A missing default file yields the built-in defaults.
    fn load_config(&self, path: Option<&Path>) -> HighlightResult<HighlightConfig>;

    /// Validate configuration
    fn validate_config(&self, config: &HighlightConfig) -> HighlightResult<()>;
}

/// Port for the summarization collaborator
pub trait SummarizerPort: Send + Sync {
    /// Short summary of a segment's concatenated cue text
    fn summarize(&self, text: &str) -> String;
}
