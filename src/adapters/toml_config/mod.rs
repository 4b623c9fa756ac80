// TOML config adapter - Configuration loading from TOML files

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::model::HighlightConfig;
use crate::error::{HighlightError, HighlightResult};
use crate::ports::ConfigPort;
use crate::utils::logging::{LogFormat, LogLevel};

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "highlights.toml";

/// Top-level layout of a configuration file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    highlights: HighlightConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    default_path: PathBuf,
}

impl TomlConfigAdapter {
    pub fn new() -> Self {
        Self::with_default_path(DEFAULT_CONFIG_FILE)
    }

    /// Use a different fallback location when no path is given
    pub fn with_default_path(path: impl Into<PathBuf>) -> Self {
        Self {
            default_path: path.into(),
        }
    }

    /// Parse the `[highlights]` table; missing keys keep their defaults
    pub fn parse(content: &str) -> HighlightResult<HighlightConfig> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| HighlightError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })?;
        Ok(file.highlights)
    }

    fn read(path: &Path) -> HighlightResult<HighlightConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| HighlightError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        let config = Self::parse(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPort for TomlConfigAdapter {
    fn load_config(&self, path: Option<&Path>) -> HighlightResult<HighlightConfig> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(HighlightError::Config {
                        message: format!("Config file does not exist: {}", path.display()),
                    });
                }
                Self::read(path)
            }
            None if self.default_path.exists() => Self::read(&self.default_path),
            None => {
                debug!("No config file found, using defaults");
                Ok(HighlightConfig::default())
            }
        }
    }

    fn validate_config(&self, config: &HighlightConfig) -> HighlightResult<()> {
        let invalid = |message: String| Err(HighlightError::Config { message });

        if config.cards < 1 {
            return invalid("cards must be at least 1".to_string());
        }
        if config.words_per_second.is_nan() || config.words_per_second <= 0.0 {
            return invalid(format!(
                "words_per_second must be positive, got {}",
                config.words_per_second
            ));
        }
        if config.min_cue_duration.is_nan() || config.min_cue_duration < 0.0 {
            return invalid(format!(
                "min_cue_duration must not be negative, got {}",
                config.min_cue_duration
            ));
        }
        if config.cue_gap.is_nan() || config.cue_gap < 0.0 {
            return invalid(format!("cue_gap must not be negative, got {}", config.cue_gap));
        }
        if config.keyword_padding < 0.0 || config.fill_cap < 0.0 || config.min_separation < 0.0 {
            return invalid("time-range settings must not be negative".to_string());
        }
        LogLevel::parse(&config.log_level).map_err(|e| HighlightError::Config {
            message: e.to_string(),
        })?;
        LogFormat::parse(&config.log_format).map_err(|e| HighlightError::Config {
            message: e.to_string(),
        })?;

        Ok(())
    }
}
