//! Highlight CLI
//!
//! Turns caption files and pasted transcripts into keyword-first highlight
//! cards.
//!
//! # Features
//!
//! - WebVTT and SubRip cue parsing with malformed-block recovery
//! - Pasted transcript parsing (inline and alternating clock layouts)
//! - Reading-rate end-time estimation for pasted entries
//! - Keyword-first index and time-range selection
//! - Card export as text, JSON or YAML
//!
//! # Usage
//!
//! ```bash
//! highlights cards talk.vtt -k demo,conclusion -n 4
//! highlights ranges notes.txt --pasted --duration 1800 --format json
//! highlights convert notes.txt -o notes.vtt
//! highlights inspect talk.srt
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use highlight_cli::adapters::TomlConfigAdapter;
use highlight_cli::app::container::DefaultAppContainer;
use highlight_cli::cli::{commands, Cli};
use highlight_cli::config_initialization::initialize_configuration_hierarchy;
use highlight_cli::domain::model::HighlightConfig;
use highlight_cli::utils::logging::{LogFormat, LogLevel, LoggingConfig, LoggingSystem};

/// Main entry point for the highlight CLI
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&TomlConfigAdapter::new(), &cli)?;
    init_logging(&config)?;

    info!("Starting highlight CLI");

    let container = DefaultAppContainer::new(config);
    if let Err(e) = commands::execute(&container, cli) {
        error!("{:#}", e);
        return Err(e);
    }

    info!("Highlight CLI completed successfully");
    Ok(())
}

fn init_logging(config: &HighlightConfig) -> Result<()> {
    let logging = LoggingSystem::new(LoggingConfig {
        level: LogLevel::parse(&config.log_level)?,
        format: LogFormat::parse(&config.log_format)?,
        target: false,
    });
    logging.initialize();
    logging.log_system_info();
    Ok(())
}
