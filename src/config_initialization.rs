//! Configuration initialization and hierarchy management

use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::domain::model::HighlightConfig;
use crate::ports::ConfigPort;

/// Environment variables recognised as configuration overrides
pub const ENV_CARDS: &str = "HIGHLIGHTS_CARDS";
pub const ENV_SEGMENT_SPAN: &str = "HIGHLIGHTS_SEGMENT_SPAN";
pub const ENV_WORDS_PER_SECOND: &str = "HIGHLIGHTS_WORDS_PER_SECOND";
pub const ENV_LOG_LEVEL: &str = "HIGHLIGHTS_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "HIGHLIGHTS_LOG_FORMAT";

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(
    config_port: &dyn ConfigPort,
    cli: &Cli,
) -> Result<HighlightConfig> {
    // Defaults and file
    let mut config = config_port
        .load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;

    // Environment
    let env_overrides = apply_environment_overrides(&mut config, |key| std::env::var(key).ok())?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    // Command line
    let cli_overrides = apply_cli_overrides(&mut config, cli);
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config_port
        .validate_config(&config)
        .context("Invalid configuration")?;
    Ok(config)
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid value '{}' for {}: {}", value, key, e))
}

/// Apply `HIGHLIGHTS_*` variables. Returns how many were applied.
pub fn apply_environment_overrides(
    config: &mut HighlightConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<usize> {
    let mut applied = 0;

    if let Some(value) = lookup(ENV_CARDS) {
        config.cards = parse_env(ENV_CARDS, &value)?;
        applied += 1;
    }
    if let Some(value) = lookup(ENV_SEGMENT_SPAN) {
        config.segment_span = parse_env(ENV_SEGMENT_SPAN, &value)?;
        applied += 1;
    }
    if let Some(value) = lookup(ENV_WORDS_PER_SECOND) {
        config.words_per_second = parse_env(ENV_WORDS_PER_SECOND, &value)?;
        applied += 1;
    }
    if let Some(value) = lookup(ENV_LOG_LEVEL) {
        config.log_level = value.trim().to_string();
        applied += 1;
    }
    if let Some(value) = lookup(ENV_LOG_FORMAT) {
        config.log_format = value.trim().to_string();
        applied += 1;
    }

    Ok(applied)
}

/// Apply global flags and per-command tunables. Returns how many were applied.
pub fn apply_cli_overrides(config: &mut HighlightConfig, cli: &Cli) -> usize {
    let mut applied = 0;

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
        applied += 1;
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
        applied += 1;
    }

    match &cli.command {
        Commands::Cards(args) => {
            if let Some(cards) = args.selection.cards {
                config.cards = cards;
                applied += 1;
            }
            if let Some(span) = args.span {
                config.segment_span = span;
                applied += 1;
            }
        }
        Commands::Ranges(args) => {
            if let Some(cards) = args.selection.cards {
                config.cards = cards;
                applied += 1;
            }
        }
        Commands::Convert(args) => {
            if let Some(rate) = args.words_per_second {
                config.words_per_second = rate;
                applied += 1;
            }
        }
        Commands::Inspect(_) => {}
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::TomlConfigAdapter;
    use clap::Parser;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = HighlightConfig::default();
        let applied = apply_environment_overrides(
            &mut config,
            lookup(&[(ENV_CARDS, "7"), (ENV_WORDS_PER_SECOND, " 2.5 "), (ENV_LOG_FORMAT, "json")]),
        )
        .unwrap();

        assert_eq!(applied, 3);
        assert_eq!(config.cards, 7);
        assert_eq!(config.words_per_second, 2.5);
        assert_eq!(config.log_format, "json");
        assert_eq!(config.segment_span, 5);
    }

    #[test]
    fn test_environment_parse_error_names_variable() {
        let mut config = HighlightConfig::default();
        let err = apply_environment_overrides(&mut config, lookup(&[(ENV_SEGMENT_SPAN, "wide")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_SEGMENT_SPAN));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "highlights",
            "--log-level",
            "debug",
            "cards",
            "talk.vtt",
            "-n",
            "6",
            "--span",
            "2",
        ]);
        let mut config = HighlightConfig::default();
        assert_eq!(apply_cli_overrides(&mut config, &cli), 3);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.cards, 6);
        assert_eq!(config.segment_span, 2);
    }

    #[test]
    fn test_cli_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highlights.toml");
        std::fs::write(&path, "[highlights]\nwords_per_second = 4.0\ncards = 2\n").unwrap();

        let cli = Cli::parse_from([
            "highlights",
            "--config",
            path.to_str().unwrap(),
            "convert",
            "notes.txt",
            "--words-per-second",
            "1.5",
        ]);
        let adapter = TomlConfigAdapter::with_default_path(dir.path().join("absent.toml"));
        let config = initialize_configuration_hierarchy(&adapter, &cli).unwrap();

        assert_eq!(config.words_per_second, 1.5);
        assert_eq!(config.cards, 2);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = Cli::parse_from([
            "highlights",
            "convert",
            "notes.txt",
            "--words-per-second",
            "0",
        ]);
        let dir = tempfile::tempdir().unwrap();
        let adapter = TomlConfigAdapter::with_default_path(dir.path().join("absent.toml"));
        assert!(initialize_configuration_hierarchy(&adapter, &cli).is_err());
    }
}
