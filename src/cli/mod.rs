//! CLI module for the highlight tool
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// Highlight CLI
///
/// Turns WebVTT/SRT caption files and pasted transcripts into a small set of
/// keyword-prioritised highlight cards.
#[derive(Parser, Debug)]
#[command(name = "highlights")]
#[command(about = "Highlight CLI - Keyword-first highlight cards from captions")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Configuration file (default: highlights.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select keyword-first transcript segments and print them as cards
    Cards(args::CardsArgs),
    /// Select keyword-first time ranges and print them as cards
    Ranges(args::RangesArgs),
    /// Convert a pasted transcript into a WebVTT file
    Convert(args::ConvertArgs),
    /// Show what a transcript source contains
    Inspect(args::InspectArgs),
}
