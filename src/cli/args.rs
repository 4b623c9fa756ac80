//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

fn card_count(s: &str) -> Result<usize, String> {
    number_range(s, 1, 100)
}

fn seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number of seconds", s))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("'{}' must be a non-negative number of seconds", s))
    }
}

/// Options shared by the card-producing commands
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Transcript file (.vtt or .srt, or any text file with --pasted)
    pub input: PathBuf,

    /// Keyword to prioritise; repeat or separate with commas
    #[arg(short, long = "keyword", value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Number of cards to produce (1-100)
    #[arg(short = 'n', long, value_parser = card_count)]
    pub cards: Option<usize>,

    /// Read the input as a pasted transcript
    #[arg(long)]
    pub pasted: bool,

    /// Video URL used to build deep links
    #[arg(long)]
    pub video_url: Option<String>,

    /// Export format (json, yaml, text)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Write the export here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the cards command
#[derive(Args, Debug)]
pub struct CardsArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Cues after a keyword hit that join its segment
    #[arg(long)]
    pub span: Option<usize>,
}

/// Arguments for the ranges command
#[derive(Args, Debug)]
pub struct RangesArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Video length in seconds; without it no filler ranges are produced
    #[arg(long, value_parser = seconds)]
    pub duration: Option<f64>,
}

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Pasted transcript file
    pub input: PathBuf,

    /// Output .vtt file (default: input with a .vtt extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the output if it exists
    #[arg(long)]
    pub force: bool,

    /// Reading rate used to estimate cue durations
    #[arg(long)]
    pub words_per_second: Option<f64>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Transcript file
    pub input: PathBuf,

    /// Read the input as a pasted transcript
    #[arg(long)]
    pub pasted: bool,

    /// Number of leading cues to show
    #[arg(long, default_value = "3")]
    pub preview: usize,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
