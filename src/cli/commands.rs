//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::container::AppContainer;
use crate::app::highlight_interactor::{CardsRequest, CardsResponse, RangesRequest};
use crate::app::convert_interactor::ConvertRequest;
use crate::app::inspect_interactor::{InspectRequest, InspectResponse};
use crate::app::TranscriptSource;
use crate::cli::args::{CardsArgs, ConvertArgs, InspectArgs, RangesArgs, SelectionArgs};
use crate::cli::{Cli, Commands};
use crate::error::HighlightError;
use crate::output::{export_cards, ExportFormat, OverwritePolicy};
use crate::utils::time::TimestampGrammar;

const NO_ENTRIES_GUIDANCE: &str = "no timestamps recognized. Supported layouts: \
WebVTT (.vtt), SubRip (.srt), and pasted text with lines such as \
'0:15 text', '[1:02:03] text', '0:15 - text', or a bare '0:15' line followed by text";

/// Run the parsed command line
pub fn execute(container: &dyn AppContainer, cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Cards(args) => cards(container, args),
        Commands::Ranges(args) => ranges(container, args),
        Commands::Convert(args) => convert(container, args),
        Commands::Inspect(args) => inspect(container, args),
    }
}

/// Attach actionable guidance to the "nothing parsed" outcome
fn explain(err: HighlightError, input: &Path) -> anyhow::Error {
    if err.is_no_entries() {
        anyhow::anyhow!("{}: {}", input.display(), NO_ENTRIES_GUIDANCE)
    } else {
        anyhow::Error::new(err).context(format!("Failed to process {}", input.display()))
    }
}

fn source_for(input: &Path, pasted: bool) -> TranscriptSource {
    if pasted {
        TranscriptSource::Pasted(input.to_path_buf())
    } else {
        TranscriptSource::CueFile(input.to_path_buf())
    }
}

/// Execute the cards command
pub fn cards(container: &dyn AppContainer, args: CardsArgs) -> Result<()> {
    let selection = args.selection;
    let config = container.config();
    let count = selection.cards.unwrap_or(config.cards);
    info!("Starting cards operation");
    info!("Input: {}", selection.input.display());

    let format = ExportFormat::parse(&selection.format)?;
    let request = CardsRequest {
        source: source_for(&selection.input, selection.pasted),
        keywords: selection.keywords.clone(),
        count,
        video_url: selection.video_url.clone(),
    };

    let response = container
        .highlight_interactor()
        .cards(request, config)
        .map_err(|e| explain(e, &selection.input))?;

    emit(&selection, &response, count, format)
}

/// Execute the ranges command
pub fn ranges(container: &dyn AppContainer, args: RangesArgs) -> Result<()> {
    let selection = args.selection;
    let config = container.config();
    let count = selection.cards.unwrap_or(config.cards);
    info!("Starting ranges operation");
    info!("Input: {}", selection.input.display());

    if args.duration.is_none() {
        warn!("Video duration unknown; only keyword ranges will be produced");
    }

    let format = ExportFormat::parse(&selection.format)?;
    let request = RangesRequest {
        source: source_for(&selection.input, selection.pasted),
        keywords: selection.keywords.clone(),
        count,
        video_url: selection.video_url.clone(),
        duration: args.duration,
    };

    let response = container
        .highlight_interactor()
        .ranges(request, config)
        .map_err(|e| explain(e, &selection.input))?;

    emit(&selection, &response, count, format)
}

fn emit(
    selection: &SelectionArgs,
    response: &CardsResponse,
    requested: usize,
    format: ExportFormat,
) -> Result<()> {
    for block in &response.skipped {
        warn!("Skipped block at line {}: {}", block.line, block.error);
    }
    if response.is_short(requested) {
        warn!(
            "Only {} of {} requested cards could be produced from {} cues",
            response.cards.len(),
            requested,
            response.cue_count
        );
    }

    let rendered = export_cards(&response.cards, format).context("Failed to export cards")?;

    match &selection.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} cards to {}", response.cards.len(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Default output path for a conversion
fn default_vtt_path(input: &Path) -> PathBuf {
    input.with_extension("vtt")
}

/// Execute the convert command
pub fn convert(container: &dyn AppContainer, args: ConvertArgs) -> Result<()> {
    info!("Starting convert operation");
    info!("Input: {}", args.input.display());

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_vtt_path(&args.input));
    if output == args.input {
        anyhow::bail!(
            "Output would overwrite the input {}; pass --output",
            args.input.display()
        );
    }

    let request = ConvertRequest {
        input: args.input.clone(),
        output,
        overwrite: if args.force {
            OverwritePolicy::Always
        } else {
            OverwritePolicy::Never
        },
    };

    let response = container
        .convert_interactor()
        .execute(request, container.config())
        .map_err(|e| explain(e, &args.input))?;

    println!(
        "Created {} with {} entries",
        response.output.display(),
        response.entry_count
    );
    for cue in &response.preview {
        println!(
            "  {} --> {}  {}",
            TimestampGrammar::render_strict(cue.start()),
            TimestampGrammar::render_strict(cue.end()),
            cue.text()
        );
    }
    if response.entry_count > response.preview.len() {
        println!("  ... and {} more", response.entry_count - response.preview.len());
    }
    Ok(())
}

/// Execute the inspect command
pub fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    info!("Starting inspect operation");
    info!("Input: {}", args.input.display());

    let request = InspectRequest {
        source: source_for(&args.input, args.pasted),
        preview: args.preview,
    };

    let response = container
        .inspect_interactor()
        .execute(request, container.config())
        .map_err(|e| explain(e, &args.input))?;

    if args.json {
        let json = serde_json::to_string_pretty(&response).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", format_report(&response));
    }
    Ok(())
}

fn format_report(response: &InspectResponse) -> String {
    let mut output = String::new();

    output.push_str("Transcript Information:\n");
    output.push_str(&format!("  File: {}\n", response.source.path().display()));
    output.push_str(&format!("  Cues: {}\n", response.cue_count));
    output.push_str(&format!(
        "  Span: {:.3}s - {:.3}s\n",
        response.first_start, response.last_end
    ));
    output.push_str(&format!("  Words: {}\n", response.total_words));

    if !response.preview.is_empty() {
        output.push_str(&format!("\nFirst {} cues:\n", response.preview.len()));
        for cue in &response.preview {
            output.push_str(&format!(
                "  [{}] {}\n",
                TimestampGrammar::render_display(cue.start()),
                cue.text()
            ));
        }
    }

    if !response.skipped.is_empty() {
        output.push_str(&format!("\nSkipped blocks ({}):\n", response.skipped.len()));
        for block in &response.skipped {
            output.push_str(&format!("  line {}: {}\n", block.line, block.reason));
        }
    }

    output
}
