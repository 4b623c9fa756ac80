use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use highlight_cli::domain::model::CaptionFormat;
use highlight_cli::output::WebVttWriter;
use highlight_cli::*;

/// Fixtures shared by the end-to-end tests
mod test_utils {
    use super::*;

    pub const TALK_VTT: &str = "WEBVTT\n\n\
        00:00:00.000 --> 00:00:04.000\nintro stuff\n\n\
        00:00:04.000 --> 00:00:08.000\nabout the demo\n\n\
        00:00:08.000 --> 00:00:12.000\nmiddle content\n\n\
        00:00:12.000 --> 00:00:16.000\nconclusion now\n";

    pub const PASTED: &str = "0:15\nWelcome to the show\n0:42\nLet's talk\nabout testing\n1:05\nQuestions\n1:30\nBye\n";

    pub fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn highlights(dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("highlights").unwrap();
        cmd.current_dir(dir)
            .env_remove("RUST_LOG")
            .env_remove("HIGHLIGHTS_CARDS")
            .env_remove("HIGHLIGHTS_SEGMENT_SPAN")
            .env_remove("HIGHLIGHTS_WORDS_PER_SECOND")
            .env_remove("HIGHLIGHTS_LOG_LEVEL")
            .env_remove("HIGHLIGHTS_LOG_FORMAT");
        cmd
    }
}

use test_utils::*;

#[test]
fn test_pasted_transcript_to_selection() {
    let transcript = PastedTranscriptParser::new(DurationEstimator::default())
        .parse("[0:15] Welcome to the show\n[0:42] Let's talk about testing\n[1:05] Demo time\n")
        .transcript;
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.get(0).unwrap().end().as_seconds(), 17.0);

    let segments = SegmentSelector::default().select(&transcript, &["demo".to_string()], 2);
    assert_eq!(segments[0], IndexSegment::new(2, 2).unwrap());
    assert_eq!(segments.len(), 2);
}

#[test]
fn test_srt_input_reads_like_vtt() {
    let srt = "1\n00:00:01,000 --> 00:00:03,500\nHello\n\n2\n00:00:04,000 --> 00:00:06,000\nWorld\n";
    let from_srt = CueParser::new(CaptionFormat::Srt).parse(srt).transcript;

    let rendered = WebVttWriter::render(&from_srt);
    let from_vtt = CueParser::new(CaptionFormat::WebVtt).parse(&rendered).transcript;

    assert_eq!(from_srt, from_vtt);
    assert_eq!(from_vtt.get(0).unwrap().end().as_seconds(), 3.5);
}

#[test]
fn test_cli_cards_json() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "talk.vtt", TALK_VTT);

    let output = highlights(dir.path())
        .args(["cards", "talk.vtt", "-k", "demo", "-n", "2", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["start_seconds"], 4.0);
    assert_eq!(cards[0]["title"], "about the demo");
    assert_eq!(cards[1]["title"], "intro stuff");
}

#[test]
fn test_cli_cards_text_to_file() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "notes.txt", PASTED);

    highlights(dir.path())
        .args([
            "cards",
            "notes.txt",
            "--pasted",
            "-k",
            "testing",
            "-n",
            "1",
            "--video-url",
            "https://youtu.be/xyz",
            "-o",
            "cards.txt",
        ])
        .assert()
        .success();

    let text = std::fs::read_to_string(dir.path().join("cards.txt")).unwrap();
    assert!(text.starts_with("#1 [0:42] Let's talk about testing\n"));
    assert!(text.contains("https://www.youtube.com/watch?v=xyz&t=42s"));
}

#[test]
fn test_cli_rejects_zero_cards() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "talk.vtt", TALK_VTT);

    highlights(dir.path())
        .args(["cards", "talk.vtt", "-n", "0"])
        .assert()
        .failure();
}

#[test]
fn test_cli_convert_and_overwrite_policy() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "notes.txt", PASTED);

    highlights(dir.path())
        .args(["convert", "notes.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with 4 entries"));

    let written = std::fs::read_to_string(dir.path().join("notes.vtt")).unwrap();
    assert!(written.starts_with("WEBVTT\n\n00:00:15.000 --> 00:00:17.000\nWelcome to the show\n"));

    highlights(dir.path())
        .args(["convert", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    highlights(dir.path())
        .args(["convert", "notes.txt", "--force"])
        .assert()
        .success();
}

#[test]
fn test_cli_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "talk.docx", "not captions");

    highlights(dir.path())
        .args(["cards", "talk.docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported transcript format"));
}

#[test]
fn test_cli_no_entries_guidance() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "notes.txt", "just some words\nand no clocks at all\n");

    highlights(dir.path())
        .args(["ranges", "notes.txt", "--pasted", "--duration", "600"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no timestamps recognized"));
}

#[test]
fn test_cli_inspect_json() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "talk.vtt", TALK_VTT);

    let output = highlights(dir.path())
        .args(["inspect", "talk.vtt", "--json", "--preview", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["cue_count"], 4);
    assert_eq!(report["last_end"], 16.0);
    assert_eq!(report["preview"].as_array().unwrap().len(), 1);
}

#[test]
fn test_cli_config_file_sets_card_count() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "talk.vtt", TALK_VTT);
    write(&dir, "highlights.toml", "[highlights]\ncards = 1\n");

    let output = highlights(dir.path())
        .args(["cards", "talk.vtt", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cards.as_array().unwrap().len(), 1);
}
