//! CLI command implementations

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chordconf::{ChordwiseConfig, ConfigSources};
use chordwise::{
    detect_chord, parse_pitch, Key, Note, TheoryEngine, CHORD_SHAPES, PROGRESSION_PATTERNS,
};
use serde::Deserialize;

use crate::format::Palette;

/// A note as it appears in an input file, before validation.
#[derive(Debug, Deserialize)]
struct NoteInput {
    pitch: u32,
    start: f64,
    duration: f64,
}

/// The `--key` flag if given, otherwise the configured default.
fn resolve_key(config: &ChordwiseConfig, flag: Option<&str>) -> Result<Key> {
    let text = flag.unwrap_or(&config.analysis.key);
    text.parse::<Key>()
        .with_context(|| format!("Invalid key '{}'", text))
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read notes from stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read notes file {}", path.display()))
}

/// Parse and validate a JSON note array.
pub fn parse_notes(json: &str) -> Result<Vec<Note>> {
    let raw: Vec<NoteInput> =
        serde_json::from_str(json).context("Failed to parse notes as a JSON array")?;

    raw.into_iter()
        .enumerate()
        .map(|(i, n)| {
            Note::new(n.pitch, n.start, n.duration).with_context(|| format!("Invalid note #{}", i))
        })
        .collect()
}

/// Analyze a notes file and print the report
pub fn analyze(
    config: &ChordwiseConfig,
    path: &Path,
    key: Option<&str>,
    json: bool,
) -> Result<()> {
    let key = resolve_key(config, key)?;
    let notes = parse_notes(&read_input(path)?)?;

    let report = TheoryEngine::new().analyze(&notes, key);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let palette = Palette::new(config.display.color);
        print!("{}", palette.report(&report, &config.display));
    }

    Ok(())
}

/// Identify a single chord from pitches given on the command line
pub fn chord(
    config: &ChordwiseConfig,
    pitches: &[String],
    key: Option<&str>,
    json: bool,
) -> Result<()> {
    let key = resolve_key(config, key)?;
    let notes = pitches
        .iter()
        .map(|text| -> Result<Note> {
            let pitch = parse_pitch(text).with_context(|| format!("Invalid pitch '{}'", text))?;
            Ok(Note::new(u32::from(pitch), 0.0, 1.0)?)
        })
        .collect::<Result<Vec<_>>>()?;

    let detected = detect_chord(&notes, key);

    if json {
        println!("{}", serde_json::to_string_pretty(&detected)?);
        return Ok(());
    }

    let palette = Palette::new(config.display.color);
    match detected {
        Some(chord) => println!("{}", palette.chord_line(&chord)),
        None => println!("no chord"),
    }

    Ok(())
}

/// List progression patterns
pub fn patterns(config: &ChordwiseConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(PROGRESSION_PATTERNS)?);
    } else {
        let palette = Palette::new(config.display.color);
        print!("{}", palette.patterns(PROGRESSION_PATTERNS));
    }
    Ok(())
}

/// List chord shapes
pub fn shapes(config: &ChordwiseConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(CHORD_SHAPES)?);
    } else {
        let palette = Palette::new(config.display.color);
        print!("{}", palette.shapes(CHORD_SHAPES));
    }
    Ok(())
}

/// Print the effective configuration. Sources are TOML comments so the
/// output can be saved as a config file.
pub fn show_config(config: &ChordwiseConfig, sources: &ConfigSources) {
    print!("{}", config.to_toml());

    println!();
    if sources.files.is_empty() {
        println!("# files: none (compiled defaults)");
    }
    for file in &sources.files {
        println!("# file: {}", file.display());
    }
    for var in &sources.env_overrides {
        println!("# env: {}", var);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_notes_validates_each_note() {
        let notes = parse_notes(r#"[{"pitch": 60, "start": 0, "duration": 1.5}]"#).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].duration, 1.5);

        let err = parse_notes(r#"[{"pitch": 60, "start": 0, "duration": 1},
                                  {"pitch": 200, "start": 0, "duration": 1}]"#)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("#1"));

        assert!(parse_notes(r#"[{"pitch": 60, "start": 0, "duration": 0}]"#).is_err());
        assert!(parse_notes(r#"[{"pitch": 60, "start": 0, "duration": 1e10}]"#).is_err());
        assert!(parse_notes(r#"{"pitch": 60}"#).is_err());
    }

    #[test]
    fn key_flag_overrides_config() {
        let mut config = ChordwiseConfig::default();
        config.analysis.key = "Eb".to_string();

        assert_eq!(resolve_key(&config, None).unwrap(), Key::major(3));
        assert_eq!(resolve_key(&config, Some("Am")).unwrap(), Key::minor(9));
        assert!(resolve_key(&config, Some("H")).is_err());
    }
}
