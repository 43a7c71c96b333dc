//! chordwise - harmony analysis from the command line
//!
//! Subcommands:
//! - `chordwise analyze <notes.json>` - Chords, progression patterns and insights
//! - `chordwise chord <pitch>...` - Identify one chord
//! - `chordwise patterns` - List the progression catalog
//! - `chordwise shapes` - List the chord-shape catalog
//! - `chordwise config` - Show the effective configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use chordconf::ChordwiseConfig;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod format;

#[derive(Parser)]
#[command(name = "chordwise")]
#[command(about = "Symbolic harmony analysis: chords, degrees and progression patterns")]
#[command(version)]
struct Cli {
    /// Config file used in place of ./chordwise.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON array of notes
    Analyze {
        /// Notes file: [{"pitch": 60, "start": 0.0, "duration": 1.0}, ...] ("-" for stdin)
        notes: PathBuf,

        /// Key (e.g., C, Eb, F#m, "A minor"); defaults to analysis.key
        #[arg(short, long)]
        key: Option<String>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Identify the chord formed by simultaneous pitches
    Chord {
        /// MIDI numbers or pitch names (e.g., 60 64 67 or C4 E4 G4)
        #[arg(required = true)]
        pitches: Vec<String>,

        /// Key used for degree and function
        #[arg(short, long)]
        key: Option<String>,

        /// Print the detected chord as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known progression patterns
    Patterns {
        #[arg(long)]
        json: bool,
    },

    /// List known chord shapes
    Shapes {
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration and where it came from
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, sources) = ChordwiseConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if cli.no_color {
        config.display.color = false;
    }

    let filter = EnvFilter::try_new(&config.telemetry.log_level)
        .with_context(|| format!("Invalid log level '{}'", config.telemetry.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(files = ?sources.files, env = ?sources.env_overrides, "configuration loaded");

    match cli.command {
        Commands::Analyze { notes, key, json } => {
            commands::analyze(&config, &notes, key.as_deref(), json)?;
        }
        Commands::Chord { pitches, key, json } => {
            commands::chord(&config, &pitches, key.as_deref(), json)?;
        }
        Commands::Patterns { json } => {
            commands::patterns(&config, json)?;
        }
        Commands::Shapes { json } => {
            commands::shapes(&config, json)?;
        }
        Commands::Config => {
            commands::show_config(&config, &sources);
        }
    }

    Ok(())
}
