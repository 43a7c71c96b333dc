//! Layered configuration for the chordwise tools.
//!
//! The analysis engine takes everything as arguments; this crate only
//! supplies front-end defaults (fallback key, how much to print, logging).
//!
//! # Usage
//!
//! ```rust,no_run
//! use chordconf::ChordwiseConfig;
//!
//! let (config, _sources) = ChordwiseConfig::load_with_sources_from(None).expect("Failed to load config");
//! println!("default key: {}", config.analysis.key);
//! println!("top matches: {}", config.display.top_matches);
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins, key by key):
//! 1. `/etc/chordwise/config.toml` (system)
//! 2. `~/.config/chordwise/config.toml` (user)
//! 3. `./chordwise.toml` (local override) or an explicit path
//! 4. Environment variables (`CHORDWISE_*`, `RUST_LOG`, `NO_COLOR`)
//!
//! # Example Config
//!
//! ```toml
//! [analysis]
//! key = "Eb"
//!
//! [display]
//! top_matches = 3
//! max_listed_chords = 16
//! color = true
//!
//! [telemetry]
//! log_level = "chordwise=debug"
//! ```

pub mod loader;
pub mod sections;

pub use loader::{discover_config_files_with_override, ConfigSources};
pub use sections::{AnalysisConfig, DisplayConfig, TelemetryConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Complete chordwise configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordwiseConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl ChordwiseConfig {
    /// Load configuration from all sources and report where values came from.
    ///
    /// Load order (later wins):
    /// 1. Compiled defaults
    /// 2. `/etc/chordwise/config.toml`
    /// 3. `~/.config/chordwise/config.toml`
    /// 4. `./chordwise.toml`, or `config_path` when given
    /// 5. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let files = discover_config_files_with_override(config_path);
        let (mut config, mut sources) = Self::load_files(&files)?;

        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Merge the given files in order over compiled defaults. No environment.
    pub fn load_files(files: &[PathBuf]) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut merged = toml::Table::new();

        for path in files {
            let table = loader::load_table(path)?;
            loader::merge_tables(&mut merged, table);
            sources.files.push(path.clone());
        }

        let origin = sources
            .files
            .last()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("<defaults>"));
        let config = loader::into_config(merged, &origin)?;

        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Build TOML manually for nicer formatting
        let mut output = String::new();

        output.push_str("# chordwise configuration\n\n");

        output.push_str("[analysis]\n");
        output.push_str(&format!("key = {}\n", quoted(&self.analysis.key)));

        output.push_str("\n[display]\n");
        output.push_str(&format!("top_matches = {}\n", self.display.top_matches));
        output.push_str(&format!(
            "max_listed_chords = {}\n",
            self.display.max_listed_chords
        ));
        output.push_str(&format!("color = {}\n", self.display.color));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!(
            "log_level = {}\n",
            quoted(&self.telemetry.log_level)
        ));

        output
    }
}

fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}
