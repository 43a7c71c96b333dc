//! Config sections. Every field has a default so partial files are valid.

use serde::{Deserialize, Serialize};

/// Analysis defaults applied when the caller gives no explicit value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Key used when no `--key` is given: "C", "Eb", "F#m", "A minor".
    /// Default: C
    #[serde(default = "AnalysisConfig::default_key")]
    pub key: String,
}

impl AnalysisConfig {
    fn default_key() -> String {
        "C".to_string()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            key: Self::default_key(),
        }
    }
}

/// Terminal output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Ranked matches printed by `analyze`.
    /// Default: 2
    #[serde(default = "DisplayConfig::default_top_matches")]
    pub top_matches: usize,

    /// Chords listed under the progression line.
    /// Default: 12
    #[serde(default = "DisplayConfig::default_max_listed_chords")]
    pub max_listed_chords: usize,

    /// ANSI color in human-readable output.
    /// Default: true
    #[serde(default = "DisplayConfig::default_color")]
    pub color: bool,
}

impl DisplayConfig {
    fn default_top_matches() -> usize {
        2
    }

    fn default_max_listed_chords() -> usize {
        12
    }

    fn default_color() -> bool {
        true
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_matches: Self::default_top_matches(),
            max_listed_chords: Self::default_max_listed_chords(),
            color: Self::default_color(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive (trace, debug, info, warn, error, or per-target).
    /// Default: warn
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
