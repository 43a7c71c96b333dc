use serde::{Deserialize, Serialize};

use crate::chord_shapes::ChordShape;
use crate::error::TheoryError;
use crate::key::Key;
use crate::progressions::ProgressionPattern;

/// Pitch class 0–11 (C=0, C#=1, ...).
pub type PitchClass = u8;

/// Latest beat position a note may reach. Beats are indexed by `u32`.
pub const MAX_BEAT: f64 = u32::MAX as f64;

/// A note placed on the beat grid.
///
/// `start` and `duration` are in beats; beat 0 is the first beat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI note number (60 = C4)
    pub pitch: u8,
    pub start: f64,
    pub duration: f64,
}

impl Note {
    /// Build a validated note.
    pub fn new(pitch: u32, start: f64, duration: f64) -> Result<Self, TheoryError> {
        if pitch > 127 {
            return Err(TheoryError::PitchOutOfRange(pitch));
        }
        if !start.is_finite() || start < 0.0 {
            return Err(TheoryError::InvalidStart(start));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TheoryError::InvalidDuration(duration));
        }
        if start + duration > MAX_BEAT {
            return Err(TheoryError::BeyondLastBeat(start + duration));
        }

        Ok(Self {
            pitch: pitch as u8,
            start,
            duration,
        })
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.pitch % 12
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Integer beats touched by `[start, start + duration)`.
    ///
    /// Notes built without `Note::new` are clamped to `0..=MAX_BEAT`; a
    /// non-finite end covers nothing.
    pub fn covered_beats(&self) -> std::ops::Range<u32> {
        let first = self.start.max(0.0).floor() as u32;
        let end = self.end();
        let last = if end.is_finite() {
            end.ceil().clamp(0.0, MAX_BEAT) as u32
        } else {
            first
        };
        first..last.max(first)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
}

impl HarmonicFunction {
    /// Short label: T, SD, D
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "T",
            HarmonicFunction::Subdominant => "SD",
            HarmonicFunction::Dominant => "D",
        }
    }
}

impl std::fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarmonicFunction::Tonic => write!(f, "tonic"),
            HarmonicFunction::Subdominant => write!(f, "subdominant"),
            HarmonicFunction::Dominant => write!(f, "dominant"),
        }
    }
}

/// A chord recognized at a beat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedChord {
    pub root: PitchClass,
    /// Root spelled for the key: "C", "Eb", "F#"
    pub root_name: &'static str,
    pub shape: &'static ChordShape,
    /// First beat at which the chord is attested
    pub beat: u32,
    /// Degree label when the root is diatonic to the key: "I", "ii", "vii°"
    pub scale_degree: Option<&'static str>,
    pub harmonic_function: Option<HarmonicFunction>,
}

impl DetectedChord {
    /// Chord symbol: "C", "Dm", "G7"
    pub fn symbol(&self) -> String {
        format!("{}{}", self.root_name, self.shape.suffix)
    }

    pub fn is_diatonic(&self) -> bool {
        self.scale_degree.is_some()
    }

    /// Same root and same shape, regardless of beat.
    pub fn same_harmony(&self, other: &DetectedChord) -> bool {
        self.root == other.root && self.shape.name == other.shape.name
    }
}

/// A progression pattern located in a chord sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionMatch {
    pub pattern: &'static ProgressionPattern,
    /// Beat of the first chord in the matched window
    pub start_beat: u32,
    /// Fraction of positions whose root offset agrees with the pattern (0.0–1.0)
    pub confidence: f64,
}

impl ProgressionMatch {
    pub fn percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// Counts of harmonic functions across a chord sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FunctionCounts {
    pub tonic: usize,
    pub subdominant: usize,
    pub dominant: usize,
}

impl FunctionCounts {
    pub fn from_chords(chords: &[DetectedChord]) -> Self {
        let mut counts = Self::default();
        for function in chords.iter().filter_map(|c| c.harmonic_function) {
            match function {
                HarmonicFunction::Tonic => counts.tonic += 1,
                HarmonicFunction::Subdominant => counts.subdominant += 1,
                HarmonicFunction::Dominant => counts.dominant += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.tonic + self.subdominant + self.dominant
    }
}

/// A pitch class used somewhere in the input, and whether the key's scale holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PitchClassUsage {
    pub pitch_class: PitchClass,
    pub name: &'static str,
    pub in_key: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    pub total_notes: usize,
    pub detected_chords: usize,
    pub patterns_found: usize,
}

/// Everything one analysis pass derives from a note collection and a key.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressionReport {
    pub key: Key,
    /// Coalesced chord sequence, ordered by beat
    pub chords: Vec<DetectedChord>,
    /// Chord labels joined by " → "
    pub progression: String,
    /// Ranked, non-increasing by confidence
    pub matches: Vec<ProgressionMatch>,
    pub insights: Vec<String>,
    pub functions: FunctionCounts,
    pub pitch_classes: Vec<PitchClassUsage>,
    pub stats: AnalysisStats,
}

impl ProgressionReport {
    pub fn top_matches(&self, n: usize) -> &[ProgressionMatch] {
        &self.matches[..n.min(self.matches.len())]
    }
}
