pub mod analyzer;
pub mod chord_shapes;
pub mod chords;
pub mod error;
pub mod insights;
pub mod key;
pub mod matcher;
pub mod pitch;
pub mod progressions;
pub mod types;

pub use analyzer::{HarmonyAnalyzer, HeuristicAnalyzer};
pub use chord_shapes::{chord_shape, ChordShape, CHORD_SHAPES};
pub use chords::{coalesce_progression, detect_chord, detect_chords_by_beat};
pub use error::TheoryError;
pub use insights::{chord_label, generate_progression_analysis, progression_to_string};
pub use key::{DiatonicEntry, Key, KeyMode};
pub use matcher::{detect_progression_pattern, MIN_CONFIDENCE};
pub use pitch::{note_name, parse_pitch, pitch_name};
pub use progressions::{progression_pattern, ProgressionPattern, PROGRESSION_PATTERNS};
pub use types::{
    AnalysisStats, DetectedChord, FunctionCounts, HarmonicFunction, Note, PitchClass,
    PitchClassUsage, ProgressionMatch, ProgressionReport,
};

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

/// Harmony analysis engine.
///
/// Composes beat-wise chord detection, coalescing, progression matching and
/// insight generation into a single `ProgressionReport`. Holds no state
/// between calls; callers that re-analyze unchanged input may memoize on
/// `(notes, key)` themselves.
#[derive(Clone)]
pub struct TheoryEngine {
    analyzer: Arc<dyn HarmonyAnalyzer>,
}

impl Default for TheoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TheoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TheoryEngine").finish_non_exhaustive()
    }
}

impl TheoryEngine {
    /// Create with the default heuristic analyzer.
    pub fn new() -> Self {
        Self {
            analyzer: Arc::new(HeuristicAnalyzer),
        }
    }

    /// Create with a custom analyzer (for testing or alternative backends).
    pub fn with_analyzer(analyzer: Arc<dyn HarmonyAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Analyze a note collection against a key.
    pub fn analyze(&self, notes: &[Note], key: Key) -> ProgressionReport {
        debug!(notes = notes.len(), %key, "analyzing progression");

        let by_beat = self.analyzer.detect_chords(notes, key);
        let chords = coalesce_progression(&by_beat);
        let matches = self.analyzer.match_progressions(&chords, key);
        let insights = self.analyzer.describe(&chords, &matches, key);

        let stats = AnalysisStats {
            total_notes: notes.len(),
            detected_chords: chords.len(),
            patterns_found: matches.len(),
        };

        debug!(
            beats = by_beat.len(),
            chords = stats.detected_chords,
            matches = stats.patterns_found,
            "analysis complete"
        );

        ProgressionReport {
            key,
            progression: progression_to_string(&chords),
            functions: FunctionCounts::from_chords(&chords),
            pitch_classes: pitch_class_usage(notes, key),
            chords,
            matches,
            insights,
            stats,
        }
    }
}

/// Distinct pitch classes in `notes`, ascending, flagged by key membership.
pub fn pitch_class_usage(notes: &[Note], key: Key) -> Vec<PitchClassUsage> {
    let used: BTreeSet<PitchClass> = notes.iter().map(Note::pitch_class).collect();
    used.into_iter()
        .map(|pitch_class| PitchClassUsage {
            pitch_class,
            name: note_name(pitch_class, key.use_flats()),
            in_key: key.contains(pitch_class),
        })
        .collect()
}
