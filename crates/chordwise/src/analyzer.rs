use std::collections::BTreeMap;

use crate::chords::detect_chords_by_beat;
use crate::insights::generate_progression_analysis;
use crate::key::Key;
use crate::matcher::detect_progression_pattern;
use crate::types::{DetectedChord, Note, ProgressionMatch};

/// Trait for harmony analysis backends.
///
/// `HeuristicAnalyzer` is exact-template chord matching plus windowed
/// progression scoring. Other backends can stand in for any stage.
pub trait HarmonyAnalyzer: Send + Sync {
    fn detect_chords(&self, notes: &[Note], key: Key) -> BTreeMap<u32, DetectedChord>;

    fn match_progressions(&self, chords: &[DetectedChord], key: Key) -> Vec<ProgressionMatch>;

    fn describe(
        &self,
        chords: &[DetectedChord],
        matches: &[ProgressionMatch],
        key: Key,
    ) -> Vec<String>;
}

/// Catalog-driven analyzer: exact chord-shape matching per beat,
/// sliding-window progression matching, templated insights.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl HarmonyAnalyzer for HeuristicAnalyzer {
    fn detect_chords(&self, notes: &[Note], key: Key) -> BTreeMap<u32, DetectedChord> {
        detect_chords_by_beat(notes, key)
    }

    fn match_progressions(&self, chords: &[DetectedChord], key: Key) -> Vec<ProgressionMatch> {
        detect_progression_pattern(chords, key)
    }

    fn describe(
        &self,
        chords: &[DetectedChord],
        matches: &[ProgressionMatch],
        key: Key,
    ) -> Vec<String> {
        generate_progression_analysis(chords, matches, key)
    }
}
