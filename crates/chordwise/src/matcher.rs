use crate::key::Key;
use crate::progressions::{ProgressionPattern, PROGRESSION_PATTERNS};
use crate::types::{DetectedChord, ProgressionMatch};

/// Fraction of window positions that must agree for a pattern to be reported.
pub const MIN_CONFIDENCE: f64 = 0.75;

/// Shortest chord sequence any catalog pattern can match.
pub const MIN_PROGRESSION_LEN: usize = 3;

/// Fraction of positions where the window's root offsets equal the pattern's.
pub fn window_confidence(window: &[DetectedChord], pattern: &ProgressionPattern, key: Key) -> f64 {
    if window.len() != pattern.len() {
        return 0.0;
    }

    let agreeing = window
        .iter()
        .zip(pattern.offsets)
        .filter(|(chord, offset)| key.offset_of(chord.root) == **offset)
        .count();

    agreeing as f64 / pattern.len() as f64
}

/// Find every catalog pattern placement in a coalesced chord sequence.
///
/// Each pattern slides over the sequence as a fixed-size window. Every
/// window scoring at least [`MIN_CONFIDENCE`] is reported, overlaps and
/// multiple patterns included. Results are sorted by descending confidence;
/// equal confidences keep catalog-then-position order.
pub fn detect_progression_pattern(chords: &[DetectedChord], key: Key) -> Vec<ProgressionMatch> {
    if chords.len() < MIN_PROGRESSION_LEN {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for pattern in PROGRESSION_PATTERNS {
        if chords.len() < pattern.len() {
            continue;
        }

        for window in chords.windows(pattern.len()) {
            let confidence = window_confidence(window, pattern, key);
            if confidence >= MIN_CONFIDENCE {
                matches.push(ProgressionMatch {
                    pattern,
                    start_beat: window[0].beat,
                    confidence,
                });
            }
        }
    }

    // stable: ties stay in encounter order
    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord_shapes::chord_shape;
    use crate::progressions::progression_pattern;

    fn chord(root: u8, beat: u32) -> DetectedChord {
        let key = Key::major(0);
        let diatonic = key.diatonic_entry(root);
        DetectedChord {
            root,
            root_name: crate::pitch::note_name(root, false),
            shape: chord_shape("maj").unwrap(),
            beat,
            scale_degree: diatonic.map(|e| e.scale_degree),
            harmonic_function: diatonic.map(|e| e.function),
        }
    }

    fn sequence(roots: &[u8]) -> Vec<DetectedChord> {
        roots
            .iter()
            .enumerate()
            .map(|(i, &root)| chord(root, i as u32 * 4))
            .collect()
    }

    #[test]
    fn too_short_is_empty() {
        assert!(detect_progression_pattern(&[], Key::major(0)).is_empty());
        assert!(detect_progression_pattern(&sequence(&[5, 7]), Key::major(0)).is_empty());
    }

    #[test]
    fn royal_road_exact() {
        let chords = sequence(&[5, 7, 4, 9]);
        let matches = detect_progression_pattern(&chords, Key::major(0));

        let top = &matches[0];
        assert_eq!(top.pattern.name, "royal_road");
        assert_eq!(top.confidence, 1.0);
        assert_eq!(top.start_beat, 0);
    }

    #[test]
    fn transposed_key_still_matches() {
        // Royal Road in D: G A F# B
        let chords = sequence(&[7, 9, 6, 11]);
        let matches = detect_progression_pattern(&chords, Key::major(2));
        assert_eq!(matches[0].pattern.name, "royal_road");
        assert_eq!(matches[0].confidence, 1.0);
    }

    #[test]
    fn one_substitution_still_registers() {
        // IV V III(b) vi: third chord borrowed
        let chords = sequence(&[5, 7, 3, 9]);
        let matches = detect_progression_pattern(&chords, Key::major(0));
        let royal = matches
            .iter()
            .find(|m| m.pattern.name == "royal_road")
            .unwrap();
        assert_eq!(royal.confidence, 0.75);
    }

    #[test]
    fn two_substitutions_rejected() {
        let chords = sequence(&[5, 7, 3, 10]);
        let matches = detect_progression_pattern(&chords, Key::major(0));
        assert!(matches.iter().all(|m| m.pattern.name != "royal_road"));
    }

    #[test]
    fn three_chord_pattern_needs_all_positions() {
        // 2 of 3 is 0.67, below threshold
        let chords = sequence(&[5, 4, 2]);
        let matches = detect_progression_pattern(&chords, Key::major(0));
        assert!(matches.is_empty());

        let chords = sequence(&[5, 4, 9]);
        let matches = detect_progression_pattern(&chords, Key::major(0));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pattern.name, "just_the_two_of_us");
    }

    #[test]
    fn window_start_beat_is_first_chord_beat() {
        // I then Royal Road starting at the second chord
        let chords = sequence(&[0, 5, 7, 4, 9]);
        let matches = detect_progression_pattern(&chords, Key::major(0));
        let royal = matches
            .iter()
            .find(|m| m.pattern.name == "royal_road" && m.confidence == 1.0)
            .unwrap();
        assert_eq!(royal.start_beat, 4);
    }

    #[test]
    fn ranking_is_non_increasing() {
        let chords = sequence(&[0, 7, 9, 5, 0, 7, 9, 4, 5, 0, 5, 7, 9, 5, 7, 0]);
        let matches = detect_progression_pattern(&chords, Key::major(0));

        assert!(matches.len() > 2);
        assert!(matches
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence));
        assert!(matches
            .iter()
            .all(|m| m.confidence >= MIN_CONFIDENCE && m.confidence <= 1.0));
    }

    #[test]
    fn ties_keep_catalog_order() {
        // vi IV V I V vi IV: Komuro (exact) and Pop Punk-shaped windows
        let chords = sequence(&[9, 5, 7, 0, 7, 9, 5]);
        let matches = detect_progression_pattern(&chords, Key::major(0));
        let exact: Vec<_> = matches
            .iter()
            .filter(|m| m.confidence == 1.0)
            .map(|m| m.pattern.name)
            .collect();
        assert_eq!(exact, vec!["komuro", "pop_punk"]);
    }

    #[test]
    fn every_catalog_pattern_scores_its_own_degrees() {
        for pattern in PROGRESSION_PATTERNS {
            let chords = sequence(pattern.offsets);
            assert_eq!(window_confidence(&chords, pattern, Key::major(0)), 1.0, "{}", pattern.name);
            assert!(detect_progression_pattern(&chords, Key::major(0))
                .iter()
                .any(|m| m.pattern.name == pattern.name && m.confidence == 1.0));
        }
    }

    #[test]
    fn confidence_of_mismatched_window_is_zero() {
        let pattern = progression_pattern("canon").unwrap();
        assert_eq!(window_confidence(&sequence(&[0, 7]), pattern, Key::major(0)), 0.0);
    }

    #[test]
    fn deterministic() {
        let chords = sequence(&[9, 5, 7, 0, 9, 7, 5, 7]);
        let a = detect_progression_pattern(&chords, Key::major(0));
        let b = detect_progression_pattern(&chords, Key::major(0));
        assert_eq!(a, b);
    }
}
