use crate::key::Key;
use crate::types::{DetectedChord, FunctionCounts, ProgressionMatch};

/// How many example titles the pattern sentence quotes.
const MAX_EXAMPLES: usize = 2;

/// Label for one chord: degree notation when diatonic ("V7", "vi"),
/// otherwise the chord symbol ("A#", "Ebm7").
pub fn chord_label(chord: &DetectedChord) -> String {
    match chord.scale_degree {
        // The degree's case already says major or minor
        Some(degree) => match chord.shape.name {
            "maj" | "min" => degree.to_string(),
            other => format!("{}{}", degree, other),
        },
        None => chord.symbol(),
    }
}

/// Chord labels joined with arrows: "IV → V → iii → vi"
pub fn progression_to_string(chords: &[DetectedChord]) -> String {
    chords
        .iter()
        .map(chord_label)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Describe a coalesced progression in a few short sentences.
///
/// Order: chord count, then the top-ranked pattern (name and confidence,
/// description, examples), then harmonic-function remarks, then out-of-key
/// chords. Each sentence is left out when it has nothing to say.
pub fn generate_progression_analysis(
    chords: &[DetectedChord],
    matches: &[ProgressionMatch],
    key: Key,
) -> Vec<String> {
    let mut insights = Vec::new();

    if !chords.is_empty() {
        let noun = if chords.len() == 1 { "chord" } else { "chords" };
        insights.push(format!("Detected {} {}", chords.len(), noun));
    }

    if let Some(top) = matches.first() {
        insights.push(format!(
            "Detected the {} progression ({}% match)",
            top.pattern.display_name,
            top.percent()
        ));
        insights.push(top.pattern.description.to_string());
        if !top.pattern.examples.is_empty() {
            let examples: Vec<_> = top.pattern.examples.iter().take(MAX_EXAMPLES).copied().collect();
            insights.push(format!("Examples: {}", examples.join(", ")));
        }
    }

    let functions = FunctionCounts::from_chords(chords);
    if functions.total() > 0 {
        if functions.dominant > 0 && functions.tonic > 0 {
            insights.push("Dominant resolves to tonic, giving a sense of arrival".to_string());
        }
        if functions.subdominant > functions.tonic {
            insights.push(
                "Subdominant-heavy, so the progression feels open and unresolved".to_string(),
            );
        }
    }

    let out_of_key = chords.iter().filter(|c| !c.is_diatonic()).count();
    if out_of_key > 0 {
        insights.push(format!(
            "Possible borrowed chords or modulation away from {}: {}",
            key, out_of_key
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord_shapes::chord_shape;
    use crate::pitch::note_name;
    use crate::progressions::progression_pattern;
    use pretty_assertions::assert_eq;

    fn chord_in(key: Key, root: u8, shape: &str, beat: u32) -> DetectedChord {
        let diatonic = key.diatonic_entry(root);
        DetectedChord {
            root,
            root_name: note_name(root, key.use_flats()),
            shape: chord_shape(shape).unwrap(),
            beat,
            scale_degree: diatonic.map(|e| e.scale_degree),
            harmonic_function: diatonic.map(|e| e.function),
        }
    }

    fn in_c(root: u8, shape: &str) -> DetectedChord {
        chord_in(Key::major(0), root, shape, 0)
    }

    #[test]
    fn labels() {
        assert_eq!(chord_label(&in_c(0, "maj")), "I");
        assert_eq!(chord_label(&in_c(9, "min")), "vi");
        assert_eq!(chord_label(&in_c(7, "7")), "V7");
        assert_eq!(chord_label(&in_c(5, "maj7")), "IVmaj7");
        assert_eq!(chord_label(&in_c(10, "maj")), "A#");
        assert_eq!(chord_label(&in_c(3, "min7")), "D#m7");
        assert_eq!(chord_label(&chord_in(Key::major(5), 3, "min7", 0)), "Ebm7");
    }

    #[test]
    fn progression_text() {
        let chords = vec![in_c(5, "maj"), in_c(7, "maj"), in_c(4, "min"), in_c(9, "min")];
        assert_eq!(progression_to_string(&chords), "IV → V → iii → vi");
        assert_eq!(progression_to_string(&chords[..1]), "IV");
        assert_eq!(progression_to_string(&[]), "");
    }

    #[test]
    fn nothing_to_say() {
        assert!(generate_progression_analysis(&[], &[], Key::major(0)).is_empty());
    }

    #[test]
    fn full_report_order() {
        let chords = vec![
            in_c(5, "maj"),
            in_c(7, "maj"),
            in_c(4, "min"),
            in_c(9, "min"),
            in_c(10, "maj"),
        ];
        let matches = vec![ProgressionMatch {
            pattern: progression_pattern("royal_road").unwrap(),
            start_beat: 0,
            confidence: 1.0,
        }];

        let insights = generate_progression_analysis(&chords, &matches, Key::major(0));
        assert_eq!(
            insights,
            vec![
                "Detected 5 chords".to_string(),
                "Detected the Royal Road progression (100% match)".to_string(),
                "Grand and moving. A staple of anime theme songs.".to_string(),
                "Examples: A Cruel Angel's Thesis, Gurenge".to_string(),
                "Dominant resolves to tonic, giving a sense of arrival".to_string(),
                "Possible borrowed chords or modulation away from C major: 1".to_string(),
            ]
        );
    }

    #[test]
    fn only_top_match_is_described() {
        let chords = vec![in_c(9, "min"), in_c(5, "maj"), in_c(7, "maj"), in_c(2, "min")];
        let matches = vec![
            ProgressionMatch {
                pattern: progression_pattern("komuro").unwrap(),
                start_beat: 0,
                confidence: 0.75,
            },
            ProgressionMatch {
                pattern: progression_pattern("sad").unwrap(),
                start_beat: 0,
                confidence: 0.75,
            },
        ];
        let insights = generate_progression_analysis(&chords, &matches, Key::major(0));
        assert_eq!(insights[1], "Detected the Komuro progression (75% match)");
        assert!(insights.iter().all(|s| !s.contains("Sad")));
    }

    #[test]
    fn percentage_rounds() {
        let chords = vec![in_c(0, "maj")];
        let matches = vec![ProgressionMatch {
            pattern: progression_pattern("canon").unwrap(),
            start_beat: 0,
            confidence: 7.0 / 8.0,
        }];
        let insights = generate_progression_analysis(&chords, &matches, Key::major(0));
        assert_eq!(insights[1], "Detected the Canon progression (88% match)");
    }

    #[test]
    fn subdominant_heavy() {
        // ii IV I: two SD, one T, no D
        let chords = vec![in_c(2, "min"), in_c(5, "maj"), in_c(0, "maj")];
        let insights = generate_progression_analysis(&chords, &[], Key::major(0));
        assert_eq!(
            insights,
            vec![
                "Detected 3 chords".to_string(),
                "Subdominant-heavy, so the progression feels open and unresolved".to_string(),
            ]
        );
    }

    #[test]
    fn single_chord_wording() {
        let insights = generate_progression_analysis(&[in_c(0, "maj")], &[], Key::major(0));
        assert_eq!(insights, vec!["Detected 1 chord".to_string()]);
    }

    #[test]
    fn all_chromatic_has_no_function_remark() {
        let chords = vec![in_c(1, "maj"), in_c(3, "maj")];
        let insights = generate_progression_analysis(&chords, &[], Key::major(0));
        assert_eq!(
            insights,
            vec![
                "Detected 2 chords".to_string(),
                "Possible borrowed chords or modulation away from C major: 2".to_string(),
            ]
        );
    }
}
