use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::chord_shapes::match_shape;
use crate::key::Key;
use crate::pitch::note_name;
use crate::types::{DetectedChord, Note, PitchClass};

/// Identify the chord formed by a set of simultaneous notes.
///
/// Octaves are discarded; the distinct pitch classes must match a catalog
/// shape exactly from one of their own members as root. The chord's beat is
/// the earliest start among the notes. Degree and function are attached only
/// when the root is diatonic to `key`.
pub fn detect_chord<'a, I>(notes: I, key: Key) -> Option<DetectedChord>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut pitch_classes = BTreeSet::new();
    let mut earliest = f64::INFINITY;
    for note in notes {
        pitch_classes.insert(note.pitch_class());
        earliest = earliest.min(note.start);
    }

    let pitch_classes: Vec<PitchClass> = pitch_classes.into_iter().collect();
    let (root, shape) = match_shape(&pitch_classes)?;
    let diatonic = key.diatonic_entry(root);

    Some(DetectedChord {
        root,
        root_name: note_name(root, key.use_flats()),
        shape,
        beat: earliest.max(0.0).floor() as u32,
        scale_degree: diatonic.map(|e| e.scale_degree),
        harmonic_function: diatonic.map(|e| e.function),
    })
}

/// Detect a chord at every integer beat.
///
/// A note counts toward each beat its span `[start, start + duration)`
/// touches, so sustained notes join every beat they cover. Beats whose notes
/// form no recognizable chord are absent from the map.
pub fn detect_chords_by_beat(notes: &[Note], key: Key) -> BTreeMap<u32, DetectedChord> {
    let mut notes_by_beat: BTreeMap<u32, Vec<&Note>> = BTreeMap::new();
    for note in notes {
        for beat in note.covered_beats() {
            notes_by_beat.entry(beat).or_default().push(note);
        }
    }

    let mut chords = BTreeMap::new();
    for (beat, beat_notes) in notes_by_beat {
        match detect_chord(beat_notes.iter().copied(), key) {
            Some(mut chord) => {
                trace!(beat, symbol = %chord.symbol(), "chord detected");
                chord.beat = beat;
                chords.insert(beat, chord);
            }
            None => trace!(beat, notes = beat_notes.len(), "no chord"),
        }
    }

    chords
}

/// Collapse runs of the same chord on consecutive detected beats into one
/// entry, keeping the first beat of each run.
///
/// Progression matching expects this sequence; one entry per raw beat would
/// stretch every pattern window.
pub fn coalesce_progression(chords_by_beat: &BTreeMap<u32, DetectedChord>) -> Vec<DetectedChord> {
    let mut progression: Vec<DetectedChord> = Vec::new();

    for chord in chords_by_beat.values() {
        let repeats_last = progression
            .last()
            .is_some_and(|last| last.same_harmony(chord));
        if !repeats_last {
            progression.push(chord.clone());
        }
    }

    progression
}
