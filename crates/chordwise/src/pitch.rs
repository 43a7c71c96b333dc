use crate::error::TheoryError;
use crate::types::PitchClass;

const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Key roots conventionally spelled with flats: Db, Eb, F, Gb, Ab, Bb.
pub static FLAT_KEY_ROOTS: [PitchClass; 6] = [1, 3, 5, 6, 8, 10];

pub fn note_name(pitch_class: PitchClass, use_flats: bool) -> &'static str {
    let idx = (pitch_class % 12) as usize;
    if use_flats {
        NOTE_NAMES_FLAT[idx]
    } else {
        NOTE_NAMES_SHARP[idx]
    }
}

/// Whether spellings in a key on this root should use flats.
pub fn prefers_flats(key_root: PitchClass) -> bool {
    FLAT_KEY_ROOTS.contains(&(key_root % 12))
}

/// Split a note name into its natural letter's pitch class and the
/// semitone offset of its accidentals. The offset is not wrapped.
fn letter_and_accidentals(name: &str) -> Option<(i32, i32)> {
    let mut chars = name.chars();
    let natural = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let mut offset = 0;
    for c in chars {
        match c {
            '#' | '♯' => offset += 1,
            'b' | '♭' => offset -= 1,
            _ => return None,
        }
    }

    Some((natural, offset))
}

/// Parse a bare note name ("C", "F#", "Bb", "eb") to a pitch class.
pub fn parse_note_name(name: &str) -> Option<PitchClass> {
    let (natural, offset) = letter_and_accidentals(name)?;
    Some((natural + offset).rem_euclid(12) as PitchClass)
}

/// Scientific pitch notation for a MIDI note number: 60 → "C4".
pub fn pitch_name(pitch: u8) -> String {
    let octave = (pitch / 12) as i32 - 1;
    format!("{}{}", note_name(pitch % 12, false), octave)
}

/// Parse scientific pitch notation ("C4", "F#3", "Db-1") to a MIDI note number.
pub fn parse_pitch_name(name: &str) -> Result<u8, TheoryError> {
    let unknown = || TheoryError::UnknownPitchName(name.to_string());

    let split = name
        .char_indices()
        .find(|&(i, c)| i > 0 && (c.is_ascii_digit() || c == '-'))
        .map(|(i, _)| i)
        .ok_or_else(unknown)?;
    let (note, octave) = name.split_at(split);

    let (natural, offset) = letter_and_accidentals(note).ok_or_else(unknown)?;
    let octave: i32 = octave.parse().map_err(|_| unknown())?;

    // Accidentals may cross the octave boundary: Cb4 is B3
    let pitch = (octave + 1) * 12 + natural + offset;

    u8::try_from(pitch)
        .ok()
        .filter(|&p| p <= 127)
        .ok_or_else(unknown)
}

/// Accept either a MIDI number ("60") or a pitch name ("C4").
pub fn parse_pitch(text: &str) -> Result<u8, TheoryError> {
    match text.parse::<u32>() {
        Ok(n) if n <= 127 => Ok(n as u8),
        Ok(n) => Err(TheoryError::PitchOutOfRange(n)),
        Err(_) => parse_pitch_name(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_c_and_a440() {
        assert_eq!(pitch_name(60), "C4");
        assert_eq!(pitch_name(69), "A4");
        assert_eq!(pitch_name(61), "C#4");
        assert_eq!(pitch_name(59), "B3");
        assert_eq!(pitch_name(0), "C-1");
    }

    #[test]
    fn parse_names() {
        assert_eq!(parse_pitch_name("C4"), Ok(60));
        assert_eq!(parse_pitch_name("A4"), Ok(69));
        assert_eq!(parse_pitch_name("C#4"), Ok(61));
        assert_eq!(parse_pitch_name("Db4"), Ok(61));
        assert_eq!(parse_pitch_name("B3"), Ok(59));
        assert_eq!(parse_pitch_name("Cb4"), Ok(59));
        assert_eq!(parse_pitch_name("C-1"), Ok(0));
        assert_eq!(parse_pitch_name("G9"), Ok(127));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_pitch_name("H4").is_err());
        assert!(parse_pitch_name("C").is_err());
        assert!(parse_pitch_name("Cx4").is_err());
        assert!(parse_pitch_name("G#9").is_err());
        assert!(parse_pitch_name("Cb-1").is_err());
    }

    #[test]
    fn names_round_trip_over_midi_range() {
        for pitch in 0..=127u8 {
            assert_eq!(parse_pitch_name(&pitch_name(pitch)), Ok(pitch), "pitch {}", pitch);
        }
    }

    #[test]
    fn parse_pitch_accepts_numbers_and_names() {
        assert_eq!(parse_pitch("64"), Ok(64));
        assert_eq!(parse_pitch("E4"), Ok(64));
        assert_eq!(parse_pitch("200"), Err(TheoryError::PitchOutOfRange(200)));
    }

    #[test]
    fn flat_spelling() {
        assert_eq!(note_name(1, true), "Db");
        assert_eq!(note_name(1, false), "C#");
        assert!(prefers_flats(3));
        assert!(!prefers_flats(7));
    }

    #[test]
    fn bare_note_names() {
        assert_eq!(parse_note_name("C"), Some(0));
        assert_eq!(parse_note_name("f#"), Some(6));
        assert_eq!(parse_note_name("Bb"), Some(10));
        assert_eq!(parse_note_name("B#"), Some(0));
        assert_eq!(parse_note_name(""), None);
        assert_eq!(parse_note_name("X"), None);
    }
}
