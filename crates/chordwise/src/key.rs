use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;
use crate::pitch::{note_name, parse_note_name, prefers_flats};
use crate::types::HarmonicFunction::{self, Dominant, Subdominant, Tonic};
use crate::types::PitchClass;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    #[default]
    Major,
    Minor,
}

impl std::fmt::Display for KeyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyMode::Major => write!(f, "major"),
            KeyMode::Minor => write!(f, "minor"),
        }
    }
}

/// One row of a key's diatonic chord table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiatonicEntry {
    pub scale_degree: &'static str,
    /// Semitones above the key root
    pub offset: PitchClass,
    /// Shape the degree takes in the scale (informational; not used for lookup)
    pub shape_name: &'static str,
    pub function: HarmonicFunction,
}

const fn entry(
    scale_degree: &'static str,
    offset: PitchClass,
    shape_name: &'static str,
    function: HarmonicFunction,
) -> DiatonicEntry {
    DiatonicEntry {
        scale_degree,
        offset,
        shape_name,
        function,
    }
}

pub static MAJOR_DIATONIC: [DiatonicEntry; 7] = [
    entry("I", 0, "maj", Tonic),
    entry("ii", 2, "min", Subdominant),
    entry("iii", 4, "min", Tonic),
    entry("IV", 5, "maj", Subdominant),
    entry("V", 7, "maj", Dominant),
    entry("vi", 9, "min", Tonic),
    entry("vii°", 11, "dim", Dominant),
];

/// Natural minor. VI stands in for the tonic as vi does in major.
pub static MINOR_DIATONIC: [DiatonicEntry; 7] = [
    entry("i", 0, "min", Tonic),
    entry("ii°", 2, "dim", Subdominant),
    entry("III", 3, "maj", Tonic),
    entry("iv", 5, "min", Subdominant),
    entry("v", 7, "min", Dominant),
    entry("VI", 8, "maj", Tonic),
    entry("VII", 10, "maj", Dominant),
];

/// The key an analysis is read against. Supplied by the caller, never inferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "KeyFields")]
pub struct Key {
    /// Pitch class 0–11 (C=0, C#=1, ...)
    pub root: PitchClass,
    pub mode: KeyMode,
}

/// Wire form of `Key`; deserializing goes through `Key::new` so the root is reduced mod 12.
#[derive(Deserialize)]
struct KeyFields {
    root: PitchClass,
    #[serde(default)]
    mode: KeyMode,
}

impl From<KeyFields> for Key {
    fn from(fields: KeyFields) -> Self {
        Key::new(fields.root, fields.mode)
    }
}

impl Key {
    pub fn new(root: PitchClass, mode: KeyMode) -> Self {
        Self {
            root: root % 12,
            mode,
        }
    }

    pub fn major(root: PitchClass) -> Self {
        Self::new(root, KeyMode::Major)
    }

    pub fn minor(root: PitchClass) -> Self {
        Self::new(root, KeyMode::Minor)
    }

    pub fn diatonic_table(&self) -> &'static [DiatonicEntry; 7] {
        match self.mode {
            KeyMode::Major => &MAJOR_DIATONIC,
            KeyMode::Minor => &MINOR_DIATONIC,
        }
    }

    /// Semitones from the key root up to `pitch_class`.
    pub fn offset_of(&self, pitch_class: PitchClass) -> PitchClass {
        (pitch_class % 12 + 12 - self.root % 12) % 12
    }

    /// Diatonic row for a chord rooted on `chord_root`, if the root is in the table.
    pub fn diatonic_entry(&self, chord_root: PitchClass) -> Option<&'static DiatonicEntry> {
        let offset = self.offset_of(chord_root);
        self.diatonic_table().iter().find(|e| e.offset == offset)
    }

    pub fn use_flats(&self) -> bool {
        prefers_flats(self.root)
    }

    pub fn root_name(&self) -> &'static str {
        note_name(self.root, self.use_flats())
    }

    /// Pitch classes of the key's scale, ascending from the root.
    pub fn scale_pitch_classes(&self) -> [PitchClass; 7] {
        let table = self.diatonic_table();
        let mut scale = [0; 7];
        for (slot, e) in scale.iter_mut().zip(table.iter()) {
            *slot = (self.root % 12 + e.offset) % 12;
        }
        scale
    }

    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        let offset = self.offset_of(pitch_class);
        self.diatonic_table().iter().any(|e| e.offset == offset)
    }
}

impl From<PitchClass> for Key {
    fn from(root: PitchClass) -> Self {
        Key::major(root)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.root_name(), self.mode)
    }
}

impl FromStr for Key {
    type Err = TheoryError;

    /// Accepts "C", "F#", "Bb", "Am", "C#m", "Ebmin", "A minor", "G major", or "0"–"11".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || TheoryError::UnknownKey(s.to_string());
        let text = s.trim();

        if let Ok(n) = text.parse::<u8>() {
            return if n < 12 { Ok(Key::major(n)) } else { Err(unknown()) };
        }

        // Root is the letter plus any accidentals; the rest names the mode
        let root_len = text
            .char_indices()
            .skip(1)
            .find(|&(_, c)| !matches!(c, '#' | 'b' | '♯' | '♭'))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let (root, mode) = text.split_at(root_len);

        let root = parse_note_name(root).ok_or_else(unknown)?;
        let mode = match mode.trim().to_ascii_lowercase().as_str() {
            "" | "maj" | "major" => KeyMode::Major,
            "m" | "min" | "minor" => KeyMode::Minor,
            _ => return Err(unknown()),
        };

        Ok(Key::new(root, mode))
    }
}
