use serde::Serialize;

use crate::types::PitchClass;

/// A named chord shape: intervals in semitones above an implicit root.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ChordShape {
    /// Symbol used for matching and degree labels: "maj", "min7", "5"
    pub name: &'static str,
    pub display_name: &'static str,
    /// Chord-symbol suffix: "" for major, "m" for minor
    pub suffix: &'static str,
    /// Ascending, distinct, starting at 0
    pub intervals: &'static [u8],
    pub description: &'static str,
    /// bitmask: bit i set means interval i is in the shape
    #[serde(skip)]
    pub mask: u16,
}

impl ChordShape {
    const fn new(
        name: &'static str,
        display_name: &'static str,
        suffix: &'static str,
        intervals: &'static [u8],
        description: &'static str,
    ) -> Self {
        let mut mask = 0u16;
        let mut i = 0;
        while i < intervals.len() {
            mask |= 1 << intervals[i];
            i += 1;
        }
        Self {
            name,
            display_name,
            suffix,
            intervals,
            description,
            mask,
        }
    }

    pub fn size(&self) -> usize {
        self.intervals.len()
    }

    /// Pitch classes of this shape built on `root`, ascending from the root.
    pub fn pitch_classes(&self, root: PitchClass) -> Vec<PitchClass> {
        self.intervals.iter().map(|i| (root + i) % 12).collect()
    }
}

/// All recognized chord shapes. Order is the match priority: the first
/// shape whose interval set equals the candidate's wins.
pub static CHORD_SHAPES: &[ChordShape] = &[
    ChordShape::new("maj", "Major", "", &[0, 4, 7], "Bright and stable"),
    ChordShape::new("min", "Minor", "m", &[0, 3, 7], "Dark, wistful"),
    ChordShape::new("maj7", "Major 7th", "maj7", &[0, 4, 7, 11], "Smooth and stylish"),
    ChordShape::new("min7", "Minor 7th", "m7", &[0, 3, 7, 10], "Wistful but polished"),
    ChordShape::new("7", "Dominant 7th", "7", &[0, 4, 7, 10], "Tense, wants to resolve"),
    ChordShape::new("sus4", "Suspended 4th", "sus4", &[0, 5, 7], "Floating, unresolved"),
    ChordShape::new("sus2", "Suspended 2nd", "sus2", &[0, 2, 7], "Open and airy"),
    ChordShape::new("dim", "Diminished", "dim", &[0, 3, 6], "Unstable, tense"),
    ChordShape::new("aug", "Augmented", "aug", &[0, 4, 8], "Mysterious"),
    ChordShape::new("add9", "Add 9", "add9", &[0, 2, 4, 7], "Wide and spacious"),
    ChordShape::new("5", "Power chord", "5", &[0, 7], "Strong, rock"),
];

/// Look up a shape by its symbol.
pub fn chord_shape(name: &str) -> Option<&'static ChordShape> {
    CHORD_SHAPES.iter().find(|shape| shape.name == name)
}

/// Convert a set of pitch classes to an interval bitmask relative to a root.
pub(crate) fn to_interval_mask(pitch_classes: &[PitchClass], root: PitchClass) -> u16 {
    let mut mask = 0u16;
    for &pc in pitch_classes {
        let interval = (pc + 12 - root) % 12;
        mask |= 1 << interval;
    }
    mask
}

/// Match distinct, ascending pitch classes against the catalog.
///
/// Tries each present pitch class as root, lowest first, and returns the
/// first `(root, shape)` whose interval set is exactly a catalog shape.
/// No partial or extra-tone tolerance.
pub fn match_shape(pitch_classes: &[PitchClass]) -> Option<(PitchClass, &'static ChordShape)> {
    if pitch_classes.len() < 2 {
        return None;
    }

    for &root in pitch_classes {
        let mask = to_interval_mask(pitch_classes, root);
        if let Some(shape) = CHORD_SHAPES.iter().find(|shape| shape.mask == mask) {
            return Some((root, shape));
        }
    }

    None
}
