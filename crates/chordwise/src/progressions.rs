use serde::Serialize;

/// A well-known chord sequence, expressed relative to a key root.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ProgressionPattern {
    pub name: &'static str,
    pub display_name: &'static str,
    pub scale_degrees: &'static [&'static str],
    /// Root offset from the key root for each chord, same length as `scale_degrees`
    pub offsets: &'static [u8],
    pub description: &'static str,
    pub examples: &'static [&'static str],
}

impl ProgressionPattern {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Degree labels joined for display: "IV → V → iii → vi"
    pub fn degrees_text(&self) -> String {
        self.scale_degrees.join(" → ")
    }
}

/// Progressions to look for, in report order for equal confidence.
pub static PROGRESSION_PATTERNS: &[ProgressionPattern] = &[
    ProgressionPattern {
        name: "royal_road",
        display_name: "Royal Road",
        scale_degrees: &["IV", "V", "iii", "vi"],
        offsets: &[5, 7, 4, 9],
        description: "Grand and moving. A staple of anime theme songs.",
        examples: &["A Cruel Angel's Thesis", "Gurenge"],
    },
    ProgressionPattern {
        name: "komuro",
        display_name: "Komuro",
        scale_degrees: &["vi", "IV", "V", "I"],
        offsets: &[9, 5, 7, 0],
        description: "Bittersweet yet driving. Defined 90s J-pop.",
        examples: &["Get Wild", "HOT LIMIT"],
    },
    ProgressionPattern {
        name: "canon",
        display_name: "Canon",
        scale_degrees: &["I", "V", "vi", "iii", "IV", "I", "IV", "V"],
        offsets: &[0, 7, 9, 4, 5, 0, 5, 7],
        description: "The classic of classics. Rock-solid and reassuring.",
        examples: &["Pachelbel's Canon", "Ai wo Komete Hanataba wo"],
    },
    ProgressionPattern {
        name: "just_the_two_of_us",
        display_name: "Just The Two Of Us",
        scale_degrees: &["IVmaj7", "III7", "vi"],
        offsets: &[5, 4, 9],
        description: "Stylish and urban. Late-night city mood.",
        examples: &["Marunouchi Sadistic", "Pretender"],
    },
    ProgressionPattern {
        name: "pop_punk",
        display_name: "Pop Punk",
        scale_degrees: &["I", "V", "vi", "IV"],
        offsets: &[0, 7, 9, 5],
        description: "Bright and upbeat. A natural fit for pop songs.",
        examples: &["Let It Go", "Zenzenzense"],
    },
    ProgressionPattern {
        name: "sad",
        display_name: "Sad",
        scale_degrees: &["vi", "V", "IV", "V"],
        offsets: &[9, 7, 5, 7],
        description: "Wistful and aching. Made for ballads.",
        examples: &["Hanataba wo Kimi ni", "Mirai e"],
    },
    ProgressionPattern {
        name: "dramatic",
        display_name: "Dramatic",
        scale_degrees: &["I", "III7", "vi", "V"],
        offsets: &[0, 4, 9, 7],
        description: "Dramatic and stirring.",
        examples: &["Namae no Nai Kaibutsu", "Silhouette"],
    },
];

/// Look up a pattern by its symbol.
pub fn progression_pattern(name: &str) -> Option<&'static ProgressionPattern> {
    PROGRESSION_PATTERNS.iter().find(|p| p.name == name)
}
