//! Human-readable rendering of reports and catalogs

use std::fmt::Write;

use chordconf::DisplayConfig;
use chordwise::{chord_label, ChordShape, DetectedChord, ProgressionPattern, ProgressionReport};
use owo_colors::OwoColorize;

/// Applies terminal styling when color is enabled, plain text otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().bright_cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn accent(&self, text: &str) -> String {
        if self.color {
            text.bright_green().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn warn(&self, text: &str) -> String {
        if self.color {
            text.bright_yellow().to_string()
        } else {
            text.to_string()
        }
    }

    /// One line per chord: symbol, label, function.
    pub fn chord_line(&self, chord: &DetectedChord) -> String {
        let function = chord
            .harmonic_function
            .map(|f| f.to_string())
            .unwrap_or_else(|| "non-diatonic".to_string());
        let label = chord_label(chord);

        let label = if chord.is_diatonic() {
            self.accent(&label)
        } else {
            self.warn(&label)
        };
        format!(
            "{:<8} {:<10} {}",
            chord.symbol(),
            label,
            self.dim(&function)
        )
    }

    pub fn report(&self, report: &ProgressionReport, display: &DisplayConfig) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{} {}", self.heading("Key:"), report.key);
        if report.chords.is_empty() {
            let _ = writeln!(out, "{}", self.dim("No chords detected"));
            return out;
        }
        let _ = writeln!(
            out,
            "{} {}",
            self.heading("Progression:"),
            report.progression
        );

        let top = report.top_matches(display.top_matches);
        if !top.is_empty() {
            let _ = writeln!(out, "\n{}", self.heading("Patterns"));
            for m in top {
                let _ = writeln!(
                    out,
                    "  {} {}% at beat {}  {}",
                    self.accent(m.pattern.display_name),
                    m.percent(),
                    m.start_beat,
                    self.dim(&m.pattern.degrees_text())
                );
                let _ = writeln!(out, "    {}", m.pattern.description);
            }
        }

        if !report.insights.is_empty() {
            let _ = writeln!(out, "\n{}", self.heading("Insights"));
            for insight in &report.insights {
                let _ = writeln!(out, "  • {}", insight);
            }
        }

        let _ = writeln!(out, "\n{}", self.heading("Chords"));
        for chord in report.chords.iter().take(display.max_listed_chords) {
            let _ = writeln!(out, "  beat {:<4} {}", chord.beat, self.chord_line(chord));
        }
        let hidden = report.chords.len().saturating_sub(display.max_listed_chords);
        if hidden > 0 {
            let _ = writeln!(out, "  {}", self.dim(&format!("... {} more", hidden)));
        }

        out
    }

    pub fn patterns(&self, patterns: &[ProgressionPattern]) -> String {
        let mut out = String::new();
        for pattern in patterns {
            let _ = writeln!(
                out,
                "{}  {}",
                self.accent(pattern.display_name),
                self.dim(&format!("({})", pattern.name))
            );
            let _ = writeln!(out, "  {}", pattern.degrees_text());
            let _ = writeln!(out, "  {}", pattern.description);
            if !pattern.examples.is_empty() {
                let _ = writeln!(out, "  e.g. {}", pattern.examples.join(", "));
            }
        }
        out
    }

    pub fn shapes(&self, shapes: &[ChordShape]) -> String {
        let mut out = String::new();
        for shape in shapes {
            let intervals: Vec<_> = shape.intervals.iter().map(|i| i.to_string()).collect();
            let _ = writeln!(
                out,
                "{:<6} {:<14} {:<12} {}",
                shape.name,
                shape.display_name,
                intervals.join(" "),
                self.dim(shape.description)
            );
        }
        out
    }
}
