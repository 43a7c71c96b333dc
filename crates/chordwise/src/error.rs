use thiserror::Error;

/// Errors raised while building analysis inputs.
///
/// The analysis itself never fails; unclassifiable input resolves to
/// `None` or an empty result instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TheoryError {
    #[error("pitch {0} is outside the MIDI range 0-127")]
    PitchOutOfRange(u32),

    #[error("note start {0} must be a finite beat position >= 0")]
    InvalidStart(f64),

    #[error("note duration {0} must be a finite number of beats > 0")]
    InvalidDuration(f64),

    #[error("note ends at beat {0}, past the last addressable beat")]
    BeyondLastBeat(f64),

    #[error("unrecognized key: {0:?}")]
    UnknownKey(String),

    #[error("unrecognized pitch name: {0:?}")]
    UnknownPitchName(String),
}
