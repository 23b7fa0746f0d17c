// Error type for the theory crate.
//
// Parse/InvalidQuality/InvalidPitchClass/UnknownChordQuality are caller
// mistakes and recoverable at the call boundary: a host skips or reports the
// offending input and carries on with the rest. DesignViolation means the
// resolver and speller disagreed about a note, which is a defect; hosts must
// surface it rather than clamp it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// Degree token without a degree number, with trailing garbage, or with a
    /// number that is zero or does not fit.
    #[error("malformed degree token {token:?}: expected an optional quality marker followed by a degree number")]
    Parse { token: String },

    /// Quality marker outside the table, or a perfect marker on a degree
    /// that has no perfect form.
    #[error("invalid interval quality {quality:?} in degree token {token:?}")]
    InvalidQuality { token: String, quality: String },

    /// Note that cannot be turned into a pitch class.
    #[error("invalid pitch class {input:?}")]
    InvalidPitchClass { input: String },

    #[error("unknown chord quality {suffix:?}")]
    UnknownChordQuality { suffix: String },

    #[error("chord quality {suffix:?} appears more than once in the template table")]
    DuplicateTemplate { suffix: String },

    #[error("chord template {suffix:?} has no degrees")]
    EmptyTemplate { suffix: String },

    /// The spelled letter lies more than three half-steps from the resolved
    /// pitch class.
    #[error(
        "design violation: degree {degree} above tonic {tonic} lands {distance} half-steps from letter {letter}"
    )]
    DesignViolation {
        tonic: u8,
        degree: String,
        letter: char,
        distance: i8,
    },
}
