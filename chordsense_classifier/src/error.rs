// Error type for the classifier crate.
//
// Wraps theory errors (bad degree tokens, bad notes, design violations) and
// adds the classifier's own failure modes: configuration that cannot be
// loaded or does not validate, and training labels the bank has no unit for.

use chordsense_theory::{ChordLabel, TheoryError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error(transparent)]
    Theory(#[from] TheoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Training label whose quality has no units in the bank.
    #[error("no classifier unit for chord {0}")]
    UnknownLabel(ChordLabel),
}
