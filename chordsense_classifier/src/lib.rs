// chordsense_classifier — guesses which chord a set of played notes is.
//
// A bank of independent one-vs-rest logistic units, one per (chord quality,
// tonic) pair, is trained by online gradient descent on synthetic chord
// templates generated from `chordsense_theory`. At inference time a played
// note set is encoded into a 12-slot presence vector, every unit scores it,
// and the scores are ranked.
//
// Architecture:
// - encoder.rs: note-set encoder (raw notes -> `NoteVector`)
// - bank.rs:    `ClassifierBank` / `ClassifierUnit`, train-one and predict
// - trainer.rs: synthetic examples and the fixed-order epoch loop
// - ranker.rs:  descending ranking with a deterministic tie order, top-n
// - config.rs:  `ClassifierConfig` (learning rate, epochs, template table)
// - guesser.rs: `ChordGuesser`, the facade hosts use
// - error.rs:   `ClassifierError`
// - main.rs:    the `chordsense` command-line host
//
// Everything runs synchronously on the caller's thread. Training the default
// bank (60 units, 100 epochs) takes a few milliseconds; a prediction is one
// pass of 60 dot products.

pub mod bank;
pub mod config;
pub mod encoder;
pub mod error;
pub mod guesser;
pub mod ranker;
pub mod trainer;

pub use bank::{ClassifierBank, ClassifierUnit, DEFAULT_LEARNING_RATE, PredictionEntry, Predictions};
pub use chordsense_theory::matches_degree;
pub use config::ClassifierConfig;
pub use encoder::{NoteVector, encode, encode_template};
pub use error::{ClassifierError, Result};
pub use guesser::{ChordGuess, ChordGuesser, DEFAULT_TOP_N, SelfCheckRow};
pub use ranker::{rank, top_n};
pub use trainer::{DEFAULT_EPOCHS, TrainingReport, train};
