// Host-facing chord guesser.
//
// `ChordGuesser` bundles a chord library with a bank trained on it. Hosts
// build one at startup (training is a short synchronous batch), then call
// `guess` whenever the set of played notes changes. Each guess carries the
// label, its score, and the spelled chord for the notation renderer.
//
// `self_check` replays every training template through the trained bank
// and reports whether each template's own unit ranks first. It is the
// diagnostic the CLI's `check` command prints.
//
// Not synchronized: a host that shares a guesser across threads must wrap
// each call in one lock.

use crate::bank::{ClassifierBank, PredictionEntry};
use crate::config::ClassifierConfig;
use crate::encoder::{NoteVector, encode};
use crate::error::{ClassifierError, Result};
use crate::ranker::{rank, top_n};
use crate::trainer::{TrainingReport, synthetic_examples, train};
use chordsense_theory::{ChordLabel, ChordLibrary, ChordSpelling};

/// How many guesses a host shows by default.
pub const DEFAULT_TOP_N: usize = 4;

/// One ranked guess, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordGuess {
    pub label: ChordLabel,
    pub score: f64,
    pub spelling: ChordSpelling,
}

/// Self-check result for one training template.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfCheckRow {
    pub expected: ChordLabel,
    /// The three highest-ranked labels for the template's own notes.
    pub top: Vec<PredictionEntry>,
}

impl SelfCheckRow {
    pub fn passed(&self) -> bool {
        self.top.first().is_some_and(|e| e.label == self.expected)
    }
}

pub struct ChordGuesser {
    library: ChordLibrary,
    bank: ClassifierBank,
    report: TrainingReport,
}

impl ChordGuesser {
    /// Validate `config`, build a zero bank for its templates, and train it.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let library = config.templates;
        let mut bank = ClassifierBank::for_library(&library, config.learning_rate);
        let report = train(&mut bank, &library, config.epochs)?;
        Ok(ChordGuesser {
            library,
            bank,
            report,
        })
    }

    pub fn library(&self) -> &ChordLibrary {
        &self.library
    }

    pub fn bank(&self) -> &ClassifierBank {
        &self.bank
    }

    pub fn training_report(&self) -> &TrainingReport {
        &self.report
    }

    /// Rank every label for raw note integers and return the best `n`.
    pub fn guess(&self, notes: &[i64], n: usize) -> Result<Vec<ChordGuess>> {
        self.guess_vector(&encode(notes), n)
    }

    /// Same as `guess`, for an already-encoded note set.
    pub fn guess_vector(&self, input: &NoteVector, n: usize) -> Result<Vec<ChordGuess>> {
        top_n(&self.bank.predict(input), n)
            .into_iter()
            .map(|entry| {
                Ok(ChordGuess {
                    label: entry.label,
                    score: entry.score,
                    spelling: self.spell(entry.label)?,
                })
            })
            .collect()
    }

    /// Spelled chord tones for a label in the library.
    pub fn spell(&self, label: ChordLabel) -> Result<ChordSpelling> {
        let template = self
            .library
            .get(label.quality)
            .ok_or(ClassifierError::UnknownLabel(label))?;
        Ok(ChordSpelling::new(label.tonic, template)?)
    }

    /// Rank each template's own notes and report the top three labels.
    pub fn self_check(&self) -> Vec<SelfCheckRow> {
        synthetic_examples(&self.library)
            .into_iter()
            .map(|example| {
                let mut top = rank(&self.bank.predict(&example.input));
                top.truncate(3);
                SelfCheckRow {
                    expected: example.label,
                    top,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordsense_theory::{ChordQuality, PitchClass};

    #[test]
    fn guess_c_major_triad() {
        let guesser = ChordGuesser::new(ClassifierConfig::default()).unwrap();
        let guesses = guesser.guess(&[1, 5, 8], DEFAULT_TOP_N).unwrap();
        assert_eq!(guesses.len(), 4);
        assert_eq!(guesses[0].label, ChordLabel::new(PitchClass::C, ChordQuality::Major));
        assert_eq!(guesses[0].spelling.note_names(), ["C", "E", "G"]);
        assert_eq!(guesses[0].spelling.name, "C");
    }

    #[test]
    fn guess_ignores_octaves() {
        let guesser = ChordGuesser::new(ClassifierConfig::default()).unwrap();
        let low = guesser.guess(&[1, 4, 8], 1).unwrap();
        let high = guesser.guess(&[25, 16, 20, 1], 1).unwrap();
        assert_eq!(low, high);
        assert_eq!(low[0].spelling.name, "Cm");
    }

    #[test]
    fn invalid_config_is_rejected_before_training() {
        let config = ClassifierConfig {
            epochs: 0,
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            ChordGuesser::new(config),
            Err(ClassifierError::InvalidConfig(_))
        ));
    }

    #[test]
    fn spell_unknown_quality_fails() {
        let guesser = ChordGuesser::new(ClassifierConfig {
            epochs: 1,
            ..ClassifierConfig::default()
        })
        .unwrap();
        let label = ChordLabel::new(PitchClass::C, ChordQuality::Sus2);
        assert!(matches!(guesser.spell(label), Err(ClassifierError::UnknownLabel(_))));
    }

    #[test]
    fn self_check_passes_for_default_regimen() {
        let guesser = ChordGuesser::new(ClassifierConfig::default()).unwrap();
        let rows = guesser.self_check();
        assert_eq!(rows.len(), 60);
        assert!(rows.iter().all(SelfCheckRow::passed));
        assert!(rows.iter().all(|r| r.top.len() == 3));
    }
}
