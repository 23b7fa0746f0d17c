// Training regimen over synthetic chord templates.
//
// The training set is every (tonic, quality) pair of the chord library,
// encoded through the degree resolver and the note-set encoder. One epoch
// presents each example once, tonic-major then library order; the default
// regimen runs 100 epochs at learning rate 0.05. The order is fixed and
// there is no shuffling, so a given library and config always produce the
// same weights.

use crate::bank::ClassifierBank;
use crate::encoder::{NoteVector, encode_template};
use crate::error::Result;
use chordsense_theory::{ChordLabel, ChordLibrary};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_EPOCHS: u32 = 100;

/// One synthetic example: a template's encoded notes and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub label: ChordLabel,
    pub input: NoteVector,
}

/// Every template of the library on every tonic, in training order.
pub fn synthetic_examples(library: &ChordLibrary) -> Vec<TrainingExample> {
    library
        .labels()
        .filter_map(|label| {
            library.get(label.quality).map(|template| TrainingExample {
                label,
                input: encode_template(template, label.tonic),
            })
        })
        .collect()
}

/// Summary of a completed training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub epochs: u32,
    pub examples_per_epoch: usize,
    pub elapsed: Duration,
}

/// Run `epochs` passes over the library's synthetic examples.
pub fn train(bank: &mut ClassifierBank, library: &ChordLibrary, epochs: u32) -> Result<TrainingReport> {
    let examples = synthetic_examples(library);
    let start = Instant::now();

    for epoch in 1..=epochs {
        for example in &examples {
            bank.train_one(&example.input, example.label)?;
        }
        debug!(epoch, "training epoch complete");
    }

    let report = TrainingReport {
        epochs,
        examples_per_epoch: examples.len(),
        elapsed: start.elapsed(),
    };
    info!(
        epochs = report.epochs,
        examples = report.examples_per_epoch,
        units = bank.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "training complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::DEFAULT_LEARNING_RATE;
    use chordsense_theory::{ChordQuality, PitchClass};

    #[test]
    fn examples_cover_every_label_in_order() {
        let lib = ChordLibrary::basic();
        let examples = synthetic_examples(&lib);
        assert_eq!(examples.len(), 60);
        assert_eq!(examples[0].label, ChordLabel::new(PitchClass::C, ChordQuality::Major));
        assert_eq!(examples[4].label, ChordLabel::new(PitchClass::C, ChordQuality::Minor7));
        assert_eq!(examples[4].input.count(), 4);
        assert_eq!(examples[59].label, ChordLabel::new(PitchClass::B, ChordQuality::Minor7));
    }

    #[test]
    fn zero_epochs_leaves_bank_untouched() {
        let lib = ChordLibrary::basic();
        let mut bank = ClassifierBank::for_library(&lib, DEFAULT_LEARNING_RATE);
        let report = train(&mut bank, &lib, 0).unwrap();
        assert_eq!(report.epochs, 0);
        assert_eq!(bank, ClassifierBank::for_library(&lib, DEFAULT_LEARNING_RATE));
    }

    #[test]
    fn training_is_deterministic() {
        let lib = ChordLibrary::basic();
        let mut a = ClassifierBank::for_library(&lib, DEFAULT_LEARNING_RATE);
        let mut b = ClassifierBank::for_library(&lib, DEFAULT_LEARNING_RATE);
        train(&mut a, &lib, 5).unwrap();
        train(&mut b, &lib, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bank_missing_a_quality_fails() {
        let lib = ChordLibrary::basic();
        let mut bank = ClassifierBank::new(vec![ChordQuality::Major], DEFAULT_LEARNING_RATE);
        assert!(train(&mut bank, &lib, 1).is_err());
    }
}
