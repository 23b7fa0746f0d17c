// Classifier bank: one independent logistic unit per (quality, tonic) pair.
//
// Each unit holds twelve weights (no bias) and outputs
// `sigmoid(dot(weights, input))`. Units never interact: prediction is not a
// softmax, and scores need not sum to one.
//
// Training is online gradient descent on per-unit log-loss. Every example
// updates every unit: the unit whose label matches gets pulled toward 1,
// all the others get pushed toward 0. That is the only source of negative
// examples, so skipping non-matching units would break the classifier.
//
// Unit layout is fixed when the bank is built from an ordered quality list:
// `index(tonic, quality) = quality_position * 12 + (tonic - 1)`. The bank
// exclusively owns its units; nothing else writes weights.
//
// See also: `trainer.rs` for the epoch loop over synthetic templates and
// `ranker.rs` for ordering predictions.

use crate::encoder::NoteVector;
use crate::error::{ClassifierError, Result};
use chordsense_theory::{ChordLabel, ChordLibrary, ChordQuality, PITCH_CLASS_COUNT, PitchClass};
use serde::{Deserialize, Serialize};

/// Step size for the gradient update.
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// One binary classifier for a single (tonic, quality) label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierUnit {
    label: ChordLabel,
    weights: [f64; PITCH_CLASS_COUNT],
}

impl ClassifierUnit {
    fn new(label: ChordLabel) -> Self {
        ClassifierUnit {
            label,
            weights: [0.0; PITCH_CLASS_COUNT],
        }
    }

    pub fn label(&self) -> ChordLabel {
        self.label
    }

    pub fn weights(&self) -> &[f64; PITCH_CLASS_COUNT] {
        &self.weights
    }

    /// Forward pass.
    pub fn activation(&self, input: &NoteVector) -> f64 {
        sigmoid(input.dot(&self.weights))
    }

    /// `w[i] -= rate * (p - y) * x[i]`.
    fn descend(&mut self, input: &NoteVector, prediction: f64, target: f64, rate: f64) {
        let error = prediction - target;
        for (w, x) in self.weights.iter_mut().zip(input.slots()) {
            *w -= rate * error * x;
        }
    }
}

/// A score for one label, produced per inference call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionEntry {
    pub label: ChordLabel,
    pub score: f64,
}

/// Every unit's score for one input, in unit-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    entries: Vec<PredictionEntry>,
}

impl Predictions {
    pub fn entries(&self) -> &[PredictionEntry] {
        &self.entries
    }

    pub fn score(&self, label: ChordLabel) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full set of units, plus the learning rate used to train them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierBank {
    qualities: Vec<ChordQuality>,
    units: Vec<ClassifierUnit>,
    learning_rate: f64,
}

impl ClassifierBank {
    /// A bank of all-zero units: twelve per quality, quality-major.
    pub fn new(qualities: Vec<ChordQuality>, learning_rate: f64) -> Self {
        let units = qualities
            .iter()
            .flat_map(|&quality| {
                PitchClass::all().map(move |tonic| ClassifierUnit::new(ChordLabel::new(tonic, quality)))
            })
            .collect();
        ClassifierBank {
            qualities,
            units,
            learning_rate,
        }
    }

    /// A bank laid out in the library's quality order.
    pub fn for_library(library: &ChordLibrary, learning_rate: f64) -> Self {
        ClassifierBank::new(library.qualities(), learning_rate)
    }

    pub fn qualities(&self) -> &[ChordQuality] {
        &self.qualities
    }

    pub fn units(&self) -> &[ClassifierUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Flat unit index for a label, or `None` if its quality is not in the bank.
    pub fn index(&self, label: ChordLabel) -> Option<usize> {
        let position = self.qualities.iter().position(|&q| q == label.quality)?;
        Some(position * PITCH_CLASS_COUNT + label.tonic.index())
    }

    /// One gradient step on every unit for a single labeled example.
    pub fn train_one(&mut self, input: &NoteVector, expected: ChordLabel) -> Result<()> {
        let target_index = self
            .index(expected)
            .ok_or(ClassifierError::UnknownLabel(expected))?;
        let rate = self.learning_rate;
        for (i, unit) in self.units.iter_mut().enumerate() {
            let prediction = unit.activation(input);
            let target = if i == target_index { 1.0 } else { 0.0 };
            unit.descend(input, prediction, target, rate);
        }
        Ok(())
    }

    /// Forward pass of every unit. Does not modify the bank.
    pub fn predict(&self, input: &NoteVector) -> Predictions {
        Predictions {
            entries: self
                .units
                .iter()
                .map(|unit| PredictionEntry {
                    label: unit.label,
                    score: unit.activation(input),
                })
                .collect(),
        }
    }
}
