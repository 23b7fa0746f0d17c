// Ranking of classifier output.
//
// Scores are sorted strictly descending. Ties keep a fixed order:
// tonic-major, then the bank's quality order (C major, C minor, ...,
// C♯ major, ...). The sort is stable over that order, so the same
// predictions always rank the same way.

use crate::bank::{PredictionEntry, Predictions};
use chordsense_theory::PITCH_CLASS_COUNT;

/// All entries, highest score first.
pub fn rank(predictions: &Predictions) -> Vec<PredictionEntry> {
    // Unit index is quality * 12 + tonic slot; reorder tonic-major first.
    let mut indexed: Vec<(usize, PredictionEntry)> =
        predictions.entries().iter().copied().enumerate().collect();
    indexed.sort_by_key(|&(i, _)| (i % PITCH_CLASS_COUNT, i / PITCH_CLASS_COUNT));

    let mut ranked: Vec<PredictionEntry> = indexed.into_iter().map(|(_, e)| e).collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// The first `n` ranked entries, or all of them if there are fewer.
pub fn top_n(predictions: &Predictions, n: usize) -> Vec<PredictionEntry> {
    let mut ranked = rank(predictions);
    ranked.truncate(n);
    ranked
}
