// Note-set encoder: played notes to a fixed-width presence vector.
//
// Slot i (0-based) is 1.0 when pitch class i + 1 is present, else 0.0.
// Octave, order, and duplicates are all discarded, so [1, 13, 5, 5] and
// [5, 1] encode identically. The classifier consumes the slots as f64 so
// the training update can multiply by them directly.

use chordsense_theory::{ChordTemplate, PITCH_CLASS_COUNT, PitchClass};

/// Fixed-width presence vector, one slot per pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoteVector {
    slots: [f64; PITCH_CLASS_COUNT],
}

impl NoteVector {
    /// All slots empty.
    pub fn empty() -> Self {
        NoteVector::default()
    }

    pub fn from_pitch_classes<I>(pitch_classes: I) -> Self
    where
        I: IntoIterator<Item = PitchClass>,
    {
        let mut vector = NoteVector::empty();
        for pc in pitch_classes {
            vector.insert(pc);
        }
        vector
    }

    pub fn insert(&mut self, pc: PitchClass) {
        self.slots[pc.index()] = 1.0;
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.slots[pc.index()] != 0.0
    }

    pub fn slots(&self) -> &[f64; PITCH_CLASS_COUNT] {
        &self.slots
    }

    /// Number of set slots.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|&&s| s != 0.0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Present pitch classes in ascending order.
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        PitchClass::all().filter(|&pc| self.contains(pc)).collect()
    }

    pub fn dot(&self, weights: &[f64; PITCH_CLASS_COUNT]) -> f64 {
        self.slots.iter().zip(weights).map(|(x, w)| x * w).sum()
    }
}

/// Encode raw note integers; each is folded into 1..=12 first.
pub fn encode(notes: &[i64]) -> NoteVector {
    NoteVector::from_pitch_classes(notes.iter().map(|&n| PitchClass::normalize(n)))
}

/// Encode a chord template built on `tonic`.
pub fn encode_template(template: &ChordTemplate, tonic: PitchClass) -> NoteVector {
    NoteVector::from_pitch_classes(template.pitch_classes(tonic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordsense_theory::{ChordLibrary, ChordQuality};

    #[test]
    fn empty_input_is_all_zero() {
        let v = encode(&[]);
        assert_eq!(v.slots(), &[0.0; PITCH_CLASS_COUNT]);
        assert!(v.is_empty());
    }

    #[test]
    fn duplicates_and_octaves_collapse() {
        let v = encode(&[1, 13, 5, 5, 25, 8]);
        assert_eq!(v.count(), 3);
        assert_eq!(v, encode(&[8, 5, 1]));
        let set: Vec<u8> = v.pitch_classes().into_iter().map(PitchClass::get).collect();
        assert_eq!(set, [1, 5, 8]);
    }

    #[test]
    fn out_of_range_integers_are_normalized() {
        let v = encode(&[0, -11]);
        assert!(v.contains(PitchClass::B));
        assert!(v.contains(PitchClass::C));
        assert_eq!(v.count(), 2);
    }

    #[test]
    fn extreme_integers_encode_without_overflow() {
        let v = encode(&[i64::MIN, i64::MAX]);
        assert_eq!(v.count(), 2);
        assert!(v.contains(PitchClass::new(4).unwrap()));
        assert!(v.contains(PitchClass::new(7).unwrap()));
    }

    #[test]
    fn template_encoding_counts_each_degree() {
        let lib = ChordLibrary::basic();
        for template in lib.templates() {
            for tonic in PitchClass::all() {
                let v = encode_template(template, tonic);
                assert_eq!(v.count(), template.degrees.len());
            }
        }
    }

    #[test]
    fn template_encoding_collapses_octave_degree() {
        let template = chordsense_theory::ChordTemplate::new(
            ChordQuality::Major,
            ["1", "+3", "5", "8"].iter().map(|d| d.parse().unwrap()).collect(),
        )
        .unwrap();
        assert_eq!(encode_template(&template, PitchClass::C).count(), 3);
    }

    #[test]
    fn dot_sums_present_weights() {
        let v = encode(&[1, 5]);
        let mut w = [0.0; PITCH_CLASS_COUNT];
        w[0] = 0.5;
        w[4] = -0.25;
        w[7] = 10.0;
        assert_eq!(v.dot(&w), 0.25);
    }
}
