// chordsense_theory — music-theory primitives for the chord guesser.
//
// Turns abstract interval notation ("+3" = major third, "-7" = minor
// seventh, "5" = perfect fifth) into concrete pitch classes and into
// correctly-spelled note names. Everything here is pure, deterministic, and
// allocation-light; the classifier crate (`chordsense_classifier`) builds
// its synthetic training data on top of it.
//
// Module overview:
// - `pitch.rs`:    `PitchClass` (1-based, cyclic 1..=12), `Letter`,
//                  `Accidental`, `Spelling`, and the canonical spelling table.
// - `degree.rs`:   `DegreeToken` parsing and the degree resolver.
// - `spelling.rs`: the note speller (letter from the diatonic step,
//                  accidental from the half-step distance).
// - `chord.rs`:    `ChordQuality`, `ChordTemplate`, `ChordLibrary`, `ChordLabel`.
// - `notation.rs`: text handed to notation renderers (readable chord names,
//                  ABC and LilyPond chord strings).
// - `error.rs`:    `TheoryError`.
//
// Pitch class convention: 1 = C, 2 = C♯, ..., 12 = B. Raw integers fold into
// that range with `((n - 1) mod 12) + 1`, so 13 is C again and 0 is B.

pub mod chord;
pub mod degree;
pub mod error;
pub mod notation;
pub mod pitch;
pub mod spelling;

pub use chord::{ChordLabel, ChordLibrary, ChordQuality, ChordTemplate};
pub use degree::{DegreeToken, Quality, matches_degree, resolve};
pub use error::TheoryError;
pub use notation::{
    ChordSpelling, abc_chord, chords_to_lilypond, lilypond_chord, readable_chord_name,
    write_lilypond,
};
pub use pitch::{Accidental, Letter, PITCH_CLASS_COUNT, PitchClass, Spelling};
pub use spelling::{half_step_distance, spell};
