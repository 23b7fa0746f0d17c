// Note speller: diatonically correct names for degrees above a tonic.
//
// The letter comes from counting degree steps through C D E F G A B starting
// at the tonic's own letter; the accidental is whatever reconciles that
// letter's natural pitch class with the pitch class the degree resolver
// produces. A perfect fifth above F♯ is therefore C♯, never D♭, and a minor
// third above C is E♭, never D♯.
//
// Tonics are spelled with `PitchClass::canonical_spelling`, so the speller's
// output for a given (tonic, degree) pair is fixed.

use crate::degree::DegreeToken;
use crate::error::TheoryError;
use crate::pitch::{Accidental, PitchClass, Spelling};

/// Signed half-step distance from `from` to `to`, folded into the
/// representative closest to zero for distances of magnitude up to 3.
/// Larger gaps come back outside -3..=3 and are rejected by `spell`.
pub fn half_step_distance(from: PitchClass, to: PitchClass) -> i8 {
    let k = to.get() as i8 - from.get() as i8;
    if k > 3 {
        k - 12
    } else if k >= -3 {
        k
    } else {
        k + 12
    }
}

/// Spell `degree` above `tonic`.
///
/// Returns `DesignViolation` when the chosen letter is more than three
/// half-steps from the resolved note, which no chord template produces.
pub fn spell(tonic: PitchClass, degree: DegreeToken) -> Result<Spelling, TheoryError> {
    let tonic_letter = tonic.canonical_spelling().letter;
    let letter = tonic_letter.step(degree.diatonic_number() as usize - 1);

    let actual = degree.resolve(tonic);
    let expected = letter.natural_pitch_class();
    let distance = half_step_distance(expected, actual);

    let accidental =
        Accidental::from_offset(distance).ok_or_else(|| TheoryError::DesignViolation {
            tonic: tonic.get(),
            degree: degree.to_string(),
            letter: letter.as_char(),
            distance,
        })?;
    Ok(Spelling::new(letter, accidental))
}
