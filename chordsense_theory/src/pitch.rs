// Pitch classes, diatonic letters, accidentals, and spelled notes.
//
// `PitchClass` is the 1-based cyclic note identity used throughout the
// workspace (1 = C ... 12 = B). Every constructor normalizes into 1..=12, so
// downstream code never sees an out-of-range value.
//
// `Letter` and `Accidental` together form a `Spelling`: the written name of a
// note. The seven letters are anchored on the C-major (all naturals) scale,
// and each pitch class has one canonical spelling used for tonics. Chromatic
// pitch classes default to the sharped neighbor (C♯, D♯, F♯, G♯, A♯).
//
// See also: `degree.rs` for interval arithmetic on pitch classes and
// `spelling.rs` for spelling a degree above a tonic.

use crate::error::TheoryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of pitch classes in an octave.
pub const PITCH_CLASS_COUNT: usize = 12;

/// A note identity folded into one octave: 1 = C, 2 = C♯, ..., 12 = B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(1);
    pub const B: PitchClass = PitchClass(12);

    /// Strict constructor: accepts only 1..=12.
    pub fn new(value: u8) -> Result<Self, TheoryError> {
        if (1..=PITCH_CLASS_COUNT as u8).contains(&value) {
            Ok(PitchClass(value))
        } else {
            Err(TheoryError::InvalidPitchClass {
                input: value.to_string(),
            })
        }
    }

    /// Fold any raw note integer into 1..=12 via `((n - 1) mod 12) + 1`.
    /// Folds before offsetting, so the whole `i64` range is accepted.
    pub fn normalize(raw: i64) -> Self {
        let folded = raw.rem_euclid(PITCH_CLASS_COUNT as i64) as u8;
        PitchClass((folded + 11) % PITCH_CLASS_COUNT as u8 + 1)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 0-based slot index (C = 0, B = 11).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// All twelve pitch classes in ascending order, starting at C.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (1..=PITCH_CLASS_COUNT as u8).map(PitchClass)
    }

    /// Move by a signed number of half-steps, wrapping around the octave.
    pub fn transpose(self, half_steps: i64) -> Self {
        PitchClass::normalize(self.0 as i64 + half_steps.rem_euclid(PITCH_CLASS_COUNT as i64))
    }

    /// The fixed spelling used when this pitch class is a tonic.
    pub fn canonical_spelling(self) -> Spelling {
        let (letter, accidental) = CANONICAL_SPELLINGS[self.index()];
        Spelling { letter, accidental }
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = TheoryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PitchClass::new(value)
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses either a raw integer (normalized, so "13" is C) or a note name
/// ("C", "F#", "Eb", "B♭♭").
impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let looks_numeric = trimmed
            .strip_prefix('-')
            .unwrap_or(trimmed)
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());
        if looks_numeric {
            return trimmed
                .parse::<i64>()
                .map(PitchClass::normalize)
                .map_err(|_| TheoryError::InvalidPitchClass {
                    input: s.to_string(),
                });
        }
        trimmed.parse::<Spelling>().map(Spelling::pitch_class)
    }
}

/// Canonical tonic spellings indexed by 0-based slot.
const CANONICAL_SPELLINGS: [(Letter, Accidental); PITCH_CLASS_COUNT] = [
    (Letter::C, Accidental::Natural),
    (Letter::C, Accidental::Sharp),
    (Letter::D, Accidental::Natural),
    (Letter::D, Accidental::Sharp),
    (Letter::E, Accidental::Natural),
    (Letter::F, Accidental::Natural),
    (Letter::F, Accidental::Sharp),
    (Letter::G, Accidental::Natural),
    (Letter::G, Accidental::Sharp),
    (Letter::A, Accidental::Natural),
    (Letter::A, Accidental::Sharp),
    (Letter::B, Accidental::Natural),
];

// ---------------------------------------------------------------------------
// Letters
// ---------------------------------------------------------------------------

/// The seven diatonic letters in C-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C = 0,
    D = 1,
    E = 2,
    F = 3,
    G = 4,
    A = 5,
    B = 6,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Pitch class of the unaltered letter (C = 1, D = 3, E = 5, F = 6,
    /// G = 8, A = 10, B = 12).
    pub fn natural_pitch_class(self) -> PitchClass {
        match self {
            Letter::C => PitchClass(1),
            Letter::D => PitchClass(3),
            Letter::E => PitchClass(5),
            Letter::F => PitchClass(6),
            Letter::G => PitchClass(8),
            Letter::A => PitchClass(10),
            Letter::B => PitchClass(12),
        }
    }

    /// Step forward through C D E F G A B, wrapping after B.
    pub fn step(self, steps: usize) -> Letter {
        Letter::ALL[(self.index() + steps) % Letter::ALL.len()]
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Case-insensitive.
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Accidentals
// ---------------------------------------------------------------------------

/// Signed alteration of a letter, from triple flat to triple sharp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    TripleFlat = -3,
    DoubleFlat = -2,
    Flat = -1,
    Natural = 0,
    Sharp = 1,
    DoubleSharp = 2,
    TripleSharp = 3,
}

impl Accidental {
    /// Half-step offset from the natural letter.
    pub fn offset(self) -> i8 {
        self as i8
    }

    /// `None` outside -3..=3.
    pub fn from_offset(offset: i8) -> Option<Accidental> {
        match offset {
            -3 => Some(Accidental::TripleFlat),
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            3 => Some(Accidental::TripleSharp),
            _ => None,
        }
    }

    /// Display glyphs; the natural sign is omitted.
    pub fn glyph(self) -> &'static str {
        match self {
            Accidental::TripleFlat => "♭♭♭",
            Accidental::DoubleFlat => "♭♭",
            Accidental::Flat => "♭",
            Accidental::Natural => "",
            Accidental::Sharp => "♯",
            Accidental::DoubleSharp => "♯♯",
            Accidental::TripleSharp => "♯♯♯",
        }
    }

    /// ABC notation prefix. Naturals are written explicitly so a chord never
    /// inherits an accidental from a key signature.
    pub fn abc_prefix(self) -> &'static str {
        match self {
            Accidental::TripleFlat => "___",
            Accidental::DoubleFlat => "__",
            Accidental::Flat => "_",
            Accidental::Natural => "=",
            Accidental::Sharp => "^",
            Accidental::DoubleSharp => "^^",
            Accidental::TripleSharp => "^^^",
        }
    }

    /// LilyPond (Dutch) note-name suffix.
    pub fn lilypond_suffix(self) -> &'static str {
        match self {
            Accidental::TripleFlat => "eseses",
            Accidental::DoubleFlat => "eses",
            Accidental::Flat => "es",
            Accidental::Natural => "",
            Accidental::Sharp => "is",
            Accidental::DoubleSharp => "isis",
            Accidental::TripleSharp => "isisis",
        }
    }
}

// ---------------------------------------------------------------------------
// Spelled notes
// ---------------------------------------------------------------------------

/// A written note name: letter plus accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spelling {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Spelling {
    pub fn new(letter: Letter, accidental: Accidental) -> Self {
        Spelling { letter, accidental }
    }

    /// The pitch class this spelling sounds as.
    pub fn pitch_class(self) -> PitchClass {
        self.letter
            .natural_pitch_class()
            .transpose(self.accidental.offset() as i64)
    }
}

/// Readable form, e.g. "C", "F♯", "B♭♭".
impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.accidental.glyph())
    }
}

/// Accepts a letter followed by up to three sharps (`#`, `♯`) or flats
/// (`b`, `♭`), e.g. "F#", "eb", "Bbb".
impl FromStr for Spelling {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TheoryError::InvalidPitchClass {
            input: s.to_string(),
        };
        let mut chars = s.trim().chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(invalid)?;

        let mut offset: i8 = 0;
        let mut seen_sharp = false;
        let mut seen_flat = false;
        for c in chars {
            match c {
                '#' | '♯' => {
                    seen_sharp = true;
                    offset += 1;
                }
                'b' | '♭' => {
                    seen_flat = true;
                    offset -= 1;
                }
                _ => return Err(invalid()),
            }
            if seen_sharp && seen_flat {
                return Err(invalid());
            }
        }
        let accidental = Accidental::from_offset(offset).ok_or_else(invalid)?;
        Ok(Spelling { letter, accidental })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(PitchClass::normalize(1).get(), 1);
        assert_eq!(PitchClass::normalize(12).get(), 12);
        assert_eq!(PitchClass::normalize(13).get(), 1);
        assert_eq!(PitchClass::normalize(0).get(), 12);
        assert_eq!(PitchClass::normalize(-1).get(), 11);
        assert_eq!(PitchClass::normalize(61).get(), 1);
    }

    #[test]
    fn normalize_accepts_extreme_integers() {
        // -2^63 is 4 mod 12 and 2^63 - 1 is 7 mod 12.
        assert_eq!(PitchClass::normalize(i64::MIN).get(), 4);
        assert_eq!(PitchClass::normalize(i64::MAX).get(), 7);
        assert_eq!(PitchClass::C.transpose(i64::MAX).get(), 8);
        assert_eq!(PitchClass::B.transpose(i64::MIN).get(), 4);
        assert_eq!(i64::MIN.to_string().parse::<PitchClass>().unwrap().get(), 4);
    }

    #[test]
    fn strict_constructor_rejects_out_of_range() {
        assert!(PitchClass::new(0).is_err());
        assert!(PitchClass::new(13).is_err());
        assert_eq!(PitchClass::new(7).unwrap().get(), 7);
    }

    #[test]
    fn canonical_spellings_use_sharps() {
        let names: Vec<String> = PitchClass::all()
            .map(|pc| pc.canonical_spelling().to_string())
            .collect();
        assert_eq!(
            names,
            ["C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B"]
        );
    }

    #[test]
    fn canonical_spelling_sounds_as_its_pitch_class() {
        for pc in PitchClass::all() {
            assert_eq!(pc.canonical_spelling().pitch_class(), pc);
        }
    }

    #[test]
    fn letter_step_wraps() {
        assert_eq!(Letter::C.step(2), Letter::E);
        assert_eq!(Letter::A.step(2), Letter::C);
        assert_eq!(Letter::B.step(7), Letter::B);
    }

    #[test]
    fn parse_note_names() {
        assert_eq!("C".parse::<PitchClass>().unwrap().get(), 1);
        assert_eq!("f#".parse::<PitchClass>().unwrap().get(), 7);
        assert_eq!("Eb".parse::<PitchClass>().unwrap().get(), 4);
        assert_eq!("Cb".parse::<PitchClass>().unwrap().get(), 12);
        assert_eq!("B♯".parse::<PitchClass>().unwrap().get(), 1);
        assert_eq!("Bbb".parse::<PitchClass>().unwrap().get(), 10);
    }

    #[test]
    fn parse_raw_integers() {
        assert_eq!("5".parse::<PitchClass>().unwrap().get(), 5);
        assert_eq!("13".parse::<PitchClass>().unwrap().get(), 1);
        assert_eq!("-1".parse::<PitchClass>().unwrap().get(), 11);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            "H".parse::<PitchClass>(),
            Err(TheoryError::InvalidPitchClass { .. })
        ));
        assert!("C#b".parse::<PitchClass>().is_err());
        assert!("C####".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
        assert!("99999999999999999999999".parse::<PitchClass>().is_err());
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<PitchClass>("0").is_err());
        let pc: PitchClass = serde_json::from_str("12").unwrap();
        assert_eq!(pc, PitchClass::B);
    }
}
