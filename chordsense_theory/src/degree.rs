// Degree tokens and the degree resolver.
//
// A degree token names an interval above a tonic with a compact notation:
// an optional quality marker followed by a diatonic degree number.
//
//   (omitted) / "=" perfect     "+"  major      "-"  minor
//   "++"  augmented             "--" diminished
//   "+++" doubly augmented      "---" doubly diminished
//
// so "-3" is a minor third, "+7" a major seventh, and "5" or "=5" a perfect
// fifth. The markers are really signed half-step deltas applied to a single
// base table (1:0, 2:2, 3:4, 4:5, 5:7, 6:9, 7:11). On imperfect degrees
// (2, 3, 6, 7) the base entry is already the major interval, so a positive
// delta is reduced by one before use: "+3" stays at 4 half-steps and "++3"
// becomes 5. On perfect degrees (1, 4, 5) "+" means one half-step up.
//
// Tokens are validated when parsed; resolution itself cannot fail.

use crate::error::TheoryError;
use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Half-steps above the tonic for diatonic degrees 1..=7 (index 0 = unison).
const BASE_HALF_STEPS: [i64; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Interval quality marker. The names follow the usual reading of each
/// marker on an imperfect degree; on perfect degrees "+" reads as augmented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    Perfect,
    Major,
    Minor,
    Augmented,
    Diminished,
    DoublyAugmented,
    DoublyDiminished,
}

impl Quality {
    /// Canonical marker. `Perfect` is written without a marker.
    pub fn symbol(self) -> &'static str {
        match self {
            Quality::Perfect => "",
            Quality::Major => "+",
            Quality::Minor => "-",
            Quality::Augmented => "++",
            Quality::Diminished => "--",
            Quality::DoublyAugmented => "+++",
            Quality::DoublyDiminished => "---",
        }
    }

    /// Signed half-step delta before the imperfect-degree adjustment.
    pub fn delta(self) -> i8 {
        match self {
            Quality::Perfect => 0,
            Quality::Major => 1,
            Quality::Augmented => 2,
            Quality::DoublyAugmented => 3,
            Quality::Minor => -1,
            Quality::Diminished => -2,
            Quality::DoublyDiminished => -3,
        }
    }

    fn from_symbol(symbol: &str) -> Option<Quality> {
        match symbol {
            "" | "=" => Some(Quality::Perfect),
            "+" => Some(Quality::Major),
            "++" => Some(Quality::Augmented),
            "+++" => Some(Quality::DoublyAugmented),
            "-" => Some(Quality::Minor),
            "--" => Some(Quality::Diminished),
            "---" => Some(Quality::DoublyDiminished),
            _ => None,
        }
    }
}

/// An interval above a tonic: quality marker plus degree number
/// (1 = unison, 8 = octave, unbounded above for compound intervals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DegreeToken {
    quality: Quality,
    number: u32,
}

impl DegreeToken {
    /// Build a token directly. `Perfect` on an imperfect degree is allowed
    /// here and means "no marker", i.e. the base table entry.
    pub fn new(quality: Quality, number: u32) -> Result<Self, TheoryError> {
        if number == 0 {
            return Err(TheoryError::Parse {
                token: format!("{}{}", quality.symbol(), number),
            });
        }
        Ok(DegreeToken { quality, number })
    }

    /// Unchecked constructor for built-in tables. `number` must be nonzero.
    pub(crate) const fn from_parts(quality: Quality, number: u32) -> Self {
        DegreeToken { quality, number }
    }

    pub fn quality(self) -> Quality {
        self.quality
    }

    pub fn number(self) -> u32 {
        self.number
    }

    /// Degree folded into 1..=7.
    pub fn diatonic_number(self) -> u8 {
        ((self.number - 1) % 7 + 1) as u8
    }

    /// Octaves added on top of the folded degree for compound intervals.
    pub fn octave_count(self) -> u32 {
        (self.number - 1) / 8
    }

    /// Unison, fourth, fifth (and their octave equivalents).
    pub fn is_perfect_degree(self) -> bool {
        is_perfect(self.diatonic_number())
    }

    /// Quality delta after the imperfect-degree adjustment.
    pub fn adjusted_delta(self) -> i8 {
        let delta = self.quality.delta();
        if !self.is_perfect_degree() && delta > 0 {
            delta - 1
        } else {
            delta
        }
    }

    /// Total half-steps above the tonic.
    pub fn half_steps(self) -> i64 {
        BASE_HALF_STEPS[self.diatonic_number() as usize - 1]
            + 12 * self.octave_count() as i64
            + self.adjusted_delta() as i64
    }

    /// Pitch class this degree lands on above `tonic`.
    pub fn resolve(self, tonic: PitchClass) -> PitchClass {
        tonic.transpose(self.half_steps())
    }
}

fn is_perfect(diatonic_number: u8) -> bool {
    matches!(diatonic_number, 1 | 4 | 5 | 8)
}

/// Resolve a degree above a tonic into a pitch class.
pub fn resolve(tonic: PitchClass, degree: DegreeToken) -> PitchClass {
    degree.resolve(tonic)
}

/// Whether a raw note sounds as the given degree above `tonic`.
pub fn matches_degree(note: i64, tonic: PitchClass, degree: DegreeToken) -> bool {
    PitchClass::normalize(note) == degree.resolve(tonic)
}

impl FromStr for DegreeToken {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let parse_error = || TheoryError::Parse {
            token: s.to_string(),
        };

        let split = token
            .find(|c: char| !matches!(c, '=' | '+' | '-'))
            .unwrap_or(token.len());
        let (symbol, digits) = token.split_at(split);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(parse_error());
        }
        let number: u32 = digits.parse().map_err(|_| parse_error())?;
        if number == 0 {
            return Err(parse_error());
        }

        let quality = Quality::from_symbol(symbol).ok_or_else(|| TheoryError::InvalidQuality {
            token: s.to_string(),
            quality: symbol.to_string(),
        })?;

        // An explicit perfect marker only makes sense where a perfect
        // interval exists.
        let diatonic = ((number - 1) % 7 + 1) as u8;
        if symbol == "=" && !is_perfect(diatonic) {
            return Err(TheoryError::InvalidQuality {
                token: s.to_string(),
                quality: symbol.to_string(),
            });
        }

        Ok(DegreeToken { quality, number })
    }
}

impl TryFrom<String> for DegreeToken {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DegreeToken> for String {
    fn from(token: DegreeToken) -> String {
        token.to_string()
    }
}

impl fmt::Display for DegreeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quality.symbol(), self.number)
    }
}
