// Chord qualities, chord templates, and the template library.
//
// A chord template is the root-position tone skeleton of a chord quality,
// written as degree tokens above the root (minor triad = 1, -3, 5). The
// library is an ordered table of templates: its order fixes the quality
// index used by the classifier bank's unit layout, and the degree order
// inside a template is the display order of the chord tones. The encoder
// ignores degree order.
//
// The default library holds the five basic qualities (major, minor,
// dominant seventh, major seventh, minor seventh). Further qualities are
// enumerated in `ChordQuality` and can be switched on from configuration
// without touching the resolver or the classifier.

use crate::degree::{DegreeToken, Quality};
use crate::error::TheoryError;
use crate::pitch::{PitchClass, Spelling};
use crate::spelling::spell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chord quality, identified in text and configuration by its chord-symbol
/// suffix ("" for a plain major triad).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChordQuality {
    Major,
    Minor,
    Dominant7,
    Major7,
    Minor7,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    HalfDiminished7,
    Diminished7,
    Major6,
    Minor6,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 13] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::HalfDiminished7,
        ChordQuality::Diminished7,
        ChordQuality::Major6,
        ChordQuality::Minor6,
    ];

    /// The five qualities in the default library, in library order.
    pub const BASIC: [ChordQuality; 5] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::Major6 => "6",
            ChordQuality::Minor6 => "m6",
        }
    }

    /// Standard root-position degrees for this quality.
    pub fn standard_degrees(self) -> Vec<DegreeToken> {
        use Quality::*;
        let spec: &[(Quality, u32)] = match self {
            ChordQuality::Major => &[(Perfect, 1), (Major, 3), (Perfect, 5)],
            ChordQuality::Minor => &[(Perfect, 1), (Minor, 3), (Perfect, 5)],
            ChordQuality::Dominant7 => &[(Perfect, 1), (Major, 3), (Perfect, 5), (Minor, 7)],
            ChordQuality::Major7 => &[(Perfect, 1), (Major, 3), (Perfect, 5), (Major, 7)],
            ChordQuality::Minor7 => &[(Perfect, 1), (Minor, 3), (Perfect, 5), (Minor, 7)],
            ChordQuality::Diminished => &[(Perfect, 1), (Minor, 3), (Minor, 5)],
            ChordQuality::Augmented => &[(Perfect, 1), (Major, 3), (Major, 5)],
            ChordQuality::Sus2 => &[(Perfect, 1), (Major, 2), (Perfect, 5)],
            ChordQuality::Sus4 => &[(Perfect, 1), (Perfect, 4), (Perfect, 5)],
            ChordQuality::HalfDiminished7 => &[(Perfect, 1), (Minor, 3), (Minor, 5), (Minor, 7)],
            ChordQuality::Diminished7 => &[(Perfect, 1), (Minor, 3), (Minor, 5), (Diminished, 7)],
            ChordQuality::Major6 => &[(Perfect, 1), (Major, 3), (Perfect, 5), (Major, 6)],
            ChordQuality::Minor6 => &[(Perfect, 1), (Minor, 3), (Perfect, 5), (Major, 6)],
        };
        spec.iter()
            .map(|&(quality, number)| DegreeToken::from_parts(quality, number))
            .collect()
    }
}

impl FromStr for ChordQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChordQuality::ALL
            .into_iter()
            .find(|q| q.suffix() == s)
            .ok_or_else(|| TheoryError::UnknownChordQuality {
                suffix: s.to_string(),
            })
    }
}

impl TryFrom<String> for ChordQuality {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChordQuality> for String {
    fn from(quality: ChordQuality) -> String {
        quality.suffix().to_string()
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// One library entry. In JSON the degree list may be omitted, in which case
/// the quality's standard degrees are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TemplateEntry")]
pub struct ChordTemplate {
    pub quality: ChordQuality,
    pub degrees: Vec<DegreeToken>,
}

#[derive(Deserialize)]
struct TemplateEntry {
    quality: ChordQuality,
    #[serde(default)]
    degrees: Option<Vec<DegreeToken>>,
}

impl TryFrom<TemplateEntry> for ChordTemplate {
    type Error = TheoryError;

    fn try_from(entry: TemplateEntry) -> Result<Self, Self::Error> {
        match entry.degrees {
            Some(degrees) => ChordTemplate::new(entry.quality, degrees),
            None => Ok(ChordTemplate::standard(entry.quality)),
        }
    }
}

impl ChordTemplate {
    pub fn new(quality: ChordQuality, degrees: Vec<DegreeToken>) -> Result<Self, TheoryError> {
        if degrees.is_empty() {
            return Err(TheoryError::EmptyTemplate {
                suffix: quality.suffix().to_string(),
            });
        }
        Ok(ChordTemplate { quality, degrees })
    }

    pub fn standard(quality: ChordQuality) -> Self {
        ChordTemplate {
            quality,
            degrees: quality.standard_degrees(),
        }
    }

    /// Chord tones above `tonic` in template order. Degrees that land on the
    /// same pitch class are kept, not collapsed.
    pub fn pitch_classes(&self, tonic: PitchClass) -> Vec<PitchClass> {
        self.degrees.iter().map(|d| d.resolve(tonic)).collect()
    }

    /// Spelled chord tones above `tonic` in template order.
    pub fn spell(&self, tonic: PitchClass) -> Result<Vec<Spelling>, TheoryError> {
        self.degrees.iter().map(|&d| spell(tonic, d)).collect()
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// A (tonic, quality) pair: one classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordLabel {
    pub tonic: PitchClass,
    pub quality: ChordQuality,
}

impl ChordLabel {
    pub fn new(tonic: PitchClass, quality: ChordQuality) -> Self {
        ChordLabel { tonic, quality }
    }
}

/// Canonical tonic spelling plus suffix, e.g. "C♯m7".
impl fmt::Display for ChordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tonic.canonical_spelling(), self.quality.suffix())
    }
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// Ordered, duplicate-free table of chord templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChordTemplate>", into = "Vec<ChordTemplate>")]
pub struct ChordLibrary {
    templates: Vec<ChordTemplate>,
}

impl ChordLibrary {
    pub fn new(templates: Vec<ChordTemplate>) -> Result<Self, TheoryError> {
        for (i, template) in templates.iter().enumerate() {
            if template.degrees.is_empty() {
                return Err(TheoryError::EmptyTemplate {
                    suffix: template.quality.suffix().to_string(),
                });
            }
            if templates[..i].iter().any(|t| t.quality == template.quality) {
                return Err(TheoryError::DuplicateTemplate {
                    suffix: template.quality.suffix().to_string(),
                });
            }
        }
        Ok(ChordLibrary { templates })
    }

    /// Major, minor, dominant seventh, major seventh, minor seventh.
    pub fn basic() -> Self {
        ChordLibrary {
            templates: ChordQuality::BASIC
                .into_iter()
                .map(ChordTemplate::standard)
                .collect(),
        }
    }

    /// Every quality in `ChordQuality::ALL` with its standard degrees.
    pub fn extended() -> Self {
        ChordLibrary {
            templates: ChordQuality::ALL
                .into_iter()
                .map(ChordTemplate::standard)
                .collect(),
        }
    }

    pub fn templates(&self) -> &[ChordTemplate] {
        &self.templates
    }

    pub fn qualities(&self) -> Vec<ChordQuality> {
        self.templates.iter().map(|t| t.quality).collect()
    }

    pub fn get(&self, quality: ChordQuality) -> Option<&ChordTemplate> {
        self.templates.iter().find(|t| t.quality == quality)
    }

    /// Position of `quality` in library order.
    pub fn position(&self, quality: ChordQuality) -> Option<usize> {
        self.templates.iter().position(|t| t.quality == quality)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Every (tonic, quality) label, tonic-major then library order.
    pub fn labels(&self) -> impl Iterator<Item = ChordLabel> + '_ {
        PitchClass::all().flat_map(move |tonic| {
            self.templates
                .iter()
                .map(move |t| ChordLabel::new(tonic, t.quality))
        })
    }
}

impl Default for ChordLibrary {
    fn default() -> Self {
        ChordLibrary::basic()
    }
}

impl TryFrom<Vec<ChordTemplate>> for ChordLibrary {
    type Error = TheoryError;

    fn try_from(templates: Vec<ChordTemplate>) -> Result<Self, Self::Error> {
        ChordLibrary::new(templates)
    }
}

impl From<ChordLibrary> for Vec<ChordTemplate> {
    fn from(library: ChordLibrary) -> Self {
        library.templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcs(template: &ChordTemplate, tonic: u8) -> Vec<u8> {
        template
            .pitch_classes(PitchClass::new(tonic).unwrap())
            .into_iter()
            .map(PitchClass::get)
            .collect()
    }

    #[test]
    fn basic_library_order_and_degrees() {
        let lib = ChordLibrary::basic();
        assert_eq!(lib.qualities(), ChordQuality::BASIC.to_vec());
        let degrees: Vec<String> = lib
            .get(ChordQuality::Minor7)
            .unwrap()
            .degrees
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(degrees, ["1", "-3", "5", "-7"]);
    }

    #[test]
    fn templates_resolve_from_c() {
        let lib = ChordLibrary::basic();
        assert_eq!(pcs(lib.get(ChordQuality::Major).unwrap(), 1), [1, 5, 8]);
        assert_eq!(pcs(lib.get(ChordQuality::Minor).unwrap(), 1), [1, 4, 8]);
        assert_eq!(pcs(lib.get(ChordQuality::Dominant7).unwrap(), 1), [1, 5, 8, 11]);
        assert_eq!(pcs(lib.get(ChordQuality::Major7).unwrap(), 1), [1, 5, 8, 12]);
        assert_eq!(pcs(lib.get(ChordQuality::Minor7).unwrap(), 1), [1, 4, 8, 11]);
    }

    #[test]
    fn extended_qualities_resolve_from_c() {
        let lib = ChordLibrary::extended();
        assert_eq!(pcs(lib.get(ChordQuality::Diminished).unwrap(), 1), [1, 4, 7]);
        assert_eq!(pcs(lib.get(ChordQuality::Augmented).unwrap(), 1), [1, 5, 9]);
        assert_eq!(pcs(lib.get(ChordQuality::Sus2).unwrap(), 1), [1, 3, 8]);
        assert_eq!(pcs(lib.get(ChordQuality::Sus4).unwrap(), 1), [1, 6, 8]);
        assert_eq!(pcs(lib.get(ChordQuality::Diminished7).unwrap(), 1), [1, 4, 7, 10]);
        assert_eq!(pcs(lib.get(ChordQuality::Minor6).unwrap(), 1), [1, 4, 8, 10]);
    }

    #[test]
    fn every_extended_template_spells_for_every_tonic() {
        let lib = ChordLibrary::extended();
        for template in lib.templates() {
            for tonic in PitchClass::all() {
                assert!(template.spell(tonic).is_ok(), "{:?} on {tonic}", template.quality);
            }
        }
    }

    #[test]
    fn suffix_roundtrip() {
        for q in ChordQuality::ALL {
            assert_eq!(q.suffix().parse::<ChordQuality>().unwrap(), q);
        }
        assert!(matches!(
            "min9".parse::<ChordQuality>(),
            Err(TheoryError::UnknownChordQuality { .. })
        ));
    }

    #[test]
    fn labels_are_tonic_major() {
        let lib = ChordLibrary::basic();
        let labels: Vec<ChordLabel> = lib.labels().collect();
        assert_eq!(labels.len(), 60);
        assert_eq!(labels[0], ChordLabel::new(PitchClass::C, ChordQuality::Major));
        assert_eq!(labels[1], ChordLabel::new(PitchClass::C, ChordQuality::Minor));
        assert_eq!(
            labels[5],
            ChordLabel::new(PitchClass::new(2).unwrap(), ChordQuality::Major)
        );
    }

    #[test]
    fn label_display() {
        let label = ChordLabel::new(PitchClass::new(2).unwrap(), ChordQuality::Minor7);
        assert_eq!(label.to_string(), "C♯m7");
        assert_eq!(ChordLabel::new(PitchClass::C, ChordQuality::Major).to_string(), "C");
    }

    #[test]
    fn library_rejects_duplicates_and_empty_templates() {
        let dup = ChordLibrary::new(vec![
            ChordTemplate::standard(ChordQuality::Major),
            ChordTemplate::standard(ChordQuality::Major),
        ]);
        assert!(matches!(dup, Err(TheoryError::DuplicateTemplate { .. })));

        let empty = ChordTemplate::new(ChordQuality::Minor, vec![]);
        assert!(matches!(empty, Err(TheoryError::EmptyTemplate { .. })));
    }

    #[test]
    fn library_from_json() {
        let json = r#"[
            {"quality": "", "degrees": ["1", "+3", "5"]},
            {"quality": "dim"},
            {"quality": "sus4", "degrees": ["1", "=4", "=5"]}
        ]"#;
        let lib: ChordLibrary = serde_json::from_str(json).unwrap();
        assert_eq!(
            lib.qualities(),
            [ChordQuality::Major, ChordQuality::Diminished, ChordQuality::Sus4]
        );
        assert_eq!(pcs(lib.get(ChordQuality::Diminished).unwrap(), 1), [1, 4, 7]);

        let dup = r#"[{"quality": "m"}, {"quality": "m"}]"#;
        assert!(serde_json::from_str::<ChordLibrary>(dup).is_err());
        let bad_degree = r#"[{"quality": "m", "degrees": ["1", "=3"]}]"#;
        assert!(serde_json::from_str::<ChordLibrary>(bad_degree).is_err());
    }
}
