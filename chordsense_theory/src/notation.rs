// Text output for notation renderers.
//
// The chord guesser never draws anything. A renderer (an ABC engraver in a
// browser, LilyPond on the command line) receives a `ChordSpelling`: the
// spelled chord tones of a (tonic, quality) pair in template order plus a
// readable chord name. This module turns that into:
//
// - a readable name ("F♯m7", "B♭maj7"), natural signs omitted;
// - an ABC tune fragment with the chord as one whole note, accidentals
//   always explicit ("=C=E=G") so nothing is inherited from a key;
// - LilyPond chords (`<c' e' g'>1`) and a complete .ly document listing
//   several chords with their names as markup.
//
// Octaves: each tone's octave comes from its letter position above the
// root's letter (tonic letter index + degree number - 1), so chord tones
// stack upward from the root even across C and for compound degrees.

use crate::chord::{ChordLabel, ChordQuality, ChordTemplate};
use crate::error::TheoryError;
use crate::pitch::{Letter, PitchClass, Spelling};
use std::fmt::Write;
use std::path::Path;

/// A chord spelled for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSpelling {
    pub label: ChordLabel,
    /// Readable name, e.g. "C♯m7".
    pub name: String,
    /// Chord tones in template order.
    pub notes: Vec<Spelling>,
    /// Octave above the root's octave for each tone in `notes`.
    pub octaves: Vec<u32>,
}

impl ChordSpelling {
    pub fn new(tonic: PitchClass, template: &ChordTemplate) -> Result<Self, TheoryError> {
        let notes = template.spell(tonic)?;
        let root_letter = tonic.canonical_spelling().letter;
        let octaves = template
            .degrees
            .iter()
            .map(|d| {
                // Widened so the largest degree numbers cannot overflow.
                let steps = root_letter.index() as u64 + u64::from(d.number()) - 1;
                (steps / Letter::ALL.len() as u64) as u32
            })
            .collect();
        Ok(ChordSpelling {
            label: ChordLabel::new(tonic, template.quality),
            name: readable_chord_name(tonic.canonical_spelling(), template.quality),
            notes,
            octaves,
        })
    }

    /// Notes as readable strings, e.g. ["C", "E♭", "G"].
    pub fn note_names(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.to_string()).collect()
    }
}

/// Tonic with accidental glyphs followed by the quality suffix.
pub fn readable_chord_name(tonic: Spelling, quality: ChordQuality) -> String {
    format!("{}{}", tonic, quality.suffix())
}

fn abc_note(note: Spelling, octave: u32) -> String {
    let mut out = String::from(note.accidental.abc_prefix());
    if octave == 0 {
        out.push(note.letter.as_char());
    } else {
        out.push(note.letter.as_char().to_ascii_lowercase());
        for _ in 1..octave {
            out.push('\'');
        }
    }
    out
}

/// ABC fragment for one whole-note chord:
///
/// ```text
/// X: 1
/// L:1/1
/// [=C=E=G]
/// ```
pub fn abc_chord(chord: &ChordSpelling) -> String {
    let mut body = String::new();
    for (note, &octave) in chord.notes.iter().zip(&chord.octaves) {
        body.push_str(&abc_note(*note, octave));
    }
    format!("X: 1\nL:1/1\n[{}]", body)
}

/// LilyPond absolute pitch; the root octave is the one above middle C's
/// reference (`c'`).
fn ly_note(note: Spelling, octave: u32) -> String {
    let mut out = String::new();
    out.push(note.letter.as_char().to_ascii_lowercase());
    out.push_str(note.accidental.lilypond_suffix());
    for _ in 0..=octave {
        out.push('\'');
    }
    out
}

/// LilyPond whole-note chord, e.g. `<fis' ais' cis''>1`.
pub fn lilypond_chord(chord: &ChordSpelling) -> String {
    let notes: Vec<String> = chord
        .notes
        .iter()
        .zip(&chord.octaves)
        .map(|(note, &octave)| ly_note(*note, octave))
        .collect();
    format!("<{}>1", notes.join(" "))
}

/// A complete LilyPond file: one whole-note chord per bar, each with its
/// name above the staff.
pub fn chords_to_lilypond(chords: &[ChordSpelling], title: Option<&str>) -> String {
    let mut ly = String::new();
    ly.push_str("\\version \"2.24.0\"\n\n");

    let title_text = title.unwrap_or("Chord guesses");
    let _ = write!(ly, "\\header {{\n  title = \"{}\"\n}}\n\n", title_text.replace('"', "\\\""));

    ly.push_str("\\score {\n  \\absolute {\n    \\time 4/4\n");
    for chord in chords {
        let _ = writeln!(
            ly,
            "    {}^\\markup {{ \"{}\" }}",
            lilypond_chord(chord),
            chord.name
        );
    }
    ly.push_str("  }\n  \\layout { }\n}\n");
    ly
}

/// Write a LilyPond file for a list of chords.
pub fn write_lilypond(
    chords: &[ChordSpelling],
    title: Option<&str>,
    path: &Path,
) -> std::io::Result<()> {
    std::fs::write(path, chords_to_lilypond(chords, title))
}
