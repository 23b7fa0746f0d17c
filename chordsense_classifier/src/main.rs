// chordsense — command-line host for the chord guesser.
//
// Trains a bank at startup, then runs one command:
//
//   chordsense guess C E G               ranked guesses for a note set
//   chordsense guess 1 4 8 --top 6       raw note integers (1 = C, 13 = C)
//   chordsense guess C Eb G --lilypond out.ly
//   chordsense spell --tonic F# -- 1 +3 5 -7
//   chordsense scale                     degrees 1..8 spelled on every tonic
//   chordsense check                     does every template rank itself first?
//
// Training flags (guess, check): --config FILE (JSON, see config.rs),
// --learning-rate R, --epochs N. Flags override the file.
//
// Notes and degree tokens that fail to parse are reported and skipped; the
// rest are still processed. A degree the speller cannot letter (e.g. "+++7"
// above A♯) is reported as an internal defect for that token only, and the
// command exits with failure once the whole list is done. Diagnostics go to
// stderr through tracing (RUST_LOG overrides the default `chordsense=info`
// filter); results go to stdout.

use chordsense_classifier::{ChordGuesser, ClassifierConfig, ClassifierError, DEFAULT_TOP_N};
use chordsense_theory::{
    DegreeToken, PitchClass, Quality, TheoryError, abc_chord, lilypond_chord, spell,
    write_lilypond,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Directive used when RUST_LOG is unset. Target prefixes match, so this
/// covers the binary and both `chordsense_*` library crates.
const DEFAULT_LOG_FILTER: &str = "chordsense=info";

#[derive(Parser, Debug)]
#[command(name = "chordsense", version, about = "Guess chords from played notes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct TrainingArgs {
    /// JSON configuration file (learning_rate, epochs, templates)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the learning rate
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Override the epoch count
    #[arg(long)]
    epochs: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank chord guesses for a set of notes (names like F# or raw integers)
    Guess {
        #[arg(required = true, allow_hyphen_values = true)]
        notes: Vec<String>,

        /// Number of guesses to show
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Also write the guesses as a LilyPond file
        #[arg(long)]
        lilypond: Option<PathBuf>,

        #[command(flatten)]
        training: TrainingArgs,
    },

    /// Spell degree tokens above a tonic (use `--` before tokens like -3).
    /// Tokens past the triple-accidental range are reported and skipped.
    Spell {
        #[arg(long)]
        tonic: String,

        #[arg(required = true, allow_hyphen_values = true)]
        degrees: Vec<String>,
    },

    /// Spell degrees 1 through 8 on every tonic
    Scale,

    /// Check that every training template ranks its own label first
    Check {
        #[command(flatten)]
        training: TrainingArgs,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(ClassifierError::Theory(e @ TheoryError::DesignViolation { .. })) => {
            error!("internal defect: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, ClassifierError> {
    match command {
        Command::Guess {
            notes,
            top,
            lilypond,
            training,
        } => {
            let guesser = build_guesser(&training)?;
            let raw = parse_notes(&notes);
            if raw.is_empty() {
                warn!("no valid notes given; every label scores alike");
            }
            let guesses = guesser.guess(&raw, top)?;
            for (i, guess) in guesses.iter().enumerate() {
                println!(
                    "{:>2}. {:<8} {:.4}  {:<20} {}",
                    i + 1,
                    guess.spelling.name,
                    guess.score,
                    guess.spelling.note_names().join(" "),
                    lilypond_chord(&guess.spelling),
                );
                println!("    {}", abc_chord(&guess.spelling).replace('\n', " | "));
            }
            if let Some(path) = lilypond {
                let spellings: Vec<_> = guesses.into_iter().map(|g| g.spelling).collect();
                write_lilypond(&spellings, None, &path)?;
                info!(path = %path.display(), "wrote LilyPond file");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Spell { tonic, degrees } => {
            let tonic: PitchClass = tonic.parse()?;
            let (lines, defects) = spell_degrees(tonic, &degrees);
            for line in &lines {
                println!("{line}");
            }
            Ok(if defects == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Scale => {
            for tonic in PitchClass::all() {
                let mut names = Vec::new();
                for number in 1..=8 {
                    let degree = DegreeToken::new(Quality::Perfect, number)?;
                    names.push(spell(tonic, degree)?.to_string());
                }
                let tonic_name = tonic.canonical_spelling().to_string();
                println!("{:>2} {:<3} {}", tonic, tonic_name, names.join(" "));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { training } => {
            let guesser = build_guesser(&training)?;
            let rows = guesser.self_check();
            let mut failures = 0;
            for row in &rows {
                let top: Vec<String> = row
                    .top
                    .iter()
                    .map(|e| format!("{} ({:.3})", e.label, e.score))
                    .collect();
                let mark = if row.passed() { "ok" } else { "MISS" };
                let expected = row.expected.to_string();
                println!("{:<6} {:<4} {}", expected, mark, top.join("  "));
                if !row.passed() {
                    failures += 1;
                }
            }
            println!("{} of {} templates ranked first", rows.len() - failures, rows.len());
            Ok(if failures == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn build_guesser(args: &TrainingArgs) -> Result<ChordGuesser, ClassifierError> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            ClassifierConfig::load(path)?
        }
        None => ClassifierConfig::default(),
    };
    if let Some(rate) = args.learning_rate {
        config.learning_rate = rate;
    }
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    ChordGuesser::new(config)
}

/// Spell each token above `tonic`, one output line per spelled degree.
/// Returns the lines and how many tokens hit a speller defect.
fn spell_degrees(tonic: PitchClass, tokens: &[String]) -> (Vec<String>, usize) {
    let mut lines = Vec::new();
    let mut defects = 0;
    for token in tokens {
        let degree = match token.parse::<DegreeToken>() {
            Ok(degree) => degree,
            Err(e) => {
                warn!("skipping degree: {e}");
                continue;
            }
        };
        match spell(tonic, degree) {
            Ok(note) => lines.push(format!("{:>5}  {}", token, note)),
            Err(e) => {
                error!("internal defect: {e}");
                defects += 1;
            }
        }
    }
    (lines, defects)
}

/// Parse note arguments, skipping (and reporting) any that are invalid.
fn parse_notes(args: &[String]) -> Vec<i64> {
    args.iter()
        .filter_map(|arg| match arg.parse::<PitchClass>() {
            Ok(pc) => Some(pc.get() as i64),
            Err(e) => {
                warn!("skipping note: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_notes_skips_invalid() {
        let args: Vec<String> = ["C", "H", "Eb", "13", "x7"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parse_notes(&args), [1, 4, 1]);
    }

    #[test]
    fn spell_degrees_continues_past_a_defect() {
        let a_sharp = PitchClass::new(11).unwrap();
        let tokens: Vec<String> = ["1", "+++7", "x", "5"].iter().map(|s| s.to_string()).collect();
        let (lines, defects) = spell_degrees(a_sharp, &tokens);
        assert_eq!(lines, ["    1  A♯", "    5  E♯"]);
        assert_eq!(defects, 1);
    }

    #[test]
    fn default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn cli_parses_guess() {
        let cli = Cli::try_parse_from(["chordsense", "guess", "C", "E", "G", "--top", "2"]).unwrap();
        match cli.command {
            Command::Guess { notes, top, .. } => {
                assert_eq!(notes, ["C", "E", "G"]);
                assert_eq!(top, 2);
            }
            other => panic!("expected Guess, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_spell_with_separator() {
        let cli =
            Cli::try_parse_from(["chordsense", "spell", "--tonic", "F#", "--", "1", "-3", "--7"]).unwrap();
        match cli.command {
            Command::Spell { tonic, degrees } => {
                assert_eq!(tonic, "F#");
                assert_eq!(degrees, ["1", "-3", "--7"]);
            }
            other => panic!("expected Spell, got {other:?}"),
        }
    }
}
