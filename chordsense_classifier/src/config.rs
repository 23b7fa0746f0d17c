// Classifier configuration.
//
// Hosts can tune the learning rate, the epoch count, and the chord-template
// table. Everything has a default matching the standard regimen (0.05, 100
// epochs, the five basic templates), so an empty JSON object is a valid
// config. Loaded from JSON like the rest of the workspace's data files.
//
// Example:
//
//   {
//     "learning_rate": 0.05,
//     "epochs": 100,
//     "templates": [
//       { "quality": "",  "degrees": ["1", "+3", "5"] },
//       { "quality": "m", "degrees": ["1", "-3", "5"] },
//       { "quality": "dim" }
//     ]
//   }
//
// A template without "degrees" uses the quality's standard degrees.

use crate::bank::DEFAULT_LEARNING_RATE;
use crate::error::{ClassifierError, Result};
use crate::trainer::DEFAULT_EPOCHS;
use chordsense_theory::ChordLibrary;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Gradient step size. Must be finite and positive.
    pub learning_rate: f64,
    /// Full passes over the synthetic templates. Must be at least one.
    pub epochs: u32,
    /// Chord templates, in the order that fixes the bank's unit layout.
    pub templates: ChordLibrary,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
            templates: ChordLibrary::basic(),
        }
    }
}

impl ClassifierConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ClassifierConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ClassifierError::InvalidConfig(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(ClassifierError::InvalidConfig(
                "epochs must be at least 1".to_string(),
            ));
        }
        if self.templates.is_empty() {
            return Err(ClassifierError::InvalidConfig(
                "template table is empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordsense_theory::ChordQuality;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ClassifierConfig::from_json("{}").unwrap();
        assert_eq!(config, ClassifierConfig::default());
        assert_eq!(config.learning_rate, 0.05);
        assert_eq!(config.epochs, 100);
        assert_eq!(config.templates.len(), 5);
    }

    #[test]
    fn partial_override() {
        let config = ClassifierConfig::from_json(
            r#"{"epochs": 20, "templates": [{"quality": "m7"}, {"quality": "sus4"}]}"#,
        )
        .unwrap();
        assert_eq!(config.epochs, 20);
        assert_eq!(config.learning_rate, 0.05);
        assert_eq!(
            config.templates.qualities(),
            [ChordQuality::Minor7, ChordQuality::Sus4]
        );
    }

    #[test]
    fn invalid_values_rejected() {
        for json in [
            r#"{"learning_rate": 0.0}"#,
            r#"{"learning_rate": -1.0}"#,
            r#"{"epochs": 0}"#,
            r#"{"templates": []}"#,
        ] {
            assert!(
                matches!(ClassifierConfig::from_json(json), Err(ClassifierError::InvalidConfig(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ClassifierConfig::from_json("{"),
            Err(ClassifierError::Json(_))
        ));
        assert!(matches!(
            ClassifierConfig::from_json(r#"{"templates": [{"quality": "xyz"}]}"#),
            Err(ClassifierError::Json(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"learning_rate": 0.1, "epochs": 7}}"#).unwrap();
        let config = ClassifierConfig::load(file.path()).unwrap();
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.epochs, 7);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ClassifierConfig::load(Path::new("/nonexistent/chordsense.json")).unwrap_err();
        assert!(matches!(err, ClassifierError::Io(_)));
    }

    #[test]
    fn serializes_back_to_json() {
        let json = serde_json::to_string(&ClassifierConfig::default()).unwrap();
        let back = ClassifierConfig::from_json(&json).unwrap();
        assert_eq!(back, ClassifierConfig::default());
    }
}
