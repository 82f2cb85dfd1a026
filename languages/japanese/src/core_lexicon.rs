use std::path::Path;

use kotoba_core::{Lexicon, LexiconError};
use kotoba_types::{JlptLevel, LexiconEntry};
use serde::Deserialize;

const CORE_LEXICON_NAME: &str = "core";

/// One record of the bundled core lexicon
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoreRecord {
    word: String,
    #[serde(default)]
    hiragana: Option<String>,
    #[serde(default)]
    katakana: Option<String>,
    romaji: String,
    #[serde(default)]
    meanings: Vec<String>,
    #[serde(default)]
    part_of_speech: Vec<String>,
    #[serde(default)]
    jlpt_level: Option<JlptLevel>,
    #[serde(default)]
    kanji: Option<String>,
}

impl From<CoreRecord> for LexiconEntry {
    fn from(record: CoreRecord) -> Self {
        let kanji_form = record.kanji.filter(|k| *k != record.word);

        let mut entry = LexiconEntry::new(record.word, record.romaji, record.meanings)
            .with_parts_of_speech(record.part_of_speech);
        entry.hiragana = record.hiragana;
        entry.katakana = record.katakana;
        entry.jlpt_level = record.jlpt_level;
        entry.kanji_form = kanji_form;
        entry
    }
}

pub struct CoreLexiconLoader;

impl CoreLexiconLoader {
    /// Parse a core lexicon document. One bad record fails the whole load.
    pub fn from_json(json: &str) -> Result<Vec<LexiconEntry>, LexiconError> {
        let records: Vec<CoreRecord> = serde_json::from_str(json)
            .map_err(|e| LexiconError::MalformedResource(e.to_string()))?;

        Ok(records.into_iter().map(LexiconEntry::from).collect())
    }

    /// Load embedded core lexicon
    pub fn load_embedded() -> Result<Vec<LexiconEntry>, LexiconError> {
        let json = include_str!("../data/core_lexicon.json");
        tracing::info!("Loading embedded core lexicon...");
        let entries = Self::from_json(json)?;
        tracing::info!("Loaded {} core lexicon entries", entries.len());
        Ok(entries)
    }

    /// Load core lexicon from file path
    pub fn load_from_file(path: &Path) -> Result<Vec<LexiconEntry>, LexiconError> {
        tracing::info!("Loading core lexicon from file: {}", path.display());
        let json = std::fs::read_to_string(path)
            .map_err(|e| LexiconError::MalformedResource(format!("{}: {e}", path.display())))?;
        let entries = Self::from_json(&json)?;
        tracing::info!("Loaded {} core lexicon entries from file", entries.len());
        Ok(entries)
    }

    /// Startup path: never fails. A broken override falls back to the embedded
    /// resource, and a broken embedded resource yields an empty lexicon.
    pub fn load_or_empty(override_path: Option<&Path>) -> Lexicon {
        if let Some(path) = override_path {
            match Self::load_from_file(path) {
                Ok(entries) => return Lexicon::new(CORE_LEXICON_NAME, entries),
                Err(e) => {
                    tracing::warn!("Failed to load core lexicon from {}: {}", path.display(), e)
                }
            }
        }

        match Self::load_embedded() {
            Ok(entries) => Lexicon::new(CORE_LEXICON_NAME, entries),
            Err(e) => {
                tracing::error!("Failed to load embedded core lexicon: {}", e);
                tracing::warn!("Starting with empty core lexicon");
                Lexicon::empty(CORE_LEXICON_NAME)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_resource_loads() {
        let entries = CoreLexiconLoader::load_embedded().unwrap();
        assert!(entries.len() > 30);

        let school = entries.iter().find(|e| e.romaji == "gakkou").unwrap();
        assert_eq!(school.display_word(), "学校");
        assert_eq!(school.hiragana.as_deref(), Some("がっこう"));
        assert_eq!(school.jlpt_level, Some(JlptLevel::N5));
        assert_eq!(school.kanji_form, None);
        assert!(entries.iter().all(|e| e.has_meaning()));
    }

    #[test]
    fn distinct_kanji_spelling_is_kept() {
        let json = r#"[{"word": "コーヒー", "katakana": "コーヒー", "romaji": "koohii",
                        "meanings": ["coffee"], "partOfSpeech": ["noun"], "kanji": "珈琲"}]"#;
        let entries = CoreLexiconLoader::from_json(json).unwrap();
        assert_eq!(entries[0].kanji_form.as_deref(), Some("珈琲"));
        assert_eq!(entries[0].katakana.as_deref(), Some("コーヒー"));
        assert_eq!(entries[0].parts_of_speech, vec!["noun".to_string()]);
    }

    #[test]
    fn missing_required_field_fails_whole_load() {
        let json = r#"[{"word": "猫", "romaji": "neko", "meanings": ["cat"]},
                       {"word": "犬", "meanings": ["dog"]}]"#;
        assert!(matches!(
            CoreLexiconLoader::from_json(json),
            Err(LexiconError::MalformedResource(_))
        ));
    }

    #[test]
    fn invalid_jlpt_level_is_malformed() {
        let json = r#"[{"word": "猫", "romaji": "neko", "meanings": ["cat"], "jlptLevel": "N7"}]"#;
        assert!(CoreLexiconLoader::from_json(json).is_err());
    }

    #[test]
    fn broken_override_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.json");
        std::fs::write(&path, "{ nope").unwrap();

        let lexicon = CoreLexiconLoader::load_or_empty(Some(&path));
        assert!(!lexicon.is_empty());
        assert_eq!(lexicon.name(), "core");
    }
}
