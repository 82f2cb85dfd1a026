use kotoba_core::LexiconError;
use kotoba_types::LexiconEntry;
use serde::Deserialize;

use crate::kana::{KanaReading, placeholder_romaji};

const MAX_MEANINGS: usize = 5;
const MAX_PARTS_OF_SPEECH: usize = 3;
const ENGLISH: &str = "eng";

// JSON structures for parsing jmdict-simplified format
#[derive(Debug, Deserialize)]
struct JMdictJson {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    languages: Vec<String>,
    words: Vec<JMdictJsonEntry>,
}

#[derive(Debug, Deserialize)]
struct JMdictJsonEntry {
    #[serde(default)]
    kanji: Vec<KanjiElement>,
    #[serde(default)]
    kana: Vec<KanaElement>,
    #[serde(default)]
    sense: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct KanjiElement {
    #[serde(default)]
    common: bool,
    text: String,
}

#[derive(Debug, Deserialize)]
struct KanaElement {
    #[serde(default)]
    common: bool,
    text: String,
}

#[derive(Debug, Deserialize)]
struct Sense {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Vec<String>,
    #[serde(default)]
    gloss: Vec<Gloss>,
}

#[derive(Debug, Deserialize)]
struct Gloss {
    #[serde(default = "default_gloss_lang")]
    lang: String,
    text: String,
}

fn default_gloss_lang() -> String {
    ENGLISH.to_string()
}

/// Normalizes a jmdict-simplified document into lexicon entries
pub struct JMdictParser;

impl JMdictParser {
    /// Parse the whole document. Any structural error fails the parse, so
    /// callers never see a partial lexicon.
    pub fn parse(bytes: &[u8]) -> Result<Vec<LexiconEntry>, LexiconError> {
        let data: JMdictJson =
            serde_json::from_slice(bytes).map_err(|e| LexiconError::Parse(e.to_string()))?;

        tracing::info!(
            "Parsing JMdict {} ({} words, languages: {})",
            data.version.as_deref().unwrap_or("unknown version"),
            data.words.len(),
            data.languages.join(", ")
        );

        let total = data.words.len();
        let entries: Vec<LexiconEntry> = data.words.into_iter().filter_map(normalize).collect();

        tracing::info!(
            "Kept {} of {} JMdict words ({} without English glosses dropped)",
            entries.len(),
            total,
            total - entries.len()
        );

        Ok(entries)
    }
}

fn normalize(word: JMdictJsonEntry) -> Option<LexiconEntry> {
    let meanings = collect_capped(
        word.sense
            .iter()
            .flat_map(|s| &s.gloss)
            .filter(|g| g.lang == ENGLISH)
            .map(|g| g.text.as_str()),
        MAX_MEANINGS,
    );

    // Skip entries with no English meanings
    if meanings.is_empty() {
        return None;
    }

    let parts_of_speech = collect_capped(
        word.sense
            .iter()
            .flat_map(|s| &s.part_of_speech)
            .map(String::as_str),
        MAX_PARTS_OF_SPEECH,
    );

    let reading = word
        .kana
        .iter()
        .find(|k| k.common)
        .or_else(|| word.kana.first())
        .map(|k| KanaReading::classify(&k.text));

    let kanji = word
        .kanji
        .iter()
        .find(|k| k.common)
        .or_else(|| word.kanji.first())
        .map(|k| k.text.clone());

    let headword = kanji
        .clone()
        .or_else(|| reading.as_ref().map(|r| r.text().to_string()))?;

    let kanji_form = word
        .kanji
        .iter()
        .map(|k| &k.text)
        .find(|text| **text != headword)
        .cloned();

    let romaji = placeholder_romaji(reading.as_ref().map_or(headword.as_str(), KanaReading::text));

    let mut entry = LexiconEntry::new(headword, romaji, meanings).with_parts_of_speech(parts_of_speech);
    if let Some(reading) = reading {
        (entry.hiragana, entry.katakana) = reading.into_fields();
    }
    entry.kanji_form = kanji_form;
    Some(entry)
}

/// Distinct values in first-seen order, at most `cap` of them
fn collect_capped<'a>(values: impl Iterator<Item = &'a str>, cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if out.len() >= cap {
            break;
        }
        if !value.trim().is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}
