use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::jlpt::JlptLevel;

/// Dictionary entry produced by a lexicon loader. Immutable once built.
///
/// Equality compares the text fields only; two loads of the same word are
/// equal even though each gets a fresh `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconEntry {
    pub id: Uuid,
    pub headword: String,
    pub hiragana: Option<String>,
    pub katakana: Option<String>,
    pub romaji: String,
    pub meanings: Vec<String>,
    pub parts_of_speech: Vec<String>,
    pub jlpt_level: Option<JlptLevel>,
    pub frequency: Option<u32>,
    pub kanji_form: Option<String>,
}

impl LexiconEntry {
    pub fn new(headword: impl Into<String>, romaji: impl Into<String>, meanings: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            headword: headword.into(),
            hiragana: None,
            katakana: None,
            romaji: romaji.into(),
            meanings,
            parts_of_speech: Vec::new(),
            jlpt_level: None,
            frequency: None,
            kanji_form: None,
        }
    }

    pub fn with_hiragana(mut self, hiragana: impl Into<String>) -> Self {
        self.hiragana = Some(hiragana.into());
        self
    }

    pub fn with_katakana(mut self, katakana: impl Into<String>) -> Self {
        self.katakana = Some(katakana.into());
        self
    }

    pub fn with_kanji_form(mut self, kanji: impl Into<String>) -> Self {
        self.kanji_form = Some(kanji.into());
        self
    }

    pub fn with_parts_of_speech(mut self, pos: Vec<String>) -> Self {
        self.parts_of_speech = pos;
        self
    }

    pub fn with_jlpt_level(mut self, level: JlptLevel) -> Self {
        self.jlpt_level = Some(level);
        self
    }

    pub fn with_frequency(mut self, rank: u32) -> Self {
        self.frequency = Some(rank);
        self
    }

    /// The form shown to the user
    pub fn display_word(&self) -> &str {
        &self.headword
    }

    /// Kana reading, hiragana preferred
    pub fn reading(&self) -> Option<&str> {
        self.hiragana.as_deref().or(self.katakana.as_deref())
    }

    /// An entry is only worth surfacing if it has at least one non-empty gloss
    pub fn has_meaning(&self) -> bool {
        self.meanings.iter().any(|m| !m.trim().is_empty())
    }

    /// Composite key used to collapse the same word found in several lexicons
    pub fn dedup_key(&self) -> (String, String) {
        (self.headword.to_lowercase(), self.romaji.to_lowercase())
    }
}

impl PartialEq for LexiconEntry {
    fn eq(&self, other: &Self) -> bool {
        self.headword == other.headword
            && self.hiragana == other.hiragana
            && self.katakana == other.katakana
            && self.romaji == other.romaji
            && self.meanings == other.meanings
            && self.parts_of_speech == other.parts_of_speech
            && self.jlpt_level == other.jlpt_level
            && self.frequency == other.frequency
            && self.kanji_form == other.kanji_form
    }
}

impl Eq for LexiconEntry {}

/// A word the user wants to save, before it has an id or timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyDraft {
    pub headword: String,
    pub hiragana: Option<String>,
    pub katakana: Option<String>,
    pub romaji: String,
    pub meanings: Vec<String>,
    pub parts_of_speech: Vec<String>,
    pub jlpt_level: Option<JlptLevel>,
    pub source: Option<String>,
}

impl VocabularyDraft {
    pub fn new(headword: impl Into<String>, romaji: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            romaji: romaji.into(),
            ..Self::default()
        }
    }

    /// Build a draft from a dictionary search result
    pub fn from_lexicon(entry: &LexiconEntry, source: Option<String>) -> Self {
        Self {
            headword: entry.headword.clone(),
            hiragana: entry.hiragana.clone(),
            katakana: entry.katakana.clone(),
            romaji: entry.romaji.clone(),
            meanings: entry.meanings.clone(),
            parts_of_speech: entry.parts_of_speech.clone(),
            jlpt_level: entry.jlpt_level,
            source,
        }
    }
}

/// A word in the user's personal collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: Uuid,
    pub headword: String,
    pub hiragana: Option<String>,
    pub katakana: Option<String>,
    pub romaji: String,
    pub meanings: Vec<String>,
    pub parts_of_speech: Vec<String>,
    pub jlpt_level: Option<JlptLevel>,
    pub source: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl VocabularyEntry {
    /// Accept a draft: assign a fresh id and stamp the creation time
    pub fn from_draft(draft: VocabularyDraft, date_added: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            headword: draft.headword,
            hiragana: draft.hiragana,
            katakana: draft.katakana,
            romaji: draft.romaji,
            meanings: draft.meanings,
            parts_of_speech: draft.parts_of_speech,
            jlpt_level: draft.jlpt_level,
            source: draft.source,
            date_added,
        }
    }

    pub fn display_word(&self) -> &str {
        &self.headword
    }
}

/// Result of submitting a draft to the entry store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Accepted(VocabularyEntry),
    RejectedAsDuplicate { existing: Uuid },
}

impl AddOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AddOutcome::Accepted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LargeLexiconStatus {
    NotDownloaded,
    DownloadedNotLoaded,
    Loaded(usize),
}

/// Messages between the presentation layer and the owner loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    // presentation -> app
    Search(String),
    AddEntry(VocabularyDraft),
    UpdateEntry(VocabularyEntry),
    DeleteEntry(Uuid),
    ListEntries,
    FetchLargeLexicon,
    LoadLargeLexicon,
    QueryLargeLexiconStatus,

    // app -> presentation
    SearchResults {
        query: String,
        results: Vec<LexiconEntry>,
    },
    EntryAdded(AddOutcome),
    Entries(Vec<VocabularyEntry>),
    FetchProgress(f32),
    LargeLexiconStatus(LargeLexiconStatus),
    Error(String),
}
