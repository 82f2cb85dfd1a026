use std::sync::Arc;

use kotoba_types::{LexiconEntry, VocabularyEntry};

use crate::preprocess::normalize_field;

/// Text fields a query is matched against
pub trait Searchable {
    fn search_fields(&self) -> impl Iterator<Item = &str> + '_;

    /// Substring match on folded fields. `query` must already be normalized.
    fn matches(&self, query: &str) -> bool {
        self.search_fields()
            .any(|field| normalize_field(field).contains(query))
    }
}

impl Searchable for LexiconEntry {
    fn search_fields(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.headword.as_str())
            .chain(std::iter::once(self.romaji.as_str()))
            .chain(self.hiragana.as_deref())
            .chain(self.katakana.as_deref())
            .chain(self.meanings.iter().map(String::as_str))
            .chain(self.kanji_form.as_deref())
    }
}

impl Searchable for VocabularyEntry {
    fn search_fields(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.headword.as_str())
            .chain(std::iter::once(self.romaji.as_str()))
            .chain(self.hiragana.as_deref())
            .chain(self.katakana.as_deref())
            .chain(self.meanings.iter().map(String::as_str))
    }
}

/// Immutable snapshot of dictionary entries. Cloning shares the entries.
#[derive(Debug, Clone)]
pub struct Lexicon {
    name: String,
    entries: Arc<[LexiconEntry]>,
    /// Folded search fields, parallel to `entries`
    folded: Arc<[Box<[String]>]>,
}

impl Lexicon {
    pub fn new(name: impl Into<String>, entries: Vec<LexiconEntry>) -> Self {
        let folded: Arc<[Box<[String]>]> = entries
            .iter()
            .map(|entry| entry.search_fields().map(normalize_field).collect::<Box<[String]>>())
            .collect();

        Self {
            name: name.into(),
            entries: entries.into(),
            folded,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Entries that match `query` and have something to show
    pub fn matching<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a LexiconEntry> + 'a {
        self.entries
            .iter()
            .zip(self.folded.iter())
            .filter(move |(entry, fields)| {
                entry.has_meaning() && fields.iter().any(|field| field.contains(query))
            })
            .map(|(entry, _)| entry)
    }
}
