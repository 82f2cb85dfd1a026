use kotoba_core::Searchable;
use kotoba_core::preprocess::normalize_query;
use kotoba_types::{JlptLevel, VocabularyEntry};

/// Criteria for browsing the personal collection. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub query: Option<String>,
    pub jlpt_level: Option<JlptLevel>,
    /// Case-insensitive substring of the entry's source
    pub source: Option<String>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &VocabularyEntry) -> bool {
        if let Some(level) = self.jlpt_level {
            if entry.jlpt_level != Some(level) {
                return false;
            }
        }

        if let Some(source) = self.source.as_deref().map(normalize_query) {
            let entry_source = entry.source.as_deref().unwrap_or_default().to_lowercase();
            if !entry_source.contains(&source) {
                return false;
            }
        }

        match self.query.as_deref().map(normalize_query) {
            Some(query) if !query.is_empty() => entry.matches(&query),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use kotoba_types::VocabularyDraft;

    use super::*;

    fn entry() -> VocabularyEntry {
        let mut draft = VocabularyDraft::new("学校", "gakkou");
        draft.meanings = vec!["school".into()];
        draft.jlpt_level = Some(JlptLevel::N5);
        draft.source = Some("Yotsuba&! vol. 2".into());
        VocabularyEntry::from_draft(draft, Utc::now())
    }

    #[test]
    fn default_filter_matches_all() {
        assert!(EntryFilter::default().matches(&entry()));
    }

    #[test]
    fn filters_by_level_source_and_text() {
        let e = entry();
        let by_level = EntryFilter {
            jlpt_level: Some(JlptLevel::N4),
            ..EntryFilter::default()
        };
        assert!(!by_level.matches(&e));

        let by_source = EntryFilter {
            source: Some("yotsuba".into()),
            ..EntryFilter::default()
        };
        assert!(by_source.matches(&e));

        let by_text = EntryFilter {
            query: Some("SCHOOL".into()),
            jlpt_level: Some(JlptLevel::N5),
            ..EntryFilter::default()
        };
        assert!(by_text.matches(&e));

        let miss = EntryFilter {
            query: Some("train".into()),
            ..EntryFilter::default()
        };
        assert!(!miss.matches(&e));
    }
}
