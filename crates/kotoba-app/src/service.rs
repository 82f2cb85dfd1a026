use std::path::Path;
use std::sync::Arc;

use kotoba_config::Config;
use kotoba_core::{Lexicon, SearchEngine, SearchStats};
use kotoba_lang_japanese::{CoreLexiconLoader, HttpFetcher, LargeLexiconLoader};
use kotoba_store::{EntryFilter, EntryStore, FileStore, StoreError};
use kotoba_types::{AddOutcome, LargeLexiconStatus, LexiconEntry, VocabularyDraft, VocabularyEntry};
use uuid::Uuid;

/// Everything the presentation layer can ask of the app.
///
/// Owned by exactly one task; nothing in here is shared or locked.
pub struct VocabService {
    search: SearchEngine,
    store: EntryStore,
    large: Arc<LargeLexiconLoader>,
}

impl VocabService {
    pub fn new(search: SearchEngine, store: EntryStore, large: Arc<LargeLexiconLoader>) -> Self {
        Self {
            search,
            store,
            large,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let core = if config.lexicon.core_enabled {
            CoreLexiconLoader::load_or_empty(config.lexicon.core_path.as_deref().map(Path::new))
        } else {
            tracing::warn!("Core lexicon disabled, using empty lexicon");
            Lexicon::empty("core")
        };
        let search = SearchEngine::new(core, &config.search);

        let backend = FileStore::open(config.store_dir())?;
        let store = EntryStore::open(Box::new(backend), &config.store);

        let fetcher = HttpFetcher::from_config(&config.lexicon)?;
        let large = LargeLexiconLoader::new(config.payload_path(), Arc::new(fetcher));

        Ok(Self::new(search, store, Arc::new(large)))
    }

    pub fn search(&mut self, query: &str) -> Vec<LexiconEntry> {
        self.search.search(query)
    }

    pub fn add(&mut self, draft: VocabularyDraft) -> Result<AddOutcome, StoreError> {
        self.store.add(draft)
    }

    pub fn update(&mut self, entry: VocabularyEntry) -> Result<bool, StoreError> {
        self.store.update(entry)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        self.store.delete(id)
    }

    /// The whole collection, newest first
    pub fn all_entries(&self) -> Vec<VocabularyEntry> {
        self.store.all()
    }

    pub fn filter_entries(&self, filter: &EntryFilter) -> Vec<VocabularyEntry> {
        self.store.filter(filter)
    }

    pub fn large_lexicon_status(&self) -> LargeLexiconStatus {
        match self.search.large_len() {
            Some(count) => LargeLexiconStatus::Loaded(count),
            None if self.large.payload_exists() => LargeLexiconStatus::DownloadedNotLoaded,
            None => LargeLexiconStatus::NotDownloaded,
        }
    }

    /// Make a fully parsed large lexicon visible to search
    pub fn install_large_lexicon(&mut self, lexicon: Lexicon) {
        self.search.install_large(lexicon);
    }

    pub fn large_loader(&self) -> Arc<LargeLexiconLoader> {
        Arc::clone(&self.large)
    }

    pub fn search_stats(&self) -> SearchStats {
        self.search.stats()
    }
}
