use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use kotoba_config::search::SearchConfig;
use kotoba_config::store::StoreConfig;
use kotoba_core::{Lexicon, LexiconError, SearchEngine};
use kotoba_lang_japanese::{CoreLexiconLoader, LargeLexiconLoader, PayloadFetcher, ProgressFn};
use kotoba_store::{EntryStore, FileStore};
use tokio::sync::Notify;

use crate::service::VocabService;


pub(crate) const PAYLOAD: &str = r#"{"version": "3.6.1", "languages": ["eng"], "words": [
    {"kanji": [{"common": true, "text": "電車"}], "kana": [{"common": true, "text": "でんしゃ"}],
     "sense": [{"partOfSpeech": ["n"], "gloss": [{"lang": "eng", "text": "train"}]}]},
    {"kanji": [], "kana": [{"common": false, "text": "トレーニング"}],
     "sense": [{"partOfSpeech": ["n"], "gloss": [{"lang": "eng", "text": "training"}]}]}
]}"#;

/// Stands in for the network. Optionally reports `early_ticks` progress
/// values and then waits on `gate` before writing.
pub(crate) struct FakeFetcher {
    body: &'static str,
    fail: bool,
    gate: Option<Arc<Notify>>,
    early_ticks: usize,
}

impl FakeFetcher {
    pub(crate) fn ok() -> Self {
        Self {
            body: PAYLOAD,
            fail: false,
            gate: None,
            early_ticks: 0,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok()
        }
    }

    pub(crate) fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::ok()
        }
    }

    pub(crate) fn chatty(gate: Arc<Notify>, early_ticks: usize) -> Self {
        Self {
            early_ticks,
            ..Self::gated(gate)
        }
    }
}

#[async_trait]
impl PayloadFetcher for FakeFetcher {
    async fn fetch_to(&self, dest: &Path, progress: &ProgressFn<'_>) -> Result<u64, LexiconError> {
        for tick in 0..self.early_ticks {
            progress(tick as f32 / self.early_ticks as f32 * 0.5);
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        progress(0.5);
        if self.fail {
            return Err(LexiconError::Network("connection reset".into()));
        }
        std::fs::write(dest, self.body).map_err(LexiconError::StorageWrite)?;
        progress(1.0);
        Ok(self.body.len() as u64)
    }

    fn source(&self) -> &str {
        "fake"
    }
}

/// A service over the embedded core lexicon with its files under `dir`
pub(crate) fn service_in(dir: &Path, fetcher: FakeFetcher) -> VocabService {
    let core = Lexicon::new("core", CoreLexiconLoader::load_embedded().unwrap());
    let search = SearchEngine::new(core, &SearchConfig::default());

    let backend = FileStore::open(dir.join("store")).unwrap();
    let store = EntryStore::open(Box::new(backend), &StoreConfig::default());

    let large = LargeLexiconLoader::new(dir.join("jmdict-eng.json"), Arc::new(fetcher));
    VocabService::new(search, store, Arc::new(large))
}
