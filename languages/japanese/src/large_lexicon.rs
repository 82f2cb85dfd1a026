use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kotoba_core::{Lexicon, LexiconError};

use crate::fetcher::{PayloadFetcher, ProgressFn};
use crate::jmdict::JMdictParser;

const LARGE_LEXICON_NAME: &str = "JMdict";

/// Outcome of reading the local payload
#[derive(Debug)]
pub enum LoadStatus {
    /// No payload on disk yet; fetch first
    NotFound,
    Loaded(Lexicon),
}

/// Downloads and parses the large dictionary.
///
/// Neither operation touches a lexicon that is already in use: the caller
/// receives a complete new [`Lexicon`] or an error and decides what to swap.
pub struct LargeLexiconLoader {
    payload_path: PathBuf,
    fetcher: Arc<dyn PayloadFetcher>,
}

impl LargeLexiconLoader {
    pub fn new(payload_path: impl Into<PathBuf>, fetcher: Arc<dyn PayloadFetcher>) -> Self {
        Self {
            payload_path: payload_path.into(),
            fetcher,
        }
    }

    pub fn payload_path(&self) -> &Path {
        &self.payload_path
    }

    /// A payload on disk means an earlier fetch completed
    pub fn payload_exists(&self) -> bool {
        self.payload_path.is_file()
    }

    /// Download into a side file, move it over the payload, then parse it.
    /// A failed download leaves any previous payload in place.
    pub async fn fetch(&self, progress: &ProgressFn<'_>) -> Result<LoadStatus, LexiconError> {
        if let Some(parent) = self.payload_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(LexiconError::StorageWrite)?;
        }

        let partial = self.partial_path();
        tracing::info!("Fetching large lexicon from {}", self.fetcher.source());

        match self.fetcher.fetch_to(&partial, progress).await {
            Ok(bytes) => tracing::info!("Downloaded {} bytes", bytes),
            Err(e) => {
                tracing::error!("Large lexicon fetch failed: {}", e);
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    if cleanup.kind() != io::ErrorKind::NotFound {
                        tracing::warn!("Failed to remove {}: {}", partial.display(), cleanup);
                    }
                }
                return Err(e);
            }
        }

        tokio::fs::rename(&partial, &self.payload_path)
            .await
            .map_err(LexiconError::StorageWrite)?;

        // Parse the file this fetch just completed, off the async workers
        let path = self.payload_path.clone();
        tokio::task::spawn_blocking(move || load_from(&path))
            .await
            .map_err(|e| LexiconError::Io(io::Error::other(e)))?
    }

    /// Parse the local payload. Blocking; run it off the owner loop.
    pub fn load(&self) -> Result<LoadStatus, LexiconError> {
        load_from(&self.payload_path)
    }

    fn partial_path(&self) -> PathBuf {
        let mut name = self.payload_path.as_os_str().to_owned();
        name.push(".part");
        PathBuf::from(name)
    }
}

fn load_from(path: &Path) -> Result<LoadStatus, LexiconError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("No large lexicon payload at {}", path.display());
            return Ok(LoadStatus::NotFound);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Loading large lexicon from file: {}", path.display());
    let entries = JMdictParser::parse(&bytes)?;
    Ok(LoadStatus::Loaded(Lexicon::new(LARGE_LEXICON_NAME, entries)))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    const PAYLOAD: &str = r#"{"version": "3.6.1", "languages": ["eng"], "words": [
        {"kanji": [{"common": true, "text": "電車"}], "kana": [{"common": true, "text": "でんしゃ"}],
         "sense": [{"partOfSpeech": ["n"], "gloss": [{"lang": "eng", "text": "train"}]}]}
    ]}"#;

    /// Writes a canned body, or writes half of it and fails
    struct FakeFetcher {
        body: &'static str,
        fail: bool,
        progress_seen: Mutex<Vec<f32>>,
    }

    impl FakeFetcher {
        fn ok(body: &'static str) -> Self {
            Self {
                body,
                fail: false,
                progress_seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok(PAYLOAD)
            }
        }
    }

    #[async_trait]
    impl PayloadFetcher for FakeFetcher {
        async fn fetch_to(&self, dest: &Path, progress: &ProgressFn<'_>) -> Result<u64, LexiconError> {
            let half = &self.body.as_bytes()[..self.body.len() / 2];
            if self.fail {
                std::fs::write(dest, half).map_err(LexiconError::StorageWrite)?;
                progress(0.5);
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

    fn loader(dir: &Path, fetcher: FakeFetcher) -> (LargeLexiconLoader, Arc<FakeFetcher>) {
        let fetcher = Arc::new(fetcher);
        let loader = LargeLexiconLoader::new(dir.join("data/jmdict.json"), fetcher.clone());
        (loader, fetcher)
    }

    #[test]
    fn load_without_payload_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, _) = loader(dir.path(), FakeFetcher::ok(PAYLOAD));
        assert!(matches!(loader.load(), Ok(LoadStatus::NotFound)));
        assert!(!loader.payload_exists());
    }

    #[test]
    fn load_of_corrupt_payload_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, _) = loader(dir.path(), FakeFetcher::ok(PAYLOAD));
        std::fs::create_dir_all(loader.payload_path().parent().unwrap()).unwrap();
        std::fs::write(loader.payload_path(), "[1, 2").unwrap();

        assert!(matches!(loader.load(), Err(LexiconError::Parse(_))));
    }

    #[tokio::test]
    async fn fetch_writes_payload_and_loads_it() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, fetcher) = loader(dir.path(), FakeFetcher::ok(PAYLOAD));

        let progress = |p: f32| fetcher.progress_seen.lock().unwrap().push(p);
        let status = loader.fetch(&progress).await.unwrap();

        let LoadStatus::Loaded(lexicon) = status else {
            panic!("expected a loaded lexicon");
        };
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.entries()[0].headword, "電車");
        assert!(loader.payload_exists());
        assert!(!loader.partial_path().exists());
        assert_eq!(*fetcher.progress_seen.lock().unwrap(), vec![1.0]);

        // A later load reads the same payload
        assert!(matches!(loader.load(), Ok(LoadStatus::Loaded(l)) if l.len() == 1));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_no_payload() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, _) = loader(dir.path(), FakeFetcher::failing());

        let err = loader.fetch(&|_: f32| {}).await.unwrap_err();
        assert!(err.is_retryable());
        assert!(!loader.payload_exists());
        assert!(!loader.partial_path().exists());
        assert!(matches!(loader.load(), Ok(LoadStatus::NotFound)));
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_payload() {
        let dir = tempfile::tempdir().unwrap();
        let (good, _) = loader(dir.path(), FakeFetcher::ok(PAYLOAD));
        good.fetch(&|_: f32| {}).await.unwrap();

        let (bad, _) = loader(dir.path(), FakeFetcher::failing());
        assert!(bad.fetch(&|_: f32| {}).await.is_err());
        assert!(matches!(bad.load(), Ok(LoadStatus::Loaded(l)) if l.len() == 1));
    }
}
