use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use kotoba_config::lexicon::LexiconConfig;
use kotoba_core::LexiconError;
use tokio::io::AsyncWriteExt;

/// Receives download progress as a fraction in `0.0..=1.0`
pub type ProgressFn<'a> = dyn Fn(f32) + Send + Sync + 'a;

/// Source of the large dictionary payload
#[async_trait]
pub trait PayloadFetcher: Send + Sync {
    /// Stream the payload into `dest`, returning the number of bytes written
    async fn fetch_to(&self, dest: &Path, progress: &ProgressFn<'_>) -> Result<u64, LexiconError>;

    /// Human-readable origin, for logs
    fn source(&self) -> &str;
}

/// Downloads the payload with a single HTTP GET
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(url: String, timeout: Duration) -> Result<Self, LexiconError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(network_error)?;

        Ok(Self { client, url })
    }

    pub fn from_config(config: &LexiconConfig) -> Result<Self, LexiconError> {
        Self::new(
            config.jmdict_url.clone(),
            Duration::from_secs(config.fetch_timeout_seconds),
        )
    }
}

#[async_trait]
impl PayloadFetcher for HttpFetcher {
    async fn fetch_to(&self, dest: &Path, progress: &ProgressFn<'_>) -> Result<u64, LexiconError> {
        let mut response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(LexiconError::Network(format!("HTTP {}", response.status())));
        }

        let total = response.content_length().filter(|len| *len > 0);
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(LexiconError::StorageWrite)?;

        progress(0.0);
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await.map_err(network_error)? {
            file.write_all(&chunk)
                .await
                .map_err(LexiconError::StorageWrite)?;
            written += chunk.len() as u64;

            if let Some(total) = total {
                progress((written as f32 / total as f32).min(1.0));
            }
        }

        file.flush().await.map_err(LexiconError::StorageWrite)?;
        file.sync_all().await.map_err(LexiconError::StorageWrite)?;
        progress(1.0);

        Ok(written)
    }

    fn source(&self) -> &str {
        &self.url
    }
}

fn network_error(e: reqwest::Error) -> LexiconError {
    LexiconError::Network(e.to_string())
}
