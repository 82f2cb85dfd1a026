/// Failures while building or refreshing a lexicon
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// Bundled resource unreadable or missing a required field
    #[error("Malformed resource: {0}")]
    MalformedResource(String),

    /// Download failed; the caller may retry
    #[error("Network error: {0}")]
    Network(String),

    /// Could not persist the downloaded payload
    #[error("Storage write error: {0}")]
    StorageWrite(#[source] std::io::Error),

    /// Payload is not a structurally valid dictionary document
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LexiconError {
    /// Whether re-running the same operation can reasonably succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LexiconError::Network(_))
    }
}
