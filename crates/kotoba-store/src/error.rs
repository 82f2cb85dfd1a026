#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Collection could not be written; the in-memory collection is unchanged
    #[error("Storage write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
