use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default query preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC): full-width latin and half-width kana
        let text: String = text.nfkc().collect();

        text.replace(['\n', '\r'], "").trim().to_lowercase()
    }
}

pub struct QueryPreprocessor;
impl Preprocessor for QueryPreprocessor {}

/// Normalized form used both for matching and as the cache key
pub fn normalize_query(query: &str) -> String {
    QueryPreprocessor.process(query)
}

/// Same folding as [`normalize_query`] for text a query is matched against
pub fn normalize_field(field: &str) -> String {
    field.nfkc().collect::<String>().to_lowercase()
}
