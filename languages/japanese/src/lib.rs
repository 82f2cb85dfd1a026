pub mod core_lexicon;
pub mod fetcher;
pub mod jmdict;
pub mod kana;
pub mod large_lexicon;

pub use core_lexicon::CoreLexiconLoader;
pub use fetcher::{HttpFetcher, PayloadFetcher, ProgressFn};
pub use jmdict::JMdictParser;
pub use large_lexicon::{LargeLexiconLoader, LoadStatus};
