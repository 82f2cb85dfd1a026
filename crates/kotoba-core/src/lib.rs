pub mod error;
pub mod lexicon;
pub mod preprocess;
pub mod search;

pub use error::LexiconError;
pub use lexicon::{Lexicon, Searchable};
pub use search::{SearchEngine, SearchStats};
