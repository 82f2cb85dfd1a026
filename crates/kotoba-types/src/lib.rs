pub mod jlpt;
pub mod types;

pub use jlpt::JlptLevel;
pub use types::*;
