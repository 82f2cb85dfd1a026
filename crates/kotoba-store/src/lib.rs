pub mod duplicate;
pub mod error;
pub mod filter;
pub mod kv;
pub mod store;

pub use duplicate::find_duplicate;
pub use error::StoreError;
pub use filter::EntryFilter;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use store::EntryStore;
