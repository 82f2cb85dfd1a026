use serde::{Deserialize, Serialize};

fn default_dir_name() -> String {
    "store".to_string()
}

fn default_primary_key() -> String {
    "vocabulary_entries".to_string()
}

fn default_backup_key() -> String {
    "vocabulary_entries_backup".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StoreConfig {
    /// Key-value store directory, relative to the data dir
    #[serde(default = "default_dir_name")]
    pub dir_name: String,
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    /// Written after every successful save, read when the primary fails to decode
    #[serde(default = "default_backup_key")]
    pub backup_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir_name: default_dir_name(),
            primary_key: default_primary_key(),
            backup_key: default_backup_key(),
        }
    }
}
