use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::lexicon::LexiconConfig;
use self::search::SearchConfig;
use self::store::StoreConfig;

pub mod lexicon;
pub mod search;
pub mod store;

fn default_data_dir() -> String {
    "kotoba-data".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub lexicon: LexiconConfig,
    pub store: StoreConfig,
    pub search: SearchConfig,

    /// Root directory for the downloaded payload and the user collection
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// `tracing` filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Capacity of the presentation <-> app channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lexicon: LexiconConfig::default(),
            store: StoreConfig::default(),
            search: SearchConfig::default(),
            data_dir: default_data_dir(),
            log_filter: default_log_filter(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let data_dir = env::var("KOTOBA_DATA_DIR").unwrap_or_else(|_| default_data_dir());

        let log_filter = env::var("KOTOBA_LOG").unwrap_or_else(|_| default_log_filter());

        Config {
            lexicon: LexiconConfig::new(),
            store: StoreConfig::default(),
            search: SearchConfig::new(),

            data_dir,
            log_filter,
            channel_capacity: default_channel_capacity(),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Path of the downloaded large dictionary payload
    pub fn payload_path(&self) -> PathBuf {
        self.lexicon.payload_path(&self.data_dir())
    }

    /// Directory backing the user collection key-value store
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir().join(&self.store.dir_name)
    }
}
