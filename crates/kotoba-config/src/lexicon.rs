use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_core_enabled() -> bool {
    true
}

fn default_jmdict_url() -> String {
    "https://github.com/scriptin/jmdict-simplified/releases/latest/download/jmdict-eng.json"
        .to_string()
}

fn default_payload_file() -> String {
    "jmdict-eng.json".to_string()
}

fn default_fetch_timeout_seconds() -> u64 {
    600
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct LexiconConfig {
    /// Load the bundled core lexicon at startup
    #[serde(default = "default_core_enabled")]
    pub core_enabled: bool,
    /// Replace the bundled core lexicon with a file on disk
    #[serde(default)]
    pub core_path: Option<String>,
    /// Where the large dictionary payload is downloaded from
    #[serde(default = "default_jmdict_url")]
    pub jmdict_url: String,
    /// File name of the downloaded payload, relative to the data dir
    #[serde(default = "default_payload_file")]
    pub payload_file: String,
    #[serde(default = "default_fetch_timeout_seconds")]
    pub fetch_timeout_seconds: u64,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            core_enabled: default_core_enabled(),
            core_path: None,
            jmdict_url: default_jmdict_url(),
            payload_file: default_payload_file(),
            fetch_timeout_seconds: default_fetch_timeout_seconds(),
        }
    }
}

impl LexiconConfig {
    pub fn new() -> Self {
        let jmdict_url = env::var("KOTOBA_JMDICT_URL").unwrap_or_else(|_| default_jmdict_url());

        let core_path = env::var("KOTOBA_CORE_LEXICON").ok();

        let fetch_timeout_seconds = env::var("KOTOBA_FETCH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_fetch_timeout_seconds);

        Self {
            core_path,
            jmdict_url,
            fetch_timeout_seconds,
            ..Self::default()
        }
    }

    pub fn payload_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.payload_file)
    }
}
