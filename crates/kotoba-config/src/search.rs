use std::env;

use serde::{Deserialize, Serialize};

fn default_max_results() -> usize {
    100
}

fn default_cache_capacity() -> usize {
    256
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SearchConfig {
    /// Results returned for one query. The engine clamps this to `1..=100`.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Distinct queries kept in the result cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        let max_results = env::var("KOTOBA_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or_else(default_max_results);

        let cache_capacity = env::var("KOTOBA_SEARCH_CACHE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or_else(default_cache_capacity);

        Self {
            max_results,
            cache_capacity,
        }
    }
}
