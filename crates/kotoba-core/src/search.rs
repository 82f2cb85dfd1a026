use std::collections::HashSet;
use std::num::NonZeroUsize;

use kotoba_config::search::SearchConfig;
use kotoba_types::LexiconEntry;
use lru::LruCache;

use crate::lexicon::Lexicon;
use crate::preprocess::normalize_query;

/// Hard ceiling on results for one query, whatever the config says
pub const MAX_RESULTS_LIMIT: usize = 100;

const MIN_CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::MIN;

/// Counters for observing cache behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Full passes over the lexicons
    pub scans: u64,
    pub cache_hits: u64,
}

/// Substring search over the core lexicon and, once installed, the large one.
///
/// Results are core matches first, then large-lexicon matches, with later
/// entries sharing a (headword, romaji) key dropped. Computed result lists are
/// kept in an LRU cache under their normalized query until a lexicon is replaced.
pub struct SearchEngine {
    core: Lexicon,
    large: Option<Lexicon>,
    cache: LruCache<String, Vec<LexiconEntry>>,
    max_results: usize,
    stats: SearchStats,
}

impl SearchEngine {
    pub fn new(core: Lexicon, config: &SearchConfig) -> Self {
        let max_results = config.max_results.clamp(1, MAX_RESULTS_LIMIT);
        if max_results != config.max_results {
            tracing::warn!(
                "max_results {} out of range, using {}",
                config.max_results,
                max_results
            );
        }

        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(MIN_CACHE_CAPACITY);

        Self {
            core,
            large: None,
            cache: LruCache::new(capacity),
            max_results,
            stats: SearchStats::default(),
        }
    }

    pub fn search(&mut self, query: &str) -> Vec<LexiconEntry> {
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            return Vec::new();
        }

        if let Some(cached) = self.cache.get(&normalized) {
            self.stats.cache_hits += 1;
            tracing::debug!("Cache hit for '{}' ({} results)", normalized, cached.len());
            return cached.clone();
        }

        let results = self.scan(&normalized);
        tracing::debug!("Scanned for '{}': {} results", normalized, results.len());

        self.cache.put(normalized, results.clone());
        results
    }

    fn scan(&mut self, query: &str) -> Vec<LexiconEntry> {
        self.stats.scans += 1;

        let candidates = self.core.matching(query).chain(
            self.large
                .iter()
                .flat_map(move |large| large.matching(query)),
        );

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for entry in candidates {
            if results.len() >= self.max_results {
                break;
            }
            if seen.insert(entry.dedup_key()) {
                results.push(entry.clone());
            }
        }

        results
    }

    /// Swap in a freshly loaded large lexicon. Cached results are dropped.
    pub fn install_large(&mut self, lexicon: Lexicon) {
        tracing::info!(
            "Installing large lexicon '{}' with {} entries",
            lexicon.name(),
            lexicon.len()
        );
        self.large = Some(lexicon);
        self.clear_cache();
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn core_len(&self) -> usize {
        self.core.len()
    }

    /// Entry count of the large lexicon, if one has been installed
    pub fn large_len(&self) -> Option<usize> {
        self.large.as_ref().map(Lexicon::len)
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}
