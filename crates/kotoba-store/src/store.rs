use chrono::{DateTime, Utc};
use kotoba_config::store::StoreConfig;
use kotoba_types::{AddOutcome, VocabularyDraft, VocabularyEntry};
use uuid::Uuid;

use crate::duplicate::find_duplicate;
use crate::error::StoreError;
use crate::filter::EntryFilter;
use crate::kv::KeyValueStore;

/// The user's vocabulary collection.
///
/// Every mutation writes the whole collection before it becomes visible in
/// memory, so a failed write leaves both copies as they were.
pub struct EntryStore {
    entries: Vec<VocabularyEntry>,
    backend: Box<dyn KeyValueStore>,
    primary_key: String,
    backup_key: String,
}

impl EntryStore {
    /// Load the collection from `backend`, falling back to the backup copy and
    /// then to an empty collection when nothing decodes.
    pub fn open(backend: Box<dyn KeyValueStore>, config: &StoreConfig) -> Self {
        let entries = load_collection(backend.as_ref(), &config.primary_key)
            .or_else(|| {
                tracing::warn!("Falling back to backup collection '{}'", config.backup_key);
                load_collection(backend.as_ref(), &config.backup_key)
            })
            .unwrap_or_else(|| {
                tracing::warn!("Starting with an empty collection");
                Vec::new()
            });

        tracing::info!("Loaded {} vocabulary entries", entries.len());

        Self {
            entries,
            backend,
            primary_key: config.primary_key.clone(),
            backup_key: config.backup_key.clone(),
        }
    }

    pub fn add(&mut self, draft: VocabularyDraft) -> Result<AddOutcome, StoreError> {
        self.add_at(draft, Utc::now())
    }

    /// Same as [`EntryStore::add`] with an explicit creation time
    pub fn add_at(
        &mut self,
        draft: VocabularyDraft,
        now: DateTime<Utc>,
    ) -> Result<AddOutcome, StoreError> {
        if let Some(existing) = find_duplicate(&draft, &self.entries) {
            tracing::info!(
                "Rejected '{}' as duplicate of '{}'",
                draft.headword,
                existing.headword
            );
            return Ok(AddOutcome::RejectedAsDuplicate {
                existing: existing.id,
            });
        }

        let mut entry = VocabularyEntry::from_draft(draft, now);
        while self.entries.iter().any(|e| e.id == entry.id) {
            entry.id = Uuid::new_v4();
        }

        let mut next = self.entries.clone();
        next.push(entry.clone());
        self.commit(next)?;

        tracing::info!("Added '{}' ({})", entry.headword, entry.id);
        Ok(AddOutcome::Accepted(entry))
    }

    /// Replace the entry with the same id. Returns `false` without writing when
    /// no such entry exists. The original `date_added` is kept.
    pub fn update(&mut self, entry: VocabularyEntry) -> Result<bool, StoreError> {
        let Some(index) = self.entries.iter().position(|e| e.id == entry.id) else {
            tracing::debug!("Update for unknown id {} ignored", entry.id);
            return Ok(false);
        };

        let mut next = self.entries.clone();
        let date_added = next[index].date_added;
        next[index] = VocabularyEntry { date_added, ..entry };
        self.commit(next)?;
        Ok(true)
    }

    /// Remove the entry with `id`. Returns `false` without writing when absent.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        if !self.entries.iter().any(|e| e.id == id) {
            tracing::debug!("Delete for unknown id {} ignored", id);
            return Ok(false);
        }

        let next: Vec<_> = self.entries.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(next)?;
        Ok(true)
    }

    pub fn get(&self, id: Uuid) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries, newest first
    pub fn all(&self) -> Vec<VocabularyEntry> {
        self.filter(&EntryFilter::default())
    }

    /// Matching entries, newest first
    pub fn filter(&self, filter: &EntryFilter) -> Vec<VocabularyEntry> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn commit(&mut self, next: Vec<VocabularyEntry>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&next)?;

        self.backend.set(&self.primary_key, &bytes)?;
        if let Err(e) = self.backend.set(&self.backup_key, &bytes) {
            tracing::warn!("Failed to write backup collection: {}", e);
        }

        self.entries = next;
        Ok(())
    }
}

fn load_collection(backend: &dyn KeyValueStore, key: &str) -> Option<Vec<VocabularyEntry>> {
    let bytes = match backend.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::debug!("No stored collection under '{}'", key);
            return None;
        }
        Err(e) => {
            tracing::warn!("Failed to read collection '{}': {}", key, e);
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::warn!("Failed to decode collection '{}': {}", key, e);
            None
        }
    }
}
