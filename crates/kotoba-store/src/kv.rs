use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Blob storage addressed by string keys
pub trait KeyValueStore: Send {
    /// `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Replace the value under `key`. Readers see either the old or the new value.
    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()>;
}

/// One file per key inside a directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Atomic write: write to .tmp then rename.
    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-process store, mostly for tests and ephemeral sessions
#[derive(Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_reports_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("kv")).unwrap();

        assert_eq!(store.get("missing").unwrap(), None);

        store.set("words", b"[1]").unwrap();
        store.set("words", b"[1,2]").unwrap();
        assert_eq!(store.get("words").unwrap(), Some(b"[1,2]".to_vec()));
        assert!(!store.dir().join("words.tmp").exists());
    }
}
