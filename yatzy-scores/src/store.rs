//! Key-value stores with get/set/subscribe semantics.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

use serde_json::Value;

use crate::ScoreError;

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Value>, ScoreError>;

    fn set(&mut self, key: &str, value: Value) -> Result<(), ScoreError>;

    /// All keys starting with `prefix`, in ascending order.
    fn keys(&self, prefix: &str) -> Result<Vec<String>, ScoreError>;

    /// Receive every value written to `key` from now on.
    fn subscribe(&mut self, key: &str) -> Receiver<Value>;
}

#[derive(Default)]
struct Subscribers {
    by_key: HashMap<String, Vec<Sender<Value>>>,
}

impl Subscribers {
    fn add(&mut self, key: &str) -> Receiver<Value> {
        let (tx, rx) = channel();
        self.by_key.entry(key.to_string()).or_default().push(tx);
        rx
    }

    fn notify(&mut self, key: &str, value: &Value) {
        if let Some(senders) = self.by_key.get_mut(key) {
            // Dropped receivers unsubscribe.
            senders.retain(|tx| tx.send(value.clone()).is_ok());
        }
    }
}

/// In-process store; nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    data: BTreeMap<String, Value>,
    subscribers: Subscribers,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, ScoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), ScoreError> {
        self.subscribers.notify(key, &value);
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>, ScoreError> {
        Ok(self
            .data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn subscribe(&mut self, key: &str) -> Receiver<Value> {
        self.subscribers.add(key)
    }
}

/// Whole store kept as one JSON object on disk.
///
/// Every `set` rewrites the file through a tmp file + rename, so a crash mid-write
/// leaves the previous document intact.
pub struct FileStore {
    path: PathBuf,
    data: BTreeMap<String, Value>,
    subscribers: Subscribers,
}

impl FileStore {
    /// Open `path`, starting empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScoreError> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let bytes = fs::read(&path)?;
            serde_json::from_slice(&bytes)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            data,
            subscribers: Subscribers::default(),
        })
    }

    fn write_atomic(&self) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(&self.data)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, ScoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), ScoreError> {
        let previous = self.data.insert(key.to_string(), value.clone());
        if let Err(e) = self.write_atomic() {
            // Keep memory in step with disk.
            match previous {
                Some(v) => self.data.insert(key.to_string(), v),
                None => self.data.remove(key),
            };
            return Err(e);
        }
        self.subscribers.notify(key, &value);
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>, ScoreError> {
        Ok(self
            .data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn subscribe(&mut self, key: &str) -> Receiver<Value> {
        self.subscribers.add(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_get_set_keys() {
        let mut s = MemoryStore::new();
        assert_eq!(s.get("a").unwrap(), None);
        s.set("players/b", json!(2)).unwrap();
        s.set("players/a", json!(1)).unwrap();
        s.set("meta", json!("x")).unwrap();
        assert_eq!(s.get("players/a").unwrap(), Some(json!(1)));
        assert_eq!(s.keys("players/").unwrap(), vec!["players/a", "players/b"]);
    }

    #[test]
    fn subscribers_see_later_writes_only_for_their_key() {
        let mut s = MemoryStore::new();
        s.set("k", json!(0)).unwrap();
        let rx = s.subscribe("k");
        s.set("other", json!(9)).unwrap();
        s.set("k", json!(1)).unwrap();
        s.set("k", json!(2)).unwrap();
        let got: Vec<Value> = rx.try_iter().collect();
        assert_eq!(got, vec![json!(1), json!(2)]);
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let mut s = MemoryStore::new();
        drop(s.subscribe("k"));
        s.set("k", json!(1)).unwrap();
        assert!(s.subscribers.by_key["k"].is_empty());
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        {
            let mut s = FileStore::open(&path).unwrap();
            s.set("players/ann", json!([1, 2])).unwrap();
        }
        let s = FileStore::open(&path).unwrap();
        assert_eq!(s.get("players/ann").unwrap(), Some(json!([1, 2])));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, b"{not json").unwrap();
        assert!(matches!(FileStore::open(&path), Err(ScoreError::Json(_))));
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the document should be makes the rename fail.
        let path = dir.path().join("scores.json");
        let mut s = FileStore::open(&path).unwrap();
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), b"x").unwrap();

        assert!(s.set("players/ann", json!(1)).is_err());
        assert_eq!(s.get("players/ann").unwrap(), None);
    }
}
