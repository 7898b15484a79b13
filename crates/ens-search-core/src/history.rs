use std::cmp::Reverse;
use std::sync::RwLock;
use time::OffsetDateTime;

use crate::item::{HistoryItem, NameType};
use crate::Result;

pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Where previously selected suggestions live.
///
/// Inserting an entry that already exists (same text and name type) moves it
/// to the end with the new timestamp instead of duplicating it.
pub trait HistoryStore: Send + Sync {
    /// Entries in insertion order (oldest first).
    fn list(&self) -> Result<Vec<HistoryItem>>;
    fn record_at(
        &self,
        text: &str,
        name_type: NameType,
        is_valid: Option<bool>,
        last_accessed: i64,
    ) -> Result<HistoryItem>;
    fn remove(&self, text: &str, name_type: NameType) -> Result<bool>;
    fn clear(&self) -> Result<()>;
    /// Keep only the `max_items` most recently accessed entries.
    fn prune(&self, max_items: usize) -> Result<usize>;

    fn record(&self, text: &str, name_type: NameType, is_valid: Option<bool>) -> Result<HistoryItem> {
        self.record_at(text, name_type, is_valid, now_millis())
    }

    /// Entries, most recent first; equal timestamps list the later insertion first.
    fn recent(&self, limit: Option<usize>) -> Result<Vec<HistoryItem>> {
        let mut items = self.list()?;
        items.reverse();
        items.sort_by_key(|h| Reverse(h.last_accessed));
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }
}

pub(crate) fn upsert(
    items: &mut Vec<HistoryItem>,
    text: &str,
    name_type: NameType,
    is_valid: Option<bool>,
    last_accessed: i64,
) -> HistoryItem {
    items.retain(|h| !h.same_entry(text, name_type));
    let item = HistoryItem {
        text: text.to_string(),
        name_type,
        last_accessed,
        is_valid,
    };
    items.push(item.clone());
    item
}

pub(crate) fn prune_vec(items: &mut Vec<HistoryItem>, max_items: usize) -> usize {
    let before = items.len();
    if before <= max_items {
        return 0;
    }
    // newest first; on equal timestamps the later insertion wins
    let mut order: Vec<usize> = (0..before).collect();
    order.sort_by_key(|&i| Reverse((items[i].last_accessed, i)));
    let mut keep = vec![false; before];
    for &i in order.iter().take(max_items) {
        keep[i] = true;
    }
    let mut idx = 0;
    items.retain(|_| {
        idx += 1;
        keep[idx - 1]
    });
    before - items.len()
}

#[derive(Default)]
pub struct MemHistory {
    inner: RwLock<Vec<HistoryItem>>,
}

impl MemHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<HistoryItem>) -> Self {
        Self {
            inner: RwLock::new(items),
        }
    }
}

impl HistoryStore for MemHistory {
    fn list(&self) -> Result<Vec<HistoryItem>> {
        Ok(self.inner.read().expect("poisoned").clone())
    }

    fn record_at(
        &self,
        text: &str,
        name_type: NameType,
        is_valid: Option<bool>,
        last_accessed: i64,
    ) -> Result<HistoryItem> {
        let mut v = self.inner.write().expect("poisoned");
        Ok(upsert(&mut v, text, name_type, is_valid, last_accessed))
    }

    fn remove(&self, text: &str, name_type: NameType) -> Result<bool> {
        let mut v = self.inner.write().expect("poisoned");
        let before = v.len();
        v.retain(|h| !h.same_entry(text, name_type));
        Ok(v.len() != before)
    }

    fn clear(&self) -> Result<()> {
        self.inner.write().expect("poisoned").clear();
        Ok(())
    }

    fn prune(&self, max_items: usize) -> Result<usize> {
        let mut v = self.inner.write().expect("poisoned");
        Ok(prune_vec(&mut v, max_items))
    }
}

#[cfg(feature = "file-store")]
mod file_store {
    use super::*;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    pub const HISTORY_FILE_NAME: &str = "search-history-v2.json";

    /// History kept as a JSON array on disk, in the same shape the browser
    /// keeps under its `search-history-v2` key.
    pub struct FileHistory {
        path: PathBuf,
        lock: Mutex<()>,
    }

    impl FileHistory {
        pub fn new<P: AsRef<Path>>(path: P) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
                lock: Mutex::new(()),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read(&self) -> Result<Vec<HistoryItem>> {
            match fs::read_to_string(&self.path) {
                Ok(s) if s.trim().is_empty() => Ok(Vec::new()),
                Ok(s) => Ok(serde_json::from_str(&s)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn write(&self, items: &[HistoryItem]) -> Result<()> {
            if let Some(dir) = self.path.parent() {
                if !dir.as_os_str().is_empty() {
                    fs::create_dir_all(dir)?;
                }
            }
            let tmp = self.path.with_extension("json.tmp");
            fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
            fs::rename(&tmp, &self.path)?;
            tracing::debug!(path = %self.path.display(), entries = items.len(), "history written");
            Ok(())
        }

        fn update<R>(&self, f: impl FnOnce(&mut Vec<HistoryItem>) -> R) -> Result<R> {
            let _guard = self.lock.lock().expect("poisoned");
            let mut items = self.read()?;
            let out = f(&mut items);
            self.write(&items)?;
            Ok(out)
        }
    }

    impl HistoryStore for FileHistory {
        fn list(&self) -> Result<Vec<HistoryItem>> {
            let _guard = self.lock.lock().expect("poisoned");
            self.read()
        }

        fn record_at(
            &self,
            text: &str,
            name_type: NameType,
            is_valid: Option<bool>,
            last_accessed: i64,
        ) -> Result<HistoryItem> {
            let item = self.update(|v| upsert(v, text, name_type, is_valid, last_accessed))?;
            tracing::info!(text, %name_type, "recorded search history");
            Ok(item)
        }

        fn remove(&self, text: &str, name_type: NameType) -> Result<bool> {
            self.update(|v| {
                let before = v.len();
                v.retain(|h| !h.same_entry(text, name_type));
                v.len() != before
            })
        }

        /// Overwrites the file without reading it, so a corrupt file can be
        /// reset.
        fn clear(&self) -> Result<()> {
            let _guard = self.lock.lock().expect("poisoned");
            self.write(&[])
        }

        fn prune(&self, max_items: usize) -> Result<usize> {
            self.update(|v| prune_vec(v, max_items))
        }
    }
}

#[cfg(feature = "file-store")]
pub use file_store::{FileHistory, HISTORY_FILE_NAME};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_dedups_and_refreshes_timestamp() {
        let store = MemHistory::new();
        store.record_at("a.eth", NameType::Eth, None, 1).unwrap();
        store.record_at("b.eth", NameType::Eth, None, 2).unwrap();
        store.record_at("a.eth", NameType::Eth, None, 3).unwrap();
        let items = store.list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text, "a.eth");
        assert_eq!(items[1].last_accessed, 3);
    }

    #[test]
    fn same_text_different_type_is_separate() {
        let store = MemHistory::new();
        store.record_at("a.eth", NameType::Eth, None, 1).unwrap();
        store.record_at("a.eth", NameType::Dns, None, 2).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
        assert!(store.remove("a.eth", NameType::Dns).unwrap());
        assert!(!store.remove("a.eth", NameType::Dns).unwrap());
    }

    #[test]
    fn prune_keeps_most_recent() {
        let store = MemHistory::new();
        for (i, t) in [5, 1, 4, 2, 3].iter().enumerate() {
            store
                .record_at(&format!("n{i}.eth"), NameType::Eth, None, *t)
                .unwrap();
        }
        assert_eq!(store.prune(2).unwrap(), 3);
        let texts: Vec<_> = store.recent(None).unwrap().into_iter().map(|h| h.text).collect();
        assert_eq!(texts, ["n0.eth", "n2.eth"]);
        assert_eq!(store.prune(0).unwrap(), 2);
        assert!(store.list().unwrap().is_empty());
    }
}
