//! Typed, ordered collections on top of a key-value backend.
//!
//! # Responsibility
//! - Load, append and remove records of one named collection.
//! - Decode both id-wrapped entries and bare records written by older clients.
//!
//! # Invariants
//! - Every mutation is one load-modify-store cycle inside `exclusive`.
//! - A missing or non-array stored value reads as an empty collection.
//! - Removing an unknown id or out-of-range index changes nothing.

use crate::model::collection::{Collection, CollectionKey};
use crate::model::record::{Entry, RecordId};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Namespace for ids derived from bare stored records.
const LEGACY_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6c0e_2f4a_9b1d_4e57_8a3c_51f0_d2b7_9e14);

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry<T> {
    Tracked(Entry<T>),
    Bare(T),
}

/// Ordered record collections persisted through a `KeyValueStore`.
#[derive(Debug, Clone, Copy)]
pub struct CollectionStore<S> {
    kv: S,
}

impl<S: KeyValueStore> CollectionStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Returns the backend this store writes through.
    pub fn backend(&self) -> &S {
        &self.kv
    }

    /// Loads every entry of `collection` in insertion order.
    ///
    /// Returns an empty list when nothing is stored or the stored value is
    /// not an array. Array elements that do not match the record shape are
    /// skipped.
    pub fn load_all<T>(&self, collection: Collection<T>) -> RepoResult<Vec<Entry<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        read_entries(&self.kv, collection.key())
    }

    /// Appends one record under a fresh id and returns the stored entry.
    pub fn append<T>(&self, collection: Collection<T>, item: T) -> RepoResult<Entry<T>>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let mut appended = self.append_many(collection, vec![item])?;
        Ok(appended.remove(0))
    }

    /// Appends a batch of records with a single rewrite of the collection.
    pub fn append_many<T>(
        &self,
        collection: Collection<T>,
        items: Vec<T>,
    ) -> RepoResult<Vec<Entry<T>>>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let key = collection.key();
        let added: Vec<Entry<T>> = items.into_iter().map(Entry::new).collect();
        self.kv.exclusive(|kv| {
            let mut entries = read_entries::<S, T>(kv, key)?;
            entries.extend(added.iter().cloned());
            write_entries(kv, key, &entries)?;
            debug!(
                "event=collection_append module=repo status=ok key={key} added={} len={}",
                added.len(),
                entries.len()
            );
            Ok(())
        })?;
        Ok(added)
    }

    /// Removes the entry at `index` of the currently stored sequence.
    ///
    /// Returns `None` and writes nothing when `index` is out of range.
    pub fn remove_at<T>(
        &self,
        collection: Collection<T>,
        index: usize,
    ) -> RepoResult<Option<Entry<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        self.remove_where(collection, |entries| (index < entries.len()).then_some(index))
    }

    /// Removes the entry with `id`.
    ///
    /// Returns `None` and writes nothing when no entry has that id.
    pub fn remove_by_id<T>(
        &self,
        collection: Collection<T>,
        id: RecordId,
    ) -> RepoResult<Option<Entry<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        self.remove_where(collection, |entries| {
            entries.iter().position(|entry| entry.id == id)
        })
    }

    /// Persists an empty sequence for `collection`.
    pub fn clear<T>(&self, collection: Collection<T>) -> RepoResult<()>
    where
        T: Serialize,
    {
        let key = collection.key();
        self.kv.exclusive(|kv| write_entries::<S, T>(kv, key, &[]))?;
        debug!("event=collection_clear module=repo status=ok key={key}");
        Ok(())
    }

    fn remove_where<T>(
        &self,
        collection: Collection<T>,
        locate: impl FnOnce(&[Entry<T>]) -> Option<usize>,
    ) -> RepoResult<Option<Entry<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        let key = collection.key();
        self.kv.exclusive(|kv| {
            let mut entries = read_entries::<S, T>(kv, key)?;
            let Some(position) = locate(&entries) else {
                warn!(
                    "event=collection_remove module=repo status=skipped key={key} len={} reason=no_match",
                    entries.len()
                );
                return Ok(None);
            };
            let removed = entries.remove(position);
            write_entries(kv, key, &entries)?;
            debug!(
                "event=collection_remove module=repo status=ok key={key} index={position} len={}",
                entries.len()
            );
            Ok(Some(removed))
        })
    }
}

fn read_entries<S, T>(kv: &S, key: CollectionKey) -> RepoResult<Vec<Entry<T>>>
where
    S: KeyValueStore,
    T: Serialize + DeserializeOwned,
{
    let Some(raw) = kv.get(key.as_str())? else {
        return Ok(Vec::new());
    };
    Ok(decode_entries(key, &raw))
}

fn write_entries<S, T>(kv: &S, key: CollectionKey, entries: &[Entry<T>]) -> RepoResult<()>
where
    S: KeyValueStore,
    T: Serialize,
{
    let encoded = serde_json::to_string(entries)?;
    kv.set(key.as_str(), &encoded)
}

/// Decodes a stored value, degrading to empty instead of failing.
fn decode_entries<T>(key: CollectionKey, raw: &str) -> Vec<Entry<T>>
where
    T: Serialize + DeserializeOwned,
{
    let elements = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(elements)) => elements,
        Ok(_) => {
            warn!("event=collection_decode module=repo status=fallback key={key} reason=not_array");
            return Vec::new();
        }
        Err(_) => {
            warn!("event=collection_decode module=repo status=fallback key={key} reason=invalid_json");
            return Vec::new();
        }
    };

    let total = elements.len();
    let mut entries = Vec::with_capacity(total);
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<StoredEntry<T>>(element) {
            Ok(StoredEntry::Tracked(entry)) => entries.push(entry),
            Ok(StoredEntry::Bare(item)) => {
                let id = legacy_id(key, index, &item);
                entries.push(Entry { id, item });
            }
            Err(_) => {}
        }
    }

    if entries.len() != total {
        warn!(
            "event=collection_decode module=repo status=partial key={key} skipped={}",
            total - entries.len()
        );
    }
    entries
}

/// Derives a deterministic id for a record stored without one, so the id
/// stays the same across reads until the collection is rewritten.
fn legacy_id<T: Serialize>(key: CollectionKey, index: usize, item: &T) -> RecordId {
    let body = serde_json::to_string(item).unwrap_or_default();
    let name = format!("{key}:{index}:{body}");
    Uuid::new_v5(&LEGACY_ID_NAMESPACE, name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::decode_entries;
    use crate::model::collection::CollectionKey;
    use crate::model::record::{Entry, TaskRecord};

    #[test]
    fn decode_accepts_bare_and_wrapped_records() {
        let raw = r#"[
            {"text":"bare"},
            {"id":"6f1c9a52-1d0b-4c55-9f59-2b6a8a3e0c11","item":{"text":"wrapped"}}
        ]"#;
        let entries: Vec<Entry<TaskRecord>> = decode_entries(CollectionKey::DailyTasks, raw);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item.text, "bare");
        assert_eq!(
            entries[1].id.to_string(),
            "6f1c9a52-1d0b-4c55-9f59-2b6a8a3e0c11"
        );
    }

    #[test]
    fn decode_ids_for_bare_records_are_deterministic() {
        let raw = r#"["one","two"]"#;
        let first: Vec<Entry<String>> = decode_entries(CollectionKey::Notes, raw);
        let second: Vec<Entry<String>> = decode_entries(CollectionKey::Notes, raw);
        assert_eq!(first, second);
        assert_ne!(first[0].id, first[1].id);
    }

    #[test]
    fn decode_skips_elements_with_wrong_shape() {
        let raw = r#"["kept", 42, null]"#;
        let entries: Vec<Entry<String>> = decode_entries(CollectionKey::Notes, raw);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item, "kept");
    }

    #[test]
    fn decode_non_array_is_empty() {
        for raw in ["{}", "\"notes\"", "not json", ""] {
            let entries: Vec<Entry<String>> = decode_entries(CollectionKey::Notes, raw);
            assert!(entries.is_empty(), "`{raw}` should decode as empty");
        }
    }
}
