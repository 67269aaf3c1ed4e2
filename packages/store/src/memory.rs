use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::backend::Backend;
use crate::error::StoreError;
use crate::models::{Record, Singleton};

/// In-memory Backend for testing and local development.
///
/// Clones share the same data. [`set_available`](Self::set_available) and
/// [`fail_next`](Self::fail_next) simulate an outage of the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<&'static str, Vec<Value>>>>,
    singletons: Arc<Mutex<HashMap<&'static str, Value>>>,
    down: Arc<AtomicBool>,
    failures: Arc<AtomicUsize>,
    calls: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.down.store(!available, Ordering::SeqCst);
    }

    /// Make the next `n` calls fail with a transient error.
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    /// Number of calls made, pings included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unreachable("memory store is down".into()));
        }
        let pending = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if pending.is_ok() {
            return Err(StoreError::Unreachable("injected failure".into()));
        }
        Ok(())
    }

    fn collections(&self) -> MutexGuard<'_, HashMap<&'static str, Vec<Value>>> {
        self.collections.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn position(rows: &[Value], id: &str) -> Option<usize> {
    rows.iter()
        .position(|row| row.get("id").and_then(Value::as_str) == Some(id))
}

impl Backend for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.enter()
    }

    async fn list<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        self.enter()?;
        let collections = self.collections();
        let rows = collections.get(T::COLLECTION).cloned().unwrap_or_default();
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }

    async fn get<T: Record>(&self, id: &str) -> Result<Option<T>, StoreError> {
        self.enter()?;
        let collections = self.collections();
        let Some(rows) = collections.get(T::COLLECTION) else {
            return Ok(None);
        };
        match position(rows, id) {
            Some(i) => Ok(Some(serde_json::from_value(rows[i].clone())?)),
            None => Ok(None),
        }
    }

    async fn insert<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        self.enter()?;
        let value = serde_json::to_value(record)?;
        let mut collections = self.collections();
        let rows = collections.entry(T::COLLECTION).or_default();
        if position(rows, record.id()).is_some() {
            return Err(StoreError::Conflict {
                collection: T::COLLECTION,
                id: record.id().to_string(),
            });
        }
        rows.push(value);
        Ok(())
    }

    async fn replace<T: Record>(&self, record: &T) -> Result<bool, StoreError> {
        self.enter()?;
        let value = serde_json::to_value(record)?;
        let mut collections = self.collections();
        let rows = collections.entry(T::COLLECTION).or_default();
        match position(rows, record.id()) {
            Some(i) => {
                rows[i] = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove<T: Record>(&self, id: &str) -> Result<bool, StoreError> {
        self.enter()?;
        let mut collections = self.collections();
        let rows = collections.entry(T::COLLECTION).or_default();
        match position(rows, id) {
            Some(i) => {
                rows.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn load<T: Singleton>(&self) -> Result<Option<T>, StoreError> {
        self.enter()?;
        let singletons = self.singletons.lock().unwrap_or_else(|e| e.into_inner());
        match singletons.get(T::COLLECTION) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    async fn save<T: Singleton>(&self, value: &T) -> Result<(), StoreError> {
        self.enter()?;
        let value = serde_json::to_value(value)?;
        self.singletons
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(T::COLLECTION, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Link, LinkCategory, Profile};

    fn link(id: &str) -> Link {
        Link {
            id: id.to_string(),
            name: format!("Link {id}"),
            url: format!("https://example.com/{id}"),
            icon: String::new(),
            category: LinkCategory::Work,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_keep_order() {
        let store = MemoryStore::new();
        assert!(store.list::<Link>().await.unwrap().is_empty());

        store.insert(&link("b")).await.unwrap();
        store.insert(&link("a")).await.unwrap();

        let links = store.list::<Link>().await.unwrap();
        let ids: Vec<&str> = links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let store = MemoryStore::new();
        store.insert(&link("a")).await.unwrap();
        let err = store.insert(&link("a")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_replace_and_remove() {
        let store = MemoryStore::new();
        assert!(!store.replace(&link("a")).await.unwrap());

        store.insert(&link("a")).await.unwrap();
        let mut edited = link("a");
        edited.name = "Renamed".into();
        assert!(store.replace(&edited).await.unwrap());
        assert_eq!(
            store.get::<Link>("a").await.unwrap().unwrap().name,
            "Renamed"
        );

        assert!(store.remove::<Link>("a").await.unwrap());
        assert!(!store.remove::<Link>("a").await.unwrap());
        assert!(store.get::<Link>("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_singleton() {
        let store = MemoryStore::new();
        assert!(store.load::<Profile>().await.unwrap().is_none());

        let profile = Profile {
            name: "Ada".into(),
            title: "Engineer".into(),
            ..Default::default()
        };
        store.save(&profile).await.unwrap();
        assert_eq!(store.load::<Profile>().await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_outage_simulation() {
        let store = MemoryStore::new();
        store.set_available(false);
        assert!(store.ping().await.unwrap_err().is_transient());
        store.set_available(true);
        assert!(store.ping().await.is_ok());

        store.fail_next(2);
        assert!(store.ping().await.is_err());
        assert!(store.ping().await.is_err());
        assert!(store.ping().await.is_ok());
        assert_eq!(store.calls(), 5);
    }
}
