use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::AppResult,
    storage::{KeyValueStore, StorageKey},
};

/// Typed JSON access to the key-value store.
///
/// Reads are self-healing: a value that no longer decodes is logged, deleted and replaced by the
/// caller's default. Writes are last-writer-wins with no coordination between writers.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the value stored under `key`, or `default` when it is absent or unreadable
    pub async fn load<T: DeserializeOwned>(&self, key: &StorageKey, default: T) -> T {
        let raw_key = key.to_string();

        let raw = match self.store.get(&raw_key).await {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(e) => {
                tracing::error!(
                    key = %key,
                    backend = self.store.name(),
                    error = %e,
                    "Failed to read persisted value"
                );
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Discarding corrupt persisted value");
                if let Err(e) = self.store.remove(&raw_key).await {
                    tracing::warn!(key = %key, error = %e, "Failed to delete corrupt value");
                }
                default
            }
        }
    }

    /// Persists `value` as JSON. A value that serializes to `null` removes the key instead.
    pub async fn save<T: Serialize>(&self, key: &StorageKey, value: &T) -> AppResult<()> {
        let json = serde_json::to_value(value)?;
        if json.is_null() {
            return self.remove(key).await;
        }
        self.store.set(&key.to_string(), json.to_string()).await
    }

    pub async fn remove(&self, key: &StorageKey) -> AppResult<()> {
        self.store.remove(&key.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures::movie, Credentials, Movie, User};
    use crate::storage::MemoryStore;

    fn setup() -> (Arc<MemoryStore>, Persistence) {
        let store = Arc::new(MemoryStore::new());
        let persistence = Persistence::new(store.clone());
        (store, persistence)
    }

    #[tokio::test]
    async fn test_load_absent_returns_default() {
        let (_, persistence) = setup();
        let list: Vec<Movie> = persistence
            .load(&StorageKey::shared_watch_list(), Vec::new())
            .await;
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order() {
        let (_, persistence) = setup();
        let list = vec![
            movie("tt3", "Third"),
            movie("tt1", "First"),
            movie("tt2", "Second"),
        ];
        let key = StorageKey::shared_watch_list();

        persistence.save(&key, &list).await.unwrap();

        let reloaded = Persistence::new(persistence.store.clone());
        let loaded: Vec<Movie> = reloaded.load(&key, Vec::new()).await;
        assert_eq!(loaded, list);
    }

    #[tokio::test]
    async fn test_save_none_removes_key() {
        let (store, persistence) = setup();
        let key = StorageKey::CurrentUser;

        persistence.save(&key, &Some(User::new("alice"))).await.unwrap();
        assert!(store.get("currentUser").await.unwrap().is_some());

        persistence.save(&key, &None::<User>).await.unwrap();
        assert_eq!(store.get("currentUser").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_value_falls_back_and_is_deleted() {
        let keys = [
            StorageKey::CurrentUser,
            StorageKey::Accounts,
            StorageKey::shared_watch_list(),
        ];

        for key in keys {
            let (store, persistence) = setup();
            store
                .set(&key.to_string(), "{not json".to_string())
                .await
                .unwrap();

            match key {
                StorageKey::CurrentUser => {
                    let user: Option<User> = persistence.load(&key, None).await;
                    assert_eq!(user, None);
                }
                StorageKey::Accounts => {
                    let accounts: Vec<Credentials> = persistence.load(&key, Vec::new()).await;
                    assert!(accounts.is_empty());
                }
                StorageKey::WatchList(_) => {
                    let list: Vec<Movie> = persistence.load(&key, Vec::new()).await;
                    assert!(list.is_empty());
                }
            }

            assert_eq!(store.get(&key.to_string()).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_wrong_shape_is_treated_as_corrupt() {
        let (store, persistence) = setup();
        store
            .set("myMovieList", r#"{"username":"alice"}"#.to_string())
            .await
            .unwrap();

        let list: Vec<Movie> = persistence
            .load(&StorageKey::shared_watch_list(), Vec::new())
            .await;
        assert!(list.is_empty());
        assert_eq!(store.get("myMovieList").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_string_is_absent() {
        let (store, persistence) = setup();
        store.set("mockUsers", String::new()).await.unwrap();

        let accounts: Vec<Credentials> = persistence.load(&StorageKey::Accounts, Vec::new()).await;
        assert!(accounts.is_empty());
    }
}
