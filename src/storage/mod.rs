use std::fmt::Display;

use crate::error::AppResult;

pub mod memory;
pub mod persistence;
pub mod redis_store;

pub use memory::MemoryStore;
pub use persistence::Persistence;
pub use redis_store::{create_redis_client, RedisStore};

/// Logical keys under which client state is persisted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Identity of the logged-in user
    CurrentUser,
    /// Mock account directory
    Accounts,
    /// Saved movies, optionally partitioned by owner
    WatchList(Option<String>),
}

impl StorageKey {
    /// The watch list shared by every account
    pub fn shared_watch_list() -> Self {
        StorageKey::WatchList(None)
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::CurrentUser => write!(f, "currentUser"),
            StorageKey::Accounts => write!(f, "mockUsers"),
            StorageKey::WatchList(None) => write!(f, "myMovieList"),
            StorageKey::WatchList(Some(owner)) => write!(f, "myMovieList:{}", owner),
        }
    }
}

/// String key-value store backing the persistence adapter
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw value stored under `key`
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Deletes `key`. Deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_display_current_user() {
        assert_eq!(format!("{}", StorageKey::CurrentUser), "currentUser");
    }

    #[test]
    fn test_storage_key_display_accounts() {
        assert_eq!(format!("{}", StorageKey::Accounts), "mockUsers");
    }

    #[test]
    fn test_storage_key_display_shared_watch_list() {
        assert_eq!(
            format!("{}", StorageKey::shared_watch_list()),
            "myMovieList"
        );
    }

    #[test]
    fn test_storage_key_display_owned_watch_list() {
        let key = StorageKey::WatchList(Some("alice".to_string()));
        assert_eq!(format!("{}", key), "myMovieList:alice");
    }
}
