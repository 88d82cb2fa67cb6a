use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        providers::{MovieApi, OmdbProvider},
        AccountRegistry, ResultBoard, ResultSlot, SearchEngine, SessionState, SimilarTitles,
        WatchList,
    },
    storage::{create_redis_client, KeyValueStore, MemoryStore, Persistence, RedisStore, StorageKey},
};

/// Shared application state
///
/// Owns every stateful component; handlers receive it by reference through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub search: SearchEngine,
    pub similar: SimilarTitles,
    pub session: Arc<SessionState>,
    pub accounts: Arc<AccountRegistry>,
    pub watch_list: Arc<WatchList>,
    pub search_results: Arc<ResultSlot>,
    pub similar_results: Arc<ResultBoard>,
}

impl AppState {
    /// Wires the components together over the given collaborators
    pub async fn new(
        api: Arc<dyn MovieApi>,
        store: Arc<dyn KeyValueStore>,
        discard_stale_results: bool,
    ) -> Self {
        let persistence = Persistence::new(store);
        let session = Arc::new(SessionState::restore(persistence.clone()).await);
        let accounts = Arc::new(AccountRegistry::new(persistence.clone(), session.clone()));
        // One list for every account; see StorageKey::WatchList for per-user keys.
        let watch_list =
            Arc::new(WatchList::restore(persistence, StorageKey::shared_watch_list()).await);

        Self {
            search: SearchEngine::new(api.clone()),
            similar: SimilarTitles::new(api),
            session,
            accounts,
            watch_list,
            search_results: Arc::new(ResultSlot::new(discard_stale_results)),
            similar_results: Arc::new(ResultBoard::new(discard_stale_results)),
        }
    }

    /// Builds the state for a deployment described by `config`
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api: Arc<dyn MovieApi> = Arc::new(OmdbProvider::new(
            config.omdb_api_key.clone(),
            config.omdb_api_url.clone(),
        ));

        let store: Arc<dyn KeyValueStore> = match &config.redis_url {
            Some(redis_url) => Arc::new(RedisStore::new(create_redis_client(redis_url)?)),
            None => Arc::new(MemoryStore::new()),
        };

        tracing::info!(
            storage = store.name(),
            provider = api.name(),
            discard_stale_results = config.discard_stale_results,
            "Initializing application state"
        );

        Ok(Self::new(api, store, config.discard_stale_results).await)
    }
}
