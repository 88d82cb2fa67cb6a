use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::Movie,
    storage::{Persistence, StorageKey},
};

/// Ordered, duplicate-free list of saved movies
///
/// Movies are unique by `imdb_id` and kept in insertion order. Every change is persisted before it
/// becomes visible, so a failed write leaves the list as it was.
pub struct WatchList {
    persistence: Persistence,
    key: StorageKey,
    movies: RwLock<Vec<Movie>>,
}

impl WatchList {
    /// Loads the list stored under `key`
    pub async fn restore(persistence: Persistence, key: StorageKey) -> Self {
        let movies: Vec<Movie> = persistence.load(&key, Vec::new()).await;
        tracing::debug!(key = %key, movies = movies.len(), "Watch list restored");

        Self {
            persistence,
            key,
            movies: RwLock::new(movies),
        }
    }

    /// Appends `movie` unless a movie with the same id is already saved.
    /// Returns whether the list changed.
    pub async fn add(&self, movie: Movie) -> AppResult<bool> {
        let mut movies = self.movies.write().await;
        if movies.iter().any(|m| m.imdb_id == movie.imdb_id) {
            return Ok(false);
        }

        let mut updated = movies.clone();
        updated.push(movie);
        self.persistence.save(&self.key, &updated).await?;
        *movies = updated;
        Ok(true)
    }

    /// Removes the movie with `imdb_id`. Returns whether the list changed.
    pub async fn remove(&self, imdb_id: &str) -> AppResult<bool> {
        let mut movies = self.movies.write().await;
        if !movies.iter().any(|m| m.imdb_id == imdb_id) {
            return Ok(false);
        }

        let updated: Vec<Movie> = movies
            .iter()
            .filter(|m| m.imdb_id != imdb_id)
            .cloned()
            .collect();
        self.persistence.save(&self.key, &updated).await?;
        *movies = updated;
        Ok(true)
    }

    pub async fn contains(&self, imdb_id: &str) -> bool {
        self.movies.read().await.iter().any(|m| m.imdb_id == imdb_id)
    }

    pub async fn movies(&self) -> Vec<Movie> {
        self.movies.read().await.clone()
    }
}
