use std::sync::Arc;

use crate::{
    models::{ApiFlag, SearchOutcome},
    services::providers::MovieApi,
};

pub const EMPTY_KEYWORD: &str = "Please enter something...";
pub const NO_RESULTS: &str = "No results found";
pub const FETCH_FAILED: &str = "Failed to fetch movies. Check your connection.";

/// Keyword search against the remote movie API
///
/// Every call resolves to a [`SearchOutcome`]; upstream and transport faults are reported in its
/// `error` field rather than as `Err`.
#[derive(Clone)]
pub struct SearchEngine {
    api: Arc<dyn MovieApi>,
}

impl SearchEngine {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self { api }
    }

    /// Searches for `keyword`. Blank keywords are rejected without a remote call.
    pub async fn search(&self, keyword: &str) -> SearchOutcome {
        if keyword.trim().is_empty() {
            return SearchOutcome::failed(EMPTY_KEYWORD);
        }

        match self.api.search(keyword, None).await {
            Ok(response) => match response.response {
                ApiFlag::True => {
                    let movies = response.search.unwrap_or_default();
                    tracing::info!(
                        keyword = %keyword,
                        results = movies.len(),
                        provider = self.api.name(),
                        "Movie search completed"
                    );
                    SearchOutcome::found(movies)
                }
                ApiFlag::False => {
                    let message = response.error.unwrap_or_else(|| NO_RESULTS.to_string());
                    tracing::info!(keyword = %keyword, message = %message, "Movie search returned no results");
                    SearchOutcome::failed(message)
                }
            },
            Err(e) => {
                tracing::error!(keyword = %keyword, error = %e, "Failed to fetch movies");
                SearchOutcome::failed(FETCH_FAILED)
            }
        }
    }
}
