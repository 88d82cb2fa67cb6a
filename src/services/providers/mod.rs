//! Remote movie API abstraction
//!
//! The search engine and the similar-title deriver only depend on this trait, so tests can swap in
//! a mock and deployments can point at any OMDb-compatible endpoint.

use crate::{
    error::AppResult,
    models::{OmdbSearchResponse, TitleKind},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for remote movie search backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieApi: Send + Sync {
    /// Issues exactly one search request for `keyword`, optionally restricted to `kind`
    ///
    /// Returns the decoded upstream reply, including negative replies (`Response == "False"`).
    /// Transport failures and undecodable bodies are returned as errors.
    async fn search(&self, keyword: &str, kind: Option<TitleKind>)
        -> AppResult<OmdbSearchResponse>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
