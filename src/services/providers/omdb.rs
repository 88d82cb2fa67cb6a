//! OMDb API provider
//!
//! Single endpoint: `GET {api_url}/?apikey=..&s=<keyword>[&type=movie]`.
//! OMDb reports most failures (invalid key, no match, too many results) inside a JSON body with
//! `Response: "False"`, sometimes alongside a non-2xx status, so the body is decoded regardless of
//! status and only an undecodable body is treated as a fault.

use crate::{
    error::{AppError, AppResult},
    models::{OmdbSearchResponse, TitleKind},
    services::providers::MovieApi,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.api_url.trim_end_matches('/'))
    }

    fn query_params<'a>(
        &'a self,
        keyword: &'a str,
        kind: Option<TitleKind>,
    ) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("apikey", self.api_key.as_str()), ("s", keyword)];
        if let Some(kind) = kind {
            params.push(("type", kind.as_str()));
        }
        params
    }

    fn decode(status: reqwest::StatusCode, body: &str) -> AppResult<OmdbSearchResponse> {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(
                status = %status,
                error = %e,
                response = %body,
                "Failed to deserialize OMDb response"
            );
            AppError::ExternalApi(format!(
                "OMDb returned an unreadable response (status {}): {}",
                status, e
            ))
        })
    }
}

#[async_trait::async_trait]
impl MovieApi for OmdbProvider {
    async fn search(
        &self,
        keyword: &str,
        kind: Option<TitleKind>,
    ) -> AppResult<OmdbSearchResponse> {
        let response = self
            .http_client
            .get(self.endpoint())
            .query(&self.query_params(keyword, kind))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let decoded = Self::decode(status, &body)?;

        tracing::debug!(
            keyword = %keyword,
            status = %status,
            results = decoded.search.as_ref().map(Vec::len).unwrap_or(0),
            provider = self.name(),
            "OMDb search completed"
        );

        Ok(decoded)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
