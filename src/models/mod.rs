use serde::{Deserialize, Serialize};

pub mod user;

pub use user::{Credentials, User};

/// A movie as returned by the remote movie API and kept in the watch list.
///
/// Field names follow the OMDb wire format so that persisted lists and API payloads share one
/// representation. Identity is `imdb_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Type")]
    pub title_type: String,
}

/// Type filter accepted by the remote search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Series,
    Episode,
}

impl TitleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Series => "series",
            TitleKind::Episode => "episode",
        }
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// The `Response` discriminator of an OMDb reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiFlag {
    True,
    False,
}

/// Raw search response from the OMDb API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    pub response: ApiFlag,
    #[serde(rename = "Search", default, skip_serializing_if = "Option::is_none")]
    pub search: Option<Vec<Movie>>,
    #[serde(rename = "totalResults", default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<String>,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    /// Successful reply carrying `movies`
    pub fn found(movies: Vec<Movie>) -> Self {
        Self {
            response: ApiFlag::True,
            total_results: Some(movies.len().to_string()),
            search: Some(movies),
            error: None,
        }
    }

    /// Negative reply with an optional upstream message
    pub fn not_found(error: Option<&str>) -> Self {
        Self {
            response: ApiFlag::False,
            search: None,
            total_results: None,
            error: error.map(str::to_string),
        }
    }
}

// ============================================================================
// Client-facing results
// ============================================================================

/// Result of a search or similar-title lookup.
///
/// Searches produce either `movies` or `error`. A similar-title lookup that comes back empty
/// carries both an error and an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<Movie>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchOutcome {
    pub fn found(movies: Vec<Movie>) -> Self {
        Self {
            movies: Some(movies),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            movies: None,
            error: Some(error.into()),
        }
    }

    /// Error reported alongside an empty, present movie list
    pub fn empty_with_error(error: impl Into<String>) -> Self {
        Self {
            movies: Some(Vec::new()),
            error: Some(error.into()),
        }
    }

    pub fn movies(&self) -> &[Movie] {
        self.movies.as_deref().unwrap_or_default()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Movie;

    pub fn movie(imdb_id: &str, title: &str) -> Movie {
        Movie {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: "1999".to_string(),
            poster: format!("https://img.example/{}.jpg", imdb_id),
            title_type: "movie".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_uses_omdb_field_names() {
        let json = r#"{
            "Title": "The Matrix",
            "Year": "1999",
            "imdbID": "tt0133093",
            "Type": "movie",
            "Poster": "https://m.media-amazon.com/images/M/matrix.jpg"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.imdb_id, "tt0133093");
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.year, "1999");
        assert_eq!(movie.title_type, "movie");

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["imdbID"], "tt0133093");
        assert_eq!(value["Title"], "The Matrix");
    }

    #[test]
    fn test_search_response_success() {
        let json = r#"{
            "Search": [
                {"Title": "Alien", "Year": "1979", "imdbID": "tt0078748", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "1",
            "Response": "True"
        }"#;

        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response, ApiFlag::True);
        assert_eq!(response.search.unwrap()[0].title, "Alien");
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_search_response_error() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response, ApiFlag::False);
        assert_eq!(response.search, None);
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_search_response_rejects_unknown_flag() {
        let json = r#"{"Response": "Maybe"}"#;
        assert!(serde_json::from_str::<OmdbSearchResponse>(json).is_err());
    }

    #[test]
    fn test_outcome_serialization_omits_absent_fields() {
        let failed = serde_json::to_value(SearchOutcome::failed("No results found")).unwrap();
        assert_eq!(failed, serde_json::json!({ "error": "No results found" }));

        let both = serde_json::to_value(SearchOutcome::empty_with_error("none")).unwrap();
        assert_eq!(both, serde_json::json!({ "movies": [], "error": "none" }));
    }

    #[test]
    fn test_title_kind_as_str() {
        assert_eq!(TitleKind::Movie.as_str(), "movie");
        assert_eq!(
            serde_json::to_string(&TitleKind::Series).unwrap(),
            "\"series\""
        );
    }
}
