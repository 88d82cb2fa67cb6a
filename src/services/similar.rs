use std::sync::Arc;

use crate::{
    models::{ApiFlag, Movie, SearchOutcome, TitleKind},
    services::providers::MovieApi,
};

/// Maximum number of related movies returned for one title
pub const MAX_SIMILAR: usize = 4;
pub const FETCH_FAILED: &str = "Failed to fetch similar movies due to a network or server issue.";
const NO_SIMILAR: &str = "No similar movies found.";

fn is_article(word: &str) -> bool {
    word.eq_ignore_ascii_case("the") || word.eq_ignore_ascii_case("a")
}

fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Picks the keyword used to look up movies related to `title`.
///
/// Leading articles and words shorter than three characters are skipped; when the remaining word is
/// still short, two adjacent words are joined. Returns `None` for a blank title.
pub fn derive_search_term(title: &str) -> Option<String> {
    let parts: Vec<&str> = title.split_whitespace().collect();
    let first = *parts.first()?;

    let mut term = first.to_string();
    if parts.len() > 1 && (char_len(first) < 3 || is_article(first)) {
        term = parts[1].to_string();
    }

    if char_len(&term) < 3 && parts.len() > 2 {
        term = if is_article(first) {
            format!("{} {}", parts[1], parts[2])
        } else {
            format!("{} {}", parts[0], parts[1])
        };
    }

    if term.is_empty() {
        term = first.to_string();
    }

    (!term.is_empty()).then_some(term)
}

/// Keeps API order, drops the source movie and caps the list at [`MAX_SIMILAR`]
fn select_related(movies: Vec<Movie>, exclude_imdb_id: &str) -> Vec<Movie> {
    movies
        .into_iter()
        .filter(|movie| movie.imdb_id != exclude_imdb_id)
        .take(MAX_SIMILAR)
        .collect()
}

/// Title-derived "similar movies" lookup
///
/// The remote API has no recommendation endpoint, so a keyword is extracted from the title and
/// searched again, restricted to movies.
#[derive(Clone)]
pub struct SimilarTitles {
    api: Arc<dyn MovieApi>,
}

impl SimilarTitles {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self { api }
    }

    pub async fn derive_similar(&self, title: &str, exclude_imdb_id: &str) -> SearchOutcome {
        let Some(term) = derive_search_term(title) else {
            return SearchOutcome::found(Vec::new());
        };

        match self.api.search(&term, Some(TitleKind::Movie)).await {
            Ok(response) => match response.response {
                ApiFlag::True => {
                    let related =
                        select_related(response.search.unwrap_or_default(), exclude_imdb_id);
                    tracing::debug!(
                        title = %title,
                        term = %term,
                        results = related.len(),
                        "Similar movies fetched"
                    );
                    if related.is_empty() {
                        SearchOutcome::empty_with_error(format!(
                            "No other movies found for term: \"{}\"",
                            term
                        ))
                    } else {
                        SearchOutcome::found(related)
                    }
                }
                ApiFlag::False => match response.error.as_deref() {
                    Some("Movie not found!") | Some("Too many results.") => {
                        SearchOutcome::empty_with_error(format!(
                            "Could not find similar movies for \"{}\".",
                            term
                        ))
                    }
                    Some(message) => SearchOutcome::empty_with_error(message),
                    None => SearchOutcome::empty_with_error(NO_SIMILAR),
                },
            },
            Err(e) => {
                tracing::error!(title = %title, term = %term, error = %e, "Error fetching similar movies");
                SearchOutcome::empty_with_error(FETCH_FAILED)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{fixtures::movie, OmdbSearchResponse};
    use crate::services::providers::MockMovieApi;

    #[test]
    fn test_leading_article_is_skipped() {
        assert_eq!(derive_search_term("The Matrix").as_deref(), Some("Matrix"));
        assert_eq!(derive_search_term("the godfather").as_deref(), Some("godfather"));
        assert_eq!(derive_search_term("A Bug's Life").as_deref(), Some("Bug's"));
    }

    #[test]
    fn test_single_short_word_is_kept() {
        assert_eq!(derive_search_term("Up").as_deref(), Some("Up"));
        assert_eq!(derive_search_term("It").as_deref(), Some("It"));
    }

    #[test]
    fn test_first_word_used_when_long_enough() {
        assert_eq!(derive_search_term("Inception").as_deref(), Some("Inception"));
        assert_eq!(derive_search_term("Star Wars").as_deref(), Some("Star"));
    }

    #[test]
    fn test_short_first_word_skipped() {
        assert_eq!(derive_search_term("Ex Machina").as_deref(), Some("Machina"));
    }

    #[test]
    fn test_short_words_joined_after_article() {
        assert_eq!(derive_search_term("The Up Side").as_deref(), Some("Up Side"));
        assert_eq!(derive_search_term("A Go Go Party").as_deref(), Some("Go Go"));
    }

    #[test]
    fn test_short_words_joined_from_start() {
        assert_eq!(derive_search_term("X Y Z").as_deref(), Some("X Y"));
        assert_eq!(derive_search_term("Oz Is Here").as_deref(), Some("Oz Is"));
    }

    #[test]
    fn test_three_letter_first_word_kept() {
        assert_eq!(derive_search_term("Mr. Go Home").as_deref(), Some("Mr."));
    }

    #[test]
    fn test_two_words_both_short() {
        // Only two parts, so no joining happens.
        assert_eq!(derive_search_term("Up Up").as_deref(), Some("Up"));
    }

    #[test]
    fn test_extra_whitespace_ignored() {
        assert_eq!(derive_search_term("  The   Matrix  ").as_deref(), Some("Matrix"));
    }

    #[test]
    fn test_blank_title_has_no_term() {
        assert_eq!(derive_search_term(""), None);
        assert_eq!(derive_search_term("   "), None);
    }

    #[test]
    fn test_select_related_excludes_and_limits() {
        let movies = vec![
            movie("tt1", "One"),
            movie("tt0", "Source"),
            movie("tt2", "Two"),
            movie("tt3", "Three"),
            movie("tt4", "Four"),
            movie("tt5", "Five"),
        ];
        let related = select_related(movies, "tt0");
        let ids: Vec<&str> = related.iter().map(|m| m.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2", "tt3", "tt4"]);
    }

    #[tokio::test]
    async fn test_blank_title_skips_api() {
        let mut mock = MockMovieApi::new();
        mock.expect_search().never();

        let outcome = SimilarTitles::new(Arc::new(mock))
            .derive_similar("", "tt0")
            .await;
        assert_eq!(outcome, SearchOutcome::found(Vec::new()));
    }

    #[tokio::test]
    async fn test_queries_derived_term_as_movie() {
        let mut mock = MockMovieApi::new();
        mock.expect_search()
            .withf(|keyword, kind| keyword == "Matrix" && *kind == Some(TitleKind::Movie))
            .times(1)
            .returning(|_, _| {
                Ok(OmdbSearchResponse::found(vec![
                    movie("tt0133093", "The Matrix"),
                    movie("tt0234215", "The Matrix Reloaded"),
                    movie("tt0242653", "The Matrix Revolutions"),
                ]))
            });

        let outcome = SimilarTitles::new(Arc::new(mock))
            .derive_similar("The Matrix", "tt0133093")
            .await;

        assert_eq!(outcome.error, None);
        let ids: Vec<&str> = outcome.movies().iter().map(|m| m.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["tt0234215", "tt0242653"]);
    }

    #[tokio::test]
    async fn test_only_source_movie_found() {
        let mut mock = MockMovieApi::new();
        mock.expect_search()
            .times(1)
            .returning(|_, _| Ok(OmdbSearchResponse::found(vec![movie("tt1", "Inception")])));

        let outcome = SimilarTitles::new(Arc::new(mock))
            .derive_similar("Inception", "tt1")
            .await;

        assert_eq!(
            outcome,
            SearchOutcome::empty_with_error("No other movies found for term: \"Inception\"")
        );
    }

    #[tokio::test]
    async fn test_not_found_is_translated() {
        for upstream in ["Movie not found!", "Too many results."] {
            let mut mock = MockMovieApi::new();
            mock.expect_search()
                .times(1)
                .returning(move |_, _| Ok(OmdbSearchResponse::not_found(Some(upstream))));

            let outcome = SimilarTitles::new(Arc::new(mock))
                .derive_similar("Up", "tt1")
                .await;

            assert_eq!(
                outcome,
                SearchOutcome::empty_with_error("Could not find similar movies for \"Up\".")
            );
        }
    }

    #[tokio::test]
    async fn test_other_upstream_errors_pass_through() {
        let mut mock = MockMovieApi::new();
        mock.expect_search()
            .times(1)
            .returning(|_, _| Ok(OmdbSearchResponse::not_found(Some("Invalid API key!"))));

        let outcome = SimilarTitles::new(Arc::new(mock))
            .derive_similar("Alien", "tt1")
            .await;

        assert_eq!(outcome, SearchOutcome::empty_with_error("Invalid API key!"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mut mock = MockMovieApi::new();
        mock.expect_search()
            .times(1)
            .returning(|_, _| Err(AppError::ExternalApi("timeout".to_string())));

        let outcome = SimilarTitles::new(Arc::new(mock))
            .derive_similar("Alien", "tt1")
            .await;

        assert_eq!(outcome, SearchOutcome::empty_with_error(FETCH_FAILED));
    }
}
