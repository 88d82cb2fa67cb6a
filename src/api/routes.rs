use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Movies
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/results", get(handlers::latest_results))
        .route("/movies/:imdb_id/similar", get(handlers::similar_movies))
        .route(
            "/movies/:imdb_id/similar/results",
            get(handlers::latest_similar_results),
        )
        // Accounts
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/session", get(handlers::get_session))
        .route("/account", delete(handlers::delete_account))
        // Watch list
        .route(
            "/watchlist",
            get(handlers::get_watch_list).post(handlers::add_to_watch_list),
        )
        .route(
            "/watchlist/:imdb_id",
            get(handlers::watch_list_contains).delete(handlers::remove_from_watch_list),
        )
}
