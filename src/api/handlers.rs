use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Movie, SearchOutcome, User},
    services::{validation, ResultSet},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

#[derive(Debug, Serialize)]
pub struct AddedResponse {
    pub added: bool,
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct ContainsResponse {
    pub contains: bool,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Search movies by keyword and publish the outcome as the current result set
pub async fn search_movies(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchOutcome> {
    let ticket = state.search_results.issue();
    let outcome = state.search.search(&params.q).await;
    let applied = state
        .search_results
        .apply(ticket, &params.q, outcome.clone())
        .await;

    tracing::info!(
        request_id = %request_id,
        request = ticket.sequence(),
        applied,
        "Search request handled"
    );

    Json(outcome)
}

/// Latest applied search result set
pub async fn latest_results(State(state): State<AppState>) -> AppResult<Json<ResultSet>> {
    state
        .search_results
        .latest()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No search has completed yet.".to_string()))
}

/// Movies related to `imdb_id`, derived from its title
pub async fn similar_movies(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
    Query(params): Query<SimilarQuery>,
) -> Json<SearchOutcome> {
    let slot = state.similar_results.slot(&imdb_id).await;
    let ticket = slot.issue();
    let outcome = state.similar.derive_similar(&params.title, &imdb_id).await;
    let applied = slot.apply(ticket, &params.title, outcome.clone()).await;

    tracing::debug!(
        imdb_id = %imdb_id,
        request = ticket.sequence(),
        applied,
        "Similar-title request handled"
    );

    Json(outcome)
}

/// Latest applied similar-title result set for `imdb_id`
pub async fn latest_similar_results(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> AppResult<Json<ResultSet>> {
    let latest = match state.similar_results.get(&imdb_id).await {
        Some(slot) => slot.latest().await,
        None => None,
    };

    latest.map(Json).ok_or_else(|| {
        AppError::NotFound(format!(
            "No similar-title lookup has completed for {} yet.",
            imdb_id
        ))
    })
}

/// Register a mock account
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    validation::validate_signup(
        &request.username,
        &request.password,
        &request.confirm_password,
    )?;

    if !state
        .accounts
        .signup(&request.username, &request.password)
        .await?
    {
        return Err(AppError::Conflict(
            "Username already exists or another error occurred.".to_string(),
        ));
    }

    Ok((StatusCode::CREATED, Json(User::new(request.username))))
}

/// Log in with a mock account
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<User>> {
    validation::validate_login(&request.username, &request.password)?;

    if !state
        .accounts
        .login(&request.username, &request.password)
        .await?
    {
        return Err(AppError::Unauthorized(
            "Invalid username or password.".to_string(),
        ));
    }

    Ok(Json(User::new(request.username)))
}

/// End the current session
pub async fn logout(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.session.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current session identity
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: state.session.current().await,
    })
}

/// Delete the logged-in account and end the session
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<StatusCode> {
    let user = state.session.require_user().await?;
    tracing::info!(request_id = %request_id, username = %user.username, "Deleting account");

    state.accounts.delete_account(&user.username).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Saved movies; only visible while logged in
pub async fn get_watch_list(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    state.session.require_user().await?;
    Ok(Json(state.watch_list.movies().await))
}

/// Save a movie
pub async fn add_to_watch_list(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> AppResult<Json<AddedResponse>> {
    let added = state.watch_list.add(movie).await?;
    Ok(Json(AddedResponse { added }))
}

/// Whether a movie is already saved
pub async fn watch_list_contains(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Json<ContainsResponse> {
    Json(ContainsResponse {
        contains: state.watch_list.contains(&imdb_id).await,
    })
}

/// Remove a saved movie
pub async fn remove_from_watch_list(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> AppResult<Json<RemovedResponse>> {
    let removed = state.watch_list.remove(&imdb_id).await?;
    Ok(Json(RemovedResponse { removed }))
}
