//! Snippet HTTP handlers.
//!
//! Input validation lives here: the store accepts whatever it is given, so
//! rejecting blank fields, oversized bodies, and non-positive ids is this
//! layer's job.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use snipbox_core::models::{CreateSnippetRequest, CreatedSnippet, Snippet};
use snipbox_core::AppError;

/// Maximum accepted title length in characters.
const MAX_TITLE_CHARS: usize = 100;

fn validate_create_request(req: &CreateSnippetRequest, max_size: usize) -> Result<(), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be blank".to_string()));
    }
    if req.title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::BadRequest(format!(
            "Title exceeds maximum of {} characters",
            MAX_TITLE_CHARS
        )));
    }
    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Content must not be blank".to_string(),
        ));
    }
    if req.content.len() > max_size {
        return Err(AppError::BadRequest(format!(
            "Snippet size exceeds maximum of {} bytes",
            max_size
        )));
    }
    Ok(())
}

/// Create a new snippet.
///
/// # Arguments
/// - `state`: Application state.
/// - `req`: Snippet creation payload.
///
/// # Returns
/// `201 Created` with the assigned id as JSON.
///
/// # Errors
/// Returns an error if validation or persistence fails.
pub async fn create_snippet(
    State(state): State<AppState>,
    Json(req): Json<CreateSnippetRequest>,
) -> Result<(StatusCode, Json<CreatedSnippet>), HttpError> {
    validate_create_request(&req, state.config.max_snippet_size)?;

    let id = state
        .store
        .insert(&req.title, &req.content, req.expires_in_secs)
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedSnippet { id })))
}

/// Fetch a live snippet by id.
///
/// # Arguments
/// - `state`: Application state.
/// - `id`: Snippet identifier from the path.
///
/// # Returns
/// The snippet as JSON, or 404 when no live row matches.
///
/// # Errors
/// Returns an error if the lookup fails.
pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Snippet>, HttpError> {
    // Non-positive ids can never match a row; skip the round trip.
    if id < 1 {
        return Err(AppError::NotFound.into());
    }
    let snippet = state.store.get(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(snippet))
}

/// List the most recently created live snippets.
///
/// # Arguments
/// - `state`: Application state.
///
/// # Returns
/// Up to ten live snippets as a JSON array, newest first.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn latest_snippets(
    State(state): State<AppState>,
) -> Result<Json<Vec<Snippet>>, HttpError> {
    let snippets = state.store.latest().await?;
    Ok(Json(snippets))
}
