//! Citation management handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::AppState;
use bibforge_common::{
    db::models::{Citation, CitationInput},
    errors::Result,
};

/// Confirmation body for deletes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List every citation, newest first
pub async fn list_citations(State(state): State<AppState>) -> Result<Json<Vec<Citation>>> {
    let citations = state.store.list().await?;
    Ok(Json(citations))
}

/// Get a citation by ID
pub async fn get_citation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Citation>> {
    let citation = state.store.get(&id).await?;
    Ok(Json(citation))
}

/// Create a citation; any client-supplied id or timestamps are ignored
pub async fn create_citation(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CitationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Citation>)> {
    let Json(input) = payload?;
    let citation = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(citation)))
}

/// Replace all mutable fields of a citation
pub async fn update_citation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CitationInput>, JsonRejection>,
) -> Result<Json<Citation>> {
    let Json(input) = payload?;
    let citation = state.store.update(&id, input).await?;
    Ok(Json(citation))
}

/// Delete a citation. Unknown ids are not an error.
pub async fn delete_citation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.store.delete(&id).await?;

    tracing::info!(citation_id = %id, "Citation deleted");

    Ok(Json(MessageResponse {
        message: "Citation deleted successfully".to_string(),
    }))
}
