//! Search handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::AppState;
use bibforge_common::{db::models::Citation, errors::Result, metrics};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Substring search across title, authors, journal, abstract and keywords
pub async fn search_citations(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Citation>>> {
    let Query(params) = params?;
    let query = params.q.unwrap_or_default();
    let results = state.store.search(&query).await?;

    metrics::record_search(results.len());
    tracing::debug!(query = %query, results = results.len(), "Search completed");

    Ok(Json(results))
}
