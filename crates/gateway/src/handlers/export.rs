//! Export handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::AppState;
use bibforge_common::{
    errors::Result,
    export::{self, ExportFormat},
    metrics,
};

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub format: Option<String>,
}

/// Render the whole citation set as json, bibtex or csv
pub async fn export_citations(
    State(state): State<AppState>,
    params: std::result::Result<Query<ExportParams>, QueryRejection>,
) -> Result<Response> {
    let Query(params) = params?;
    let format = ExportFormat::from_param(params.format.as_deref())?;

    // loads the full set; fine at the sizes this service handles
    let citations = state.store.list().await?;
    let export = export::render(format, &citations)?;

    metrics::record_export(format.as_str(), citations.len());

    let disposition = export.content_disposition();
    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, export.content_type())],
        export.body,
    )
        .into_response();

    if let Some(disposition) = disposition {
        if let Ok(value) = HeaderValue::from_str(&disposition) {
            response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
        }
    }

    Ok(response)
}
