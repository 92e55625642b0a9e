//! Settings, logo and import/export API handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::store::Settings;
use crate::transfer;

use super::super::state::AppState;
use super::bad_request;

/// GET /api/settings
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.store.read().await.settings().clone())
}

#[derive(Deserialize)]
pub struct SettingsRequest {
    pub auto_print: bool,
}

/// PUT /api/settings - Update the auto-print flag.
pub async fn set_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SettingsRequest>,
) -> Result<Json<Settings>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    store
        .set_auto_print(req.auto_print)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(store.settings().clone()))
}

/// GET /api/logo - The stored logo data URI, if any.
pub async fn get_logo(State(state): State<Arc<AppState>>) -> Json<Option<String>> {
    Json(state.store.read().await.logo().map(str::to_string))
}

#[derive(Deserialize)]
pub struct LogoRequest {
    /// Data-URI string (e.g. "data:image/png;base64,...").
    pub data: String,
}

/// PUT /api/logo - Store the logo.
pub async fn set_logo(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogoRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if !req.data.starts_with("data:image/") {
        return Err(bad_request("logo must be an image data URI"));
    }
    state
        .store
        .write()
        .await
        .set_logo(Some(req.data))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/logo - Remove the stored logo.
pub async fn delete_logo(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .store
        .write()
        .await
        .set_logo(None)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/export - All labels in the envelope format (download).
pub async fn export_labels(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let store = state.store.read().await;
    let json = transfer::export_all(store.labels())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok((
        [
            (axum::http::header::CONTENT_TYPE, "application/json"),
            (
                axum::http::header::CONTENT_DISPOSITION,
                "attachment; filename=\"labels_export.json\"",
            ),
        ],
        json,
    ))
}

/// GET /api/export/templates - Templates as a raw JSON array.
pub async fn export_templates(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let store = state.store.read().await;
    let json = transfer::export_templates(store.templates())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok((
        [
            (axum::http::header::CONTENT_TYPE, "application/json"),
            (
                axum::http::header::CONTENT_DISPOSITION,
                "attachment; filename=\"templates_export.json\"",
            ),
        ],
        json,
    ))
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

/// POST /api/import - Merge labels from an uploaded JSON body.
///
/// Accepts the export envelope or a single label object. A malformed
/// body is rejected with no partial state change.
pub async fn import_labels(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ImportResponse>, (StatusCode, String)> {
    let incoming = transfer::parse_import(&body).map_err(bad_request)?;
    let imported = state
        .store
        .write()
        .await
        .import_merge(incoming)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(ImportResponse { imported }))
}
