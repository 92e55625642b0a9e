//! Template API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::label::LabelTemplate;

use super::super::state::AppState;
use super::bad_request;

/// GET /api/templates - List stored templates (presets included).
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<LabelTemplate>> {
    Json(state.store.read().await.templates().to_vec())
}

#[derive(Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// POST /api/templates - Save the active label as a template.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<Json<LabelTemplate>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    let id = store
        .save_as_template(&req.name, req.category.as_deref())
        .map_err(bad_request)?;
    let template = store
        .template(&id)
        .cloned()
        .ok_or_else(|| bad_request("template vanished after save"))?;
    Ok(Json(template))
}

/// POST /api/templates/:id/apply - Instantiate a template as the
/// active label.
pub async fn apply(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LabelTemplate>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    store.apply_template(&id).map_err(bad_request)?;
    let label = store
        .active_label()
        .cloned()
        .ok_or_else(|| bad_request("apply produced no active label"))?;
    Ok(Json(label))
}

/// POST /api/templates/:id/duplicate - Copy a template.
pub async fn duplicate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LabelTemplate>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    let copy_id = store.duplicate_template(&id).map_err(bad_request)?;
    let template = store
        .template(&copy_id)
        .cloned()
        .ok_or_else(|| bad_request("duplicate vanished after save"))?;
    Ok(Json(template))
}

/// DELETE /api/templates/:id - Delete a template. Presets are rejected.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .store
        .write()
        .await
        .delete_template(&id)
        .map_err(bad_request)?;
    Ok(StatusCode::NO_CONTENT)
}
