//! Label and field-editor API handlers.
//!
//! The editor endpoints mirror the pointer protocol of the web UI:
//! pointer-down begins a drag, pointer-move repositions, pointer-up (or
//! leaving the canvas) ends it. Field geometry invariants are enforced
//! by the editor, not the client.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::editor::{FieldEditor, Point};
use crate::label::{FieldKind, LabelTemplate};
use crate::store::ScanOutcome;

use super::super::state::AppState;
use super::bad_request;

/// Response for a scan: the outcome plus the now-active label.
#[derive(Serialize)]
pub struct ScanResponse {
    pub outcome: ScanOutcome,
    pub label: LabelTemplate,
    /// True when auto-print queued a job as a side effect.
    pub auto_printed: bool,
}

#[derive(Deserialize)]
pub struct ScanRequest {
    pub code: String,
}

/// POST /api/scan - QR lookup; a miss synthesizes a new label.
pub async fn scan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, (StatusCode, String)> {
    let mut store = state.store.write().await;
    let outcome = store.scan(&req.code).map_err(bad_request)?;
    let label = store
        .active_label()
        .cloned()
        .ok_or_else(|| bad_request("scan produced no active label"))?;

    let auto_printed = store.settings().auto_print;
    if auto_printed {
        let mut queue = state.queue.lock().await;
        queue.enqueue(&label.id, &label.name, 1);
    }

    Ok(Json(ScanResponse {
        outcome,
        label,
        auto_printed,
    }))
}

/// GET /api/labels - All saved label instances.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<LabelTemplate>> {
    Json(state.store.read().await.labels().to_vec())
}

/// GET /api/labels/active - The currently active label, if any.
pub async fn active(State(state): State<Arc<AppState>>) -> Json<Option<LabelTemplate>> {
    Json(state.store.read().await.active_label().cloned())
}

/// DELETE /api/labels/:id - Delete one label instance.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .store
        .write()
        .await
        .delete_label(&id)
        .map_err(bad_request)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/labels - Delete every label instance.
pub async fn clear(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .store
        .write()
        .await
        .clear_labels()
        .map_err(bad_request)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct AddFieldRequest {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub qr_payload: String,
}

/// POST /api/labels/active/fields - Append a field with kind defaults.
pub async fn add_field(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddFieldRequest>,
) -> Result<Json<Option<LabelTemplate>>, (StatusCode, String)> {
    edit(&state, |editor| {
        editor.add_field(req.kind, &req.qr_payload);
    })
    .await
}

/// DELETE /api/labels/active/fields/:id - Remove a field.
pub async fn remove_field(
    State(state): State<Arc<AppState>>,
    Path(field_id): Path<String>,
) -> Result<Json<Option<LabelTemplate>>, (StatusCode, String)> {
    edit(&state, |editor| editor.remove_field(&field_id)).await
}

#[derive(Deserialize)]
pub struct PointerRequest {
    #[serde(default)]
    pub field_id: Option<String>,
    pub x: f64,
    pub y: f64,
}

/// POST /api/editor/pointer-down - Begin dragging a field.
pub async fn pointer_down(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PointerRequest>,
) -> Result<Json<Option<LabelTemplate>>, (StatusCode, String)> {
    let Some(field_id) = req.field_id else {
        return Err(bad_request("pointer-down requires field_id"));
    };
    edit(&state, |editor| {
        editor.begin_drag(&field_id, Point { x: req.x, y: req.y });
    })
    .await
}

/// POST /api/editor/pointer-move - Drag the grabbed field.
pub async fn pointer_move(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PointerRequest>,
) -> Result<Json<Option<LabelTemplate>>, (StatusCode, String)> {
    edit(&state, |editor| {
        editor.drag_to(Point { x: req.x, y: req.y });
    })
    .await
}

/// POST /api/editor/pointer-up - End the drag.
pub async fn pointer_up(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<LabelTemplate>>, (StatusCode, String)> {
    edit(&state, |editor| editor.end_drag()).await
}

#[derive(Deserialize)]
pub struct ResizeRequest {
    pub width: f64,
    pub height: f64,
}

/// PUT /api/labels/active/fields/:id/resize - Resize a field's box.
pub async fn resize_field(
    State(state): State<Arc<AppState>>,
    Path(field_id): Path<String>,
    Json(req): Json<ResizeRequest>,
) -> Result<Json<Option<LabelTemplate>>, (StatusCode, String)> {
    edit(&state, |editor| {
        editor.resize(&field_id, req.width, req.height);
    })
    .await
}

#[derive(Deserialize)]
pub struct ContentRequest {
    pub content: String,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub qr_size: Option<f64>,
}

/// PUT /api/labels/active/fields/:id - Update content and sizes.
pub async fn update_field(
    State(state): State<Arc<AppState>>,
    Path(field_id): Path<String>,
    Json(req): Json<ContentRequest>,
) -> Result<Json<Option<LabelTemplate>>, (StatusCode, String)> {
    edit(&state, |editor| {
        editor.set_content(&field_id, &req.content);
        if let Some(size) = req.font_size {
            editor.set_font_size(&field_id, size);
        }
        if let Some(size) = req.qr_size {
            editor.set_qr_size(&field_id, size);
        }
    })
    .await
}

#[derive(Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

/// PUT /api/labels/active/name - Rename the active label.
pub async fn rename(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<Option<LabelTemplate>>, (StatusCode, String)> {
    edit(&state, |editor| editor.rename(&req.name)).await
}

/// Run one editor interaction against the active label and persist.
/// Responds with the updated label (None when nothing is active — the
/// operation is then a no-op, matching the editor contract).
async fn edit<F>(
    state: &Arc<AppState>,
    f: F,
) -> Result<Json<Option<LabelTemplate>>, (StatusCode, String)>
where
    F: FnOnce(&mut FieldEditor<'_>),
{
    let mut store = state.store.write().await;
    let mut drag = state.drag.lock().await;
    store
        .with_active(|label| {
            let mut editor = FieldEditor::new(label, &mut drag);
            f(&mut editor);
        })
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(store.active_label().cloned()))
}
