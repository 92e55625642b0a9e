//! Print and queue API handlers.
//!
//! The print document is delivered to the browser as HTML; the client
//! opens it in a new window (or a hidden frame when popups are blocked)
//! where it invokes the native print dialog. Queue endpoints drive the
//! simulated printer.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::label::LabelTemplate;
use crate::print::{PrintConfig, render_batch, render_single};
use crate::queue::{PrintJob, PrinterStatus, process_one};

use super::super::state::AppState;
use super::bad_request;

/// GET /api/print/config - The global print configuration.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<PrintConfig> {
    Json(state.print_config.read().await.clone())
}

/// PUT /api/print/config - Replace the global print configuration.
pub async fn set_config(
    State(state): State<Arc<AppState>>,
    Json(config): Json<PrintConfig>,
) -> Json<PrintConfig> {
    let mut current = state.print_config.write().await;
    *current = config;
    Json(current.clone())
}

#[derive(Deserialize, Default)]
pub struct DocumentRequest {
    /// Labels to render; empty means the active label.
    #[serde(default)]
    pub label_ids: Vec<String>,
}

/// POST /api/print/document - Render the print HTML for the selection.
///
/// No selection and no active label is a no-op: 204, nothing to print.
pub async fn document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DocumentRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    let store = state.store.read().await;
    let config = state.print_config.read().await;

    let labels: Vec<LabelTemplate> = if req.label_ids.is_empty() {
        store.active_label().cloned().into_iter().collect()
    } else {
        req.label_ids
            .iter()
            .filter_map(|id| store.label(id).cloned())
            .collect()
    };

    if labels.is_empty() {
        return Err((StatusCode::NO_CONTENT, String::new()));
    }
    if !req.label_ids.is_empty() && labels.len() != req.label_ids.len() {
        return Err(bad_request("selection includes unknown labels"));
    }

    let html = match labels.as_slice() {
        [single] => render_single(single, &config, store.logo()),
        many => render_batch(many, &config, store.logo()),
    };
    Ok(Html(html))
}

#[derive(Deserialize)]
pub struct EnqueueRequest {
    #[serde(default)]
    pub label_ids: Vec<String>,
    #[serde(default = "default_copies")]
    pub copies: u32,
}

fn default_copies() -> u32 {
    1
}

#[derive(Serialize)]
pub struct EnqueueResponse {
    pub job_ids: Vec<String>,
}

/// POST /api/print/enqueue - Queue labels on the simulated printer.
pub async fn enqueue(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnqueueRequest>,
) -> Result<Json<EnqueueResponse>, (StatusCode, String)> {
    let store = state.store.read().await;
    let labels: Vec<LabelTemplate> = if req.label_ids.is_empty() {
        store.active_label().cloned().into_iter().collect()
    } else {
        req.label_ids
            .iter()
            .filter_map(|id| store.label(id).cloned())
            .collect()
    };
    if labels.is_empty() {
        return Err(bad_request("no labels selected for printing"));
    }

    let mut queue = state.queue.lock().await;
    let job_ids = labels
        .iter()
        .map(|l| queue.enqueue(&l.id, &l.name, req.copies))
        .collect();
    Ok(Json(EnqueueResponse { job_ids }))
}

/// GET /api/queue - Current jobs.
pub async fn queue_jobs(State(state): State<Arc<AppState>>) -> Json<Vec<PrintJob>> {
    Json(state.queue.lock().await.jobs().to_vec())
}

/// POST /api/queue/process - Drive one job through its simulated cycle.
pub async fn queue_process(
    State(state): State<Arc<AppState>>,
) -> Json<Option<crate::queue::JobStatus>> {
    Json(process_one(&state.queue).await)
}

/// DELETE /api/queue/:id - Dismiss a job.
pub async fn queue_remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    state.queue.lock().await.remove(&id);
    StatusCode::NO_CONTENT
}

/// GET /api/printer/status - Mock printer status and counters.
pub async fn printer_status(State(state): State<Arc<AppState>>) -> Json<PrinterStatus> {
    Json(state.queue.lock().await.status())
}

#[derive(Deserialize)]
pub struct ConnectedRequest {
    pub connected: bool,
}

/// PUT /api/printer/connected - Toggle the mock printer connection.
pub async fn set_connected(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConnectedRequest>,
) -> Json<PrinterStatus> {
    let mut queue = state.queue.lock().await;
    queue.set_connected(req.connected);
    Json(queue.status())
}
