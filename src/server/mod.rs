//! # HTTP Server for the Label Editor
//!
//! Serves the embedded web editor and a JSON API over the label store,
//! field editor, print renderer and simulated print queue.
//!
//! ## Usage
//!
//! ```bash
//! etiqueta serve --listen 0.0.0.0:8080 --data-dir ~/.etiqueta
//! ```
//!
//! Then open http://localhost:8080 in a browser to design labels.

mod handlers;
mod state;
mod static_files;

pub use state::{DynStorage, ServerConfig};

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use std::time::Duration;

use crate::error::EtiquetaError;
use crate::store::{FsStorage, LabelStore, MemoryStorage};
use state::AppState;

/// Start the HTTP server.
pub async fn serve(config: ServerConfig) -> Result<(), EtiquetaError> {
    let storage: DynStorage = match &config.data_dir {
        Some(dir) => Box::new(FsStorage::open(dir)?),
        None => Box::new(MemoryStorage::new()),
    };
    let store = LabelStore::load(storage)?;
    let app_state = Arc::new(AppState::new(config.clone(), store));

    // Background worker: advance the simulated print queue.
    tokio::spawn(queue_worker(app_state.clone()));

    let app = Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Scan + labels
        .route("/api/scan", post(handlers::labels::scan))
        .route(
            "/api/labels",
            get(handlers::labels::list).delete(handlers::labels::clear),
        )
        .route("/api/labels/active", get(handlers::labels::active))
        .route("/api/labels/active/name", put(handlers::labels::rename))
        .route("/api/labels/:id", delete(handlers::labels::delete))
        // Field editor
        .route(
            "/api/labels/active/fields",
            post(handlers::labels::add_field),
        )
        .route(
            "/api/labels/active/fields/:id",
            put(handlers::labels::update_field).delete(handlers::labels::remove_field),
        )
        .route(
            "/api/labels/active/fields/:id/resize",
            put(handlers::labels::resize_field),
        )
        .route(
            "/api/editor/pointer-down",
            post(handlers::labels::pointer_down),
        )
        .route(
            "/api/editor/pointer-move",
            post(handlers::labels::pointer_move),
        )
        .route("/api/editor/pointer-up", post(handlers::labels::pointer_up))
        // Templates
        .route(
            "/api/templates",
            get(handlers::templates::list).post(handlers::templates::create),
        )
        .route(
            "/api/templates/:id",
            delete(handlers::templates::delete),
        )
        .route(
            "/api/templates/:id/apply",
            post(handlers::templates::apply),
        )
        .route(
            "/api/templates/:id/duplicate",
            post(handlers::templates::duplicate),
        )
        // Printing
        .route(
            "/api/print/config",
            get(handlers::printing::get_config).put(handlers::printing::set_config),
        )
        .route("/api/print/document", post(handlers::printing::document))
        .route("/api/print/enqueue", post(handlers::printing::enqueue))
        .route("/api/queue", get(handlers::printing::queue_jobs))
        .route("/api/queue/process", post(handlers::printing::queue_process))
        .route("/api/queue/:id", delete(handlers::printing::queue_remove))
        .route(
            "/api/printer/status",
            get(handlers::printing::printer_status),
        )
        .route(
            "/api/printer/connected",
            put(handlers::printing::set_connected),
        )
        // Settings, logo, transfer
        .route(
            "/api/settings",
            get(handlers::system::get_settings).put(handlers::system::set_settings),
        )
        .route(
            "/api/logo",
            get(handlers::system::get_logo)
                .put(handlers::system::set_logo)
                .delete(handlers::system::delete_logo),
        )
        .route("/api/export", get(handlers::system::export_labels))
        .route(
            "/api/export/templates",
            get(handlers::system::export_templates),
        )
        .route("/api/import", post(handlers::system::import_labels))
        .with_state(app_state);

    println!("Etiqueta label server starting...");
    println!("Listening on: {}", config.listen_addr);
    match &config.data_dir {
        Some(dir) => println!("Data directory: {}", dir.display()),
        None => println!("Data directory: (in-memory, ephemeral)"),
    }
    println!();
    println!(
        "Open http://{}/ in your browser to design labels",
        config.listen_addr
    );
    println!();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            EtiquetaError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| EtiquetaError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

/// Background task: poll for pending jobs and run one simulated print
/// cycle at a time.
async fn queue_worker(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_millis(500));
    loop {
        interval.tick().await;
        let has_pending = state.queue.lock().await.pending() > 0;
        if has_pending {
            crate::queue::process_one(&state.queue).await;
        }
    }
}
