//! Server state and configuration.

use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::{Mutex, RwLock};

use crate::editor::DragState;
use crate::print::PrintConfig;
use crate::queue::PrintQueue;
use crate::store::{LabelStore, Storage};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Data directory for persisted labels, or None for in-memory only.
    pub data_dir: Option<std::path::PathBuf>,
}

/// Boxed storage backend so one server type covers both the data
/// directory and the ephemeral in-memory mode.
pub type DynStorage = Box<dyn Storage + Send + Sync>;

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub store: RwLock<LabelStore<DynStorage>>,
    pub print_config: RwLock<PrintConfig>,
    pub queue: Mutex<PrintQueue>,
    /// Editor drag state — one interactive session at a time, matching
    /// the single-selection editor model.
    pub drag: Mutex<DragState>,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig, store: LabelStore<DynStorage>) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        Self {
            config,
            store: RwLock::new(store),
            print_config: RwLock::new(PrintConfig::default()),
            queue: Mutex::new(PrintQueue::new()),
            drag: Mutex::new(DragState::Idle),
            boot_time,
        }
    }
}
