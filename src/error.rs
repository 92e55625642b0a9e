//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.

use thiserror::Error;

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// Persistence-level errors (data directory, key read/write)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid user input (empty code, missing active label, preset deletion)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Import file format error
    #[error("Import error: {0}")]
    Import(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// JSON serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
