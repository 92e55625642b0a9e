//! # Etiqueta - Thermal Label Designer
//!
//! Etiqueta is a Rust library and service for designing and printing
//! thermal labels for furniture parts. It provides:
//!
//! - **Label model**: templates and instances of positioned text/image/QR
//!   fields on a fixed 200×256 virtual canvas
//! - **Field editor**: drag positioning and bounding-box resize with
//!   canvas clamping and size invariants
//! - **Print rendering**: millimeter → pixel scaling and self-contained
//!   HTML print documents with real QR encoding
//! - **Persistence**: a whole-collection key-value store with
//!   merge-on-import semantics
//! - **Simulated queue**: a mock asynchronous print queue for UI work
//!
//! ## Quick Start
//!
//! ```
//! use etiqueta::{
//!     print::{PrintConfig, render_single},
//!     store::{LabelStore, MemoryStorage},
//! };
//!
//! // Open an in-memory store (seeded with the built-in templates)
//! let mut store = LabelStore::load(MemoryStorage::new())?;
//!
//! // Scan a part code: no match, so a two-field label is synthesized
//! store.scan("PART-0042")?;
//! let label = store.active_label().unwrap();
//!
//! // Render the print document at 60×40mm, 300 DPI
//! let html = render_single(label, &PrintConfig::default(), store.logo());
//! assert!(html.contains("print-label"));
//!
//! # Ok::<(), etiqueta::EtiquetaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`label`] | Fields, templates, built-in presets |
//! | [`editor`] | Drag/resize field editor |
//! | [`store`] | Persistence and import merge |
//! | [`print`] | mm→px scaling and HTML generation |
//! | [`queue`] | Simulated print queue |
//! | [`transfer`] | File import/export formats |
//! | [`server`] | HTTP server and embedded web editor |
//! | [`error`] | Error types |

pub mod editor;
pub mod error;
pub mod label;
pub mod print;
pub mod queue;
pub mod server;
pub mod store;
pub mod transfer;

// Re-exports for convenience
pub use error::EtiquetaError;
pub use label::{LabelField, LabelTemplate};
pub use store::LabelStore;
