//! API handler modules.

pub mod labels;
pub mod printing;
pub mod system;
pub mod templates;

use axum::http::StatusCode;

/// Map a domain error to a 400 response.
pub(crate) fn bad_request<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}
