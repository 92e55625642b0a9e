//! Positioned label fields.
//!
//! A field is one element placed on the virtual design canvas: literal
//! text, the uploaded logo image, or a QR code. Coordinates and sizes are
//! editor-space units (see [`CANVAS_WIDTH`] / [`CANVAS_HEIGHT`]),
//! independent of the physical print size.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Width of the virtual design canvas in editor-space units.
pub const CANVAS_WIDTH: f64 = 200.0;

/// Height of the virtual design canvas in editor-space units.
pub const CANVAS_HEIGHT: f64 = 256.0;

/// Minimum field dimension after any resize, in editor-space units.
pub const MIN_FIELD_SIZE: f64 = 20.0;

fn default_font_family() -> String {
    "Arial".to_string()
}

/// The kind of content a field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Literal text, styled with `font_size` / `font_family`.
    Text,
    /// The stored logo image (skipped at print time if no logo is set).
    Image,
    /// QR code encoding the field's content string.
    Qr,
}

/// One positioned element on a label.
///
/// `font_size` / `font_family` are meaningful only for text fields,
/// `qr_size` only for QR fields. The editor maintains two invariants:
/// both dimensions stay at or above [`MIN_FIELD_SIZE`], and a QR field's
/// `qr_size` never exceeds `min(width, height)` so the code stays
/// inscribed in its bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelField {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_size: Option<f64>,
}

impl LabelField {
    /// Create a text field with editor defaults (100×30, font size 12).
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: FieldKind::Text,
            content: content.into(),
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 30.0,
            font_size: Some(12.0),
            font_family: Some(default_font_family()),
            qr_size: None,
        }
    }

    /// Create a QR field with editor defaults (60×60, code 50).
    pub fn qr(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: FieldKind::Qr,
            content: content.into(),
            x: 10.0,
            y: 10.0,
            width: 60.0,
            height: 60.0,
            font_size: None,
            font_family: None,
            qr_size: Some(50.0),
        }
    }

    /// Create a logo image field with editor defaults (50×50).
    pub fn image() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: FieldKind::Image,
            content: String::new(),
            x: 10.0,
            y: 10.0,
            width: 50.0,
            height: 50.0,
            font_size: None,
            font_family: None,
            qr_size: None,
        }
    }

    /// Create a field of the given kind with its editor defaults.
    /// QR fields take their payload from `qr_payload`.
    pub fn with_defaults(kind: FieldKind, qr_payload: &str) -> Self {
        match kind {
            FieldKind::Text => Self::text("New text"),
            FieldKind::Qr => Self::qr(qr_payload),
            FieldKind::Image => Self::image(),
        }
    }

    /// Place the field at an explicit editor-space position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Override the bounding box.
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Override the font size (text fields).
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Override the QR square size (QR fields).
    pub fn qr_size(mut self, size: f64) -> Self {
        self.qr_size = Some(size);
        self
    }

    /// Apply the resize invariants: floor both dimensions at
    /// [`MIN_FIELD_SIZE`], and keep a QR code inscribed in its box.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(MIN_FIELD_SIZE);
        self.height = height.max(MIN_FIELD_SIZE);
        if self.kind == FieldKind::Qr {
            self.qr_size = Some(self.width.min(self.height));
        }
    }

    /// Move the field, clamping both axes so it never leaves the canvas.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let max_x = (CANVAS_WIDTH - self.width).max(0.0);
        let max_y = (CANVAS_HEIGHT - self.height).max(0.0);
        self.x = x.clamp(0.0, max_x);
        self.y = y.clamp(0.0, max_y);
    }
}
