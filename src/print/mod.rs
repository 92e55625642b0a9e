//! # Print Renderer
//!
//! Converts label instances plus a print configuration into a
//! self-contained HTML document sized to physical pixel dimensions. The
//! rendering itself is pure string templating over scaled coordinates;
//! delivery (browser handoff, file output) lives behind the
//! [`DocumentExporter`] trait so it stays mockable.

mod html;
mod qr;

pub use html::{HtmlRenderer, render_batch, render_single};
pub use qr::qr_svg;

use serde::{Deserialize, Serialize};

use crate::error::EtiquetaError;
use crate::label::{LabelTemplate, Margins, Orientation};

/// Editor canvas baseline: fields are authored on a 200×256 virtual
/// canvas and scaled to physical pixels at print time.
pub const EDITOR_BASE_WIDTH: f64 = 200.0;
pub const EDITOR_BASE_HEIGHT: f64 = 256.0;

fn default_label_width() -> f64 {
    60.0
}

fn default_label_height() -> f64 {
    40.0
}

fn default_dpi() -> u32 {
    300
}

/// Global print configuration. A template's own `label_size` /
/// `print_settings` override these per label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintConfig {
    /// Physical label width in millimeters.
    #[serde(default = "default_label_width")]
    pub label_width_mm: f64,
    /// Physical label height in millimeters.
    #[serde(default = "default_label_height")]
    pub label_height_mm: f64,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub margins: Margins,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            label_width_mm: 60.0,
            label_height_mm: 40.0,
            dpi: 300,
            orientation: Orientation::Portrait,
            margins: Margins::default(),
        }
    }
}

impl PrintConfig {
    /// Effective configuration for one label, applying its per-template
    /// size and settings overrides.
    pub fn for_label(&self, label: &LabelTemplate) -> Self {
        let mut effective = self.clone();
        if let Some(size) = &label.label_size {
            let (w, h) = size.to_mm();
            effective.label_width_mm = w;
            effective.label_height_mm = h;
        }
        if let Some(settings) = &label.print_settings {
            effective.dpi = settings.dpi;
            effective.orientation = settings.orientation;
            effective.margins = settings.margins;
        }
        effective
    }

    /// Label size in physical pixels at the configured DPI.
    pub fn label_px(&self) -> (u32, u32) {
        (
            mm_to_pixels(self.label_width_mm, self.dpi),
            mm_to_pixels(self.label_height_mm, self.dpi),
        )
    }

    /// Scale factors from editor-space to physical pixels.
    pub fn scale(&self) -> LabelScale {
        let (w, h) = self.label_px();
        LabelScale {
            x: w as f64 / EDITOR_BASE_WIDTH,
            y: h as f64 / EDITOR_BASE_HEIGHT,
        }
    }
}

/// Per-axis scale factors from editor-space units to physical pixels.
///
/// Positions and bounding boxes map through the per-axis factors;
/// font and QR sizes map through the minimum of the two so glyphs and
/// codes scale uniformly instead of distorting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelScale {
    pub x: f64,
    pub y: f64,
}

impl LabelScale {
    /// Uniform factor for font and QR sizes.
    pub fn uniform(&self) -> f64 {
        self.x.min(self.y)
    }

    pub fn px_x(&self, units: f64) -> i64 {
        (units * self.x).round() as i64
    }

    pub fn px_y(&self, units: f64) -> i64 {
        (units * self.y).round() as i64
    }

    pub fn px_uniform(&self, units: f64) -> i64 {
        (units * self.uniform()).round() as i64
    }
}

/// Convert a physical millimeter dimension to pixels at the given DPI.
pub fn mm_to_pixels(mm: f64, dpi: u32) -> u32 {
    (mm * dpi as f64 / 25.4).round() as u32
}

/// Rendering (pure, testable) separated from delivery
/// (environment-dependent, mockable).
pub trait DocumentExporter {
    /// Render labels into a print-ready markup document. Empty input is
    /// a no-op returning `None`.
    fn render(
        &self,
        labels: &[LabelTemplate],
        config: &PrintConfig,
        logo: Option<&str>,
    ) -> Result<Option<String>, EtiquetaError>;

    /// Hand a rendered document to the platform print facility.
    fn deliver(&self, document: &str) -> Result<(), EtiquetaError>;
}

/// Exporter that writes the print document to a file; the user opens it
/// in a browser where it self-invokes the print dialog.
pub struct FileExporter {
    pub path: std::path::PathBuf,
}

impl DocumentExporter for FileExporter {
    fn render(
        &self,
        labels: &[LabelTemplate],
        config: &PrintConfig,
        logo: Option<&str>,
    ) -> Result<Option<String>, EtiquetaError> {
        match labels {
            [] => Ok(None),
            [single] => Ok(Some(render_single(single, config, logo))),
            many => Ok(Some(render_batch(many, config, logo))),
        }
    }

    fn deliver(&self, document: &str) -> Result<(), EtiquetaError> {
        std::fs::write(&self.path, document)?;
        println!("[print] wrote {}", self.path.display());
        Ok(())
    }
}
