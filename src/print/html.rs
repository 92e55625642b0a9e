//! HTML print document generation.
//!
//! Single-label and batch (tiled grid) layouts share one per-field
//! rendering routine; the difference is the page scaffolding around it.
//! The emitted document is self-contained: physical pixel dimensions in
//! the CSS, fields as absolutely positioned blocks, and an onload script
//! invoking the platform print dialog.

use super::{LabelScale, PrintConfig, mm_to_pixels, qr::qr_svg};
use crate::label::{FieldKind, LabelTemplate, Orientation};

/// Stateless renderer bundling the config and optional logo.
pub struct HtmlRenderer<'a> {
    pub config: &'a PrintConfig,
    pub logo: Option<&'a str>,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a PrintConfig, logo: Option<&'a str>) -> Self {
        Self { config, logo }
    }

    /// Render one label as a standalone print document.
    pub fn single(&self, label: &LabelTemplate) -> String {
        let config = self.config.for_label(label);
        let (width_px, height_px) = config.label_px();
        let scale = config.scale();
        let margins_px = margins_px(&config);

        let mut html = String::with_capacity(4096);
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>Print label: {}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n",
            escape(&label.name),
            single_css(&config, width_px, height_px, margins_px),
        ));
        html.push_str("<div class=\"print-label\">\n");
        for field in &label.fields {
            html.push_str(&self.field_block(field, &scale));
        }
        html.push_str("</div>\n");
        html.push_str(PRINT_SCRIPT);
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Render multiple labels tiled in a grid, one caption under each.
    pub fn batch(&self, labels: &[LabelTemplate]) -> String {
        let config = self.config;
        let (width_px, height_px) = config.label_px();
        let scale = config.scale();
        let margins_px = margins_px(config);

        let mut html = String::with_capacity(4096 * labels.len().max(1));
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>Batch label print</title>\n<style>\n{}\n</style>\n</head>\n<body>\n",
            batch_css(config, width_px, height_px, margins_px),
        ));
        html.push_str("<div class=\"print-container\">\n");
        for label in labels {
            html.push_str("<div class=\"print-label\">\n");
            html.push_str(&format!(
                "<div class=\"label-info\">{}</div>\n",
                escape(&label.name)
            ));
            for field in &label.fields {
                html.push_str(&self.field_block(field, &scale));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
        html.push_str(PRINT_SCRIPT);
        html.push_str("</body>\n</html>\n");
        html
    }

    /// One positioned block per field — shared by both layouts.
    fn field_block(&self, field: &crate::label::LabelField, scale: &LabelScale) -> String {
        let x = scale.px_x(field.x);
        let y = scale.px_y(field.y);
        let width = scale.px_x(field.width);
        let height = scale.px_y(field.height);

        match field.kind {
            FieldKind::Text => {
                let font_size = scale.px_uniform(field.font_size.unwrap_or(12.0));
                format!(
                    "<div class=\"print-field text\" style=\"left:{x}px;top:{y}px;\
                     width:{width}px;height:{height}px;font-size:{font_size}px;\
                     font-family:{font};\">{content}</div>\n",
                    font = field.font_family.as_deref().unwrap_or("Arial"),
                    content = escape(&field.content),
                )
            }
            FieldKind::Image => match self.logo {
                // No stored logo: the image block is skipped entirely.
                None => String::new(),
                Some(logo) => format!(
                    "<div class=\"print-field image\" style=\"left:{x}px;top:{y}px;\
                     width:{width}px;height:{height}px;\">\
                     <img src=\"{logo}\" alt=\"Logo\"></div>\n",
                ),
            },
            FieldKind::Qr => {
                let qr_size = scale.px_uniform(field.qr_size.unwrap_or(50.0));
                format!(
                    "<div class=\"print-field qr\" style=\"left:{x}px;top:{y}px;\
                     width:{width}px;height:{height}px;\">{svg}</div>\n",
                    svg = qr_svg(&field.content, qr_size),
                )
            }
        }
    }
}

/// Render one label as a standalone print document.
pub fn render_single(label: &LabelTemplate, config: &PrintConfig, logo: Option<&str>) -> String {
    HtmlRenderer::new(config, logo).single(label)
}

/// Render multiple labels as one tiled batch document.
pub fn render_batch(labels: &[LabelTemplate], config: &PrintConfig, logo: Option<&str>) -> String {
    HtmlRenderer::new(config, logo).batch(labels)
}

struct MarginsPx {
    top: u32,
    right: u32,
    bottom: u32,
    left: u32,
}

fn margins_px(config: &PrintConfig) -> MarginsPx {
    MarginsPx {
        top: mm_to_pixels(config.margins.top, config.dpi),
        right: mm_to_pixels(config.margins.right, config.dpi),
        bottom: mm_to_pixels(config.margins.bottom, config.dpi),
        left: mm_to_pixels(config.margins.left, config.dpi),
    }
}

fn orientation_css(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Portrait => "portrait",
        Orientation::Landscape => "landscape",
    }
}

/// Shared per-field CSS rules.
const FIELD_CSS: &str = "\
.print-field { position: absolute; white-space: nowrap; overflow: hidden; }\n\
.print-field.text { font-family: Arial, sans-serif; }\n\
.print-field.image img { max-width: 100%; max-height: 100%; object-fit: contain; }\n\
.print-field.qr { display: flex; align-items: center; justify-content: center; background: white; }\n";

fn single_css(config: &PrintConfig, width_px: u32, height_px: u32, m: MarginsPx) -> String {
    format!(
        "@media print {{\n\
         @page {{ size: {orientation}; margin: 0; }}\n\
         body * {{ visibility: hidden; }}\n\
         .print-label, .print-label * {{ visibility: visible; }}\n\
         }}\n\
         .print-label {{ position: absolute; left: 0; top: 0; \
         width: {width_px}px; height: {height_px}px; \
         margin: {top}px {right}px {bottom}px {left}px; \
         background: white; overflow: hidden; }}\n\
         {FIELD_CSS}",
        orientation = orientation_css(config.orientation),
        top = m.top,
        right = m.right,
        bottom = m.bottom,
        left = m.left,
    )
}

fn batch_css(config: &PrintConfig, width_px: u32, height_px: u32, m: MarginsPx) -> String {
    let tile = width_px + m.left + m.right;
    format!(
        "@media print {{\n\
         @page {{ size: {orientation}; margin: 0; }}\n\
         body * {{ visibility: hidden; }}\n\
         .print-container, .print-container * {{ visibility: visible; }}\n\
         }}\n\
         body {{ font-family: Arial, sans-serif; margin: 0; padding: 20px; }}\n\
         .print-container {{ display: grid; \
         grid-template-columns: repeat(auto-fill, {tile}px); \
         gap: 10px; padding: 10px; page-break-inside: avoid; }}\n\
         .print-label {{ position: relative; width: {width_px}px; height: {height_px}px; \
         background: white; border: 1px solid #ddd; overflow: hidden; }}\n\
         .label-info {{ position: absolute; bottom: 0; left: 0; right: 0; \
         font-size: 10px; color: #666; text-align: center; background: #f5f5f5; padding: 2px; }}\n\
         {FIELD_CSS}",
        orientation = orientation_css(config.orientation),
    )
}

/// Invoke the print dialog once the document loads, then close.
const PRINT_SCRIPT: &str = "<script>\n\
window.onload = function() {\n\
  window.print();\n\
  window.onafterprint = function() { window.close(); };\n\
};\n\
</script>\n";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{LabelField, LabelTemplate};

    fn label() -> LabelTemplate {
        LabelTemplate::from_code("ABC123")
    }

    #[test]
    fn test_single_scales_field_positions() {
        // Default config: 60×40mm at 300dpi = 709×472px;
        // scale_x = 709/200, scale_y = 472/256.
        let html = render_single(&label(), &PrintConfig::default(), None);
        // Text field at (10,10): x = round(10 * 3.545) = 35, y = round(10 * 1.84375) = 18.
        assert!(html.contains("left:35px;top:18px;"), "{}", html);
        // QR field at (120,10) sized 60×60 → left 425, 213×111.
        assert!(html.contains("left:425px;top:18px;width:213px;height:111px;"));
        // Font 12 scales by min factor (1.84375) → 22.
        assert!(html.contains("font-size:22px;"));
    }

    #[test]
    fn test_single_embeds_real_qr_svg() {
        let html = render_single(&label(), &PrintConfig::default(), None);
        assert!(html.contains("class=\"print-field qr\""));
        assert!(html.contains("<svg "));
        // The placeholder marker must not appear for an encodable payload.
        assert!(!html.contains(">QR</text>"));
    }

    #[test]
    fn test_image_field_skipped_without_logo() {
        let mut l = label();
        l.fields.push(LabelField::image());
        let without = render_single(&l, &PrintConfig::default(), None);
        assert!(!without.contains("print-field image"));

        let with = render_single(
            &l,
            &PrintConfig::default(),
            Some("data:image/png;base64,AAAA"),
        );
        assert!(with.contains("print-field image"));
        assert!(with.contains("src=\"data:image/png;base64,AAAA\""));
    }

    #[test]
    fn test_text_content_is_escaped() {
        let mut l = label();
        l.fields[0].content = "Size: 60\" <wide>".into();
        let html = render_single(&l, &PrintConfig::default(), None);
        assert!(html.contains("Size: 60&quot; &lt;wide&gt;"));
        assert!(!html.contains("<wide>"));
    }

    #[test]
    fn test_batch_tiles_with_captions() {
        let labels = vec![label(), LabelTemplate::from_code("XYZ-9")];
        let html = render_batch(&labels, &PrintConfig::default(), None);
        assert_eq!(html.matches("class=\"print-label\"").count(), 2);
        assert!(html.contains("print-container"));
        assert!(html.contains("<div class=\"label-info\">Label ABC123</div>"));
        assert!(html.contains("<div class=\"label-info\">Label XYZ-9</div>"));
        assert!(html.contains("grid-template-columns"));
    }

    #[test]
    fn test_documents_self_invoke_print() {
        let html = render_single(&label(), &PrintConfig::default(), None);
        assert!(html.contains("window.print()"));
        assert!(html.contains("window.onafterprint"));
    }
}
