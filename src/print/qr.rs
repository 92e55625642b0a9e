//! QR encoding for print output.
//!
//! Fields of kind `qr` render as real, scannable QR symbols: the content
//! string is encoded with the `qrcode` crate and emitted as an inline SVG
//! module matrix sized to the field's physical pixel square.

use qrcode::{EcLevel, QrCode};

/// Encode `data` as an inline SVG of the given pixel size.
///
/// Encoding failures (data too long for the symbol version) fall back to
/// a bordered placeholder so the print document still renders — a bad QR
/// payload degrades visibly, it never aborts the print.
pub fn qr_svg(data: &str, size_px: i64) -> String {
    let code = match QrCode::with_error_correction_level(data, EcLevel::M) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[print] QR encoding failed for {:?}: {}", data, e);
            return placeholder(size_px);
        }
    };

    let modules = code.width();
    // One SVG user unit per module; the viewBox scales to size_px.
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" \
         viewBox=\"0 0 {modules} {modules}\" shape-rendering=\"crispEdges\">\
         <rect width=\"{modules}\" height=\"{modules}\" fill=\"#fff\"/>",
        size = size_px,
        modules = modules,
    );
    for y in 0..modules {
        // Emit one rect per horizontal run of dark modules.
        let mut run_start: Option<usize> = None;
        for x in 0..=modules {
            let dark = x < modules && code[(x, y)] == qrcode::Color::Dark;
            match (dark, run_start) {
                (true, None) => run_start = Some(x),
                (false, Some(start)) => {
                    svg.push_str(&format!(
                        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"1\" fill=\"#000\"/>",
                        start,
                        y,
                        x - start
                    ));
                    run_start = None;
                }
                _ => {}
            }
        }
    }
    svg.push_str("</svg>");
    svg
}

fn placeholder(size_px: i64) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\">\
         <rect width=\"{size}\" height=\"{size}\" fill=\"#fff\" stroke=\"#000\" stroke-width=\"2\"/>\
         <text x=\"50%\" y=\"50%\" text-anchor=\"middle\" dominant-baseline=\"middle\">QR</text>\
         </svg>",
        size = size_px,
    )
}
