//! # Label Import / Export
//!
//! File interchange formats: a timestamped envelope for bulk label
//! export, a raw JSON array for templates, and a tolerant importer that
//! accepts either the envelope or a single bare label object. Malformed
//! input aborts with no partial state change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EtiquetaError;
use crate::label::LabelTemplate;

/// Bulk export envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub exported_at: DateTime<Utc>,
    pub total_labels: usize,
    pub labels: Vec<LabelTemplate>,
}

/// Serialize all labels into the pretty-printed envelope format.
pub fn export_all(labels: &[LabelTemplate]) -> Result<String, EtiquetaError> {
    let envelope = ExportEnvelope {
        exported_at: Utc::now(),
        total_labels: labels.len(),
        labels: labels.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Serialize templates as a raw JSON array.
pub fn export_templates(templates: &[LabelTemplate]) -> Result<String, EtiquetaError> {
    Ok(serde_json::to_string_pretty(templates)?)
}

/// Shapes the importer accepts. `Envelope` is tried first so objects
/// carrying a `labels` array aren't misread as a single label.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportShape {
    Envelope { labels: Vec<LabelTemplate> },
    Single(LabelTemplate),
}

/// Parse an import file: either the export envelope or one bare label
/// object (`{id, fields, ...}`).
pub fn parse_import(json: &str) -> Result<Vec<LabelTemplate>, EtiquetaError> {
    match serde_json::from_str::<ImportShape>(json) {
        Ok(ImportShape::Envelope { labels }) => Ok(labels),
        Ok(ImportShape::Single(label)) => Ok(vec![label]),
        Err(e) => Err(EtiquetaError::Import(format!(
            "unrecognized import format: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelTemplate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_envelope_round_trip_preserves_ids_and_fields() {
        let labels = vec![
            LabelTemplate::from_code("A-1"),
            LabelTemplate::from_code("B-2"),
        ];
        let json = export_all(&labels).unwrap();
        let imported = parse_import(&json).unwrap();

        let exported_ids: Vec<_> = labels.iter().map(|l| &l.id).collect();
        let imported_ids: Vec<_> = imported.iter().map(|l| &l.id).collect();
        assert_eq!(exported_ids, imported_ids);
        for (a, b) in labels.iter().zip(&imported) {
            assert_eq!(a.fields.len(), b.fields.len());
            for (fa, fb) in a.fields.iter().zip(&b.fields) {
                assert_eq!(fa.id, fb.id);
                assert_eq!(fa.content, fb.content);
                assert_eq!((fa.x, fa.y, fa.width, fa.height), (fb.x, fb.y, fb.width, fb.height));
            }
        }
    }

    #[test]
    fn test_envelope_records_count() {
        let labels = vec![LabelTemplate::from_code("A-1")];
        let json = export_all(&labels).unwrap();
        let envelope: ExportEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope.total_labels, 1);
    }

    #[test]
    fn test_single_label_shape_is_accepted() {
        let label = LabelTemplate::from_code("A-1");
        let json = serde_json::to_string(&label).unwrap();
        let imported = parse_import(&json).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].id, label.id);
    }

    #[test]
    fn test_import_accepts_labels_without_timestamps() {
        // Files from older exports carry only `{id, fields, ...}`;
        // missing timestamps are assigned at parse time.
        let json = r#"{"id": "ext-1", "fields": [
            {"id": "f1", "type": "text", "content": "QR: ABC123",
             "x": 10.0, "y": 10.0, "width": 100.0, "height": 30.0}
        ]}"#;
        let imported = parse_import(json).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].id, "ext-1");
        assert_eq!(imported[0].fields.len(), 1);
    }

    #[test]
    fn test_malformed_import_is_rejected() {
        assert!(parse_import("{\"neither\": \"shape\"}").is_err());
        assert!(parse_import("not json at all").is_err());
    }

    #[test]
    fn test_template_export_is_a_raw_array() {
        let templates = crate::label::built_in();
        let json = export_templates(&templates).unwrap();
        assert!(json.trim_start().starts_with('['));
        let parsed: Vec<LabelTemplate> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), templates.len());
    }
}
