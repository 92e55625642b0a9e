//! # End-to-End Label Flow Tests
//!
//! These exercise the full pipeline as the web editor drives it: scan a
//! part code, edit fields on the virtual canvas, render a print
//! document, and round-trip the collection through export/import.
//!
//! Everything runs against the in-memory storage backend, so the tests
//! are hermetic and deterministic (the queue jam simulation is only
//! exercised through its deterministic disconnected path).

use etiqueta::editor::{DragState, FieldEditor, Point};
use etiqueta::label::{FieldKind, LabelTemplate, MIN_FIELD_SIZE};
use etiqueta::print::{self, PrintConfig, mm_to_pixels, render_batch, render_single};
use etiqueta::queue::{JobStatus, PrintQueue, process_one};
use etiqueta::store::{LabelStore, MemoryStorage, ScanOutcome};
use etiqueta::transfer;
use pretty_assertions::assert_eq;

fn store() -> LabelStore<MemoryStorage> {
    LabelStore::load(MemoryStorage::new()).unwrap()
}

// ============================================================================
// SCAN → EDIT → RENDER
// ============================================================================

#[test]
fn scan_miss_synthesizes_a_printable_label() {
    let mut store = store();
    assert_eq!(store.scan("SINK-0042").unwrap(), ScanOutcome::Created);

    let label = store.active_label().unwrap();
    assert_eq!(label.name, "Label SINK-0042");
    assert_eq!(label.fields.len(), 2);
    assert_eq!(label.fields[0].kind, FieldKind::Text);
    assert_eq!(label.fields[0].content, "QR: SINK-0042");
    assert_eq!(label.fields[1].kind, FieldKind::Qr);
    assert_eq!(label.fields[1].content, "SINK-0042");

    let html = render_single(label, &PrintConfig::default(), None);
    assert!(html.contains("print-label"));
    assert!(html.contains("QR: SINK-0042"));
    // A real QR code, not a placeholder box.
    assert!(html.contains("<svg"));
    assert!(html.contains("<rect"));
}

#[test]
fn rescanning_the_same_code_reuses_the_stored_label() {
    let mut store = store();
    store.scan("SINK-0042").unwrap();
    let first_id = store.active_label().unwrap().id.clone();
    store.set_active(None);

    assert_eq!(store.scan("SINK-0042").unwrap(), ScanOutcome::Found);
    assert_eq!(store.active_label().unwrap().id, first_id);
    assert_eq!(store.labels().len(), 1);
}

#[test]
fn drag_preserves_grab_point_and_clamps_to_canvas() {
    let mut store = store();
    store.scan("SINK-0042").unwrap();
    let mut drag = DragState::default();

    store
        .with_active(|label| {
            let field_id = label.fields[0].id.clone();
            let mut editor = FieldEditor::new(label, &mut drag);
            // Grab the text field 5 units inside its corner, drag far
            // off-canvas; it must pin to the edge, not vanish.
            editor.begin_drag(&field_id, Point { x: 15.0, y: 15.0 });
            editor.drag_to(Point { x: 900.0, y: -50.0 });
            editor.end_drag();
        })
        .unwrap();

    let field = &store.active_label().unwrap().fields[0];
    assert_eq!(field.x, 200.0 - field.width);
    assert_eq!(field.y, 0.0);
    assert_eq!(drag, DragState::Idle);
}

#[test]
fn idle_pointer_traffic_does_not_advance_updated_at() {
    let mut store = store();
    store.scan("SINK-0042").unwrap();
    let before = store.active_label().unwrap().updated_at;
    let mut drag = DragState::default();

    // Pointer moves with nothing grabbed, a release, and a grab of a
    // nonexistent field: none of these are edits.
    store
        .with_active(|label| {
            let mut editor = FieldEditor::new(label, &mut drag);
            editor.drag_to(Point { x: 50.0, y: 50.0 });
            editor.end_drag();
            editor.begin_drag("no-such-field", Point { x: 1.0, y: 1.0 });
        })
        .unwrap();

    assert_eq!(store.active_label().unwrap().updated_at, before);
}

#[test]
fn resize_keeps_qr_inscribed_and_floors_dimensions() {
    let mut store = store();
    store.scan("SINK-0042").unwrap();
    let mut drag = DragState::default();

    store
        .with_active(|label| {
            let qr_id = label.fields[1].id.clone();
            let mut editor = FieldEditor::new(label, &mut drag);
            editor.resize(&qr_id, 90.0, 3.0);
        })
        .unwrap();

    let qr = &store.active_label().unwrap().fields[1];
    assert_eq!(qr.width, 90.0);
    assert_eq!(qr.height, MIN_FIELD_SIZE);
    assert_eq!(qr.qr_size, Some(MIN_FIELD_SIZE));
}

#[test]
fn edits_survive_a_reload_through_the_shared_backend() {
    let storage = MemoryStorage::new();
    let mut store = LabelStore::load(storage.clone()).unwrap();
    store.scan("SINK-0042").unwrap();
    let mut drag = DragState::default();
    store
        .with_active(|label| {
            let mut editor = FieldEditor::new(label, &mut drag);
            editor.rename("Corner sink 42");
        })
        .unwrap();

    let reloaded = LabelStore::load(storage).unwrap();
    assert_eq!(reloaded.labels()[0].name, "Corner sink 42");
}

// ============================================================================
// PRINT GEOMETRY
// ============================================================================

#[test]
fn physical_pixel_math_matches_reference_values() {
    // 60×40 mm at 300 dpi.
    assert_eq!(mm_to_pixels(60.0, 300), 709);
    assert_eq!(mm_to_pixels(40.0, 300), 472);
    // 25.4 mm is one inch by definition.
    assert_eq!(mm_to_pixels(25.4, 300), 300);
    assert_eq!(mm_to_pixels(25.4, 203), 203);

    let config = PrintConfig::default();
    assert_eq!(config.label_px(), (709, 472));
    assert_eq!(config.scale().x, 709.0 / print::EDITOR_BASE_WIDTH);
}

#[test]
fn batch_document_captions_each_label() {
    let mut store = store();
    store.scan("SINK-0042").unwrap();
    store.scan("TAP-0007").unwrap();

    let html = render_batch(store.labels(), &PrintConfig::default(), None);
    assert!(html.contains("print-container"));
    assert!(html.contains("Label SINK-0042"));
    assert!(html.contains("Label TAP-0007"));
    assert!(html.contains("window.print()"));
}

#[test]
fn logo_fields_are_skipped_without_a_stored_logo() {
    let mut store = store();
    store.scan("SINK-0042").unwrap();
    let mut drag = DragState::default();
    store
        .with_active(|label| {
            let mut editor = FieldEditor::new(label, &mut drag);
            editor.add_field(FieldKind::Image, "");
        })
        .unwrap();

    let label = store.active_label().unwrap();
    let without = render_single(label, &PrintConfig::default(), None);
    assert!(!without.contains("<img"));

    let with = render_single(
        label,
        &PrintConfig::default(),
        Some("data:image/png;base64,AAAA"),
    );
    assert!(with.contains("<img"));
}

// ============================================================================
// EXPORT / IMPORT
// ============================================================================

#[test]
fn export_import_round_trip_is_lossless() {
    let mut source = store();
    source.scan("SINK-0042").unwrap();
    source.scan("TAP-0007").unwrap();

    let json = transfer::export_all(source.labels()).unwrap();
    assert!(json.contains("\"total_labels\": 2"));

    let mut target = store();
    let merged = target.import_merge(transfer::parse_import(&json).unwrap()).unwrap();
    assert_eq!(merged, 2);
    assert_eq!(target.labels().len(), 2);

    for (a, b) in source.labels().iter().zip(target.labels()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.name, b.name);
        assert_eq!(a.fields.len(), b.fields.len());
        for (fa, fb) in a.fields.iter().zip(&b.fields) {
            assert_eq!((fa.x, fa.y, fa.width, fa.height), (fb.x, fb.y, fb.width, fb.height));
            assert_eq!(fa.content, fb.content);
        }
    }
}

#[test]
fn importing_the_same_file_twice_changes_nothing() {
    let mut source = store();
    source.scan("SINK-0042").unwrap();
    let json = transfer::export_all(source.labels()).unwrap();

    let mut target = store();
    target.import_merge(transfer::parse_import(&json).unwrap()).unwrap();
    target.import_merge(transfer::parse_import(&json).unwrap()).unwrap();

    assert_eq!(target.labels().len(), 1);
    assert_eq!(target.labels()[0].name, "Label SINK-0042");
}

#[test]
fn import_overwrites_matching_ids_without_duplicating() {
    let mut store = store();
    store.scan("SINK-0042").unwrap();
    let id = store.active_label().unwrap().id.clone();

    let mut edited = store.active_label().unwrap().clone();
    edited.name = "Renamed elsewhere".into();
    let json = transfer::export_all(&[edited]).unwrap();

    store.import_merge(transfer::parse_import(&json).unwrap()).unwrap();
    assert_eq!(store.labels().len(), 1);
    assert_eq!(store.label(&id).unwrap().name, "Renamed elsewhere");
}

#[test]
fn import_accepts_minimal_label_objects() {
    let mut store = store();
    let json = r#"{"id": "ext-1", "name": "External label", "fields": []}"#;
    let merged = store
        .import_merge(transfer::parse_import(json).unwrap())
        .unwrap();
    assert_eq!(merged, 1);
    let label = store.label("ext-1").unwrap();
    assert_eq!(label.name, "External label");
}

#[test]
fn malformed_import_is_rejected_whole() {
    assert!(transfer::parse_import("{\"labels\": \"nope\"}").is_err());
    assert!(transfer::parse_import("not json at all").is_err());
}

#[test]
fn single_label_export_shape_imports_too() {
    let label = LabelTemplate::from_code("SINK-0042");
    let json = serde_json::to_string(&label).unwrap();
    let parsed = transfer::parse_import(&json).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].id, label.id);
}

// ============================================================================
// TEMPLATES
// ============================================================================

#[test]
fn presets_cannot_be_deleted_but_custom_templates_can() {
    let mut store = store();
    assert!(store.delete_template("preset-vanity").is_err());
    assert_eq!(store.templates().len(), 5);

    store.scan("SINK-0042").unwrap();
    let id = store.save_as_template("Corner sinks", Some("Sinks")).unwrap();
    store.delete_template(&id).unwrap();
    assert_eq!(store.templates().len(), 5);
}

#[test]
fn applying_a_template_creates_an_independent_instance() {
    let mut store = store();
    let instance_id = store.apply_template("preset-cabinet").unwrap();
    let mut drag = DragState::default();
    store
        .with_active(|label| {
            let mut editor = FieldEditor::new(label, &mut drag);
            editor.rename("Cabinet, left door");
        })
        .unwrap();

    // The preset itself is untouched.
    assert_eq!(store.template("preset-cabinet").unwrap().name, "Wall cabinet");
    assert_eq!(store.label(&instance_id).unwrap().name, "Cabinet, left door");
}

// ============================================================================
// QUEUE
// ============================================================================

#[tokio::test]
async fn disconnected_printer_fails_the_whole_cycle() {
    let queue = tokio::sync::Mutex::new(PrintQueue::new());
    {
        let mut q = queue.lock().await;
        q.set_connected(false);
        q.enqueue("label-1", "Vanity unit", 2);
    }

    let status = process_one(&queue).await;
    assert_eq!(status, Some(JobStatus::Error));

    let q = queue.lock().await;
    assert_eq!(q.jobs().len(), 1);
    assert_eq!(q.jobs()[0].error.as_deref(), Some("printer disconnected"));
    assert_eq!(q.status().failed_jobs, 1);
}

#[tokio::test]
async fn idle_queue_processes_nothing() {
    let queue = tokio::sync::Mutex::new(PrintQueue::new());
    assert_eq!(process_one(&queue).await, None);
}
