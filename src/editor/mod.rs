//! # Field Editor
//!
//! Mutations on the active label's ordered field list: adding and
//! removing fields, free-form drag positioning with canvas clamping, and
//! bounding-box resize with the minimum-size floor.
//!
//! Drag is a small state machine: `Idle → Dragging` on pointer-down over
//! a field, back to `Idle` on pointer-up or pointer-leave. Only one field
//! drags at a time; starting a new drag cancels any prior one.

use serde::{Deserialize, Serialize};

use crate::label::{FieldKind, LabelField, LabelTemplate};

/// A pointer position in editor-space units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Drag state. The offset preserves the grab point: pointer position
/// minus field origin, recorded at pointer-down.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        field_id: String,
        offset: Point,
    },
}

/// Editor over one label's fields.
///
/// The editor borrows the label mutably for the duration of an
/// interaction; the store persists the label afterwards.
pub struct FieldEditor<'a> {
    label: &'a mut LabelTemplate,
    drag: &'a mut DragState,
}

impl<'a> FieldEditor<'a> {
    pub fn new(label: &'a mut LabelTemplate, drag: &'a mut DragState) -> Self {
        Self { label, drag }
    }

    /// Append a new field with kind-specific editor defaults at the
    /// fixed default position. QR fields take `qr_payload` as content.
    pub fn add_field(&mut self, kind: FieldKind, qr_payload: &str) -> &LabelField {
        let field = LabelField::with_defaults(kind, qr_payload);
        self.label.fields.push(field);
        self.label.touch();
        self.label.fields.last().unwrap()
    }

    /// Remove a field by id. No-op if absent.
    pub fn remove_field(&mut self, field_id: &str) {
        let before = self.label.fields.len();
        self.label.fields.retain(|f| f.id != field_id);
        if self.label.fields.len() != before {
            self.label.touch();
        }
        // A removed field cannot stay mid-drag.
        if let DragState::Dragging { field_id: dragged, .. } = &*self.drag {
            if dragged == field_id {
                *self.drag = DragState::Idle;
            }
        }
    }

    /// Pointer-down over a field: record the grab offset and enter
    /// `Dragging`. Starting a new drag implicitly cancels a prior one.
    /// No-op if the field doesn't exist.
    pub fn begin_drag(&mut self, field_id: &str, pointer: Point) {
        let Some(field) = self.label.field(field_id) else {
            return;
        };
        *self.drag = DragState::Dragging {
            field_id: field_id.to_string(),
            offset: Point {
                x: pointer.x - field.x,
                y: pointer.y - field.y,
            },
        };
    }

    /// Pointer-move: reposition the dragged field from the pointer minus
    /// the recorded offset, clamped to the canvas. No-op when idle.
    pub fn drag_to(&mut self, pointer: Point) {
        let DragState::Dragging { field_id, offset } = &*self.drag else {
            return;
        };
        let (field_id, offset) = (field_id.clone(), *offset);
        if let Some(field) = self.label.field_mut(&field_id) {
            field.move_to(pointer.x - offset.x, pointer.y - offset.y);
            self.label.touch();
        }
    }

    /// Pointer-up or pointer-leave: back to idle.
    pub fn end_drag(&mut self) {
        *self.drag = DragState::Idle;
    }

    /// Resize a field's bounding box, flooring both dimensions at the
    /// minimum and re-inscribing QR codes. No-op if the field is absent.
    pub fn resize(&mut self, field_id: &str, width: f64, height: f64) {
        if let Some(field) = self.label.field_mut(field_id) {
            field.resize(width, height);
            self.label.touch();
        }
    }

    /// Replace a field's content string.
    pub fn set_content(&mut self, field_id: &str, content: &str) {
        if let Some(field) = self.label.field_mut(field_id) {
            field.content = content.to_string();
            self.label.touch();
        }
    }

    /// Set the font size of a text field. Ignored for other kinds.
    pub fn set_font_size(&mut self, field_id: &str, size: f64) {
        if let Some(field) = self.label.field_mut(field_id) {
            if field.kind == FieldKind::Text {
                field.font_size = Some(size);
                self.label.touch();
            }
        }
    }

    /// Set the QR square size of a QR field, capped so it stays
    /// inscribed in the bounding box. Ignored for other kinds.
    pub fn set_qr_size(&mut self, field_id: &str, size: f64) {
        if let Some(field) = self.label.field_mut(field_id) {
            if field.kind == FieldKind::Qr {
                field.qr_size = Some(size.min(field.width.min(field.height)));
                self.label.touch();
            }
        }
    }

    /// Rename the label.
    pub fn rename(&mut self, name: &str) {
        self.label.name = name.to_string();
        self.label.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{CANVAS_HEIGHT, CANVAS_WIDTH, MIN_FIELD_SIZE};
    use pretty_assertions::assert_eq;

    fn setup() -> (LabelTemplate, DragState) {
        (LabelTemplate::from_code("ABC123"), DragState::default())
    }

    #[test]
    fn test_add_field_uses_kind_defaults() {
        let (mut label, mut drag) = setup();
        let mut editor = FieldEditor::new(&mut label, &mut drag);
        let field = editor.add_field(FieldKind::Qr, "PART-7");
        assert_eq!(field.content, "PART-7");
        assert_eq!((field.width, field.height), (60.0, 60.0));
        assert_eq!(field.qr_size, Some(50.0));

        let field = editor.add_field(FieldKind::Image, "");
        assert_eq!((field.width, field.height), (50.0, 50.0));
        assert_eq!(label.fields.len(), 4);
    }

    #[test]
    fn test_remove_field_is_noop_when_absent() {
        let (mut label, mut drag) = setup();
        let mut editor = FieldEditor::new(&mut label, &mut drag);
        editor.remove_field("no-such-field");
        assert_eq!(label.fields.len(), 2);
    }

    #[test]
    fn test_drag_preserves_grab_point() {
        let (mut label, mut drag) = setup();
        let id = label.fields[0].id.clone();
        let mut editor = FieldEditor::new(&mut label, &mut drag);

        // Grab the field (origin 10,10) at pointer (15,20): offset (5,10).
        editor.begin_drag(&id, Point { x: 15.0, y: 20.0 });
        editor.drag_to(Point { x: 55.0, y: 70.0 });
        editor.end_drag();

        let field = label.field(&id).unwrap();
        assert_eq!((field.x, field.y), (50.0, 60.0));
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_drag_clamps_to_canvas_bounds() {
        let (mut label, mut drag) = setup();
        let id = label.fields[0].id.clone();
        let (w, h) = (label.fields[0].width, label.fields[0].height);
        let mut editor = FieldEditor::new(&mut label, &mut drag);

        editor.begin_drag(&id, Point { x: 10.0, y: 10.0 });
        editor.drag_to(Point { x: 10_000.0, y: -10_000.0 });

        let field = label.field(&id).unwrap();
        assert_eq!(field.x, CANVAS_WIDTH - w);
        assert_eq!(field.y, 0.0);
        assert!(field.y + h <= CANVAS_HEIGHT);
    }

    #[test]
    fn test_new_drag_cancels_prior_drag() {
        let (mut label, mut drag) = setup();
        let first = label.fields[0].id.clone();
        let second = label.fields[1].id.clone();
        let mut editor = FieldEditor::new(&mut label, &mut drag);

        editor.begin_drag(&first, Point { x: 10.0, y: 10.0 });
        editor.begin_drag(&second, Point { x: 120.0, y: 10.0 });
        editor.drag_to(Point { x: 60.0, y: 60.0 });

        // Only the second field moved.
        assert_eq!(label.field(&first).unwrap().x, 10.0);
        assert_eq!(label.field(&second).unwrap().x, 60.0);
    }

    #[test]
    fn test_drag_without_begin_is_noop() {
        let (mut label, mut drag) = setup();
        let mut editor = FieldEditor::new(&mut label, &mut drag);
        editor.drag_to(Point { x: 90.0, y: 90.0 });
        assert_eq!(label.fields[0].x, 10.0);
    }

    #[test]
    fn test_removing_dragged_field_resets_state() {
        let (mut label, mut drag) = setup();
        let id = label.fields[0].id.clone();
        let mut editor = FieldEditor::new(&mut label, &mut drag);
        editor.begin_drag(&id, Point { x: 10.0, y: 10.0 });
        editor.remove_field(&id);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_resize_floors_at_minimum() {
        let (mut label, mut drag) = setup();
        let id = label.fields[0].id.clone();
        let mut editor = FieldEditor::new(&mut label, &mut drag);
        editor.resize(&id, 4.0, 400.0);
        let field = label.field(&id).unwrap();
        assert_eq!(field.width, MIN_FIELD_SIZE);
        assert_eq!(field.height, 400.0);
    }

    #[test]
    fn test_resize_recomputes_qr_size() {
        let (mut label, mut drag) = setup();
        let id = label.fields[1].id.clone();
        let mut editor = FieldEditor::new(&mut label, &mut drag);
        editor.resize(&id, 90.0, 30.0);
        let field = label.field(&id).unwrap();
        assert_eq!(field.qr_size, Some(30.0));
    }

    #[test]
    fn test_set_qr_size_stays_inscribed() {
        let (mut label, mut drag) = setup();
        let id = label.fields[1].id.clone();
        let mut editor = FieldEditor::new(&mut label, &mut drag);
        editor.set_qr_size(&id, 500.0);
        assert_eq!(label.field(&id).unwrap().qr_size, Some(60.0));
    }

    #[test]
    fn test_font_size_ignored_for_qr_fields() {
        let (mut label, mut drag) = setup();
        let id = label.fields[1].id.clone();
        let mut editor = FieldEditor::new(&mut label, &mut drag);
        editor.set_font_size(&id, 30.0);
        assert_eq!(label.field(&id).unwrap().font_size, None);
    }
}
