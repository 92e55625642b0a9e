//! # Label Data Model
//!
//! Templates, concrete label instances, and the positioned fields they
//! contain. Fields live on a fixed virtual canvas (200×256 editor-space
//! units); the print renderer scales them to physical pixels at print time.

mod field;
mod presets;
mod template;

pub use field::{CANVAS_HEIGHT, CANVAS_WIDTH, FieldKind, LabelField, MIN_FIELD_SIZE};
pub use presets::{PRESET_PREFIX, built_in, is_preset};
pub use template::{
    LabelSize, LabelTemplate, Margins, Orientation, PrintSettings, SizeUnit,
};
