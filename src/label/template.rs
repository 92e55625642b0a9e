//! Label templates and concrete label instances.
//!
//! Both share one struct: `is_template` distinguishes a reusable template
//! from a concrete printed-label instance. Field order is display/z-order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field::LabelField;

/// Physical size unit for a per-template label size override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    #[default]
    Mm,
    Inch,
}

/// Per-template physical label size override.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: SizeUnit,
}

impl LabelSize {
    /// Size in millimeters regardless of the stored unit.
    pub fn to_mm(&self) -> (f64, f64) {
        match self.unit {
            SizeUnit::Mm => (self.width, self.height),
            SizeUnit::Inch => (self.width * 25.4, self.height * 25.4),
        }
    }
}

/// Print orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in millimeters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 2.0,
            right: 2.0,
            bottom: 2.0,
            left: 2.0,
        }
    }
}

impl Margins {
    pub fn uniform(mm: f64) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

/// Per-template print settings override.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PrintSettings {
    pub dpi: u32,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub margins: Margins,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            dpi: 300,
            orientation: Orientation::Portrait,
            margins: Margins::default(),
        }
    }
}

/// A named, timestamped collection of fields.
///
/// Created from a QR lookup miss ([`LabelTemplate::from_code`]), from
/// applying a template ([`LabelTemplate::instantiate`]), or manually.
/// `updated_at` advances on every field or metadata mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub fields: Vec<LabelField>,
    /// Assigned on deserialization when the source predates timestamps.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_size: Option<LabelSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_settings: Option<PrintSettings>,
}

impl LabelTemplate {
    /// Create an empty label instance with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            fields: Vec::new(),
            created_at: now,
            updated_at: now,
            is_template: false,
            template_category: None,
            label_size: None,
            print_settings: None,
        }
    }

    /// Synthesize a label for a scanned code with no stored match:
    /// one text field echoing the code and one QR field encoding it.
    pub fn from_code(code: &str) -> Self {
        let mut label = Self::new(format!("Label {}", code));
        label.fields = vec![
            LabelField::text(format!("QR: {}", code)),
            LabelField::qr(code).at(120.0, 10.0),
        ];
        label
    }

    /// Clone this template into a concrete label instance: fresh id and
    /// timestamps, `is_template` cleared, name marked as a copy.
    pub fn instantiate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: format!("{} (copy)", self.name),
            is_template: false,
            template_category: None,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Duplicate a template, keeping `is_template` and category.
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: format!("{} (copy)", self.name),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Advance `updated_at`. Call after every mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Look up a field by id.
    pub fn field(&self, field_id: &str) -> Option<&LabelField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Look up a field by id, mutably.
    pub fn field_mut(&mut self, field_id: &str) -> Option<&mut LabelField> {
        self.fields.iter_mut().find(|f| f.id == field_id)
    }

    /// True if any text field's content includes the queried substring.
    pub fn matches_code(&self, code: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.kind == super::FieldKind::Text && f.content.contains(code))
    }
}
