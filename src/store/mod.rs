//! # Label/Template Store
//!
//! Owns the collections of saved labels and templates plus the settings
//! and logo blobs, persisted through a string-keyed [`Storage`] backend.
//! Every observed mutation rewrites the whole corresponding collection —
//! there is no partial write or transaction concept.
//!
//! Malformed persisted JSON is never fatal: the store logs the parse error
//! and falls back to an empty collection (templates fall back to the
//! built-in presets).

mod backend;

pub use backend::{FsStorage, MemoryStorage, Storage};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EtiquetaError;
use crate::label::{self, LabelTemplate};

/// Storage key for the saved label instances collection.
pub const KEY_LABELS: &str = "labels.json";
/// Storage key for the template collection.
pub const KEY_TEMPLATES: &str = "templates.json";
/// Storage key for the settings object.
pub const KEY_SETTINGS: &str = "settings.json";
/// Storage key for the logo (an opaque data-URI string, not JSON).
pub const KEY_LOGO: &str = "logo.txt";

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub auto_print: bool,
    pub last_updated: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_print: false,
            last_updated: Utc::now(),
        }
    }
}

/// Outcome of a QR scan: the matched stored label, or a freshly
/// synthesized one when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOutcome {
    Found,
    Created,
}

/// The label/template store.
///
/// Collections live in memory; each mutating operation serializes the
/// affected collection back through the backend before returning.
pub struct LabelStore<S: Storage> {
    storage: S,
    labels: Vec<LabelTemplate>,
    templates: Vec<LabelTemplate>,
    settings: Settings,
    logo: Option<String>,
    /// Id of the currently active label instance, if any.
    active: Option<String>,
}

impl<S: Storage> LabelStore<S> {
    /// Load all collections from the backend.
    ///
    /// Parse failures are logged and recovered: labels become empty,
    /// templates fall back to the presets (which are then persisted, as
    /// on first run).
    pub fn load(storage: S) -> Result<Self, EtiquetaError> {
        let labels = match storage.read(KEY_LABELS)? {
            Some(raw) => parse_collection(&raw, KEY_LABELS),
            None => Vec::new(),
        };

        let templates = match storage.read(KEY_TEMPLATES)? {
            Some(raw) => {
                let parsed = parse_collection(&raw, KEY_TEMPLATES);
                if parsed.is_empty() {
                    label::built_in()
                } else {
                    parsed
                }
            }
            None => {
                let presets = label::built_in();
                storage.write(KEY_TEMPLATES, &serde_json::to_string(&presets)?)?;
                presets
            }
        };

        let settings = match storage.read(KEY_SETTINGS)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                eprintln!("[store] failed to parse {}: {}", KEY_SETTINGS, e);
                Settings::default()
            }),
            None => Settings::default(),
        };

        let logo = storage.read(KEY_LOGO)?;

        Ok(Self {
            storage,
            labels,
            templates,
            settings,
            logo,
            active: None,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn labels(&self) -> &[LabelTemplate] {
        &self.labels
    }

    pub fn templates(&self) -> &[LabelTemplate] {
        &self.templates
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    pub fn label(&self, id: &str) -> Option<&LabelTemplate> {
        self.labels.iter().find(|l| l.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&LabelTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// The currently active label instance.
    pub fn active_label(&self) -> Option<&LabelTemplate> {
        let id = self.active.as_deref()?;
        self.label(id)
    }

    pub fn set_active(&mut self, id: Option<String>) {
        self.active = id;
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Linear scan over stored label instances: first label containing a
    /// text field whose content includes `code` wins (storage order).
    pub fn find_by_content(&self, code: &str) -> Option<&LabelTemplate> {
        self.labels.iter().find(|l| l.matches_code(code))
    }

    /// QR scan flow: load the matching label as active, or synthesize,
    /// persist and activate a new two-field label when nothing matches.
    pub fn scan(&mut self, code: &str) -> Result<ScanOutcome, EtiquetaError> {
        if code.trim().is_empty() {
            return Err(EtiquetaError::Validation("empty QR code".into()));
        }
        if let Some(found) = self.find_by_content(code) {
            self.active = Some(found.id.clone());
            return Ok(ScanOutcome::Found);
        }
        let label = LabelTemplate::from_code(code);
        self.active = Some(label.id.clone());
        self.labels.push(label);
        self.save_labels()?;
        Ok(ScanOutcome::Created)
    }

    // ------------------------------------------------------------------
    // Label mutation
    // ------------------------------------------------------------------

    /// Insert or overwrite one label instance by id and persist.
    pub fn upsert_label(&mut self, label: LabelTemplate) -> Result<(), EtiquetaError> {
        match self.labels.iter_mut().find(|l| l.id == label.id) {
            Some(existing) => *existing = label,
            None => self.labels.push(label),
        }
        self.save_labels()
    }

    /// Run one interaction against the active label and persist the
    /// collection if the label changed. Mutating operations advance
    /// `updated_at` via [`LabelTemplate::touch`]; a closure that leaves
    /// it untouched (pointer-up, a drag with nothing grabbed) writes
    /// nothing. No-op (Ok) when nothing is active.
    pub fn with_active<F>(&mut self, f: F) -> Result<(), EtiquetaError>
    where
        F: FnOnce(&mut LabelTemplate),
    {
        let Some(id) = self.active.clone() else {
            return Ok(());
        };
        let Some(label) = self.labels.iter_mut().find(|l| l.id == id) else {
            return Ok(());
        };
        let before = label.updated_at;
        f(label);
        if label.updated_at == before {
            return Ok(());
        }
        self.save_labels()
    }

    /// Delete one label instance; clears the active selection if it was
    /// the deleted one.
    pub fn delete_label(&mut self, id: &str) -> Result<(), EtiquetaError> {
        self.labels.retain(|l| l.id != id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        self.save_labels()
    }

    /// Delete every label instance. Settings and logo are untouched.
    pub fn clear_labels(&mut self) -> Result<(), EtiquetaError> {
        self.labels.clear();
        self.active = None;
        self.save_labels()
    }

    /// Delete labels, settings and logo. Templates are untouched.
    pub fn clear_all(&mut self) -> Result<(), EtiquetaError> {
        self.labels.clear();
        self.active = None;
        self.settings = Settings::default();
        self.logo = None;
        self.storage.remove(KEY_LABELS)?;
        self.storage.remove(KEY_SETTINGS)?;
        self.storage.remove(KEY_LOGO)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    /// Save the active label as a new template.
    pub fn save_as_template(
        &mut self,
        name: &str,
        category: Option<&str>,
    ) -> Result<String, EtiquetaError> {
        if name.trim().is_empty() {
            return Err(EtiquetaError::Validation("template name is empty".into()));
        }
        let Some(active) = self.active_label() else {
            return Err(EtiquetaError::Validation("no active label".into()));
        };
        let mut template = active.clone();
        template.id = uuid::Uuid::new_v4().to_string();
        template.name = name.to_string();
        template.is_template = true;
        template.template_category =
            Some(category.unwrap_or("General").to_string());
        let now = Utc::now();
        template.created_at = now;
        template.updated_at = now;
        let id = template.id.clone();
        self.templates.push(template);
        self.save_templates()?;
        Ok(id)
    }

    /// Clone a template into a fresh label instance and make it active.
    pub fn apply_template(&mut self, template_id: &str) -> Result<String, EtiquetaError> {
        let Some(template) = self.template(template_id) else {
            return Err(EtiquetaError::Validation(format!(
                "unknown template: {}",
                template_id
            )));
        };
        let instance = template.instantiate();
        let id = instance.id.clone();
        self.active = Some(id.clone());
        self.labels.push(instance);
        self.save_labels()?;
        Ok(id)
    }

    /// Duplicate a template (presets may be duplicated, just not deleted).
    pub fn duplicate_template(&mut self, template_id: &str) -> Result<String, EtiquetaError> {
        let Some(template) = self.template(template_id) else {
            return Err(EtiquetaError::Validation(format!(
                "unknown template: {}",
                template_id
            )));
        };
        let copy = template.duplicate();
        let id = copy.id.clone();
        self.templates.push(copy);
        self.save_templates()?;
        Ok(id)
    }

    /// Delete a template. Built-in presets are rejected and the
    /// collection is left unchanged.
    pub fn delete_template(&mut self, template_id: &str) -> Result<(), EtiquetaError> {
        if label::is_preset(template_id) {
            return Err(EtiquetaError::Validation(
                "built-in templates cannot be deleted".into(),
            ));
        }
        self.templates.retain(|t| t.id != template_id);
        self.save_templates()
    }

    // ------------------------------------------------------------------
    // Settings and logo
    // ------------------------------------------------------------------

    pub fn set_auto_print(&mut self, auto_print: bool) -> Result<(), EtiquetaError> {
        self.settings.auto_print = auto_print;
        self.settings.last_updated = Utc::now();
        self.save_settings()
    }

    pub fn set_logo(&mut self, logo: Option<String>) -> Result<(), EtiquetaError> {
        self.logo = logo;
        match &self.logo {
            Some(data) => self.storage.write(KEY_LOGO, data),
            None => self.storage.remove(KEY_LOGO),
        }
    }

    // ------------------------------------------------------------------
    // Import merge
    // ------------------------------------------------------------------

    /// Merge imported labels into the stored collection, matching
    /// strictly by id, last write wins.
    ///
    /// Existing id: the incoming entry overwrites it and `updated_at` is
    /// refreshed. New id: appended, assigning `created_at` when the
    /// incoming entry predates the concept. Duplicate ids inside one
    /// import resolve by later entries overwriting earlier ones.
    ///
    /// Returns the number of entries merged.
    pub fn import_merge(
        &mut self,
        incoming: Vec<LabelTemplate>,
    ) -> Result<usize, EtiquetaError> {
        let count = incoming.len();
        let now = Utc::now();
        for mut imported in incoming {
            imported.updated_at = now;
            match self.labels.iter_mut().find(|l| l.id == imported.id) {
                Some(existing) => *existing = imported,
                None => self.labels.push(imported),
            }
        }
        self.save_labels()?;
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Whole-collection persistence
    // ------------------------------------------------------------------

    fn save_labels(&self) -> Result<(), EtiquetaError> {
        self.storage
            .write(KEY_LABELS, &serde_json::to_string(&self.labels)?)
    }

    fn save_templates(&self) -> Result<(), EtiquetaError> {
        self.storage
            .write(KEY_TEMPLATES, &serde_json::to_string(&self.templates)?)
    }

    fn save_settings(&self) -> Result<(), EtiquetaError> {
        self.storage
            .write(KEY_SETTINGS, &serde_json::to_string(&self.settings)?)
    }
}

/// Parse a persisted collection, recovering from malformed JSON with an
/// empty collection and a logged error.
fn parse_collection(raw: &str, key: &str) -> Vec<LabelTemplate> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        eprintln!("[store] failed to parse {}: {}", key, e);
        Vec::new()
    })
}
