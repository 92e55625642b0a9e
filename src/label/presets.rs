//! Built-in label templates.
//!
//! Presets carry the reserved [`PRESET_PREFIX`] on their ids and cannot be
//! deleted through the store. They cover the furniture-part labels the
//! factory prints most: bathroom vanities, mirrors, cabinets, accessories
//! and faucets.

use chrono::Utc;

use super::field::LabelField;
use super::template::LabelTemplate;

/// Reserved id prefix marking a built-in, non-deletable template.
pub const PRESET_PREFIX: &str = "preset-";

/// True if the id denotes a built-in preset.
pub fn is_preset(id: &str) -> bool {
    id.starts_with(PRESET_PREFIX)
}

fn preset(
    id: &str,
    name: &str,
    category: &str,
    fields: Vec<LabelField>,
) -> LabelTemplate {
    let now = Utc::now();
    LabelTemplate {
        id: id.to_string(),
        name: name.to_string(),
        fields,
        created_at: now,
        updated_at: now,
        is_template: true,
        template_category: Some(category.to_string()),
        label_size: None,
        print_settings: None,
    }
}

/// The built-in template set, used as the fallback when no templates are
/// stored (or when the stored collection fails to parse).
pub fn built_in() -> Vec<LabelTemplate> {
    vec![
        preset(
            "preset-vanity",
            "Vanity unit",
            "Bathroom furniture",
            vec![
                LabelField::text("Vanity unit")
                    .sized(120.0, 25.0)
                    .font_size(14.0),
                LabelField::text("Model: [name]")
                    .at(10.0, 40.0)
                    .sized(100.0, 20.0)
                    .font_size(10.0),
                LabelField::text("Size: [dimensions]")
                    .at(10.0, 65.0)
                    .sized(100.0, 20.0)
                    .font_size(10.0),
                LabelField::qr("[part number]").at(140.0, 10.0),
            ],
        ),
        preset(
            "preset-mirror",
            "Bathroom mirror",
            "Bathroom furniture",
            vec![
                LabelField::text("Mirror").sized(80.0, 25.0).font_size(14.0),
                LabelField::text("Backlit: [yes/no]")
                    .at(10.0, 40.0)
                    .sized(120.0, 20.0)
                    .font_size(10.0),
                LabelField::qr("[part number]").at(100.0, 10.0),
            ],
        ),
        preset(
            "preset-cabinet",
            "Wall cabinet",
            "Bathroom furniture",
            vec![
                LabelField::text("Wall cabinet")
                    .sized(100.0, 25.0)
                    .font_size(14.0),
                LabelField::text("Material: [material]")
                    .at(10.0, 40.0)
                    .sized(100.0, 20.0)
                    .font_size(10.0),
                LabelField::text("Color: [color]")
                    .at(10.0, 65.0)
                    .sized(100.0, 20.0)
                    .font_size(10.0),
                LabelField::qr("[part number]").at(120.0, 10.0),
            ],
        ),
        preset(
            "preset-accessories",
            "Bathroom accessories",
            "Accessories",
            vec![
                LabelField::text("Accessory: [name]")
                    .sized(120.0, 25.0)
                    .font_size(14.0),
                LabelField::text("Type: [holder/hook/shelf]")
                    .at(10.0, 40.0)
                    .sized(120.0, 20.0)
                    .font_size(10.0),
                LabelField::qr("[part number]")
                    .at(140.0, 10.0)
                    .sized(50.0, 50.0)
                    .qr_size(40.0),
            ],
        ),
        preset(
            "preset-faucet",
            "Bathroom faucet",
            "Plumbing",
            vec![
                LabelField::text("Faucet").sized(80.0, 25.0).font_size(14.0),
                LabelField::text("Type: [wall/deck mounted]")
                    .at(10.0, 40.0)
                    .sized(120.0, 20.0)
                    .font_size(10.0),
                LabelField::text("Color: [color]")
                    .at(10.0, 65.0)
                    .sized(100.0, 20.0)
                    .font_size(10.0),
                LabelField::qr("[part number]").at(140.0, 10.0),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_carry_the_reserved_prefix() {
        for template in built_in() {
            assert!(is_preset(&template.id), "{} is not preset-prefixed", template.id);
            assert!(template.is_template);
        }
    }

    #[test]
    fn test_preset_ids_are_unique() {
        let presets = built_in();
        let mut ids: Vec<_> = presets.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), presets.len());
    }
}
