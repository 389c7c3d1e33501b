use std::path::Path;

use anyhow::{Context, anyhow};
use serde::Deserialize;

use crate::domain::BlueprintName;
use crate::domain::FieldName;
use crate::domain::Label;
use crate::domain::blueprints::{Blueprint, BlueprintKind};
use crate::domain::fields::{FieldDefinition, FieldOption, FieldType, FieldValidation};
use crate::infrastructure::store::BlueprintStore;

/// Loads every `*.json` blueprint definition in a directory into a
/// fresh store. Definitions that violate schema invariants abort the
/// load; nothing partially-valid ever reaches the store.
pub fn load(definitions_path: &str) -> Result<BlueprintStore, anyhow::Error> {
    use std::fs;

    let dir_path = Path::new(definitions_path);

    tracing::debug!("Loading blueprint definitions from {}", dir_path.to_string_lossy());

    let entries = fs::read_dir(dir_path).with_context(|| {
        format!(
            "failed to read blueprint definitions directory: {}",
            dir_path.to_string_lossy()
        )
    })?;

    let store = BlueprintStore::new();
    for entry_res in entries {
        let entry = entry_res.map_err(|e| anyhow!("failed to read a directory entry: {}", e))?;
        let path = entry.path();
        if path.is_file() && is_json(&path) {
            let blueprint = load_blueprint(&path)?;
            store
                .upsert(blueprint)
                .with_context(|| format!("registering blueprint from '{}'", path.to_string_lossy()))?;
        }
    }

    Ok(store)
}

/// Parses a single serialized blueprint definition.
pub fn from_json_str(content: &str) -> Result<Blueprint, anyhow::Error> {
    let record = serde_json::from_str::<BlueprintRecord>(content)
        .context("failed to parse JSON blueprint definition")?;
    record.try_into()
}

fn load_blueprint(path: &Path) -> Result<Blueprint, anyhow::Error> {
    use std::fs;

    let path_str = path.to_string_lossy().into_owned();

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read blueprint definition file '{}'", path_str))?;

    from_json_str(&content)
        .with_context(|| format!("in blueprint definition '{}'", path_str))
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

// internal structs for deserializing

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlueprintRecord {
    name: String,
    #[serde(rename = "blueprintType", alias = "kind")]
    kind: BlueprintKind,
    display_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_allow_multiple")]
    allow_multiple: bool,
    #[serde(default)]
    is_system: bool,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    fields: Vec<FieldRecord>,
}

fn default_allow_multiple() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldRecord {
    name: String,
    label: Label,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    bilingual: bool,
    #[serde(default)]
    default_value: Option<serde_json::Value>,
    #[serde(default)]
    help_text: Option<Label>,
    #[serde(default)]
    validation: Option<FieldValidation>,
    #[serde(default)]
    options: Vec<FieldOptionRecord>,
    #[serde(default)]
    reference_type: Option<String>,
    #[serde(default)]
    fields: Vec<FieldRecord>,
}

#[derive(Clone, Debug, Deserialize)]
struct FieldOptionRecord {
    value: String,
    label: Label,
}

// conversion into the blueprint model

impl TryFrom<BlueprintRecord> for Blueprint {
    type Error = anyhow::Error;

    fn try_from(value: BlueprintRecord) -> Result<Self, Self::Error> {
        let name = BlueprintName::try_new(&value.name)
            .with_context(|| format!("invalid blueprint name '{}'", value.name))?;
        let fields: Result<Vec<FieldDefinition>, anyhow::Error> = value
            .fields
            .into_iter()
            .map(FieldDefinition::try_from)
            .collect();
        let blueprint = Blueprint::new(
            name,
            value.kind,
            value.display_name,
            value.description,
            value.allow_multiple,
            value.is_system,
            value.icon,
            value.category,
            fields?,
        )?;
        Ok(blueprint)
    }
}

impl TryFrom<FieldRecord> for FieldDefinition {
    type Error = anyhow::Error;

    fn try_from(value: FieldRecord) -> Result<Self, Self::Error> {
        let name = FieldName::try_new(&value.name)
            .with_context(|| format!("invalid field name '{}'", value.name))?;
        let field_type = FieldType::parse(&value.field_type)
            .with_context(|| format!("in field '{}'", value.name))?;
        let reference_type = value
            .reference_type
            .as_deref()
            .map(BlueprintName::try_new)
            .transpose()
            .with_context(|| format!("invalid reference target in field '{}'", value.name))?;
        let fields: Result<Vec<FieldDefinition>, anyhow::Error> = value
            .fields
            .into_iter()
            .map(FieldDefinition::try_from)
            .collect();

        Ok(Self {
            name,
            label: value.label,
            field_type,
            required: value.required,
            bilingual: value.bilingual,
            default_value: value.default_value,
            help_text: value.help_text,
            validation: value.validation,
            options: value.options.into_iter().map(FieldOption::from).collect(),
            reference_type,
            fields: fields?,
        })
    }
}

impl From<FieldOptionRecord> for FieldOption {
    fn from(value: FieldOptionRecord) -> Self {
        Self {
            value: value.value,
            label: value.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Blueprints, Locale};

    const HERO_BANNER: &str = r#"{
        "name": "HeroBanner",
        "displayName": "Hero Banner",
        "description": "Large banner section with heading, image, and CTA",
        "blueprintType": "COMPONENT",
        "category": "layout",
        "fields": [
            {
                "name": "heading",
                "label": { "en": "Heading", "ar": "العنوان" },
                "type": "text",
                "bilingual": true,
                "required": true,
                "validation": { "maxLength": 60 }
            },
            {
                "name": "backgroundImage",
                "label": { "en": "Background Image", "ar": "صورة الخلفية" },
                "type": "reference",
                "referenceType": "Asset",
                "required": true
            },
            {
                "name": "ctaButton",
                "label": "Call to Action Button",
                "type": "group",
                "fields": [
                    { "name": "text", "label": { "en": "Button Text" }, "type": "text", "bilingual": true },
                    { "name": "link", "label": "Link", "type": "text" },
                    {
                        "name": "style",
                        "label": "Style",
                        "type": "select",
                        "options": [
                            { "value": "primary", "label": { "en": "Primary", "ar": "أساسي" } },
                            { "value": "outline", "label": { "en": "Outline", "ar": "محدد" } }
                        ],
                        "defaultValue": "primary"
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_a_full_definition() {
        let blueprint = from_json_str(HERO_BANNER).unwrap();
        assert_eq!(blueprint.name.as_ref(), "HeroBanner");
        assert_eq!(blueprint.kind, BlueprintKind::Component);
        assert!(blueprint.allow_multiple);
        assert!(!blueprint.is_system);
        assert_eq!(blueprint.fields.len(), 3);

        let heading = &blueprint.fields[0];
        assert_eq!(heading.field_type, FieldType::Text);
        assert!(heading.bilingual);
        assert_eq!(heading.label.resolve(Locale::En), Some("Heading"));
        assert_eq!(heading.label.resolve(Locale::Ar), Some("العنوان"));
        assert_eq!(heading.validation.unwrap().max_length, Some(60));

        let image = &blueprint.fields[1];
        assert_eq!(image.field_type, FieldType::Reference);
        assert_eq!(image.reference_type.as_ref().unwrap().as_ref(), "Asset");

        let cta = &blueprint.fields[2];
        assert_eq!(cta.field_type, FieldType::Group);
        assert_eq!(cta.fields.len(), 3);
        assert_eq!(cta.fields[2].options.len(), 2);
    }

    const RICH_TEXT: &str = r#"{
        "name": "RichText",
        "displayName": "Rich Text",
        "blueprintType": "COMPONENT",
        "fields": [
            { "name": "content", "label": "Content", "type": "rich_text", "bilingual": true }
        ]
    }"#;

    #[test]
    fn loads_every_json_definition_in_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hero_banner.json"), HERO_BANNER).unwrap();
        std::fs::write(dir.path().join("rich_text.json"), RICH_TEXT).unwrap();
        // non-json entries are skipped, not errors
        std::fs::write(dir.path().join("notes.txt"), "scratch").unwrap();

        let store = load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get(&BlueprintName::try_new("HeroBanner").unwrap()).is_some());
        assert!(store.get(&BlueprintName::try_new("RichText").unwrap()).is_some());
    }

    #[test]
    fn a_malformed_definition_aborts_the_directory_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.json"), RICH_TEXT).unwrap();
        std::fs::write(
            dir.path().join("bad.json"),
            r#"{
                "name": "Bad",
                "displayName": "Bad",
                "blueprintType": "COMPONENT",
                "fields": [ { "name": "body", "label": "Body", "type": "markdown" } ]
            }"#,
        )
        .unwrap();

        let err = load(dir.path().to_str().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("unknown field type 'markdown'"));
    }

    #[test]
    fn a_missing_directory_reports_its_path() {
        let err = load("/definitely/not/a/real/path").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/a/real/path"));
    }

    #[test]
    fn rejects_an_unknown_field_type_tag() {
        let definition = r#"{
            "name": "Bad",
            "displayName": "Bad",
            "blueprintType": "COMPONENT",
            "fields": [ { "name": "body", "label": "Body", "type": "markdown" } ]
        }"#;
        let err = from_json_str(definition).unwrap_err();
        assert!(format!("{err:#}").contains("unknown field type 'markdown'"));
    }

    #[test]
    fn rejects_duplicate_sibling_names_at_parse_time() {
        let definition = r#"{
            "name": "Bad",
            "displayName": "Bad",
            "blueprintType": "COMPONENT",
            "fields": [
                { "name": "title", "label": "Title", "type": "text" },
                { "name": "title", "label": "Title", "type": "text" }
            ]
        }"#;
        assert!(from_json_str(definition).is_err());
    }
}
