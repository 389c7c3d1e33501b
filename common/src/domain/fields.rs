use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::blueprints::SchemaError;
use crate::domain::{BlueprintName, FieldName, Label};

// structs

/// A single named, typed slot within a blueprint or a nested field set.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: FieldName,
    pub label: Label,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Value stored per locale instead of once. Only meaningful for
    /// text-bearing kinds.
    #[serde(default)]
    pub bilingual: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    /// Choices for select/radio kinds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// Target blueprint for reference kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<BlueprintName>,
    /// Child field set for group/repeater kinds. Owned, never shared.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
}

/// The closed set of field kinds a blueprint may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    RichText,
    Number,
    Boolean,
    Select,
    Radio,
    Date,
    Email,
    Url,
    Color,
    File,
    Image,
    Video,
    Gallery,
    Reference,
    Group,
    Repeater,
}

/// One choice of a select/radio field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: Label,
}

/// Declarative constraints. `min`/`max` bound numeric values and
/// repeater/gallery element counts; `min_length`/`max_length` bound
/// resolved string lengths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

// implementations

impl FieldDefinition {
    /// A field of the given kind with no flags, constraints, or children.
    pub fn new(name: FieldName, label: Label, field_type: FieldType) -> Self {
        Self {
            name,
            label,
            field_type,
            required: false,
            bilingual: false,
            default_value: None,
            help_text: None,
            validation: None,
            options: Vec::new(),
            reference_type: None,
            fields: Vec::new(),
        }
    }
}

impl PartialEq for FieldDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for FieldDefinition {}

/// Checks the definition-time invariants of a field tree, recursively.
/// A malformed schema is rejected here, before any content can be
/// authored against it.
pub fn check_field_set(fields: &[FieldDefinition]) -> Result<(), SchemaError> {
    let mut seen: HashSet<&FieldName> = HashSet::new();
    for field in fields {
        if !seen.insert(&field.name) {
            return Err(SchemaError::DuplicateFieldName {
                field: field.name.clone(),
            });
        }
        check_field(field)?;
    }
    Ok(())
}

fn check_field(field: &FieldDefinition) -> Result<(), SchemaError> {
    let descriptor = field.field_type.describe();

    if field.bilingual && !descriptor.bilingual_capable {
        return Err(SchemaError::BilingualNotApplicable {
            field: field.name.clone(),
            field_type: field.field_type,
        });
    }

    if descriptor.recursive {
        if field.fields.is_empty() {
            return Err(SchemaError::EmptyFieldSet {
                field: field.name.clone(),
            });
        }
        check_field_set(&field.fields)?;
    }

    if descriptor.has_options {
        if let Some(default) = field.default_value.as_ref().and_then(|v| v.as_str()) {
            if !field.options.iter().any(|o| o.value == default) {
                return Err(SchemaError::UnknownOption {
                    field: field.name.clone(),
                    value: default.to_string(),
                });
            }
        }
    }

    if field.field_type == FieldType::Reference && field.reference_type.is_none() {
        return Err(SchemaError::MissingReferenceTarget {
            field: field.name.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{group, repeater, select_field, text_field};

    #[test]
    fn duplicate_sibling_names_are_rejected() {
        let fields = vec![text_field("title"), text_field("title")];
        assert!(matches!(
            check_field_set(&fields),
            Err(SchemaError::DuplicateFieldName { .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected_deep_in_the_tree() {
        let fields = vec![repeater(
            "items",
            None,
            None,
            vec![
                group("button", vec![text_field("url"), text_field("url")]),
            ],
        )];
        assert!(matches!(
            check_field_set(&fields),
            Err(SchemaError::DuplicateFieldName { .. })
        ));
    }

    #[test]
    fn same_name_in_different_branches_is_allowed() {
        let fields = vec![
            group("primaryButton", vec![text_field("text"), text_field("link")]),
            group("secondaryButton", vec![text_field("text"), text_field("link")]),
        ];
        assert!(check_field_set(&fields).is_ok());
    }

    #[test]
    fn recursive_kinds_need_at_least_one_child() {
        let fields = vec![repeater("items", None, None, vec![])];
        assert!(matches!(
            check_field_set(&fields),
            Err(SchemaError::EmptyFieldSet { .. })
        ));
    }

    #[test]
    fn bilingual_is_only_for_text_bearing_kinds() {
        let mut field = text_field("count");
        field.field_type = FieldType::Number;
        field.bilingual = true;
        assert!(matches!(
            check_field_set(&[field]),
            Err(SchemaError::BilingualNotApplicable { .. })
        ));
    }

    #[test]
    fn select_default_must_match_an_option() {
        let mut field = select_field("layout", &["grid", "masonry"]);
        field.default_value = Some(serde_json::json!("carousel"));
        assert!(matches!(
            check_field_set(&[field]),
            Err(SchemaError::UnknownOption { .. })
        ));
    }
}
