use crate::domain::blueprints::{Blueprint, BlueprintKind};
use crate::domain::fields::{FieldDefinition, FieldOption, FieldType, FieldValidation};
use crate::domain::{BlueprintName, FieldName, Label};

/// Builder helpers for blueprints and fields.
///
/// Public so that other crates can reuse them for their own tests.

pub fn field(name: &str, field_type: FieldType) -> FieldDefinition {
    FieldDefinition::new(
        FieldName::try_new(name).unwrap(),
        Label::plain(name),
        field_type,
    )
}

pub fn text_field(name: &str) -> FieldDefinition {
    field(name, FieldType::Text)
}

pub fn bilingual_text(name: &str, field_type: FieldType, required: bool) -> FieldDefinition {
    let mut f = field(name, field_type);
    f.bilingual = true;
    f.required = required;
    f
}

pub fn select_field(name: &str, values: &[&str]) -> FieldDefinition {
    let mut f = field(name, FieldType::Select);
    f.options = values
        .iter()
        .map(|v| FieldOption {
            value: (*v).to_string(),
            label: Label::plain(*v),
        })
        .collect();
    f
}

pub fn group(name: &str, children: Vec<FieldDefinition>) -> FieldDefinition {
    let mut f = field(name, FieldType::Group);
    f.fields = children;
    f
}

pub fn repeater(
    name: &str,
    min: Option<f64>,
    max: Option<f64>,
    children: Vec<FieldDefinition>,
) -> FieldDefinition {
    let mut f = field(name, FieldType::Repeater);
    f.fields = children;
    if min.is_some() || max.is_some() {
        f.validation = Some(FieldValidation {
            min,
            max,
            ..FieldValidation::default()
        });
    }
    f
}

/// A multi-instance component blueprint. Panics on a malformed field
/// tree, which is what a test wants.
pub fn component(name: &str, fields: Vec<FieldDefinition>) -> Blueprint {
    Blueprint::new(
        BlueprintName::try_new(name).unwrap(),
        BlueprintKind::Component,
        name,
        None,
        true,
        false,
        None,
        None,
        fields,
    )
    .unwrap()
}

/// A system document blueprint, optionally singleton.
pub fn system_document(name: &str, allow_multiple: bool, fields: Vec<FieldDefinition>) -> Blueprint {
    Blueprint::new(
        BlueprintName::try_new(name).unwrap(),
        BlueprintKind::Document,
        name,
        None,
        allow_multiple,
        true,
        None,
        None,
        fields,
    )
    .unwrap()
}
