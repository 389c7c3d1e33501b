use std::{borrow::Borrow, fmt, hash::Hash};

use serde::{Deserialize, Serialize};

use crate::domain::fields::{check_field_set, FieldDefinition, FieldType};
use crate::domain::{BlueprintName, FieldName};

// structs

/// A named schema declaring the field structure for a class of content.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub name: BlueprintName,
    pub kind: BlueprintKind,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// false means singleton: at most one content instance at a time
    pub allow_multiple: bool,
    /// provisioned by the platform, protected from rename/delete
    pub is_system: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// classification tag for UI grouping, not semantically load-bearing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlueprintKind {
    /// a standalone content object
    Document,
    /// embeddable inside a document
    Component,
}

/// Schema-level errors. These abort the blueprint operation: a malformed
/// schema must never become visible to the resolver or validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    DuplicateFieldName { field: FieldName },
    EmptyFieldSet { field: FieldName },
    BilingualNotApplicable { field: FieldName, field_type: FieldType },
    UnknownOption { field: FieldName, value: String },
    MissingReferenceTarget { field: FieldName },
    ProtectedBlueprint { name: BlueprintName },
    AlreadyExists { name: BlueprintName },
    NotFound { name: BlueprintName },
}

// implementations

impl Blueprint {
    /// Builds a blueprint, enforcing the field-tree invariants before the
    /// definition can exist anywhere.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: BlueprintName,
        kind: BlueprintKind,
        display_name: impl Into<String>,
        description: Option<String>,
        allow_multiple: bool,
        is_system: bool,
        icon: Option<String>,
        category: Option<String>,
        fields: Vec<FieldDefinition>,
    ) -> Result<Self, SchemaError> {
        check_field_set(&fields)?;
        Ok(Self {
            name,
            kind,
            display_name: display_name.into(),
            description,
            allow_multiple,
            is_system,
            icon,
            category,
            fields,
        })
    }

    /// Whether one more content instance may be created given how many
    /// already exist. Singleton blueprints accept a single instance.
    pub fn accepts_instance_count(&self, existing: usize) -> bool {
        self.allow_multiple || existing == 0
    }
}

impl PartialEq for Blueprint {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for Blueprint {}

impl PartialEq<BlueprintName> for Blueprint {
    fn eq(&self, other: &BlueprintName) -> bool {
        self.name == *other
    }
}

impl Borrow<BlueprintName> for Blueprint {
    fn borrow(&self) -> &BlueprintName {
        &self.name
    }
}

impl Hash for Blueprint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateFieldName { field } => {
                write!(f, "field name '{field}' is declared twice among siblings")
            }
            SchemaError::EmptyFieldSet { field } => {
                write!(f, "field '{field}' must declare at least one child field")
            }
            SchemaError::BilingualNotApplicable { field, field_type } => {
                write!(
                    f,
                    "field '{field}' of type '{field_type}' cannot be bilingual"
                )
            }
            SchemaError::UnknownOption { field, value } => {
                write!(
                    f,
                    "default value '{value}' of field '{field}' matches no declared option"
                )
            }
            SchemaError::MissingReferenceTarget { field } => {
                write!(f, "reference field '{field}' names no target blueprint")
            }
            SchemaError::ProtectedBlueprint { name } => {
                write!(f, "blueprint '{name}' is a system blueprint and cannot be renamed or deleted")
            }
            SchemaError::AlreadyExists { name } => {
                write!(f, "a blueprint named '{name}' already exists")
            }
            SchemaError::NotFound { name } => {
                write!(f, "no blueprint named '{name}'")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
