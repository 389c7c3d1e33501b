use serde::Serialize;
use serde::ser::SerializeStruct;
use serde_json::{Map, Value};

use blueprint_common::Locale;
use blueprint_common::blueprints::Blueprint;
use blueprint_common::fields::{FieldDefinition, FieldType, FieldValidation};
use blueprint_common::{AR_LOCALE_KEY, BlueprintName, EN_LOCALE_KEY};

use crate::resolve::{ResolvedValue, resolve_field};

// structs

/// The complete set of constraint violations for one content instance.
/// Content-level problems are data, never exceptions: an editorial UI
/// needs every problem in one pass, not the first failure.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldWarning>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// dot/bracket-addressed field path, e.g. "items[2].question"
    pub path: String,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Required,
    TooShort,
    TooLong,
    TooFew,
    TooMany,
    InvalidOption,
    InvalidReference,
}

/// Soft findings that never block a save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWarning {
    pub path: String,
    pub kind: WarningKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    MissingTranslation,
}

/// A reference field's raw identifier, collected for the caller to check
/// against stored instances. The validator itself performs no lookups.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSlot {
    pub path: String,
    pub target: BlueprintName,
    pub id: String,
}

// implementations

impl ValidationReport {
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Appends a caller-produced error, e.g. an `InvalidReference` after
    /// a failed cross-entity lookup.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    fn error(&mut self, path: &str, kind: ErrorKind, message: String) {
        self.errors.push(FieldError {
            path: path.to_string(),
            kind,
            message,
        });
    }

    fn warn(&mut self, path: &str, kind: WarningKind, message: String) {
        self.warnings.push(FieldWarning {
            path: path.to_string(),
            kind,
            message,
        });
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 3)?;
        state.serialize_field("valid", &self.valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

impl FieldError {
    /// An `InvalidReference` for a slot whose target the caller failed
    /// to find.
    pub fn invalid_reference(slot: &ReferenceSlot) -> Self {
        Self {
            path: slot.path.clone(),
            kind: ErrorKind::InvalidReference,
            message: format!(
                "no '{}' instance with identifier '{}'",
                slot.target, slot.id
            ),
        }
    }
}

/// Validates a content instance against its blueprint, accumulating
/// every violation. `required` is evaluated post-bilingual-resolution
/// for the requested locale only.
pub fn validate(
    blueprint: &Blueprint,
    instance: &Map<String, Value>,
    locale: Locale,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_field_set(&blueprint.fields, Some(instance), locale, "", &mut report);
    report
}

/// Collects every reference identifier present in the instance so the
/// caller can verify the targets exist.
pub fn collect_references(blueprint: &Blueprint, instance: &Map<String, Value>) -> Vec<ReferenceSlot> {
    let mut slots = Vec::new();
    collect_from_set(&blueprint.fields, Some(instance), "", &mut slots);
    slots
}

fn validate_field_set(
    fields: &[FieldDefinition],
    value: Option<&Map<String, Value>>,
    locale: Locale,
    prefix: &str,
    report: &mut ValidationReport,
) {
    for field in fields {
        let raw = value.and_then(|object| object.get(field.name.as_ref()));
        let path = join_path(prefix, field.name.as_ref());
        validate_field(field, raw, locale, &path, report);
    }
}

fn validate_field(
    field: &FieldDefinition,
    raw: Option<&Value>,
    locale: Locale,
    path: &str,
    report: &mut ValidationReport,
) {
    match field.field_type {
        FieldType::Group => {
            let sub_object = raw.and_then(Value::as_object);
            if field.required && sub_object.is_none() {
                report.error(path, ErrorKind::Required, required_message(field, locale));
                return;
            }
            validate_field_set(&field.fields, sub_object, locale, path, report);
        }
        FieldType::Repeater => {
            let elements = raw.and_then(Value::as_array);
            check_count(field, elements.map_or(0, |e| e.len()), locale, path, report);
            for (index, element) in elements.into_iter().flatten().enumerate() {
                let element_path = format!("{path}[{index}]");
                validate_field_set(
                    &field.fields,
                    element.as_object(),
                    locale,
                    &element_path,
                    report,
                );
            }
        }
        FieldType::Gallery => {
            // null slots are not images; resolution drops them, so the
            // count must not see them either
            let len = raw.and_then(Value::as_array).map_or(0, |elements| {
                elements.iter().filter(|e| !e.is_null()).count()
            });
            check_count(field, len, locale, path, report);
        }
        FieldType::Reference => {
            let id = raw.and_then(Value::as_str).filter(|s| !s.is_empty());
            if field.required && id.is_none() {
                report.error(path, ErrorKind::Required, required_message(field, locale));
            }
        }
        _ => validate_scalar(field, raw, locale, path, report),
    }
}

// min/max on repeaters and galleries bound the raw element count,
// independent of locale.
fn check_count(
    field: &FieldDefinition,
    len: usize,
    locale: Locale,
    path: &str,
    report: &mut ValidationReport,
) {
    let validation = field.validation.unwrap_or_default();
    let display = display_name(field, locale);

    if let Some(min) = validation.min {
        if (len as f64) < min {
            report.error(
                path,
                ErrorKind::TooFew,
                format!("{display} needs at least {min} items, got {len}"),
            );
            return;
        }
    } else if field.required && len == 0 {
        report.error(path, ErrorKind::Required, required_message(field, locale));
        return;
    }

    if let Some(max) = validation.max {
        if (len as f64) > max {
            report.error(
                path,
                ErrorKind::TooMany,
                format!("{display} allows at most {max} items, got {len}"),
            );
        }
    }
}

fn validate_scalar(
    field: &FieldDefinition,
    raw: Option<&Value>,
    locale: Locale,
    path: &str,
    report: &mut ValidationReport,
) {
    let resolved = resolve_field(field, raw, locale);
    let validation = field.validation.unwrap_or_default();
    let display = display_name(field, locale);

    let text = resolved.as_str();
    let present = match &resolved {
        ResolvedValue::Unset => false,
        _ => text.map_or(true, |s| !s.is_empty()),
    };

    if field.required && !present {
        report.error(path, ErrorKind::Required, required_message(field, locale));
    }

    if let Some(s) = text.filter(|s| !s.is_empty()) {
        check_text(s, &validation, &display, path, report);
        if field.field_type.describe().has_options
            && !field.options.is_empty()
            && !field.options.iter().any(|option| option.value == s)
        {
            report.error(
                path,
                ErrorKind::InvalidOption,
                format!("'{s}' is not a valid option for {display}"),
            );
        }
    }

    if field.field_type == FieldType::Number {
        if let Some(number) = resolved.as_f64() {
            check_number(number, &validation, &display, path, report);
        }
    }

    if field.bilingual {
        check_translations(raw, &display, path, report);
    }
}

// min_length/max_length bound the resolved string length in characters.
fn check_text(
    s: &str,
    validation: &FieldValidation,
    display: &str,
    path: &str,
    report: &mut ValidationReport,
) {
    let len = s.chars().count();
    if let Some(min_length) = validation.min_length {
        if len < min_length {
            report.error(
                path,
                ErrorKind::TooShort,
                format!("{display} must be at least {min_length} characters, got {len}"),
            );
        }
    }
    if let Some(max_length) = validation.max_length {
        if len > max_length {
            report.error(
                path,
                ErrorKind::TooLong,
                format!("{display} must be at most {max_length} characters, got {len}"),
            );
        }
    }
}

fn check_number(
    number: f64,
    validation: &FieldValidation,
    display: &str,
    path: &str,
    report: &mut ValidationReport,
) {
    if let Some(min) = validation.min {
        if number < min {
            report.error(
                path,
                ErrorKind::TooFew,
                format!("{display} must be at least {min}, got {number}"),
            );
        }
    }
    if let Some(max) = validation.max {
        if number > max {
            report.error(
                path,
                ErrorKind::TooMany,
                format!("{display} must be at most {max}, got {number}"),
            );
        }
    }
}

// Bilingual completeness is a softer check than `required`: a field can
// be filled in one locale while still being edited in the other.
fn check_translations(
    raw: Option<&Value>,
    display: &str,
    path: &str,
    report: &mut ValidationReport,
) {
    let Some(per_locale) = raw.and_then(Value::as_object) else {
        return;
    };
    let filled = |key: &str| {
        per_locale
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    };
    let (en, ar) = (filled(EN_LOCALE_KEY), filled(AR_LOCALE_KEY));
    if en != ar {
        let missing = if en { Locale::Ar } else { Locale::En };
        report.warn(
            path,
            WarningKind::MissingTranslation,
            format!("{display} has no '{missing}' translation yet"),
        );
    }
}

fn collect_from_set(
    fields: &[FieldDefinition],
    value: Option<&Map<String, Value>>,
    prefix: &str,
    slots: &mut Vec<ReferenceSlot>,
) {
    for field in fields {
        let raw = value.and_then(|object| object.get(field.name.as_ref()));
        let path = join_path(prefix, field.name.as_ref());
        match field.field_type {
            FieldType::Reference => {
                let id = raw.and_then(Value::as_str).filter(|s| !s.is_empty());
                if let (Some(id), Some(target)) = (id, field.reference_type.clone()) {
                    slots.push(ReferenceSlot {
                        path,
                        target,
                        id: id.to_string(),
                    });
                }
            }
            FieldType::Group => {
                collect_from_set(&field.fields, raw.and_then(Value::as_object), &path, slots);
            }
            FieldType::Repeater => {
                for (index, element) in raw
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .enumerate()
                {
                    let element_path = format!("{path}[{index}]");
                    collect_from_set(&field.fields, element.as_object(), &element_path, slots);
                }
            }
            _ => {}
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn display_name(field: &FieldDefinition, locale: Locale) -> String {
    field
        .label
        .resolve(locale)
        .unwrap_or(field.name.as_ref())
        .to_string()
}

fn required_message(field: &FieldDefinition, locale: Locale) -> String {
    format!("{} is required", display_name(field, locale))
}
