use serde_json::{Map, Value};

use blueprint_common::Locale;
use blueprint_common::blueprints::Blueprint;
use blueprint_common::fields::{FieldDefinition, FieldType};

// structs

/// A locale-resolved content value tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedValue {
    /// nothing stored in any locale and no default declared
    Unset,
    Scalar(Value),
    /// reference fields keep the raw identifier; dereferencing across
    /// blueprints is an explicit, separate lookup by the caller
    Reference(String),
    List(Vec<ResolvedValue>),
    /// field name to value, in definition order
    Object(Vec<(String, ResolvedValue)>),
}

// implementations

impl ResolvedValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, ResolvedValue::Unset)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::Scalar(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResolvedValue::Scalar(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ResolvedValue]> {
        match self {
            ResolvedValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Looks up a field of an object value by name.
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        match self {
            ResolvedValue::Object(fields) => fields
                .iter()
                .find(|(field_name, _)| field_name == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

/// Resolves a raw content instance against its blueprint's field tree,
/// substituting locale-correct strings for bilingual fields and
/// recursing into groups and repeaters.
pub fn resolve(blueprint: &Blueprint, instance: &Map<String, Value>, locale: Locale) -> ResolvedValue {
    resolve_field_set(&blueprint.fields, Some(instance), locale)
}

fn resolve_field_set(
    fields: &[FieldDefinition],
    value: Option<&Map<String, Value>>,
    locale: Locale,
) -> ResolvedValue {
    let resolved = fields
        .iter()
        .map(|field| {
            let raw = value.and_then(|object| object.get(field.name.as_ref()));
            (field.name.to_string(), resolve_field(field, raw, locale))
        })
        .collect();
    ResolvedValue::Object(resolved)
}

/// Resolves one field, depth-first.
pub fn resolve_field(field: &FieldDefinition, raw: Option<&Value>, locale: Locale) -> ResolvedValue {
    match field.field_type {
        FieldType::Group => {
            // A missing sub-object resolves to a tree of unset leaves;
            // absence is the validator's concern, not the resolver's.
            resolve_field_set(&field.fields, raw.and_then(Value::as_object), locale)
        }
        FieldType::Repeater => {
            // Repeaters are never implicitly populated with defaults: a
            // missing or empty sequence is an empty sequence.
            let items = raw
                .and_then(Value::as_array)
                .map(|elements| {
                    elements
                        .iter()
                        .map(|element| {
                            resolve_field_set(&field.fields, element.as_object(), locale)
                        })
                        .collect()
                })
                .unwrap_or_default();
            ResolvedValue::List(items)
        }
        FieldType::Gallery => {
            let items = raw
                .and_then(Value::as_array)
                .map(|elements| {
                    elements
                        .iter()
                        .filter(|element| !element.is_null())
                        .map(|element| ResolvedValue::Scalar(element.clone()))
                        .collect()
                })
                .unwrap_or_default();
            ResolvedValue::List(items)
        }
        FieldType::Reference => match raw.and_then(Value::as_str) {
            Some(id) if !id.is_empty() => ResolvedValue::Reference(id.to_string()),
            _ => ResolvedValue::Unset,
        },
        _ => resolve_scalar(field, raw, locale),
    }
}

fn resolve_scalar(field: &FieldDefinition, raw: Option<&Value>, locale: Locale) -> ResolvedValue {
    let stored = match raw {
        Some(Value::Null) | None => None,
        Some(value) if field.bilingual => match value.as_object() {
            Some(per_locale) => bilingual_pick(per_locale, locale),
            // legacy single-value content predating the bilingual flag
            None => Some(value.clone()),
        },
        Some(value) => Some(value.clone()),
    };

    // The default is plugged in at the leaf, after bilingual substitution.
    let value = stored.or_else(|| default_for(field, locale));

    match value {
        Some(v) => ResolvedValue::Scalar(v),
        None => ResolvedValue::Unset,
    }
}

fn default_for(field: &FieldDefinition, locale: Locale) -> Option<Value> {
    let default = field.default_value.as_ref()?;
    if field.bilingual {
        if let Some(per_locale) = default.as_object() {
            return bilingual_pick(per_locale, locale);
        }
    }
    Some(default.clone())
}

// Lookup order is fixed: requested locale, then en, then ar.
fn bilingual_pick(per_locale: &Map<String, Value>, locale: Locale) -> Option<Value> {
    std::iter::once(locale)
        .chain(Locale::FALLBACK)
        .find_map(|l| per_locale.get(l.key()).filter(|v| !v.is_null()).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_common::test_utils::{
        bilingual_text, component, field, group, repeater, text_field,
    };
    use serde_json::json;

    fn instance(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn bilingual_values_fall_back_en_then_ar() {
        let f = bilingual_text("title", FieldType::Text, false);

        let only_en = json!({ "en": "Hello" });
        let resolved = resolve_field(&f, Some(&only_en), Locale::Ar);
        assert_eq!(resolved.as_str(), Some("Hello"));

        let only_ar = json!({ "ar": "مرحبا" });
        let resolved = resolve_field(&f, Some(&only_ar), Locale::En);
        assert_eq!(resolved.as_str(), Some("مرحبا"));

        let empty = json!({});
        assert!(resolve_field(&f, Some(&empty), Locale::En).is_unset());
        assert!(resolve_field(&f, Some(&empty), Locale::Ar).is_unset());
    }

    #[test]
    fn non_bilingual_scalars_pass_through() {
        let f = text_field("url");
        let raw = json!("/projects");
        assert_eq!(
            resolve_field(&f, Some(&raw), Locale::Ar).as_str(),
            Some("/projects")
        );
        assert!(resolve_field(&f, None, Locale::En).is_unset());
    }

    #[test]
    fn defaults_are_plugged_in_at_the_leaf() {
        let mut style = text_field("style");
        style.default_value = Some(json!("primary"));
        assert_eq!(
            resolve_field(&style, None, Locale::En).as_str(),
            Some("primary")
        );

        // a stored value beats the default
        let raw = json!("outline");
        assert_eq!(
            resolve_field(&style, Some(&raw), Locale::En).as_str(),
            Some("outline")
        );
    }

    #[test]
    fn bilingual_defaults_resolve_per_locale() {
        let mut submit = bilingual_text("submitText", FieldType::Text, false);
        submit.default_value = Some(json!({ "en": "Submit", "ar": "إرسال" }));

        assert_eq!(
            resolve_field(&submit, None, Locale::Ar).as_str(),
            Some("إرسال")
        );
        assert_eq!(
            resolve_field(&submit, None, Locale::En).as_str(),
            Some("Submit")
        );
    }

    #[test]
    fn missing_groups_resolve_to_unset_leaves() {
        let cta = group("ctaButton", vec![text_field("text"), text_field("link")]);
        let resolved = resolve_field(&cta, None, Locale::En);

        assert!(resolved.get("text").unwrap().is_unset());
        assert!(resolved.get("link").unwrap().is_unset());
    }

    #[test]
    fn repeaters_preserve_element_order_and_never_default() {
        let mut items = repeater(
            "items",
            None,
            None,
            vec![bilingual_text("question", FieldType::Text, true)],
        );
        items.default_value = Some(json!([{ "question": { "en": "never used" } }]));

        assert_eq!(
            resolve_field(&items, None, Locale::En),
            ResolvedValue::List(vec![])
        );

        let raw = json!([
            { "question": { "en": "First" } },
            { "question": { "ar": "الثاني" } }
        ]);
        let resolved = resolve_field(&items, Some(&raw), Locale::En);
        let elements = resolved.as_list().unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].get("question").unwrap().as_str(), Some("First"));
        // en missing in the second element, falls back to ar
        assert_eq!(
            elements[1].get("question").unwrap().as_str(),
            Some("الثاني")
        );
    }

    #[test]
    fn references_resolve_to_the_raw_identifier_only() {
        let mut image = field("backgroundImage", FieldType::Reference);
        image.reference_type = Some("Asset".parse().unwrap());

        let raw = json!("asset_42");
        assert_eq!(
            resolve_field(&image, Some(&raw), Locale::En),
            ResolvedValue::Reference("asset_42".to_string())
        );
        assert!(resolve_field(&image, None, Locale::En).is_unset());
    }

    #[test]
    fn a_whole_instance_resolves_in_definition_order() {
        let blueprint = component(
            "HeroBanner",
            vec![
                bilingual_text("heading", FieldType::Text, true),
                text_field("link"),
            ],
        );
        let raw = instance(json!({
            "link": "/contact",
            "heading": { "en": "Build with us" }
        }));

        let resolved = resolve(&blueprint, &raw, Locale::Ar);
        match &resolved {
            ResolvedValue::Object(fields) => {
                assert_eq!(fields[0].0, "heading");
                assert_eq!(fields[1].0, "link");
            }
            other => panic!("expected object, got {other:?}"),
        }
        assert_eq!(resolved.get("heading").unwrap().as_str(), Some("Build with us"));
    }
}
