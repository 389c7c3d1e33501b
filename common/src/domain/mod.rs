use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::blueprints::Blueprint;
use crate::{AR_LOCALE_KEY, EN_LOCALE_KEY};

pub mod blueprints;
pub mod fields;
pub mod registry;

/// Read access to the set of known blueprint definitions.
pub trait Blueprints: Send + Sync + Debug + 'static {
    /// all known blueprint definitions, ordered by name
    fn list(&self) -> Vec<Arc<Blueprint>>;
    /// find a blueprint definition by its name
    fn get(&self, name: &BlueprintName) -> Option<Arc<Blueprint>>;
}

// A regex for names that may contain only ASCII letters, digits, and underscore,
// starting with a letter. Example: "HeroBanner" or "items" is valid; "my id" is not.
pub const ELIGIBLE_SYMBOLS_REGEX: &str = r"^[A-Za-z][A-Za-z0-9_]*$";

static ELIGIBLE_SYMBOLS_REGEX_COMPILED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ELIGIBLE_SYMBOLS_REGEX).expect("ELIGIBLE_SYMBOLS_REGEX must be a valid regex")
});

pub fn is_eligible_id(id: &str) -> bool {
    ELIGIBLE_SYMBOLS_REGEX_COMPILED.is_match(id)
}

/// Unique, immutable identity of a blueprint. Case-preserving: "FAQSection"
/// and "faqsection" are different blueprints.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50, predicate = is_eligible_id),
    derive(
        Clone,
        Debug,
        Display,
        FromStr,
        AsRef,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize
    )
)]
pub struct BlueprintName(String);

/// Name of a field, unique among its siblings. Case-preserving because
/// content instances key their values by this exact string.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50, predicate = is_eligible_id),
    derive(
        Clone,
        Debug,
        Display,
        FromStr,
        AsRef,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize
    )
)]
pub struct FieldName(String);

/// The two locales content can be authored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ar,
}

impl Locale {
    /// Fixed fallback order for bilingual values once the requested locale
    /// is absent. Changing this would silently alter the displayed language
    /// of already-authored content.
    pub const FALLBACK: [Locale; 2] = [Locale::En, Locale::Ar];

    /// Key under which this locale's value is stored in a bilingual map.
    pub fn key(&self) -> &'static str {
        match self {
            Locale::En => EN_LOCALE_KEY,
            Locale::Ar => AR_LOCALE_KEY,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            EN_LOCALE_KEY => Ok(Locale::En),
            AR_LOCALE_KEY => Ok(Locale::Ar),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown locale '{}', expected 'en' or 'ar'", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

/// A locale-keyed pair of strings, stored once per locale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: Some(en.into()),
            ar: Some(ar.into()),
        }
    }

    fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.en.as_deref(),
            Locale::Ar => self.ar.as_deref(),
        }
    }

    /// Requested locale first, then the fixed en -> ar fallback chain.
    pub fn resolve(&self, locale: Locale) -> Option<&str> {
        std::iter::once(locale)
            .chain(Locale::FALLBACK)
            .find_map(|l| self.get(l))
    }
}

/// A human label, either a plain string or a locale-keyed pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Plain(String),
    Bilingual(LocalizedText),
}

impl Label {
    pub fn plain(text: impl Into<String>) -> Self {
        Label::Plain(text.into())
    }

    pub fn bilingual(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Label::Bilingual(LocalizedText::new(en, ar))
    }

    pub fn resolve(&self, locale: Locale) -> Option<&str> {
        match self {
            Label::Plain(text) => Some(text.as_str()),
            Label::Bilingual(text) => text.resolve(locale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_round_trips_through_its_key() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("ar".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!(Locale::Ar.to_string(), "ar");
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn localized_text_falls_back_en_then_ar() {
        let only_en = LocalizedText {
            en: Some("Hello".into()),
            ar: None,
        };
        assert_eq!(only_en.resolve(Locale::Ar), Some("Hello"));

        let only_ar = LocalizedText {
            en: None,
            ar: Some("مرحبا".into()),
        };
        assert_eq!(only_ar.resolve(Locale::En), Some("مرحبا"));

        let empty = LocalizedText::default();
        assert_eq!(empty.resolve(Locale::En), None);
        assert_eq!(empty.resolve(Locale::Ar), None);
    }

    #[test]
    fn names_reject_ineligible_symbols() {
        assert!(BlueprintName::try_new("HeroBanner").is_ok());
        assert!(BlueprintName::try_new("my id").is_err());
        assert!(BlueprintName::try_new("1stBlock").is_err());
        assert!(FieldName::try_new("backgroundImage").is_ok());
        assert!(FieldName::try_new("").is_err());
    }
}
