use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::fields::FieldType;

// structs

/// Structural description of a field kind: the value shape the authoring
/// UI relies on to pick a control, plus which schema flags apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTypeDescriptor {
    pub shape: ValueShape,
    /// group/repeater: the value nests a child field set
    pub recursive: bool,
    /// whether the `bilingual` flag is meaningful for this kind
    pub bilingual_capable: bool,
    /// select/radio: the definition carries an option list
    pub has_options: bool,
}

/// The primitive value shape a field kind expects in a content instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    Text,
    Number,
    Boolean,
    Date,
    /// a single media asset identifier
    Media,
    /// an ordered list of media asset identifiers
    MediaList,
    /// an identifier pointing at another blueprint's instance
    Reference,
    /// a fixed nested field set
    Nested,
    /// an ordered sequence of nested field sets
    NestedList,
}

/// Raised when a string tag names a field kind outside the closed set.
/// Well-formed blueprints never produce this; treat it as a programmer
/// error, not a recoverable condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownFieldType(pub String);

// implementations

impl FieldType {
    /// Pure lookup of the structural shape this kind implies.
    pub fn describe(self) -> FieldTypeDescriptor {
        use FieldType::*;

        let shape = match self {
            Text | Textarea | RichText | Select | Radio | Email | Url | Color => ValueShape::Text,
            Number => ValueShape::Number,
            Boolean => ValueShape::Boolean,
            Date => ValueShape::Date,
            File | Image | Video => ValueShape::Media,
            Gallery => ValueShape::MediaList,
            Reference => ValueShape::Reference,
            Group => ValueShape::Nested,
            Repeater => ValueShape::NestedList,
        };

        FieldTypeDescriptor {
            shape,
            recursive: matches!(self, Group | Repeater),
            bilingual_capable: matches!(self, Text | Textarea | RichText),
            has_options: matches!(self, Select | Radio),
        }
    }

    /// The snake_case tag used in serialized definitions and content.
    pub fn tag(self) -> &'static str {
        use FieldType::*;
        match self {
            Text => "text",
            Textarea => "textarea",
            RichText => "rich_text",
            Number => "number",
            Boolean => "boolean",
            Select => "select",
            Radio => "radio",
            Date => "date",
            Email => "email",
            Url => "url",
            Color => "color",
            File => "file",
            Image => "image",
            Video => "video",
            Gallery => "gallery",
            Reference => "reference",
            Group => "group",
            Repeater => "repeater",
        }
    }

    /// Parses a string tag into the closed set.
    pub fn parse(tag: &str) -> Result<Self, UnknownFieldType> {
        use FieldType::*;
        const ALL: [FieldType; 18] = [
            Text, Textarea, RichText, Number, Boolean, Select, Radio, Date, Email, Url, Color,
            File, Image, Video, Gallery, Reference, Group, Repeater,
        ];
        ALL.into_iter()
            .find(|t| t.tag() == tag)
            .ok_or_else(|| UnknownFieldType(tag.to_string()))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::parse(s)
    }
}

impl fmt::Display for UnknownFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field type '{}'", self.0)
    }
}

impl std::error::Error for UnknownFieldType {}
