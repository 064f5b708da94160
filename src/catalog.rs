//! Field catalog: the static registry of field types.
//!
//! DESIGN
//! ======
//! Each `FieldType` maps to a default `FieldDefinition` and to the ordered
//! list of properties the editor may show for it. `allowed_properties` is the
//! only place that knows which controls belong to which type; the editor,
//! the session and the REPL all consult it instead of matching on the type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::form::{FieldDefinition, FieldKind};

/// Default `maxLength` for a freshly dropped text area.
pub const DEFAULT_TEXTAREA_MAX_LENGTH: u32 = 100;

// =============================================================================
// FIELD TYPE
// =============================================================================

/// Closed set of field types the builder knows how to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "textInput", alias = "text")]
    Text,
    #[serde(rename = "textArea", alias = "textarea")]
    TextArea,
    #[serde(rename = "selectDropdown", alias = "select")]
    Select,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "radioButton", alias = "radio")]
    Radio,
    #[serde(rename = "datePicker", alias = "date")]
    Date,
    #[serde(rename = "fileUpload", alias = "file")]
    File,
}

impl FieldType {
    /// Palette order.
    pub const ALL: [FieldType; 7] = [
        Self::Text,
        Self::TextArea,
        Self::Select,
        Self::Checkbox,
        Self::Radio,
        Self::Date,
        Self::File,
    ];

    /// Identifier used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "textInput",
            Self::TextArea => "textArea",
            Self::Select => "selectDropdown",
            Self::Checkbox => "checkbox",
            Self::Radio => "radioButton",
            Self::Date => "datePicker",
            Self::File => "fileUpload",
        }
    }

    /// Human-readable name; also the default label of a new field.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::TextArea => "Text Area",
            Self::Select => "Select Dropdown",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio Button",
            Self::Date => "Date Picker",
            Self::File => "File Upload",
        }
    }

    /// `true` for types that carry an ordered option list.
    #[must_use]
    pub fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Radio)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "textInput" | "text" => Ok(Self::Text),
            "textArea" | "textarea" => Ok(Self::TextArea),
            "selectDropdown" | "select" => Ok(Self::Select),
            "checkbox" => Ok(Self::Checkbox),
            "radioButton" | "radio" => Ok(Self::Radio),
            "datePicker" | "date" => Ok(Self::Date),
            "fileUpload" | "file" => Ok(Self::File),
            other => Err(UnknownFieldType(other.to_owned())),
        }
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

/// An editable property of a field, as shown in the property panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Label,
    Placeholder,
    Required,
    MaxLength,
    Options,
}

impl Property {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Placeholder => "placeholder",
            Self::Required => "required",
            Self::MaxLength => "maxLength",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property: {0}")]
pub struct UnknownProperty(pub String);

impl FromStr for Property {
    type Err = UnknownProperty;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "label" => Ok(Self::Label),
            "placeholder" => Ok(Self::Placeholder),
            "required" => Ok(Self::Required),
            "maxLength" | "max_length" | "maxlength" => Ok(Self::MaxLength),
            "options" => Ok(Self::Options),
            other => Err(UnknownProperty(other.to_owned())),
        }
    }
}

const TEXT_PROPERTIES: &[Property] = &[Property::Label, Property::Placeholder, Property::Required];
const TEXTAREA_PROPERTIES: &[Property] =
    &[Property::Label, Property::Placeholder, Property::Required, Property::MaxLength];
const CHOICE_PROPERTIES: &[Property] = &[Property::Label, Property::Required, Property::Options];
const PLAIN_PROPERTIES: &[Property] = &[Property::Label, Property::Required];

/// Ordered list of properties the editor may show for `field_type`.
#[must_use]
pub fn allowed_properties(field_type: FieldType) -> &'static [Property] {
    match field_type {
        FieldType::Text => TEXT_PROPERTIES,
        FieldType::TextArea => TEXTAREA_PROPERTIES,
        FieldType::Select | FieldType::Checkbox | FieldType::Radio => CHOICE_PROPERTIES,
        FieldType::Date | FieldType::File => PLAIN_PROPERTIES,
    }
}

/// Whether `property` may be edited on a field of `field_type`.
#[must_use]
pub fn allows(field_type: FieldType, property: Property) -> bool {
    allowed_properties(field_type).contains(&property)
}

// =============================================================================
// DEFAULTS
// =============================================================================

/// The field a palette drop creates for `field_type`.
#[must_use]
pub fn default_field(field_type: FieldType) -> FieldDefinition {
    let kind = match field_type {
        FieldType::Text => FieldKind::Text,
        FieldType::TextArea => FieldKind::TextArea { max_length: Some(DEFAULT_TEXTAREA_MAX_LENGTH) },
        FieldType::Select => FieldKind::Select { options: Vec::new() },
        FieldType::Checkbox => FieldKind::Checkbox { options: Vec::new() },
        FieldType::Radio => FieldKind::Radio { options: Vec::new() },
        FieldType::Date => FieldKind::Date,
        FieldType::File => FieldKind::File,
    };

    FieldDefinition {
        label: field_type.display_name().to_owned(),
        placeholder: String::new(),
        required: false,
        kind,
    }
}

/// A palette entry: what the side panel lists for dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub field_type: FieldType,
    pub label: &'static str,
}

/// All placeable field types, in palette order.
#[must_use]
pub fn palette() -> Vec<PaletteEntry> {
    FieldType::ALL
        .iter()
        .map(|&field_type| PaletteEntry { field_type, label: field_type.display_name() })
        .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
