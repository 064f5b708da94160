//! JSON representation of fields and identifiers.
//!
//! The remote service stores fields as flat objects:
//! `{ type, label, placeholder, required, maxLength?, options? }`.
//! Which optional keys appear is decided by `type` alone. Decoding is
//! lenient about what older editors stored (string `maxLength`, missing
//! `options`) and always yields a field that obeys the per-type shape:
//! attributes a type does not own are dropped whatever their shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FieldDefinition, FieldKind, FormId};
use crate::catalog::FieldType;
use crate::editor::parse_max_length;

// =============================================================================
// FIELD
// =============================================================================

/// Encoded form of a field. Only the attributes the type owns are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl From<FieldDefinition> for WireField {
    fn from(field: FieldDefinition) -> Self {
        let field_type = field.field_type();
        let (max_length, options) = match field.kind {
            FieldKind::TextArea { max_length } => (max_length, None),
            FieldKind::Select { options } | FieldKind::Checkbox { options } | FieldKind::Radio { options } => {
                (None, Some(options))
            }
            FieldKind::Text | FieldKind::Date | FieldKind::File => (None, None),
        };

        Self {
            field_type,
            label: field.label,
            placeholder: field.placeholder,
            required: field.required,
            max_length,
            options,
        }
    }
}

/// A field as decoded from storage. `maxLength` and `options` stay raw
/// until the type is known; they are checked only for the type that owns
/// them and ignored on every other type.
#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "maxLength", default)]
    pub max_length: Option<Value>,
    #[serde(default)]
    pub options: Option<Value>,
}

impl TryFrom<RawField> for FieldDefinition {
    type Error = String;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let kind = match raw.field_type {
            FieldType::Text => FieldKind::Text,
            FieldType::TextArea => FieldKind::TextArea { max_length: decode_max_length(raw.max_length)? },
            FieldType::Select => FieldKind::Select { options: decode_options(raw.options)? },
            FieldType::Checkbox => FieldKind::Checkbox { options: decode_options(raw.options)? },
            FieldType::Radio => FieldKind::Radio { options: decode_options(raw.options)? },
            FieldType::Date => FieldKind::Date,
            FieldType::File => FieldKind::File,
        };

        Ok(Self { label: raw.label, placeholder: raw.placeholder, required: raw.required, kind })
    }
}

/// Accepts a number, a numeric string, `""` or `null`.
fn decode_max_length(raw: Option<Value>) -> Result<Option<u32>, String> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => parse_max_length(&text),
        Some(Value::Number(n)) => match n.as_u64().map(u32::try_from) {
            Some(Ok(limit)) => Ok(Some(limit)),
            _ => Err(format!("maxLength {n} is not a non-negative integer")),
        },
        Some(other) => Err(format!("maxLength must be a number or text, got {other}")),
    }
}

/// Missing or `null` options mean none yet.
fn decode_options(raw: Option<Value>) -> Result<Vec<String>, String> {
    match raw {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|e| format!("options: {e}")),
    }
}

// =============================================================================
// IDENTIFIER
// =============================================================================

/// Identifiers as they appear in responses: integer or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for FormId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => FormId(n.to_string()),
            RawId::Text(s) => FormId(s),
        }
    }
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;
