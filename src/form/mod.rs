//! Form document model: the schema being built.
//!
//! DESIGN
//! ======
//! A `FieldDefinition` keeps the attributes every field has (`label`,
//! `placeholder`, `required`) next to a `FieldKind` that carries only what
//! its type allows: text areas own `max_length`, choice fields own
//! `options`. The type is fixed at creation because the variant is.
//!
//! `FormDocument` is append-only for placement: fields are pushed at the end
//! and leave only through `remove_field`. Selection fix-up after removal is
//! the session's job; the document knows nothing about selection.

pub mod wire;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, FieldType, Property};

// =============================================================================
// ERRORS
// =============================================================================

/// Local contract violations. These indicate a mis-wired caller, never a
/// user-facing condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("no field is selected")]
    NoSelection,

    #[error("property {property} is not editable on {field_type} fields")]
    PropertyNotApplicable { property: Property, field_type: FieldType },

    #[error("{0} fields have no options")]
    NotOptionBearing(FieldType),

    #[error("invalid value for {property}: {reason}")]
    InvalidValue { property: Property, reason: String },
}

impl EditError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "E_OUT_OF_RANGE",
            Self::NoSelection => "E_NO_SELECTION",
            Self::PropertyNotApplicable { .. } => "E_PROPERTY_NOT_APPLICABLE",
            Self::NotOptionBearing(_) => "E_NOT_OPTION_BEARING",
            Self::InvalidValue { .. } => "E_INVALID_VALUE",
        }
    }
}

// =============================================================================
// FIELD DEFINITION
// =============================================================================

/// Type-specific part of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea { max_length: Option<u32> },
    Select { options: Vec<String> },
    Checkbox { options: Vec<String> },
    Radio { options: Vec<String> },
    Date,
    File,
}

/// One form field. Encodes through [`wire::WireField`] and decodes through
/// [`wire::RawField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "wire::RawField", into = "wire::WireField")]
pub struct FieldDefinition {
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldDefinition {
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self.kind {
            FieldKind::Text => FieldType::Text,
            FieldKind::TextArea { .. } => FieldType::TextArea,
            FieldKind::Select { .. } => FieldType::Select,
            FieldKind::Checkbox { .. } => FieldType::Checkbox,
            FieldKind::Radio { .. } => FieldType::Radio,
            FieldKind::Date => FieldType::Date,
            FieldKind::File => FieldType::File,
        }
    }

    /// Option list, or `None` for types without options.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Select { options } | FieldKind::Checkbox { options } | FieldKind::Radio { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match &mut self.kind {
            FieldKind::Select { options } | FieldKind::Checkbox { options } | FieldKind::Radio { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    /// Character limit of a text area; `None` for other types or when cleared.
    #[must_use]
    pub fn max_length(&self) -> Option<u32> {
        match self.kind {
            FieldKind::TextArea { max_length } => max_length,
            _ => None,
        }
    }
}

// =============================================================================
// FORM ID
// =============================================================================

/// Server-assigned form identifier. Kept opaque: the service may hand out
/// integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "wire::RawId", into = "String")]
pub struct FormId(String);

impl FormId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<FormId> for String {
    fn from(id: FormId) -> Self {
        id.0
    }
}

impl From<u64> for FormId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

// =============================================================================
// FORM DOCUMENT
// =============================================================================

/// The aggregate under edit: title, ordered fields, and the remote identity
/// once the form has been created on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDocument {
    pub title: String,
    pub fields: Vec<FieldDefinition>,
    pub remote_id: Option<FormId>,
}

impl FormDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the catalog default for `field_type` and return its index.
    pub fn append_field(&mut self, field_type: FieldType) -> usize {
        self.fields.push(catalog::default_field(field_type));
        self.fields.len() - 1
    }

    /// Remove the field at `index`, shifting later fields down by one.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `index` is not a field position.
    pub fn remove_field(&mut self, index: usize) -> Result<FieldDefinition, EditError> {
        self.check_index(index)?;
        Ok(self.fields.remove(index))
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `index` is not a field position.
    pub fn field(&self, index: usize) -> Result<&FieldDefinition, EditError> {
        self.fields
            .get(index)
            .ok_or(EditError::OutOfRange { index, len: self.fields.len() })
    }

    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `index` is not a field position.
    pub fn field_mut(&mut self, index: usize) -> Result<&mut FieldDefinition, EditError> {
        let len = self.fields.len();
        self.fields.get_mut(index).ok_or(EditError::OutOfRange { index, len })
    }

    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `index` is not a field position.
    pub fn check_index(&self, index: usize) -> Result<(), EditError> {
        if index < self.fields.len() {
            Ok(())
        } else {
            Err(EditError::OutOfRange { index, len: self.fields.len() })
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
