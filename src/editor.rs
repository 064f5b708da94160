//! Property editor: mutations applied to a single field.
//!
//! DESIGN
//! ======
//! Edits are values (`PropertyEdit`) so the caller can build them from raw
//! panel input once and apply them without re-checking types. Every edit
//! is gated by `catalog::allows`; a property outside the field type's list
//! is a caller bug and fails loudly instead of being ignored.
//!
//! Options are edited in place by position. There is no option removal.

use crate::catalog::{self, Property};
use crate::form::{EditError, FieldDefinition, FieldKind};

/// A single scalar property change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyEdit {
    Label(String),
    Placeholder(String),
    Required(bool),
    /// `None` clears the limit.
    MaxLength(Option<u32>),
}

impl PropertyEdit {
    #[must_use]
    pub fn property(&self) -> Property {
        match self {
            Self::Label(_) => Property::Label,
            Self::Placeholder(_) => Property::Placeholder,
            Self::Required(_) => Property::Required,
            Self::MaxLength(_) => Property::MaxLength,
        }
    }

    /// Build an edit from the raw text an input control produced.
    ///
    /// `required` takes a checkbox-style flag; `maxLength` takes a
    /// non-negative integer or empty text to clear.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidValue`] when the text does not fit the
    /// property, including any attempt to set `options` as a scalar.
    pub fn from_input(property: Property, raw: &str) -> Result<Self, EditError> {
        match property {
            Property::Label => Ok(Self::Label(raw.to_owned())),
            Property::Placeholder => Ok(Self::Placeholder(raw.to_owned())),
            Property::Required => parse_flag(raw)
                .map(Self::Required)
                .ok_or_else(|| EditError::InvalidValue { property, reason: format!("expected a flag, got '{raw}'") }),
            Property::MaxLength => parse_max_length(raw)
                .map(Self::MaxLength)
                .map_err(|reason| EditError::InvalidValue { property, reason }),
            Property::Options => Err(EditError::InvalidValue {
                property,
                reason: "options are edited one position at a time".into(),
            }),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" | "checked" => Some(true),
        "false" | "off" | "no" | "0" | "unchecked" => Some(false),
        _ => None,
    }
}

/// Parse `maxLength` input: empty clears, otherwise a non-negative integer.
///
/// # Errors
///
/// Returns a human-readable reason when the text is neither.
pub fn parse_max_length(raw: &str) -> Result<Option<u32>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| format!("expected a non-negative integer, got '{trimmed}'"))
}

/// Apply `edit` to `field`.
///
/// # Errors
///
/// Returns [`EditError::PropertyNotApplicable`] if the catalog does not list
/// the edited property for the field's type.
pub fn apply(field: &mut FieldDefinition, edit: PropertyEdit) -> Result<(), EditError> {
    let property = edit.property();
    let field_type = field.field_type();
    if !catalog::allows(field_type, property) {
        return Err(EditError::PropertyNotApplicable { property, field_type });
    }

    match edit {
        PropertyEdit::Label(label) => field.label = label,
        PropertyEdit::Placeholder(placeholder) => field.placeholder = placeholder,
        PropertyEdit::Required(required) => field.required = required,
        PropertyEdit::MaxLength(limit) => match &mut field.kind {
            FieldKind::TextArea { max_length } => *max_length = limit,
            _ => return Err(EditError::PropertyNotApplicable { property, field_type }),
        },
    }
    Ok(())
}

/// Replace the option at `option_index`, keeping order and length.
///
/// # Errors
///
/// Returns [`EditError::NotOptionBearing`] for types without options and
/// [`EditError::OutOfRange`] when `option_index` is past the end.
pub fn set_option(field: &mut FieldDefinition, option_index: usize, value: impl Into<String>) -> Result<(), EditError> {
    let field_type = field.field_type();
    let options = field.options_mut().ok_or(EditError::NotOptionBearing(field_type))?;
    let len = options.len();
    let slot = options
        .get_mut(option_index)
        .ok_or(EditError::OutOfRange { index: option_index, len })?;
    *slot = value.into();
    Ok(())
}

/// Append an empty option and return its position.
///
/// # Errors
///
/// Returns [`EditError::NotOptionBearing`] for types without options.
pub fn add_option(field: &mut FieldDefinition) -> Result<usize, EditError> {
    let field_type = field.field_type();
    let options = field.options_mut().ok_or(EditError::NotOptionBearing(field_type))?;
    options.push(String::new());
    Ok(options.len() - 1)
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;
