//! Preview projection: a read-only view of a form document.
//!
//! `project` is recomputed on every call and borrows the document
//! immutably; nothing here is cached. Each `Control` variant carries
//! exactly the attributes that matter for its field type.

use std::fmt;

use crate::form::{FieldDefinition, FieldKind, FormDocument};

/// Text of the leading, valueless choice of a select control.
pub const SELECT_PROMPT: &str = "Select an option";

/// How a projected field is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    TextInput { placeholder: String, required: bool },
    TextArea { placeholder: String, max_length: Option<u32>, required: bool },
    Select { prompt: &'static str, choices: Vec<String>, required: bool },
    CheckboxGroup { name: String, choices: Vec<String>, required: bool },
    RadioGroup { name: String, choices: Vec<String>, required: bool },
    Date { required: bool },
    File { required: bool },
}

/// One field as the preview shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableField {
    pub position: usize,
    pub label: String,
    pub control: Control,
}

/// Title plus projected fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub title: String,
    pub fields: Vec<RenderableField>,
}

impl Preview {
    #[must_use]
    pub fn of(doc: &FormDocument) -> Self {
        Self { title: doc.title.clone(), fields: project(doc) }
    }
}

/// Project every field of `doc`, in order.
#[must_use]
pub fn project(doc: &FormDocument) -> Vec<RenderableField> {
    doc.fields
        .iter()
        .enumerate()
        .map(|(position, field)| project_field(position, field))
        .collect()
}

fn project_field(position: usize, field: &FieldDefinition) -> RenderableField {
    let required = field.required;
    let control = match &field.kind {
        FieldKind::Text => Control::TextInput { placeholder: field.placeholder.clone(), required },
        FieldKind::TextArea { max_length } => {
            Control::TextArea { placeholder: field.placeholder.clone(), max_length: *max_length, required }
        }
        FieldKind::Select { options } => Control::Select { prompt: SELECT_PROMPT, choices: options.clone(), required },
        FieldKind::Checkbox { options } => {
            Control::CheckboxGroup { name: field.label.clone(), choices: options.clone(), required }
        }
        FieldKind::Radio { options } => {
            Control::RadioGroup { name: format!("radio-{position}"), choices: options.clone(), required }
        }
        FieldKind::Date => Control::Date { required },
        FieldKind::File => Control::File { required },
    };

    RenderableField { position, label: field.label.clone(), control }
}

// =============================================================================
// TEXT RENDERING
// =============================================================================

fn required_mark(required: bool) -> &'static str {
    if required { " *" } else { "" }
}

impl fmt::Display for RenderableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.control {
            Control::TextInput { placeholder, required } => {
                write!(f, "{}{} [text: {placeholder}]", self.label, required_mark(*required))
            }
            Control::TextArea { placeholder, max_length, required } => {
                write!(f, "{}{} [textarea: {placeholder}", self.label, required_mark(*required))?;
                if let Some(limit) = max_length {
                    write!(f, " (max {limit})")?;
                }
                f.write_str("]")
            }
            Control::Select { prompt, choices, required } => {
                write!(f, "{}{} [select: {prompt}", self.label, required_mark(*required))?;
                for choice in choices {
                    write!(f, " | {choice}")?;
                }
                f.write_str("]")
            }
            Control::CheckboxGroup { choices, required, .. } => {
                write!(f, "{}{}", self.label, required_mark(*required))?;
                for choice in choices {
                    write!(f, "\n  [ ] {choice}")?;
                }
                Ok(())
            }
            Control::RadioGroup { choices, required, .. } => {
                write!(f, "{}{}", self.label, required_mark(*required))?;
                for choice in choices {
                    write!(f, "\n  ( ) {choice}")?;
                }
                Ok(())
            }
            Control::Date { required } => write!(f, "{}{} [date]", self.label, required_mark(*required)),
            Control::File { required } => write!(f, "{}{} [file]", self.label, required_mark(*required)),
        }
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for field in &self.fields {
            writeln!(f, "{field}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;
