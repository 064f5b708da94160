use super::*;

fn doc_with(types: &[FieldType]) -> FormDocument {
    let mut doc = FormDocument::new();
    for &t in types {
        doc.append_field(t);
    }
    doc
}

// =============================================================
// FormDocument
// =============================================================

#[test]
fn new_document_is_empty_and_unsaved() {
    let doc = FormDocument::new();
    assert_eq!(doc.title, "");
    assert!(doc.is_empty());
    assert!(doc.remote_id.is_none());
}

#[test]
fn append_field_adds_at_end() {
    let mut doc = doc_with(&[FieldType::Text]);
    let index = doc.append_field(FieldType::Date);
    assert_eq!(index, 1);
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.fields[1].field_type(), FieldType::Date);
}

#[test]
fn remove_field_shifts_later_fields() {
    let mut doc = doc_with(&[FieldType::Text, FieldType::Select, FieldType::Date, FieldType::File]);
    let removed = doc.remove_field(1).unwrap();
    assert_eq!(removed.field_type(), FieldType::Select);
    let remaining: Vec<FieldType> = doc.fields.iter().map(FieldDefinition::field_type).collect();
    assert_eq!(remaining, vec![FieldType::Text, FieldType::Date, FieldType::File]);
}

#[test]
fn remove_field_out_of_range() {
    let mut doc = doc_with(&[FieldType::Text]);
    assert_eq!(doc.remove_field(1), Err(EditError::OutOfRange { index: 1, len: 1 }));
    assert_eq!(doc.len(), 1);
}

#[test]
fn set_title_replaces() {
    let mut doc = FormDocument::new();
    doc.set_title("Intake");
    doc.set_title("Survey");
    assert_eq!(doc.title, "Survey");
}

#[test]
fn field_accessors_check_bounds() {
    let mut doc = doc_with(&[FieldType::Radio]);
    assert!(doc.field(0).is_ok());
    assert!(matches!(doc.field(3), Err(EditError::OutOfRange { index: 3, len: 1 })));
    assert!(matches!(doc.field_mut(1), Err(EditError::OutOfRange { .. })));
}

// =============================================================
// FieldDefinition
// =============================================================

#[test]
fn options_only_on_choice_kinds() {
    let mut select = catalog::default_field(FieldType::Select);
    assert_eq!(select.options(), Some(&[][..]));
    select.options_mut().unwrap().push("A".into());
    assert_eq!(select.options().unwrap(), ["A".to_string()]);

    let mut text = catalog::default_field(FieldType::Text);
    assert!(text.options().is_none());
    assert!(text.options_mut().is_none());
}

#[test]
fn max_length_only_on_textarea() {
    assert_eq!(catalog::default_field(FieldType::TextArea).max_length(), Some(100));
    assert_eq!(catalog::default_field(FieldType::Text).max_length(), None);
}

// =============================================================
// Errors and ids
// =============================================================

#[test]
fn edit_error_codes_are_stable() {
    assert_eq!(EditError::NoSelection.error_code(), "E_NO_SELECTION");
    assert_eq!(EditError::OutOfRange { index: 0, len: 0 }.error_code(), "E_OUT_OF_RANGE");
    assert_eq!(EditError::NotOptionBearing(FieldType::Date).error_code(), "E_NOT_OPTION_BEARING");
}

#[test]
fn edit_error_messages_name_the_type() {
    let err = EditError::PropertyNotApplicable { property: Property::MaxLength, field_type: FieldType::Text };
    assert_eq!(err.to_string(), "property maxLength is not editable on textInput fields");
}

#[test]
fn form_id_from_number_and_string() {
    let numeric: FormId = serde_json::from_str("42").unwrap();
    let text: FormId = serde_json::from_str("\"abc-1\"").unwrap();
    assert_eq!(numeric, FormId::from(42));
    assert_eq!(numeric.as_str(), "42");
    assert_eq!(text.to_string(), "abc-1");
}
