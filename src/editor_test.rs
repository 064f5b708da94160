use super::*;
use crate::catalog::FieldType;

fn field(field_type: FieldType) -> FieldDefinition {
    catalog::default_field(field_type)
}

// =============================================================
// from_input
// =============================================================

#[test]
fn from_input_parses_flags() {
    assert_eq!(PropertyEdit::from_input(Property::Required, "true"), Ok(PropertyEdit::Required(true)));
    assert_eq!(PropertyEdit::from_input(Property::Required, "off"), Ok(PropertyEdit::Required(false)));
    assert!(matches!(
        PropertyEdit::from_input(Property::Required, "maybe"),
        Err(EditError::InvalidValue { property: Property::Required, .. })
    ));
}

#[test]
fn from_input_max_length_empty_clears() {
    assert_eq!(PropertyEdit::from_input(Property::MaxLength, ""), Ok(PropertyEdit::MaxLength(None)));
    assert_eq!(PropertyEdit::from_input(Property::MaxLength, " 250 "), Ok(PropertyEdit::MaxLength(Some(250))));
}

#[test]
fn from_input_max_length_rejects_negative() {
    assert!(matches!(
        PropertyEdit::from_input(Property::MaxLength, "-5"),
        Err(EditError::InvalidValue { property: Property::MaxLength, .. })
    ));
}

#[test]
fn from_input_options_is_not_scalar() {
    assert!(matches!(
        PropertyEdit::from_input(Property::Options, "a,b"),
        Err(EditError::InvalidValue { property: Property::Options, .. })
    ));
}

// =============================================================
// apply
// =============================================================

#[test]
fn apply_label_on_any_type() {
    for field_type in FieldType::ALL {
        let mut f = field(field_type);
        apply(&mut f, PropertyEdit::Label("Renamed".into())).unwrap();
        assert_eq!(f.label, "Renamed");
    }
}

#[test]
fn apply_placeholder_rejected_on_select() {
    let mut f = field(FieldType::Select);
    let err = apply(&mut f, PropertyEdit::Placeholder("pick".into())).unwrap_err();
    assert_eq!(
        err,
        EditError::PropertyNotApplicable { property: Property::Placeholder, field_type: FieldType::Select }
    );
    assert_eq!(f.placeholder, "");
}

#[test]
fn apply_max_length_on_textarea() {
    let mut f = field(FieldType::TextArea);
    apply(&mut f, PropertyEdit::MaxLength(Some(500))).unwrap();
    assert_eq!(f.max_length(), Some(500));
    apply(&mut f, PropertyEdit::MaxLength(None)).unwrap();
    assert_eq!(f.max_length(), None);
}

#[test]
fn apply_max_length_rejected_on_text() {
    let mut f = field(FieldType::Text);
    assert!(matches!(
        apply(&mut f, PropertyEdit::MaxLength(Some(5))),
        Err(EditError::PropertyNotApplicable { property: Property::MaxLength, field_type: FieldType::Text })
    ));
}

#[test]
fn apply_required_on_file() {
    let mut f = field(FieldType::File);
    apply(&mut f, PropertyEdit::Required(true)).unwrap();
    assert!(f.required);
}

// =============================================================
// Options
// =============================================================

#[test]
fn add_then_set_option_replaces_only_that_position() {
    let mut f = field(FieldType::Checkbox);
    add_option(&mut f).unwrap();
    set_option(&mut f, 0, "A").unwrap();
    let k = add_option(&mut f).unwrap();
    assert_eq!(k, 1);
    set_option(&mut f, k, "B").unwrap();
    assert_eq!(f.options().unwrap(), ["A".to_string(), "B".to_string()]);
}

#[test]
fn set_option_out_of_range() {
    let mut f = field(FieldType::Radio);
    add_option(&mut f).unwrap();
    assert_eq!(set_option(&mut f, 1, "x"), Err(EditError::OutOfRange { index: 1, len: 1 }));
}

#[test]
fn option_edits_need_option_bearing_type() {
    let mut f = field(FieldType::TextArea);
    assert_eq!(add_option(&mut f), Err(EditError::NotOptionBearing(FieldType::TextArea)));
    assert_eq!(set_option(&mut f, 0, "x"), Err(EditError::NotOptionBearing(FieldType::TextArea)));
}
