use super::*;
use crate::catalog::FieldType;

fn sample_doc() -> FormDocument {
    let mut doc = FormDocument::new();
    doc.set_title("Signup");
    for t in [FieldType::Text, FieldType::TextArea, FieldType::Select, FieldType::Radio, FieldType::Radio] {
        doc.append_field(t);
    }
    doc.fields[0].placeholder = "Your name".into();
    doc.fields[0].required = true;
    if let Some(options) = doc.fields[2].options_mut() {
        options.extend(["Red".to_string(), "Blue".to_string()]);
    }
    doc
}

#[test]
fn project_is_deterministic_and_leaves_doc_untouched() {
    let doc = sample_doc();
    let before = doc.clone();
    let first = project(&doc);
    let second = project(&doc);
    assert_eq!(first, second);
    assert_eq!(doc, before);
}

#[test]
fn project_keeps_order_and_positions() {
    let fields = project(&sample_doc());
    assert_eq!(fields.len(), 5);
    for (i, field) in fields.iter().enumerate() {
        assert_eq!(field.position, i);
    }
}

#[test]
fn text_projection_carries_placeholder_and_required() {
    let fields = project(&sample_doc());
    assert_eq!(fields[0].control, Control::TextInput { placeholder: "Your name".into(), required: true });
}

#[test]
fn textarea_projection_carries_max_length() {
    let fields = project(&sample_doc());
    assert_eq!(
        fields[1].control,
        Control::TextArea { placeholder: String::new(), max_length: Some(100), required: false }
    );
}

#[test]
fn select_projection_has_prompt_and_choices() {
    let fields = project(&sample_doc());
    assert_eq!(
        fields[2].control,
        Control::Select { prompt: SELECT_PROMPT, choices: vec!["Red".into(), "Blue".into()], required: false }
    );
}

#[test]
fn radio_groups_are_named_by_position() {
    let fields = project(&sample_doc());
    let names: Vec<&str> = fields
        .iter()
        .filter_map(|f| match &f.control {
            Control::RadioGroup { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["radio-3", "radio-4"]);
}

#[test]
fn empty_options_project_to_empty_choices() {
    let mut doc = FormDocument::new();
    doc.append_field(FieldType::Checkbox);
    let fields = project(&doc);
    assert_eq!(
        fields[0].control,
        Control::CheckboxGroup { name: "Checkbox".into(), choices: Vec::new(), required: false }
    );
}

#[test]
fn empty_document_projects_nothing() {
    assert!(project(&FormDocument::new()).is_empty());
}

#[test]
fn preview_includes_title() {
    let preview = Preview::of(&sample_doc());
    assert_eq!(preview.title, "Signup");
    assert_eq!(preview.fields.len(), 5);
}

#[test]
fn display_marks_required_fields() {
    let fields = project(&sample_doc());
    assert_eq!(fields[0].to_string(), "Text Input * [text: Your name]");
    assert_eq!(fields[1].to_string(), "Text Area [textarea:  (max 100)]");
    assert_eq!(fields[2].to_string(), "Select Dropdown [select: Select an option | Red | Blue]");
}
