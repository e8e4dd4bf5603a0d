//! Prompt composition: turns a selection plus field values into one instruction line.
//!
//! Pure and deterministic: the same inputs always produce the same string.

use std::collections::HashMap;

use crate::composer::catalog::FieldDescriptor;
use crate::composer::prompts::{CONTEXT_SEPARATOR, LETTER_PROMPT_TEMPLATE};
use crate::composer::tone::Tone;

/// User-entered values keyed by field name.
pub type FieldValues = HashMap<String, String>;

/// Composes the generation instruction for a letter.
///
/// Every descriptor contributes `Label: value` in declared order. A blank value falls
/// back to the descriptor's placeholder; with no placeholder the value stays empty but
/// the label is kept. Values for names outside `fields` are ignored.
pub fn compose(
    category: &str,
    subtype: &str,
    fields: &[FieldDescriptor],
    values: &FieldValues,
    tone: Tone,
) -> String {
    let context = fields
        .iter()
        .map(|field| format!("{}: {}", field.name, field_value(field, values)))
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);

    LETTER_PROMPT_TEMPLATE
        .replace("{subtype}", subtype)
        .replace("{category}", category)
        .replace("{tone}", tone.as_str())
        .replace("{context}", &context)
        .trim_end()
        .to_string()
}

fn field_value<'a>(field: &'a FieldDescriptor, values: &'a FieldValues) -> &'a str {
    match values.get(&field.name).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => value,
        _ => field.placeholder.as_deref().unwrap_or(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn education_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Student Name"),
            FieldDescriptor::new("Institution Name"),
            FieldDescriptor::new("Purpose of Letter"),
        ]
    }

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_admission_letter_prompt_names_everything() {
        let prompt = compose(
            "Education",
            "Admission Letter",
            &education_fields(),
            &values(&[("Student Name", "Asha"), ("Institution Name", "Delta U")]),
            Tone::Formal,
        );

        assert!(prompt.contains("Formal"));
        assert!(prompt.contains("Admission Letter"));
        assert!(prompt.contains("Education"));
        assert!(prompt.contains("Student Name: Asha"));
        assert!(prompt.contains("Institution Name: Delta U"));
    }

    #[test]
    fn test_empty_field_keeps_its_label() {
        let prompt = compose(
            "Education",
            "Admission Letter",
            &education_fields(),
            &values(&[("Student Name", "Asha")]),
            Tone::Formal,
        );
        assert!(prompt.contains("Institution Name: ,"));
        assert!(prompt.ends_with("Purpose of Letter:"));
    }

    #[test]
    fn test_blank_value_uses_placeholder() {
        let fields = vec![
            FieldDescriptor::new("Your Name"),
            FieldDescriptor {
                name: "Recipient Name".to_string(),
                placeholder: Some("To Whom It May Concern".to_string()),
            },
        ];
        let prompt = compose(
            "Legal",
            "Affidavit",
            &fields,
            &values(&[("Your Name", "Ravi"), ("Recipient Name", "   ")]),
            Tone::Assertive,
        );
        assert!(prompt.contains("Recipient Name: To Whom It May Concern"));
    }

    #[test]
    fn test_fields_render_in_declared_order() {
        let prompt = compose(
            "Education",
            "Admission Letter",
            &education_fields(),
            &values(&[
                ("Purpose of Letter", "Fall intake"),
                ("Student Name", "Asha"),
                ("Institution Name", "Delta U"),
            ]),
            Tone::Friendly,
        );
        assert!(prompt.ends_with(
            "Context: Student Name: Asha, Institution Name: Delta U, Purpose of Letter: Fall intake"
        ));
    }

    #[test]
    fn test_values_outside_descriptors_are_ignored() {
        let prompt = compose(
            "Education",
            "Admission Letter",
            &education_fields(),
            &values(&[("Employee Name", "Stale")]),
            Tone::Formal,
        );
        assert!(!prompt.contains("Stale"));
        assert!(!prompt.contains("Employee Name"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let fields = education_fields();
        let vals = values(&[("Student Name", "Asha"), ("Institution Name", "Delta U")]);
        let a = compose("Education", "Admission Letter", &fields, &vals, Tone::Grateful);
        let b = compose("Education", "Admission Letter", &fields, &vals, Tone::Grateful);
        assert_eq!(a, b);
    }
}
