// Prompt text for letter generation.
// Placeholders are substituted by `prompt::compose`.

/// Letter instruction. Replace: {subtype}, {category}, {tone}, {context}
pub const LETTER_PROMPT_TEMPLATE: &str =
    "Write a {subtype} in the {category} category using a {tone} tone. Context: {context}";

/// Separator between `Label: value` pairs in the context line.
pub const CONTEXT_SEPARATOR: &str = ", ";
