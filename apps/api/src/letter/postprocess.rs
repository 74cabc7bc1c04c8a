use serde::{Deserialize, Serialize};

/// Fixed phrases the model emits around which paragraphs are split, with the
/// replacement applied to every occurrence. Order matters.
const PARAGRAPH_ANCHORS: &[(&str, &str)] = &[
    ("Dear Hiring Manager,", "Dear Hiring Manager,\n"),
    ("Thank you for considering", "\nThank you for considering"),
    ("Sincerely,", "\nSincerely,"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLetter {
    /// The exact prompt sent to the model.
    pub prompt: String,
    pub raw: String,
    pub formatted: String,
}

impl GeneratedLetter {
    pub fn new(prompt: String, raw: String) -> Self {
        let formatted = insert_paragraph_breaks(&raw);
        Self {
            prompt,
            raw,
            formatted,
        }
    }
}

/// Breaks after the salutation and before the closing lines.
pub fn insert_paragraph_breaks(letter: &str) -> String {
    PARAGRAPH_ANCHORS
        .iter()
        .fold(letter.to_string(), |text, (anchor, replacement)| {
            text.replace(anchor, replacement)
        })
}
