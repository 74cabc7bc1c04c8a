//! Prompt Composer: flattens the edited form fields into the single prompt
//! string the cover letter model was fine-tuned on.

use serde::{Deserialize, Serialize};

use crate::job_posting::QUALIFICATION_SEPARATOR;

/// The named fields the model expects, after the user's edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptFields {
    pub job_title: String,
    pub preferred_qualifications: Vec<String>,
    pub hiring_company: String,
    pub applicant_name: String,
    pub past_experience: String,
    /// `None` drops the segment entirely; `Some("")` keeps it with an empty value.
    #[serde(default)]
    pub current_experience: Option<String>,
    pub skillsets: String,
    pub qualifications: String,
}

/// Field order is fixed. Empty fields render in place as empty values.
pub fn compose_prompt(fields: &PromptFields) -> String {
    let mut segments = vec![
        ("Job Title", fields.job_title.clone()),
        (
            "Preferred Qualifications",
            fields.preferred_qualifications.join(QUALIFICATION_SEPARATOR),
        ),
        ("Hiring Company", fields.hiring_company.clone()),
        ("Applicant Name", fields.applicant_name.clone()),
        ("Past Working Experience", fields.past_experience.clone()),
    ];
    if let Some(current) = &fields.current_experience {
        segments.push(("Current Working Experience", current.clone()));
    }
    segments.push(("Skillsets", fields.skillsets.clone()));
    segments.push(("Qualifications", fields.qualifications.clone()));

    segments
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
