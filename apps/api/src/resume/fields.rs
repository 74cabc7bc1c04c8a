//! Field Inferencer: keyword heuristics that turn resume lines into `ResumeFields`.
//!
//! Two independent passes run over the same lines:
//! 1. Qualification detection: any line mentioning a degree/institution keyword.
//! 2. Section tagging: headers switch the active section, blank lines close it,
//!    and every other line is accumulated into the active section.
//!
//! Neither pass can fail. A document with no recognisable content produces
//! empty accumulators, never an error.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Case-insensitive markers of an education line.
pub const QUALIFICATION_KEYWORDS: &[&str] = &[
    "university",
    "bachelor",
    "master",
    "bsc",
    "m.sc",
    "phd",
    "college",
    "school",
    "diploma",
];

/// Case-insensitive markers that an experience line describes the current role.
const CURRENT_ROLE_MARKERS: &[&str] = &["current", "present"];

/// Everything the inferencer could derive from one uploaded resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFields {
    /// `None` when no line carried a `Name` label.
    pub name: Option<String>,
    pub past_experience: String,
    pub current_experience: String,
    pub skills: String,
    /// Keyword-matched lines in document order. Never reordered or deduplicated.
    pub qualifications: Vec<String>,
    /// Raw text of the Education / Qualifications section.
    pub education: String,
}

/// The resume section subsequent lines belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Experience,
    Skills,
    Qualifications,
}

/// What a matching rule does to the active section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAction {
    Enter(Section),
    Close,
}

/// One entry of the ordered section rule table.
pub struct SectionRule {
    pub label: &'static str,
    pub matches: fn(&str) -> bool,
    pub action: SectionAction,
}

/// Evaluated top to bottom; the first matching rule wins and the line is not
/// accumulated. A line matching no rule is content for the active section.
pub const SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        label: "experience header",
        matches: is_experience_header,
        action: SectionAction::Enter(Section::Experience),
    },
    SectionRule {
        label: "skills header",
        matches: is_skills_header,
        action: SectionAction::Enter(Section::Skills),
    },
    SectionRule {
        label: "qualifications header",
        matches: is_qualifications_header,
        action: SectionAction::Enter(Section::Qualifications),
    },
    SectionRule {
        label: "blank line",
        matches: is_blank,
        action: SectionAction::Close,
    },
];

fn is_experience_header(line: &str) -> bool {
    line.contains("Experience") || line.contains("EXPERIENCE")
}

fn is_skills_header(line: &str) -> bool {
    line.contains("Skills") || line.contains("SKILLS")
}

fn is_qualifications_header(line: &str) -> bool {
    ["Education", "EDUCATION", "Qualifications", "QUALIFICATIONS"]
        .iter()
        .any(|marker| line.contains(marker))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns the first rule matching `line`, if any.
pub fn classify_line(line: &str) -> Option<&'static SectionRule> {
    SECTION_RULES.iter().find(|rule| (rule.matches)(line))
}

/// Runs both passes and assembles `ResumeFields`.
pub fn infer_fields<S: AsRef<str>>(lines: &[S]) -> ResumeFields {
    let mut fields = tag_sections(lines);
    fields.qualifications = find_qualifications(lines);
    fields
}

/// Every line containing a qualification keyword, in encounter order.
pub fn find_qualifications<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| {
            let lower = line.to_lowercase();
            QUALIFICATION_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(String::from)
        .collect()
}

/// Section-tagging pass. Leaves `qualifications` empty.
pub fn tag_sections<S: AsRef<str>>(lines: &[S]) -> ResumeFields {
    let mut fields = ResumeFields::default();
    let mut current: Option<Section> = None;

    for raw in lines {
        let line = raw.as_ref().trim();

        // Independent of the header chain: a "Name" line can also be content.
        if line.contains("Name") {
            fields.name = Some(value_after_last_colon(line).to_string());
        }

        if let Some(rule) = classify_line(line) {
            trace!("{:?} matched {}", line, rule.label);
            current = match rule.action {
                SectionAction::Enter(section) => Some(section),
                SectionAction::Close => None,
            };
            continue;
        }

        let target = match current {
            Some(Section::Experience) if mentions_current_role(line) => {
                &mut fields.current_experience
            }
            Some(Section::Experience) => &mut fields.past_experience,
            Some(Section::Skills) => &mut fields.skills,
            Some(Section::Qualifications) => &mut fields.education,
            None => continue,
        };
        target.push_str(line);
        target.push(' ');
    }

    fields
}

fn value_after_last_colon(line: &str) -> &str {
    line.rsplit(':').next().unwrap_or(line).trim()
}

fn mentions_current_role(line: &str) -> bool {
    let lower = line.to_lowercase();
    CURRENT_ROLE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Strings used to pre-fill the editable form fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumePrefill {
    pub applicant_name: String,
    pub past_experience: String,
    pub current_experience: String,
    pub skillsets: String,
    pub qualifications: String,
}

impl ResumeFields {
    pub fn prefill(&self) -> ResumePrefill {
        ResumePrefill {
            applicant_name: self.name.clone().unwrap_or_default(),
            past_experience: self.past_experience.trim_end().to_string(),
            current_experience: self.current_experience.trim_end().to_string(),
            skillsets: self.skills.trim_end().to_string(),
            qualifications: self.qualifications.join(" "),
        }
    }
}
