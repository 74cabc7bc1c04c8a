// Job side of the form: posting URL -> fetched page -> title, company, qualifications.
// Missing data degrades to the "Not found" sentinel; only network failures surface as errors.

pub mod fetcher;
pub mod handlers;
pub mod parser;

use serde::{Deserialize, Serialize};

pub use fetcher::JobPostingFetcher;

/// Placeholder shown in the form when the page lacks the expected markup.
pub const NOT_FOUND: &str = "Not found";

/// Separator used when preferred qualifications are shown as one editable field.
pub const QUALIFICATION_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    /// Page order, no deduplication.
    pub preferred_qualifications: Vec<String>,
}

impl JobPosting {
    /// The posting reported when the page could not be read at all.
    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND.to_string(),
            company: NOT_FOUND.to_string(),
            preferred_qualifications: Vec::new(),
        }
    }

    pub fn preferred_qualifications_text(&self) -> String {
        self.preferred_qualifications.join(QUALIFICATION_SEPARATOR)
    }
}

/// Splits an edited qualifications field back into its items.
pub fn split_qualifications(text: &str) -> Vec<String> {
    text.split(QUALIFICATION_SEPARATOR).map(String::from).collect()
}
