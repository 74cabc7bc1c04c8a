//! Job posting parser: pulls title, company and preferred qualifications out of raw HTML.
//!
//! Pure: no network, no allocation beyond the parsed tree. Absent markup is
//! reported as `None` in `ScrapedPosting` and becomes the "Not found" sentinel
//! only when converted into a `JobPosting`.

use scraper::{ElementRef, Html, Selector};

use crate::job_posting::{JobPosting, NOT_FOUND};

/// Phrases that mark a sentence as a preferred qualification (lowercase).
pub const QUALIFICATION_PHRASES: &[&str] = &["experience with", "experience of", "years of"];

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parse result before sentinel substitution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub preferred_qualifications: Vec<String>,
}

impl From<ScrapedPosting> for JobPosting {
    fn from(scraped: ScrapedPosting) -> Self {
        JobPosting {
            title: scraped.title.unwrap_or_else(|| NOT_FOUND.to_string()),
            company: scraped.company.unwrap_or_else(|| NOT_FOUND.to_string()),
            preferred_qualifications: scraped.preferred_qualifications,
        }
    }
}

pub fn parse_job_posting(html: &str) -> JobPosting {
    scrape(html).into()
}

pub fn scrape(html: &str) -> ScrapedPosting {
    let document = Html::parse_document(html);

    let title_element = first_heading(&document);
    let company = title_element
        .and_then(|title| first_link_after(&document, title))
        .map(|link| element_text(&link));

    ScrapedPosting {
        title: title_element.map(|el| element_text(&el)),
        company,
        preferred_qualifications: preferred_qualifications(&visible_text(&document)),
    }
}

fn first_heading(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("h1").ok()?;
    document.select(&selector).next()
}

/// The first `<a>` that starts after `title` in document order, including
/// links nested inside the heading itself.
fn first_link_after<'a>(document: &'a Html, title: ElementRef<'a>) -> Option<ElementRef<'a>> {
    document
        .tree
        .root()
        .descendants()
        .skip_while(|node| node.id() != title.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// All rendered text nodes joined with a single space.
fn visible_text(document: &Html) -> String {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| HIDDEN_ELEMENTS.contains(&el.value().name()));
            (!hidden).then(|| &**text)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits on '.' and keeps, in order, every trimmed segment mentioning a qualification phrase.
pub fn preferred_qualifications(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            QUALIFICATION_PHRASES.iter().any(|p| lower.contains(p))
        })
        .map(String::from)
        .collect()
}
