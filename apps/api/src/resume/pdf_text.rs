//! PDF Text Extractor: turns raw PDF bytes into an ordered list of text lines.
//!
//! Pages are visited in document order and each page contributes its lines in
//! the reading order `pdf_extract` produces (not necessarily top-to-bottom for
//! multi-column layouts). Image-only pages contribute nothing.
//! CPU-bound: callers on the async runtime must use `tokio::task::spawn_blocking`.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdfTextError {
    #[error("document is not a readable PDF: {0}")]
    Unreadable(String),
}

/// Extracts one string per visual line, page order then in-page order.
///
/// Empty input yields an empty list. Pages without extractable text
/// (scanned images) yield zero lines and are not an error.
pub fn extract_lines(bytes: &[u8]) -> Result<Vec<String>, PdfTextError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let pages = extract_pages(bytes)?;
    let page_count = pages.len();
    let lines: Vec<String> = pages.iter().flat_map(|page| page_lines(page)).collect();

    debug!("Extracted {} lines from {} PDF pages", lines.len(), page_count);
    Ok(lines)
}

/// `pdf_extract` panics on some malformed input instead of returning an error,
/// so the call is fenced with `catch_unwind`.
fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, PdfTextError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(PdfTextError::Unreadable(e.to_string())),
        Err(_) => Err(PdfTextError::Unreadable(
            "PDF extraction panicked (malformed document)".to_string(),
        )),
    }
}

/// Splits a single page of extracted text into lines.
///
/// Trailing whitespace is dropped from every line and blank lines at the page
/// edges are removed. Interior blank lines survive: they close resume sections.
fn page_lines(page: &str) -> Vec<String> {
    let lines: Vec<&str> = page.lines().map(str::trim_end).collect();

    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return Vec::new();
    };
    let last = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(first);

    lines[first..=last].iter().map(|l| l.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a minimal PDF with one page per entry, each line drawn with Helvetica.
    /// A page with no lines has an empty content stream, like a scanned page.
    fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
        let page_count = pages.len();
        let mut objects: Vec<String> = Vec::new();

        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", 4 + i * 2))
            .collect();
        objects.push(format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ));
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        for (i, lines) in pages.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + i * 2
            ));
            let stream = if lines.is_empty() {
                String::new()
            } else {
                let shown: Vec<String> = lines.iter().map(|l| format!("({l}) Tj T*")).collect();
                format!("BT /F1 12 Tf 14 TL 72 720 Td {} ET", shown.join(" "))
            };
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ));
        }

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, object) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, object).as_bytes());
        }

        let xref_offset = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    const FIRST_PAGE: &[&str] = &[
        "Name: Jane Doe",
        "EXPERIENCE",
        "Senior Engineer, Acme, 2021 - Present",
        "Engineer, Globex, 2017 - 2021",
    ];

    const LAST_PAGE: &[&str] = &[
        "SKILLS",
        "Rust, Tokio",
        "EDUCATION",
        "Master of Science, State University",
    ];

    #[test]
    fn test_lines_follow_page_order_and_skip_textless_pages() {
        let pdf = build_pdf(&[FIRST_PAGE, &[], LAST_PAGE]);
        let lines = extract_lines(&pdf).unwrap();

        let expected: Vec<&str> = FIRST_PAGE.iter().chain(LAST_PAGE).copied().collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_extracted_lines_feed_field_inference() {
        let pdf = build_pdf(&[FIRST_PAGE, &[], LAST_PAGE]);
        let fields = crate::resume::infer_fields(&extract_lines(&pdf).unwrap());

        assert_eq!(fields.name.as_deref(), Some("Jane Doe"));
        assert_eq!(fields.current_experience, "Senior Engineer, Acme, 2021 - Present ");
        assert_eq!(fields.past_experience, "Engineer, Globex, 2017 - 2021 ");
        assert_eq!(fields.skills, "Rust, Tokio ");
        assert_eq!(fields.education, "Master of Science, State University ");
        assert_eq!(fields.qualifications, vec!["Master of Science, State University"]);
    }

    #[test]
    fn test_pdf_without_any_text_yields_no_lines() {
        let pdf = build_pdf(&[&[], &[]]);
        assert!(extract_lines(&pdf).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        assert!(extract_lines(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let result = extract_lines(b"definitely not a pdf");
        assert!(matches!(result, Err(PdfTextError::Unreadable(_))));
    }

    #[test]
    fn test_page_lines_keeps_interior_blank_lines() {
        let page = "\n\nJane Doe\nEXPERIENCE\nAcme Corp   \n\nSKILLS\nRust\n\n\n";
        assert_eq!(
            page_lines(page),
            vec!["Jane Doe", "EXPERIENCE", "Acme Corp", "", "SKILLS", "Rust"]
        );
    }

    #[test]
    fn test_blank_page_contributes_nothing() {
        assert!(page_lines("").is_empty());
        assert!(page_lines("\n  \n\t\n").is_empty());
    }

    #[test]
    fn test_page_lines_handles_crlf() {
        assert_eq!(page_lines("Name: Jane\r\nMaster of Science\r\n"), vec![
            "Name: Jane",
            "Master of Science"
        ]);
    }
}
