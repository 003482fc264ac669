//! Document type detection and output validation.

use crate::model::DocumentType;
use crate::vocab::{LETTER_CLOSINGS, LETTER_OPENINGS};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Lines inspected at each end of the text when looking for letter markers.
const LETTER_WINDOW: usize = 12;

/// Detect whether text is a cover letter or a resume.
///
/// A salutation near the top ("Dear ...") or a closing near the bottom
/// ("Sincerely,") marks a cover letter; anything else is a resume.
///
/// # Example
/// ```
/// use resumark::detect::detect_document_type;
/// use resumark::DocumentType;
///
/// assert_eq!(
///     detect_document_type("Dear Hiring Manager,\nI am excited..."),
///     DocumentType::CoverLetter
/// );
/// assert_eq!(detect_document_type("JANE DOE\nEXPERIENCE"), DocumentType::Resume);
/// ```
pub fn detect_document_type(text: &str) -> DocumentType {
    let lines: Vec<String> = text
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect();

    let opening = lines
        .iter()
        .take(LETTER_WINDOW)
        .any(|l| LETTER_OPENINGS.iter().any(|o| l.starts_with(o)));
    let closing = lines
        .iter()
        .rev()
        .take(LETTER_WINDOW)
        .any(|l| LETTER_CLOSINGS.iter().any(|c| is_closing(l, c)));

    if opening || closing {
        log::debug!("Detected cover letter (opening: {}, closing: {})", opening, closing);
        DocumentType::CoverLetter
    } else {
        DocumentType::Resume
    }
}

fn is_closing(line: &str, closing: &str) -> bool {
    line.strip_prefix(closing)
        .is_some_and(|rest| rest.trim_start_matches([',', '.', '!']).trim().is_empty())
}

/// Check if bytes start with a PDF header (`%PDF-x.y`).
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return false;
    }
    let version = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    version[0].is_ascii_digit() && version[1] == b'.' && version[2].is_ascii_digit()
}
