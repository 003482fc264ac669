//! Suggested file names for exported documents.

use crate::model::{title_case, Document};
use chrono::NaiveDate;

/// Longest single token kept in a file name.
const MAX_TOKEN_LEN: usize = 40;

/// Derive a file name from the detected name, role, type and a date.
///
/// Produces `{Name}_{Role}_{Type}_{YYYY-MM-DD}.pdf`; the name and role parts
/// are omitted when the document has none.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use resumark::export::suggest_file_name;
/// use resumark::parser::ResumeParser;
///
/// let doc = ResumeParser::new().parse("JOHN SMITH\nSenior Software Engineer").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(
///     suggest_file_name(&doc, date),
///     "John_Smith_Senior_Software_Engineer_Resume_2024-03-05.pdf"
/// );
/// ```
pub fn suggest_file_name(doc: &Document, date: NaiveDate) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);

    if let Some(name) = doc.name() {
        parts.push(sanitize_token(&title_case(name)));
    }
    if let Some(role) = doc.subtitle() {
        parts.push(sanitize_token(&role.raw_text));
    }
    parts.retain(|p| !p.is_empty());
    parts.push(doc.doc_type().file_token().to_string());
    parts.push(date.format("%Y-%m-%d").to_string());

    format!("{}.pdf", parts.join("_"))
}

/// Reduce arbitrary text to `[A-Za-z0-9_]`, joining words with underscores.
pub fn sanitize_token(text: &str) -> String {
    let mut token = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            token.push(c);
        } else if !token.is_empty() && !token.ends_with('_') {
            token.push('_');
        }
    }

    let mut token = token.trim_end_matches('_').to_string();
    if token.len() > MAX_TOKEN_LEN {
        token.truncate(MAX_TOKEN_LEN);
        token = token.trim_end_matches('_').to_string();
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentType;
    use crate::parser::ResumeParser;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_sanitize_token() {
        assert_eq!(sanitize_token("Jane O'Neil-Smith"), "Jane_O_Neil_Smith");
        assert_eq!(sanitize_token("  C++ / Rust  "), "C_Rust");
        assert_eq!(sanitize_token("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_token("***"), "");
        assert!(sanitize_token(&"a".repeat(100)).len() <= MAX_TOKEN_LEN);
    }

    #[test]
    fn test_file_name_without_name_or_role() {
        let doc = Document::empty(DocumentType::CoverLetter);
        assert_eq!(suggest_file_name(&doc, date()), "Cover_Letter_2024-01-15.pdf");
    }

    #[test]
    fn test_file_name_name_only() {
        let doc = ResumeParser::new().parse("Jane Doe\nEXPERIENCE").unwrap();
        assert_eq!(suggest_file_name(&doc, date()), "Jane_Doe_Resume_2024-01-15.pdf");
    }
}
