//! Plain text rendering for ATS upload fields.

use crate::format::{format, spans_text, FormatMode};
use crate::model::{Document, SectionKind};

/// Convert a document to ATS-friendly plain text.
///
/// Section headers are upper-cased and preceded by a blank line, bullets get
/// a `- ` prefix, and inline markup is reduced to its text.
pub fn to_text(doc: &Document) -> String {
    let mut output = String::new();

    for section in doc.sections() {
        let text = spans_text(&format(&section.display_text(), FormatMode::Ats));
        match section.kind {
            SectionKind::SectionHeader => {
                if !output.is_empty() {
                    output.push('\n');
                }
                output.push_str(&text);
            }
            SectionKind::Bullet => {
                output.push_str("- ");
                output.push_str(&text);
            }
            _ => output.push_str(&text),
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentType;
    use crate::parser::ResumeParser;

    #[test]
    fn test_to_text() {
        let doc = ResumeParser::new()
            .parse("Jane Doe\nexperience\n• Built **fast** APIs\nskills\nRust, SQL")
            .unwrap();
        assert_eq!(
            to_text(&doc),
            "Jane Doe\n\nEXPERIENCE\n- Built fast APIs\n\nSKILLS\nRust, SQL\n"
        );
    }

    #[test]
    fn test_to_text_empty() {
        assert_eq!(to_text(&Document::empty(DocumentType::Resume)), "");
    }
}
