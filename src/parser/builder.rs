//! Document model builder.

use crate::error::{Error, Result};
use crate::model::{Document, DocumentType, Section};

/// Assemble classified sections into a resume [`Document`].
pub fn build(sections: Vec<Section>) -> Result<Document> {
    build_with_type(sections, DocumentType::default())
}

/// Assemble classified sections into a [`Document`] of the given type.
///
/// Ordinals are reassigned sequentially from zero. A section with blank text
/// is rejected with [`Error::MalformedDocument`]; the classifier never
/// produces one, so this only triggers for hand-built input.
pub fn build_with_type(mut sections: Vec<Section>, doc_type: DocumentType) -> Result<Document> {
    for (ordinal, section) in sections.iter_mut().enumerate() {
        if section.raw_text.trim().is_empty() {
            return Err(Error::MalformedDocument {
                ordinal,
                reason: format!("{} section has empty text", section.kind),
            });
        }
        section.ordinal = ordinal;
    }

    Ok(Document::from_parts(doc_type, sections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionKind;

    #[test]
    fn test_build_assigns_ordinals() {
        let mut a = Section::new(SectionKind::Name, "Jane Doe");
        a.ordinal = 7;
        let b = Section::new(SectionKind::PlainText, "Engineer");
        let doc = build(vec![a, b]).unwrap();

        let ordinals: Vec<usize> = doc.sections().iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1]);
        assert_eq!(doc.doc_type(), DocumentType::Resume);
    }

    #[test]
    fn test_build_rejects_empty_text() {
        let sections = vec![
            Section::new(SectionKind::Name, "Jane Doe"),
            Section::new(SectionKind::Bullet, "   "),
        ];
        let err = build(sections).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { ordinal: 1, .. }));
    }

    #[test]
    fn test_build_empty() {
        let doc = build_with_type(Vec::new(), DocumentType::CoverLetter).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.doc_type(), DocumentType::CoverLetter);
    }
}
