//! Document-level types.

use super::{Section, SectionKind};
use crate::vocab::{JOB_TITLES, VOCABULARY_VERSION};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of document the text represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// A resume / CV
    #[default]
    Resume,
    /// A cover letter
    CoverLetter,
}

impl DocumentType {
    /// Title used in exported metadata.
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::Resume => "Resume",
            DocumentType::CoverLetter => "Cover Letter",
        }
    }

    /// Subject used in exported metadata.
    pub fn subject(&self) -> &'static str {
        match self {
            DocumentType::Resume => "Professional Resume",
            DocumentType::CoverLetter => "Job Application Cover Letter",
        }
    }

    /// Token used in suggested file names.
    pub fn file_token(&self) -> &'static str {
        match self {
            DocumentType::Resume => "Resume",
            DocumentType::CoverLetter => "Cover_Letter",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Resume => f.write_str("resume"),
            DocumentType::CoverLetter => f.write_str("cover letter"),
        }
    }
}

/// An ordered, immutable sequence of classified sections.
///
/// Documents are produced by [`crate::parser::build`]; ordinals are
/// contiguous from zero and every section carries non-empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    doc_type: DocumentType,
    sections: Vec<Section>,
}

impl Document {
    pub(crate) fn from_parts(doc_type: DocumentType, sections: Vec<Section>) -> Self {
        Self { doc_type, sections }
    }

    /// Create an empty document of the given type.
    pub fn empty(doc_type: DocumentType) -> Self {
        Self {
            doc_type,
            sections: Vec::new(),
        }
    }

    /// Detected or configured document type.
    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    /// Sections in reading order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Get a section by ordinal.
    pub fn get(&self, ordinal: usize) -> Option<&Section> {
        self.sections.get(ordinal)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The candidate's name, if the first section is a name.
    pub fn name(&self) -> Option<&str> {
        self.sections
            .first()
            .filter(|s| s.kind == SectionKind::Name)
            .map(|s| s.raw_text.as_str())
    }

    /// The job-title subtitle directly below the name, if any.
    ///
    /// Only a plain-text section at ordinal 1 containing a job-title word
    /// qualifies.
    pub fn subtitle(&self) -> Option<&Section> {
        self.sections
            .get(1)
            .filter(|s| s.kind == SectionKind::PlainText && is_job_title(&s.raw_text))
    }

    /// Whether the section at `ordinal` is rendered as the subtitle.
    pub fn is_subtitle(&self, ordinal: usize) -> bool {
        ordinal == 1 && self.subtitle().is_some()
    }

    /// Require at least one section.
    ///
    /// Returns [`crate::Error::EmptyInput`] for empty documents so callers can
    /// short-circuit with "nothing to render".
    pub fn require_content(&self) -> crate::Result<()> {
        if self.is_empty() {
            Err(crate::Error::EmptyInput)
        } else {
            Ok(())
        }
    }

    /// Total word count over all sections.
    pub fn word_count(&self) -> usize {
        self.sections.iter().map(Section::word_count).sum()
    }
}

/// Check whether a line reads like a job title.
pub fn is_job_title(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .any(|word| {
            let word = word.to_lowercase();
            JOB_TITLES.iter().any(|title| *title == word)
        })
}

/// Metadata attached to an exported document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: String,

    /// Document subject
    pub subject: String,

    /// Document author
    pub author: Option<String>,

    /// Creator application
    pub creator: String,

    /// Producer string
    pub producer: String,

    /// Keywords
    pub keywords: Option<String>,
}

impl Metadata {
    /// Derive metadata for a document.
    ///
    /// The title is keyed by document type and prefixed with the candidate
    /// name when one was detected. `author` overrides the detected name.
    pub fn for_document(doc: &Document, author: Option<&str>, producer: &str) -> Self {
        let doc_type = doc.doc_type();
        let author = author.map(str::to_string).or_else(|| doc.name().map(title_case));
        let title = match &author {
            Some(name) => format!("{} - {}", name, doc_type.title()),
            None => doc_type.title().to_string(),
        };
        let keywords = doc.subtitle().map(|s| s.raw_text.clone());

        Self {
            title,
            subject: doc_type.subject().to_string(),
            author,
            creator: format!(
                "{} {} (vocabulary {})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                VOCABULARY_VERSION
            ),
            producer: producer.to_string(),
            keywords,
        }
    }
}

/// Convert "JOHN SMITH" or "john smith" into "John Smith".
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut name = Section::new(SectionKind::Name, "JOHN SMITH");
        name.ordinal = 0;
        let mut title = Section::new(SectionKind::PlainText, "Senior Software Engineer");
        title.ordinal = 1;
        Document::from_parts(DocumentType::Resume, vec![name, title])
    }

    #[test]
    fn test_name_and_subtitle() {
        let doc = sample();
        assert_eq!(doc.name(), Some("JOHN SMITH"));
        assert!(doc.is_subtitle(1));
        assert!(!doc.is_subtitle(0));
    }

    #[test]
    fn test_job_title_detection() {
        assert!(is_job_title("Senior Software Engineer"));
        assert!(is_job_title("Data Analyst, Finance"));
        assert!(!is_job_title("Passionate about distributed systems"));
    }

    #[test]
    fn test_metadata_title_keyed_by_type() {
        let doc = sample();
        let meta = Metadata::for_document(&doc, None, "resumark");
        assert_eq!(meta.title, "John Smith - Resume");
        assert_eq!(meta.subject, "Professional Resume");
        assert_eq!(meta.author.as_deref(), Some("John Smith"));

        assert!(meta.creator.ends_with(&format!("(vocabulary {})", VOCABULARY_VERSION)));

        let empty = Document::empty(DocumentType::CoverLetter);
        let meta = Metadata::for_document(&empty, None, "resumark");
        assert_eq!(meta.title, "Cover Letter");
        assert!(meta.author.is_none());
    }

    #[test]
    fn test_require_content() {
        assert!(Document::default().require_content().unwrap_err().is_empty_input());
        assert!(sample().require_content().is_ok());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("JOHN  SMITH"), "John Smith");
        assert_eq!(title_case("ada lovelace"), "Ada Lovelace");
    }
}
