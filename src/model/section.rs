//! Section-level types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic role of a classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// The candidate's name (first line only)
    Name,
    /// Email, phone or profile links
    Contact,
    /// Canonical section title such as EXPERIENCE
    SectionHeader,
    /// "Role | Company | Dates" style line
    SubsectionHeader,
    /// List item; the glyph is stripped from the text
    Bullet,
    /// Comma- or label-separated list of skills
    SkillsLine,
    /// Anything else
    PlainText,
}

impl SectionKind {
    /// All kinds, in classification order.
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Name,
        SectionKind::Contact,
        SectionKind::SectionHeader,
        SectionKind::SubsectionHeader,
        SectionKind::SkillsLine,
        SectionKind::Bullet,
        SectionKind::PlainText,
    ];

    /// Short stable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Name => "name",
            SectionKind::Contact => "contact",
            SectionKind::SectionHeader => "section_header",
            SectionKind::SubsectionHeader => "subsection_header",
            SectionKind::Bullet => "bullet",
            SectionKind::SkillsLine => "skills_line",
            SectionKind::PlainText => "plain_text",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified line of the document model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Semantic role
    pub kind: SectionKind,

    /// Trimmed line content (bullet glyph removed for bullets)
    pub raw_text: String,

    /// Position within the document (0-based)
    pub ordinal: usize,
}

impl Section {
    /// Create a new section. The ordinal is assigned by the document builder.
    pub fn new(kind: SectionKind, raw_text: impl Into<String>) -> Self {
        Self {
            kind,
            raw_text: raw_text.into(),
            ordinal: 0,
        }
    }

    /// Text as it should appear when rendered.
    ///
    /// Section headers are upper-cased regardless of input case.
    pub fn display_text(&self) -> String {
        match self.kind {
            SectionKind::SectionHeader => self.raw_text.to_uppercase(),
            _ => self.raw_text.clone(),
        }
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.raw_text.split_whitespace().count()
    }
}
