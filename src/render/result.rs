//! Render statistics.

use super::paginate::LayoutPlan;
use crate::model::{Document, SectionKind};
use serde::{Deserialize, Serialize};

/// Statistics collected while rendering a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of sections in the document
    pub section_count: usize,

    /// Number of section headers
    pub header_count: usize,

    /// Number of subsection headers
    pub subsection_count: usize,

    /// Number of bullet items
    pub bullet_count: usize,

    /// Number of skills lines
    pub skills_count: usize,

    /// Number of pages emitted (0 when not paginated)
    pub page_count: usize,

    /// Number of placed text lines, bullet glyphs excluded
    pub line_count: usize,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: usize,

    /// Character count (excluding whitespace)
    pub char_count: usize,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count sections and text of a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for section in doc.sections() {
            stats.add_section(section.kind);
            stats.count_text(&section.raw_text);
        }
        stats
    }

    /// Record pagination results.
    pub fn with_plan(mut self, plan: &LayoutPlan) -> Self {
        self.page_count = plan.page_count();
        self.line_count = plan
            .pages
            .iter()
            .map(|page| {
                // bullet glyphs share their line's ordinal and baseline
                let mut count = page.lines.len();
                for pair in page.lines.windows(2) {
                    if pair[0].ordinal == pair[1].ordinal && pair[0].y == pair[1].y {
                        count -= 1;
                    }
                }
                count
            })
            .sum();
        self
    }

    /// Increment the counter for a section kind.
    pub fn add_section(&mut self, kind: SectionKind) {
        self.section_count += 1;
        match kind {
            SectionKind::SectionHeader => self.header_count += 1,
            SectionKind::SubsectionHeader => self.subsection_count += 1,
            SectionKind::Bullet => self.bullet_count += 1,
            SectionKind::SkillsLine => self.skills_count += 1,
            _ => {}
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count();
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count();
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.section_count += other.section_count;
        self.header_count += other.header_count;
        self.subsection_count += other.subsection_count;
        self.bullet_count += other.bullet_count;
        self.skills_count += other.skills_count;
        self.page_count += other.page_count;
        self.line_count += other.line_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
