//! Parsing options and configuration.

use crate::model::DocumentType;
use crate::normalize::{NormalizeOptions, NormalizePreset};

/// Options for turning raw text into a [`crate::Document`].
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Normalization applied before classification (`None` = use text as-is)
    pub normalize: Option<NormalizeOptions>,

    /// Force a document type instead of detecting it
    pub doc_type: Option<DocumentType>,

    /// How long a SKILLS header keeps comma-separated lines classified as skills
    pub skills_scope: SkillsScope,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for the export path: ATS normalization first.
    pub fn ats() -> Self {
        Self::new().with_normalize_preset(NormalizePreset::Ats)
    }

    /// Options for the preview path: glyph-preserving normalization.
    pub fn screen() -> Self {
        Self::new().with_normalize_preset(NormalizePreset::Screen)
    }

    /// Set normalization options.
    pub fn with_normalize(mut self, options: NormalizeOptions) -> Self {
        self.normalize = Some(options);
        self
    }

    /// Set normalization preset.
    pub fn with_normalize_preset(mut self, preset: NormalizePreset) -> Self {
        self.normalize = Some(NormalizeOptions::from_preset(preset));
        self
    }

    /// Skip normalization entirely.
    pub fn without_normalize(mut self) -> Self {
        self.normalize = None;
        self
    }

    /// Force the document type.
    pub fn with_document_type(mut self, doc_type: DocumentType) -> Self {
        self.doc_type = Some(doc_type);
        self
    }

    /// Set the skills scope.
    pub fn with_skills_scope(mut self, scope: SkillsScope) -> Self {
        self.skills_scope = scope;
        self
    }
}

/// Lifetime of the "inside SKILLS" context for the skills rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkillsScope {
    /// Once SKILLS has been seen, it applies to the rest of the document
    #[default]
    Document,
    /// Only until the next section header
    Section,
}
