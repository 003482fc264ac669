//! Text parsing: raw text to classified [`Document`].

mod builder;
mod classifier;
mod options;

pub use builder::{build, build_with_type};
pub use classifier::{classify, classify_line, Classifier, LineContext, Rule, RULES};
pub use options::{ParseOptions, SkillsScope};

use crate::detect::detect_document_type;
use crate::error::Result;
use crate::model::Document;
use crate::normalize::Normalizer;

/// Parser turning line-delimited text into a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct ResumeParser {
    options: ParseOptions,
}

impl ResumeParser {
    /// Create a parser with default options (no normalization).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Normalize (if configured), classify and build.
    ///
    /// Empty or blank input yields an empty document, not an error.
    pub fn parse(&self, text: &str) -> Result<Document> {
        let text = match &self.options.normalize {
            Some(options) => Normalizer::new(options.clone()).process(text),
            None => text.to_string(),
        };

        let doc_type = self
            .options
            .doc_type
            .unwrap_or_else(|| detect_document_type(&text));

        let lines: Vec<&str> = text.split('\n').collect();
        let sections = Classifier::with_scope(self.options.skills_scope).classify(&lines);
        build_with_type(sections, doc_type)
    }
}
