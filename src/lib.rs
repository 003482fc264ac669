//! # resumark
//!
//! Resume and cover-letter pipeline: classify free-form text into a typed
//! document model, then render it as a highlighted on-screen preview or as a
//! paginated, ATS-safe PDF.
//!
//! ## Quick Start
//!
//! ```
//! use resumark::{parse_text, render};
//!
//! fn main() -> resumark::Result<()> {
//!     let doc = parse_text("JOHN SMITH\nSenior Software Engineer\nEXPERIENCE\n• Built APIs")?;
//!
//!     // Styled preview
//!     let html = render::render_screen(&doc).to_html();
//!     assert!(html.contains("JOHN SMITH"));
//!
//!     // Paginated export
//!     let pdf = render::render_paginated(&doc, &render::RenderOptions::default())?;
//!     assert_eq!(pdf.page_count(), 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Normalizer**: maps typography, bullets and markup to ATS-safe ASCII
//! - **Classifier**: first-match-wins rules assign one [`SectionKind`] per line
//! - **Builder**: sequential ordinals, immutable [`Document`]
//! - **Formatter**: inline markup and keyword highlighting ([`format::format`])
//! - **Renderers**: [`render::render_screen`], [`render::render_paginated`],
//!   [`render::to_text`], [`render::to_json`]
//! - **Export**: file naming, sinks and parallel batch export ([`export`])

pub mod detect;
pub mod error;
pub mod export;
pub mod format;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod render;
pub mod vocab;

// Re-export commonly used types
pub use detect::detect_document_type;
pub use error::{Error, Result};
pub use export::{DocumentSink, ExportResult, FileSink, MemorySink};
pub use format::{FormatMode, FormattedSpan};
pub use model::{Document, DocumentType, Metadata, Section, SectionKind};
pub use normalize::{normalize, NormalizeOptions, NormalizePreset};
pub use parser::{ParseOptions, ResumeParser, SkillsScope};
pub use render::{JsonFormat, PageSize, RenderOptions, RenderTree, StyleSheet};

use chrono::NaiveDate;

/// Parse text into a document without normalization.
///
/// # Example
///
/// ```
/// use resumark::{parse_text, SectionKind};
///
/// let doc = parse_text("Jane Doe\n• Shipped v2").unwrap();
/// assert_eq!(doc.get(1).unwrap().kind, SectionKind::Bullet);
/// ```
pub fn parse_text(text: &str) -> Result<Document> {
    ResumeParser::new().parse(text)
}

/// Parse text into a document with custom options.
pub fn parse_text_with_options(text: &str, options: ParseOptions) -> Result<Document> {
    ResumeParser::with_options(options).parse(text)
}

/// Render a highlighted preview of raw text.
///
/// Uses the screen normalization preset, which keeps rich glyphs.
pub fn to_screen(text: &str) -> Result<RenderTree> {
    let doc = parse_text_with_options(text, ParseOptions::screen())?;
    Ok(render::render_screen(&doc))
}

/// Render raw text as ATS plain text.
pub fn to_text(text: &str) -> Result<String> {
    let doc = parse_text_with_options(text, ParseOptions::ats())?;
    Ok(render::to_text(&doc))
}

/// Render raw text as a PDF with default options.
///
/// # Example
///
/// ```
/// let bytes = resumark::to_pdf("Jane Doe\nEXPERIENCE").unwrap();
/// assert!(bytes.starts_with(b"%PDF-"));
/// ```
pub fn to_pdf(text: &str) -> Result<Vec<u8>> {
    let doc = parse_text_with_options(text, ParseOptions::ats())?;
    Ok(render::render_paginated(&doc, &RenderOptions::default())?.bytes)
}

/// Builder running the whole pipeline with one set of options.
///
/// # Example
///
/// ```
/// use resumark::{PageSize, Resumark};
///
/// let result = Resumark::new()
///     .with_page_size(PageSize::a4())
///     .with_author("Jane Doe")
///     .parse("JANE DOE\nEXPERIENCE\n• Led a team of 5")?;
/// let pdf = result.to_pdf()?;
/// assert!(pdf.bytes.starts_with(b"%PDF-"));
/// # Ok::<(), resumark::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Resumark {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Resumark {
    /// Create a builder with ATS normalization and default render options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::ats(),
            render_options: RenderOptions::default(),
        }
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Force the document type.
    pub fn with_document_type(mut self, doc_type: DocumentType) -> Self {
        self.parse_options = self.parse_options.with_document_type(doc_type);
        self
    }

    /// Set the normalization preset.
    pub fn with_normalize(mut self, preset: NormalizePreset) -> Self {
        self.parse_options = self.parse_options.with_normalize_preset(preset);
        self
    }

    /// Limit skills detection to the current section.
    pub fn with_skills_scope(mut self, scope: SkillsScope) -> Self {
        self.parse_options = self.parse_options.with_skills_scope(scope);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.render_options = self.render_options.with_page_size(page_size);
        self
    }

    /// Set the page margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.render_options = self.render_options.with_margin(margin);
        self
    }

    /// Set the export style sheet.
    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.render_options = self.render_options.with_style(style);
        self
    }

    /// Set the author written to metadata.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_author(author);
        self
    }

    /// Parse text and return a result wrapper.
    pub fn parse(self, text: &str) -> Result<ResumarkResult> {
        let document = ResumeParser::with_options(self.parse_options).parse(text)?;
        Ok(ResumarkResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Resumark {
    fn default() -> Self {
        Self::new()
    }
}

/// Parsed document plus the options to render it with.
#[derive(Debug, Clone)]
pub struct ResumarkResult {
    document: Document,
    render_options: RenderOptions,
}

impl ResumarkResult {
    /// The parsed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume and return the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Screen render tree.
    pub fn to_screen(&self) -> RenderTree {
        render::render_screen(&self.document)
    }

    /// Screen preview as HTML.
    pub fn to_html(&self) -> String {
        self.to_screen().to_html()
    }

    /// ATS plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Document model as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Paginated PDF.
    pub fn to_pdf(&self) -> Result<render::PdfOutput> {
        render::render_paginated(&self.document, &self.render_options)
    }

    /// Paginated PDF with a suggested file name.
    pub fn export(&self, date: NaiveDate) -> Result<ExportResult> {
        export::export_document(&self.document, &self.render_options, date)
    }
}
