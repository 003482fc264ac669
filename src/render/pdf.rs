//! PDF serialization of a [`LayoutPlan`].

use super::options::RenderOptions;
use super::paginate::{layout, LayoutPage, LayoutPlan};
use super::result::RenderStats;
use crate::error::{Error, Result};
use crate::model::{Document, DocumentType, Metadata};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, ObjectId, Stream, StringFormat};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// A finished paginated export.
#[derive(Debug, Clone)]
pub struct PdfOutput {
    /// PDF byte stream
    pub bytes: Vec<u8>,

    /// Metadata written to the document information dictionary
    pub metadata: Metadata,

    /// Layout and content statistics
    pub stats: RenderStats,
}

impl PdfOutput {
    pub fn page_count(&self) -> usize {
        self.stats.page_count
    }
}

/// Lay out and serialize a document as PDF.
///
/// Any failure while writing is reported as [`Error::RenderFailure`] for the
/// document's type, and no bytes are returned.
pub fn render_paginated(doc: &Document, options: &RenderOptions) -> Result<PdfOutput> {
    let plan = layout(doc, options)?;
    let metadata = Metadata::for_document(doc, options.author.as_deref(), &options.producer);
    let bytes = write_pdf(&plan, &metadata, options)
        .map_err(|e| e.with_doc_type(doc.doc_type()))?;

    let stats = RenderStats::from_document(doc).with_plan(&plan);
    log::debug!(
        "Rendered {} as {} page(s), {} bytes",
        doc.doc_type(),
        stats.page_count,
        bytes.len()
    );

    Ok(PdfOutput {
        bytes,
        metadata,
        stats,
    })
}

/// Serialize a layout plan with the given metadata.
pub fn write_pdf(plan: &LayoutPlan, metadata: &Metadata, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut pdf = lopdf::Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular_id = pdf.add_object(font("Helvetica"));
    let bold_id = pdf.add_object(font("Helvetica-Bold"));
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => regular_id,
            FONT_BOLD => bold_id,
        },
    });

    let height = plan.page_size.height;
    let mut kids: Vec<Object> = Vec::with_capacity(plan.pages.len());
    for page in &plan.pages {
        let content = Content {
            operations: page_operations(page, height),
        };
        let encoded = content
            .encode()
            .map_err(|e| Error::render(DocumentType::default(), e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            plan.page_size.width.into(),
            plan.page_size.height.into(),
        ],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Title" => text_object(&metadata.title),
        "Subject" => text_object(&metadata.subject),
        "Creator" => text_object(&metadata.creator),
        "Producer" => text_object(&metadata.producer),
    };
    if let Some(author) = &metadata.author {
        info.set("Author", text_object(author));
    }
    if let Some(keywords) = &metadata.keywords {
        info.set("Keywords", text_object(keywords));
    }
    if let Some(created) = options.created {
        let stamp = created.format("D:%Y%m%d%H%M%SZ").to_string();
        info.set("CreationDate", Object::string_literal(stamp));
    }
    let info_id = pdf.add_object(info);
    pdf.trailer.set("Info", info_id);

    if options.compress {
        pdf.compress();
    }

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)
        .map_err(|e| Error::render(DocumentType::default(), e.to_string()))?;
    Ok(bytes)
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_operations(page: &LayoutPage, page_height: f32) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(page.lines.len() * 5 + page.rules.len() * 5);

    for line in &page.lines {
        let font = if line.bold { FONT_BOLD } else { FONT_REGULAR };
        let [r, g, b] = line.color.to_unit();
        ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), line.font_size.into()]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![line.x.into(), (page_height - line.y).into()]),
            Operation::new("Tj", vec![text_object(&line.text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    for rule in &page.rules {
        let y = page_height - rule.y;
        let [r, g, b] = rule.color.to_unit();
        ops.extend([
            Operation::new("RG", vec![r.into(), g.into(), b.into()]),
            Operation::new("w", vec![rule.thickness.into()]),
            Operation::new("m", vec![rule.x1.into(), y.into()]),
            Operation::new("l", vec![rule.x2.into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    ops
}

/// Literal string in WinAnsi encoding.
fn text_object(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Literal)
}

/// Encode for the standard fonts; characters outside WinAnsi become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '…' => 0x85,
            _ => b'?',
        })
        .collect();

    let replaced = text.chars().filter(|&c| c != '?').count()
        - bytes.iter().filter(|&&b| b != b'?').count();
    if replaced > 0 {
        log::warn!("Replaced {} unsupported character(s) in {:?}", replaced, text);
    }
    bytes
}
