//! Export orchestration: text in, named PDF out, delivered to a sink.

mod filename;
mod sink;

pub use filename::{sanitize_token, suggest_file_name};
pub use sink::{DocumentSink, FileSink, MemorySink};

use crate::error::Result;
use crate::model::{Document, DocumentType, Metadata};
use crate::normalize::NormalizeOptions;
use crate::parser::{ParseOptions, ResumeParser};
use crate::render::{render_paginated, RenderOptions, RenderStats};
use chrono::NaiveDate;
use std::collections::HashSet;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A rendered document with its suggested file name.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Suggested file name
    pub file_name: String,

    /// PDF byte stream
    pub bytes: Vec<u8>,

    /// Document type the export was rendered as
    pub doc_type: DocumentType,

    /// Metadata written into the PDF
    pub metadata: Metadata,

    /// Render statistics
    pub stats: RenderStats,
}

impl ExportResult {
    /// Number of pages in the PDF.
    pub fn page_count(&self) -> usize {
        self.stats.page_count
    }

    /// Hand the document to a sink.
    pub fn deliver(&self, sink: &mut dyn DocumentSink) -> Result<()> {
        sink.accept(&self.bytes, &self.file_name)
    }
}

/// Render a built document.
///
/// Returns [`Error::EmptyInput`](crate::Error::EmptyInput) for a document
/// without sections, which callers should treat as "nothing to export".
pub fn export_document(
    doc: &Document,
    options: &RenderOptions,
    date: NaiveDate,
) -> Result<ExportResult> {
    doc.require_content()?;

    let output = render_paginated(doc, options)?;
    Ok(ExportResult {
        file_name: suggest_file_name(doc, date),
        bytes: output.bytes,
        doc_type: doc.doc_type(),
        metadata: output.metadata,
        stats: output.stats,
    })
}

/// Parse, render and name raw text.
///
/// The export path is always ATS-normalized; when `parse` carries no
/// normalization the ATS preset is applied.
pub fn export_text(
    text: &str,
    parse: &ParseOptions,
    options: &RenderOptions,
    date: NaiveDate,
) -> Result<ExportResult> {
    let mut parse = parse.clone();
    if parse.normalize.is_none() {
        parse.normalize = Some(NormalizeOptions::ats());
    }

    let doc = ResumeParser::with_options(parse).parse(text)?;
    export_document(&doc, options, date)
}

/// Export text and deliver it to a sink in one step.
///
/// Nothing reaches the sink unless rendering succeeded.
pub fn export_to(
    text: &str,
    parse: &ParseOptions,
    options: &RenderOptions,
    date: NaiveDate,
    sink: &mut dyn DocumentSink,
) -> Result<ExportResult> {
    let result = export_text(text, parse, options, date)?;
    result.deliver(sink)?;
    Ok(result)
}

/// Export independent inputs, in parallel when the `parallel` feature is on.
///
/// Results are returned in input order; one failing input does not affect
/// the others. Suggested names are unique within the batch: repeats get a
/// `_2`, `_3`, ... suffix in input order.
pub fn export_batch<S>(
    inputs: &[S],
    parse: &ParseOptions,
    options: &RenderOptions,
    date: NaiveDate,
) -> Vec<Result<ExportResult>>
where
    S: AsRef<str> + Sync,
{
    log::debug!("Exporting batch of {} input(s)", inputs.len());

    #[cfg(feature = "parallel")]
    let mut results: Vec<Result<ExportResult>> = inputs
        .par_iter()
        .map(|text| export_text(text.as_ref(), parse, options, date))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let mut results: Vec<Result<ExportResult>> = inputs
        .iter()
        .map(|text| export_text(text.as_ref(), parse, options, date))
        .collect();

    dedupe_file_names(&mut results);
    results
}

fn dedupe_file_names(results: &mut [Result<ExportResult>]) {
    let mut seen: HashSet<String> = HashSet::new();
    for export in results.iter_mut().flatten() {
        if seen.insert(export.file_name.clone()) {
            continue;
        }

        let stem = export
            .file_name
            .strip_suffix(".pdf")
            .unwrap_or(&export.file_name)
            .to_string();
        let unique = (2..)
            .map(|n| format!("{}_{}.pdf", stem, n))
            .find(|candidate| !seen.contains(candidate))
            .unwrap_or_else(|| export.file_name.clone());

        log::debug!("Renamed duplicate {} to {}", export.file_name, unique);
        seen.insert(unique.clone());
        export.file_name = unique;
    }
}
