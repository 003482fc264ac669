//! resumark CLI - resume preview and ATS-safe PDF export

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

use resumark::detect::is_pdf_bytes;
use resumark::export::{export_batch, suggest_file_name};
use resumark::format::{Emphasis, FormattedSpan, Highlight};
use resumark::render::{self, BlockRole, RenderStats};
use resumark::{
    DocumentSink, DocumentType, FileSink, JsonFormat, PageSize, ParseOptions, RenderOptions,
    ResumeParser, SectionKind, SkillsScope, StyleSheet,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "resumark")]
#[command(version)]
#[command(about = "Preview and export resumes and cover letters as ATS-safe PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how each line is classified
    Classify {
        /// Input text file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Render a highlighted preview
    Preview {
        /// Input text file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit HTML instead of terminal output
        #[arg(long)]
        html: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Convert to ATS plain text
    Text {
        /// Input text file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Convert to JSON
    Json {
        /// Input text file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Serialize the screen render tree instead of the document model
        #[arg(long)]
        tree: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Export one or more inputs as PDF
    Export {
        /// Input text files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Page size: letter, a4, or WIDTHxHEIGHT in points
        #[arg(long, env = "RESUMARK_PAGE_SIZE", default_value = "letter")]
        page_size: PageSize,

        /// Page margin in points
        #[arg(long, env = "RESUMARK_MARGIN", default_value = "54")]
        margin: f32,

        /// Author written to PDF metadata
        #[arg(long, env = "RESUMARK_AUTHOR")]
        author: Option<String>,

        /// JSON style sheet replacing the built-in ATS styles
        #[arg(long, value_name = "FILE")]
        style: Option<PathBuf>,

        /// Date used in file names (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Write the current time as the PDF creation date
        #[arg(long)]
        timestamp: bool,

        /// Refuse to overwrite existing files
        #[arg(long)]
        no_overwrite: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Show document information
    Info {
        /// Input text file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,
    },
}

#[derive(clap::Args, Clone)]
struct ParseArgs {
    /// Document type (detected when omitted)
    #[arg(long = "type", value_enum)]
    doc_type: Option<DocType>,

    /// Keep skills detection within the current section
    #[arg(long)]
    section_skills: bool,
}

impl ParseArgs {
    fn to_options(&self, base: ParseOptions) -> ParseOptions {
        let mut options = base;
        if let Some(doc_type) = self.doc_type {
            options = options.with_document_type(doc_type.into());
        }
        if self.section_skills {
            options = options.with_skills_scope(SkillsScope::Section);
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DocType {
    Resume,
    CoverLetter,
}

impl From<DocType> for DocumentType {
    fn from(doc_type: DocType) -> Self {
        match doc_type {
            DocType::Resume => DocumentType::Resume,
            DocType::CoverLetter => DocumentType::CoverLetter,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify { input, json, parse } => cmd_classify(&input, json, &parse),
        Commands::Preview {
            input,
            html,
            output,
            parse,
        } => cmd_preview(&input, html, output.as_deref(), &parse),
        Commands::Text {
            input,
            output,
            parse,
        } => cmd_text(&input, output.as_deref(), &parse),
        Commands::Json {
            input,
            output,
            tree,
            compact,
            parse,
        } => cmd_json(&input, output.as_deref(), tree, compact, &parse),
        Commands::Export {
            inputs,
            output,
            page_size,
            margin,
            author,
            style,
            date,
            timestamp,
            no_overwrite,
            parse,
        } => {
            let mut options = RenderOptions::new()
                .with_page_size(page_size)
                .with_margin(margin);
            if let Some(author) = author {
                options = options.with_author(author);
            }
            if timestamp {
                options = options.with_created(Utc::now());
            }
            load_style(style.as_deref()).and_then(|style| {
                if let Some(style) = style {
                    options = options.with_style(style);
                }
                cmd_export(&inputs, &output, options, date, no_overwrite, &parse)
            })
        }
        Commands::Info { input, parse } => cmd_info(&input, &parse),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read input text. An unreadable file is an error the user must resolve.
fn read_input(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(path).map_err(|e| format!("Cannot read {}: {}", path.display(), e))?
    };

    if is_pdf_bytes(&bytes) {
        return Err(format!(
            "{} is a PDF; extract its text first and pass the plain text file",
            path.display()
        )
        .into());
    }

    String::from_utf8(bytes)
        .map_err(|_| format!("{} is not valid UTF-8 text", path.display()).into())
}

fn load_style(path: Option<&Path>) -> Result<Option<StyleSheet>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read style sheet {}: {}", path.display(), e))?;
            Ok(Some(StyleSheet::from_json(&json)?))
        }
        None => Ok(None),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_classify(input: &Path, json: bool, parse: &ParseArgs) -> CliResult {
    let text = read_input(input)?;
    let doc = ResumeParser::with_options(parse.to_options(ParseOptions::screen())).parse(&text)?;

    if json {
        println!("{}", render::to_json(doc.sections(), JsonFormat::Pretty)?);
        return Ok(());
    }

    for section in doc.sections() {
        let kind = format!("{:<18}", section.kind.as_str());
        let kind = match section.kind {
            SectionKind::Name => kind.magenta().bold(),
            SectionKind::Contact => kind.dimmed(),
            SectionKind::SectionHeader => kind.cyan().bold(),
            SectionKind::SubsectionHeader => kind.blue(),
            SectionKind::Bullet => kind.green(),
            SectionKind::SkillsLine => kind.yellow(),
            SectionKind::PlainText => kind.normal(),
        };
        let marker = if doc.is_subtitle(section.ordinal) {
            " (subtitle)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("{:>4}  {}{}  {}", section.ordinal, kind, marker, section.raw_text);
    }
    Ok(())
}

fn cmd_preview(input: &Path, html: bool, output: Option<&Path>, parse: &ParseArgs) -> CliResult {
    let text = read_input(input)?;
    let doc = ResumeParser::with_options(parse.to_options(ParseOptions::screen())).parse(&text)?;
    let tree = render::render_screen(&doc);

    if html {
        return write_output(output, &tree.to_html());
    }

    let mut lines = Vec::with_capacity(tree.len());
    for block in &tree.blocks {
        let body: String = block.spans.iter().map(|s| paint(s).to_string()).collect();
        let line = match block.role {
            BlockRole::Heading => format!("{}", body.bold()),
            BlockRole::Subtitle | BlockRole::Contact => format!("{}", body.dimmed()),
            BlockRole::SectionHeading => format!("\n{}\n{}", body.cyan().bold(), "─".repeat(40).dimmed()),
            BlockRole::Subsection => format!("{}", body.bold()),
            BlockRole::ListItem => format!("  • {}", body),
            BlockRole::Skills | BlockRole::Paragraph => body,
        };
        lines.push(line);
    }
    write_output(output, &lines.join("\n"))
}

fn paint(span: &FormattedSpan) -> ColoredString {
    let mut s: ColoredString = span.text.as_str().into();
    s = match span.emphasis {
        Some(Emphasis::Bold) => s.bold(),
        Some(Emphasis::Italic) => s.italic(),
        Some(Emphasis::Code) => s.on_bright_black(),
        None => s,
    };
    s = match span.highlight {
        Some(Highlight::Tech) => s.cyan(),
        Some(Highlight::Keyword) => s.bold(),
        Some(Highlight::Metric) => s.green(),
        None => s,
    };
    if span.link.is_some() {
        s = s.underline();
    }
    s
}

fn cmd_text(input: &Path, output: Option<&Path>, parse: &ParseArgs) -> CliResult {
    let text = read_input(input)?;
    let doc = ResumeParser::with_options(parse.to_options(ParseOptions::ats())).parse(&text)?;
    write_output(output, &render::to_text(&doc))
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    tree: bool,
    compact: bool,
    parse: &ParseArgs,
) -> CliResult {
    let text = read_input(input)?;
    let doc = ResumeParser::with_options(parse.to_options(ParseOptions::ats())).parse(&text)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if tree {
        render::to_json(&render::render_screen(&doc), format)?
    } else {
        render::to_json(&doc, format)?
    };
    write_output(output, &json)
}

fn cmd_export(
    inputs: &[PathBuf],
    output: &Path,
    options: RenderOptions,
    date: Option<NaiveDate>,
    no_overwrite: bool,
    parse: &ParseArgs,
) -> CliResult {
    options.validate()?;
    fs::create_dir_all(output)?;

    let texts = inputs
        .iter()
        .map(|path| read_input(path))
        .collect::<Result<Vec<_>, _>>()?;

    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    log::debug!("Exporting {} input(s) to {} dated {}", texts.len(), output.display(), date);
    let parse_options = parse.to_options(ParseOptions::ats());

    let spinner = rendering_spinner(texts.len());
    let results = export_batch(&texts, &parse_options, &options, date);
    spinner.finish_and_clear();

    let pb = writing_bar(inputs.len());

    let mut sink = FileSink::new(output);
    if no_overwrite {
        sink = sink.no_overwrite();
    }

    let mut totals = RenderStats::new();
    let mut skipped = Vec::new();
    let mut failed = 0usize;
    for (path, result) in inputs.iter().zip(results) {
        pb.inc(1);
        match result.and_then(|export| {
            sink.accept(&export.bytes, &export.file_name)?;
            Ok(export)
        }) {
            Ok(export) => totals.merge(&export.stats),
            Err(e) if e.is_empty_input() => skipped.push(path),
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red(), path.display(), e));
                failed += 1;
            }
        }
    }
    pb.finish_with_message("Done!");

    for path in &skipped {
        println!("{} {}: nothing to render", "Skipped".yellow(), path.display());
    }

    println!("\n{}", "Output files:".green().bold());
    let written = sink.written();
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), name);
    }
    println!(
        "\n{} {} file(s), {} page(s)",
        "Exported".green().bold(),
        written.len(),
        totals.page_count
    );

    if failed > 0 {
        return Err(format!("{} input(s) failed to export", failed).into());
    }
    Ok(())
}

/// Spinner shown while the batch renders; rendering reports no per-item progress.
fn rendering_spinner(count: usize) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap(),
    );
    spinner.set_message(format!("Rendering {} input(s)...", count));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn writing_bar(count: usize) -> ProgressBar {
    let pb = ProgressBar::new(count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Writing...");
    pb
}

fn cmd_info(input: &Path, parse: &ParseArgs) -> CliResult {
    let text = read_input(input)?;
    let doc = ResumeParser::with_options(parse.to_options(ParseOptions::ats())).parse(&text)?;
    let options = RenderOptions::new();
    let pdf = render::render_paginated(&doc, &options)?;
    let today = chrono::Local::now().date_naive();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Type".bold(), doc.doc_type().title());
    if let Some(name) = doc.name() {
        println!("{}: {}", "Name".bold(), name);
    }
    if let Some(role) = doc.subtitle() {
        println!("{}: {}", "Role".bold(), role.raw_text);
    }
    println!("{}: {}", "Title".bold(), pdf.metadata.title);
    println!("{}: {}", "Suggested file".bold(), suggest_file_name(&doc, today));

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = &pdf.stats;
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Headers".bold(), stats.header_count);
    println!("{}: {}", "Subsections".bold(), stats.subsection_count);
    println!("{}: {}", "Bullets".bold(), stats.bullet_count);
    println!("{}: {}", "Skills lines".bold(), stats.skills_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!(
        "{}: {} ({} lines on {} pt pages)",
        "Pages".bold(),
        stats.page_count,
        stats.line_count,
        options.page_size
    );

    Ok(())
}
