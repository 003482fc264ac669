//! Pagination engine: places sections onto fixed-size pages.
//!
//! Layout is a pure function from a [`Document`] and [`RenderOptions`] to a
//! [`LayoutPlan`]; the PDF writer only serializes the plan. Coordinates in the
//! plan are top-down (y grows towards the bottom of the page).
//!
//! Before each section the engine estimates its full height and starts a new
//! page when it would overflow. Every wrapped line is then bounds-checked on
//! its own, so a section taller than the remaining space flows onto the
//! following pages one line at a time.

use super::metrics::{measure, wrap};
use super::options::{PageSize, RenderOptions};
use super::style::{Align, Color, StyleRule};
use crate::error::Result;
use crate::format::{format, spans_text, FormatMode};
use crate::model::{Document, Section, SectionKind};
use serde::{Deserialize, Serialize};

/// Gap between a section header's last line and its rule.
const RULE_GAP: f32 = 2.0;

/// Transient layout position for one export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    /// Zero-based page index
    pub page: usize,
    /// Top of the next line, measured from the top edge
    pub y: f32,
    pub page_size: PageSize,
    pub margin: f32,
}

impl RenderCursor {
    /// Cursor at the top of the first page.
    pub fn new(page_size: PageSize, margin: f32) -> Self {
        Self {
            page: 0,
            y: margin,
            page_size,
            margin,
        }
    }

    /// Lowest y any placed content may reach.
    pub fn limit(&self) -> f32 {
        self.page_size.height - self.margin
    }

    /// Whether nothing has been placed on the current page yet.
    pub fn at_top(&self) -> bool {
        self.y <= self.margin
    }

    /// Whether `height` more points fit on the current page.
    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.limit()
    }

    /// Start a new page.
    pub fn break_page(&mut self) {
        self.page += 1;
        self.y = self.margin;
    }

    /// Break first unless `height` fits or the page is still empty.
    ///
    /// Returns `true` when a page break was emitted.
    pub fn ensure_room(&mut self, height: f32) -> bool {
        if self.fits(height) || self.at_top() {
            false
        } else {
            self.break_page();
            true
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }
}

/// A line of text at its final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub ordinal: usize,
    pub text: String,
    pub x: f32,
    /// Baseline, measured from the top edge
    pub y: f32,
    pub font_size: f32,
    pub bold: bool,
    pub color: Color,
}

/// A horizontal rule at its final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
    pub color: Color,
}

/// Everything drawn on one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    pub lines: Vec<PlacedLine>,
    pub rules: Vec<PlacedRule>,
}

/// Result of laying out a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub page_size: PageSize,
    pub pages: Vec<LayoutPage>,
}

impl LayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All placed lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    fn page_mut(&mut self, index: usize) -> &mut LayoutPage {
        while self.pages.len() <= index {
            self.pages.push(LayoutPage::default());
        }
        &mut self.pages[index]
    }
}

/// A section prepared for placement: style chosen, text wrapped.
struct Block {
    ordinal: usize,
    rule: StyleRule,
    lines: Vec<String>,
    indent: f32,
    glyph: Option<char>,
    header_rule: bool,
}

impl Block {
    fn line_height(&self, factor: f32) -> f32 {
        self.rule.font_size * factor
    }

    fn estimated_height(&self, factor: f32, rule_thickness: f32) -> f32 {
        let mut height = self.rule.space_before
            + self.lines.len() as f32 * self.line_height(factor)
            + self.rule.space_after;
        if self.header_rule {
            height += RULE_GAP + rule_thickness;
        }
        height
    }
}

/// Lay out a document onto pages.
///
/// The plan always has at least one page, so an empty document becomes a
/// single blank page.
pub fn layout(doc: &Document, options: &RenderOptions) -> Result<LayoutPlan> {
    options.validate()?;

    let style = &options.style;
    let mut cursor = RenderCursor::new(options.page_size, options.margin);
    let mut plan = LayoutPlan {
        page_size: options.page_size,
        pages: vec![LayoutPage::default()],
    };

    for section in doc.sections() {
        let block = prepare(doc, section, options);
        let line_h = block.line_height(style.line_height);

        if cursor.ensure_room(block.estimated_height(style.line_height, style.rule_thickness)) {
            log::debug!(
                "Page break before section {} ({}), now on page {}",
                section.ordinal,
                section.kind,
                cursor.page + 1
            );
        }

        cursor.advance(block.rule.space_before);

        for (i, text) in block.lines.iter().enumerate() {
            if cursor.ensure_room(line_h) {
                log::debug!(
                    "Section {} continues on page {} at line {}",
                    section.ordinal,
                    cursor.page + 1,
                    i + 1
                );
            }

            let width = options.content_width() - block.indent;
            let x = match block.rule.align {
                Align::Left => options.margin + block.indent,
                Align::Center => {
                    let w = measure(text, block.rule.font_size, block.rule.bold);
                    options.margin + block.indent + ((width - w) / 2.0).max(0.0)
                }
            };
            let baseline = cursor.y + block.rule.font_size;
            let page = plan.page_mut(cursor.page);

            if let (0, Some(glyph)) = (i, block.glyph) {
                page.lines.push(PlacedLine {
                    ordinal: block.ordinal,
                    text: glyph.to_string(),
                    x: options.margin,
                    y: baseline,
                    font_size: block.rule.font_size,
                    bold: false,
                    color: block.rule.color,
                });
            }
            page.lines.push(PlacedLine {
                ordinal: block.ordinal,
                text: text.clone(),
                x,
                y: baseline,
                font_size: block.rule.font_size,
                bold: block.rule.bold,
                color: block.rule.color,
            });
            log::trace!("Placed line at page {} y={:.2}: {}", cursor.page, baseline, text);

            cursor.advance(line_h);
        }

        if block.header_rule && style.rule_thickness > 0.0 {
            let height = RULE_GAP + style.rule_thickness;
            if cursor.ensure_room(height) {
                log::debug!(
                    "Rule of section {} carried to page {}",
                    section.ordinal,
                    cursor.page + 1
                );
            }
            if cursor.fits(height) {
                cursor.advance(RULE_GAP);
                let y = cursor.y + style.rule_thickness / 2.0;
                plan.page_mut(cursor.page).rules.push(PlacedRule {
                    x1: options.margin,
                    x2: options.page_size.width - options.margin,
                    y,
                    thickness: style.rule_thickness,
                    color: style.rule_color,
                });
                cursor.advance(style.rule_thickness);
            } else {
                log::debug!("No room for rule of section {}", section.ordinal);
            }
        }

        cursor.advance(block.rule.space_after);
    }

    log::debug!(
        "Laid out {} sections on {} page(s)",
        doc.len(),
        plan.page_count()
    );
    Ok(plan)
}

fn prepare(doc: &Document, section: &Section, options: &RenderOptions) -> Block {
    let style = &options.style;
    let rule = if doc.is_subtitle(section.ordinal) {
        style.subtitle
    } else {
        *style.rule(section.kind)
    };

    let (indent, glyph) = match section.kind {
        SectionKind::Bullet => (style.bullet_indent, Some(style.bullet_glyph)),
        _ => (0.0, None),
    };

    let text = spans_text(&format(&section.display_text(), FormatMode::Ats));
    let width = options.content_width() - indent;
    let lines = wrap(&text, width, rule.font_size, rule.bold);

    Block {
        ordinal: section.ordinal,
        rule,
        lines,
        indent,
        glyph,
        header_rule: section.kind == SectionKind::SectionHeader,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentType;
    use crate::parser::ResumeParser;
    use crate::render::StyleSheet;

    fn tight_options() -> RenderOptions {
        let mut style = StyleSheet::ats();
        style.line_height = 1.25;
        style.plain_text = StyleRule::body(10.0, Color::BLACK);
        RenderOptions::new()
            .with_page_size(PageSize::custom(200.0, 644.0).unwrap())
            .with_margin(72.0)
            .with_style(style)
    }

    #[test]
    fn test_cursor_transitions() {
        let mut cursor = RenderCursor::new(PageSize::custom(100.0, 200.0).unwrap(), 10.0);
        assert!(cursor.at_top());
        assert!(!cursor.ensure_room(500.0));
        cursor.advance(170.0);
        assert!(cursor.fits(10.0));
        assert!(!cursor.fits(10.5));
        assert!(cursor.ensure_room(20.0));
        assert_eq!(cursor.page, 1);
        assert_eq!(cursor.y, 10.0);
    }

    #[test]
    fn test_empty_document_single_blank_page() {
        let plan = layout(&Document::empty(DocumentType::Resume), &RenderOptions::new()).unwrap();
        assert_eq!(plan.page_count(), 1);
        assert_eq!(plan.line_count(), 0);
    }

    #[test]
    fn test_eighty_lines_make_two_pages() {
        // 56pt content width holds one "mmmmm" per line; 500pt holds 40 lines of 12.5pt
        let text = vec!["mmmmm"; 80].join(" ");
        let doc = ResumeParser::new().parse(&text).unwrap();
        assert_eq!(doc.len(), 1);

        let plan = layout(&doc, &tight_options()).unwrap();
        assert_eq!(plan.page_count(), 2);
        assert_eq!(plan.pages[0].lines.len(), 40);
        assert_eq!(plan.pages[1].lines.len(), 40);
    }

    #[test]
    fn test_break_exactly_when_line_does_not_fit() {
        let options = tight_options();
        let pages = |n: usize| {
            let doc = ResumeParser::new().parse(&vec!["mmmmm"; n].join(" ")).unwrap();
            layout(&doc, &options).unwrap().page_count()
        };
        assert_eq!(pages(40), 1);
        assert_eq!(pages(41), 2);
    }

    #[test]
    fn test_lines_stay_above_bottom_margin() {
        let text = (0..60)
            .map(|i| format!("• Delivered project number {} with measurable outcomes for the team", i))
            .collect::<Vec<_>>()
            .join("\n");
        let doc = ResumeParser::new().parse(&format!("JANE DOE\nEXPERIENCE\n{}", text)).unwrap();
        let options = RenderOptions::new();
        let plan = layout(&doc, &options).unwrap();

        assert!(plan.page_count() > 1);
        for line in plan.lines() {
            assert!(line.y <= options.bottom_limit() + 1e-3, "{:?}", line);
        }
    }

    #[test]
    fn test_bullet_glyph_and_indent() {
        let doc = ResumeParser::new().parse("Jane Doe\n• Built APIs").unwrap();
        let options = RenderOptions::new();
        let plan = layout(&doc, &options).unwrap();
        let lines: Vec<&PlacedLine> = plan.lines().filter(|l| l.ordinal == 1).collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "•");
        assert_eq!(lines[0].x, options.margin);
        assert_eq!(lines[1].text, "Built APIs");
        assert_eq!(lines[1].x, options.margin + options.style.bullet_indent);
    }

    #[test]
    fn test_header_gets_rule_and_uppercase() {
        let doc = ResumeParser::new().parse("Jane Doe\nexperience").unwrap();
        let plan = layout(&doc, &RenderOptions::new()).unwrap();
        assert_eq!(plan.pages[0].rules.len(), 1);
        assert!(plan.lines().any(|l| l.text == "EXPERIENCE" && l.bold));
    }

    #[test]
    fn test_name_centered() {
        let doc = ResumeParser::new().parse("Jane Doe").unwrap();
        let options = RenderOptions::new();
        let plan = layout(&doc, &options).unwrap();
        let name = plan.lines().next().unwrap();
        let w = measure("Jane Doe", name.font_size, true);
        let center = name.x + w / 2.0;
        assert!((center - options.page_size.width / 2.0).abs() < 0.5);
    }

    #[test]
    fn test_header_rule_carried_past_full_page() {
        let mut style = StyleSheet::ats();
        style.line_height = 1.0;
        for kind in SectionKind::ALL {
            *style.rule_mut(kind) = StyleRule::body(10.0, Color::BLACK);
        }
        style.section_header = StyleRule::body(10.0, Color::BLACK).bold();
        let options = RenderOptions::new()
            .with_page_size(PageSize::custom(100.0, 60.0).unwrap())
            .with_margin(10.0)
            .with_style(style);

        // Eight one-word header lines fill two 40pt pages exactly.
        let header = format!("SKILLS{}", " AAAAAAAAAA".repeat(7));
        let doc = ResumeParser::new()
            .parse(&format!("Jane Doe\n{}", header))
            .unwrap();
        assert_eq!(doc.get(1).unwrap().kind, SectionKind::SectionHeader);

        let plan = layout(&doc, &options).unwrap();
        assert_eq!(plan.pages[1].lines.len(), 4);
        assert_eq!(plan.pages[2].lines.len(), 4);
        assert_eq!(plan.page_count(), 4);
        assert_eq!(plan.pages[3].rules.len(), 1);
        assert!(plan.pages[3].rules[0].y <= options.bottom_limit());
    }
}
