//! Screen renderer: document model to a styled, highlighted [`RenderTree`].

use super::style::{Align, StyleRule, StyleSheet};
use crate::format::{format, is_safe_link, Emphasis, FormatMode, FormattedSpan};
use crate::model::{Document, DocumentType, SectionKind};
use serde::{Deserialize, Serialize};

/// Presentation role of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    /// Candidate name, large and centered
    Heading,
    /// Job title under the name
    Subtitle,
    Contact,
    SectionHeading,
    Subsection,
    ListItem,
    Skills,
    Paragraph,
}

impl BlockRole {
    fn css_class(&self) -> &'static str {
        match self {
            BlockRole::Heading => "name",
            BlockRole::Subtitle => "subtitle",
            BlockRole::Contact => "contact",
            BlockRole::SectionHeading => "section-header",
            BlockRole::Subsection => "subsection-header",
            BlockRole::ListItem => "bullet",
            BlockRole::Skills => "skills",
            BlockRole::Paragraph => "text",
        }
    }

    fn html_tag(&self) -> &'static str {
        match self {
            BlockRole::Heading => "h1",
            BlockRole::SectionHeading => "h2",
            BlockRole::Subsection => "h3",
            BlockRole::ListItem => "li",
            _ => "p",
        }
    }
}

/// One styled block, produced from one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderBlock {
    pub ordinal: usize,
    pub kind: SectionKind,
    pub role: BlockRole,
    pub style: StyleRule,
    pub spans: Vec<FormattedSpan>,
}

impl RenderBlock {
    /// Text of the block without styling.
    pub fn text(&self) -> String {
        crate::format::spans_text(&self.spans)
    }
}

/// Styled preview of a document, ready for a UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTree {
    pub doc_type: DocumentType,
    pub blocks: Vec<RenderBlock>,
}

impl RenderTree {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Serialize as an HTML fragment.
    ///
    /// Consecutive list items are grouped into one `<ul>`. All text and
    /// attribute values are escaped.
    pub fn to_html(&self) -> String {
        let class = match self.doc_type {
            DocumentType::Resume => "resume",
            DocumentType::CoverLetter => "cover-letter",
        };
        let mut output = format!("<article class=\"{}\">\n", class);
        let mut in_list = false;

        for block in &self.blocks {
            let is_item = block.role == BlockRole::ListItem;
            if is_item && !in_list {
                output.push_str("<ul>\n");
            } else if !is_item && in_list {
                output.push_str("</ul>\n");
            }
            in_list = is_item;

            let tag = block.role.html_tag();
            output.push_str(&format!(
                "<{} class=\"{}\" style=\"{}\">",
                tag,
                block.role.css_class(),
                css_style(&block.style)
            ));
            for span in &block.spans {
                output.push_str(&span_html(span));
            }
            output.push_str(&format!("</{}>\n", tag));
        }

        if in_list {
            output.push_str("</ul>\n");
        }
        output.push_str("</article>\n");
        output
    }
}

/// Render a document for on-screen preview with the screen style table.
pub fn render_screen(doc: &Document) -> RenderTree {
    render_screen_with(doc, &StyleSheet::screen())
}

/// Render a document for on-screen preview with a custom style table.
pub fn render_screen_with(doc: &Document, sheet: &StyleSheet) -> RenderTree {
    let blocks = doc
        .sections()
        .iter()
        .map(|section| {
            let role = if doc.is_subtitle(section.ordinal) {
                BlockRole::Subtitle
            } else {
                role_for(section.kind)
            };
            let style = match role {
                BlockRole::Subtitle => sheet.subtitle,
                _ => *sheet.rule(section.kind),
            };
            RenderBlock {
                ordinal: section.ordinal,
                kind: section.kind,
                role,
                style,
                spans: format(&section.display_text(), FormatMode::Screen),
            }
        })
        .collect();

    RenderTree {
        doc_type: doc.doc_type(),
        blocks,
    }
}

fn role_for(kind: SectionKind) -> BlockRole {
    match kind {
        SectionKind::Name => BlockRole::Heading,
        SectionKind::Contact => BlockRole::Contact,
        SectionKind::SectionHeader => BlockRole::SectionHeading,
        SectionKind::SubsectionHeader => BlockRole::Subsection,
        SectionKind::Bullet => BlockRole::ListItem,
        SectionKind::SkillsLine => BlockRole::Skills,
        SectionKind::PlainText => BlockRole::Paragraph,
    }
}

fn css_style(rule: &StyleRule) -> String {
    let mut css = format!("font-size:{}pt;color:{}", rule.font_size, rule.color);
    if rule.bold {
        css.push_str(";font-weight:bold");
    }
    if rule.align == Align::Center {
        css.push_str(";text-align:center");
    }
    css.push_str(&format!(
        ";margin:{}pt 0 {}pt 0",
        rule.space_before, rule.space_after
    ));
    css
}

fn span_html(span: &FormattedSpan) -> String {
    let mut html = escape_html(&span.text);
    if let Some(emphasis) = span.emphasis {
        let tag = match emphasis {
            Emphasis::Bold => "strong",
            Emphasis::Italic => "em",
            Emphasis::Code => "code",
        };
        html = format!("<{}>{}</{}>", tag, html, tag);
    }
    if let Some(highlight) = span.highlight {
        html = format!("<span class=\"hl-{}\">{}</span>", highlight.as_str(), html);
    }
    if let Some(url) = span.link.as_deref().filter(|url| is_safe_link(url)) {
        html = format!("<a href=\"{}\">{}</a>", escape_html(url), html);
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
