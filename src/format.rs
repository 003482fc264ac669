//! Inline markup resolution and keyword highlighting.
//!
//! [`format`] turns one section's text into a list of [`FormattedSpan`]s.
//! The passes run in a fixed order and each pass only looks at text that no
//! earlier pass has tagged:
//!
//! 1. inline markup (`**bold**`, `*italic*`, `` `code` ``, `[text](url)`)
//! 2. emails, phone numbers and bare URLs
//! 3. technical vocabulary
//! 4. action verbs
//! 5. metrics (percentages, `10+`, currency, durations)
//!
//! [`FormatMode::Ats`] stops after pass 1 and drops hyperlinks, so exported
//! text stays plain.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::vocab::{ACTION_VERBS, TECH_TERMS};

/// Which consumer the spans are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatMode {
    /// Styled on-screen preview
    #[default]
    Screen,
    /// Plain, single-colour export
    Ats,
}

/// Inline emphasis from markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Bold,
    Italic,
    Code,
}

/// Vocabulary highlight class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    /// Technical term
    Tech,
    /// Action verb
    Keyword,
    /// Number or metric
    Metric,
}

impl Highlight {
    /// CSS class suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Highlight::Tech => "tech",
            Highlight::Keyword => "keyword",
            Highlight::Metric => "metric",
        }
    }
}

/// A styled substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedSpan {
    /// The text content
    pub text: String,

    /// Emphasis from markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,

    /// Vocabulary highlight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,

    /// Link target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl FormattedSpan {
    /// Create an untagged span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: None,
            highlight: None,
            link: None,
        }
    }

    /// Create a span with emphasis.
    pub fn emphasized(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            emphasis: Some(emphasis),
            ..Self::plain(text)
        }
    }

    /// Create a highlighted span.
    pub fn highlighted(text: impl Into<String>, highlight: Highlight) -> Self {
        Self {
            highlight: Some(highlight),
            ..Self::plain(text)
        }
    }

    /// Create a link span.
    pub fn linked(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            link: Some(url.into()),
            ..Self::plain(text)
        }
    }

    /// Whether an earlier pass has claimed this span.
    pub fn is_tagged(&self) -> bool {
        self.emphasis.is_some() || self.highlight.is_some() || self.link.is_some()
    }
}

/// Concatenate span texts.
pub fn spans_text(spans: &[FormattedSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"`([^`\n]+)`",
        r"|\[([^\[\]\n]+)\]\(([^()\s]+)\)",
        r"|\*\*([^*\n]+?)\*\*",
        r"|\*([^*\s](?:[^*\n]*[^*\s])?)\*",
    ))
    .unwrap()
});

static CONTACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<email>[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        r"|(?P<url>https?://[^\s()<>]+[^\s()<>.,;:!?]|www\.[^\s()<>]+[^\s()<>.,;:!?]|(?:linkedin|github)\.com/[^\s()<>]*[^\s()<>.,;:!?])",
        r"|(?P<phone>(?:\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4})",
    ))
    .unwrap()
});

static TECH: Lazy<Regex> = Lazy::new(|| alternation(TECH_TERMS));
static VERBS: Lazy<Regex> = Lazy::new(|| alternation(ACTION_VERBS));

static METRIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\$(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?(?:\s?(?:k|m|b|million|billion)\b)?\+?",
        r"|\d+(?:\.\d+)?\s?%",
        r"|\d+(?:\.\d+)?\+?\s?(?:years?|months?|yrs?|mos?)\b",
        r"|(?:\d{1,3}(?:,\d{3})+|\d+)\+",
    ))
    .unwrap()
});

/// Case-insensitive alternation, longest terms first so "JavaScript" beats "Java".
fn alternation(terms: &[&str]) -> Regex {
    let mut sorted: Vec<&str> = terms.to_vec();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let body = sorted
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)(?:{})", body)).unwrap()
}

/// Format one piece of section text.
pub fn format(text: &str, mode: FormatMode) -> Vec<FormattedSpan> {
    let mut spans = resolve_markup(text, mode);

    if mode == FormatMode::Screen {
        spans = refine(spans, linkify);
        spans = refine(spans, |t| whole_words(t, &TECH, Highlight::Tech));
        spans = refine(spans, |t| whole_words(t, &VERBS, Highlight::Keyword));
        spans = refine(spans, metrics);
    }

    coalesce(spans)
}

fn resolve_markup(text: &str, mode: FormatMode) -> Vec<FormattedSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in MARKUP.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(FormattedSpan::plain(&text[last..whole.start()]));
        }

        let span = if let Some(code) = caps.get(1) {
            FormattedSpan::emphasized(code.as_str(), Emphasis::Code)
        } else if let (Some(label), Some(url)) = (caps.get(2), caps.get(3)) {
            match mode {
                FormatMode::Screen if is_safe_link(url.as_str()) => {
                    FormattedSpan::linked(label.as_str(), url.as_str())
                }
                _ => FormattedSpan::plain(label.as_str()),
            }
        } else if let Some(bold) = caps.get(4) {
            FormattedSpan::emphasized(bold.as_str(), Emphasis::Bold)
        } else if let Some(italic) = caps.get(5) {
            FormattedSpan::emphasized(italic.as_str(), Emphasis::Italic)
        } else {
            FormattedSpan::plain(whole.as_str())
        };

        spans.push(span);
        last = whole.end();
    }

    if last < text.len() {
        spans.push(FormattedSpan::plain(&text[last..]));
    }
    spans
}

/// Link schemes allowed through to rendered output.
const SAFE_SCHEMES: [&str; 4] = ["http:", "https:", "mailto:", "tel:"];

/// Whether a markup link target may be emitted as a link.
pub fn is_safe_link(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    SAFE_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// Split every untagged span around the matches reported by `matcher`.
fn refine<F>(spans: Vec<FormattedSpan>, matcher: F) -> Vec<FormattedSpan>
where
    F: Fn(&str) -> Vec<(usize, usize, FormattedSpan)>,
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.is_tagged() {
            out.push(span);
            continue;
        }

        let mut last = 0;
        for (start, end, tagged) in matcher(&span.text) {
            if start < last {
                continue;
            }
            if start > last {
                out.push(FormattedSpan::plain(&span.text[last..start]));
            }
            out.push(tagged);
            last = end;
        }
        if last < span.text.len() {
            out.push(FormattedSpan::plain(&span.text[last..]));
        }
    }
    out
}

fn linkify(text: &str) -> Vec<(usize, usize, FormattedSpan)> {
    CONTACT
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let found = whole.as_str();
            let url = if caps.name("email").is_some() {
                format!("mailto:{}", found)
            } else if caps.name("url").is_some() {
                if found.starts_with("http") {
                    found.to_string()
                } else {
                    format!("https://{}", found)
                }
            } else {
                let digits: String = found
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '+')
                    .collect();
                format!("tel:{}", digits)
            };
            Some((whole.start(), whole.end(), FormattedSpan::linked(found, url)))
        })
        .collect()
}

fn whole_words(
    text: &str,
    regex: &Regex,
    highlight: Highlight,
) -> Vec<(usize, usize, FormattedSpan)> {
    regex
        .find_iter(text)
        .filter(|m| is_word_boundary(text, m.start(), m.end()))
        .map(|m| {
            (
                m.start(),
                m.end(),
                FormattedSpan::highlighted(m.as_str(), highlight),
            )
        })
        .collect()
}

fn metrics(text: &str) -> Vec<(usize, usize, FormattedSpan)> {
    METRIC
        .find_iter(text)
        .filter(|m| !text[..m.start()].chars().next_back().is_some_and(is_word_char))
        .map(|m| {
            (
                m.start(),
                m.end(),
                FormattedSpan::highlighted(m.as_str(), Highlight::Metric),
            )
        })
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Merge neighbouring untagged spans and drop empty ones.
fn coalesce(spans: Vec<FormattedSpan>) -> Vec<FormattedSpan> {
    let mut out: Vec<FormattedSpan> = Vec::with_capacity(spans.len());
    for span in spans.into_iter().filter(|s| !s.text.is_empty()) {
        match out.last_mut() {
            Some(prev) if !prev.is_tagged() && !span.is_tagged() => prev.text.push_str(&span.text),
            _ => out.push(span),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(spans: &'a [FormattedSpan], text: &str) -> &'a FormattedSpan {
        spans
            .iter()
            .find(|s| s.text == text)
            .unwrap_or_else(|| panic!("no span {:?} in {:?}", text, spans))
    }

    #[test]
    fn test_markup_resolution() {
        let spans = format("**Bold** and *italic* with `code` [site](https://x.dev)", FormatMode::Screen);
        assert_eq!(find(&spans, "Bold").emphasis, Some(Emphasis::Bold));
        assert_eq!(find(&spans, "italic").emphasis, Some(Emphasis::Italic));
        assert_eq!(find(&spans, "code").emphasis, Some(Emphasis::Code));
        assert_eq!(find(&spans, "site").link.as_deref(), Some("https://x.dev"));
        assert_eq!(spans_text(&spans), "Bold and italic with code site");
    }

    #[test]
    fn test_contacts_linkified() {
        let spans = format("jane@x.io | (555) 123-4567 | github.com/jane", FormatMode::Screen);
        assert_eq!(find(&spans, "jane@x.io").link.as_deref(), Some("mailto:jane@x.io"));
        assert_eq!(find(&spans, "(555) 123-4567").link.as_deref(), Some("tel:5551234567"));
        assert_eq!(
            find(&spans, "github.com/jane").link.as_deref(),
            Some("https://github.com/jane")
        );
    }

    #[test]
    fn test_highlights() {
        let spans = format(
            "Led migration to Kubernetes, cutting costs 40% for 10+ teams over 3 years",
            FormatMode::Screen,
        );
        assert_eq!(find(&spans, "Led").highlight, Some(Highlight::Keyword));
        assert_eq!(find(&spans, "Kubernetes").highlight, Some(Highlight::Tech));
        assert_eq!(find(&spans, "40%").highlight, Some(Highlight::Metric));
        assert_eq!(find(&spans, "10+").highlight, Some(Highlight::Metric));
        assert_eq!(find(&spans, "3 years").highlight, Some(Highlight::Metric));
    }

    #[test]
    fn test_whole_word_matching() {
        let spans = format("Javanese ledger; JavaScript and C++ code", FormatMode::Screen);
        assert!(spans.iter().all(|s| s.text != "Java"));
        assert!(spans.iter().all(|s| s.text != "led"));
        assert_eq!(find(&spans, "JavaScript").highlight, Some(Highlight::Tech));
        assert_eq!(find(&spans, "C++").highlight, Some(Highlight::Tech));
    }

    #[test]
    fn test_tagged_text_not_rematched() {
        let spans = format("**Rust** and Rust", FormatMode::Screen);
        let bold = &spans[0];
        assert_eq!(bold.emphasis, Some(Emphasis::Bold));
        assert!(bold.highlight.is_none());
        assert_eq!(spans.last().unwrap().highlight, Some(Highlight::Tech));
    }

    #[test]
    fn test_ats_mode_has_no_highlights_or_links() {
        let text = "Built **Rust** APIs serving 2M users, 99.9% uptime; see [demo](https://x.dev) or jane@x.io";
        let spans = format(text, FormatMode::Ats);
        assert!(spans.iter().all(|s| s.highlight.is_none()));
        assert!(spans.iter().all(|s| s.link.is_none()));
        assert_eq!(find(&spans, "Rust").emphasis, Some(Emphasis::Bold));
        assert!(spans_text(&spans).contains("jane@x.io"));
    }

    #[test]
    fn test_unsafe_link_schemes_become_plain() {
        for url in ["javascript:alert(1)", "JavaScript:alert(1)", "data:text/html,x", "vbscript:x", "/relative"] {
            let spans = format(&format!("See [portfolio]({})", url), FormatMode::Screen);
            assert!(spans.iter().all(|s| s.link.is_none()), "{}", url);
            assert_eq!(spans_text(&spans), "See portfolio");
        }
        assert!(is_safe_link("HTTPS://x.dev"));
        assert!(is_safe_link("mailto:jane@x.io"));
        assert!(is_safe_link("tel:5551234567"));
        assert!(!is_safe_link("javascript:void(0)"));
    }

    #[test]
    fn test_plain_text_roundtrip() {
        let spans = format("Nothing special here.", FormatMode::Screen);
        assert_eq!(spans, vec![FormattedSpan::plain("Nothing special here.")]);
        assert!(format("", FormatMode::Screen).is_empty());
    }
}
