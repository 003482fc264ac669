//! Text normalization for ATS-safe output.
//!
//! The normalizer maps typographic glyphs to ASCII, strips lightweight inline
//! markup and canonicalizes bullets. It is total: any input yields some
//! output, and running it twice gives the same result as running it once.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::vocab::BULLET_GLYPHS;

/// Normalization preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizePreset {
    /// Preview: keep markup and rich glyphs, tidy bullets and whitespace
    Screen,
    /// Export: ASCII only, markup stripped
    #[default]
    Ats,
}

/// Options for text normalization.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Map dashes, quotes, ellipses and non-breaking spaces to ASCII
    pub map_typography: bool,

    /// Remove every non-ASCII code point (after decomposing accents)
    pub ascii_only: bool,

    /// Collapse inline markup to its inner text
    pub strip_markup: bool,

    /// Replace leading bullet glyphs with `bullet`
    pub standardize_bullets: bool,

    /// Canonical bullet character
    pub bullet: char,

    /// Collapse runs of spaces and trim each line
    pub collapse_whitespace: bool,
}

impl NormalizeOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Self {
        match preset {
            NormalizePreset::Screen => Self::screen(),
            NormalizePreset::Ats => Self::ats(),
        }
    }

    /// Preview options: glyphs and markup survive.
    pub fn screen() -> Self {
        Self {
            map_typography: false,
            ascii_only: false,
            strip_markup: false,
            standardize_bullets: true,
            bullet: '•',
            collapse_whitespace: true,
        }
    }

    /// Export options: everything an ATS parser could trip over is removed.
    pub fn ats() -> Self {
        Self {
            map_typography: true,
            ascii_only: true,
            strip_markup: true,
            standardize_bullets: true,
            bullet: '-',
            collapse_whitespace: true,
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::ats()
    }
}

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]\n]+)\]\(([^()\s]+)\)").unwrap());
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{A0}]+").unwrap());

/// Text normalization pipeline.
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a new normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Create a normalizer from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Self {
        Self::new(NormalizeOptions::from_preset(preset))
    }

    /// Options in effect.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Process text through the pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.replace("\r\n", "\n").replace('\r', "\n");

        // Stage 1: glyph mapping. Bullets must be mapped before ASCII
        // filtering or they would simply disappear.
        if self.options.map_typography {
            result = map_typography(&result);
        }
        if self.options.standardize_bullets {
            result = self.map_bullet_glyphs(&result);
        }
        if self.options.ascii_only {
            result = to_ascii(&result);
        }

        // Stage 2: markup. Repeat until nothing matches, since collapsing
        // one construct can expose another ("[[a](b)](c)").
        if self.options.strip_markup {
            result = strip_markup(&result);
        }

        // Stage 3: line cleanup
        if self.options.collapse_whitespace {
            result = collapse_whitespace(&result);
        }
        if self.options.standardize_bullets {
            result = self.standardize_line_bullets(&result);
        }

        result
    }

    fn map_bullet_glyphs(&self, text: &str) -> String {
        let bullet = self.options.bullet;
        text.chars()
            .map(|c| match c {
                '•' | '●' | '◦' | '○' | '⚬' | '▪' | '■' | '·' => bullet,
                other => other,
            })
            .collect()
    }

    fn standardize_line_bullets(&self, text: &str) -> String {
        let bullet = self.options.bullet;
        text.split('\n')
            .map(|line| {
                let mut chars = line.chars();
                match (chars.next(), chars.next()) {
                    (Some(first), Some(second))
                        if first != bullet
                            && BULLET_GLYPHS.contains(&first)
                            && second.is_whitespace() =>
                    {
                        format!("{}{}", bullet, &line[first.len_utf8()..])
                    }
                    _ => line.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

/// Normalize text for ATS-safe export.
///
/// Equivalent to `Normalizer::from_preset(NormalizePreset::Ats).process(text)`.
pub fn normalize(text: &str) -> String {
    Normalizer::from_preset(NormalizePreset::Ats).process(text)
}

fn map_typography(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}' => {
                out.push('-')
            }
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\u{2002}'..='\u{200A}' | '\u{202F}' => out.push(' '),
            '\u{200B}' | '\u{FEFF}' => {}
            other => out.push(other),
        }
    }
    out
}

fn to_ascii(text: &str) -> String {
    text.nfkd()
        .filter(|c| c.is_ascii() && !is_combining_mark(*c))
        .collect()
}

fn strip_markup(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = LINK.replace_all(&current, "$1");
        let next = CODE.replace_all(&next, "$1");
        let next = BOLD.replace_all(&next, "$1");
        let next = ITALIC.replace_all(&next, "$1").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| SPACE_RUNS.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_is_stripped() {
        let text = "**Led** a *small* team using `Rust` ([demo](https://x.dev))";
        assert_eq!(normalize(text), "Led a small team using Rust (demo)");
    }

    #[test]
    fn test_bullet_variants_are_canonical() {
        let text = "• One\n● Two\n◦ Three\n○ Four\n⚬ Five\n* Six\n- Seven";
        let result = normalize(text);
        for line in result.lines() {
            assert!(line.starts_with("- "), "unexpected line: {}", line);
        }
    }

    #[test]
    fn test_dashes_and_quotes() {
        let text = "2019 – 2021 — “quoted” ‘single’…";
        assert_eq!(normalize(text), "2019 - 2021 - \"quoted\" 'single'...");
    }

    #[test]
    fn test_non_ascii_removed() {
        assert_eq!(normalize("Café Zürich 東京"), "Cafe Zurich");
        assert!(normalize("naïve résumé ✓").is_ascii());
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize("  a \t  b  \r\n  c  "), "a b\nc");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "JOHN SMITH\n• Built *scalable* APIs — 40% faster",
            "[[a](b)](c)",
            "***bold italic***",
            "  * item with trailing *star",
            "**a*",
            "`code` and `unclosed",
            "* *x*",
            "   ",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_screen_preset_keeps_markup_and_glyphs() {
        let normalizer = Normalizer::from_preset(NormalizePreset::Screen);
        let result = normalizer.process("● **Built** café\n- item");
        assert_eq!(result, "• **Built** café\n• item");
    }

    #[test]
    fn test_inline_hyphen_untouched() {
        assert_eq!(normalize("Full-Stack Developer - Remote"), "Full-Stack Developer - Remote");
    }
}
