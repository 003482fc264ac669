//! Heuristic line classifier.
//!
//! Each non-blank line is tested against an ordered chain of rules; the first
//! rule that accepts the line decides its [`SectionKind`]. The order is part
//! of the contract because the patterns overlap (a name line is also
//! title-case plain text, a contact line may contain a `|`, ...).

use once_cell::sync::Lazy;
use regex::Regex;

use super::SkillsScope;
use crate::model::{Section, SectionKind};
use crate::vocab::{BULLET_GLYPHS, CONTACT_LABELS, SECTION_HEADERS, SKILL_LABELS};

static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z]*(?:[ ]+[A-Z][A-Za-z]*)*$").unwrap());

static CONTACT_LABEL: Lazy<Regex> = Lazy::new(|| {
    let labels = CONTACT_LABELS
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", labels)).unwrap()
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d])(?:\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}(?:$|[^\d])")
        .unwrap()
});

static SKILL_LABEL: Lazy<Regex> = Lazy::new(|| {
    let labels = SKILL_LABELS.join("|");
    Regex::new(&format!(r"(?i)^(?:{})(?:[ ]+[A-Za-z/&]+)?[ ]*:", labels)).unwrap()
});

/// Per-line state visible to the rules.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// Trimmed, non-empty line
    pub line: &'a str,
    /// No section has been classified yet
    pub is_first: bool,
    /// A SKILLS header or skills line is in effect
    pub in_skills: bool,
}

/// A classification rule: returns the kind and the text to keep.
pub type Rule = fn(&LineContext<'_>) -> Option<(SectionKind, String)>;

/// The rule chain, in priority order. `PlainText` is the implicit fallback.
pub const RULES: [(&str, Rule); 6] = [
    ("name", name_rule),
    ("contact", contact_rule),
    ("section_header", section_header_rule),
    ("subsection_header", subsection_rule),
    ("skills", skills_rule),
    ("bullet", bullet_rule),
];

/// Line classifier with a small amount of running state.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    scope: SkillsScope,
}

impl Classifier {
    /// Create a classifier with the default skills scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with an explicit skills scope.
    pub fn with_scope(scope: SkillsScope) -> Self {
        Self { scope }
    }

    /// Classify lines in order, dropping blank ones.
    ///
    /// The returned sections carry sequential ordinals.
    pub fn classify<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        let mut in_skills = false;

        for raw in lines {
            let line = raw.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            let ctx = LineContext {
                line,
                is_first: sections.is_empty(),
                in_skills,
            };
            let mut section = classify_line(&ctx);
            section.ordinal = sections.len();

            in_skills = match section.kind {
                SectionKind::SectionHeader => {
                    mentions_skills(&section.raw_text)
                        || (in_skills && self.scope == SkillsScope::Document)
                }
                SectionKind::SkillsLine => in_skills || mentions_skills(&section.raw_text),
                _ => in_skills,
            };

            log::trace!("line {} -> {}", section.ordinal, section.kind);
            sections.push(section);
        }

        log::debug!("Classified {} lines", sections.len());
        sections
    }
}

/// Classify lines with default settings.
pub fn classify<S: AsRef<str>>(lines: &[S]) -> Vec<Section> {
    Classifier::new().classify(lines)
}

/// Run the rule chain on a single line. Never fails.
pub fn classify_line(ctx: &LineContext<'_>) -> Section {
    RULES
        .iter()
        .find_map(|(_, rule)| rule(ctx))
        .map(|(kind, text)| Section::new(kind, text))
        .unwrap_or_else(|| Section::new(SectionKind::PlainText, ctx.line))
}

fn mentions_skills(text: &str) -> bool {
    text.to_uppercase().contains("SKILLS")
}

fn name_rule(ctx: &LineContext<'_>) -> Option<(SectionKind, String)> {
    (ctx.is_first && NAME.is_match(ctx.line)).then(|| (SectionKind::Name, ctx.line.to_string()))
}

fn contact_rule(ctx: &LineContext<'_>) -> Option<(SectionKind, String)> {
    let line = ctx.line;
    let is_contact = line.contains('@') || CONTACT_LABEL.is_match(line) || PHONE.is_match(line);
    is_contact.then(|| (SectionKind::Contact, line.to_string()))
}

fn section_header_rule(ctx: &LineContext<'_>) -> Option<(SectionKind, String)> {
    let line = ctx.line.trim_end_matches(':').trim_end();
    let lower = line.to_lowercase();

    let header = SECTION_HEADERS
        .iter()
        .find(|h| lower == **h || lower.starts_with(&format!("{} ", h)))?;

    // Anything after the canonical name must be further capitalized words,
    // e.g. "Skills Summary" or "EDUCATION AND Training" is rejected.
    let rest = line.get(header.len()..).unwrap_or("");
    let trailing_ok = rest.split_whitespace().all(|word| {
        let mut chars = word.chars();
        chars.next().is_some_and(|c| c.is_ascii_uppercase() || c == '&')
            && chars.all(|c| c.is_ascii_alphabetic())
    });

    trailing_ok.then(|| (SectionKind::SectionHeader, line.to_string()))
}

fn subsection_rule(ctx: &LineContext<'_>) -> Option<(SectionKind, String)> {
    let line = ctx.line;
    let parts: Vec<&str> = if line.contains('|') {
        line.split('|').map(str::trim).collect()
    } else {
        line.split(" - ")
            .flat_map(|p| p.split(" – "))
            .flat_map(|p| p.split(" — "))
            .map(str::trim)
            .collect()
    };

    if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let capitalized = |part: &str| part.chars().next().is_some_and(|c| c.is_uppercase());
    (capitalized(parts[0]) && capitalized(parts[1]))
        .then(|| (SectionKind::SubsectionHeader, line.to_string()))
}

fn skills_rule(ctx: &LineContext<'_>) -> Option<(SectionKind, String)> {
    let line = ctx.line;
    let labelled = SKILL_LABEL.is_match(line);
    let listed = ctx.in_skills && (line.contains(',') || line.contains(';'));
    (labelled || listed).then(|| (SectionKind::SkillsLine, line.to_string()))
}

fn bullet_rule(ctx: &LineContext<'_>) -> Option<(SectionKind, String)> {
    let mut chars = ctx.line.chars();
    let glyph = chars.next()?;
    let next = chars.next()?;
    if !BULLET_GLYPHS.contains(&glyph) || !next.is_whitespace() {
        return None;
    }
    let text = ctx.line[glyph.len_utf8()..].trim_start();
    (!text.is_empty()).then(|| (SectionKind::Bullet, text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SectionKind> {
        let lines: Vec<&str> = text.lines().collect();
        classify(&lines).into_iter().map(|s| s.kind).collect()
    }

    fn ctx(line: &str) -> LineContext<'_> {
        LineContext {
            line,
            is_first: false,
            in_skills: false,
        }
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert!(classify(&empty).is_empty());
        assert!(classify(&["", "   ", "\t"]).is_empty());
    }

    #[test]
    fn test_reference_resume() {
        let text = "JOHN SMITH\nSenior Software Engineer\nEMAIL: john@x.com\nEXPERIENCE\nSoftware Engineer | Acme | 2020-Present\n• Built scalable APIs\n";
        assert_eq!(
            kinds(text),
            vec![
                SectionKind::Name,
                SectionKind::PlainText,
                SectionKind::Contact,
                SectionKind::SectionHeader,
                SectionKind::SubsectionHeader,
                SectionKind::Bullet,
            ]
        );
    }

    #[test]
    fn test_name_only_on_first_line() {
        assert_eq!(
            kinds("Jane Doe\nJane Doe"),
            vec![SectionKind::Name, SectionKind::PlainText]
        );
        // Blank lines before the name do not count.
        assert_eq!(kinds("\n\nJane Doe")[0], SectionKind::Name);
        // Digits disqualify a name.
        assert_eq!(kinds("Agent 47")[0], SectionKind::PlainText);
    }

    #[test]
    fn test_name_rule_precedes_header_rule() {
        assert_eq!(kinds("EXPERIENCE")[0], SectionKind::Name);
        assert_eq!(
            kinds("Jane Doe\nEXPERIENCE")[1],
            SectionKind::SectionHeader
        );
    }

    #[test]
    fn test_contact_rule() {
        assert!(contact_rule(&ctx("jane@example.com")).is_some());
        assert!(contact_rule(&ctx("LinkedIn: linkedin.com/in/jane")).is_some());
        assert!(contact_rule(&ctx("Tel 555 123 4567")).is_some());
        assert!(contact_rule(&ctx("(555) 123-4567")).is_some());
        assert!(contact_rule(&ctx("Telecommunications background")).is_none());
        assert!(contact_rule(&ctx("2019-2021")).is_none());
    }

    #[test]
    fn test_contact_precedes_subsection() {
        let section = classify_line(&ctx("jane@example.com | Portfolio"));
        assert_eq!(section.kind, SectionKind::Contact);
    }

    #[test]
    fn test_section_header_rule() {
        for line in [
            "EXPERIENCE",
            "experience",
            "Work Experience",
            "Skills:",
            "TECHNICAL SKILLS",
            "Projects And Publications",
        ] {
            assert!(section_header_rule(&ctx(line)).is_some(), "{}", line);
        }
        for line in ["Experienced engineer", "Skills in Rust", "Summary of results, 2020"] {
            assert!(section_header_rule(&ctx(line)).is_none(), "{}", line);
        }
        let (_, text) = section_header_rule(&ctx("Education:")).unwrap();
        assert_eq!(text, "Education");
    }

    #[test]
    fn test_subsection_rule() {
        assert!(subsection_rule(&ctx("Software Engineer | Acme | 2020-Present")).is_some());
        assert!(subsection_rule(&ctx("Data Analyst - Globex")).is_some());
        assert!(subsection_rule(&ctx("Full-Stack Developer")).is_none());
        assert!(subsection_rule(&ctx("- Built APIs")).is_none());
        assert!(subsection_rule(&ctx("worked at | Acme")).is_none());
    }

    #[test]
    fn test_skills_rule() {
        assert!(skills_rule(&ctx("Languages: Rust, Go")).is_some());
        assert!(skills_rule(&ctx("Programming Languages: Rust")).is_some());
        assert!(skills_rule(&ctx("Rust, Go, Python")).is_none());

        let in_skills = LineContext {
            line: "Rust, Go, Python",
            is_first: false,
            in_skills: true,
        };
        assert!(skills_rule(&in_skills).is_some());
    }

    #[test]
    fn test_skills_context_from_header() {
        let text = "Jane Doe\nSKILLS\nRust, Go; Python\nEXPERIENCE\nShipped A, B and C";
        let sections = classify(&text.lines().collect::<Vec<_>>());
        assert_eq!(sections[2].kind, SectionKind::SkillsLine);
        // Document scope: the context survives later headers.
        assert_eq!(sections[4].kind, SectionKind::SkillsLine);

        let scoped = Classifier::with_scope(SkillsScope::Section)
            .classify(&text.lines().collect::<Vec<_>>());
        assert_eq!(scoped[2].kind, SectionKind::SkillsLine);
        assert_eq!(scoped[4].kind, SectionKind::PlainText);
    }

    #[test]
    fn test_bullet_rule_strips_glyph() {
        for line in ["• Built system", "- Built system", "* Built system", "·  Built system"] {
            let (kind, text) = bullet_rule(&ctx(line)).unwrap();
            assert_eq!(kind, SectionKind::Bullet);
            assert_eq!(text, "Built system");
        }
        assert!(bullet_rule(&ctx("-Built")).is_none());
        assert!(bullet_rule(&ctx("•")).is_none());
    }

    #[test]
    fn test_fallback_is_plain_text() {
        let section = classify_line(&ctx("Passionate about reliable systems."));
        assert_eq!(section.kind, SectionKind::PlainText);
        assert_eq!(section.raw_text, "Passionate about reliable systems.");
    }

    #[test]
    fn test_ordinals_are_sequential() {
        let sections = classify(&["A", "", "b", "  ", "c"]);
        let ordinals: Vec<usize> = sections.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["name", "contact", "section_header", "subsection_header", "skills", "bullet"]
        );
    }
}
