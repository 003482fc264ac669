//! Style tables for the screen and paginated renderers.

use crate::error::{Error, Result};
use crate::model::SectionKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB colour, (de)serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a colour from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0` for PDF colour operators.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Hex form, e.g. `#1f3a5f`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidOption(format!("Invalid colour: {}", s)));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| Error::InvalidOption(format!("Invalid colour: {}", s)))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Typography for one section kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    /// Font size in points
    pub font_size: f32,

    /// Bold weight
    #[serde(default)]
    pub bold: bool,

    /// Text colour
    pub color: Color,

    /// Extra space above, in points
    #[serde(default)]
    pub space_before: f32,

    /// Extra space below, in points
    #[serde(default)]
    pub space_after: f32,

    /// Alignment
    #[serde(default)]
    pub align: Align,
}

impl StyleRule {
    /// Body text rule at the given size.
    pub const fn body(font_size: f32, color: Color) -> Self {
        Self {
            font_size,
            bold: false,
            color,
            space_before: 0.0,
            space_after: 0.0,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn spaced(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }
}

/// Per-kind style table plus the few layout constants shared by all kinds.
///
/// The paginated and screen renderers run the same code with different
/// sheets; only the values here differ between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub name: StyleRule,
    pub subtitle: StyleRule,
    pub contact: StyleRule,
    pub section_header: StyleRule,
    pub subsection_header: StyleRule,
    pub bullet: StyleRule,
    pub skills_line: StyleRule,
    pub plain_text: StyleRule,

    /// Glyph drawn before bullet items
    pub bullet_glyph: char,

    /// Indent of bullet text, in points
    pub bullet_indent: f32,

    /// Line advance as a multiple of the font size
    pub line_height: f32,

    /// Colour of the rule under section headers
    pub rule_color: Color,

    /// Thickness of the rule under section headers (0 disables it)
    pub rule_thickness: f32,
}

impl StyleSheet {
    /// Styled on-screen preview.
    pub fn screen() -> Self {
        let ink = Color::rgb(0x1a, 0x1a, 0x1a);
        let body = StyleRule::body(11.0, Color::rgb(0x33, 0x33, 0x33));
        Self {
            name: StyleRule::body(24.0, ink).bold().centered().spaced(0.0, 4.0),
            subtitle: StyleRule::body(14.0, Color::rgb(0x4b, 0x55, 0x63))
                .centered()
                .spaced(0.0, 6.0),
            contact: StyleRule::body(10.0, Color::rgb(0x6b, 0x72, 0x80))
                .centered()
                .spaced(0.0, 2.0),
            section_header: StyleRule::body(14.0, Color::rgb(0x25, 0x63, 0xeb))
                .bold()
                .spaced(14.0, 6.0),
            subsection_header: StyleRule::body(12.0, ink).bold().spaced(6.0, 2.0),
            bullet: body.spaced(0.0, 2.0),
            skills_line: body.spaced(0.0, 2.0),
            plain_text: body.spaced(0.0, 4.0),
            bullet_glyph: '•',
            bullet_indent: 16.0,
            line_height: 1.4,
            rule_color: Color::rgb(0x25, 0x63, 0xeb),
            rule_thickness: 1.0,
        }
    }

    /// ATS-safe export: dark, high-contrast text with no colour-only cues.
    pub fn ats() -> Self {
        let ink = Color::BLACK;
        let body = StyleRule::body(10.0, ink);
        Self {
            name: StyleRule::body(18.0, ink).bold().centered().spaced(0.0, 6.0),
            subtitle: StyleRule::body(12.0, Color::rgb(0x33, 0x33, 0x33))
                .centered()
                .spaced(0.0, 4.0),
            contact: StyleRule::body(9.0, Color::rgb(0x55, 0x55, 0x55))
                .centered()
                .spaced(0.0, 2.0),
            section_header: StyleRule::body(12.0, Color::rgb(0x1f, 0x3a, 0x5f))
                .bold()
                .spaced(12.0, 6.0),
            subsection_header: StyleRule::body(11.0, ink).bold().spaced(4.0, 2.0),
            bullet: body.spaced(0.0, 1.0),
            skills_line: body.spaced(0.0, 2.0),
            plain_text: body.spaced(0.0, 3.0),
            bullet_glyph: '•',
            bullet_indent: 14.0,
            line_height: 1.25,
            rule_color: Color::rgb(0x1f, 0x3a, 0x5f),
            rule_thickness: 0.75,
        }
    }

    /// Load a sheet from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let sheet: StyleSheet = serde_json::from_str(json)?;
        sheet.validate()?;
        Ok(sheet)
    }

    /// Rule for a section kind.
    pub fn rule(&self, kind: SectionKind) -> &StyleRule {
        match kind {
            SectionKind::Name => &self.name,
            SectionKind::Contact => &self.contact,
            SectionKind::SectionHeader => &self.section_header,
            SectionKind::SubsectionHeader => &self.subsection_header,
            SectionKind::Bullet => &self.bullet,
            SectionKind::SkillsLine => &self.skills_line,
            SectionKind::PlainText => &self.plain_text,
        }
    }

    /// Mutable rule for a section kind.
    pub fn rule_mut(&mut self, kind: SectionKind) -> &mut StyleRule {
        match kind {
            SectionKind::Name => &mut self.name,
            SectionKind::Contact => &mut self.contact,
            SectionKind::SectionHeader => &mut self.section_header,
            SectionKind::SubsectionHeader => &mut self.subsection_header,
            SectionKind::Bullet => &mut self.bullet,
            SectionKind::SkillsLine => &mut self.skills_line,
            SectionKind::PlainText => &mut self.plain_text,
        }
    }

    /// Check that sizes and spacing are usable for layout.
    pub fn validate(&self) -> Result<()> {
        let rules = SectionKind::ALL
            .iter()
            .map(|k| (k.as_str(), self.rule(*k)))
            .chain(std::iter::once(("subtitle", &self.subtitle)));

        for (label, rule) in rules {
            if !(rule.font_size > 0.0 && rule.font_size.is_finite()) {
                return Err(Error::InvalidOption(format!(
                    "Font size for {} must be positive, got {}",
                    label, rule.font_size
                )));
            }
            if rule.space_before < 0.0 || rule.space_after < 0.0 {
                return Err(Error::InvalidOption(format!(
                    "Spacing for {} must not be negative",
                    label
                )));
            }
        }

        if !(self.line_height >= 1.0 && self.line_height.is_finite()) {
            return Err(Error::InvalidOption(format!(
                "Line height must be at least 1.0, got {}",
                self.line_height
            )));
        }
        if self.bullet_indent < 0.0 || self.rule_thickness < 0.0 {
            return Err(Error::InvalidOption(
                "Bullet indent and rule thickness must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::ats()
    }
}
