//! Rendering options and configuration.

use super::StyleSheet;
use crate::error::{Error, Result};
use crate::model::SectionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page dimensions in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter, 8.5 x 11 in.
    pub const fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
        }
    }

    /// ISO A4, 210 x 297 mm.
    pub const fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
        }
    }

    /// Custom size, validated.
    pub fn custom(width: f32, height: f32) -> Result<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    fn validate(&self) -> Result<()> {
        let ok = |v: f32| v > 0.0 && v.is_finite();
        if !ok(self.width) || !ok(self.height) {
            return Err(Error::InvalidOption(format!(
                "Page size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::letter()
    }
}

impl FromStr for PageSize {
    type Err = Error;

    /// Parse `letter`, `a4`, or `WIDTHxHEIGHT` in points (e.g. `500x700`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "letter" | "us-letter" => Ok(Self::letter()),
            "a4" => Ok(Self::a4()),
            _ => {
                let (w, h) = s.split_once('x').ok_or_else(|| {
                    Error::InvalidOption(format!("Unknown page size: {}", s))
                })?;
                let w: f32 = w
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidOption(format!("Invalid page width: {}", w)))?;
                let h: f32 = h
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidOption(format!("Invalid page height: {}", h)))?;
                Self::custom(w, h)
            }
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Options for the paginated export.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page dimensions
    pub page_size: PageSize,

    /// Uniform page margin in points
    pub margin: f32,

    /// Style table
    pub style: StyleSheet,

    /// Author override for document metadata
    pub author: Option<String>,

    /// Creation timestamp written to metadata (omitted when `None`)
    pub created: Option<DateTime<Utc>>,

    /// Producer string written to metadata
    pub producer: String,

    /// Compress page content streams
    pub compress: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the style sheet.
    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = style;
        self
    }

    /// Set the author written to metadata.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Stamp the output with a creation time.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Set the producer string.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Usable text width between the margins.
    pub fn content_width(&self) -> f32 {
        self.page_size.width - 2.0 * self.margin
    }

    /// Lowest y (top-down) a line may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.page_size.height - self.margin
    }

    /// Check page geometry and the style sheet.
    pub fn validate(&self) -> Result<()> {
        self.page_size.validate()?;
        let shortest = self.page_size.width.min(self.page_size.height);
        if !(self.margin >= 0.0 && self.margin.is_finite()) || 2.0 * self.margin >= shortest {
            return Err(Error::InvalidOption(format!(
                "Margin {} leaves no room on a {} page",
                self.margin, self.page_size
            )));
        }
        self.style.validate()?;

        let usable = self.page_size.height - 2.0 * self.margin;
        let tallest = SectionKind::ALL
            .iter()
            .map(|k| self.style.rule(*k).font_size)
            .fold(self.style.subtitle.font_size, f32::max)
            * self.style.line_height;
        if tallest > usable {
            return Err(Error::InvalidOption(format!(
                "A {:.1}pt line does not fit in the {:.1}pt usable page height",
                tallest, usable
            )));
        }
        Ok(())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::letter(),
            margin: 54.0,
            style: StyleSheet::ats(),
            author: None,
            created: None,
            producer: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            compress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_page_size(PageSize::a4())
            .with_margin(36.0)
            .with_author("Jane Doe");

        assert_eq!(options.page_size, PageSize::a4());
        assert_eq!(options.margin, 36.0);
        assert_eq!(options.author.as_deref(), Some("Jane Doe"));
        assert!(options.created.is_none());
        assert!((options.content_width() - 523.28).abs() < 1e-3);
        options.validate().unwrap();
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!("letter".parse::<PageSize>().unwrap(), PageSize::letter());
        assert_eq!("A4".parse::<PageSize>().unwrap(), PageSize::a4());
        let custom: PageSize = "200x300".parse().unwrap();
        assert_eq!(custom.width, 200.0);
        assert_eq!(custom.height, 300.0);
        assert!("tabloid".parse::<PageSize>().is_err());
        assert!("0x300".parse::<PageSize>().is_err());
        assert!("-5x300".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_margin_validation() {
        let too_wide = RenderOptions::new()
            .with_page_size(PageSize::custom(200.0, 400.0).unwrap())
            .with_margin(100.0);
        assert!(matches!(too_wide.validate(), Err(Error::InvalidOption(_))));

        let negative = RenderOptions::new().with_margin(-1.0);
        assert!(negative.validate().is_err());
    }
}
