//! Rendering: screen preview, paginated PDF export, plain text and JSON.
//!
//! Both the screen and the paginated renderer consume the same
//! [`Document`](crate::Document); they differ only in the [`StyleSheet`] and
//! [`FormatMode`](crate::format::FormatMode) they run with.

mod json;
mod metrics;
mod options;
mod paginate;
mod pdf;
mod result;
mod screen;
mod style;
mod text;

pub use json::{to_json, JsonFormat};
pub use metrics::{measure, wrap};
pub use options::{PageSize, RenderOptions};
pub use paginate::{layout, LayoutPage, LayoutPlan, PlacedLine, PlacedRule, RenderCursor};
pub use pdf::{render_paginated, write_pdf, PdfOutput};
pub use result::RenderStats;
pub use screen::{render_screen, render_screen_with, BlockRole, RenderBlock, RenderTree};
pub use style::{Align, Color, StyleRule, StyleSheet};
pub use text::to_text;
