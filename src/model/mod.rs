//! Document model types.
//!
//! This module defines the intermediate representation that bridges line
//! classification and rendering. Both the screen renderer and the paginated
//! renderer consume a [`Document`] without re-parsing raw text.

mod document;
mod section;

pub use document::{is_job_title, Document, DocumentType, Metadata};
pub(crate) use document::title_case;
pub use section::{Section, SectionKind};
