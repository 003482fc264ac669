//! Error types for resumark.

use std::io;
use thiserror::Error;

use crate::model::DocumentType;

/// Result type alias for resumark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while structuring or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The input contained nothing to render.
    ///
    /// This is not a failure: callers should treat it as "nothing to do".
    #[error("Input is empty: nothing to render")]
    EmptyInput,

    /// A document invariant was violated while building the model.
    #[error("Malformed document at section {ordinal}: {reason}")]
    MalformedDocument {
        /// Ordinal of the offending section
        ordinal: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Layout or serialization failed during paginated export.
    #[error("Failed to render {doc_type}: {cause}")]
    RenderFailure {
        /// Type of document being exported
        doc_type: DocumentType,
        /// Underlying cause
        cause: String,
    },

    /// I/O error when reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON or style-sheet (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An option value is out of range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a render failure for the given document type.
    pub fn render(doc_type: DocumentType, cause: impl Into<String>) -> Self {
        Error::RenderFailure {
            doc_type,
            cause: cause.into(),
        }
    }

    /// Re-key a render failure to a specific document type.
    ///
    /// Other variants are returned unchanged.
    pub fn with_doc_type(self, doc_type: DocumentType) -> Self {
        match self {
            Error::RenderFailure { cause, .. } => Error::RenderFailure { doc_type, cause },
            other => other,
        }
    }

    /// Whether this error only signals that there was nothing to render.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Error::EmptyInput)
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::render(DocumentType::default(), err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
