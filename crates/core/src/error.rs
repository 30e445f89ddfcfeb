//! Error types for building a slide deck.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering, converting, or writing a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The static slide content is malformed (bad index, empty binding, ...).
    #[error("Static content error: {0}")]
    StaticContent(String),

    /// The deck content document could not be parsed.
    #[error("Deck content error: {0}")]
    ContentError(String),

    /// The conversion boundary failed to turn a slide's HTML into a slide.
    #[error("Conversion error: {message}")]
    ConversionError {
        /// 1-based slide index, when known.
        index: Option<usize>,
        /// Human readable reason.
        message: String,
    },

    /// Failed to serialize the assembled presentation.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// XML writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),
}

impl Error {
    /// Build a conversion error that is not yet tied to a slide index.
    pub fn conversion(message: impl Into<String>) -> Self {
        Error::ConversionError {
            index: None,
            message: message.into(),
        }
    }

    /// Attach a slide index to a conversion error; other variants pass through.
    pub fn at_slide(self, slide_index: usize) -> Self {
        match self {
            Error::ConversionError { message, .. } => Error::ConversionError {
                index: Some(slide_index),
                message,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ContentError(err.to_string())
    }
}
