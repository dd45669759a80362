//! Error types for paperseg library.

use std::io;
use thiserror::Error;

/// Result type alias for paperseg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a paper.
///
/// Structural anomalies inside a source document (missing content wrapper,
/// missing body section, figures without images) are not errors; they are
/// recorded as diagnostics on the segmented paper. Only failures that make
/// the whole document unusable surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The PDF could not be loaded or its text could not be extracted.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The PDF is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// The source produced no text lines at all.
    #[error("No text could be extracted from {0}")]
    NoTextExtracted(String),

    /// The input is neither a PDF, a text dump, nor HTML.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A DOI could not be extracted from the given input.
    #[error("Could not extract DOI from: {0}")]
    InvalidDoi(String),

    /// Network failure while fetching a page or an image.
    #[cfg(feature = "fetch")]
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid configuration (keyword file, options).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Pdf(err.to_string()),
        }
    }
}
