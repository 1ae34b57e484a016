//! Error types for solstice-core

use thiserror::Error;

/// Main error type for the solstice-core library.
///
/// The pipeline distinguishes exactly two failure classes: a hard parse
/// failure ([`Error::Json`]) when the input text is not valid JSON, and
/// ambient errors from configuration or IO. Everything else - an
/// unrecognized export shape, an empty summer window, missing topics -
/// degrades to well-defined empty values and is never an error.
#[derive(Error, Debug)]
pub enum Error {
    /// The export text is not syntactically valid JSON
    #[error("export is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for solstice-core
pub type Result<T> = std::result::Result<T, Error>;
