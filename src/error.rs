//! Error types for unhtml library.
//!
//! Conversion itself never fails: any string input produces some text.
//! Errors only arise at the edges, when reading input or loading
//! configuration.

use std::io;
use thiserror::Error;

/// Result type alias for unhtml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around a conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// An option value was not recognized.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Input bytes were not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error while rendering output (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => Error::Io(err.into()),
            _ => Error::Config(err.to_string()),
        }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
