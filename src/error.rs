//! Error types for qrsmith operations

use crate::color::ColorParseError;
use thiserror::Error;

/// Result type alias using qrsmith's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrsmith operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or contradictory command-line argument
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Reading the input text failed
    #[error("Input error: {0}")]
    Input(String),

    /// The QR encoder rejected the text/version/mask combination
    #[error("Failed to encode QR code: {0}")]
    Encoding(String),

    /// Malformed hex color string
    #[error("Invalid color: {0}")]
    ColorParse(#[from] ColorParseError),

    /// Preview backend resource creation failed
    #[error("Render error: {0}")]
    Render(String),

    /// Image rescaling failed
    #[error("Scale error: {0}")]
    Scale(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Io(std::io::Error::other(e.to_string()))
    }
}
