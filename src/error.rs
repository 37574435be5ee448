//! Error types for the bionify library.

use std::io;
use thiserror::Error;

/// Result type alias for bionify operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
///
/// Only [`Error::UnsupportedFormat`] reaches callers of the top-level
/// processing entry points; structural and partial failures are absorbed
/// by the strategy selector and surface as metadata on a still-successful
/// [`crate::ProcessingResult`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The declared format is not one of the supported tags.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The PDF container could not be parsed.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// The DOCX package or its XML could not be parsed.
    #[error("DOCX parsing error: {0}")]
    DocxParse(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::DocxParse(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::DocxParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("odt".to_string());
        assert_eq!(err.to_string(), "Unsupported document format: odt");

        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
