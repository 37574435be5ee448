//! Document format detection and validation.

use crate::error::{Error, Result};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Plain text (`.txt`).
    Text,
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word-processing document.
    Docx,
}

impl DocumentFormat {
    /// Resolve a declared format tag (`"txt"`, `"pdf"`, `"docx"`).
    ///
    /// The tag is matched case-insensitively, with or without a leading dot.
    /// An unknown tag is the only hard error in the processing pipeline.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(DocumentFormat::Text),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" | "doc" => Ok(DocumentFormat::Docx),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// The canonical tag for this format.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// ZIP local-file-header magic, shared by all OOXML packages.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect the document format from raw bytes.
///
/// PDF is recognized by its `%PDF-` header, DOCX by the ZIP magic plus a
/// `word/document.xml` entry, and anything that decodes as UTF-8 is treated
/// as plain text. Callers that already know the format should prefer the
/// declared tag; detection exists for the CLI and for sniffing helpers.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocumentFormat> {
    if data.starts_with(PDF_MAGIC) {
        return Ok(DocumentFormat::Pdf);
    }
    if data.starts_with(ZIP_MAGIC) {
        if is_docx_bytes(data) {
            return Ok(DocumentFormat::Docx);
        }
        return Err(Error::UnsupportedFormat("zip".to_string()));
    }
    if std::str::from_utf8(data).is_ok() {
        return Ok(DocumentFormat::Text);
    }
    Err(Error::UnsupportedFormat("unknown".to_string()))
}

/// Check if bytes look like a text-based PDF container.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Check if bytes are a DOCX package (ZIP with a `word/document.xml` entry).
pub fn is_docx_bytes(data: &[u8]) -> bool {
    if !data.starts_with(ZIP_MAGIC) {
        return false;
    }
    let cursor = std::io::Cursor::new(data);
    match zip::ZipArchive::new(cursor) {
        Ok(mut archive) => archive.by_name("word/document.xml").is_ok(),
        Err(_) => false,
    }
}
