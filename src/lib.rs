//! # bionify
//!
//! A bionic-reading transformation engine: bold a short, deterministic
//! prefix of each word so the eye can anchor on it, and re-emit the
//! document in its original format.
//!
//! Three input kinds are supported:
//!
//! - **Plain text**, rendered to HTML, Markdown, or marked-up plain text
//! - **PDF**, rewritten in place at the content-stream level
//! - **DOCX**, rewritten in place at the run level
//!
//! Processing never fails outright: documents the transformers cannot
//! handle come back unchanged, with the degradation recorded in the
//! [`ProcessingReport`].
//!
//! ## Quick start
//!
//! ```
//! use bionify::{Bionify, DocumentFormat};
//!
//! let result = Bionify::new()
//!     .with_intensity(55)
//!     .process_bytes(b"Bionic reading at a glance.", DocumentFormat::Text);
//!
//! let html = String::from_utf8(result.output).unwrap();
//! assert!(html.contains("<strong>Bion</strong>ic"));
//! assert!(!result.report.fallback_used);
//! ```
//!
//! Free functions mirror the builder for one-off calls:
//!
//! ```
//! use bionify::{process_tagged, ProcessingConfig};
//!
//! let config = ProcessingConfig::default();
//! let result = process_tagged(b"hello world", "txt", &config).unwrap();
//! assert_eq!(result.mime_type, "text/html");
//! ```

pub mod config;
pub mod detect;
pub mod docx;
pub mod emphasis;
pub mod error;
pub mod pdf;
pub mod process;
pub mod render;
pub mod segment;

pub use config::{
    OutputFormat, ProcessingConfig, ReadingProfile, Strategy, DEFAULT_INTENSITY, MAX_INTENSITY,
    MIN_INTENSITY,
};
pub use detect::{detect_format_from_bytes, is_docx_bytes, is_pdf_bytes, DocumentFormat};
pub use error::{Error, Result};
pub use process::{
    process, process_tagged, ProcessingReport, ProcessingResult, PROCESSOR_VERSION,
};
pub use render::EmphasisStats;
pub use segment::{Segmenter, Token, TokenKind};

/// Builder-style entry point wrapping a [`ProcessingConfig`].
#[derive(Debug, Clone, Default)]
pub struct Bionify {
    config: ProcessingConfig,
}

impl Bionify {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn with_config(config: ProcessingConfig) -> Self {
        Self { config }
    }

    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.config = self.config.with_intensity(intensity);
        self
    }

    pub fn with_profile(mut self, profile: ReadingProfile) -> Self {
        self.config = self.config.with_profile(profile);
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config = self.config.with_output_format(format);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.config = self.config.with_strategy(strategy);
        self
    }

    pub fn with_preserve_formatting(mut self, preserve: bool) -> Self {
        self.config = self.config.with_preserve_formatting(preserve);
        self
    }

    pub fn with_skip_technical(mut self, skip: bool) -> Self {
        self.config = self.config.with_skip_technical(skip);
        self
    }

    pub fn with_plain_marker(mut self, marker: char) -> Self {
        self.config = self.config.with_plain_marker(marker);
        self
    }

    /// The configuration as currently built.
    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Process bytes of a known format. Infallible; degradations surface in
    /// the report.
    pub fn process_bytes(&self, data: &[u8], format: DocumentFormat) -> ProcessingResult {
        process::process(data, format, &self.config)
    }

    /// Process bytes under a caller-declared format tag ("txt", "pdf",
    /// "docx"). Unknown tags are the one hard error.
    pub fn process_tagged(&self, data: &[u8], tag: &str) -> Result<ProcessingResult> {
        process::process_tagged(data, tag, &self.config)
    }

    /// Sniff the format from the bytes, then process.
    pub fn process_detected(&self, data: &[u8]) -> Result<ProcessingResult> {
        let format = detect::detect_format_from_bytes(data)?;
        Ok(self.process_bytes(data, format))
    }
}
