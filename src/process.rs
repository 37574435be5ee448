//! Format dispatch and the retry/fallback policy around the transformers.

use std::time::Instant;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{OutputFormat, ProcessingConfig, Strategy};
use crate::detect::DocumentFormat;
use crate::docx::transform_docx;
use crate::error::Result;
use crate::pdf::transform_pdf;
use crate::render::{render_text, EmphasisStats};

/// Version string stamped into every report.
pub const PROCESSOR_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const MIME_HTML: &str = "text/html";
pub const MIME_MARKDOWN: &str = "text/markdown";
pub const MIME_PLAIN: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The transformed document and its accounting.
#[derive(Debug)]
pub struct ProcessingResult {
    pub output: Vec<u8>,
    pub mime_type: String,
    pub report: ProcessingReport,
}

/// What happened during processing, serializable for callers and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub method_used: String,
    pub fallback_used: bool,
    pub processor_version: String,
    pub processing_time_seconds: f64,
    pub words_emphasized: usize,
    pub words_skipped: usize,
    pub pages_processed: usize,
}

struct Attempt {
    output: Vec<u8>,
    mime_type: &'static str,
    method_used: &'static str,
    stats: EmphasisStats,
    pages_processed: usize,
    fallback_used: bool,
}

/// Process `data` as `format`. Never fails: a transformer error triggers one
/// retry with the most conservative settings, and a second fault returns the
/// input unchanged with the fallback recorded in the report.
pub fn process(data: &[u8], format: DocumentFormat, config: &ProcessingConfig) -> ProcessingResult {
    let start = Instant::now();

    let attempt = match run_once(data, format, config) {
        Ok(attempt) => attempt,
        Err(err) => {
            warn!("{format} processing failed ({err}), retrying conservatively");
            let downgraded = config
                .clone()
                .with_strategy(Strategy::Conservative)
                .with_preserve_formatting(true);
            match run_once(data, format, &downgraded) {
                Ok(mut attempt) => {
                    attempt.fallback_used = true;
                    attempt
                }
                Err(err) => {
                    warn!("{format} retry failed ({err}), returning input unchanged");
                    Attempt {
                        output: data.to_vec(),
                        mime_type: mime_for_input(format, config),
                        method_used: "fallback",
                        stats: EmphasisStats::default(),
                        pages_processed: 0,
                        fallback_used: true,
                    }
                }
            }
        }
    };

    let report = ProcessingReport {
        method_used: attempt.method_used.to_string(),
        fallback_used: attempt.fallback_used,
        processor_version: PROCESSOR_VERSION.to_string(),
        processing_time_seconds: start.elapsed().as_secs_f64(),
        words_emphasized: attempt.stats.words_emphasized,
        words_skipped: attempt.stats.words_skipped,
        pages_processed: attempt.pages_processed,
    };
    info!(
        "processed as {}: {} words emphasized, {} skipped",
        report.method_used, report.words_emphasized, report.words_skipped
    );

    ProcessingResult {
        output: attempt.output,
        mime_type: attempt.mime_type.to_string(),
        report,
    }
}

/// Like [`process`], but the format comes as a tag string. An unknown tag is
/// the one hard error this entry point has.
pub fn process_tagged(data: &[u8], tag: &str, config: &ProcessingConfig) -> Result<ProcessingResult> {
    let format = DocumentFormat::from_tag(tag)?;
    Ok(process(data, format, config))
}

fn run_once(data: &[u8], format: DocumentFormat, config: &ProcessingConfig) -> Result<Attempt> {
    match format {
        DocumentFormat::Text => Ok(run_text(data, config)),
        DocumentFormat::Pdf => {
            let outcome = transform_pdf(data, config)?;
            Ok(Attempt {
                output: outcome.bytes,
                mime_type: MIME_PDF,
                method_used: "pdf_content_rewrite",
                stats: outcome.stats,
                pages_processed: outcome.pages_processed,
                fallback_used: outcome.fallback_used,
            })
        }
        DocumentFormat::Docx => {
            let outcome = transform_docx(data, config)?;
            Ok(Attempt {
                output: outcome.bytes,
                mime_type: MIME_DOCX,
                method_used: "docx_run_split",
                stats: outcome.stats,
                pages_processed: outcome.parts_rewritten,
                fallback_used: outcome.fallback_used,
            })
        }
    }
}

fn run_text(data: &[u8], config: &ProcessingConfig) -> Attempt {
    let text = String::from_utf8_lossy(data);
    let lossy = matches!(&text, std::borrow::Cow::Owned(_));

    let (output, stats) = render_text(&text, config);
    let (mime_type, method_used) = match config.output_format {
        OutputFormat::Html => (MIME_HTML, "text_html"),
        OutputFormat::Markdown => (MIME_MARKDOWN, "text_markdown"),
        OutputFormat::PlainText if config.plain_marker.is_some() => (MIME_PLAIN, "text_plain"),
        OutputFormat::PlainText => (MIME_PLAIN, "text_plain_passthrough"),
    };

    Attempt {
        output: output.into_bytes(),
        mime_type,
        method_used,
        stats,
        pages_processed: 0,
        fallback_used: lossy || method_used == "text_plain_passthrough",
    }
}

fn mime_for_input(format: DocumentFormat, config: &ProcessingConfig) -> &'static str {
    match format {
        DocumentFormat::Text => match config.output_format {
            OutputFormat::Html => MIME_HTML,
            OutputFormat::Markdown => MIME_MARKDOWN,
            OutputFormat::PlainText => MIME_PLAIN,
        },
        DocumentFormat::Pdf => MIME_PDF,
        DocumentFormat::Docx => MIME_DOCX,
    }
}
