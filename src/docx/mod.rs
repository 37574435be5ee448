//! DOCX transformer: rewrites the text-bearing XML parts of an OOXML
//! package and raw-copies everything else bit-for-bit.

mod runs;

pub use runs::{rewrite_part, PartOutcome};

use std::io::{Cursor, Read, Write};

use log::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::render::EmphasisStats;

const DOCUMENT_PART: &str = "word/document.xml";

/// Result of a DOCX transformation attempt.
#[derive(Debug)]
pub struct DocxOutcome {
    pub bytes: Vec<u8>,
    pub stats: EmphasisStats,
    pub parts_rewritten: usize,
    pub fallback_used: bool,
}

/// Transform `data`. A package that does not open as ZIP or has no
/// `word/document.xml` comes back byte-identical with `fallback_used` set.
pub fn transform_docx(data: &[u8], config: &ProcessingConfig) -> Result<DocxOutcome> {
    let mut archive = match ZipArchive::new(Cursor::new(data)) {
        Ok(archive) => archive,
        Err(err) => {
            warn!("DOCX does not open as ZIP, passing input through: {err}");
            return Ok(passthrough(data));
        }
    };
    if archive.by_name(DOCUMENT_PART).is_err() {
        warn!("DOCX lacks {DOCUMENT_PART}, passing input through");
        return Ok(passthrough(data));
    }

    let mut stats = EmphasisStats::default();
    let mut fallback_used = false;
    let mut parts_rewritten = 0;

    let mut buffer = Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(&mut buffer);

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let name = file.name().to_string();

        if !is_rewritable_part(&name, config) {
            writer.raw_copy_file(file)?;
            continue;
        }

        let mut xml = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut xml)?;
        drop(file);

        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        writer.start_file(&name, options)?;

        match rewrite_part(&xml, config) {
            Ok(outcome) => {
                debug!(
                    "{name}: {} emphasized, {} skipped",
                    outcome.stats.words_emphasized, outcome.stats.words_skipped
                );
                stats.merge(outcome.stats);
                fallback_used |= outcome.fallback_used;
                parts_rewritten += 1;
                writer.write_all(&outcome.xml)?;
            }
            Err(err) => {
                // Keep the part intact rather than fail the document.
                warn!("{name}: rewrite failed ({err}), part kept verbatim");
                fallback_used = true;
                writer.write_all(&xml)?;
            }
        }
    }

    writer.finish()?;

    Ok(DocxOutcome {
        bytes: buffer.into_inner(),
        stats,
        parts_rewritten,
        fallback_used,
    })
}

/// Body text is always eligible; headers and footers only when formatting
/// preservation is off.
fn is_rewritable_part(name: &str, config: &ProcessingConfig) -> bool {
    if name == DOCUMENT_PART {
        return true;
    }
    if config.preserve_formatting {
        return false;
    }
    name.ends_with(".xml")
        && (name.starts_with("word/header") || name.starts_with("word/footer"))
}

fn passthrough(data: &[u8]) -> DocxOutcome {
    DocxOutcome {
        bytes: data.to_vec(),
        stats: EmphasisStats::default(),
        parts_rewritten: 0,
        fallback_used: true,
    }
}
