//! PDF transformer: rewrites page content streams so eligible words are
//! shown with a bold prefix, leaving everything else in the file untouched.
//!
//! Only text-showing operators are rewritten. Images, paths, annotations,
//! page geometry, fonts, and metadata pass through because the document is
//! saved whole and only the content stream bytes of touched pages change.

mod fonts;

pub use fonts::{FontInfo, FontTable};

use log::{debug, warn};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};

use crate::config::ProcessingConfig;
use crate::emphasis::compute_split;
use crate::error::Result;
use crate::render::EmphasisStats;
use crate::segment::Segmenter;

/// Stroke width for synthetic bold, as a fraction of the font size.
const SYNTHETIC_STROKE_RATIO: f64 = 0.025;

/// Result of a PDF transformation attempt.
#[derive(Debug)]
pub struct PdfOutcome {
    pub bytes: Vec<u8>,
    pub stats: EmphasisStats,
    pub pages_processed: usize,
    pub fallback_used: bool,
}

/// How a bold prefix is realized for the current font.
enum BoldMode {
    /// Switch to a same-family bold font resource.
    Variant(Vec<u8>),
    /// Fill-and-stroke render mode with a size-proportional stroke width.
    Synthetic,
    /// The current font is already bold; nothing to do.
    AlreadyBold,
    /// No safe realization; leave the text as-is.
    None,
}

/// Transform `data` in place. Unreadable or encrypted documents, and
/// documents with no decodable text, come back byte-identical with
/// `fallback_used` set rather than as errors.
pub fn transform_pdf(data: &[u8], config: &ProcessingConfig) -> Result<PdfOutcome> {
    let mut doc = match Document::load_mem(data) {
        Ok(doc) => doc,
        Err(err) => {
            warn!("PDF load failed, passing input through: {err}");
            return Ok(passthrough(data));
        }
    };
    if doc.is_encrypted() {
        warn!("PDF is encrypted, passing input through");
        return Ok(passthrough(data));
    }

    let pages = doc.get_pages();
    debug!("transforming PDF with {} pages", pages.len());

    let mut stats = EmphasisStats::default();
    let mut fallback_used = false;
    let mut pages_processed = 0;
    let mut any_change = false;

    let page_ids: Vec<_> = pages.values().copied().collect();
    for page_id in page_ids {
        let table = match FontTable::for_page(&doc, page_id) {
            Ok(table) => table,
            Err(err) => {
                debug!("page {page_id:?}: font table unavailable ({err}), skipped");
                fallback_used = true;
                continue;
            }
        };
        let content_bytes = match doc.get_page_content(page_id) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("page {page_id:?}: content unavailable ({err}), skipped");
                fallback_used = true;
                continue;
            }
        };
        let content = match Content::decode(&content_bytes) {
            Ok(content) => content,
            Err(err) => {
                debug!("page {page_id:?}: content decode failed ({err}), skipped");
                fallback_used = true;
                continue;
            }
        };

        let mut rewriter = PageRewriter::new(&table, config, &mut stats);
        let operations = rewriter.rewrite(content.operations);
        let changed = rewriter.changed;
        fallback_used |= rewriter.fallback;
        pages_processed += 1;

        if changed {
            let encoded = Content { operations }.encode()?;
            doc.change_page_content(page_id, encoded)?;
            any_change = true;
        }
    }

    if !any_change {
        // Nothing was rewritten. A document with no text at all is a
        // fallback; one where every word was skipped by policy is not.
        debug!("no rewritable text found, passing input through");
        let no_text = stats.words_emphasized == 0 && stats.words_skipped == 0;
        return Ok(PdfOutcome {
            bytes: data.to_vec(),
            stats,
            pages_processed,
            fallback_used: fallback_used || no_text,
        });
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(PdfOutcome {
        bytes,
        stats,
        pages_processed,
        fallback_used,
    })
}

fn passthrough(data: &[u8]) -> PdfOutcome {
    PdfOutcome {
        bytes: data.to_vec(),
        stats: EmphasisStats::default(),
        pages_processed: 0,
        fallback_used: true,
    }
}

/// Walks one page's operations, tracking the pieces of graphics state the
/// rewrite depends on.
struct PageRewriter<'a> {
    table: &'a FontTable,
    config: &'a ProcessingConfig,
    stats: &'a mut EmphasisStats,
    /// Operands of the last `Tf`, kept as objects so they re-emit exactly.
    font_operands: Option<(Vec<u8>, Object)>,
    font_size: f64,
    /// Last `w` operand, restored after synthetic-bold strokes.
    line_width: f64,
    out: Vec<Operation>,
    changed: bool,
    fallback: bool,
}

impl<'a> PageRewriter<'a> {
    fn new(table: &'a FontTable, config: &'a ProcessingConfig, stats: &'a mut EmphasisStats) -> Self {
        Self {
            table,
            config,
            stats,
            font_operands: None,
            font_size: 12.0,
            line_width: 1.0,
            out: Vec::new(),
            changed: false,
            fallback: false,
        }
    }

    fn rewrite(&mut self, operations: Vec<Operation>) -> Vec<Operation> {
        for op in operations {
            match op.operator.as_str() {
                "Tf" => {
                    if let (Some(Object::Name(name)), Some(size)) =
                        (op.operands.first(), op.operands.get(1))
                    {
                        self.font_operands = Some((name.clone(), size.clone()));
                        if let Some(size) = as_number(size) {
                            self.font_size = size;
                        }
                    }
                    self.out.push(op);
                }
                "w" => {
                    if let Some(width) = op.operands.first().and_then(as_number) {
                        self.line_width = width;
                    }
                    self.out.push(op);
                }
                "Tj" => self.rewrite_tj(op),
                "TJ" => self.rewrite_tj_array(op),
                "'" => {
                    // Lower to T* + Tj so the string path is shared.
                    self.out.push(Operation::new("T*", vec![]));
                    self.rewrite_tj(Operation::new("Tj", op.operands));
                }
                "\"" => {
                    let mut operands = op.operands;
                    if operands.len() == 3 {
                        let string = operands.pop().unwrap_or(Object::Null);
                        let char_spacing = operands.pop().unwrap_or(Object::Null);
                        let word_spacing = operands.pop().unwrap_or(Object::Null);
                        self.out.push(Operation::new("Tw", vec![word_spacing]));
                        self.out.push(Operation::new("Tc", vec![char_spacing]));
                        self.out.push(Operation::new("T*", vec![]));
                        self.rewrite_tj(Operation::new("Tj", vec![string]));
                    } else {
                        self.out.push(Operation::new("\"", operands));
                    }
                }
                _ => self.out.push(op),
            }
        }
        std::mem::take(&mut self.out)
    }

    /// Decide how a bold prefix can be realized under the current font.
    fn bold_mode(&mut self) -> BoldMode {
        let Some((resource, _)) = &self.font_operands else {
            self.fallback = true;
            return BoldMode::None;
        };
        let Some(font) = self.table.get(resource) else {
            self.fallback = true;
            return BoldMode::None;
        };
        if !font.simple {
            // Multibyte encodings: byte offsets are not char offsets, so
            // splitting the string could corrupt it.
            self.fallback = true;
            return BoldMode::None;
        }
        if font.is_bold {
            return BoldMode::AlreadyBold;
        }
        if let Some(bold) = self.table.bold_variant(resource) {
            return BoldMode::Variant(bold.resource.clone());
        }
        if self.config.preserve_formatting {
            self.fallback = true;
            return BoldMode::None;
        }
        BoldMode::Synthetic
    }

    fn rewrite_tj(&mut self, op: Operation) {
        let Some(Object::String(bytes, format)) = op.operands.first() else {
            self.out.push(op);
            return;
        };
        let mode = self.bold_mode();
        let chunks = match mode {
            BoldMode::None | BoldMode::AlreadyBold => {
                count_passthrough_words(bytes, self.stats);
                None
            }
            _ => chunk_text(bytes, self.config, self.stats),
        };
        let Some(chunks) = chunks else {
            self.out.push(op.clone());
            return;
        };

        let format = *format;
        let mut bold_state = false;
        for (chunk, bold) in chunks {
            if bold != bold_state {
                self.emit_switch(&mode, bold);
                bold_state = bold;
            }
            self.out
                .push(Operation::new("Tj", vec![Object::String(chunk, format)]));
        }
        if bold_state {
            self.emit_switch(&mode, false);
        }
        self.changed = true;
    }

    fn rewrite_tj_array(&mut self, op: Operation) {
        let Some(Object::Array(elements)) = op.operands.first() else {
            self.out.push(op);
            return;
        };
        let mode = self.bold_mode();
        if matches!(mode, BoldMode::None | BoldMode::AlreadyBold) {
            for element in elements {
                if let Object::String(bytes, _) = element {
                    count_passthrough_words(bytes, self.stats);
                }
            }
            self.out.push(op.clone());
            return;
        }

        // Regroup the array: runs of elements in the same bold state become
        // one TJ each, with kerning numbers kept next to their strings.
        let mut groups: Vec<(Vec<Object>, bool)> = Vec::new();
        let mut current: Vec<Object> = Vec::new();
        let mut bold_state = false;
        let mut any_split = false;

        for element in elements {
            match element {
                Object::String(bytes, format) => {
                    let Some(chunks) = chunk_text(bytes, self.config, self.stats) else {
                        // A whole unsplit string always renders plain, even
                        // when the previous element left the group bold.
                        if bold_state {
                            if !current.is_empty() {
                                groups.push((std::mem::take(&mut current), bold_state));
                            }
                            bold_state = false;
                        }
                        current.push(element.clone());
                        continue;
                    };
                    any_split = true;
                    for (chunk, bold) in chunks {
                        if bold != bold_state {
                            if !current.is_empty() {
                                groups.push((std::mem::take(&mut current), bold_state));
                            }
                            bold_state = bold;
                        }
                        current.push(Object::String(chunk, *format));
                    }
                }
                other => current.push(other.clone()),
            }
        }
        if !current.is_empty() {
            groups.push((current, bold_state));
        }

        if !any_split {
            self.out.push(op.clone());
            return;
        }

        let mut emitted_bold = false;
        for (group, bold) in groups {
            if bold != emitted_bold {
                self.emit_switch(&mode, bold);
                emitted_bold = bold;
            }
            self.out
                .push(Operation::new("TJ", vec![Object::Array(group)]));
        }
        if emitted_bold {
            self.emit_switch(&mode, false);
        }
        self.changed = true;
    }

    /// Emit the operations that enter or leave bold rendering.
    fn emit_switch(&mut self, mode: &BoldMode, bold: bool) {
        match mode {
            BoldMode::Variant(bold_resource) => {
                let Some((orig, size)) = &self.font_operands else {
                    return;
                };
                let name = if bold { bold_resource.clone() } else { orig.clone() };
                self.out.push(Operation::new(
                    "Tf",
                    vec![Object::Name(name), size.clone()],
                ));
            }
            BoldMode::Synthetic => {
                if bold {
                    self.out
                        .push(Operation::new("Tr", vec![Object::Integer(2)]));
                    self.out.push(Operation::new(
                        "w",
                        vec![(self.font_size * SYNTHETIC_STROKE_RATIO).into()],
                    ));
                } else {
                    self.out
                        .push(Operation::new("Tr", vec![Object::Integer(0)]));
                    self.out
                        .push(Operation::new("w", vec![self.line_width.into()]));
                }
            }
            BoldMode::AlreadyBold | BoldMode::None => {}
        }
    }
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Split a simple-encoded shown string into `(bytes, bold)` chunks.
///
/// Bytes are interpreted as Latin-1 for word boundaries, which matches the
/// common WinAnsi/MacRoman cases for letter classification and keeps the
/// byte-per-char mapping exact. Returns `None` when no word in the string
/// qualifies for emphasis, so the caller keeps the original operation.
fn chunk_text(
    bytes: &[u8],
    config: &ProcessingConfig,
    stats: &mut EmphasisStats,
) -> Option<Vec<(Vec<u8>, bool)>> {
    let text: String = bytes.iter().map(|&b| b as char).collect();
    let mut chunks: Vec<(Vec<u8>, bool)> = Vec::new();
    let mut pos = 0usize;
    let mut any_bold = false;

    for token in Segmenter::new(&text) {
        let char_len = token.text.chars().count();
        let split = if token.is_word() {
            compute_split(token.text, config)
        } else {
            0
        };
        if token.is_word() {
            if split == 0 {
                stats.record_skipped();
            } else {
                stats.record_emphasized();
            }
        }
        if split > 0 {
            any_bold = true;
            push_chunk(&mut chunks, &bytes[pos..pos + split], true);
            push_chunk(&mut chunks, &bytes[pos + split..pos + char_len], false);
        } else {
            push_chunk(&mut chunks, &bytes[pos..pos + char_len], false);
        }
        pos += char_len;
    }

    if any_bold {
        Some(chunks)
    } else {
        None
    }
}

/// Count the word tokens of a string shown without modification, so the
/// report reflects what was passed over.
fn count_passthrough_words(bytes: &[u8], stats: &mut EmphasisStats) {
    let text: String = bytes.iter().map(|&b| b as char).collect();
    for token in Segmenter::new(&text) {
        if token.is_word() {
            stats.record_skipped();
        }
    }
}

fn push_chunk(chunks: &mut Vec<(Vec<u8>, bool)>, bytes: &[u8], bold: bool) {
    if bytes.is_empty() {
        return;
    }
    if let Some((last, last_bold)) = chunks.last_mut() {
        if *last_bold == bold {
            last.extend_from_slice(bytes);
            return;
        }
    }
    chunks.push((bytes.to_vec(), bold));
}
