//! Run-level rewriting of WordprocessingML part XML.
//!
//! A run (`<w:r>`) whose content is exactly one `<w:t>` gets split into
//! alternating bold/plain sibling runs. Anything else passes through
//! byte-for-byte so the document's structure is never disturbed.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::config::ProcessingConfig;
use crate::emphasis::compute_split;
use crate::error::Result;
use crate::render::{split_word, EmphasisStats};
use crate::segment::Segmenter;

/// Result of rewriting one XML part.
#[derive(Debug)]
pub struct PartOutcome {
    pub xml: Vec<u8>,
    pub stats: EmphasisStats,
    pub fallback_used: bool,
}

/// Rewrite a WordprocessingML part (document body, header, or footer).
pub fn rewrite_part(xml: &[u8], config: &ProcessingConfig) -> Result<PartOutcome> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::new());
    let mut stats = EmphasisStats::default();
    let mut fallback_used = false;

    // Contexts inside which runs are never touched.
    let mut tracked_depth = 0usize;
    let mut table_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => match e.name().as_ref() {
                b"w:ins" | b"w:del" => {
                    tracked_depth += 1;
                    writer.write_event(Event::Start(e))?;
                }
                b"w:tbl" => {
                    table_depth += 1;
                    writer.write_event(Event::Start(e))?;
                }
                b"w:r" => {
                    let events = collect_run(&mut reader, e)?;
                    let skip_context = tracked_depth > 0
                        || (config.preserve_formatting && table_depth > 0);
                    rewrite_run(
                        &events,
                        skip_context,
                        config,
                        &mut writer,
                        &mut stats,
                        &mut fallback_used,
                    )?;
                }
                _ => writer.write_event(Event::Start(e))?,
            },
            Event::End(e) => {
                match e.name().as_ref() {
                    b"w:ins" | b"w:del" => tracked_depth = tracked_depth.saturating_sub(1),
                    b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                    _ => {}
                }
                writer.write_event(Event::End(e))?;
            }
            other => writer.write_event(other)?,
        }
    }

    Ok(PartOutcome {
        xml: writer.into_inner(),
        stats,
        fallback_used,
    })
}

/// Buffer a full run, start tag through matching end tag.
fn collect_run<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: BytesStart<'a>,
) -> Result<Vec<Event<'static>>> {
    let mut events = vec![Event::Start(start).into_owned()];
    let mut depth = 1usize;
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth -= 1,
            Event::Eof => break,
            _ => {}
        }
        events.push(event.into_owned());
        if depth == 0 {
            break;
        }
    }
    Ok(events)
}

/// What the buffered run contains, from the rewriter's point of view.
enum RunShape {
    /// `rPr` start tag + inner property events, the single `<w:t>` text.
    Simple {
        rpr_start: Option<BytesStart<'static>>,
        rpr_inner: Vec<Event<'static>>,
        text: String,
    },
    /// Already bold, tracked change, or empty: copy through, count words.
    Skip,
    /// Field codes, breaks, drawings, stray content: copy through and
    /// flag the degradation.
    Degraded,
}

fn rewrite_run(
    events: &[Event<'static>],
    skip_context: bool,
    config: &ProcessingConfig,
    writer: &mut Writer<Vec<u8>>,
    stats: &mut EmphasisStats,
    fallback_used: &mut bool,
) -> Result<()> {
    let shape = if skip_context {
        RunShape::Skip
    } else {
        classify_run(events)?
    };

    match shape {
        RunShape::Simple { rpr_start, rpr_inner, text } => {
            match chunk_runs(&text, config, stats) {
                Some(chunks) => {
                    let Some(Event::Start(run_start)) = events.first() else {
                        return Ok(());
                    };
                    for (chunk, bold) in chunks {
                        emit_run(writer, run_start, rpr_start.as_ref(), &rpr_inner, &chunk, bold)?;
                    }
                }
                None => write_all(writer, events)?,
            }
        }
        RunShape::Skip => {
            stats.words_skipped += count_words(events);
            write_all(writer, events)?;
        }
        RunShape::Degraded => {
            stats.words_skipped += count_words(events);
            *fallback_used = true;
            write_all(writer, events)?;
        }
    }
    Ok(())
}

/// Inspect the buffered run's direct children.
fn classify_run(events: &[Event<'static>]) -> Result<RunShape> {
    if events.len() < 2 {
        return Ok(RunShape::Skip);
    }
    let mut rpr_start = None;
    let mut rpr_inner = Vec::new();
    let mut text = String::new();
    let mut text_elements = 0usize;
    let mut depth = 0usize;
    let mut in_rpr = false;
    let mut in_text = false;

    // Skip the run's own start and end tags.
    for event in &events[1..events.len().saturating_sub(1)] {
        match event {
            Event::Start(e) => {
                if depth == 0 {
                    match e.name().as_ref() {
                        b"w:rPr" => {
                            in_rpr = true;
                            rpr_start = Some(e.clone());
                        }
                        b"w:t" => {
                            in_text = true;
                            text_elements += 1;
                        }
                        b"w:fldChar" | b"w:instrText" => return Ok(RunShape::Degraded),
                        _ => return Ok(RunShape::Degraded),
                    }
                } else if in_rpr {
                    if depth == 1 && is_bold_property(e) {
                        return Ok(RunShape::Skip);
                    }
                    rpr_inner.push(event.clone());
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    match e.name().as_ref() {
                        b"w:rPr" => rpr_start = Some(e.clone()),
                        b"w:t" => text_elements += 1,
                        b"w:fldChar" => return Ok(RunShape::Degraded),
                        _ => return Ok(RunShape::Degraded),
                    }
                } else if in_rpr {
                    if depth == 1 && is_bold_property(e) {
                        return Ok(RunShape::Skip);
                    }
                    rpr_inner.push(event.clone());
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    match e.name().as_ref() {
                        b"w:rPr" => in_rpr = false,
                        b"w:t" => in_text = false,
                        _ => {}
                    }
                } else if in_rpr {
                    rpr_inner.push(event.clone());
                }
            }
            Event::Text(t) => {
                if in_text {
                    text.push_str(&t.unescape()?);
                } else if in_rpr {
                    rpr_inner.push(event.clone());
                } else if !t.unescape()?.trim().is_empty() {
                    return Ok(RunShape::Degraded);
                }
            }
            _ => {
                if in_rpr {
                    rpr_inner.push(event.clone());
                }
            }
        }
    }

    if text_elements != 1 {
        // No text, or more than one text element: nothing we can split
        // without reordering content.
        return Ok(RunShape::Skip);
    }
    Ok(RunShape::Simple { rpr_start, rpr_inner, text })
}

/// `<w:b/>` (or `w:val` truthy) inside run properties.
fn is_bold_property(e: &BytesStart<'_>) -> bool {
    if e.name().as_ref() != b"w:b" {
        return false;
    }
    match e.try_get_attribute("w:val").ok().flatten() {
        Some(attr) => !matches!(attr.value.as_ref(), b"0" | b"false" | b"none"),
        None => true,
    }
}

/// Chunk text into `(run text, bold)` pieces; suffixes merge with the
/// separators that follow them, so "hello world" becomes four runs.
fn chunk_runs(
    text: &str,
    config: &ProcessingConfig,
    stats: &mut EmphasisStats,
) -> Option<Vec<(String, bool)>> {
    let mut chunks: Vec<(String, bool)> = Vec::new();
    let mut any_bold = false;

    for token in Segmenter::new(text) {
        if !token.is_word() {
            push_str_chunk(&mut chunks, token.text, false);
            continue;
        }
        let split = compute_split(token.text, config);
        if split == 0 {
            stats.record_skipped();
            push_str_chunk(&mut chunks, token.text, false);
        } else {
            stats.record_emphasized();
            any_bold = true;
            let (prefix, suffix) = split_word(token.text, split);
            push_str_chunk(&mut chunks, prefix, true);
            push_str_chunk(&mut chunks, suffix, false);
        }
    }

    if any_bold {
        Some(chunks)
    } else {
        None
    }
}

fn push_str_chunk(chunks: &mut Vec<(String, bool)>, text: &str, bold: bool) {
    if text.is_empty() {
        return;
    }
    if let Some((last, last_bold)) = chunks.last_mut() {
        if *last_bold == bold {
            last.push_str(text);
            return;
        }
    }
    chunks.push((text.to_string(), bold));
}

fn emit_run(
    writer: &mut Writer<Vec<u8>>,
    run_start: &BytesStart<'static>,
    rpr_start: Option<&BytesStart<'static>>,
    rpr_inner: &[Event<'static>],
    text: &str,
    bold: bool,
) -> Result<()> {
    writer.write_event(Event::Start(run_start.clone()))?;

    if bold || !rpr_inner.is_empty() || rpr_start.is_some() {
        let props = rpr_start.cloned().unwrap_or_else(|| BytesStart::new("w:rPr"));
        writer.write_event(Event::Start(props))?;
        if bold {
            writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
            writer.write_event(Event::Empty(BytesStart::new("w:bCs")))?;
        }
        for event in rpr_inner {
            // The bold run already carries its own w:b/w:bCs.
            if bold && is_bold_family(event) {
                continue;
            }
            writer.write_event(event.clone())?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }

    let mut t = BytesStart::new("w:t");
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        t.push_attribute(("xml:space", "preserve"));
    }
    writer.write_event(Event::Start(t))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

fn is_bold_family(event: &Event<'static>) -> bool {
    match event {
        Event::Empty(e) => matches!(e.name().as_ref(), b"w:b" | b"w:bCs"),
        _ => false,
    }
}

fn write_all(writer: &mut Writer<Vec<u8>>, events: &[Event<'static>]) -> Result<()> {
    for event in events {
        writer.write_event(event.clone())?;
    }
    Ok(())
}

/// Count word tokens inside a run's text events, for skip accounting.
fn count_words(events: &[Event<'static>]) -> usize {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Text(t) => t.unescape().ok(),
            _ => None,
        })
        .map(|text| Segmenter::new(&text).filter(|t| t.is_word()).count())
        .sum()
}
