//! Plain-text renderer.
//!
//! Plain text has no styling channel, so emphasis only exists when the
//! caller supplies a marker character to insert between prefix and suffix.
//! Without a marker the input passes through unchanged and every word
//! counts as skipped; the selector reports that as a degraded method.

use super::{split_word, EmphasisStats};
use crate::config::ProcessingConfig;
use crate::emphasis::compute_split;
use crate::segment::Segmenter;

/// Render `input` as plain text, with optional split markers.
pub fn render_plain(input: &str, config: &ProcessingConfig) -> (String, EmphasisStats) {
    let mut stats = EmphasisStats::default();

    let Some(marker) = config.plain_marker else {
        stats.words_skipped = Segmenter::new(input).filter(|t| t.is_word()).count();
        return (input.to_string(), stats);
    };

    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for token in Segmenter::new(input) {
        if !token.is_word() {
            out.push_str(token.text);
            continue;
        }
        let split = compute_split(token.text, config);
        if split == 0 {
            stats.record_skipped();
            out.push_str(token.text);
        } else {
            stats.record_emphasized();
            let (prefix, suffix) = split_word(token.text, split);
            out.push_str(prefix);
            out.push(marker);
            out.push_str(suffix);
        }
    }
    (out, stats)
}
