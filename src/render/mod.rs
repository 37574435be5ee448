//! Renderers for plain-text input.
//!
//! Each renderer walks the token stream once, applies the emphasis policy
//! to word tokens, and copies separators through verbatim. All renderers
//! report how many words they emphasized and skipped.

mod html;
mod markdown;
mod text;

pub use html::render_html;
pub use markdown::render_markdown;
pub use text::render_plain;

use crate::config::{OutputFormat, ProcessingConfig};

/// Counters accumulated while rendering or transforming a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmphasisStats {
    /// Words that received an emphasized prefix.
    pub words_emphasized: usize,
    /// Word tokens the policy or renderer left untouched.
    pub words_skipped: usize,
}

impl EmphasisStats {
    pub fn record_emphasized(&mut self) {
        self.words_emphasized += 1;
    }

    pub fn record_skipped(&mut self) {
        self.words_skipped += 1;
    }

    pub fn merge(&mut self, other: EmphasisStats) {
        self.words_emphasized += other.words_emphasized;
        self.words_skipped += other.words_skipped;
    }
}

/// Render `input` according to `config.output_format`.
pub fn render_text(input: &str, config: &ProcessingConfig) -> (String, EmphasisStats) {
    match config.output_format {
        OutputFormat::Html => render_html(input, config),
        OutputFormat::Markdown => render_markdown(input, config),
        OutputFormat::PlainText => render_plain(input, config),
    }
}

/// Split a word at `split` characters, returning byte-sliced halves.
pub(crate) fn split_word(word: &str, split: usize) -> (&str, &str) {
    let byte_split = word
        .char_indices()
        .nth(split)
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    word.split_at(byte_split)
}
