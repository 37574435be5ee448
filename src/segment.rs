//! Tokenization of text into words and separators.
//!
//! The segmenter is a lazy iterator over borrowed slices of the input.
//! Concatenating the token texts in order reproduces the input exactly,
//! which is what lets every renderer and transformer rebuild the document
//! without owning intermediate strings.

/// Classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of alphabetic characters, possibly with one internal
    /// apostrophe or hyphen.
    Word,
    /// Whitespace, punctuation, digits, anything that is not a word.
    Separator,
}

/// A borrowed slice of the input with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Segmentation options.
#[derive(Debug, Clone, Copy)]
pub struct SegmentOptions {
    /// Treat one internal `'`, `’`, or `-` with letters on both sides as
    /// part of the word ("don't", "well-known").
    pub connectors: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self { connectors: true }
    }
}

/// Lazy tokenizer over `&str` input.
pub struct Segmenter<'a> {
    input: &'a str,
    pos: usize,
    options: SegmentOptions,
}

impl<'a> Segmenter<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, SegmentOptions::default())
    }

    pub fn with_options(input: &'a str, options: SegmentOptions) -> Self {
        Self { input, pos: 0, options }
    }

    /// Scan a word starting at `self.pos`. Returns the end byte offset.
    fn scan_word(&self) -> usize {
        let rest = &self.input[self.pos..];
        let mut end = 0;
        let mut connector_used = false;
        let mut chars = rest.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c.is_alphabetic() {
                end = i + c.len_utf8();
            } else if self.options.connectors
                && !connector_used
                && end > 0
                && is_connector(c)
                && chars.peek().is_some_and(|&(_, next)| next.is_alphabetic())
            {
                connector_used = true;
                end = i + c.len_utf8();
            } else {
                break;
            }
        }
        self.pos + end
    }

    /// Scan a separator starting at `self.pos`. Separators stop before
    /// letters and never extend past a newline, so a token cannot mix a
    /// line break with other content.
    fn scan_separator(&self) -> usize {
        let rest = &self.input[self.pos..];
        let mut end = 0;
        for (i, c) in rest.char_indices() {
            if c.is_alphabetic() {
                break;
            }
            if c == '\n' {
                // A newline is its own single-char separator token.
                if end == 0 {
                    end = c.len_utf8();
                }
                break;
            }
            end = i + c.len_utf8();
        }
        self.pos + end
    }
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.input[self.pos..];
        let first = rest.chars().next()?;

        let (end, kind) = if first.is_alphabetic() {
            (self.scan_word(), TokenKind::Word)
        } else {
            (self.scan_separator(), TokenKind::Separator)
        };

        let token = Token {
            text: &self.input[self.pos..end],
            kind,
        };
        self.pos = end;
        Some(token)
    }
}

fn is_connector(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '-')
}

/// Convenience wrapper collecting all tokens.
pub fn segment(input: &str) -> Vec<Token<'_>> {
    Segmenter::new(input).collect()
}
