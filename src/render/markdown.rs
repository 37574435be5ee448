//! Markdown renderer: `**bold**` prefixes with a marker-balance guard.

use super::{split_word, EmphasisStats};
use crate::config::ProcessingConfig;
use crate::emphasis::compute_split;
use crate::segment::{segment, Token};

/// Render `input` as Markdown with emphasized word prefixes.
///
/// A word directly touched by `*` or `_` in the surrounding text is emitted
/// unmodified, since inserting `**` there could unbalance markers the input
/// already carries.
pub fn render_markdown(input: &str, config: &ProcessingConfig) -> (String, EmphasisStats) {
    let mut out = String::with_capacity(input.len() * 2);
    let mut stats = EmphasisStats::default();
    let tokens = segment(input);

    for (i, token) in tokens.iter().enumerate() {
        if !token.is_word() {
            out.push_str(token.text);
            continue;
        }
        let split = compute_split(token.text, config);
        if split == 0 || touches_marker(&tokens, i) {
            stats.record_skipped();
            out.push_str(token.text);
        } else {
            stats.record_emphasized();
            let (prefix, suffix) = split_word(token.text, split);
            out.push_str("**");
            out.push_str(prefix);
            out.push_str("**");
            out.push_str(suffix);
        }
    }

    (out, stats)
}

fn touches_marker(tokens: &[Token<'_>], i: usize) -> bool {
    let before = i
        .checked_sub(1)
        .and_then(|j| tokens[j].text.chars().last())
        .is_some_and(is_marker);
    let after = tokens
        .get(i + 1)
        .and_then(|t| t.text.chars().next())
        .is_some_and(is_marker);
    before || after
}

fn is_marker(c: char) -> bool {
    c == '*' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_markers() {
        let (out, stats) = render_markdown("reading fast", &ProcessingConfig::default());
        assert_eq!(out, "**rea**ding **fa**st");
        assert_eq!(stats.words_emphasized, 2);
    }

    #[test]
    fn test_existing_markers_left_alone() {
        // "already" touches the input's own asterisks on both sides.
        let (out, stats) = render_markdown("*already* bold", &ProcessingConfig::default());
        assert_eq!(out, "*already* **bo**ld");
        assert_eq!(stats.words_skipped, 1);
        assert_eq!(stats.words_emphasized, 1);
    }

    #[test]
    fn test_underscore_guard() {
        let (out, _) = render_markdown("_em_ text", &ProcessingConfig::default());
        assert!(out.starts_with("_em_ "));
    }

    #[test]
    fn test_separators_verbatim() {
        let (out, _) = render_markdown("one, two.", &ProcessingConfig::default());
        assert!(out.ends_with("**tw**o."));
        assert!(out.contains(", "));
    }
}
