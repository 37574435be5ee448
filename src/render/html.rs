//! HTML renderer: `<strong>` prefixes inside a minimal standalone page.

use super::{split_word, EmphasisStats};
use crate::config::ProcessingConfig;
use crate::emphasis::compute_split;
use crate::segment::Segmenter;

const PAGE_HEAD: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>Bionic Reading</title>\n\
<style>\n\
body { font-family: Georgia, 'Times New Roman', serif; line-height: 1.7;\n\
       max-width: 42em; margin: 2em auto; padding: 0 1em; color: #222; }\n\
.bionic { white-space: pre-wrap; }\n\
.bionic strong { font-weight: 700; }\n\
</style>\n</head>\n<body>\n<div class=\"bionic\">";

const PAGE_FOOT: &str = "</div>\n</body>\n</html>\n";

/// Render `input` as a standalone HTML page with emphasized word prefixes.
pub fn render_html(input: &str, config: &ProcessingConfig) -> (String, EmphasisStats) {
    let mut out = String::with_capacity(input.len() * 2 + PAGE_HEAD.len() + PAGE_FOOT.len());
    let mut stats = EmphasisStats::default();
    out.push_str(PAGE_HEAD);

    for token in Segmenter::new(input) {
        if !token.is_word() {
            escape_into(&mut out, token.text);
            continue;
        }
        let split = compute_split(token.text, config);
        if split == 0 {
            stats.record_skipped();
            escape_into(&mut out, token.text);
        } else {
            stats.record_emphasized();
            let (prefix, suffix) = split_word(token.text, split);
            out.push_str("<strong>");
            escape_into(&mut out, prefix);
            out.push_str("</strong>");
            escape_into(&mut out, suffix);
        }
    }

    out.push_str(PAGE_FOOT);
    (out, stats)
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasized_prefix_markup() {
        let (out, stats) = render_html("reading", &ProcessingConfig::default());
        assert!(out.contains("<strong>rea</strong>ding"));
        assert_eq!(stats.words_emphasized, 1);
        assert_eq!(stats.words_skipped, 0);
    }

    #[test]
    fn test_page_shell_present() {
        let (out, _) = render_html("hello", &ProcessingConfig::default());
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("charset=\"utf-8\""));
        assert!(out.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_escaping() {
        let (out, _) = render_html("a < b & c", &ProcessingConfig::default());
        assert!(out.contains("&lt;"));
        assert!(out.contains("&amp;"));
        assert!(!out.contains("< b"));
    }

    #[test]
    fn test_separators_verbatim() {
        let (out, _) = render_html("one, two", &ProcessingConfig::default());
        assert!(out.contains("</strong>e, <strong>"));
    }

    #[test]
    fn test_skipped_word_counted() {
        let config = ProcessingConfig::default().with_skip_technical(true);
        let (out, stats) = render_html("API", &config);
        assert!(out.contains(">API<"));
        assert!(!out.contains("<strong>A"));
        assert_eq!(stats.words_skipped, 1);
    }
}
