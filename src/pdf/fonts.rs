//! Per-page font table: family normalization and bold-variant lookup.

use std::collections::BTreeMap;

use lopdf::{Document, ObjectId};

use crate::error::Result;

/// Owned snapshot of one font resource on a page.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// Resource name the content stream selects with `Tf` (e.g. `F1`).
    pub resource: Vec<u8>,
    /// The `/BaseFont` name, subset prefix included.
    pub base_font: String,
    /// Family after stripping the subset prefix and style suffix.
    pub family: String,
    /// Whether the style suffix names a bold face.
    pub is_bold: bool,
    /// True for simple fonts (not `/Type0`), where one byte shows one glyph.
    pub simple: bool,
}

/// All font resources visible to a page's content stream.
#[derive(Debug, Default)]
pub struct FontTable {
    fonts: BTreeMap<Vec<u8>, FontInfo>,
}

impl FontTable {
    /// Snapshot the fonts of `page_id`. Fonts without a `/BaseFont` name are
    /// recorded as non-simple so the rewriter leaves their text alone.
    pub fn for_page(doc: &Document, page_id: ObjectId) -> Result<Self> {
        let mut fonts = BTreeMap::new();
        for (resource, dict) in doc.get_page_fonts(page_id)? {
            let subtype = dict
                .get(b"Subtype")
                .and_then(|o| o.as_name())
                .map(|n| n.to_vec())
                .unwrap_or_default();
            let base_font = dict
                .get(b"BaseFont")
                .and_then(|o| o.as_name())
                .map(|n| String::from_utf8_lossy(n).into_owned());

            let info = match base_font {
                Ok(base_font) => {
                    let (family, style) = split_base_font(&base_font);
                    FontInfo {
                        resource: resource.clone(),
                        family,
                        is_bold: style.to_ascii_lowercase().contains("bold"),
                        simple: subtype != b"Type0",
                        base_font,
                    }
                }
                Err(_) => FontInfo {
                    resource: resource.clone(),
                    base_font: String::new(),
                    family: String::new(),
                    is_bold: false,
                    simple: false,
                },
            };
            fonts.insert(resource, info);
        }
        Ok(Self { fonts })
    }

    pub fn get(&self, resource: &[u8]) -> Option<&FontInfo> {
        self.fonts.get(resource)
    }

    /// Find a bold face of the same family as `resource` among the page's
    /// font resources.
    pub fn bold_variant(&self, resource: &[u8]) -> Option<&FontInfo> {
        let current = self.get(resource)?;
        if current.family.is_empty() {
            return None;
        }
        self.fonts
            .values()
            .find(|f| f.is_bold && f.simple && f.family == current.family)
    }
}

/// Split a `/BaseFont` value into family and style.
///
/// Strips the six-letter subset prefix (`ABCDEF+Times-Bold`) and splits the
/// remainder at the first `-` or `,` ("Times-Bold", "Arial,BoldItalic").
fn split_base_font(base_font: &str) -> (String, String) {
    let name = strip_subset_prefix(base_font);
    match name.find(['-', ',']) {
        Some(i) => (name[..i].to_string(), name[i + 1..].to_string()),
        None => (name.to_string(), String::new()),
    }
}

fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((prefix, rest)) if prefix.len() == 6 && prefix.chars().all(|c| c.is_ascii_uppercase()) => {
            rest
        }
        _ => name,
    }
}
