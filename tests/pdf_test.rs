//! End-to-end tests for the PDF transformer, using PDFs built in memory.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use bionify::{process, DocumentFormat, ProcessingConfig};

/// Assemble a one-page PDF around `content`, with Times-Roman as `F1` and
/// optionally Times-Bold as `F2`.
fn build_pdf(content: Content, with_bold_font: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
    });
    let mut font_dict = dictionary! { "F1" => regular_id };
    if with_bold_font {
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Times-Bold",
        });
        font_dict.set("F2", bold_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Build a one-page PDF showing `text` in Times-Roman, optionally with a
/// Times-Bold resource alongside it.
fn build_text_pdf(text: &str, with_bold_font: bool) -> Vec<u8> {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), Object::Integer(12)]),
            Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    build_pdf(content, with_bold_font)
}

/// Build a one-page PDF containing only vector graphics.
fn build_graphics_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content = Content {
        operations: vec![
            Operation::new("m", vec![Object::Integer(10), Object::Integer(10)]),
            Operation::new("l", vec![Object::Integer(100), Object::Integer(100)]),
            Operation::new("S", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Decode the first page's content operations of a serialized PDF.
fn page_operations(bytes: &[u8]) -> Vec<Operation> {
    let doc = Document::load_mem(bytes).unwrap();
    let pages = doc.get_pages();
    let page_id = *pages.values().next().unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    Content::decode(&content).unwrap().operations
}

fn shown_text(operations: &[Operation]) -> String {
    operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}

#[test]
fn bold_variant_is_used_when_present() {
    let input = build_text_pdf("hello world", true);
    let result = process(&input, DocumentFormat::Pdf, &ProcessingConfig::default());

    assert!(!result.report.fallback_used);
    assert_eq!(result.report.words_emphasized, 2);
    assert_eq!(result.report.pages_processed, 1);

    let ops = page_operations(&result.output);
    let bold_switches = ops
        .iter()
        .filter(|op| {
            op.operator == "Tf"
                && matches!(op.operands.first(), Some(Object::Name(n)) if n == b"F2")
        })
        .count();
    assert_eq!(bold_switches, 2);
    // No synthetic bold when a real bold face exists.
    assert!(ops.iter().all(|op| op.operator != "Tr"));
    // The visible text is unchanged.
    assert_eq!(shown_text(&ops), "hello world");
}

#[test]
fn synthetic_bold_without_variant() {
    let input = build_text_pdf("emphasis without a bold face", false);
    let result = process(&input, DocumentFormat::Pdf, &ProcessingConfig::default());

    assert!(!result.report.fallback_used);
    let ops = page_operations(&result.output);
    assert!(ops
        .iter()
        .any(|op| op.operator == "Tr"
            && matches!(op.operands.first(), Some(Object::Integer(2)))));
    assert_eq!(shown_text(&ops), "emphasis without a bold face");
}

#[test]
fn preserve_formatting_blocks_synthetic_bold() {
    let input = build_text_pdf("no styling allowed", false);
    let config = ProcessingConfig::default().with_preserve_formatting(true);
    let result = process(&input, DocumentFormat::Pdf, &config);

    assert_eq!(result.output, input);
    assert!(result.report.fallback_used);
    // Bypassed words still show up in the report.
    assert_eq!(result.report.words_emphasized, 0);
    assert_eq!(result.report.words_skipped, 3);
}

#[test]
fn unsplit_tj_string_after_trailing_bold_word_stays_regular() {
    // "reading a" ends on an emphasized single-letter word; the digit-only
    // string after the kerning adjustment must not inherit the bold font.
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), Object::Integer(12)]),
            Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
            Operation::new(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal("reading a"),
                    Object::Integer(-50),
                    Object::string_literal("12345"),
                ])],
            ),
            Operation::new("ET", vec![]),
        ],
    };
    let input = build_pdf(content, true);
    let result = process(&input, DocumentFormat::Pdf, &ProcessingConfig::default());
    assert_eq!(result.report.words_emphasized, 2);

    let ops = page_operations(&result.output);
    let mut font: Vec<u8> = Vec::new();
    let mut digits_font = None;
    let mut shown = String::new();
    for op in &ops {
        match op.operator.as_str() {
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    font = name.clone();
                }
            }
            "TJ" => {
                if let Some(Object::Array(elements)) = op.operands.first() {
                    for element in elements {
                        if let Object::String(bytes, _) = element {
                            if bytes.as_slice() == b"12345" {
                                digits_font = Some(font.clone());
                            }
                            shown.push_str(&String::from_utf8_lossy(bytes));
                        }
                    }
                }
            }
            _ => {}
        }
    }
    assert_eq!(digits_font.as_deref(), Some(b"F1".as_slice()));
    assert_eq!(shown, "reading a12345");
}

#[test]
fn graphics_only_pdf_is_returned_byte_identical() {
    let input = build_graphics_pdf();
    let result = process(&input, DocumentFormat::Pdf, &ProcessingConfig::default());

    assert_eq!(result.output, input);
    assert!(result.report.fallback_used);
    assert_eq!(result.report.words_emphasized, 0);
    assert_eq!(result.mime_type, "application/pdf");
}

#[test]
fn non_pdf_bytes_fall_back() {
    let garbage = b"definitely not a pdf";
    let result = process(garbage, DocumentFormat::Pdf, &ProcessingConfig::default());
    assert_eq!(result.output, garbage);
    assert!(result.report.fallback_used);
    assert_eq!(result.report.method_used, "pdf_content_rewrite");
}

#[test]
fn output_still_loads_as_pdf() {
    let input = build_text_pdf("round trip of the document", true);
    let result = process(&input, DocumentFormat::Pdf, &ProcessingConfig::default());
    let doc = Document::load_mem(&result.output).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}
