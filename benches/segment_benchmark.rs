//! Benchmarks for the segmentation and rendering hot path.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bionify::{process, DocumentFormat, ProcessingConfig, Segmenter};

/// Builds a paragraph-shaped corpus of the given approximate word count.
fn create_test_text(words: usize) -> String {
    let vocabulary = [
        "reading", "enhancement", "focuses", "the", "eye", "on", "a", "short",
        "prefix", "of", "each", "word", "which", "can", "improve", "scanning",
        "speed", "for", "some", "readers", "without", "changing", "content",
    ];
    let mut text = String::new();
    for i in 0..words {
        text.push_str(vocabulary[i % vocabulary.len()]);
        if i % 12 == 11 {
            text.push('\n');
        } else {
            text.push(' ');
        }
    }
    text
}

fn bench_segmenter(c: &mut Criterion) {
    let text = create_test_text(5_000);

    c.bench_function("segment_5k_words", |b| {
        b.iter(|| {
            let count = Segmenter::new(black_box(&text))
                .filter(|t| t.is_word())
                .count();
            black_box(count)
        })
    });
}

fn bench_text_processing(c: &mut Criterion) {
    let text = create_test_text(5_000);
    let config = ProcessingConfig::default();

    c.bench_function("process_text_5k_words_html", |b| {
        b.iter(|| {
            let result = process(black_box(text.as_bytes()), DocumentFormat::Text, &config);
            black_box(result.output.len())
        })
    });
}

criterion_group!(benches, bench_segmenter, bench_text_processing);
criterion_main!(benches);
