//! End-to-end tests for plain-text processing.

use bionify::{
    process, Bionify, DocumentFormat, OutputFormat, ProcessingConfig, ReadingProfile, Strategy,
};

fn html_of(input: &str, config: &ProcessingConfig) -> String {
    let result = process(input.as_bytes(), DocumentFormat::Text, config);
    String::from_utf8(result.output).unwrap()
}

#[test]
fn standard_sentence_gets_prefix_emphasis() {
    let html = html_of("The quick brown fox", &ProcessingConfig::default());
    assert!(html.contains("<strong>Th</strong>e"));
    assert!(html.contains("<strong>qu</strong>ick"));
    assert!(html.contains("<strong>br</strong>own"));
    assert!(html.contains("<strong>fo</strong>x"));
}

#[test]
fn whitespace_and_punctuation_survive_verbatim() {
    let input = "one,  two!\n\tthree...";
    let html = html_of(input, &ProcessingConfig::default());
    let stripped: String = html
        .replace("<strong>", "")
        .replace("</strong>", "");
    assert!(stripped.contains("one,  two!\n\tthree..."));
}

#[test]
fn processing_is_deterministic() {
    let config = ProcessingConfig::default().with_intensity(63);
    let input = "determinism means the same answer every single time";
    assert_eq!(html_of(input, &config), html_of(input, &config));
}

#[test]
fn conservative_strategy_leaves_apostrophe_words() {
    let config = ProcessingConfig::default().with_strategy(Strategy::Conservative);
    let html = html_of("don't stop reading", &config);
    assert!(html.contains("don't"));
    assert!(!html.contains("<strong>do</strong>n't"));
    // Ordinary words still processed.
    assert!(html.contains("<strong>rea</strong>ding"));
}

#[test]
fn technical_words_skipped_on_request() {
    let config = ProcessingConfig::default().with_skip_technical(true);
    let result = process(
        b"the API2 endpoint returns JSON",
        DocumentFormat::Text,
        &config,
    );
    let html = String::from_utf8(result.output).unwrap();
    assert!(!html.contains("<strong>AP"));
    assert!(!html.contains("<strong>JS"));
    assert!(html.contains("API"));
    assert!(html.contains("2 "));
    assert!(html.contains("<strong>end</strong>point"));
    assert!(result.report.words_skipped >= 2);
}

#[test]
fn higher_intensity_never_shrinks_the_prefix() {
    let word = "comprehension";
    let mut last = 0;
    for intensity in [20u8, 35, 50, 65, 80] {
        let config = ProcessingConfig::default()
            .with_intensity(intensity)
            .with_output_format(OutputFormat::PlainText)
            .with_plain_marker('|');
        let result = process(word.as_bytes(), DocumentFormat::Text, &config);
        let output = String::from_utf8(result.output).unwrap();
        let prefix_len = output.find('|').unwrap();
        assert!(prefix_len >= last, "intensity {intensity} shrank the prefix");
        assert!(prefix_len < word.len());
        last = prefix_len;
    }
}

#[test]
fn markdown_does_not_disturb_existing_markers() {
    let config = ProcessingConfig::default().with_output_format(OutputFormat::Markdown);
    let result = process(b"keep *this* intact", DocumentFormat::Text, &config);
    let md = String::from_utf8(result.output).unwrap();
    assert!(md.contains("*this*"));
    assert!(md.contains("**ke**ep"));
    assert_eq!(result.report.method_used, "text_markdown");
}

#[test]
fn plain_text_without_marker_is_identity() {
    let config = ProcessingConfig::default().with_output_format(OutputFormat::PlainText);
    let input = b"untouched output, reported as degraded";
    let result = process(input, DocumentFormat::Text, &config);
    assert_eq!(result.output, input);
    assert!(result.report.fallback_used);
    assert_eq!(result.report.method_used, "text_plain_passthrough");
}

#[test]
fn profiles_change_the_split_point() {
    let marker_config = |profile| {
        ProcessingConfig::default()
            .with_profile(profile)
            .with_output_format(OutputFormat::PlainText)
            .with_plain_marker('|')
    };
    let split_of = |profile| {
        let result = process(
            b"comprehension",
            DocumentFormat::Text,
            &marker_config(profile),
        );
        String::from_utf8(result.output).unwrap().find('|').unwrap()
    };

    let standard = split_of(ReadingProfile::Standard);
    assert!(split_of(ReadingProfile::SpeedReading) > standard);
    assert!(split_of(ReadingProfile::Technical) < standard);
}

#[test]
fn file_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("note.txt");
    std::fs::write(&input_path, "read this from disk").unwrap();

    let data = std::fs::read(&input_path).unwrap();
    let result = process(&data, DocumentFormat::Text, &ProcessingConfig::default());

    let output_path = dir.path().join("note.html");
    std::fs::write(&output_path, &result.output).unwrap();
    let html = std::fs::read_to_string(&output_path).unwrap();
    assert!(html.contains("<strong>re</strong>ad"));
}

#[test]
fn builder_and_free_function_agree() {
    let config = ProcessingConfig::default().with_intensity(60);
    let via_fn = process(b"agreement", DocumentFormat::Text, &config);
    let via_builder = Bionify::with_config(config).process_bytes(b"agreement", DocumentFormat::Text);
    assert_eq!(via_fn.output, via_builder.output);
    assert_eq!(via_fn.report.words_emphasized, via_builder.report.words_emphasized);
}
