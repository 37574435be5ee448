//! Processing configuration: intensity, reading profiles, strategies.

use serde::{Deserialize, Serialize};

/// Lowest intensity the engine will apply, in percent of word length.
pub const MIN_INTENSITY: u8 = 20;
/// Highest intensity the engine will apply.
pub const MAX_INTENSITY: u8 = 80;
/// Intensity used when the caller does not specify one.
pub const DEFAULT_INTENSITY: u8 = 40;

/// Named reading presets that adjust the effective intensity and the
/// eligibility rules before the split computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingProfile {
    /// Balanced enhancement for general reading.
    #[default]
    Standard,
    /// Stronger enhancement for fast reading (+15 intensity points).
    SpeedReading,
    /// Moderate boost plus a minimum prefix of 2 for words of 3+ characters.
    Accessibility,
    /// Conservative enhancement for technical documents (-15 points);
    /// identifiers and acronyms can be excluded via `skip_technical`.
    Technical,
    /// Minimal changes: intensity pinned to the low end regardless of the
    /// configured value.
    Preservation,
}

/// How aggressively words are emphasized and how low-confidence words are
/// treated. Strategy governs eligibility, not the base arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Base algorithm applied uniformly.
    #[default]
    Balanced,
    /// Words the segmenter cannot classify confidently are left alone.
    Conservative,
    /// Maximal emphasis: all but the last character.
    Aggressive,
    /// Conservative for short words, balanced for long ones.
    Adaptive,
}

/// Output format for plain-text input. PDF and DOCX input always re-emit
/// their own format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Standalone HTML page with `<strong>` emphasis.
    #[default]
    Html,
    /// Markdown with `**bold**` emphasis.
    Markdown,
    /// Plain text; see [`ProcessingConfig::plain_marker`].
    PlainText,
}

/// Immutable per-request processing configuration.
///
/// Built once at request entry and shared by reference; the engine never
/// mutates it. Intensity is clamped to `[20, 80]` on construction and again
/// defensively wherever it is consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Percentage of each word's length targeted for emphasis.
    pub intensity: u8,
    /// Reading preset adjusting the effective intensity.
    pub profile: ReadingProfile,
    /// Output format for text input.
    pub output_format: OutputFormat,
    /// Eligibility strategy.
    pub strategy: Strategy,
    /// Restrict processing to safe subsets: body text only in DOCX, no
    /// synthetic bold in PDF.
    pub preserve_formatting: bool,
    /// Leave identifiers and acronyms (all-caps or digit-bearing words)
    /// unemphasized.
    pub skip_technical: bool,
    /// Marker inserted between prefix and suffix in plain-text output.
    /// `None` emits the text unchanged — a deliberately degraded mode,
    /// reported as such in the processing method.
    pub plain_marker: Option<char>,
}

impl ProcessingConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emphasis intensity, clamped to `[20, 80]`.
    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = clamp_intensity(intensity);
        self
    }

    /// Set the reading profile.
    pub fn with_profile(mut self, profile: ReadingProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the output format for text input.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the processing strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable formatting preservation.
    pub fn with_preserve_formatting(mut self, preserve: bool) -> Self {
        self.preserve_formatting = preserve;
        self
    }

    /// Enable or disable technical-word skipping.
    pub fn with_skip_technical(mut self, skip: bool) -> Self {
        self.skip_technical = skip;
        self
    }

    /// Set the plain-text prefix/suffix marker.
    pub fn with_plain_marker(mut self, marker: char) -> Self {
        self.plain_marker = Some(marker);
        self
    }

    /// The intensity guaranteed to be within the documented range.
    pub fn clamped_intensity(&self) -> u8 {
        clamp_intensity(self.intensity)
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
            profile: ReadingProfile::Standard,
            output_format: OutputFormat::Html,
            strategy: Strategy::Balanced,
            preserve_formatting: false,
            skip_technical: false,
            plain_marker: None,
        }
    }
}

fn clamp_intensity(intensity: u8) -> u8 {
    intensity.clamp(MIN_INTENSITY, MAX_INTENSITY)
}
