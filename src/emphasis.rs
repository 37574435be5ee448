//! Emphasis policy: how many leading characters of a word get bolded.

use crate::config::{ProcessingConfig, ReadingProfile, Strategy};

/// Number of leading characters of `word` to emphasize under `config`.
///
/// Returns 0 when the word should be left alone. The result is always less
/// than the word's character count for words of length 2 or more, so the
/// whole word is never bolded. Deterministic: same word and config, same
/// answer.
pub fn compute_split(word: &str, config: &ProcessingConfig) -> usize {
    let len = word.chars().count();
    if len == 0 {
        return 0;
    }

    if config.skip_technical && is_technical_word(word) {
        return 0;
    }

    if len == 1 {
        // Single letters in technical text usually denote variables or
        // units and read better untouched.
        return if config.profile == ReadingProfile::Technical {
            0
        } else {
            1
        };
    }

    let intensity = effective_intensity(config);

    match config.strategy {
        Strategy::Aggressive => len - 1,
        Strategy::Conservative if is_low_confidence(word) => 0,
        Strategy::Adaptive if len <= 4 && is_low_confidence(word) => 0,
        _ => base_split(len, intensity, config.profile),
    }
}

/// True for words that look like identifiers or acronyms: all-caps runs of
/// two or more letters, or anything containing a digit.
pub fn is_technical_word(word: &str) -> bool {
    let mut letters = 0;
    let mut uppercase = 0;
    for c in word.chars() {
        if c.is_ascii_digit() {
            return true;
        }
        if c.is_alphabetic() {
            letters += 1;
            if c.is_uppercase() {
                uppercase += 1;
            }
        }
    }
    letters >= 2 && letters == uppercase
}

/// Words the conservative strategy declines to touch: connector-joined
/// compounds and words with non-ASCII letters, where a visual split point
/// is least predictable.
fn is_low_confidence(word: &str) -> bool {
    word.chars()
        .any(|c| matches!(c, '\'' | '\u{2019}' | '-') || (c.is_alphabetic() && !c.is_ascii()))
}

fn effective_intensity(config: &ProcessingConfig) -> u8 {
    let i = config.clamped_intensity();
    match config.profile {
        ReadingProfile::Standard => i,
        ReadingProfile::SpeedReading => (i + 15).min(80),
        ReadingProfile::Accessibility => (i + 10).min(80),
        ReadingProfile::Technical => i.saturating_sub(15).max(20),
        ReadingProfile::Preservation => 20,
    }
}

fn base_split(len: usize, intensity: u8, profile: ReadingProfile) -> usize {
    // ceil(len * intensity / 100), then keep at least one character bold
    // and at least one character plain.
    let split = (len * intensity as usize).div_ceil(100).clamp(1, len - 1);
    if profile == ReadingProfile::Accessibility && len >= 3 {
        split.max(2)
    } else {
        split
    }
}
