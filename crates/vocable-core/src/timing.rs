//! Spoken-duration estimates and `m:ss` formatting for progress displays.

use crate::domain::RATE_RANGE;

/// Average speaking speed at rate 1.0.
pub const WORDS_PER_MINUTE: f64 = 155.0;

/// Number of words, where words are separated by runs of whitespace.
///
/// Blank input has no words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimate how long `text` takes to speak at `rate`, in seconds.
///
/// The rate is clamped into the host range; a non-finite rate counts as 1.0.
/// Blank text takes `0.0` seconds.
#[allow(clippy::cast_precision_loss)]
pub fn estimate_duration(text: &str, rate: f32) -> f64 {
    let rate = if rate.is_finite() {
        f64::from(rate.clamp(*RATE_RANGE.start(), *RATE_RANGE.end()))
    } else {
        1.0
    };

    let words = word_count(text) as f64;
    words / (WORDS_PER_MINUTE * rate) * 60.0
}

/// Format seconds as `m:ss`, flooring both parts.
///
/// Negative and non-finite input formats as `0:00`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
