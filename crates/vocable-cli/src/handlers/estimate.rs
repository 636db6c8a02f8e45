//! `vocable estimate`: spoken duration of a text.

use std::fmt;

use vocable_core::{Settings, estimate_duration, format_time, word_count};

/// Duration estimate for one text.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub words: usize,
    pub rate: f32,
    pub seconds: f64,
}

impl Estimate {
    pub fn new(text: &str, rate: f32) -> Self {
        Self {
            words: word_count(text),
            rate,
            seconds: estimate_duration(text, rate),
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Words:    {}", self.words)?;
        writeln!(f, "Rate:     {}x", self.rate)?;
        write!(
            f,
            "Duration: {} ({:.2}s)",
            format_time(self.seconds),
            self.seconds
        )
    }
}

/// Execute the estimate command.
pub fn execute(settings: &Settings, text: &str, rate: Option<f32>) {
    let rate = rate.or(settings.default_rate).unwrap_or(1.0);
    let estimate = Estimate::new(text, rate);
    tracing::debug!(
        words = estimate.words,
        rate,
        seconds = estimate.seconds,
        "Estimated duration"
    );
    println!("{estimate}");
}
