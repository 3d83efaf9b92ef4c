//! Rendering adapters.
//!
//! One weather card, two interchangeable presentations over the same
//! record: ANSI truecolor with the time-of-day gradient, and plain text for
//! pipes and tests.

mod ansi;
mod plain;

pub use ansi::AnsiRenderer;
pub use plain::PlainRenderer;

use chrono::{DateTime, Local};

use skycast_core::{LocationSuggestion, Theme, WeatherRecord};

/// A rendering adapter: turns the weather record and the active theme into
/// a block of terminal output.
pub trait Render {
    fn weather(&self, record: &WeatherRecord, theme: &Theme, now: DateTime<Local>) -> String;
}

/// One suggestion line: "Paris (Île-de-France, France)".
pub fn suggestion_row(suggestion: &LocationSuggestion) -> String {
    let detail = suggestion.detail();
    if detail.is_empty() {
        suggestion.name.clone()
    } else {
        format!("{} ({detail})", suggestion.name)
    }
}

/// "Sat, Aug 30 · 10:15 AM", mirroring the original card's date line.
pub(crate) fn date_line(now: DateTime<Local>) -> String {
    now.format("%a, %b %-d · %-I:%M %p").to_string()
}
