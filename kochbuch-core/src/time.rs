//! Duration string normalization.
//!
//! Recipe pages declare times as ISO-8601 durations ("PT1H30M"),
//! localized phrases ("1 Std. 30 Min.") or bare numbers; everything is
//! folded into whole minutes.

use std::sync::LazyLock;

use regex::Regex;

static ISO_DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)PT(?:(\d+)H)?(?:(\d+)M)?").expect("Invalid ISO duration regex")
});

static HOUR_PHRASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:stunden?|std|h)\b").expect("Invalid hour phrase regex")
});

static MINUTE_PHRASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:minuten?|min|m)\b").expect("Invalid minute phrase regex")
});

static BARE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid number regex"));

/// Parse a heterogeneous duration string into whole minutes.
///
/// Unparseable input degrades to 0, never an error.
pub fn parse_minutes(input: Option<&str>) -> u32 {
    let Some(input) = input else { return 0 };
    let input = input.trim();
    if input.is_empty() {
        return 0;
    }

    // ISO-8601 duration; the bare "PT" prefix without components doesn't count
    if let Some(cap) = ISO_DURATION_REGEX.captures(input) {
        if cap.get(1).is_some() || cap.get(2).is_some() {
            let hours = capture_number(cap.get(1));
            let minutes = capture_number(cap.get(2));
            return hours * 60 + minutes;
        }
    }

    // Localized phrases, searched independently and summed
    let hours = HOUR_PHRASE_REGEX
        .captures(input)
        .map(|cap| capture_number(cap.get(1)));
    let minutes = MINUTE_PHRASE_REGEX
        .captures(input)
        .map(|cap| capture_number(cap.get(1)));
    if hours.is_some() || minutes.is_some() {
        return hours.unwrap_or(0) * 60 + minutes.unwrap_or(0);
    }

    // Last resort: first bare integer, taken as minutes
    BARE_NUMBER_REGEX
        .find(input)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn capture_number(capture: Option<regex::Match<'_>>) -> u32 {
    capture
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
