//! Spoken and written clock time recognition.
//!
//! # Responsibility
//! - Map short time tokens (`7pm`, `7 am`, `noon`, `14:30`) to `ClockTime`.
//! - Own the scanning pattern the extractor uses to find candidate tokens.
//!
//! # Invariants
//! - Recognition is case-insensitive and tolerates whitespace before `am|pm`.
//! - Meridiem hours are limited to 1..=12; `12am` is midnight, `12pm` is noon.
//! - Tokens outside the grammar are `NotRecognized`, never guessed.

use crate::model::clock::ClockTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TIME_IDIOMS: Lazy<HashMap<&'static str, ClockTime>> = Lazy::new(|| {
    HashMap::from([
        ("noon", ClockTime::NOON),
        ("midday", ClockTime::NOON),
        ("midnight", ClockTime::MIDNIGHT),
    ])
});

static MERIDIEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*([ap])m$").expect("valid meridiem regex")
});
static CLOCK_LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid clock literal regex"));

/// Finds time-like tokens in lowercased text. Every hit must still be
/// confirmed with `parse_time_expression`.
pub(crate) static TIME_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:noon|midday|midnight|\d{1,2}(?::\d{2})?\s*[ap]m|\d{1,2}:\d{2})\b")
        .expect("valid time token regex")
});

/// Token is outside the recognized time grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    NotRecognized(String),
}

impl Display for TimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRecognized(token) => write!(f, "time expression not recognized: `{token}`"),
        }
    }
}

impl Error for TimeParseError {}

/// Parses one time token into a canonical clock time.
///
/// Accepts idioms (`noon`, `midday`, `midnight`), meridiem forms
/// (`7pm`, `7 PM`, `7:45am`) and 24-hour literals (`9:05`, `14:30`).
pub fn parse_time_expression(token: &str) -> Result<ClockTime, TimeParseError> {
    let normalized = token.trim().to_ascii_lowercase();
    let not_recognized = || TimeParseError::NotRecognized(token.trim().to_string());

    if let Some(time) = TIME_IDIOMS.get(normalized.as_str()) {
        return Ok(*time);
    }

    if let Some(caps) = MERIDIEM_RE.captures(normalized.as_str()) {
        let hour: u32 = caps[1].parse().map_err(|_| not_recognized())?;
        let minute: u32 = match caps.get(2) {
            Some(value) => value.as_str().parse().map_err(|_| not_recognized())?,
            None => 0,
        };
        if !(1..=12).contains(&hour) {
            return Err(not_recognized());
        }
        let hour = match (&caps[3], hour) {
            ("a", 12) => 0,
            ("a", h) => h,
            (_, 12) => 12,
            (_, h) => h + 12,
        };
        return ClockTime::from_hm(hour, minute).ok_or_else(not_recognized);
    }

    if let Some(caps) = CLOCK_LITERAL_RE.captures(normalized.as_str()) {
        let hour: u32 = caps[1].parse().map_err(|_| not_recognized())?;
        let minute: u32 = caps[2].parse().map_err(|_| not_recognized())?;
        return ClockTime::from_hm(hour, minute).ok_or_else(not_recognized);
    }

    Err(not_recognized())
}
