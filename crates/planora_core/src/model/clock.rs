//! Minute-of-day clock value.
//!
//! # Responsibility
//! - Represent a single-day wall-clock time as minutes since midnight.
//! - Own the canonical `HH:mm` text form used on the wire.
//!
//! # Invariants
//! - The inner value is always in `0..MINUTES_PER_DAY`.
//! - Ordering by value equals lexicographic order of the `HH:mm` form.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Minutes in one implicit schedule day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Wall-clock time within one implicit day.
///
/// Serialized as the zero-padded 24-hour `HH:mm` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const NOON: ClockTime = ClockTime(12 * 60);

    /// Builds a clock time from 24-hour components.
    ///
    /// Returns `None` when `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self((hour * 60 + minute) as u16))
    }

    /// Builds a clock time from any minute count, wrapping past midnight.
    pub fn from_minute_of_day(minutes: u32) -> Self {
        Self((minutes % MINUTES_PER_DAY) as u16)
    }

    /// Parses the strict canonical form `HH:mm` (exactly five characters).
    pub fn parse_hhmm(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let hour = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
        let minute = u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0');
        Self::from_hm(hour, minute)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0) / 60
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0) % 60
    }

    pub fn minute_of_day(self) -> u32 {
        u32::from(self.0)
    }

    /// Adds minutes with minute-of-day wraparound (`23:30 + 90 = 01:00`).
    pub fn add_minutes(self, minutes: u32) -> Self {
        Self::from_minute_of_day(self.minute_of_day() + minutes % MINUTES_PER_DAY)
    }

    /// Forward distance in minutes from `self` to `later`, wrapping past
    /// midnight. Equal times yield `0`.
    pub fn minutes_until(self, later: ClockTime) -> u32 {
        (later.minute_of_day() + MINUTES_PER_DAY - self.minute_of_day()) % MINUTES_PER_DAY
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hhmm(value.as_str())
            .ok_or_else(|| format!("expected 24-hour HH:mm clock time, got `{value}`"))
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
