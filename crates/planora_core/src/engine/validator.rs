//! Schedule event schema validation.
//!
//! # Responsibility
//! - Turn a `CandidateEvent` into a canonical `ScheduleEvent` or a typed error.
//! - Apply field coercion: trimmed title, lowercased type, integral duration.
//!
//! # Invariants
//! - Checks run in order (title, start time, duration, end time, type) and
//!   stop at the first failure.
//! - A present end time replaces the duration with the forward distance from
//!   the start time.
//! - The input candidate is never mutated.
//! - Unknown event types are rejected, never mapped to a default.

use crate::model::clock::ClockTime;
use crate::model::event::{CandidateEvent, EventType, RawDuration, ScheduleEvent};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// Field-level schema violation for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent (or blank, for `title`).
    MissingField(&'static str),
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidTimeFormat(String),
    InvalidDuration(String),
    InvalidType(String),
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::FieldTooLong { .. } => "FIELD_TOO_LONG",
            Self::InvalidTimeFormat(_) => "INVALID_TIME_FORMAT",
            Self::InvalidDuration(_) => "INVALID_DURATION",
            Self::InvalidType(_) => "INVALID_TYPE",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::FieldTooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::InvalidTimeFormat(value) => {
                write!(f, "invalid time `{value}` (expected HH:mm)")
            }
            Self::InvalidDuration(value) => {
                write!(f, "invalid duration {value} (expected non-negative minutes)")
            }
            Self::InvalidType(value) => write!(
                f,
                "invalid event type `{value}` (expected exercise|work|meeting|meal|leisure)"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Validates one candidate into a canonical event.
pub fn validate(candidate: &CandidateEvent) -> Result<ScheduleEvent, ValidationError> {
    let title = validate_title(candidate.title.as_deref())?;
    let start_time = validate_start_time(candidate.start_time.as_deref())?;
    let mut duration = validate_duration(candidate.duration.as_ref())?;
    if let Some(end) = validate_end_time(candidate.end_time.as_deref())? {
        duration = start_time.minutes_until(end);
    }
    let event_type = validate_type(candidate.event_type.as_deref())?;

    Ok(ScheduleEvent {
        title,
        start_time,
        duration,
        event_type,
        location: non_blank(candidate.location.as_deref()),
        notes: non_blank(candidate.notes.as_deref()),
    })
}

/// Batch outcome: accepted events plus `(candidate index, error)` rejections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub accepted: Vec<ScheduleEvent>,
    pub rejected: Vec<(usize, ValidationError)>,
}

/// Validates every candidate, keeping input order among accepted events.
pub fn validate_all(candidates: &[CandidateEvent]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (index, candidate) in candidates.iter().enumerate() {
        match validate(candidate) {
            Ok(event) => report.accepted.push(event),
            Err(err) => report.rejected.push((index, err)),
        }
    }
    report
}

impl TryFrom<CandidateEvent> for ScheduleEvent {
    type Error = ValidationError;

    fn try_from(value: CandidateEvent) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

fn validate_title(value: Option<&str>) -> Result<String, ValidationError> {
    let title = value.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    let actual = title.chars().count();
    if actual > TITLE_MAX_CHARS {
        return Err(ValidationError::FieldTooLong {
            field: "title",
            max: TITLE_MAX_CHARS,
            actual,
        });
    }
    Ok(title.to_string())
}

fn validate_start_time(value: Option<&str>) -> Result<ClockTime, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingField("startTime"))?;
    ClockTime::parse_hhmm(raw.trim())
        .ok_or_else(|| ValidationError::InvalidTimeFormat(raw.to_string()))
}

fn validate_end_time(value: Option<&str>) -> Result<Option<ClockTime>, ValidationError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    ClockTime::parse_hhmm(raw.trim())
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidTimeFormat(raw.to_string()))
}

fn validate_duration(value: Option<&RawDuration>) -> Result<u32, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingField("duration"))?;
    let invalid = || ValidationError::InvalidDuration(raw.to_string());
    let minutes = match raw {
        RawDuration::Integer(minutes) => *minutes,
        RawDuration::Float(minutes) => {
            if !minutes.is_finite() || minutes.fract() != 0.0 {
                return Err(invalid());
            }
            *minutes as i64
        }
        RawDuration::Text(text) => text.trim().parse::<i64>().map_err(|_| invalid())?,
    };
    u32::try_from(minutes).map_err(|_| invalid())
}

fn validate_type(value: Option<&str>) -> Result<EventType, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingField("type"))?;
    EventType::parse(raw).ok_or_else(|| ValidationError::InvalidType(raw.to_string()))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
